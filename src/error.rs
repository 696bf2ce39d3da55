use std::path::PathBuf;

use thiserror::Error;

/// Failures outside the typing core: terminal, config and log file handling
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error while {context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}

impl Error {
    pub(crate) fn io(context: &'static str, source: std::io::Error) -> Self {
        Self::Io { context, source }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn io_error_carries_context() {
        let err = Error::io(
            "saving config",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.to_string(), "I/O error while saving config: denied");
    }

    #[test]
    fn config_error_names_path() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = Error::Config {
            path: PathBuf::from("/tmp/config.json"),
            source,
        };
        assert!(err.to_string().starts_with("invalid config file /tmp/config.json"));
    }
}
