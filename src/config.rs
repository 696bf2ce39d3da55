use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::app_dirs::AppDirs;
use crate::error::{Error, Result};
use crate::runtime::TICK_RATE_MS;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// 1-based position of the first sample sentence
    pub start_sample: usize,
    pub tick_rate_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            start_sample: 1,
            tick_rate_ms: TICK_RATE_MS,
        }
    }
}

impl Config {
    /// Zero-based deck index for `start_sample`
    pub fn start_index(&self) -> usize {
        self.start_sample.saturating_sub(1)
    }
}

pub trait ConfigStore {
    /// Load the stored config, falling back to the default when the file is
    /// missing or unreadable.
    fn load(&self) -> Config {
        self.try_load().ok().flatten().unwrap_or_default()
    }

    /// `Ok(None)` when nothing has been stored yet
    fn try_load(&self) -> Result<Option<Config>>;

    fn save(&self, cfg: &Config) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            path: AppDirs::config_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn try_load(&self) -> Result<Option<Config>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Error::io("reading config", e)),
        };
        serde_json::from_slice::<Config>(&bytes)
            .map(Some)
            .map_err(|source| Error::Config {
                path: self.path.clone(),
                source,
            })
    }

    fn save(&self, cfg: &Config) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::io("creating config dir", e))?;
        }
        let data = serde_json::to_vec_pretty(cfg).map_err(|source| Error::Config {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, data).map_err(|e| Error::io("writing config", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use tempfile::tempdir;

    #[test]
    fn roundtrip_default_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = Config::default();
        store.save(&cfg).unwrap();
        let loaded = store.load();
        assert_eq!(cfg, loaded);
    }

    #[test]
    fn save_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = Config {
            start_sample: 4,
            tick_rate_ms: 250,
        };
        store.save(&cfg).unwrap();
        assert_eq!(store.try_load().unwrap(), Some(cfg));
    }

    #[test]
    fn missing_file_loads_default() {
        let dir = tempdir().unwrap();
        let store = FileConfigStore::with_path(dir.path().join("absent.json"));
        assert_matches!(store.try_load(), Ok(None));
        assert_eq!(store.load(), Config::default());
    }

    #[test]
    fn malformed_file_is_reported_but_load_falls_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        let store = FileConfigStore::with_path(&path);

        assert_matches!(store.try_load(), Err(Error::Config { .. }));
        assert_eq!(store.load(), Config::default());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "start_sample": 3 }"#).unwrap();
        let store = FileConfigStore::with_path(&path);

        let cfg = store.load();
        assert_eq!(cfg.start_sample, 3);
        assert_eq!(cfg.tick_rate_ms, TICK_RATE_MS);
        assert_eq!(cfg.start_index(), 2);
    }

    #[test]
    fn start_index_never_underflows() {
        let cfg = Config {
            start_sample: 0,
            ..Config::default()
        };
        assert_eq!(cfg.start_index(), 0);
    }
}
