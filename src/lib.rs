// Library surface for headless/integration tests and reuse.
// The binary in main.rs only adds the CLI and terminal setup.
pub mod app;
pub mod app_dirs;
pub mod config;
pub mod error;
pub mod metrics;
pub mod progress;
pub mod runtime;
pub mod samples;
pub mod session;
pub mod ui;

pub use error::{Error, Result};
pub use metrics::{compute, Metrics};
pub use progress::{evaluate, CharProgress, CharState, Evaluation};
pub use samples::{next_sample, SAMPLE_TEXTS};
