//! Process bootstrap shared by service binaries.
//!
//! - `config` - layered configuration loading and YAML rendering
//! - `logging` - `tracing` subscriber setup
//! - `signals` - shutdown on SIGINT / SIGTERM

pub mod config;
pub mod logging;
pub mod signals;

pub use config::{ENV_PREFIX, load_layered, to_yaml};
pub use logging::{LogFormat, LoggingConfig, init_logging};
pub use signals::{cancel_on_signal, wait_for_shutdown};
