//! Usergate server: the users service and the public gateway in one process.

pub mod config;
pub mod server;

pub use config::{AppConfig, CliOverrides};
pub use server::Servers;
