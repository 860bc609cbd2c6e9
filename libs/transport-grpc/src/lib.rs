#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
//! gRPC transport helpers shared by the usergate services.
//!
//! - [`client`]: channel configuration and connection helpers
//! - [`server`]: listener binding and the cancellable serve loop
//! - [`context`]: per-call context (caller deadline) carried across a hop

pub mod client;
pub mod context;
pub mod server;

pub use context::CallContext;
