//! Gateway Module
//!
//! Public gRPC entry point. Every call is delegated to the users service
//! over a single long-lived channel; responses are reshaped for callers.
//!
//! ## Architecture
//!
//! - `domain/service.rs` - Delegation, error wrapping and enrichment
//! - `api/grpc/server.rs` - gRPC server implementation
//! - `module.rs` - Configuration, downstream channel and serve lifecycle

// === MODULE DEFINITION ===
mod module;
pub use module::{GatewayConfig, GatewayModule};

// === INTERNAL MODULES ===
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;
