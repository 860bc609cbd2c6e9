//! Users Module
//!
//! Internal gRPC service that owns the user record store.
//!
//! ## Architecture
//!
//! - `domain/store.rs` - Concurrency-safe record store and id assignment
//! - `domain/service.rs` - Core business logic
//! - `api/grpc/server.rs` - gRPC server implementation
//! - `module.rs` - Configuration and serve lifecycle
//!
//! External consumers should use the `users-sdk` crate which provides the
//! gRPC client and the `UsersClient` trait.

// === MODULE DEFINITION ===
mod module;
pub use module::{UsersConfig, UsersModule};

// === INTERNAL MODULES ===
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;
