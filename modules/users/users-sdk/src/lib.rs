//! Users SDK
//!
//! This crate provides everything needed to consume the users service:
//! - API trait (`UsersClient`)
//! - Model (`User`) and error type (`UsersError`)
//! - gRPC client (`UsersGrpcClient`)
//! - Proto stubs for the server implementation
//!
//! ## Usage
//!
//! ```ignore
//! use transport_grpc::{CallContext, client::GrpcClientConfig};
//! use users_sdk::{UsersClient, UsersGrpcClient};
//!
//! let client = UsersGrpcClient::connect_lazy("http://127.0.0.1:50051", &GrpcClientConfig::new("users"))?;
//! let user = client.create_user(&CallContext::background(), "Alice", "alice@example.com").await?;
//! ```

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

// === API TRAIT AND TYPES ===
mod api;
mod models;
pub use api::{UsersClient, UsersError};
pub use models::User;

// === GRPC CLIENT ===
mod client;
pub use client::UsersGrpcClient;

// === GRPC PROTO STUBS (for server implementation) ===
/// Generated protobuf types for `UserService`
#[allow(clippy::all, clippy::pedantic)]
pub mod proto {
    tonic::include_proto!("users.v1");
}

// Re-export proto types needed by server
pub use proto::user_service_server::{UserService, UserServiceServer};
pub use proto::{CreateUserRequest, CreateUserResponse, GetUserRequest, GetUserResponse};

/// Fully qualified gRPC name of `UserService`
pub const SERVICE_NAME: &str = "users.v1.UserService";

/// Encoded `FileDescriptorSet` of the `users.v1` package, for gRPC reflection.
pub const FILE_DESCRIPTOR_SET: &[u8] = tonic::include_file_descriptor_set!("users_v1_descriptor");
