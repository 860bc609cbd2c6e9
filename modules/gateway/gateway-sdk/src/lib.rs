//! Gateway SDK
//!
//! This crate provides everything needed to call the public gateway service:
//! - Models (`Registration`, `UserProfile`)
//! - gRPC client (`GatewayGrpcClient`)
//! - Proto stubs for the server implementation

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

mod client;
mod models;

pub use client::GatewayGrpcClient;
pub use models::{Registration, STATUS_ACTIVE, UserProfile};

/// Generated protobuf types for `GatewayService`
#[allow(clippy::all, clippy::pedantic)]
pub mod proto {
    tonic::include_proto!("gateway.v1");
}

// Re-export proto types needed by server
pub use proto::gateway_service_server::{GatewayService, GatewayServiceServer};
pub use proto::{
    GetUserProfileRequest, GetUserProfileResponse, RegisterUserRequest, RegisterUserResponse,
};

/// Fully qualified gRPC name of `GatewayService`
pub const SERVICE_NAME: &str = "gateway.v1.GatewayService";

/// Encoded `FileDescriptorSet` of the `gateway.v1` package, for gRPC reflection.
pub const FILE_DESCRIPTOR_SET: &[u8] = tonic::include_file_descriptor_set!("gateway_v1_descriptor");
