//! Gateway Module definition
//!
//! Holds one channel to the users service for the whole process lifetime and
//! serves the public API until shutdown.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tonic::service::RoutesBuilder;

use gateway_sdk::{FILE_DESCRIPTOR_SET, GatewayServiceServer, SERVICE_NAME};
use transport_grpc::client::GrpcClientConfig;
use transport_grpc::server::{add_reflection, serve_tcp};
use users_sdk::{UsersClient, UsersGrpcClient};

use crate::api::grpc::GatewayServiceImpl;
use crate::domain::Service;

/// Configuration for the gateway module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listen address for the public gRPC server.
    pub listen_addr: String,

    /// URI of the users service.
    pub users_endpoint: String,

    /// Timeout for establishing the users service connection.
    pub connect_timeout_ms: u64,

    /// Upper bound for each users service call.
    ///
    /// Unset means calls are bounded only by the caller's deadline.
    pub rpc_timeout_ms: Option<u64>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:50052".to_owned(),
            users_endpoint: "http://127.0.0.1:50051".to_owned(),
            connect_timeout_ms: 10_000,
            rpc_timeout_ms: None,
        }
    }
}

impl GatewayConfig {
    /// Client settings for the users service channel.
    #[must_use]
    pub fn users_client_config(&self) -> GrpcClientConfig {
        let cfg = GrpcClientConfig::new(users_sdk::SERVICE_NAME)
            .with_connect_timeout(Duration::from_millis(self.connect_timeout_ms));
        match self.rpc_timeout_ms {
            Some(ms) => cfg.with_rpc_timeout(Duration::from_millis(ms)),
            None => cfg,
        }
    }
}

/// Gateway module.
///
/// Exposes `gateway.v1.GatewayService` over gRPC.
pub struct GatewayModule {
    config: GatewayConfig,
    service: Arc<Service>,
}

impl GatewayModule {
    /// Create the module with a channel to the configured users endpoint.
    ///
    /// The channel connects on first use, so the users service does not have
    /// to be up yet. Must be called from within a tokio runtime.
    ///
    /// # Errors
    /// Returns an error if `users_endpoint` is not a valid URI.
    pub fn connect(config: GatewayConfig) -> anyhow::Result<Self> {
        tracing::info!(
            users_endpoint = %config.users_endpoint,
            "Initializing gateway module"
        );
        let client =
            UsersGrpcClient::connect_lazy(config.users_endpoint.clone(), &config.users_client_config())?;
        Ok(Self::with_client(config, Arc::new(client)))
    }

    /// Create the module over an already built users client.
    #[must_use]
    pub fn with_client(config: GatewayConfig, users: Arc<dyn UsersClient>) -> Self {
        Self {
            config,
            service: Arc::new(Service::new(users)),
        }
    }

    #[must_use]
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Routes exposing `GatewayService` and its reflection descriptors.
    ///
    /// # Errors
    /// Returns an error if the reflection service cannot be built.
    pub fn grpc_routes(&self) -> anyhow::Result<tonic::service::Routes> {
        let svc = GatewayServiceServer::new(GatewayServiceImpl::new(Arc::clone(&self.service)));
        let mut routes = RoutesBuilder::default();
        routes.add_service(svc);
        add_reflection(&mut routes, FILE_DESCRIPTOR_SET)?;
        Ok(routes.routes())
    }

    /// Serve the gateway API on `listener` until `cancel` fires, then release
    /// the users service channel.
    ///
    /// # Errors
    /// Returns an error if the gRPC server fails.
    pub async fn serve(self, listener: TcpListener, cancel: CancellationToken) -> anyhow::Result<()> {
        let result = match self.grpc_routes() {
            Ok(routes) => serve_tcp(listener, routes, SERVICE_NAME, cancel).await,
            Err(e) => Err(e),
        };

        drop(self.service);
        tracing::info!(users_endpoint = %self.config.users_endpoint, "user service channel released");
        result
    }
}
