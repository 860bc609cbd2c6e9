//! Users Module definition
//!
//! Owns the domain service and serves it over gRPC until shutdown.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tonic::service::RoutesBuilder;

use transport_grpc::server::{add_reflection, serve_tcp};
use users_sdk::{FILE_DESCRIPTOR_SET, SERVICE_NAME, UserServiceServer};

use crate::api::grpc::UsersServiceImpl;
use crate::domain::Service;

/// Configuration for the users module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UsersConfig {
    /// Listen address for the users gRPC server.
    pub listen_addr: String,
}

impl Default for UsersConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:50051".to_owned(),
        }
    }
}

/// Users module.
///
/// Exposes `users.v1.UserService` over gRPC.
pub struct UsersModule {
    config: UsersConfig,
    service: Arc<Service>,
}

impl UsersModule {
    #[must_use]
    pub fn new(config: UsersConfig) -> Self {
        tracing::info!("Initializing users module");
        Self {
            config,
            service: Arc::new(Service::new()),
        }
    }

    #[must_use]
    pub fn config(&self) -> &UsersConfig {
        &self.config
    }

    /// Domain service backing the gRPC API.
    #[must_use]
    pub fn service(&self) -> Arc<Service> {
        Arc::clone(&self.service)
    }

    /// Routes exposing `UserService` and its reflection descriptors.
    ///
    /// # Errors
    /// Returns an error if the reflection service cannot be built.
    pub fn grpc_routes(&self) -> anyhow::Result<tonic::service::Routes> {
        let svc = UserServiceServer::new(UsersServiceImpl::new(self.service()));
        let mut routes = RoutesBuilder::default();
        routes.add_service(svc);
        add_reflection(&mut routes, FILE_DESCRIPTOR_SET)?;
        Ok(routes.routes())
    }

    /// Serve the users API on `listener` until `cancel` fires.
    ///
    /// # Errors
    /// Returns an error if the gRPC server fails.
    pub async fn serve(&self, listener: TcpListener, cancel: CancellationToken) -> anyhow::Result<()> {
        serve_tcp(listener, self.grpc_routes()?, SERVICE_NAME, cancel).await?;

        tracing::info!(
            users = self.service.user_count(),
            "users module stopped; records are discarded"
        );
        Ok(())
    }
}
