//! Wiring of both modules into one process.

use std::net::SocketAddr;

use anyhow::Result;
use gateway::GatewayModule;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use transport_grpc::server::bind_tcp;
use users::UsersModule;

use crate::config::AppConfig;

/// Both listeners, bound and not yet serving.
pub struct Servers {
    /// Configuration the modules are built from once serving starts.
    pub config: AppConfig,
    users_listener: TcpListener,
    gateway_listener: TcpListener,
}

impl Servers {
    /// Bind the users and gateway listeners.
    ///
    /// # Errors
    /// Returns an error if either address is invalid or cannot be bound.
    pub async fn bind(config: AppConfig) -> Result<Self> {
        let users_listener = bind_tcp(&config.users.listen_addr).await?;
        let gateway_listener = bind_tcp(&config.gateway.listen_addr).await?;
        Ok(Self {
            config,
            users_listener,
            gateway_listener,
        })
    }

    /// # Errors
    /// Returns an error if the listener has no local address.
    pub fn users_addr(&self) -> Result<SocketAddr> {
        Ok(self.users_listener.local_addr()?)
    }

    /// # Errors
    /// Returns an error if the listener has no local address.
    pub fn gateway_addr(&self) -> Result<SocketAddr> {
        Ok(self.gateway_listener.local_addr()?)
    }

    /// Serve both modules until `cancel` fires or one of them fails.
    ///
    /// A failing module cancels the other so the process exits as a whole.
    ///
    /// # Errors
    /// Returns the first module error.
    pub async fn serve(self, cancel: CancellationToken) -> Result<()> {
        let users_addr = self.users_addr()?;
        let gateway_addr = self.gateway_addr()?;
        let Self {
            config,
            users_listener,
            gateway_listener,
        } = self;

        log_banner(users_addr, gateway_addr, &config.gateway.users_endpoint);

        let users = UsersModule::new(config.users);
        let gateway = GatewayModule::connect(config.gateway)?;

        let users_task = {
            let cancel = cancel.clone();
            async move {
                let result = users.serve(users_listener, cancel.clone()).await;
                if let Err(e) = &result {
                    tracing::error!(error = %e, "users module failed");
                    cancel.cancel();
                }
                result
            }
        };
        let gateway_task = {
            let cancel = cancel.clone();
            async move {
                let result = gateway.serve(gateway_listener, cancel.clone()).await;
                if let Err(e) = &result {
                    tracing::error!(error = %e, "gateway module failed");
                    cancel.cancel();
                }
                result
            }
        };

        let (users_result, gateway_result) = tokio::join!(users_task, gateway_task);
        users_result?;
        gateway_result?;

        tracing::info!("all modules stopped");
        Ok(())
    }
}

fn log_banner(users_addr: SocketAddr, gateway_addr: SocketAddr, users_endpoint: &str) {
    tracing::info!(%users_addr, "users service (users.v1.UserService) listening");
    tracing::info!(
        %gateway_addr,
        users_endpoint,
        "gateway service (gateway.v1.GatewayService) listening"
    );
    tracing::info!(
        "try: grpcurl -plaintext -d '{{\"name\":\"Alice\",\"email\":\"alice@example.com\"}}' \
         {gateway_addr} gateway.v1.GatewayService/RegisterUser"
    );
    tracing::info!(
        "try: grpcurl -plaintext -d '{{\"user_id\":\"user-1\"}}' \
         {gateway_addr} gateway.v1.GatewayService/GetUserProfile"
    );
    tracing::info!("try: grpcurl -plaintext {gateway_addr} list");
}
