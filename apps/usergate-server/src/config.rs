//! Application configuration.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::path::Path;

use anyhow::{Context, Result};
use bootstrap::LoggingConfig;
use gateway::GatewayConfig;
use serde::{Deserialize, Serialize};
use tonic::transport::{Endpoint, Uri};
use transport_grpc::server::parse_listen_addr;
use users::UsersConfig;

/// Full application configuration, one section per module plus logging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub users: UsersConfig,
    pub gateway: GatewayConfig,
    pub logging: LoggingConfig,
}

/// Values given on the command line; they win over every other layer.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub users_listen: Option<String>,
    pub gateway_listen: Option<String>,
    pub users_endpoint: Option<String>,
}

impl AppConfig {
    /// Load configuration: defaults, then the YAML file at `path`, then
    /// `APP__*` environment variables.
    ///
    /// # Errors
    /// Returns an error if the file is missing or any value is malformed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        bootstrap::load_layered(path)
    }

    /// Apply command-line values.
    ///
    /// Moving the users listener without naming an endpoint points the
    /// gateway at the new users address on this host.
    pub fn apply_cli_overrides(&mut self, overrides: &CliOverrides) {
        if let Some(addr) = &overrides.users_listen {
            self.users.listen_addr.clone_from(addr);
            if overrides.users_endpoint.is_none()
                && let Some(uri) = local_users_endpoint(addr)
            {
                self.gateway.users_endpoint = uri;
            }
        }
        if let Some(addr) = &overrides.gateway_listen {
            self.gateway.listen_addr.clone_from(addr);
        }
        if let Some(uri) = &overrides.users_endpoint {
            self.gateway.users_endpoint.clone_from(uri);
        }
    }

    /// Whether the gateway targets this host on a port the users service
    /// does not listen on.
    #[must_use]
    pub fn users_endpoint_mismatch(&self) -> bool {
        let Ok(listen) = parse_listen_addr(&self.users.listen_addr) else {
            return false;
        };
        let Ok(uri) = self.gateway.users_endpoint.parse::<Uri>() else {
            return false;
        };
        let local = matches!(
            uri.host(),
            Some("127.0.0.1" | "localhost" | "[::1]" | "::1")
        );
        let port = uri.port_u16().unwrap_or(80);
        local && listen.port() != 0 && port != listen.port()
    }

    /// Check values that deserialize fine but cannot be used.
    ///
    /// # Errors
    /// Returns the first invalid value found.
    pub fn validate(&self) -> Result<()> {
        parse_listen_addr(&self.users.listen_addr).context("users.listen_addr")?;
        parse_listen_addr(&self.gateway.listen_addr).context("gateway.listen_addr")?;
        Endpoint::from_shared(self.gateway.users_endpoint.clone()).with_context(|| {
            format!(
                "gateway.users_endpoint: invalid URI '{}'",
                self.gateway.users_endpoint
            )
        })?;
        bootstrap::logging::effective_level(&self.logging, 0).context("logging.level")?;
        if self.users_endpoint_mismatch() {
            tracing::warn!(
                users_listen = %self.users.listen_addr,
                users_endpoint = %self.gateway.users_endpoint,
                "gateway targets a local port the users service does not listen on"
            );
        }
        Ok(())
    }

    /// Render as YAML.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String> {
        bootstrap::to_yaml(self)
    }
}

/// Endpoint reaching a users listener bound on this host.
///
/// Unspecified addresses map to loopback; port 0 has no fixed endpoint.
fn local_users_endpoint(listen_addr: &str) -> Option<String> {
    let addr = parse_listen_addr(listen_addr).ok()?;
    if addr.port() == 0 {
        return None;
    }
    let ip = match addr.ip() {
        IpAddr::V4(ip) if ip.is_unspecified() => IpAddr::V4(Ipv4Addr::LOCALHOST),
        IpAddr::V6(ip) if ip.is_unspecified() => IpAddr::V6(Ipv6Addr::LOCALHOST),
        ip => ip,
    };
    Some(format!("http://{}", SocketAddr::new(ip, addr.port())))
}
