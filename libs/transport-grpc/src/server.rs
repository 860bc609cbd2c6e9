//! Listener binding and the cancellable gRPC serve loop.
//!
//! Services bind first and serve second, so the bound address (including an
//! ephemeral `:0` port) is known before any request can arrive.

use std::net::SocketAddr;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tokio_util::sync::CancellationToken;
use tonic::service::{Routes, RoutesBuilder};
use tonic::transport::Server;

/// Parse a `host:port` listen address.
///
/// # Errors
/// Returns an error if `listen_addr` is not a socket address.
pub fn parse_listen_addr(listen_addr: &str) -> anyhow::Result<SocketAddr> {
    listen_addr
        .parse::<SocketAddr>()
        .with_context(|| format!("invalid listen_addr '{listen_addr}'"))
}

/// Bind a TCP listener for a gRPC service.
///
/// # Errors
/// Returns an error if the address is invalid or cannot be bound.
pub async fn bind_tcp(listen_addr: &str) -> anyhow::Result<TcpListener> {
    let addr = parse_listen_addr(listen_addr)?;
    TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind gRPC listener on {addr}"))
}

/// Endpoint URI clients can use to reach a bound listener.
///
/// # Errors
/// Returns an error if the listener has no local address.
pub fn endpoint_uri(listener: &TcpListener) -> anyhow::Result<String> {
    let bound = listener.local_addr()?;
    Ok(format!("http://{bound}"))
}

/// Add gRPC server reflection for the services in `descriptor_set`.
///
/// Lets tools such as `grpcurl` discover services without local proto files.
///
/// # Errors
/// Returns an error if `descriptor_set` is not an encoded `FileDescriptorSet`.
pub fn add_reflection(routes: &mut RoutesBuilder, descriptor_set: &'static [u8]) -> anyhow::Result<()> {
    let reflection = tonic_reflection::server::Builder::configure()
        .register_encoded_file_descriptor_set(descriptor_set)
        .build_v1()
        .context("failed to build gRPC reflection service")?;
    routes.add_service(reflection);
    Ok(())
}

/// Serve `routes` on `listener` until `cancel` fires.
///
/// In-flight calls are allowed to finish once cancellation is observed; new
/// connections are refused.
///
/// # Errors
/// Returns an error if the server fails while running.
pub async fn serve_tcp(
    listener: TcpListener,
    routes: Routes,
    service: &'static str,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let bound_addr = listener.local_addr()?;
    tracing::info!(%bound_addr, service, transport = "tcp", "gRPC server listening");

    let incoming = TcpListenerStream::new(listener);
    Server::builder()
        .add_routes(routes)
        .serve_with_incoming_shutdown(incoming, async move {
            cancel.cancelled().await;
        })
        .await
        .with_context(|| format!("gRPC server for {service} failed"))?;

    tracing::info!(%bound_addr, service, "gRPC server stopped");
    Ok(())
}
