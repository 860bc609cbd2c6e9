//! Per-call context carried from an inbound request to downstream calls.
//!
//! A service that calls another service on behalf of its caller must not keep
//! working after the caller has given up. The caller's deadline arrives in the
//! `grpc-timeout` header; [`CallContext::from_metadata`] captures it together
//! with the arrival instant and [`CallContext::apply`] writes the remaining
//! budget onto an outbound request.

use std::time::{Duration, Instant};

use tonic::Request;
use tonic::metadata::MetadataMap;

/// Header name for gRPC timeout propagation.
pub const GRPC_TIMEOUT_HEADER: &str = "grpc-timeout";

/// Smallest timeout written onto an outbound request.
///
/// An already expired inbound deadline still produces a (tiny) timeout so the
/// downstream call fails with `DEADLINE_EXCEEDED` instead of running unbounded.
const MIN_FORWARDED_TIMEOUT: Duration = Duration::from_millis(1);

/// Context of the call being served.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallContext {
    expires_at: Option<Instant>,
}

impl CallContext {
    /// Context without a deadline.
    #[must_use]
    pub fn background() -> Self {
        Self::default()
    }

    /// Context whose deadline is `timeout` from now.
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            expires_at: Instant::now().checked_add(timeout),
        }
    }

    /// Build a context from inbound request metadata.
    ///
    /// A missing or malformed `grpc-timeout` header yields a context without a
    /// deadline.
    #[must_use]
    pub fn from_metadata(meta: &MetadataMap) -> Self {
        extract_deadline(meta).map_or_else(Self::background, Self::with_timeout)
    }

    /// Time left before the caller's deadline, if it has one.
    #[must_use]
    pub fn remaining(&self) -> Option<Duration> {
        self.expires_at
            .map(|at| at.saturating_duration_since(Instant::now()))
    }

    /// Propagate the remaining deadline onto an outbound request.
    pub fn apply<T>(&self, request: &mut Request<T>) {
        if let Some(remaining) = self.remaining() {
            request.set_timeout(remaining.max(MIN_FORWARDED_TIMEOUT));
        }
    }
}

/// Extract the caller's timeout from request metadata.
#[must_use]
pub fn extract_deadline(meta: &MetadataMap) -> Option<Duration> {
    let value = meta.get(GRPC_TIMEOUT_HEADER)?;
    parse_grpc_timeout(value.to_str().ok()?)
}

/// Parse a `grpc-timeout` header value: at most 8 digits followed by one of
/// `H`, `M`, `S`, `m`, `u`, `n`.
fn parse_grpc_timeout(raw: &str) -> Option<Duration> {
    if raw.is_empty() {
        return None;
    }

    let (digits, unit) = raw.split_at(raw.len() - 1);
    if digits.is_empty() || digits.len() > 8 {
        return None;
    }

    let value: u64 = digits.parse().ok()?;

    match unit {
        "H" => Some(Duration::from_secs(value * 3600)),
        "M" => Some(Duration::from_secs(value * 60)),
        "S" => Some(Duration::from_secs(value)),
        "m" => Some(Duration::from_millis(value)),
        "u" => Some(Duration::from_micros(value)),
        "n" => Some(Duration::from_nanos(value)),
        _ => None,
    }
}
