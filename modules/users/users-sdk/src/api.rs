//! Users API trait and error type
//!
//! Contract trait and errors for consumers of the users service.

use async_trait::async_trait;
use tonic::{Code, Status};
use transport_grpc::CallContext;

use crate::models::User;

/// Users API trait
///
/// Implemented by `UsersGrpcClient`; tests substitute their own
/// implementation. Every call carries the `CallContext` of the request being
/// served so the caller's deadline reaches the users service.
#[async_trait]
pub trait UsersClient: Send + Sync {
    /// Create a user and return it with its assigned id.
    async fn create_user(
        &self,
        ctx: &CallContext,
        name: &str,
        email: &str,
    ) -> Result<User, UsersError>;

    /// Get a user by id.
    async fn get_user(&self, ctx: &CallContext, id: &str) -> Result<User, UsersError>;
}

/// Error type for users service calls
#[derive(thiserror::Error, Debug)]
pub enum UsersError {
    /// The requested user does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The call failed on the wire or on the server.
    #[error("gRPC transport error: {}", .0.message())]
    Transport(#[source] Status),
}

impl UsersError {
    /// gRPC code equivalent of this error.
    #[must_use]
    pub fn code(&self) -> Code {
        match self {
            Self::NotFound(_) => Code::NotFound,
            Self::Transport(status) => status.code(),
        }
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl From<Status> for UsersError {
    fn from(status: Status) -> Self {
        match status.code() {
            Code::NotFound => Self::NotFound(status.message().to_owned()),
            _ => Self::Transport(status),
        }
    }
}
