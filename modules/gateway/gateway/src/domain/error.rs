use tonic::Code;
use users_sdk::UsersError;

/// Errors surfaced by the gateway.
///
/// Each variant names the delegated operation and keeps the users service
/// error as its source.
#[derive(thiserror::Error, Debug)]
pub enum ServiceError {
    #[error("failed to create user via user service: {0}")]
    CreateUser(#[source] UsersError),

    #[error("failed to get user from user service: {0}")]
    GetUser(#[source] UsersError),
}

impl ServiceError {
    /// gRPC code of the underlying users service failure.
    #[must_use]
    pub fn code(&self) -> Code {
        self.users_error().code()
    }

    /// The users service error this one wraps.
    #[must_use]
    pub fn users_error(&self) -> &UsersError {
        match self {
            Self::CreateUser(err) | Self::GetUser(err) => err,
        }
    }
}
