use crate::proto::{GetUserProfileResponse, RegisterUserResponse};

/// Status reported for every profile served by the gateway.
pub const STATUS_ACTIVE: &str = "active";

/// Result of registering a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub user_id: String,
    /// Human-readable confirmation naming the registered user.
    pub message: String,
}

/// User as presented by the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub status: String,
}

impl From<Registration> for RegisterUserResponse {
    fn from(r: Registration) -> Self {
        Self {
            user_id: r.user_id,
            message: r.message,
        }
    }
}

impl From<RegisterUserResponse> for Registration {
    fn from(r: RegisterUserResponse) -> Self {
        Self {
            user_id: r.user_id,
            message: r.message,
        }
    }
}

impl From<UserProfile> for GetUserProfileResponse {
    fn from(p: UserProfile) -> Self {
        Self {
            user_id: p.user_id,
            name: p.name,
            email: p.email,
            status: p.status,
        }
    }
}

impl From<GetUserProfileResponse> for UserProfile {
    fn from(p: GetUserProfileResponse) -> Self {
        Self {
            user_id: p.user_id,
            name: p.name,
            email: p.email,
            status: p.status,
        }
    }
}
