//! gRPC Server implementation for the gateway
//!
//! Captures the caller's deadline from request metadata and delegates to the
//! domain Service.

use std::sync::Arc;

use gateway_sdk::{
    GatewayService, GetUserProfileRequest, GetUserProfileResponse, RegisterUserRequest,
    RegisterUserResponse,
};
use tonic::{Request, Response, Status};
use transport_grpc::CallContext;

use crate::domain::{Service, ServiceError};

/// gRPC service implementation that wraps the domain Service.
#[derive(Clone)]
pub struct GatewayServiceImpl {
    service: Arc<Service>,
}

impl GatewayServiceImpl {
    #[must_use]
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

fn to_status(err: &ServiceError) -> Status {
    tracing::warn!(error = %err, code = ?err.code(), "users service call failed");
    Status::new(err.code(), err.to_string())
}

#[tonic::async_trait]
impl GatewayService for GatewayServiceImpl {
    async fn register_user(
        &self,
        request: Request<RegisterUserRequest>,
    ) -> Result<Response<RegisterUserResponse>, Status> {
        let ctx = CallContext::from_metadata(request.metadata());
        let req = request.into_inner();
        tracing::info!(name = %req.name, email = %req.email, "RegisterUser called");

        let registration = self
            .service
            .register_user(&ctx, &req.name, &req.email)
            .await
            .map_err(|e| to_status(&e))?;

        Ok(Response::new(registration.into()))
    }

    async fn get_user_profile(
        &self,
        request: Request<GetUserProfileRequest>,
    ) -> Result<Response<GetUserProfileResponse>, Status> {
        let ctx = CallContext::from_metadata(request.metadata());
        let req = request.into_inner();
        tracing::info!(user_id = %req.user_id, "GetUserProfile called");

        let profile = self
            .service
            .get_user_profile(&ctx, &req.user_id)
            .await
            .map_err(|e| to_status(&e))?;

        Ok(Response::new(profile.into()))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use tonic::Code;
    use users_sdk::{User, UsersClient, UsersError};

    /// Knows exactly one user, `user-1`.
    struct SingleUser;

    #[async_trait]
    impl UsersClient for SingleUser {
        async fn create_user(
            &self,
            _ctx: &CallContext,
            name: &str,
            email: &str,
        ) -> Result<User, UsersError> {
            Ok(User {
                id: "user-1".to_owned(),
                name: name.to_owned(),
                email: email.to_owned(),
            })
        }

        async fn get_user(&self, _ctx: &CallContext, id: &str) -> Result<User, UsersError> {
            if id == "user-1" {
                Ok(User {
                    id: id.to_owned(),
                    name: "Alice".to_owned(),
                    email: "alice@example.com".to_owned(),
                })
            } else {
                Err(UsersError::NotFound(format!("user {id} not found")))
            }
        }
    }

    fn new_test_server() -> GatewayServiceImpl {
        GatewayServiceImpl::new(Arc::new(Service::new(Arc::new(SingleUser))))
    }

    #[tokio::test]
    async fn test_register_user() {
        let got = new_test_server()
            .register_user(Request::new(RegisterUserRequest {
                name: "Alice".to_owned(),
                email: "alice@example.com".to_owned(),
            }))
            .await
            .unwrap()
            .into_inner();

        assert_eq!(got.user_id, "user-1");
        assert_eq!(got.message, "User Alice registered successfully");
    }

    #[tokio::test]
    async fn test_get_user_profile() {
        let got = new_test_server()
            .get_user_profile(Request::new(GetUserProfileRequest {
                user_id: "user-1".to_owned(),
            }))
            .await
            .unwrap()
            .into_inner();

        assert_eq!(got.user_id, "user-1");
        assert_eq!(got.name, "Alice");
        assert_eq!(got.email, "alice@example.com");
        assert_eq!(got.status, "active");
    }

    #[tokio::test]
    async fn test_get_user_profile_not_found_keeps_code() {
        let status = new_test_server()
            .get_user_profile(Request::new(GetUserProfileRequest {
                user_id: "user-42".to_owned(),
            }))
            .await
            .unwrap_err();

        assert_eq!(status.code(), Code::NotFound);
        assert_eq!(
            status.message(),
            "failed to get user from user service: user user-42 not found"
        );
    }
}
