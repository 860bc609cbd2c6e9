//! gRPC Server implementation for users
//!
//! The server implementation handles gRPC requests and delegates
//! to the domain Service for business logic.

use std::sync::Arc;

use tonic::{Request, Response, Status};

use users_sdk::{CreateUserRequest, CreateUserResponse, GetUserRequest, GetUserResponse, UserService};

use crate::domain::{DomainError, Service};

/// gRPC service implementation that wraps the domain Service.
#[derive(Clone)]
pub struct UsersServiceImpl {
    service: Arc<Service>,
}

impl UsersServiceImpl {
    /// Create a new `UserService` implementation with the given Service.
    #[must_use]
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

fn to_status(err: &DomainError) -> Status {
    match err {
        DomainError::UserNotFound { .. } => Status::not_found(err.to_string()),
    }
}

#[tonic::async_trait]
impl UserService for UsersServiceImpl {
    async fn create_user(
        &self,
        request: Request<CreateUserRequest>,
    ) -> Result<Response<CreateUserResponse>, Status> {
        let req = request.into_inner();
        tracing::info!(name = %req.name, email = %req.email, "CreateUser called");

        let user = self.service.create_user(&req.name, &req.email);

        Ok(Response::new(user.into()))
    }

    async fn get_user(
        &self,
        request: Request<GetUserRequest>,
    ) -> Result<Response<GetUserResponse>, Status> {
        let req = request.into_inner();
        tracing::info!(user_id = %req.user_id, "GetUser called");

        let user = self
            .service
            .get_user(&req.user_id)
            .map_err(|e| to_status(&e))?;

        Ok(Response::new(user.into()))
    }
}
