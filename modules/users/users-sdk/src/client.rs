//! gRPC client implementation of `UsersClient`

use anyhow::Result;
use async_trait::async_trait;
use tonic::transport::Channel;
use transport_grpc::CallContext;
use transport_grpc::client::{GrpcClientConfig, connect_lazy, connect_with_stack};

use crate::api::{UsersClient, UsersError};
use crate::models::User;
use crate::proto::user_service_client::UserServiceClient;
use crate::proto::{CreateUserRequest, GetUserRequest};

/// gRPC client for the users service.
///
/// Holds one channel for its whole lifetime; clones share it. Dropping the
/// last clone releases the connection.
#[derive(Clone)]
pub struct UsersGrpcClient {
    inner: UserServiceClient<Channel>,
}

impl UsersGrpcClient {
    /// Connect to the users service, waiting for the connection.
    ///
    /// # Errors
    /// Returns an error if the URI is invalid or the service is unreachable.
    pub async fn connect(uri: impl Into<String>, cfg: &GrpcClientConfig) -> Result<Self> {
        let channel: Channel = connect_with_stack(uri, cfg).await?;
        Ok(Self::from(channel))
    }

    /// Create a client whose channel connects on first use.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    /// Returns an error if the URI is invalid.
    pub fn connect_lazy(uri: impl Into<String>, cfg: &GrpcClientConfig) -> Result<Self> {
        let channel: Channel = connect_lazy(uri, cfg)?;
        Ok(Self::from(channel))
    }
}

impl From<Channel> for UsersGrpcClient {
    fn from(channel: Channel) -> Self {
        Self {
            inner: UserServiceClient::new(channel),
        }
    }
}

#[async_trait]
impl UsersClient for UsersGrpcClient {
    async fn create_user(
        &self,
        ctx: &CallContext,
        name: &str,
        email: &str,
    ) -> Result<User, UsersError> {
        let mut client = self.inner.clone();

        let mut request = tonic::Request::new(CreateUserRequest {
            name: name.to_owned(),
            email: email.to_owned(),
        });
        ctx.apply(&mut request);

        let response = client.create_user(request).await?;
        Ok(response.into_inner().into())
    }

    async fn get_user(&self, ctx: &CallContext, id: &str) -> Result<User, UsersError> {
        let mut client = self.inner.clone();

        let mut request = tonic::Request::new(GetUserRequest {
            user_id: id.to_owned(),
        });
        ctx.apply(&mut request);

        let response = client.get_user(request).await?;
        Ok(response.into_inner().into())
    }
}
