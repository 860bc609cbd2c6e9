//! gRPC client for the public gateway API

use tonic::Status;
use tonic::transport::Channel;
use transport_grpc::CallContext;
use transport_grpc::client::{GrpcClientConfig, connect_with_stack};

use crate::models::{Registration, UserProfile};
use crate::proto::gateway_service_client::GatewayServiceClient;
use crate::proto::{GetUserProfileRequest, RegisterUserRequest};

/// gRPC client for `GatewayService`.
#[derive(Clone)]
pub struct GatewayGrpcClient {
    inner: GatewayServiceClient<Channel>,
}

impl GatewayGrpcClient {
    /// Connect to the gateway.
    ///
    /// # Errors
    /// Returns an error if the URI is invalid or the gateway is unreachable.
    pub async fn connect(uri: impl Into<String>, cfg: &GrpcClientConfig) -> anyhow::Result<Self> {
        let channel: Channel = connect_with_stack(uri, cfg).await?;
        Ok(Self {
            inner: GatewayServiceClient::new(channel),
        })
    }

    /// Register a user.
    ///
    /// # Errors
    /// Returns the status reported by the gateway.
    pub async fn register_user(
        &self,
        ctx: &CallContext,
        name: &str,
        email: &str,
    ) -> Result<Registration, Status> {
        let mut request = tonic::Request::new(RegisterUserRequest {
            name: name.to_owned(),
            email: email.to_owned(),
        });
        ctx.apply(&mut request);

        let response = self.inner.clone().register_user(request).await?;
        Ok(response.into_inner().into())
    }

    /// Fetch a user profile.
    ///
    /// # Errors
    /// Returns the status reported by the gateway.
    pub async fn get_user_profile(
        &self,
        ctx: &CallContext,
        user_id: &str,
    ) -> Result<UserProfile, Status> {
        let mut request = tonic::Request::new(GetUserProfileRequest {
            user_id: user_id.to_owned(),
        });
        ctx.apply(&mut request);

        let response = self.inner.clone().get_user_profile(request).await?;
        Ok(response.into_inner().into())
    }
}
