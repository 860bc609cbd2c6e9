//! Domain service for the gateway
//!
//! Owns no data. Every operation is one call to the users service; failures
//! are wrapped with the operation name and successes are reshaped.

use std::sync::Arc;

use gateway_sdk::{Registration, STATUS_ACTIVE, UserProfile};
use tracing::{debug, instrument};
use transport_grpc::CallContext;
use users_sdk::UsersClient;

use super::error::ServiceError;

/// Gateway domain service.
pub struct Service {
    users: Arc<dyn UsersClient>,
}

impl Service {
    #[must_use]
    pub fn new(users: Arc<dyn UsersClient>) -> Self {
        Self { users }
    }

    /// Register a user through the users service.
    ///
    /// # Errors
    /// Returns [`ServiceError::CreateUser`] if the users service call fails.
    #[instrument(skip(self, ctx, email), fields(name = %name))]
    pub async fn register_user(
        &self,
        ctx: &CallContext,
        name: &str,
        email: &str,
    ) -> Result<Registration, ServiceError> {
        let user = self
            .users
            .create_user(ctx, name, email)
            .await
            .map_err(ServiceError::CreateUser)?;

        debug!(user_id = %user.id, "user registered");
        Ok(Registration {
            message: format!("User {} registered successfully", user.name),
            user_id: user.id,
        })
    }

    /// Fetch a user from the users service and present it as a profile.
    ///
    /// # Errors
    /// Returns [`ServiceError::GetUser`] if the users service call fails,
    /// including when the id is unknown.
    #[instrument(skip(self, ctx), fields(user_id = %user_id))]
    pub async fn get_user_profile(
        &self,
        ctx: &CallContext,
        user_id: &str,
    ) -> Result<UserProfile, ServiceError> {
        let user = self
            .users
            .get_user(ctx, user_id)
            .await
            .map_err(ServiceError::GetUser)?;

        Ok(UserProfile {
            user_id: user.id,
            name: user.name,
            email: user.email,
            status: STATUS_ACTIVE.to_owned(),
        })
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use std::error::Error as _;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use tonic::{Code, Status};
    use users_sdk::{User, UsersError};

    #[derive(Clone, Copy, Default)]
    enum Behavior {
        #[default]
        Succeed,
        NotFound,
        Unavailable,
        Hang,
    }

    /// Sets its flag when dropped.
    struct DropFlag(Arc<AtomicBool>);

    impl Drop for DropFlag {
        fn drop(&mut self) {
            self.0.store(true, Ordering::SeqCst);
        }
    }

    #[derive(Default)]
    struct MockUsers {
        behavior: Behavior,
        calls: Mutex<Vec<(String, String)>>,
        deadlines: Mutex<Vec<Option<Duration>>>,
        dropped: Arc<AtomicBool>,
    }

    impl MockUsers {
        fn with(behavior: Behavior) -> Arc<Self> {
            Arc::new(Self {
                behavior,
                ..Default::default()
            })
        }

        async fn respond(&self, ctx: &CallContext, id: &str, name: &str) -> Result<User, UsersError> {
            self.deadlines.lock().unwrap().push(ctx.remaining());
            match self.behavior {
                Behavior::Succeed => Ok(User {
                    id: id.to_owned(),
                    name: name.to_owned(),
                    email: format!("{}@example.com", name.to_lowercase()),
                }),
                Behavior::NotFound => Err(UsersError::from(Status::not_found(format!(
                    "user {id} not found"
                )))),
                Behavior::Unavailable => Err(UsersError::from(Status::unavailable(
                    "tcp connect error: connection refused",
                ))),
                Behavior::Hang => {
                    let _guard = DropFlag(Arc::clone(&self.dropped));
                    std::future::pending().await
                }
            }
        }
    }

    #[async_trait]
    impl UsersClient for MockUsers {
        async fn create_user(
            &self,
            ctx: &CallContext,
            name: &str,
            email: &str,
        ) -> Result<User, UsersError> {
            self.calls
                .lock()
                .unwrap()
                .push((name.to_owned(), email.to_owned()));
            self.respond(ctx, "user-1", name).await
        }

        async fn get_user(&self, ctx: &CallContext, id: &str) -> Result<User, UsersError> {
            self.calls
                .lock()
                .unwrap()
                .push((id.to_owned(), String::new()));
            self.respond(ctx, id, "Alice").await
        }
    }

    #[tokio::test]
    async fn test_register_user_builds_message() {
        let mock = MockUsers::with(Behavior::Succeed);
        let service = Service::new(mock.clone());

        let registration = service
            .register_user(&CallContext::background(), "Alice", "alice@example.com")
            .await
            .unwrap();

        assert_eq!(
            registration,
            Registration {
                user_id: "user-1".to_owned(),
                message: "User Alice registered successfully".to_owned(),
            }
        );
        assert_eq!(
            *mock.calls.lock().unwrap(),
            vec![("Alice".to_owned(), "alice@example.com".to_owned())]
        );
    }

    #[tokio::test]
    async fn test_register_user_empty_name() {
        let service = Service::new(MockUsers::with(Behavior::Succeed));

        let registration = service
            .register_user(&CallContext::background(), "", "")
            .await
            .unwrap();

        assert_eq!(registration.message, "User  registered successfully");
    }

    #[tokio::test]
    async fn test_get_user_profile_is_active() {
        let mock = MockUsers::with(Behavior::Succeed);
        let service = Service::new(mock.clone());

        let profile = service
            .get_user_profile(&CallContext::background(), "user-1")
            .await
            .unwrap();

        assert_eq!(
            profile,
            UserProfile {
                user_id: "user-1".to_owned(),
                name: "Alice".to_owned(),
                email: "alice@example.com".to_owned(),
                status: "active".to_owned(),
            }
        );
        assert_eq!(mock.calls.lock().unwrap()[0].0, "user-1");
    }

    #[tokio::test]
    async fn test_get_user_profile_not_found_is_wrapped() {
        let service = Service::new(MockUsers::with(Behavior::NotFound));

        let err = service
            .get_user_profile(&CallContext::background(), "user-99")
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::GetUser(UsersError::NotFound(_))));
        assert_eq!(
            err.to_string(),
            "failed to get user from user service: user user-99 not found"
        );
        assert_eq!(err.code(), Code::NotFound);
    }

    #[tokio::test]
    async fn test_register_user_unavailable_is_wrapped() {
        let service = Service::new(MockUsers::with(Behavior::Unavailable));

        let err = service
            .register_user(&CallContext::background(), "Alice", "alice@example.com")
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::CreateUser(_)));
        assert!(
            err.to_string()
                .starts_with("failed to create user via user service: ")
        );
        assert!(err.to_string().contains("connection refused"));
        assert_eq!(err.code(), Code::Unavailable);
        assert!(err.source().is_some());
    }

    #[tokio::test]
    async fn test_deadline_reaches_users_client() {
        let mock = MockUsers::with(Behavior::Succeed);
        let service = Service::new(mock.clone());
        let budget = Duration::from_secs(5);

        service
            .register_user(&CallContext::with_timeout(budget), "Alice", "alice@example.com")
            .await
            .unwrap();
        service
            .get_user_profile(&CallContext::background(), "user-1")
            .await
            .unwrap();

        let deadlines = mock.deadlines.lock().unwrap().clone();
        let forwarded = deadlines[0].expect("deadline should be forwarded");
        assert!(forwarded <= budget);
        assert_eq!(deadlines[1], None);
    }

    #[tokio::test]
    async fn test_abandoned_call_drops_downstream_work() {
        let mock = MockUsers::with(Behavior::Hang);
        let service = Service::new(mock.clone());
        let ctx = CallContext::background();

        let result = tokio::time::timeout(
            Duration::from_millis(50),
            service.get_user_profile(&ctx, "user-1"),
        )
        .await;

        assert!(result.is_err(), "hanging downstream call cannot complete");
        assert!(
            mock.dropped.load(Ordering::SeqCst),
            "downstream call must be dropped with the gateway call"
        );
    }
}
