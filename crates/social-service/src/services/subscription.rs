//! Subscription service
//!
//! Handles the follow/unfollow toggle between users.

use social_core::DomainError;
use social_core::Snowflake;
use tracing::{info, instrument};

use crate::dto::ToggleOutcome;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Subscription service
pub struct SubscriptionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SubscriptionService<'a> {
    /// Create a new SubscriptionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Subscribe `follower_id` to `target_id`
    ///
    /// Subscribing twice is not an error; the second call reports the
    /// existing state instead of failing.
    #[instrument(skip(self))]
    pub async fn subscribe(
        &self,
        follower_id: Snowflake,
        target_id: Snowflake,
    ) -> ServiceResult<ToggleOutcome> {
        if follower_id == target_id {
            return Err(DomainError::SelfSubscription.into());
        }

        let target = self
            .ctx
            .user_repo()
            .find_by_id(target_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", target_id.to_string()))?;

        let added = self
            .ctx
            .subscription_repo()
            .add(follower_id, target_id)
            .await?;

        if added {
            info!(follower_id = %follower_id, followee_id = %target_id, "Subscription added");
            Ok(ToggleOutcome::created(format!(
                "You are now subscribed to {}",
                target.email
            )))
        } else {
            Ok(ToggleOutcome::unchanged("Already subscribed"))
        }
    }

    /// Unsubscribe `follower_id` from `target_id`
    #[instrument(skip(self))]
    pub async fn unsubscribe(
        &self,
        follower_id: Snowflake,
        target_id: Snowflake,
    ) -> ServiceResult<ToggleOutcome> {
        let target = self
            .ctx
            .user_repo()
            .find_by_id(target_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", target_id.to_string()))?;

        let removed = self
            .ctx
            .subscription_repo()
            .remove(follower_id, target_id)
            .await?;

        if removed {
            info!(follower_id = %follower_id, followee_id = %target_id, "Subscription removed");
            Ok(ToggleOutcome::unchanged(format!(
                "You are unsubscribed from {}",
                target.email
            )))
        } else {
            Ok(ToggleOutcome::unchanged(format!(
                "You are not subscribed to {}",
                target.email
            )))
        }
    }
}
