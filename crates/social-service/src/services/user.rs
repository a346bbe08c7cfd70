//! User service
//!
//! Handles profile reads, updates, account deletion, and photo uploads.

use social_common::auth::{hash_password, validate_password_strength};
use social_common::UploadKind;
use social_core::DomainError;
use social_core::query::UserFilter;
use social_core::Snowflake;
use tracing::{info, instrument};

use crate::dto::mappers::CurrentUserProfile;
use crate::dto::{CurrentUserResponse, UpdateUserRequest, UserResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::media::MediaService;

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Get the authenticated user's own profile
    #[instrument(skip(self))]
    pub async fn get_current_user(&self, user_id: Snowflake) -> ServiceResult<CurrentUserResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))?;

        self.current_profile(user).await
    }

    /// Get another user's public profile
    #[instrument(skip(self))]
    pub async fn get_user(&self, user_id: Snowflake) -> ServiceResult<UserResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))?;

        Ok(UserResponse::from(&user))
    }

    /// List users matching the filter, ordered by id
    #[instrument(skip(self, filter))]
    pub async fn list_users(&self, filter: &UserFilter) -> ServiceResult<Vec<UserResponse>> {
        let users = self.ctx.user_repo().list(filter).await?;
        Ok(users.iter().map(UserResponse::from).collect())
    }

    /// Update the authenticated user's profile
    ///
    /// Absent fields are left alone, so a partial body works the same
    /// for full and partial updates.
    #[instrument(skip(self, request))]
    pub async fn update_profile(
        &self,
        user_id: Snowflake,
        request: UpdateUserRequest,
    ) -> ServiceResult<CurrentUserResponse> {
        let mut user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))?;

        let mut changed = false;

        if let Some(email) = request.email {
            if email != user.email {
                // Uniqueness check before the write; the database unique
                // index still backstops the race
                if let Some(existing) = self.ctx.user_repo().find_by_email(&email).await? {
                    if existing.id != user.id {
                        return Err(DomainError::EmailAlreadyExists.into());
                    }
                }
                user.set_email(email);
                changed = true;
            }
        }

        // Hash up front, but only write the rotation once the profile
        // row update has gone through; a failed email write must not
        // leave a new password behind.
        let new_password_hash = match request.password {
            Some(password) => {
                validate_password_strength(&password).map_err(ServiceError::from)?;
                Some(hash_password(&password).map_err(|e| ServiceError::internal(e.to_string()))?)
            }
            None => None,
        };

        if request.first_name.is_some() || request.last_name.is_some() {
            let first_name = request
                .first_name
                .unwrap_or_else(|| user.first_name.clone());
            let last_name = request.last_name.unwrap_or_else(|| user.last_name.clone());
            user.set_names(first_name, last_name);
            changed = true;
        }

        if let Some(bio) = request.bio {
            user.set_bio(Some(bio));
            changed = true;
        }

        if changed {
            self.ctx.user_repo().update(&user).await?;
            info!(user_id = %user_id, "User profile updated");
        }

        if let Some(password_hash) = new_password_hash {
            self.ctx
                .user_repo()
                .update_password(user.id, &password_hash)
                .await?;
            info!(user_id = %user_id, "Password changed");
        }

        self.current_profile(user).await
    }

    /// Delete the authenticated user's account
    ///
    /// Posts, comments, likes, and subscriptions cascade away with it.
    #[instrument(skip(self))]
    pub async fn delete_account(&self, user_id: Snowflake) -> ServiceResult<()> {
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))?;

        self.ctx.user_repo().delete(user_id).await?;

        info!(user_id = %user_id, "User account deleted");
        Ok(())
    }

    /// Store an uploaded profile photo and record its path
    #[instrument(skip(self, data))]
    pub async fn attach_photo(
        &self,
        user_id: Snowflake,
        filename: &str,
        data: &[u8],
    ) -> ServiceResult<CurrentUserResponse> {
        let mut user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))?;

        let media = MediaService::new(self.ctx);
        let path = media
            .store_upload(UploadKind::UserPhoto, &user.email, filename, data)
            .await?;

        user.set_photo(Some(path));
        self.ctx.user_repo().update(&user).await?;

        info!(user_id = %user_id, "Profile photo updated");

        self.current_profile(user).await
    }

    /// Build the full own-profile payload including subscriptions
    async fn current_profile(
        &self,
        user: social_core::entities::User,
    ) -> ServiceResult<CurrentUserResponse> {
        let subscription_ids = self.ctx.subscription_repo().followee_ids(user.id).await?;
        Ok(CurrentUserResponse::from(CurrentUserProfile {
            user,
            subscription_ids,
        }))
    }
}
