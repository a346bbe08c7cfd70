//! User entity <-> model mapper

use social_core::entities::User;
use social_core::value_objects::Snowflake;

use crate::models::UserModel;

/// Convert UserModel to User entity
impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: Snowflake::new(model.id),
            email: model.email,
            first_name: model.first_name,
            last_name: model.last_name,
            photo: model.photo,
            bio: model.bio,
            is_staff: model.is_staff,
            is_superuser: model.is_superuser,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Convert User entity reference to values for database insertion
pub struct UserInsert<'a> {
    pub id: i64,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub photo: Option<&'a str>,
    pub bio: Option<&'a str>,
    pub is_staff: bool,
    pub is_superuser: bool,
}

impl<'a> UserInsert<'a> {
    pub fn new(user: &'a User, password_hash: &'a str) -> Self {
        Self {
            id: user.id.into_inner(),
            email: &user.email,
            password_hash,
            first_name: &user.first_name,
            last_name: &user.last_name,
            photo: user.photo.as_deref(),
            bio: user.bio.as_deref(),
            is_staff: user.is_staff,
            is_superuser: user.is_superuser,
        }
    }
}

/// Convert User entity reference to values for database update
pub struct UserUpdate<'a> {
    pub id: i64,
    pub email: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub photo: Option<&'a str>,
    pub bio: Option<&'a str>,
}

impl<'a> UserUpdate<'a> {
    pub fn new(user: &'a User) -> Self {
        Self {
            id: user.id.into_inner(),
            email: &user.email,
            first_name: &user.first_name,
            last_name: &user.last_name,
            photo: user.photo.as_deref(),
            bio: user.bio.as_deref(),
        }
    }
}
