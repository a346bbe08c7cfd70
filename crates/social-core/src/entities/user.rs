//! User entity - an account identified by its email address

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// User entity
///
/// The email address is the login identity; display names are optional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Snowflake,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub photo: Option<String>,
    pub bio: Option<String>,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new User with required fields
    pub fn new(id: Snowflake, email: String, first_name: String, last_name: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            email,
            first_name,
            last_name,
            photo: None,
            bio: None,
            is_staff: false,
            is_superuser: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Full display name, falling back to the email when both names are empty
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if full.is_empty() {
            self.email.clone()
        } else {
            full.to_string()
        }
    }

    /// Update the email address
    pub fn set_email(&mut self, email: String) {
        self.email = email;
        self.updated_at = Utc::now();
    }

    /// Update the display names
    pub fn set_names(&mut self, first_name: String, last_name: String) {
        self.first_name = first_name;
        self.last_name = last_name;
        self.updated_at = Utc::now();
    }

    /// Update the profile photo path
    pub fn set_photo(&mut self, photo: Option<String>) {
        self.photo = photo;
        self.updated_at = Utc::now();
    }

    /// Update the bio
    pub fn set_bio(&mut self, bio: Option<String>) {
        self.bio = bio;
        self.updated_at = Utc::now();
    }
}

/// Directed subscription edge: `follower` follows `followee`
///
/// The relation is asymmetric; the reverse edge is a separate row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    pub follower_id: Snowflake,
    pub followee_id: Snowflake,
    pub created_at: DateTime<Utc>,
}

impl Subscription {
    /// Create a new subscription edge
    pub fn new(follower_id: Snowflake, followee_id: Snowflake) -> Self {
        Self {
            follower_id,
            followee_id,
            created_at: Utc::now(),
        }
    }

    /// Check whether the edge would point at its own origin
    #[inline]
    pub fn is_self_edge(&self) -> bool {
        self.follower_id == self.followee_id
    }
}
