//! Access control policy for post operations
//!
//! All ownership decisions live here so handlers and services share one rule set.

use social_core::entities::Post;
use social_core::DomainError;
use social_core::Snowflake;

/// Actions an authenticated user can attempt against a post
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostAction {
    View,
    Update,
    Delete,
    AttachImage,
    Like,
    Comment,
}

/// Decide whether `actor_id` may perform `action` on `post`.
///
/// Mutations are restricted to the author. Liking is the inverse: the
/// author cannot like their own post. Viewing and commenting are open to
/// every authenticated user.
pub fn authorize(actor_id: Snowflake, action: PostAction, post: &Post) -> Result<(), DomainError> {
    match action {
        PostAction::Update | PostAction::Delete | PostAction::AttachImage => {
            if post.is_authored_by(actor_id) {
                Ok(())
            } else {
                Err(DomainError::NotPostAuthor)
            }
        }
        PostAction::Like => {
            if post.is_authored_by(actor_id) {
                Err(DomainError::SelfLike)
            } else {
                Ok(())
            }
        }
        PostAction::View | PostAction::Comment => Ok(()),
    }
}
