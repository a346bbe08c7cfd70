//! Typed filter sets for the list endpoints
//!
//! Every recognized query parameter contributes one predicate; predicates
//! combine with AND. Parsing is strict where values carry ids: a malformed
//! token fails the whole request instead of silently matching nothing.

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Filters for `GET /users`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    /// Case-insensitive exact email match
    pub email: Option<String>,
    /// Case-insensitive substring match on the first name
    pub first_name: Option<String>,
    /// Case-insensitive substring match on the last name
    pub last_name: Option<String>,
}

impl UserFilter {
    /// True when no predicate is active
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.first_name.is_none() && self.last_name.is_none()
    }
}

/// Filters for `GET /posts`
///
/// The viewer-relative flags (`mine`, `subscriptions`, `liked`) are
/// resolved against the authenticated requester.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    /// Only posts the requester authored
    pub mine: bool,
    /// Only posts whose author the requester subscribes to
    pub subscriptions: bool,
    /// Only posts the requester liked
    pub liked: bool,
    /// Posts bearing at least one of these tags; `None` applies no
    /// restriction, `Some(vec![])` cannot occur (empty values are a
    /// parse error)
    pub tag_ids: Option<Vec<Snowflake>>,
}

impl PostFilter {
    /// True when no predicate is active
    pub fn is_empty(&self) -> bool {
        !self.mine && !self.subscriptions && !self.liked && self.tag_ids.is_none()
    }
}

/// Boolean query-parameter convention: on iff the value is `1` or `true`
pub fn flag_enabled(value: &str) -> bool {
    matches!(value, "1" | "true")
}

/// Parse a comma-separated list of tag ids
///
/// Every token must be a valid id; whitespace around tokens is tolerated,
/// empty tokens are not.
pub fn parse_tag_csv(raw: &str) -> Result<Vec<Snowflake>, DomainError> {
    raw.split(',')
        .map(|token| {
            let token = token.trim();
            Snowflake::parse(token).map_err(|_| DomainError::InvalidTagFilter {
                token: token.to_string(),
            })
        })
        .collect()
}
