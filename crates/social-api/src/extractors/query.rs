//! Query filter extractors
//!
//! Extracts listing filters from query strings. Post filters accept
//! flag parameters (`my`, `subscriptions`, `liked`) that are enabled
//! by the values `1` or `true`, plus a comma-separated `tags` list of
//! tag IDs. A malformed tag token rejects the whole request.

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::Deserialize;
use social_core::query::{flag_enabled, parse_tag_csv};
use social_core::{PostFilter, UserFilter};

use crate::response::ApiError;

/// Raw user listing query parameters
#[derive(Debug, Deserialize)]
pub struct UserFilterParams {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

impl From<UserFilterParams> for UserFilter {
    fn from(params: UserFilterParams) -> Self {
        UserFilter {
            email: params.email,
            first_name: params.first_name,
            last_name: params.last_name,
        }
    }
}

/// User filter extractor wrapping the domain filter
#[derive(Debug, Clone)]
pub struct UserFilterQuery(pub UserFilter);

#[async_trait]
impl<S> FromRequestParts<S> for UserFilterQuery
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<UserFilterParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_query(e.to_string()))?;

        Ok(UserFilterQuery(UserFilter::from(params)))
    }
}

/// Raw post listing query parameters
#[derive(Debug, Deserialize)]
pub struct PostFilterParams {
    /// Restrict to the caller's own posts
    #[serde(default)]
    pub my: Option<String>,
    /// Restrict to posts from subscribed authors
    #[serde(default)]
    pub subscriptions: Option<String>,
    /// Restrict to posts the caller liked
    #[serde(default)]
    pub liked: Option<String>,
    /// Comma-separated tag IDs; a post matches when it carries any of them
    #[serde(default)]
    pub tags: Option<String>,
}

impl TryFrom<PostFilterParams> for PostFilter {
    type Error = ApiError;

    fn try_from(params: PostFilterParams) -> Result<Self, Self::Error> {
        let tag_ids = params
            .tags
            .as_deref()
            .map(parse_tag_csv)
            .transpose()
            .map_err(ApiError::Domain)?;

        Ok(PostFilter {
            mine: params.my.as_deref().is_some_and(flag_enabled),
            subscriptions: params.subscriptions.as_deref().is_some_and(flag_enabled),
            liked: params.liked.as_deref().is_some_and(flag_enabled),
            tag_ids,
        })
    }
}

/// Post filter extractor wrapping the domain filter
#[derive(Debug, Clone)]
pub struct PostFilterQuery(pub PostFilter);

#[async_trait]
impl<S> FromRequestParts<S> for PostFilterQuery
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<PostFilterParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_query(e.to_string()))?;

        let filter = PostFilter::try_from(params)?;
        Ok(PostFilterQuery(filter))
    }
}
