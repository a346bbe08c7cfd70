//! Post entity <-> model mapper

use social_core::entities::Post;
use social_core::value_objects::Snowflake;

use crate::models::PostModel;

/// Convert PostModel to Post entity
impl From<PostModel> for Post {
    fn from(model: PostModel) -> Self {
        let mut post = Post::published_at(
            Snowflake::new(model.id),
            Snowflake::new(model.author_id),
            model.title,
            model.content,
            model.created_at,
        );
        post.set_image(model.image);
        post
    }
}

/// Convert Post entity reference to values for database insertion
pub struct PostInsert<'a> {
    pub id: i64,
    pub author_id: i64,
    pub title: &'a str,
    pub content: &'a str,
    pub image: Option<&'a str>,
}

impl<'a> PostInsert<'a> {
    pub fn new(post: &'a Post) -> Self {
        Self {
            id: post.id.into_inner(),
            author_id: post.author_id.into_inner(),
            title: &post.title,
            content: &post.content,
            image: post.image.as_deref(),
        }
    }
}

/// Convert Post entity reference to values for database update
pub struct PostUpdate<'a> {
    pub id: i64,
    pub title: &'a str,
    pub content: &'a str,
}

impl<'a> PostUpdate<'a> {
    pub fn new(post: &'a Post) -> Self {
        Self {
            id: post.id.into_inner(),
            title: &post.title,
            content: &post.content,
        }
    }
}
