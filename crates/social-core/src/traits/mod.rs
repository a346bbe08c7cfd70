mod repositories;

pub use repositories::{
    CommentRepository, LikeRepository, PostRepository, RepoResult, ScheduledPostRepository,
    SubscriptionRepository, TagRepository, UserRepository,
};
