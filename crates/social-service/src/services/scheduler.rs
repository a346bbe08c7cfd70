//! Deferred publication
//!
//! `SchedulerService` records publication jobs; `PublicationWorker` polls
//! for due jobs and turns each into a post exactly once.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use social_common::SchedulerConfig;
use social_core::entities::ScheduledPost;
use social_core::Snowflake;
use tokio::time::MissedTickBehavior;
use tracing::{error, info, instrument, warn};

use crate::dto::{SchedulePostRequest, ScheduledPostResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::post::resolve_tags;

/// Scheduler service
pub struct SchedulerService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SchedulerService<'a> {
    /// Create a new SchedulerService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Record a publication job due at the requested instant
    ///
    /// Tags are resolved now so the job fires without further lookups.
    #[instrument(skip(self, request), fields(title = %request.title))]
    pub async fn schedule(
        &self,
        author_id: Snowflake,
        request: SchedulePostRequest,
    ) -> ServiceResult<ScheduledPostResponse> {
        self.ctx
            .user_repo()
            .find_by_id(author_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", author_id.to_string()))?;

        let tags = match request.tags {
            Some(ref names) => resolve_tags(self.ctx, names).await?,
            None => Vec::new(),
        };
        let tag_ids: Vec<Snowflake> = tags.iter().map(|t| t.id).collect();

        let mut job = ScheduledPost::new(
            self.ctx.generate_id(),
            author_id,
            request.title,
            request.content,
            request.created_at,
        );
        job.tag_ids = tag_ids;

        self.ctx.scheduled_post_repo().create(&job).await?;

        info!(job_id = %job.id, publish_at = %job.publish_at, "Post scheduled");

        Ok(ScheduledPostResponse::from(&job))
    }
}

/// Background worker that publishes due scheduled posts
///
/// Polls on a fixed interval. Due jobs are claimed atomically in the
/// database, so running several workers never publishes a job twice.
pub struct PublicationWorker {
    ctx: ServiceContext,
    poll_interval: Duration,
    running: Arc<AtomicBool>,
}

impl PublicationWorker {
    /// Create a new worker from the scheduler configuration
    pub fn new(ctx: ServiceContext, config: &SchedulerConfig) -> Self {
        Self {
            ctx,
            poll_interval: Duration::from_secs(config.poll_interval_secs),
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Start the worker
    ///
    /// Spawns a background task that polls until `stop` is called.
    pub fn start(self: Arc<Self>) {
        if self.running.swap(true, Ordering::SeqCst) {
            warn!("Publication worker is already running");
            return;
        }

        let worker = self.clone();
        tokio::spawn(async move {
            worker.run().await;
        });

        info!(
            interval_secs = self.poll_interval.as_secs(),
            "Publication worker started"
        );
    }

    /// Stop the worker after its current tick
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
        info!("Publication worker stopping");
    }

    /// Run the polling loop
    async fn run(&self) {
        let mut ticker = tokio::time::interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        while self.running.load(Ordering::SeqCst) {
            ticker.tick().await;

            if !self.running.load(Ordering::SeqCst) {
                break;
            }

            match self.poll_once().await {
                Ok(0) => {}
                Ok(published) => info!(published, "Scheduled posts published"),
                Err(e) => error!(error = %e, "Publication poll failed"),
            }
        }

        self.running.store(false, Ordering::SeqCst);
        info!("Publication worker stopped");
    }

    /// Claim and publish every job due right now
    ///
    /// Returns the number of posts created.
    pub async fn poll_once(&self) -> ServiceResult<usize> {
        let due = self
            .ctx
            .scheduled_post_repo()
            .claim_due(Utc::now())
            .await?;

        let mut published = 0;

        for job in due {
            let job_id = job.id;
            let post_id = self.ctx.generate_id();
            let tag_ids = job.tag_ids.clone();
            let post = job.into_post(post_id);

            // A claimed job that fails to insert is not retried; the
            // guarantee is at most once
            match self.ctx.post_repo().create(&post, &tag_ids).await {
                Ok(()) => {
                    info!(job_id = %job_id, post_id = %post_id, "Scheduled post published");
                    published += 1;
                }
                Err(e) => {
                    error!(job_id = %job_id, error = %e, "Failed to publish scheduled post");
                }
            }
        }

        Ok(published)
    }
}
