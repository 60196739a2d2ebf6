use std::num::NonZeroUsize;
use std::sync::Arc;

use async_trait::async_trait;

use crate::{Post, TrendAnalysis, TrendResult};

/// A bounded, one-shot fetch of recent posts.
///
/// Implementations make a single attempt per call and return at most `limit`
/// posts. Upstream failures are reported as [`crate::TrendError::SourceUnavailable`];
/// retry and fallback policy belong to the caller.
#[async_trait]
pub trait PostSource: Send + Sync {
    async fn fetch_recent_posts(&self, limit: NonZeroUsize) -> TrendResult<Vec<Post>>;
}

#[async_trait]
impl<T: PostSource + ?Sized> PostSource for Arc<T> {
    async fn fetch_recent_posts(&self, limit: NonZeroUsize) -> TrendResult<Vec<Post>> {
        (**self).fetch_recent_posts(limit).await
    }
}

/// Trait for trend analysis engines. Analysis is a pure function of the batch.
pub trait TrendAnalyzer: Send + Sync {
    fn analyze(&self, posts: &[Post]) -> TrendResult<TrendAnalysis>;
}
