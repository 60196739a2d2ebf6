use std::num::NonZeroUsize;

use async_trait::async_trait;

use crate::{Post, PostSource, TrendResult};

/// In-memory source serving a fixed batch of posts.
#[derive(Debug, Clone, Default)]
pub struct StaticPostSource {
    posts: Vec<Post>,
}

impl StaticPostSource {
    pub fn new(posts: Vec<Post>) -> Self {
        Self { posts }
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }
}

#[async_trait]
impl PostSource for StaticPostSource {
    async fn fetch_recent_posts(&self, limit: NonZeroUsize) -> TrendResult<Vec<Post>> {
        Ok(self.posts.iter().take(limit.get()).cloned().collect())
    }
}
