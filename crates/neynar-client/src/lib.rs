use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::num::NonZeroUsize;
use std::time::Duration;
use trend_core::{Post, PostSource, TrendError, TrendResult};

pub const DEFAULT_BASE_URL: &str = "https://api.neynar.com/v2";
const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Which Neynar feed to read posts from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FeedKind {
    #[default]
    Trending,
    /// Home feed of the given fid
    Following { fid: u64 },
}

impl FeedKind {
    /// Parse `trending` or `following:<fid>`.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("trending") {
            return Some(FeedKind::Trending);
        }
        let fid = value.strip_prefix("following:")?.trim().parse().ok()?;
        Some(FeedKind::Following { fid })
    }

    fn path(&self) -> &'static str {
        match self {
            FeedKind::Trending => "/farcaster/feed/trending",
            FeedKind::Following { .. } => "/farcaster/feed/following",
        }
    }
}

/// Content source backed by the Neynar Farcaster API.
///
/// One HTTP attempt per call, no retries. Any transport error, non-2xx status
/// (402 Payment Required on exhausted quota included) or undecodable body is
/// reported as [`TrendError::SourceUnavailable`].
#[derive(Clone)]
pub struct NeynarClient {
    api_key: String,
    base_url: String,
    feed: FeedKind,
    client: Client,
}

impl NeynarClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_timeout(api_key, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(api_key: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            feed: FeedKind::default(),
            client,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_feed(mut self, feed: FeedKind) -> Self {
        self.feed = feed;
        self
    }

    pub fn feed(&self) -> FeedKind {
        self.feed
    }

    /// Fetch up to `limit` posts from the configured feed.
    pub async fn get_feed(&self, limit: usize) -> TrendResult<Vec<Post>> {
        if self.api_key.trim().is_empty() {
            return Err(TrendError::SourceUnavailable(
                "Neynar API key not configured".to_string(),
            ));
        }

        let url = format!("{}{}", self.base_url, self.feed.path());
        let mut query = vec![("limit", limit.to_string())];
        if let FeedKind::Following { fid } = self.feed {
            query.push(("fid", fid.to_string()));
        }

        let response = self
            .client
            .get(&url)
            .header("api_key", &self.api_key)
            .header("accept", "application/json")
            .query(&query)
            .send()
            .await
            .map_err(|e| TrendError::SourceUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            if status.as_u16() == 402 {
                tracing::warn!("Neynar returned 402 Payment Required, quota exhausted");
            }
            return Err(TrendError::SourceUnavailable(format!(
                "Neynar API error: HTTP {}: {}",
                status,
                response.text().await.unwrap_or_default()
            )));
        }

        let feed: FeedResponse = response
            .json()
            .await
            .map_err(|e| TrendError::SourceUnavailable(format!("Invalid Neynar response: {}", e)))?;

        let fetched_at = Utc::now();
        let posts: Vec<Post> = feed
            .casts
            .into_iter()
            .take(limit)
            .map(|cast| cast.into_post(fetched_at))
            .collect();

        tracing::debug!("Fetched {} posts from Neynar {:?} feed", posts.len(), self.feed);
        Ok(posts)
    }
}

#[async_trait]
impl PostSource for NeynarClient {
    async fn fetch_recent_posts(&self, limit: NonZeroUsize) -> TrendResult<Vec<Post>> {
        self.get_feed(limit.get()).await
    }
}

// Neynar response types
#[derive(Debug, Deserialize)]
struct FeedResponse {
    #[serde(default)]
    casts: Vec<Cast>,
}

#[derive(Debug, Deserialize)]
struct Cast {
    hash: String,
    author: CastAuthor,
    #[serde(default)]
    text: String,
    #[serde(default)]
    timestamp: Option<String>,
    #[serde(default)]
    reactions: Option<CastReactions>,
    #[serde(default)]
    replies: Option<CastReplies>,
    #[serde(default)]
    channel: Option<CastChannel>,
}

#[derive(Debug, Deserialize)]
struct CastAuthor {
    #[serde(default)]
    fid: u64,
    #[serde(default)]
    username: String,
}

#[derive(Debug, Default, Deserialize)]
struct CastReactions {
    #[serde(default)]
    likes_count: Option<u64>,
    #[serde(default)]
    recasts_count: Option<u64>,
    #[serde(default)]
    replies_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct CastReplies {
    #[serde(default)]
    count: u64,
}

#[derive(Debug, Deserialize)]
struct CastChannel {
    id: String,
}

impl Cast {
    fn into_post(self, fetched_at: DateTime<Utc>) -> Post {
        let reactions = self.reactions.unwrap_or_default();
        // Older payloads carry replies under reactions, newer ones under `replies`
        let reply_count = reactions
            .replies_count
            .or_else(|| self.replies.map(|r| r.count))
            .unwrap_or(0);

        let author_handle = if self.author.username.is_empty() {
            format!("fid:{}", self.author.fid)
        } else {
            self.author.username
        };

        Post {
            id: self.hash,
            author_handle,
            text: self.text,
            created_at: self
                .timestamp
                .as_deref()
                .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or(fetched_at),
            like_count: reactions.likes_count.unwrap_or(0),
            reshare_count: reactions.recasts_count.unwrap_or(0),
            reply_count,
            channel_id: self.channel.map(|c| c.id),
        }
    }
}
