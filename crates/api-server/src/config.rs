use anyhow::{bail, Context, Result};
use neynar_client::FeedKind;
use std::env;
use std::net::SocketAddr;
use std::num::NonZeroUsize;
use std::str::FromStr;
use trend_orchestrator::OrchestratorConfig;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,

    // Neynar
    pub neynar_api_key: Option<String>,
    pub neynar_base_url: String,
    pub neynar_feed: FeedKind,
    pub neynar_timeout_secs: u64,

    // Pipeline
    pub post_limit: NonZeroUsize,
    pub cache_ttl_secs: i64,
    pub challenge_duration_hours: i64,

    /// Emit JSON log lines instead of human-readable ones
    pub json_logging: bool,
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    lookup(key)
        .unwrap_or_else(|| default.to_string())
        .trim()
        .parse()
        .with_context(|| format!("invalid value for {}", key))
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let feed_raw = lookup("NEYNAR_FEED").unwrap_or_else(|| "trending".to_string());
        let neynar_feed = FeedKind::parse(&feed_raw).with_context(|| {
            format!("invalid NEYNAR_FEED '{}', expected trending or following:<fid>", feed_raw)
        })?;

        let post_limit: usize = parse_or(&lookup, "TREND_POST_LIMIT", "100")?;
        let post_limit =
            NonZeroUsize::new(post_limit).context("TREND_POST_LIMIT must be greater than 0")?;

        let config = Self {
            bind_addr: parse_or(&lookup, "BIND_ADDR", "0.0.0.0:3000")?,
            neynar_api_key: lookup("NEYNAR_API_KEY").filter(|k| !k.trim().is_empty()),
            neynar_base_url: lookup("NEYNAR_BASE_URL")
                .unwrap_or_else(|| neynar_client::DEFAULT_BASE_URL.to_string()),
            neynar_feed,
            neynar_timeout_secs: parse_or(&lookup, "NEYNAR_TIMEOUT_SECS", "15")?,
            post_limit,
            cache_ttl_secs: parse_or(&lookup, "TREND_CACHE_TTL_SECS", "600")?,
            challenge_duration_hours: parse_or(&lookup, "CHALLENGE_DURATION_HOURS", "24")?,
            json_logging: lookup("RUST_LOG_FORMAT")
                .map(|v| v.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.cache_ttl_secs < 0 {
            bail!("TREND_CACHE_TTL_SECS must not be negative");
        }
        if self.challenge_duration_hours <= 0 {
            bail!("CHALLENGE_DURATION_HOURS must be greater than 0");
        }
        if self.neynar_timeout_secs == 0 {
            bail!("NEYNAR_TIMEOUT_SECS must be greater than 0");
        }
        Ok(())
    }

    pub fn orchestrator_config(&self) -> Result<OrchestratorConfig> {
        Ok(OrchestratorConfig {
            post_limit: self.post_limit,
            cache_ttl: chrono::Duration::try_seconds(self.cache_ttl_secs)
                .context("TREND_CACHE_TTL_SECS out of range")?,
            challenge_duration: chrono::Duration::try_hours(self.challenge_duration_hours)
                .context("CHALLENGE_DURATION_HOURS out of range")?,
        })
    }
}
