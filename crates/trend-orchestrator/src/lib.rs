use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use serde::Serialize;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Instant;
use trend_analysis::{ChallengeSynthesizer, TrendAnalysisEngine};
use trend_core::{
    Challenge, Post, PostSource, TrendAnalysis, TrendAnalyzer, TrendError, TrendResult,
};

pub mod fallback;

pub use fallback::{fallback_analysis, fallback_challenge, fallback_posts};

const TREND_CACHE_KEY: &str = "trend_analysis";

pub const DEFAULT_POST_LIMIT: usize = 100;
pub const DEFAULT_CACHE_TTL_SECS: i64 = 600; // 10 minutes

/// Internal cache entry with timestamp
struct CacheEntry<T> {
    data: T,
    /// Monotonic, so wall-clock adjustments cannot extend an entry's life
    cached_at: Instant,
}

impl<T> CacheEntry<T> {
    fn new(data: T) -> Self {
        Self {
            data,
            cached_at: Instant::now(),
        }
    }

    fn is_fresh(&self, ttl: Duration) -> bool {
        ttl.to_std()
            .map(|ttl| self.cached_at.elapsed() < ttl)
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Posts requested from the source per pipeline run
    pub post_limit: NonZeroUsize,
    pub cache_ttl: Duration,
    pub challenge_duration: Duration,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            post_limit: NonZeroUsize::new(DEFAULT_POST_LIMIT).unwrap_or(NonZeroUsize::MIN),
            cache_ttl: Duration::seconds(DEFAULT_CACHE_TTL_SECS),
            challenge_duration: Duration::hours(
                trend_analysis::challenges::DEFAULT_CHALLENGE_HOURS,
            ),
        }
    }
}

/// Where an analysis came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisProvenance {
    /// Computed from a live batch (possibly served from cache)
    Live,
    /// Computed from the fixed substitute batch after a source failure
    FallbackDataset,
    /// The hardcoded analysis after the pipeline itself failed
    Fallback,
}

#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub analysis: Arc<TrendAnalysis>,
    pub provenance: AnalysisProvenance,
}

/// Runs the trend pipeline behind a single-entry TTL cache and turns the
/// result into daily challenges.
///
/// Every public operation is total: source, analysis and synthesis failures
/// each map to a documented fallback value. Only analyses of live batches are
/// cached. Concurrent callers on a stale cache each run the pipeline and the
/// last write wins.
pub struct TrendOrchestrator {
    source: Arc<dyn PostSource>,
    analyzer: Arc<dyn TrendAnalyzer>,
    synthesizer: ChallengeSynthesizer,
    config: OrchestratorConfig,
    cache: DashMap<String, CacheEntry<Arc<TrendAnalysis>>>,
}

impl TrendOrchestrator {
    pub fn new(source: Arc<dyn PostSource>) -> Self {
        Self {
            source,
            analyzer: Arc::new(TrendAnalysisEngine::new()),
            synthesizer: ChallengeSynthesizer::new(),
            config: OrchestratorConfig::default(),
            cache: DashMap::new(),
        }
    }

    pub fn with_config(
        source: Arc<dyn PostSource>,
        config: OrchestratorConfig,
    ) -> TrendResult<Self> {
        if config.cache_ttl < Duration::zero() {
            return Err(TrendError::Config("cache TTL must not be negative".to_string()));
        }
        let synthesizer = ChallengeSynthesizer::with_duration(config.challenge_duration)
            .map_err(|e| TrendError::Config(e.to_string()))?;

        Ok(Self {
            synthesizer,
            config,
            ..Self::new(source)
        })
    }

    /// Swap the analysis engine
    pub fn with_analyzer(mut self, analyzer: Arc<dyn TrendAnalyzer>) -> Self {
        self.analyzer = analyzer;
        self
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    pub fn synthesizer(&self) -> &ChallengeSynthesizer {
        &self.synthesizer
    }

    /// The cached analysis, if one exists and is younger than the TTL.
    pub fn cached_analysis(&self) -> Option<Arc<TrendAnalysis>> {
        let entry = self.cache.get(TREND_CACHE_KEY)?;
        entry
            .is_fresh(self.config.cache_ttl)
            .then(|| Arc::clone(&entry.data))
    }

    pub async fn analyze_trends(&self) -> Arc<TrendAnalysis> {
        self.analyze_trends_with_provenance().await.analysis
    }

    pub async fn analyze_trends_with_provenance(&self) -> AnalysisOutcome {
        if let Some(analysis) = self.cached_analysis() {
            tracing::info!("Serving cached trend analysis");
            return AnalysisOutcome {
                analysis,
                provenance: AnalysisProvenance::Live,
            };
        }

        let (posts, live) = self.fetch_batch().await;
        tracing::info!("Running trend analysis over {} posts (live: {})", posts.len(), live);

        match self.analyzer.analyze(&posts) {
            Ok(analysis) => {
                let analysis = Arc::new(analysis);
                if live {
                    let entry = CacheEntry::new(Arc::clone(&analysis));
                    self.cache.insert(TREND_CACHE_KEY.to_string(), entry);
                }
                AnalysisOutcome {
                    analysis,
                    provenance: if live {
                        AnalysisProvenance::Live
                    } else {
                        AnalysisProvenance::FallbackDataset
                    },
                }
            }
            Err(e) => {
                tracing::error!("Trend analysis failed, serving fallback analysis: {}", e);
                AnalysisOutcome {
                    analysis: Arc::new(fallback_analysis(Utc::now())),
                    provenance: AnalysisProvenance::Fallback,
                }
            }
        }
    }

    /// Fetch one batch from the source, substituting the fallback dataset on
    /// failure or an empty batch. The flag reports whether the batch is live.
    async fn fetch_batch(&self) -> (Vec<Post>, bool) {
        match self.source.fetch_recent_posts(self.config.post_limit).await {
            Ok(posts) if !posts.is_empty() => (posts, true),
            Ok(_) => {
                tracing::warn!("Content source returned no posts, using fallback dataset");
                (fallback_posts(Utc::now()), false)
            }
            Err(e) => {
                tracing::warn!("Content source unavailable, using fallback dataset: {}", e);
                (fallback_posts(Utc::now()), false)
            }
        }
    }

    /// Three challenges built from the current analysis, or the single
    /// fallback challenge when no analysis-backed challenge can be built.
    pub async fn generate_daily_challenges(&self) -> Vec<Challenge> {
        let outcome = self.analyze_trends_with_provenance().await;
        let now = Utc::now();

        if outcome.provenance == AnalysisProvenance::Fallback {
            tracing::warn!("No usable trend analysis, emitting fallback challenge");
            return vec![self.fallback_challenge(now)];
        }

        match self.synthesizer.synthesize(&outcome.analysis, now) {
            Ok(challenges) => {
                tracing::info!(
                    "Generated {} daily challenges (topics: {:?}, confidence: {:.2})",
                    challenges.len(),
                    outcome.analysis.topics,
                    outcome.analysis.confidence
                );
                challenges
            }
            Err(e) => {
                tracing::error!("Challenge synthesis failed, emitting fallback challenge: {}", e);
                vec![self.fallback_challenge(now)]
            }
        }
    }

    fn fallback_challenge(&self, now: DateTime<Utc>) -> Challenge {
        let end_time = self
            .synthesizer
            .end_time(now)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        fallback_challenge(now, end_time)
    }

    /// Pass-through fetch for callers that need the raw batch. Errors are
    /// returned as-is; no fallback is applied.
    pub async fn recent_posts(&self, limit: NonZeroUsize) -> TrendResult<Vec<Post>> {
        self.source.fetch_recent_posts(limit).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use trend_core::Sentiment;

    struct CountingSource {
        posts: Vec<Post>,
        calls: AtomicUsize,
        fail: AtomicBool,
    }

    impl CountingSource {
        fn new(posts: Vec<Post>) -> Arc<Self> {
            Arc::new(Self {
                posts,
                calls: AtomicUsize::new(0),
                fail: AtomicBool::new(false),
            })
        }

        fn failing() -> Arc<Self> {
            let source = Self::new(Vec::new());
            source.fail.store(true, Ordering::SeqCst);
            source
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PostSource for CountingSource {
        async fn fetch_recent_posts(&self, limit: NonZeroUsize) -> TrendResult<Vec<Post>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail.load(Ordering::SeqCst) {
                return Err(TrendError::SourceUnavailable("HTTP 402 Payment Required".to_string()));
            }
            Ok(self.posts.iter().take(limit.get()).cloned().collect())
        }
    }

    struct FailingAnalyzer;

    impl TrendAnalyzer for FailingAnalyzer {
        fn analyze(&self, _posts: &[Post]) -> TrendResult<TrendAnalysis> {
            Err(TrendError::AnalysisFailure("boom".to_string()))
        }
    }

    /// Produces an analysis the synthesizer rejects
    struct CorruptAnalyzer;

    impl TrendAnalyzer for CorruptAnalyzer {
        fn analyze(&self, posts: &[Post]) -> TrendResult<TrendAnalysis> {
            let mut analysis = TrendAnalysisEngine::new().analyze(posts)?;
            analysis.confidence = f64::NAN;
            Ok(analysis)
        }
    }

    fn bitcoin_posts(n: usize) -> Vec<Post> {
        (0..n)
            .map(|i| Post {
                id: format!("0x{:04x}", i),
                author_handle: format!("user{}", i),
                text: "bitcoin to the moon, bullish".to_string(),
                created_at: Utc::now(),
                like_count: 60,
                reshare_count: 30,
                reply_count: 10,
                channel_id: None,
            })
            .collect()
    }

    fn config_with_ttl(ttl: Duration) -> OrchestratorConfig {
        OrchestratorConfig {
            cache_ttl: ttl,
            ..OrchestratorConfig::default()
        }
    }

    #[tokio::test]
    async fn test_cache_hit_within_ttl() {
        let source = CountingSource::new(bitcoin_posts(50));
        let orchestrator = TrendOrchestrator::new(source.clone());

        let first = orchestrator.analyze_trends().await;
        let second = orchestrator.analyze_trends().await;

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(source.calls(), 1);
        assert!(first.topics.contains(&"crypto".to_string()));
        assert!(orchestrator.cached_analysis().is_some());
    }

    #[tokio::test]
    async fn test_cache_expires_after_ttl() {
        let source = CountingSource::new(bitcoin_posts(10));
        let config = config_with_ttl(Duration::milliseconds(50));
        let orchestrator = TrendOrchestrator::with_config(source.clone(), config).unwrap();

        let first = orchestrator.analyze_trends().await;
        tokio::time::sleep(std::time::Duration::from_millis(80)).await;
        assert!(orchestrator.cached_analysis().is_none());

        let second = orchestrator.analyze_trends().await;
        assert_eq!(source.calls(), 2);
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(first.topics, second.topics);
    }

    #[test]
    fn test_cache_entry_age_is_monotonic() {
        let fresh = CacheEntry::new(());
        assert!(fresh.is_fresh(Duration::minutes(10)));
        assert!(!fresh.is_fresh(Duration::zero()));
        assert!(!fresh.is_fresh(Duration::seconds(-1)));

        // Stored two seconds ago on the monotonic clock; wall-clock time is irrelevant
        let Some(earlier) = Instant::now().checked_sub(std::time::Duration::from_secs(2)) else {
            return;
        };
        let stale = CacheEntry {
            data: (),
            cached_at: earlier,
        };
        assert!(!stale.is_fresh(Duration::seconds(1)));
        assert!(stale.is_fresh(Duration::seconds(60)));
    }

    #[tokio::test]
    async fn test_zero_ttl_never_serves_cache() {
        let source = CountingSource::new(bitcoin_posts(10));
        let config = config_with_ttl(Duration::zero());
        let orchestrator = TrendOrchestrator::with_config(source.clone(), config).unwrap();

        orchestrator.analyze_trends().await;
        orchestrator.analyze_trends().await;
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn test_source_failure_uses_fallback_dataset_uncached() {
        let source = CountingSource::failing();
        let orchestrator = TrendOrchestrator::new(source.clone());

        let outcome = orchestrator.analyze_trends_with_provenance().await;
        assert_eq!(outcome.provenance, AnalysisProvenance::FallbackDataset);
        assert_eq!(outcome.analysis.post_count, 5);
        assert!(outcome.analysis.topics.contains(&"crypto".to_string()));
        assert!(orchestrator.cached_analysis().is_none());

        orchestrator.analyze_trends().await;
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn test_empty_batch_substitutes_fallback_dataset() {
        let source = CountingSource::new(Vec::new());
        let orchestrator = TrendOrchestrator::new(source.clone());

        let outcome = orchestrator.analyze_trends_with_provenance().await;
        assert_eq!(outcome.provenance, AnalysisProvenance::FallbackDataset);
        assert!(outcome.analysis.post_count > 0);

        let challenges = orchestrator.generate_daily_challenges().await;
        assert!(!challenges.is_empty());
    }

    #[tokio::test]
    async fn test_analysis_failure_returns_fallback_analysis() {
        let source = CountingSource::new(bitcoin_posts(10));
        let orchestrator =
            TrendOrchestrator::new(source.clone()).with_analyzer(Arc::new(FailingAnalyzer));

        let analysis = orchestrator.analyze_trends().await;
        assert_eq!(analysis.confidence, fallback::FALLBACK_CONFIDENCE);
        assert_eq!(analysis.sentiment, Sentiment::Positive);
        assert_eq!(analysis.topics[0], "crypto");
        assert!(orchestrator.cached_analysis().is_none());

        orchestrator.analyze_trends().await;
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn test_daily_challenges_from_live_analysis() {
        let source = CountingSource::new(bitcoin_posts(50));
        let orchestrator = TrendOrchestrator::new(source);

        let challenges = orchestrator.generate_daily_challenges().await;
        assert_eq!(challenges.len(), 3);
        for c in &challenges {
            assert_eq!(c.end_time, c.created_at + Duration::hours(24));
            assert!(c.ai_generated);
            assert_eq!(c.trending_topics, vec!["crypto"]);
        }
        assert_eq!(challenges[0].title, "Create a meme about crypto's latest surge");
    }

    #[tokio::test]
    async fn test_daily_challenges_when_source_fails() {
        let orchestrator = TrendOrchestrator::new(CountingSource::failing());
        let challenges = orchestrator.generate_daily_challenges().await;
        assert_eq!(challenges.len(), 3);
        assert!(challenges.iter().all(|c| c.end_time > c.created_at));
    }

    #[tokio::test]
    async fn test_single_fallback_challenge_on_total_failure() {
        let orchestrator = TrendOrchestrator::new(CountingSource::failing())
            .with_analyzer(Arc::new(FailingAnalyzer));

        let challenges = orchestrator.generate_daily_challenges().await;
        assert_eq!(challenges.len(), 1);
        let c = &challenges[0];
        assert!(c.id.starts_with("challenge_fallback_"));
        assert_eq!(c.confidence, 0.5);
        assert_eq!(c.end_time - c.created_at, Duration::hours(24));
        assert_eq!(c.trending_topics, vec!["crypto", "bitcoin", "ethereum"]);
    }

    #[tokio::test]
    async fn test_synthesis_failure_emits_fallback_challenge() {
        let orchestrator = TrendOrchestrator::new(CountingSource::new(bitcoin_posts(5)))
            .with_analyzer(Arc::new(CorruptAnalyzer));

        let challenges = orchestrator.generate_daily_challenges().await;
        assert_eq!(challenges.len(), 1);
        assert!(challenges[0].id.starts_with("challenge_fallback_"));
    }

    #[tokio::test]
    async fn test_custom_duration_flows_into_challenges() {
        let config = OrchestratorConfig {
            challenge_duration: Duration::hours(12),
            ..OrchestratorConfig::default()
        };
        let orchestrator =
            TrendOrchestrator::with_config(CountingSource::new(bitcoin_posts(5)), config).unwrap();
        assert_eq!(orchestrator.config().challenge_duration, Duration::hours(12));
        assert_eq!(orchestrator.config().post_limit.get(), DEFAULT_POST_LIMIT);

        let challenges = orchestrator.generate_daily_challenges().await;
        assert!(challenges.iter().all(|c| c.duration() == Duration::hours(12)));
    }

    #[tokio::test]
    async fn test_invalid_config_rejected() {
        let config = OrchestratorConfig {
            challenge_duration: Duration::zero(),
            ..OrchestratorConfig::default()
        };
        assert!(matches!(
            TrendOrchestrator::with_config(CountingSource::new(Vec::new()), config),
            Err(TrendError::Config(_))
        ));
    }

    #[tokio::test]
    async fn test_post_limit_is_passed_to_source() {
        let source = CountingSource::new(bitcoin_posts(200));
        let orchestrator = TrendOrchestrator::new(source);
        let analysis = orchestrator.analyze_trends().await;
        assert_eq!(analysis.post_count, DEFAULT_POST_LIMIT);
        // 100 posts, one topic, mean engagement 100
        assert!((analysis.confidence - 0.9).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_recent_posts_propagates_errors() {
        let orchestrator = TrendOrchestrator::new(CountingSource::failing());
        let result = orchestrator.recent_posts(NonZeroUsize::new(10).unwrap()).await;
        assert!(matches!(result, Err(TrendError::SourceUnavailable(_))));
    }

    #[test]
    fn test_fallback_analysis_invariants() {
        let analysis = fallback_analysis(Utc::now());
        assert_eq!(analysis.confidence, 0.7);
        assert_eq!(analysis.topics.len(), 5);
        assert_eq!(analysis.keywords.len(), 10);
        assert!(analysis
            .keywords
            .iter()
            .all(|k| !trend_analysis::STOPWORDS.contains(&k.as_str())));
    }
}
