use chrono::Utc;
use trend_core::{Post, TrendAnalysis, TrendAnalyzer, TrendError, TrendResult};

pub mod challenges;
pub mod confidence;
pub mod engagement;
pub mod lexical;
pub mod prompts;
pub mod sentiment;
pub mod topics;

pub use challenges::ChallengeSynthesizer;
pub use lexical::{extract_words, word_frequency, WordFrequency, STOPWORDS};
pub use sentiment::LexiconCounts;

/// Derives topics, sentiment, engagement, keywords, prompts and confidence
/// from a batch of posts.
#[derive(Debug, Clone, Default)]
pub struct TrendAnalysisEngine;

impl TrendAnalysisEngine {
    pub fn new() -> Self {
        Self
    }

    fn analyze_full(&self, posts: &[Post]) -> TrendResult<TrendAnalysis> {
        let corpus = posts
            .iter()
            .map(|p| p.text.to_lowercase())
            .collect::<Vec<_>>()
            .join(" ");

        let tokens = lexical::extract_words(&corpus);
        let freq = lexical::word_frequency(&tokens);
        tracing::debug!(
            "Extracted {} tokens ({} distinct) from {} posts",
            tokens.len(),
            freq.len(),
            posts.len()
        );

        let topics = topics::extract_trending_topics(&freq, posts);
        let (sentiment, counts) = sentiment::score_sentiment(&corpus);
        tracing::debug!(
            "Sentiment {} ({} positive, {} negative matches)",
            sentiment, counts.positive, counts.negative
        );

        let engagement = engagement::mean_engagement(posts);
        if !engagement.is_finite() {
            return Err(TrendError::AnalysisFailure(format!(
                "mean engagement is not finite over {} posts",
                posts.len()
            )));
        }

        let keywords = prompts::extract_keywords(&freq, &topics);
        let suggested_prompts = prompts::generate_prompts(&topics, sentiment, engagement);
        let confidence = confidence::estimate_confidence(posts.len(), topics.len(), engagement);

        Ok(TrendAnalysis {
            topics,
            sentiment,
            engagement,
            keywords,
            suggested_prompts,
            confidence,
            post_count: posts.len(),
            generated_at: Utc::now(),
        })
    }
}

impl TrendAnalyzer for TrendAnalysisEngine {
    fn analyze(&self, posts: &[Post]) -> TrendResult<TrendAnalysis> {
        self.analyze_full(posts)
    }
}
