//! Turns a trend analysis into daily challenge records.

use chrono::{DateTime, Duration, Utc};
use trend_core::{Challenge, ChallengeStatus, TrendAnalysis, TrendError, TrendResult};

pub const DEFAULT_CHALLENGE_HOURS: i64 = 24;

const PRIMARY_TOPIC_DEFAULT: &str = "crypto";
const SECONDARY_TOPIC_DEFAULT: &str = "DeFi";
const SECONDARY_CATEGORY_DEFAULT: &str = "defi";
const MOOD_CATEGORY: &str = "trading";
const CUSTOM_CATEGORY: &str = "custom";

struct ChallengeTemplate {
    title: String,
    description: String,
    category: String,
}

#[derive(Debug, Clone)]
pub struct ChallengeSynthesizer {
    duration: Duration,
}

impl ChallengeSynthesizer {
    pub fn new() -> Self {
        Self {
            duration: Duration::hours(DEFAULT_CHALLENGE_HOURS),
        }
    }

    /// Challenges must end strictly after they start.
    pub fn with_duration(duration: Duration) -> TrendResult<Self> {
        if duration <= Duration::zero() {
            return Err(TrendError::InvalidData(format!(
                "challenge duration must be positive, got {}s",
                duration.num_seconds()
            )));
        }
        Ok(Self { duration })
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn end_time(&self, created_at: DateTime<Utc>) -> TrendResult<DateTime<Utc>> {
        created_at
            .checked_add_signed(self.duration)
            .ok_or_else(|| {
                TrendError::SynthesisFailure("challenge end time out of range".to_string())
            })
    }

    fn templates(analysis: &TrendAnalysis) -> [ChallengeTemplate; 3] {
        let primary = analysis
            .topics
            .first()
            .map(String::as_str)
            .unwrap_or(PRIMARY_TOPIC_DEFAULT);
        let secondary = analysis.topics.get(1).map(String::as_str);
        let secondary_label = secondary.unwrap_or(SECONDARY_TOPIC_DEFAULT);

        [
            ChallengeTemplate {
                title: format!("Create a meme about {}'s latest surge", primary),
                description: format!(
                    "The {} community is buzzing! Create viral content that captures the current sentiment. \
                     Based on {:.0} average engagement from trending casts.",
                    // Halves round up
                    primary,
                    analysis.engagement.round()
                ),
                category: primary.to_string(),
            },
            ChallengeTemplate {
                title: format!("Show your take on {} innovation", secondary_label),
                description: format!(
                    "{} is trending with {} sentiment. Share your perspective on the latest developments in this space.",
                    secondary_label, analysis.sentiment
                ),
                category: secondary.unwrap_or(SECONDARY_CATEGORY_DEFAULT).to_string(),
            },
            ChallengeTemplate {
                title: format!("React to the {} market vibes", analysis.sentiment.market_mood()),
                description: format!(
                    "Current market sentiment is {} based on {} trending keywords. \
                     Create content that reflects or challenges this mood.",
                    analysis.sentiment,
                    analysis.keywords.len()
                ),
                category: MOOD_CATEGORY.to_string(),
            },
        ]
    }

    /// Build the three daily challenges for `analysis`, all starting at `now`.
    pub fn synthesize(
        &self,
        analysis: &TrendAnalysis,
        now: DateTime<Utc>,
    ) -> TrendResult<Vec<Challenge>> {
        if !analysis.confidence.is_finite() || !(0.0..=1.0).contains(&analysis.confidence) {
            return Err(TrendError::SynthesisFailure(format!(
                "confidence {} outside [0, 1]",
                analysis.confidence
            )));
        }
        if !analysis.engagement.is_finite() {
            return Err(TrendError::SynthesisFailure("engagement is not finite".to_string()));
        }

        let end_time = self.end_time(now)?;
        let stamp = now.timestamp_millis();

        let challenges = Self::templates(analysis)
            .into_iter()
            .enumerate()
            .map(|(index, template)| Challenge {
                id: format!("challenge_{}_{}", stamp, index),
                title: template.title,
                description: template.description,
                category: template.category,
                status: ChallengeStatus::Active,
                created_at: now,
                end_time,
                trending_topics: analysis.topics.clone(),
                submissions: Vec::new(),
                total_likes: 0,
                ai_generated: true,
                confidence: analysis.confidence,
            })
            .collect();

        Ok(challenges)
    }

    /// A user-created challenge with a caller-chosen duration.
    pub fn custom(
        &self,
        title: &str,
        description: &str,
        duration: Option<Duration>,
        now: DateTime<Utc>,
    ) -> TrendResult<Challenge> {
        let title = title.trim();
        if title.is_empty() {
            return Err(TrendError::InvalidData("challenge title is required".to_string()));
        }
        let synthesizer = match duration {
            Some(d) => Self::with_duration(d)?,
            None => self.clone(),
        };

        Ok(Challenge {
            id: format!("challenge_{}", now.timestamp_millis()),
            title: title.to_string(),
            description: description.trim().to_string(),
            category: CUSTOM_CATEGORY.to_string(),
            status: ChallengeStatus::Active,
            created_at: now,
            end_time: synthesizer.end_time(now)?,
            trending_topics: Vec::new(),
            submissions: Vec::new(),
            total_likes: 0,
            ai_generated: false,
            confidence: 0.0,
        })
    }
}

impl Default for ChallengeSynthesizer {
    fn default() -> Self {
        Self::new()
    }
}
