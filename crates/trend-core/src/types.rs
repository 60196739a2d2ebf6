use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single social post as delivered by a content source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub author_handle: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub like_count: u64,
    pub reshare_count: u64,
    pub reply_count: u64,
    #[serde(default)]
    pub channel_id: Option<String>,
}

impl Post {
    /// Likes + reshares + replies.
    pub fn total_engagement(&self) -> u64 {
        self.like_count
            .saturating_add(self.reshare_count)
            .saturating_add(self.reply_count)
    }

    /// Likes + reshares only. Replies are excluded when boosting topic scores.
    pub fn amplification(&self) -> u64 {
        self.like_count.saturating_add(self.reshare_count)
    }
}

/// Overall mood of a corpus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }

    /// Market-mood label used in challenge titles
    pub fn market_mood(&self) -> &'static str {
        match self {
            Sentiment::Positive => "bullish",
            Sentiment::Negative => "bearish",
            Sentiment::Neutral => "mixed",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one pipeline run. Never mutated; the next run supersedes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendAnalysis {
    /// Category names ranked by descending score (max 5, no duplicates)
    pub topics: Vec<String>,
    pub sentiment: Sentiment,
    /// Mean likes + reshares + replies per post
    pub engagement: f64,
    /// Up to 10 keywords, stopwords excluded
    pub keywords: Vec<String>,
    pub suggested_prompts: Vec<String>,
    pub confidence: f64, // 0.0 to 1.0
    pub post_count: usize,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChallengeStatus {
    Active,
    Voting,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionKind {
    Image,
    Text,
    Link,
}

/// Content submitted to a challenge. Owned by the content store; challenges
/// are always synthesized with an empty list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: String,
    pub challenge_id: String,
    #[serde(rename = "type")]
    pub kind: SubmissionKind,
    pub content: String,
    pub title: String,
    pub author: String,
    pub author_id: String,
    pub created_at: DateTime<Utc>,
    pub likes: u64,
    pub shares: u64,
    pub votes: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipfs_hash: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Challenge {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub status: ChallengeStatus,
    pub created_at: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub trending_topics: Vec<String>,
    pub submissions: Vec<Submission>,
    pub total_likes: u64,
    pub ai_generated: bool,
    pub confidence: f64,
}

impl Challenge {
    pub fn duration(&self) -> chrono::Duration {
        self.end_time - self.created_at
    }
}
