//! Lexicon sentiment over the whole corpus.

use trend_core::Sentiment;

/// One side must outweigh the other by this factor to leave neutral.
const DOMINANCE_RATIO: f64 = 1.2;

pub const POSITIVE_WORDS: &[&str] = &[
    "moon", "bullish", "pump", "surge", "up", "rise", "good", "great", "amazing",
    "incredible", "bright", "future", "building", "innovation", "excited", "love",
    "awesome", "fantastic", "excellent", "outstanding", "revolutionary",
];

pub const NEGATIVE_WORDS: &[&str] = &[
    "dump", "crash", "down", "fall", "bad", "terrible", "bearish", "decline", "regret",
    "disappointed", "worried", "concerned", "problem", "issue", "fail",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LexiconCounts {
    pub positive: usize,
    pub negative: usize,
}

/// Count non-overlapping occurrences of each lexicon word in `corpus`.
///
/// No stemming and no word boundaries: "up" also matches inside "pump".
/// The corpus is expected to be lowercase already.
pub fn count_lexicon_matches(corpus: &str) -> LexiconCounts {
    let count = |words: &[&str]| -> usize { words.iter().map(|w| corpus.matches(w).count()).sum() };
    LexiconCounts {
        positive: count(POSITIVE_WORDS),
        negative: count(NEGATIVE_WORDS),
    }
}

pub fn classify(counts: LexiconCounts) -> Sentiment {
    let positive = counts.positive as f64;
    let negative = counts.negative as f64;
    if positive > negative * DOMINANCE_RATIO {
        Sentiment::Positive
    } else if negative > positive * DOMINANCE_RATIO {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}

pub fn score_sentiment(corpus: &str) -> (Sentiment, LexiconCounts) {
    let counts = count_lexicon_matches(corpus);
    (classify(counts), counts)
}
