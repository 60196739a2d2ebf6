//! Heuristic confidence for a trend analysis.
//!
//! This is not a statistical confidence interval. It starts at 0.5 and adds
//! fixed bonuses for larger samples, more diverse topics and higher mean
//! engagement, so it is monotonically non-decreasing in each input and
//! capped at 1.0.

const BASE_CONFIDENCE: f64 = 0.5;
const MAX_CONFIDENCE: f64 = 1.0;

pub fn estimate_confidence(post_count: usize, topic_count: usize, engagement: f64) -> f64 {
    let mut confidence = BASE_CONFIDENCE;

    // Sample size
    if post_count >= 50 {
        confidence += 0.2;
    }
    if post_count >= 100 {
        confidence += 0.1;
    }

    // Topic diversity
    if topic_count >= 3 {
        confidence += 0.1;
    }
    if topic_count >= 5 {
        confidence += 0.1;
    }

    // Engagement
    if engagement > 50.0 {
        confidence += 0.1;
    }
    if engagement > 100.0 {
        confidence += 0.1;
    }

    confidence.clamp(0.0, MAX_CONFIDENCE)
}
