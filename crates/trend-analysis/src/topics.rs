//! Keyword-table topic classification.

use trend_core::Post;

use crate::lexical::WordFrequency;

/// Maximum number of ranked topics reported
pub const MAX_TOPICS: usize = 5;

/// Weight applied to the likes + reshares of posts mentioning a keyword
const ENGAGEMENT_BOOST: f64 = 0.1;

/// Category table. Order matters: equal scores rank in table order.
pub const TOPIC_CATEGORIES: &[(&str, &[&str])] = &[
    (
        "crypto",
        &["bitcoin", "ethereum", "crypto", "btc", "eth", "defi", "web3", "blockchain"],
    ),
    ("memecoins", &["dogecoin", "shib", "pepe", "doge", "meme", "memecoin"]),
    ("nft", &["nft", "opensea", "zora", "art", "collection", "mint"]),
    ("ai", &["ai", "artificial", "intelligence", "machine", "learning", "gpt"]),
    ("gaming", &["gaming", "game", "play", "esports", "metaverse"]),
    ("social", &["farcaster", "warpcast", "social", "community", "network"]),
];

/// Score every category with a non-zero score, ranked descending.
///
/// A keyword contributes only if it occurs as a token. It then adds its token
/// count plus 0.1 x (likes + reshares) of every post whose lowercased text
/// contains it as a substring.
pub fn score_topics(freq: &WordFrequency, posts: &[Post]) -> Vec<(&'static str, f64)> {
    let lowered: Vec<(String, u64)> = posts
        .iter()
        .map(|p| (p.text.to_lowercase(), p.amplification()))
        .collect();

    let mut scores: Vec<(&'static str, f64)> = TOPIC_CATEGORIES
        .iter()
        .filter_map(|(category, keywords)| {
            let score: f64 = keywords
                .iter()
                .filter(|kw| freq.get(kw) > 0)
                .map(|kw| {
                    let boost: f64 = lowered
                        .iter()
                        .filter(|(text, _)| text.contains(*kw))
                        .map(|(_, amplification)| *amplification as f64 * ENGAGEMENT_BOOST)
                        .sum();
                    freq.get(kw) as f64 + boost
                })
                .sum();
            (score > 0.0).then_some((*category, score))
        })
        .collect();

    // Stable sort keeps table order for ties
    scores.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    scores
}

/// Top category names, at most [`MAX_TOPICS`], scores discarded.
pub fn extract_trending_topics(freq: &WordFrequency, posts: &[Post]) -> Vec<String> {
    score_topics(freq, posts)
        .into_iter()
        .take(MAX_TOPICS)
        .map(|(category, _)| category.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexical::{extract_words, word_frequency};
    use chrono::Utc;

    fn post(text: &str, likes: u64, reshares: u64) -> Post {
        Post {
            id: "0x1".to_string(),
            author_handle: "tester".to_string(),
            text: text.to_string(),
            created_at: Utc::now(),
            like_count: likes,
            reshare_count: reshares,
            reply_count: 1000,
            channel_id: None,
        }
    }

    fn freq_of(posts: &[Post]) -> WordFrequency {
        let corpus: Vec<String> = posts.iter().map(|p| p.text.to_lowercase()).collect();
        word_frequency(&extract_words(&corpus.join(" ")))
    }

    #[test]
    fn test_bitcoin_scenario_ranks_crypto() {
        let posts: Vec<Post> = (0..50).map(|_| post("bitcoin is up today", 80, 20)).collect();
        let freq = freq_of(&posts);
        let scores = score_topics(&freq, &posts);

        assert_eq!(scores[0].0, "crypto");
        // 50 occurrences + 0.1 * 50 * 100
        assert!((scores[0].1 - 550.0).abs() < 1e-9);

        let topics = extract_trending_topics(&freq, &posts);
        assert!(topics.contains(&"crypto".to_string()));
    }

    #[test]
    fn test_replies_do_not_boost_topics() {
        let posts = vec![post("zora mint", 0, 0)];
        let scores = score_topics(&freq_of(&posts), &posts);
        assert_eq!(scores, vec![("nft", 2.0)]);
    }

    #[test]
    fn test_substring_boost_requires_token_match() {
        // "ai" is never a token (too short), so "said" cannot boost the ai category
        let posts = vec![post("she said gpt", 10, 0)];
        let scores = score_topics(&freq_of(&posts), &posts);
        assert_eq!(scores.len(), 1);
        assert_eq!(scores[0].0, "ai");
        assert!((scores[0].1 - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_ties_follow_table_order() {
        let posts = vec![post("farcaster gaming nft", 0, 0)];
        let topics = extract_trending_topics(&freq_of(&posts), &posts);
        assert_eq!(topics, vec!["nft", "gaming", "social"]);
    }

    #[test]
    fn test_topics_capped_and_unique() {
        let posts = vec![post(
            "bitcoin doge nft gpt game farcaster bitcoin doge nft gpt game",
            5,
            5,
        )];
        let topics = extract_trending_topics(&freq_of(&posts), &posts);
        assert_eq!(topics.len(), MAX_TOPICS);
        let mut dedup = topics.clone();
        dedup.sort();
        dedup.dedup();
        assert_eq!(dedup.len(), topics.len());
        assert!(!topics.contains(&"social".to_string()));
    }

    #[test]
    fn test_no_matches_yields_no_topics() {
        let posts = vec![post("good morning everyone", 100, 100)];
        assert!(extract_trending_topics(&freq_of(&posts), &posts).is_empty());
        assert!(extract_trending_topics(&WordFrequency::default(), &[]).is_empty());
    }
}
