//! Keyword selection and suggested content prompts.

use trend_core::Sentiment;

use crate::lexical::{is_stopword, WordFrequency};

pub const MAX_KEYWORDS: usize = 10;
pub const MAX_PROMPTS: usize = 5;

/// Frequent tokens considered before stopword filtering
const KEYWORD_CANDIDATES: usize = 15;
/// Topics that get a dedicated prompt
const PROMPTED_TOPICS: usize = 3;

const CONTENT_TYPES: &[&str] = &["meme", "GIF", "video", "artwork", "story"];

fn sentiment_modifiers(sentiment: Sentiment) -> &'static [&'static str] {
    match sentiment {
        Sentiment::Positive => &["celebrating", "showcasing", "hyping"],
        Sentiment::Negative => &["reacting to", "commenting on", "analyzing"],
        Sentiment::Neutral => &["exploring", "discussing", "explaining"],
    }
}

/// Topics first, then the most frequent non-stopword tokens, de-duplicated
/// and capped at [`MAX_KEYWORDS`].
pub fn extract_keywords(freq: &WordFrequency, topics: &[String]) -> Vec<String> {
    let frequent = freq
        .top(KEYWORD_CANDIDATES)
        .into_iter()
        .map(|(word, _)| word)
        .filter(|word| !is_stopword(word));

    let mut keywords: Vec<String> = Vec::with_capacity(MAX_KEYWORDS);
    for word in topics.iter().map(String::as_str).chain(frequent) {
        if keywords.len() == MAX_KEYWORDS {
            break;
        }
        if !is_stopword(word) && !keywords.iter().any(|k| k == word) {
            keywords.push(word.to_string());
        }
    }
    keywords
}

pub fn generate_prompts(topics: &[String], sentiment: Sentiment, engagement: f64) -> Vec<String> {
    let modifiers = sentiment_modifiers(sentiment);

    let mut prompts: Vec<String> = topics
        .iter()
        .take(PROMPTED_TOPICS)
        .enumerate()
        .map(|(i, topic)| {
            format!(
                "Create a viral {} {} {}'s latest developments",
                CONTENT_TYPES[i % CONTENT_TYPES.len()],
                modifiers[i % modifiers.len()],
                topic
            )
        })
        .collect();

    if engagement > 100.0 {
        prompts.push("Create content about the hottest trend everyone's talking about".to_string());
    }

    match sentiment {
        Sentiment::Positive => {
            prompts.push("Make a celebration post about the bullish crypto market".to_string())
        }
        Sentiment::Negative => {
            prompts.push("Create a reaction meme to recent market movements".to_string())
        }
        Sentiment::Neutral => {}
    }

    prompts.truncate(MAX_PROMPTS);
    prompts
}
