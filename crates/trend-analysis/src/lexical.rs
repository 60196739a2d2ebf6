//! Tokenization and word counting over post text.

use std::collections::HashMap;

/// Tokens this short carry no topical signal and are dropped.
const MIN_TOKEN_LEN: usize = 3;

/// Common English words excluded from keywords.
pub const STOPWORDS: &[&str] = &[
    "the", "and", "for", "are", "but", "not", "you", "all", "can", "had", "her", "was", "one",
    "our", "out", "day", "get", "has", "him", "his", "how", "man", "new", "now", "old", "see",
    "two", "way", "who", "boy", "did", "its", "let", "put", "say", "she", "too", "use",
];

pub fn is_stopword(word: &str) -> bool {
    STOPWORDS.contains(&word)
}

/// Split raw text into normalized tokens.
///
/// Lowercases, replaces every character other than ASCII word characters,
/// whitespace, `#` and `@` with a space, splits on whitespace and drops
/// tokens of two characters or fewer. Hashtags and mentions keep their sigil.
pub fn extract_words(raw_text: &str) -> Vec<String> {
    let cleaned: String = raw_text
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '#' || c == '@' || c.is_whitespace() {
                c.to_ascii_lowercase()
            } else {
                ' '
            }
        })
        .collect();

    cleaned
        .split_whitespace()
        .filter(|w| w.len() >= MIN_TOKEN_LEN)
        .map(str::to_string)
        .collect()
}

/// Token counts, remembering the order in which tokens first appeared so
/// that frequency ties rank deterministically.
#[derive(Debug, Clone, Default)]
pub struct WordFrequency {
    counts: HashMap<String, usize>,
    first_seen: Vec<String>,
}

impl WordFrequency {
    pub fn get(&self, word: &str) -> usize {
        self.counts.get(word).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// The `n` most frequent tokens, ties broken by first occurrence.
    pub fn top(&self, n: usize) -> Vec<(&str, usize)> {
        let mut ranked: Vec<(&str, usize)> = self
            .first_seen
            .iter()
            .map(|w| (w.as_str(), self.get(w)))
            .collect();
        // sort_by is stable, so equal counts keep first-seen order
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(n);
        ranked
    }
}

pub fn word_frequency<S: AsRef<str>>(tokens: &[S]) -> WordFrequency {
    let mut freq = WordFrequency::default();
    for token in tokens {
        let token = token.as_ref();
        match freq.counts.get_mut(token) {
            Some(count) => *count += 1,
            None => {
                freq.counts.insert(token.to_string(), 1);
                freq.first_seen.push(token.to_string());
            }
        }
    }
    freq
}
