//! Fixed data served when the live pipeline cannot produce a result.

use chrono::{DateTime, Duration, Utc};
use trend_core::{Challenge, ChallengeStatus, Post, Sentiment, TrendAnalysis};

fn fallback_post(
    now: DateTime<Utc>,
    hash: &str,
    author: &str,
    text: &str,
    minutes_ago: i64,
    (likes, recasts, replies): (u64, u64, u64),
) -> Post {
    Post {
        id: hash.to_string(),
        author_handle: author.to_string(),
        text: text.to_string(),
        created_at: now - Duration::minutes(minutes_ago),
        like_count: likes,
        reshare_count: recasts,
        reply_count: replies,
        channel_id: None,
    }
}

/// Substitute batch used when the content source fails or returns nothing.
pub fn fallback_posts(now: DateTime<Utc>) -> Vec<Post> {
    vec![
        fallback_post(
            now,
            "0x123abc",
            "cryptoking",
            "Dogecoin to the moon! 🚀 The 2025 surge is just getting started. Who else is hodling? #dogecoin #crypto #moon #bullish",
            60,
            (234, 45, 23),
        ),
        fallback_post(
            now,
            "0x456def",
            "ethdev",
            "Ethereum 2025 upgrades are game-changing! The scalability improvements are incredible. Building the future of web3 🔥 #ethereum #blockchain #defi #scaling",
            120,
            (189, 67, 34),
        ),
        fallback_post(
            now,
            "0x789ghi",
            "defifarmer",
            "DeFi summer is back! Yields are looking juicy across all protocols. Time to get farming! 🌾💰 #defi #yield #farming #protocols #liquidity",
            180,
            (156, 28, 19),
        ),
        fallback_post(
            now,
            "0xmeme1",
            "meme_lord",
            "When you see your portfolio pumping but remember you sold yesterday 😭 #crypto #memes #trading #fomo #regret",
            90,
            (445, 123, 67),
        ),
        fallback_post(
            now,
            "0xai1",
            "ai_researcher",
            "AI agents trading crypto autonomously... we're living in the future! The intersection of AI and DeFi is mind-blowing 🤯 #ai #crypto #automation #future",
            210,
            (278, 89, 45),
        ),
    ]
}

pub const FALLBACK_CONFIDENCE: f64 = 0.7;

/// Analysis returned when the pipeline itself fails. Never cached.
pub fn fallback_analysis(now: DateTime<Utc>) -> TrendAnalysis {
    let strings = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();

    TrendAnalysis {
        topics: strings(&["crypto", "defi", "nft", "ethereum", "bitcoin"]),
        sentiment: Sentiment::Positive,
        engagement: 75.5,
        keywords: strings(&[
            "crypto", "defi", "ethereum", "bitcoin", "nft", "web3", "blockchain", "trading", "moon", "bullish",
        ]),
        suggested_prompts: strings(&[
            "Create a viral meme celebrating crypto's latest surge",
            "Make a GIF about DeFi innovation in 2025",
            "Create artwork showcasing NFT creativity",
        ]),
        confidence: FALLBACK_CONFIDENCE,
        post_count: 0,
        generated_at: now,
    }
}

/// The single challenge emitted when no analysis-backed challenge can be built.
pub fn fallback_challenge(now: DateTime<Utc>, end_time: DateTime<Utc>) -> Challenge {
    Challenge {
        id: format!("challenge_fallback_{}", now.timestamp_millis()),
        title: "Create content about the hottest crypto trend".to_string(),
        description: "Share your take on what's trending in crypto right now. \
                      This challenge was generated when real trend data wasn't available."
            .to_string(),
        category: "crypto".to_string(),
        status: ChallengeStatus::Active,
        created_at: now,
        end_time,
        trending_topics: vec!["crypto".to_string(), "bitcoin".to_string(), "ethereum".to_string()],
        submissions: Vec::new(),
        total_likes: 0,
        ai_generated: true,
        confidence: 0.5,
    }
}
