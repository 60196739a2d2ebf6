use trend_core::Post;

/// Mean likes + reshares + replies per post, 0.0 for an empty batch.
pub fn mean_engagement(posts: &[Post]) -> f64 {
    if posts.is_empty() {
        return 0.0;
    }
    let total: f64 = posts.iter().map(|p| p.total_engagement() as f64).sum();
    total / posts.len() as f64
}
