//! Social engagement scoring
//!
//! Aggregates a participant's social-post counters and weights them with
//! the campaign's point values. Pure over its inputs; a participant with no
//! posts simply scores zero.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::algorithm::PointValues;
use crate::campaign::SocialPostMetrics;
use crate::error::Result;

/// Aggregated engagement for one participant across all their posts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialScoreResult {
    pub total_likes: Decimal,
    pub total_shares: Decimal,
    pub likes_score: Decimal,
    pub share_score: Decimal,
}

/// Sum a participant's post counters and weight them with the campaign's
/// point values.
///
/// An empty post list is a valid all-zero outcome, not an error.
pub fn score_engagement(
    posts: &[SocialPostMetrics],
    point_values: &PointValues,
) -> Result<SocialScoreResult> {
    let mut total_likes = Decimal::ZERO;
    let mut total_shares = Decimal::ZERO;

    for post in posts {
        post.validate()?;
        total_likes += post.likes;
        total_shares += post.shares;
    }

    Ok(SocialScoreResult {
        total_likes,
        total_shares,
        likes_score: total_likes * point_values.likes,
        share_score: total_shares * point_values.shares,
    })
}
