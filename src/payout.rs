//! Proportional payout calculation
//!
//! The campaign's reward pool is split evenly across the five weighted
//! action types (clicks, views, submissions, likes, shares). Within each
//! slice a participant is paid in proportion to their share of the
//! campaign's total weighted raw score for that action. An action nobody
//! performed leaves its slice undistributed rather than dividing by zero.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::algorithm::PointValues;
use crate::campaign::ParticipantCounters;
use crate::decimal::guarded_div;
use crate::engagement::SocialScoreResult;
use crate::error::Result;

/// Number of weighted action types sharing the reward pool.
pub const ACTION_TYPE_COUNT: u32 = 5;

/// Weighted raw scores per action type for a single participant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawScores {
    pub clicks: Decimal,
    pub views: Decimal,
    pub submissions: Decimal,
    pub likes: Decimal,
    pub shares: Decimal,
}

/// Campaign-wide per-action sums of weighted raw scores, accumulated over
/// every participant in a payout run before any payout is computed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionTotals {
    pub clicks: Decimal,
    pub views: Decimal,
    pub submissions: Decimal,
    pub likes: Decimal,
    pub shares: Decimal,
}

impl ActionTotals {
    pub fn accumulate(&mut self, raw: &RawScores) {
        self.clicks += raw.clicks;
        self.views += raw.views;
        self.submissions += raw.submissions;
        self.likes += raw.likes;
        self.shares += raw.shares;
    }
}

/// Per-participant payout breakdown. All figures serialize as decimal
/// strings for the admin API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoutResult {
    pub participant_id: Uuid,
    pub view_payout: Decimal,
    pub click_payout: Decimal,
    pub submission_payout: Decimal,
    pub likes_payout: Decimal,
    pub shares_payout: Decimal,
    pub total_payout: Decimal,
}

/// Weight a participant's counters and social totals into per-action raw
/// scores. Rejects negative counters instead of producing negative payouts.
pub fn weighted_raw_scores(
    counters: &ParticipantCounters,
    social: &SocialScoreResult,
    point_values: &PointValues,
) -> Result<RawScores> {
    counters.validate()?;

    Ok(RawScores {
        clicks: counters.click_count * point_values.clicks,
        views: counters.view_count * point_values.views,
        submissions: counters.submission_count * point_values.submissions,
        likes: social.likes_score,
        shares: social.share_score,
    })
}

/// Compute a participant's payout against the campaign-wide totals.
///
/// `campaign_totals` must be the sums accumulated over every participant in
/// the same run; this function never recomputes them. Pure and infallible
/// over validated inputs: a zero campaign total for an action pays zero for
/// that action, and no campaign-level cap is applied here (outliers are an
/// audit-time concern).
pub fn calculate_payout(
    participant_id: Uuid,
    raw: &RawScores,
    campaign_totals: &ActionTotals,
    campaign_pool: Decimal,
) -> PayoutResult {
    let slice = campaign_pool / Decimal::from(ACTION_TYPE_COUNT);

    let view_payout = action_payout(raw.views, campaign_totals.views, slice);
    let click_payout = action_payout(raw.clicks, campaign_totals.clicks, slice);
    let submission_payout = action_payout(raw.submissions, campaign_totals.submissions, slice);
    let likes_payout = action_payout(raw.likes, campaign_totals.likes, slice);
    let shares_payout = action_payout(raw.shares, campaign_totals.shares, slice);

    let total_payout =
        view_payout + click_payout + submission_payout + likes_payout + shares_payout;

    PayoutResult {
        participant_id,
        view_payout,
        click_payout,
        submission_payout,
        likes_payout,
        shares_payout,
        total_payout,
    }
}

/// One action's slice of the pool, allocated proportionally to the
/// participant's share of the campaign total for that action.
fn action_payout(raw: Decimal, campaign_total: Decimal, slice: Decimal) -> Decimal {
    match guarded_div(raw, campaign_total) {
        Some(share) => share * slice,
        None => Decimal::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn point_values() -> PointValues {
        PointValues {
            clicks: d("1"),
            views: d("0.1"),
            submissions: d("5"),
            likes: d("2"),
            shares: d("3"),
        }
    }

    fn counters(clicks: &str, views: &str, submissions: &str) -> ParticipantCounters {
        ParticipantCounters {
            click_count: d(clicks),
            view_count: d(views),
            submission_count: d(submissions),
            participation_score: Decimal::ZERO,
            total_participation_score: Decimal::ZERO,
        }
    }

    #[test]
    fn test_weighted_raw_scores() {
        let social = SocialScoreResult {
            total_likes: d("10"),
            total_shares: d("5"),
            likes_score: d("20"),
            share_score: d("15"),
        };

        let raw = weighted_raw_scores(&counters("30", "200", "4"), &social, &point_values()).unwrap();

        assert_eq!(raw.clicks, d("30"));
        assert_eq!(raw.views, d("20"));
        assert_eq!(raw.submissions, d("20"));
        assert_eq!(raw.likes, d("20"));
        assert_eq!(raw.shares, d("15"));
    }

    #[test]
    fn test_negative_counter_rejected() {
        let bad = ParticipantCounters {
            view_count: d("-10"),
            ..Default::default()
        };

        let result = weighted_raw_scores(&bad, &SocialScoreResult::default(), &point_values());
        assert!(result.is_err());
    }

    #[test]
    fn test_proportional_click_payout() {
        // Two participants with weighted click scores 30 and 70; the click
        // slice of the pool is 1000, so they are paid 300 and 700.
        let totals = ActionTotals {
            clicks: d("100"),
            ..Default::default()
        };
        let pool = d("5000"); // slice per action = 1000

        let a = calculate_payout(
            Uuid::new_v4(),
            &RawScores {
                clicks: d("30"),
                ..Default::default()
            },
            &totals,
            pool,
        );
        let b = calculate_payout(
            Uuid::new_v4(),
            &RawScores {
                clicks: d("70"),
                ..Default::default()
            },
            &totals,
            pool,
        );

        assert_eq!(a.click_payout, d("300"));
        assert_eq!(b.click_payout, d("700"));
        assert_eq!(a.total_payout, d("300"));
        assert_eq!(b.total_payout, d("700"));
    }

    #[test]
    fn test_total_is_the_sum_of_components() {
        let raw = RawScores {
            clicks: d("30"),
            views: d("10"),
            submissions: d("5"),
            likes: d("20"),
            shares: d("15"),
        };
        let totals = ActionTotals {
            clicks: d("100"),
            views: d("100"),
            submissions: d("20"),
            likes: d("40"),
            shares: d("60"),
        };

        let result = calculate_payout(Uuid::new_v4(), &raw, &totals, d("5000"));

        assert_eq!(
            result.total_payout,
            result.view_payout
                + result.click_payout
                + result.submission_payout
                + result.likes_payout
                + result.shares_payout
        );
    }

    #[test]
    fn test_doubling_the_pool_doubles_every_component() {
        let raw = RawScores {
            clicks: d("30"),
            views: d("12.5"),
            submissions: d("5"),
            likes: d("20"),
            shares: d("15"),
        };
        let totals = ActionTotals {
            clicks: d("100"),
            views: d("50"),
            submissions: d("20"),
            likes: d("40"),
            shares: d("60"),
        };

        let single = calculate_payout(Uuid::new_v4(), &raw, &totals, d("5000"));
        let double = calculate_payout(single.participant_id, &raw, &totals, d("10000"));

        assert_eq!(double.view_payout, single.view_payout * d("2"));
        assert_eq!(double.click_payout, single.click_payout * d("2"));
        assert_eq!(double.submission_payout, single.submission_payout * d("2"));
        assert_eq!(double.likes_payout, single.likes_payout * d("2"));
        assert_eq!(double.shares_payout, single.shares_payout * d("2"));
        assert_eq!(double.total_payout, single.total_payout * d("2"));
    }

    #[test]
    fn test_zero_campaign_total_pays_zero_for_that_action() {
        let raw = RawScores {
            clicks: d("30"),
            views: d("10"),
            ..Default::default()
        };
        // Nobody in the campaign has any view activity recorded.
        let totals = ActionTotals {
            clicks: d("100"),
            views: Decimal::ZERO,
            ..Default::default()
        };

        let result = calculate_payout(Uuid::new_v4(), &raw, &totals, d("5000"));

        assert_eq!(result.view_payout, Decimal::ZERO);
        assert_eq!(result.click_payout, d("300"));
    }

    #[test]
    fn test_zero_activity_campaign_pays_nothing() {
        let result = calculate_payout(
            Uuid::new_v4(),
            &RawScores::default(),
            &ActionTotals::default(),
            d("5000"),
        );

        assert_eq!(result.total_payout, Decimal::ZERO);
    }
}
