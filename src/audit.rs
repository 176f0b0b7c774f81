//! Pre-payout audit reporting
//!
//! Builds the report an administrator reviews before approving a payout
//! run: every participant's payout breakdown, campaign-wide totals, and
//! statistical outlier flags. Two passes over the population: the first
//! accumulates campaign-wide weighted raw scores per action type, the
//! second computes each payout against those totals. The builder persists
//! nothing; the admin endpoint that invokes it owns storage, display, and
//! gating the disbursement step on a human reviewing the flags.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::campaign::{Campaign, Participant, SocialPostMetrics};
use crate::config::AuditSettings;
use crate::engagement::score_engagement;
use crate::error::Result;
use crate::payout::{calculate_payout, weighted_raw_scores, ActionTotals, PayoutResult};
use crate::tier::current_reward_pool;

/// Campaign-level audit report, produced once per audit invocation.
///
/// Monetary figures are exact `Decimal` and serialize as strings; the mean
/// and standard deviation are diagnostics from the statistical pass, which
/// runs on a common `f64` representation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditReport {
    pub campaign_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub participant_count: usize,
    pub total_clicks: Decimal,
    pub total_views: Decimal,
    pub total_submissions: Decimal,
    pub total_reward_payout: Decimal,
    pub mean_payout: Option<f64>,
    pub payout_std_dev: Option<f64>,
    pub payouts: Vec<PayoutResult>,
    /// Payouts deviating from the population mean by more than the
    /// configured number of standard deviations. Review before disbursing.
    pub flagged_participants: Vec<PayoutResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Score every participant, compute their payouts against the campaign
/// totals, and flag statistical outliers.
///
/// The reward pool is the `total_reward` of the campaign's current tier,
/// resolved from its cumulative participation score. Participants missing
/// from `posts_by_participant` simply have no posts.
pub fn build_audit_report(
    campaign: &Campaign,
    participants: &[Participant],
    posts_by_participant: &HashMap<Uuid, Vec<SocialPostMetrics>>,
    settings: &AuditSettings,
) -> Result<AuditReport> {
    campaign.algorithm.validate()?;
    let pool = current_reward_pool(campaign.total_participation_score, &campaign.algorithm.tiers)?;

    info!(
        "Building audit report for campaign {} ({} participants, pool {})",
        campaign.id,
        participants.len(),
        pool
    );

    // Pass 1: per-participant weighted raw scores and campaign-wide totals.
    let mut totals = ActionTotals::default();
    let mut scored = Vec::with_capacity(participants.len());

    for participant in participants {
        let posts = posts_by_participant
            .get(&participant.id)
            .map(|posts| posts.as_slice())
            .unwrap_or(&[]);

        let social = score_engagement(posts, &campaign.algorithm.point_values)?;
        let raw = weighted_raw_scores(&participant.counters, &social, &campaign.algorithm.point_values)?;

        if participant.counters.total_participation_score > campaign.total_participation_score {
            warn!(
                "Participant {} total score {} exceeds campaign total {}",
                participant.id,
                participant.counters.total_participation_score,
                campaign.total_participation_score
            );
        }

        totals.accumulate(&raw);
        scored.push(raw);
    }

    // Pass 2: payouts against the accumulated totals, plus counter totals.
    let mut total_clicks = Decimal::ZERO;
    let mut total_views = Decimal::ZERO;
    let mut total_submissions = Decimal::ZERO;
    let mut total_reward_payout = Decimal::ZERO;
    let mut payouts = Vec::with_capacity(participants.len());

    for (participant, raw) in participants.iter().zip(&scored) {
        let result = calculate_payout(participant.id, raw, &totals, pool);
        debug!(
            "Participant {} payout {}",
            participant.id, result.total_payout
        );

        total_clicks += participant.counters.click_count;
        total_views += participant.counters.view_count;
        total_submissions += participant.counters.submission_count;
        total_reward_payout += result.total_payout;
        payouts.push(result);
    }

    let outliers = flag_outliers(&payouts, settings);

    info!(
        "Audit report for campaign {}: total payout {}, {} flagged",
        campaign.id,
        total_reward_payout,
        outliers.flagged.len()
    );

    Ok(AuditReport {
        campaign_id: campaign.id,
        generated_at: Utc::now(),
        participant_count: participants.len(),
        total_clicks,
        total_views,
        total_submissions,
        total_reward_payout,
        mean_payout: outliers.mean,
        payout_std_dev: outliers.std_dev,
        payouts,
        flagged_participants: outliers.flagged,
        note: outliers.note,
    })
}

struct OutlierPass {
    flagged: Vec<PayoutResult>,
    mean: Option<f64>,
    std_dev: Option<f64>,
    note: Option<String>,
}

/// Flag payouts deviating from the population mean by more than the
/// configured number of standard deviations (unbiased, n-1 formula).
///
/// Populations too small for a meaningful deviation produce a note and no
/// flags instead of a degenerate statistic.
fn flag_outliers(payouts: &[PayoutResult], settings: &AuditSettings) -> OutlierPass {
    // Below two participants the n-1 denominator degenerates regardless of
    // what the configured minimum says.
    let min_population = settings.min_population.max(2);
    if payouts.len() < min_population {
        return OutlierPass {
            flagged: Vec::new(),
            mean: None,
            std_dev: None,
            note: Some(format!(
                "population of {} is below the minimum of {} for outlier detection",
                payouts.len(),
                min_population
            )),
        };
    }

    let values: Vec<f64> = payouts
        .iter()
        .map(|p| p.total_payout.to_f64().unwrap_or(0.0))
        .collect();
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    let std_dev = variance.sqrt();

    let flagged = if std_dev > 0.0 {
        let threshold = settings.outlier_std_devs * std_dev;
        payouts
            .iter()
            .zip(&values)
            .filter(|(_, value)| (**value - mean).abs() > threshold)
            .map(|(payout, _)| payout.clone())
            .collect()
    } else {
        // Every payout identical: nothing deviates.
        Vec::new()
    };

    OutlierPass {
        flagged,
        mean: Some(mean),
        std_dev: Some(std_dev),
        note: None,
    }
}
