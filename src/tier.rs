//! Tier resolution
//!
//! A campaign climbs reward tiers as its cumulative participation score
//! grows. The resolver is a pure scan over the ordered tier table: the
//! current tier is the highest one whose threshold the score has reached,
//! and progress within it is the score minus that threshold.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::algorithm::TierSpec;
use crate::decimal::ensure_non_negative;
use crate::error::{EngineError, Result};

/// A campaign's current tier plus progress within it. Recomputed on every
/// query, never persisted.
///
/// Serializes as `currentTier` / `currentTotal`, the latter as a decimal
/// string so API consumers see the exact stored value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierResult {
    pub current_tier: u32,
    pub current_total: Decimal,
}

/// Resolve the highest tier whose threshold is at or below
/// `cumulative_score`.
///
/// Scores above the last threshold stay in the last tier with no upper
/// clamp on `current_total` (campaigns may exceed their final tier). The
/// table must be sorted ascending; an unsorted or empty table is a
/// configuration error, not something to tolerate silently.
pub fn resolve_tier(
    cumulative_score: Decimal,
    tiers: &BTreeMap<u32, TierSpec>,
) -> Result<TierResult> {
    let (current_tier, spec) = resolve(cumulative_score, tiers)?;

    // Below the first threshold the whole score counts as progress in the
    // base tier.
    let reached = if spec.threshold <= cumulative_score {
        spec.threshold
    } else {
        Decimal::ZERO
    };

    Ok(TierResult {
        current_tier,
        current_total: cumulative_score - reached,
    })
}

/// Reward pool funded by the campaign's current tier. Used by the audit
/// builder to size the payout run.
pub fn current_reward_pool(
    cumulative_score: Decimal,
    tiers: &BTreeMap<u32, TierSpec>,
) -> Result<Decimal> {
    let (_, spec) = resolve(cumulative_score, tiers)?;
    Ok(spec.total_reward)
}

fn resolve(
    cumulative_score: Decimal,
    tiers: &BTreeMap<u32, TierSpec>,
) -> Result<(u32, &TierSpec)> {
    if tiers.is_empty() {
        return Err(EngineError::EmptyTierTable);
    }
    ensure_non_negative("cumulativeScore", cumulative_score)?;

    let mut previous: Option<Decimal> = None;
    let mut current: Option<(u32, &TierSpec)> = None;

    for (tier, spec) in tiers {
        if let Some(prev) = previous {
            if spec.threshold <= prev {
                return Err(EngineError::UnsortedTierTable { tier: *tier });
            }
        }
        previous = Some(spec.threshold);

        if spec.threshold <= cumulative_score {
            current = Some((*tier, spec));
        }
    }

    match current {
        Some(hit) => Ok(hit),
        // Score below the first threshold: report the base tier.
        None => tiers
            .iter()
            .next()
            .map(|(tier, spec)| (*tier, spec))
            .ok_or(EngineError::EmptyTierTable),
    }
}
