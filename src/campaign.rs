//! Campaign and participant data shapes
//!
//! These mirror the rows the persistence layer fetches before invoking the
//! engine. The engine treats all of them as read-only snapshots; in
//! particular it never writes back the campaign's running participation
//! total (transactional consistency of that counter against live activity
//! is the calling service's problem).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::algorithm::AlgorithmConfig;
use crate::decimal::ensure_non_negative;
use crate::error::Result;

/// Campaign snapshot as supplied by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: Uuid,
    /// Running total of every participant's contribution, maintained by the
    /// persistence layer. Always at least any single participant's total.
    pub total_participation_score: Decimal,
    pub algorithm: AlgorithmConfig,
}

/// A participant and their interaction counters for one campaign.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub id: Uuid,
    pub counters: ParticipantCounters,
}

/// Interaction counters, mutated incrementally by external collaborators as
/// interactions occur. Monotonically non-decreasing unless explicitly reset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantCounters {
    pub click_count: Decimal,
    pub view_count: Decimal,
    pub submission_count: Decimal,
    pub participation_score: Decimal,
    pub total_participation_score: Decimal,
}

impl ParticipantCounters {
    pub fn validate(&self) -> Result<()> {
        ensure_non_negative("clickCount", self.click_count)?;
        ensure_non_negative("viewCount", self.view_count)?;
        ensure_non_negative("submissionCount", self.submission_count)?;
        ensure_non_negative("participationScore", self.participation_score)?;
        ensure_non_negative("totalParticipationScore", self.total_participation_score)?;
        Ok(())
    }
}

/// Per-post counters sourced from the social platforms, read-only here.
///
/// `comments` is carried through from the source but has no configured
/// point weight, so it never contributes to scores.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SocialPostMetrics {
    pub likes: Decimal,
    pub shares: Decimal,
    pub comments: Decimal,
}

impl SocialPostMetrics {
    pub fn validate(&self) -> Result<()> {
        ensure_non_negative("likes", self.likes)?;
        ensure_non_negative("shares", self.shares)?;
        ensure_non_negative("comments", self.comments)?;
        Ok(())
    }
}
