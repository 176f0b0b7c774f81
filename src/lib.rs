//! Campaign Rewards - Participation scoring and tiered reward engine
//!
//! Computes the numbers with financial consequences in the campaign
//! administration backend: campaign reward tiers, participant engagement
//! scores, proportional payouts, and the pre-payout audit report.
//!
//! # How it works
//!
//! 1. A campaign's reward algorithm (tier table + per-action point values)
//!    is parsed and validated from its stored JSON blob
//! 2. The campaign's cumulative participation score resolves its current
//!    tier and the reward pool that tier funds
//! 3. Each participant's social posts are aggregated into weighted
//!    engagement scores
//! 4. Counters and engagement scores become weighted raw scores; each
//!    action type's slice of the pool is paid out proportionally
//! 5. The audit report aggregates the whole campaign and flags statistical
//!    outliers for human review before any disbursement
//!
//! # Guarantees
//!
//! - All money and score arithmetic is exact `Decimal`; no floating-point
//!   drift across participants
//! - Every division is guarded; a zero denominator is a defined zero result
//! - Malformed configuration is rejected at the boundary, before any
//!   computation runs
//! - Every computation is a pure function over caller-supplied snapshots;
//!   persistence, HTTP, and auth are external collaborators

pub mod algorithm;
pub mod audit;
pub mod campaign;
pub mod config;
pub mod decimal;
pub mod engagement;
pub mod error;
pub mod payout;
pub mod tier;

pub use algorithm::{AlgorithmConfig, PointValues, TierSpec, SUPPORTED_ALGORITHM_VERSION};
pub use audit::{build_audit_report, AuditReport};
pub use campaign::{Campaign, Participant, ParticipantCounters, SocialPostMetrics};
pub use config::{AuditSettings, Config};
pub use decimal::{guarded_div, Decimal};
pub use engagement::{score_engagement, SocialScoreResult};
pub use error::{EngineError, Result};
pub use payout::{
    calculate_payout, weighted_raw_scores, ActionTotals, PayoutResult, RawScores,
    ACTION_TYPE_COUNT,
};
pub use tier::{current_reward_pool, resolve_tier, TierResult};
