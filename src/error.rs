//! Engine error types

use rust_decimal::Decimal;
use thiserror::Error;

/// Scoring and payout engine errors.
///
/// Every variant is a configuration error from the admin API's point of
/// view: the request that triggered it is rejected and must not be retried
/// until the campaign configuration is fixed.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("tier table is empty")]
    EmptyTierTable,

    #[error("tier table has no base tier (tier 0)")]
    MissingBaseTier,

    #[error("base tier threshold must be zero, found {found}")]
    NonZeroBaseThreshold { found: Decimal },

    #[error("tier keys must be contiguous from 0, missing tier {expected}")]
    NonContiguousTierKeys { expected: u32 },

    #[error("tier {tier} threshold does not increase over the previous tier")]
    UnsortedTierTable { tier: u32 },

    #[error("unsupported algorithm version {version}")]
    UnsupportedAlgorithmVersion { version: u32 },

    #[error("{field} must be non-negative, found {value}")]
    NegativeValue { field: String, value: Decimal },

    #[error("malformed algorithm configuration: {0}")]
    MalformedAlgorithm(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
