//! Campaign reward algorithm configuration
//!
//! A campaign stores its reward algorithm as a JSON blob: an ordered tier
//! table plus per-action point weights. The blob is parsed and validated
//! here, at the boundary, so the computation modules only ever see
//! well-formed configuration. Validation failures are 4xx-equivalent and
//! must not be retried without fixing the campaign.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::ensure_non_negative;
use crate::error::{EngineError, Result};

/// Algorithm blob version this engine understands.
pub const SUPPORTED_ALGORITHM_VERSION: u32 = 1;

/// One reward tier: activated once the campaign's cumulative participation
/// score reaches `threshold`, funding a reward pool of `total_reward`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierSpec {
    pub threshold: Decimal,
    pub total_reward: Decimal,
}

/// Non-negative weights applied to each interaction counter type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointValues {
    pub clicks: Decimal,
    pub views: Decimal,
    pub submissions: Decimal,
    pub likes: Decimal,
    pub shares: Decimal,
}

impl PointValues {
    pub fn validate(&self) -> Result<()> {
        ensure_non_negative("pointValues.clicks", self.clicks)?;
        ensure_non_negative("pointValues.views", self.views)?;
        ensure_non_negative("pointValues.submissions", self.submissions)?;
        ensure_non_negative("pointValues.likes", self.likes)?;
        ensure_non_negative("pointValues.shares", self.shares)?;
        Ok(())
    }
}

/// A campaign's reward algorithm, immutable once the campaign is created.
///
/// Tier keys double as tier indices, so they must be contiguous from 0 and
/// thresholds must strictly increase in key order (tier 0 starts at zero).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlgorithmConfig {
    #[serde(default = "default_version")]
    pub version: u32,
    pub tiers: BTreeMap<u32, TierSpec>,
    pub point_values: PointValues,
}

fn default_version() -> u32 {
    SUPPORTED_ALGORITHM_VERSION
}

impl AlgorithmConfig {
    /// Parse and validate an algorithm blob as stored on a campaign row.
    pub fn from_json(value: serde_json::Value) -> Result<Self> {
        let config: Self = serde_json::from_value(value)?;
        config.validate()?;
        Ok(config)
    }

    /// Check tier ordering and weight signs.
    pub fn validate(&self) -> Result<()> {
        if self.version != SUPPORTED_ALGORITHM_VERSION {
            return Err(EngineError::UnsupportedAlgorithmVersion {
                version: self.version,
            });
        }

        if self.tiers.is_empty() {
            return Err(EngineError::EmptyTierTable);
        }

        for (position, key) in self.tiers.keys().enumerate() {
            if *key != position as u32 {
                return Err(if position == 0 {
                    EngineError::MissingBaseTier
                } else {
                    EngineError::NonContiguousTierKeys {
                        expected: position as u32,
                    }
                });
            }
        }

        if let Some(base) = self.tiers.get(&0) {
            if !base.threshold.is_zero() {
                return Err(EngineError::NonZeroBaseThreshold {
                    found: base.threshold,
                });
            }
        }

        let mut previous: Option<Decimal> = None;
        for (key, tier) in &self.tiers {
            ensure_non_negative(&format!("tiers.{}.totalReward", key), tier.total_reward)?;
            if let Some(prev) = previous {
                if tier.threshold <= prev {
                    return Err(EngineError::UnsortedTierTable { tier: *key });
                }
            }
            previous = Some(tier.threshold);
        }

        self.point_values.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn valid_blob() -> serde_json::Value {
        json!({
            "version": 1,
            "tiers": {
                "0": { "threshold": 0, "totalReward": 0 },
                "1": { "threshold": 100, "totalReward": 500 },
                "2": { "threshold": "250.5", "totalReward": "1200.75" }
            },
            "pointValues": {
                "clicks": 1,
                "views": "0.1",
                "submissions": 5,
                "likes": 2,
                "shares": 3
            }
        })
    }

    #[test]
    fn test_parse_valid_blob() {
        let config = AlgorithmConfig::from_json(valid_blob()).unwrap();

        assert_eq!(config.version, 1);
        assert_eq!(config.tiers.len(), 3);
        assert_eq!(config.tiers[&1].threshold, d("100"));
        assert_eq!(config.tiers[&2].total_reward, d("1200.75"));
        assert_eq!(config.point_values.views, d("0.1"));
    }

    #[test]
    fn test_version_defaults_when_missing() {
        let mut blob = valid_blob();
        blob.as_object_mut().unwrap().remove("version");

        let config = AlgorithmConfig::from_json(blob).unwrap();
        assert_eq!(config.version, SUPPORTED_ALGORITHM_VERSION);
    }

    #[test]
    fn test_unsupported_version_rejected() {
        let mut blob = valid_blob();
        blob["version"] = json!(7);

        let err = AlgorithmConfig::from_json(blob).unwrap_err();
        assert!(matches!(
            err,
            EngineError::UnsupportedAlgorithmVersion { version: 7 }
        ));
    }

    #[test]
    fn test_empty_tier_table_rejected() {
        let mut blob = valid_blob();
        blob["tiers"] = json!({});

        let err = AlgorithmConfig::from_json(blob).unwrap_err();
        assert!(matches!(err, EngineError::EmptyTierTable));
    }

    #[test]
    fn test_missing_base_tier_rejected() {
        let mut blob = valid_blob();
        blob["tiers"] = json!({
            "1": { "threshold": 100, "totalReward": 500 }
        });

        let err = AlgorithmConfig::from_json(blob).unwrap_err();
        assert!(matches!(err, EngineError::MissingBaseTier));
    }

    #[test]
    fn test_non_zero_base_threshold_rejected() {
        let mut blob = valid_blob();
        blob["tiers"]["0"]["threshold"] = json!(10);

        let err = AlgorithmConfig::from_json(blob).unwrap_err();
        assert!(matches!(err, EngineError::NonZeroBaseThreshold { .. }));
    }

    #[test]
    fn test_unsorted_thresholds_rejected() {
        let mut blob = valid_blob();
        blob["tiers"]["2"]["threshold"] = json!(50);

        let err = AlgorithmConfig::from_json(blob).unwrap_err();
        assert!(matches!(err, EngineError::UnsortedTierTable { tier: 2 }));
    }

    #[test]
    fn test_negative_point_value_rejected() {
        let mut blob = valid_blob();
        blob["pointValues"]["shares"] = json!(-3);

        let err = AlgorithmConfig::from_json(blob).unwrap_err();
        assert!(matches!(err, EngineError::NegativeValue { .. }));
    }

    #[test]
    fn test_malformed_blob_rejected() {
        let err = AlgorithmConfig::from_json(json!({ "tiers": "nope" })).unwrap_err();
        assert!(matches!(err, EngineError::MalformedAlgorithm(_)));
    }
}
