//! Score computation, risk tiering and recommendations.
//!
//! Everything here is a pure function of one `PageObservation`.

pub mod policy;
pub mod recommend;
pub mod tier;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::Result;
use crate::observation::PageObservation;

pub use policy::{Policy, PolicyVerdict};
pub use recommend::{
    generate_recommendations, recommendation_rules, Priority, Recommendation,
    RecommendationMetadata, RecommendationRule,
};
pub use tier::{compute_risk_tiers, RiskCategory, RiskLevel, RiskTiers, StatusTier};

/// Maximum score, in half points.
const MAX_HALF_POINTS: u64 = 200;

// Deduction per observed item, in half points (1.0 point == 2).
const COOKIE_TRACKING_PENALTY: u64 = 2;
const COOKIE_FUNCTIONAL_PENALTY: u64 = 1;
const SCRIPT_TRACKING_PENALTY: u64 = 4;
const SCRIPT_ANALYTICS_PENALTY: u64 = 3;
const LOCAL_STORAGE_PENALTY: u64 = 2;
const SESSION_STORAGE_PENALTY: u64 = 1;
const THIRD_PARTY_IFRAME_PENALTY: u64 = 6;

/// Output of one engine pass. Immutable; replaces any earlier result for
/// the same page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScoreResult {
    /// 0 (worst) to 100 (best).
    pub score: u8,
    pub risk_by_category: RiskTiers,
    pub recommendations: Vec<Recommendation>,
}

impl ScoreResult {
    /// Derive a result from an observation that has already been validated.
    pub fn from_observation(obs: &PageObservation) -> Self {
        Self {
            score: compute_score(obs),
            risk_by_category: compute_risk_tiers(obs),
            recommendations: generate_recommendations(obs),
        }
    }

    pub fn status_tier(&self) -> StatusTier {
        StatusTier::from_score(self.score)
    }

    /// Hex SHA-256 of the canonical JSON form. Equal results hash equal.
    pub fn digest(&self) -> Result<String> {
        let bytes = serde_json::to_vec(self)?;
        Ok(hex::encode(Sha256::digest(&bytes)))
    }
}

/// Total deduction for an observation, in half points.
///
/// Fingerprinting signals and first-party iframes are not scored.
fn penalty_half_points(obs: &PageObservation) -> u64 {
    let terms = [
        (obs.cookies.tracking_count, COOKIE_TRACKING_PENALTY),
        (obs.cookies.functional_count, COOKIE_FUNCTIONAL_PENALTY),
        (obs.scripts.tracking_count, SCRIPT_TRACKING_PENALTY),
        (obs.scripts.analytics_count, SCRIPT_ANALYTICS_PENALTY),
        (obs.storage.local_storage_entry_count, LOCAL_STORAGE_PENALTY),
        (obs.storage.session_storage_entry_count, SESSION_STORAGE_PENALTY),
        (obs.iframes.third_party_count, THIRD_PARTY_IFRAME_PENALTY),
    ];
    terms
        .iter()
        .map(|&(count, weight)| u64::from(count) * weight)
        .sum()
}

/// Privacy score in `0..=100`.
///
/// Rounds to the nearest integer with ties away from zero, then clamps.
/// Working in half points keeps this exact: a remainder of `2k + 1` half
/// points is `k + 0.5`, which rounds to `k + 1`. Negative raw scores clamp
/// to zero regardless of rounding direction.
pub fn compute_score(obs: &PageObservation) -> u8 {
    let Some(remaining) = MAX_HALF_POINTS.checked_sub(penalty_half_points(obs)) else {
        return 0;
    };
    // remaining <= 200, so the rounded value is at most 100.
    ((remaining + 1) / 2).min(100) as u8
}
