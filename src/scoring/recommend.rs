use serde::{Deserialize, Serialize};

use super::tier::RiskCategory;
use crate::observation::PageObservation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

/// A user-facing suggestion. Lists of these are ordered by rule, not by
/// priority; the order is what users see.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Recommendation {
    /// Identifier of the rule that produced it (e.g., "PL-REC-001").
    pub id: String,
    pub text: String,
    pub priority: Priority,
    /// Category the recommendation addresses; `None` for the all-clear.
    pub category: Option<RiskCategory>,
}

/// A recommendation rule: a fixed predicate over the observation.
#[derive(Debug, Clone, Copy)]
pub struct RecommendationRule {
    pub id: &'static str,
    pub priority: Priority,
    pub category: Option<RiskCategory>,
    /// Trigger condition, for listings.
    pub trigger: &'static str,
    pub text: &'static str,
    fires: fn(&PageObservation) -> bool,
}

impl RecommendationRule {
    pub fn metadata(&self) -> RecommendationMetadata {
        RecommendationMetadata {
            id: self.id.into(),
            priority: self.priority,
            category: self.category,
            trigger: self.trigger.into(),
            text: self.text.into(),
        }
    }

    fn to_recommendation(self) -> Recommendation {
        Recommendation {
            id: self.id.into(),
            text: self.text.into(),
            priority: self.priority,
            category: self.category,
        }
    }
}

/// Serializable description of a recommendation rule, used by `list-rules`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationMetadata {
    pub id: String,
    pub priority: Priority,
    pub category: Option<RiskCategory>,
    pub trigger: String,
    pub text: String,
}

const CONDITIONAL_RULES: [RecommendationRule; 4] = [
    RecommendationRule {
        id: "PL-REC-001",
        priority: Priority::High,
        category: Some(RiskCategory::Cookies),
        trigger: "tracking cookies > 5",
        text: "Consider using privacy-focused browser settings to block tracking cookies",
        fires: |o| o.cookies.tracking_count > 5,
    },
    RecommendationRule {
        id: "PL-REC-002",
        priority: Priority::High,
        category: Some(RiskCategory::Scripts),
        trigger: "tracking scripts > 3",
        text: "Multiple tracking scripts detected. Use an ad blocker for better privacy",
        fires: |o| o.scripts.tracking_count > 3,
    },
    RecommendationRule {
        id: "PL-REC-003",
        priority: Priority::Medium,
        category: Some(RiskCategory::Storage),
        trigger: "localStorage entries > 10",
        text: "High amount of local storage usage. Clear browser data regularly",
        fires: |o| o.storage.local_storage_entry_count > 10,
    },
    RecommendationRule {
        id: "PL-REC-004",
        priority: Priority::Medium,
        category: Some(RiskCategory::Iframes),
        trigger: "third-party iframes > 0",
        text: "Third-party iframes present. Be cautious of embedded content",
        fires: |o| o.iframes.third_party_count > 0,
    },
];

const ALL_CLEAR: RecommendationRule = RecommendationRule {
    id: "PL-REC-005",
    priority: Priority::Low,
    category: None,
    trigger: "no other recommendation applies",
    text: "Good privacy practices detected on this website",
    fires: |_| true,
};

/// All recommendation rules in evaluation order.
pub fn recommendation_rules() -> Vec<RecommendationRule> {
    CONDITIONAL_RULES
        .iter()
        .copied()
        .chain(std::iter::once(ALL_CLEAR))
        .collect()
}

/// Evaluate the rules in order. Never empty: the all-clear is emitted
/// exactly when no other rule fires.
pub fn generate_recommendations(obs: &PageObservation) -> Vec<Recommendation> {
    let mut out: Vec<Recommendation> = CONDITIONAL_RULES
        .iter()
        .filter(|r| (r.fires)(obs))
        .map(|r| r.to_recommendation())
        .collect();
    if out.is_empty() {
        out.push(ALL_CLEAR.to_recommendation());
    }
    out
}
