use serde::{Deserialize, Serialize};

use crate::observation::PageObservation;

/// Overall privacy tier, derived from the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusTier {
    Poor,
    Moderate,
    Good,
    Excellent,
}

impl StatusTier {
    /// Each tier includes its lower bound: 90, 70 and 50.
    pub fn from_score(score: u8) -> Self {
        match score {
            90..=u8::MAX => Self::Excellent,
            70..=89 => Self::Good,
            50..=69 => Self::Moderate,
            _ => Self::Poor,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent Privacy",
            Self::Good => "Good Privacy",
            Self::Moderate => "Moderate Privacy",
            Self::Poor => "Poor Privacy",
        }
    }
}

impl std::fmt::Display for StatusTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Excellent => write!(f, "excellent"),
            Self::Good => write!(f, "good"),
            Self::Moderate => write!(f, "moderate"),
            Self::Poor => write!(f, "poor"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskCategory {
    Cookies,
    Scripts,
    Storage,
    Iframes,
}

impl RiskCategory {
    pub const ALL: [RiskCategory; 4] = [Self::Cookies, Self::Scripts, Self::Storage, Self::Iframes];

    /// The count a category is tiered on.
    pub fn measure(&self, obs: &PageObservation) -> u64 {
        match self {
            Self::Cookies => u64::from(obs.cookies.tracking_count),
            Self::Scripts => u64::from(obs.scripts.tracking_count),
            Self::Storage => obs.storage.total_entries(),
            Self::Iframes => u64::from(obs.iframes.third_party_count),
        }
    }

    fn thresholds(&self) -> Thresholds {
        match self {
            Self::Cookies => Thresholds { medium_above: 2, high_above: 5 },
            Self::Scripts => Thresholds { medium_above: 1, high_above: 3 },
            Self::Storage => Thresholds { medium_above: 5, high_above: 15 },
            Self::Iframes => Thresholds { medium_above: 0, high_above: 2 },
        }
    }

    pub fn level_for(&self, count: u64) -> RiskLevel {
        self.thresholds().level(count)
    }
}

impl std::fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cookies => write!(f, "cookies"),
            Self::Scripts => write!(f, "scripts"),
            Self::Storage => write!(f, "storage"),
            Self::Iframes => write!(f, "iframes"),
        }
    }
}

struct Thresholds {
    medium_above: u64,
    high_above: u64,
}

impl Thresholds {
    fn level(&self, count: u64) -> RiskLevel {
        if count > self.high_above {
            RiskLevel::High
        } else if count > self.medium_above {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

/// Risk level per category. Independent of the global score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RiskTiers {
    pub cookies: RiskLevel,
    pub scripts: RiskLevel,
    pub storage: RiskLevel,
    pub iframes: RiskLevel,
}

impl RiskTiers {
    pub fn get(&self, category: RiskCategory) -> RiskLevel {
        match category {
            RiskCategory::Cookies => self.cookies,
            RiskCategory::Scripts => self.scripts,
            RiskCategory::Storage => self.storage,
            RiskCategory::Iframes => self.iframes,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (RiskCategory, RiskLevel)> + '_ {
        RiskCategory::ALL.into_iter().map(move |c| (c, self.get(c)))
    }

    /// Highest level across all categories.
    pub fn highest(&self) -> RiskLevel {
        self.iter().map(|(_, l)| l).max().unwrap_or(RiskLevel::Low)
    }
}

pub fn compute_risk_tiers(obs: &PageObservation) -> RiskTiers {
    let level = |c: RiskCategory| c.level_for(c.measure(obs));
    RiskTiers {
        cookies: level(RiskCategory::Cookies),
        scripts: level(RiskCategory::Scripts),
        storage: level(RiskCategory::Storage),
        iframes: level(RiskCategory::Iframes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_tier_boundaries() {
        assert_eq!(StatusTier::from_score(100), StatusTier::Excellent);
        assert_eq!(StatusTier::from_score(90), StatusTier::Excellent);
        assert_eq!(StatusTier::from_score(89), StatusTier::Good);
        assert_eq!(StatusTier::from_score(70), StatusTier::Good);
        assert_eq!(StatusTier::from_score(69), StatusTier::Moderate);
        assert_eq!(StatusTier::from_score(50), StatusTier::Moderate);
        assert_eq!(StatusTier::from_score(49), StatusTier::Poor);
        assert_eq!(StatusTier::from_score(0), StatusTier::Poor);
    }

    #[test]
    fn cookie_thresholds() {
        let c = RiskCategory::Cookies;
        assert_eq!(c.level_for(2), RiskLevel::Low);
        assert_eq!(c.level_for(3), RiskLevel::Medium);
        assert_eq!(c.level_for(5), RiskLevel::Medium);
        assert_eq!(c.level_for(6), RiskLevel::High);
    }

    #[test]
    fn script_thresholds() {
        let c = RiskCategory::Scripts;
        assert_eq!(c.level_for(1), RiskLevel::Low);
        assert_eq!(c.level_for(2), RiskLevel::Medium);
        assert_eq!(c.level_for(3), RiskLevel::Medium);
        assert_eq!(c.level_for(4), RiskLevel::High);
    }

    #[test]
    fn storage_counts_both_areas() {
        let mut obs = PageObservation::default();
        obs.storage.local_storage_entry_count = 3;
        obs.storage.session_storage_entry_count = 3;
        assert_eq!(compute_risk_tiers(&obs).storage, RiskLevel::Medium);
        obs.storage.session_storage_entry_count = 13;
        assert_eq!(compute_risk_tiers(&obs).storage, RiskLevel::High);
        obs.storage.local_storage_entry_count = 0;
        obs.storage.session_storage_entry_count = 5;
        assert_eq!(compute_risk_tiers(&obs).storage, RiskLevel::Low);
    }

    #[test]
    fn any_third_party_iframe_is_medium() {
        let c = RiskCategory::Iframes;
        assert_eq!(c.level_for(0), RiskLevel::Low);
        assert_eq!(c.level_for(1), RiskLevel::Medium);
        assert_eq!(c.level_for(2), RiskLevel::Medium);
        assert_eq!(c.level_for(3), RiskLevel::High);
    }

    #[test]
    fn first_party_iframes_do_not_raise_risk() {
        let mut obs = PageObservation::default();
        obs.iframes.count = 9;
        assert_eq!(compute_risk_tiers(&obs).iframes, RiskLevel::Low);
    }

    #[test]
    fn iter_follows_category_order() {
        let tiers = compute_risk_tiers(&PageObservation::default());
        let cats: Vec<_> = tiers.iter().map(|(c, _)| c).collect();
        assert_eq!(cats, RiskCategory::ALL.to_vec());
        assert_eq!(tiers.highest(), RiskLevel::Low);
    }
}
