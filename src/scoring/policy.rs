use serde::{Deserialize, Serialize};

use super::{ScoreResult, StatusTier};

/// Policy verdict: whether a page's score clears the configured threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyVerdict {
    pub pass: bool,
    pub score: u8,
    pub status_tier: StatusTier,
    pub fail_below: u8,
}

/// Policy configuration loaded from `.privacylens.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    /// Scores strictly below this fail. 50 means "Poor" fails.
    #[serde(default = "default_fail_below")]
    pub fail_below: u8,
}

fn default_fail_below() -> u8 {
    50
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            fail_below: default_fail_below(),
        }
    }
}

impl Policy {
    /// Evaluate a result against this policy and produce a verdict.
    pub fn evaluate(&self, result: &ScoreResult) -> PolicyVerdict {
        PolicyVerdict {
            pass: result.score >= self.fail_below,
            score: result.score,
            status_tier: result.status_tier(),
            fail_below: self.fail_below,
        }
    }
}
