//! The scoring engine: one validated observation in, one result out.
//!
//! Both presentation paths (toolbar badge and full report) go through
//! [`PrivacyEngine::evaluate`], so they can never disagree on a score.

use crate::error::Result;
use crate::observation::{ObservationBuilder, PageObservation, PageSnapshot};
use crate::rules::{RuleMetadataSet, Ruleset};
use crate::scoring::ScoreResult;

/// Stateless apart from its ruleset; safe to share across threads.
#[derive(Debug, Clone, Default)]
pub struct PrivacyEngine {
    ruleset: Ruleset,
}

impl PrivacyEngine {
    pub fn new(ruleset: Ruleset) -> Self {
        Self { ruleset }
    }

    pub fn ruleset(&self) -> &Ruleset {
        &self.ruleset
    }

    /// Validate and score an observation. Invariant violations are
    /// rejected, never clamped.
    pub fn evaluate(&self, observation: &PageObservation) -> Result<ScoreResult> {
        observation.validate()?;
        let result = ScoreResult::from_observation(observation);
        tracing::debug!(
            page = %observation.page_domain,
            score = result.score,
            tier = %result.status_tier(),
            recommendations = result.recommendations.len(),
            "observation scored"
        );
        Ok(result)
    }

    /// Classify and tally a raw snapshot with this engine's ruleset.
    pub fn observe(&self, snapshot: PageSnapshot) -> PageObservation {
        ObservationBuilder::new(&self.ruleset).build(snapshot)
    }

    /// Describe every rule this engine applies.
    pub fn list_rules(&self) -> RuleMetadataSet {
        RuleMetadataSet::describe(&self.ruleset)
    }
}
