use serde_json::Value;

use super::{is_array_field, ObservationSource, SourceKind, SNAPSHOT_LIST_FIELDS};
use crate::error::Result;
use crate::observation::PageObservation;
use crate::rules::Ruleset;

/// Pre-tallied `PageObservation` documents, loaded as-is.
///
/// This is the catch-all for objects no other source claims; the ruleset is
/// not consulted because classification already happened upstream.
pub struct ObservationFileSource;

impl ObservationSource for ObservationFileSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Observation
    }

    fn detect(&self, document: &Value) -> bool {
        document.is_object()
            && !SNAPSHOT_LIST_FIELDS
                .iter()
                .any(|k| is_array_field(document, k))
    }

    fn load(&self, document: Value, _ruleset: &Ruleset) -> Result<PageObservation> {
        let mut observation: PageObservation = serde_json::from_value(document)?;
        if observation.page_domain.is_empty() {
            if let Some(host) = crate::observation::domain::extract_domain(&observation.page_url) {
                observation.page_domain = host;
            }
        }
        Ok(observation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn loads_full_observation() {
        let doc = json!({
            "page_url": "https://shop.example/",
            "page_domain": "shop.example",
            "observed_at_epoch_millis": 1700000000000i64,
            "cookies": {"count": 3, "tracking_count": 2, "functional_count": 1},
            "scripts": {"count": 4, "tracking_count": 4, "analytics_count": 2},
            "storage": {"local_storage_entry_count": 7, "session_storage_entry_count": 1},
            "iframes": {"count": 2, "third_party_count": 1},
            "fingerprinting": {"canvas_used": true}
        });
        assert!(ObservationFileSource.detect(&doc));
        let obs = ObservationFileSource.load(doc, &Ruleset::builtin()).unwrap();
        assert_eq!(obs.scripts.analytics_count, 2);
        assert_eq!(obs.storage.local_storage_entry_count, 7);
        assert!(obs.fingerprinting.canvas_used);
    }

    #[test]
    fn fills_missing_domain_from_url() {
        let doc = json!({"page_url": "https://blog.example.org/post/1"});
        let obs = ObservationFileSource.load(doc, &Ruleset::builtin()).unwrap();
        assert_eq!(obs.page_domain, "blog.example.org");
    }

    #[test]
    fn does_not_claim_snapshots() {
        assert!(!ObservationFileSource.detect(&json!({"scripts": ["https://x.test/a.js"]})));
    }
}
