use serde_json::Value;

use super::{is_array_field, ObservationSource, SourceKind, SNAPSHOT_LIST_FIELDS};
use crate::error::Result;
use crate::observation::{ObservationBuilder, PageObservation, PageSnapshot};
use crate::rules::Ruleset;

/// Raw `PageSnapshot` documents, classified with the active ruleset.
///
/// Detected by list-valued `cookies`/`scripts`/`iframes`/`images` or by the
/// per-area storage and response header keys.
pub struct SnapshotSource;

impl ObservationSource for SnapshotSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Snapshot
    }

    fn detect(&self, document: &Value) -> bool {
        SNAPSHOT_LIST_FIELDS
            .iter()
            .any(|k| is_array_field(document, k))
            || ["local_storage", "session_storage", "response_headers"]
                .iter()
                .any(|k| document.get(k).is_some())
    }

    fn load(&self, document: Value, ruleset: &Ruleset) -> Result<PageObservation> {
        let snapshot: PageSnapshot = serde_json::from_value(document)?;
        Ok(ObservationBuilder::new(ruleset).build(snapshot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn detects_storage_only_snapshot() {
        assert!(SnapshotSource.detect(&json!({"page_url": "https://a.test", "local_storage": null})));
    }

    #[test]
    fn detects_image_and_header_only_snapshots() {
        assert!(SnapshotSource.detect(&json!({"page_url": "https://a.test", "images": []})));
        assert!(SnapshotSource.detect(&json!({"page_url": "https://a.test", "response_headers": {}})));
        assert!(!SnapshotSource.detect(&json!({"page_url": "https://a.test", "headers": {"inspected": true}})));
    }

    #[test]
    fn classifies_with_given_ruleset() {
        let doc = json!({
            "page_url": "https://a.test/",
            "observed_at_epoch_millis": 5,
            "scripts": ["https://static.hotjar.com/c/hotjar-1.js"],
            "local_storage": null,
            "session_storage": [{"key": "cart", "size_bytes": 120}]
        });
        let obs = SnapshotSource.load(doc.clone(), &Ruleset::builtin()).unwrap();
        assert_eq!(obs.scripts.analytics_count, 1);
        assert_eq!(obs.storage.local_storage_entry_count, 0);
        assert_eq!(obs.storage.session_storage_entry_count, 1);

        let bare = SnapshotSource.load(doc, &Ruleset::empty()).unwrap();
        assert_eq!(bare.scripts.analytics_count, 0);
    }
}
