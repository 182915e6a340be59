//! Observation sources: where a `PageObservation` comes from.
//!
//! Each source recognizes one JSON document shape and turns it into an
//! observation. Sources never fail on inaccessible page data; they report
//! zero counts for it instead.

pub mod extension;
pub mod observation;
pub mod snapshot;

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{PrivacyError, Result};
use crate::observation::PageObservation;
use crate::rules::Ruleset;

/// Which document shape a source handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Pre-tallied `PageObservation` JSON.
    Observation,
    /// Raw `PageSnapshot` JSON, classified on load.
    Snapshot,
    /// The browser extension's `updateAnalysisData` message payload.
    ExtensionMessage,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Observation => write!(f, "observation"),
            Self::Snapshot => write!(f, "snapshot"),
            Self::ExtensionMessage => write!(f, "extension message"),
        }
    }
}

/// A source recognizes a document shape and loads it into an observation.
pub trait ObservationSource: Send + Sync {
    fn kind(&self) -> SourceKind;

    /// Check if this source can handle the given document.
    fn detect(&self, document: &Value) -> bool;

    /// Convert the document. Classification, where needed, uses `ruleset`.
    fn load(&self, document: Value, ruleset: &Ruleset) -> Result<PageObservation>;
}

/// All registered sources, most specific first.
pub fn all_sources() -> Vec<Box<dyn ObservationSource>> {
    vec![
        Box::new(extension::ExtensionMessageSource),
        Box::new(snapshot::SnapshotSource),
        Box::new(observation::ObservationFileSource),
    ]
}

/// Read a JSON document from a file, or from stdin when `path` is `-`.
pub fn read_document(path: &Path) -> Result<Value> {
    let content = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path)?
    };
    Ok(serde_json::from_str(&content)?)
}

/// Load one observation from a document, using the first source that
/// recognizes it.
pub fn load_document(document: Value, ruleset: &Ruleset, origin: &str) -> Result<PageObservation> {
    if !document.is_object() {
        return Err(PrivacyError::NoSource(origin.to_string()));
    }
    for source in all_sources() {
        if source.detect(&document) {
            tracing::debug!(source = %source.kind(), origin, "observation source detected");
            return source.load(document, ruleset).map_err(|e| match e {
                PrivacyError::Json(err) => PrivacyError::Source {
                    source_kind: source.kind().to_string(),
                    message: err.to_string(),
                },
                other => other,
            });
        }
    }
    Err(PrivacyError::NoSource(origin.to_string()))
}

/// Auto-detect the document shape at `path` and load every observation in
/// it. A top-level array holds one document per page; entries that cannot be
/// loaded or break a count invariant are skipped, and only an array with no
/// usable entry is an error.
pub fn auto_detect_and_load(path: &Path, ruleset: &Ruleset) -> Result<Vec<PageObservation>> {
    let origin = path.display().to_string();
    match read_document(path)? {
        Value::Array(items) => {
            let mut observations = Vec::with_capacity(items.len());
            for (idx, item) in items.into_iter().enumerate() {
                let loaded = load_document(item, ruleset, &format!("{origin}[{idx}]"))
                    .and_then(|obs| obs.validate().map(|()| obs));
                match loaded {
                    Ok(obs) => observations.push(obs),
                    Err(e) => {
                        tracing::warn!(origin = %origin, index = idx, error = %e, "skipping unreadable entry");
                    }
                }
            }
            if observations.is_empty() {
                return Err(PrivacyError::NoSource(origin));
            }
            Ok(observations)
        }
        document => Ok(vec![load_document(document, ruleset, &origin)?]),
    }
}

/// Fields that hold raw lists in a snapshot and tallied objects in an
/// observation.
const SNAPSHOT_LIST_FIELDS: [&str; 4] = ["cookies", "scripts", "iframes", "images"];

/// `true` if `document[key]` exists and is a JSON array.
fn is_array_field(document: &Value, key: &str) -> bool {
    document.get(key).is_some_and(Value::is_array)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn detects_each_shape() {
        let rules = Ruleset::builtin();
        let obs = load_document(
            json!({"page_url": "https://a.test/", "cookies": {"count": 1, "functional_count": 1}}),
            &rules,
            "inline",
        )
        .unwrap();
        assert_eq!(obs.cookies.count, 1);

        let snap = load_document(
            json!({"page_url": "https://a.test/", "cookies": [{"name": "_ga"}]}),
            &rules,
            "inline",
        )
        .unwrap();
        assert_eq!(snap.cookies.tracking_count, 1);

        let msg = load_document(
            json!({"url": "https://a.test/", "domain": "a.test", "timestamp": 1,
                   "iframes": {"count": 1, "thirdParty": 1}}),
            &rules,
            "inline",
        )
        .unwrap();
        assert_eq!(msg.iframes.third_party_count, 1);
    }

    #[test]
    fn non_object_has_no_source() {
        let err = load_document(json!(42), &Ruleset::builtin(), "inline").unwrap_err();
        assert!(matches!(err, PrivacyError::NoSource(_)));
    }

    #[test]
    fn malformed_fields_become_source_errors() {
        let err = load_document(
            json!({"page_url": "x", "cookies": {"count": "many"}}),
            &Ruleset::builtin(),
            "inline",
        )
        .unwrap_err();
        assert!(matches!(err, PrivacyError::Source { .. }));
    }

    #[test]
    fn array_files_yield_one_observation_per_entry() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"page_url": "https://a.test/"}}, 7, {{"page_url": "https://b.test/", "scripts": []}}]"#
        )
        .unwrap();
        let observations = auto_detect_and_load(file.path(), &Ruleset::builtin()).unwrap();
        assert_eq!(observations.len(), 2);
        assert_eq!(observations[1].page_domain, "b.test");
    }

    #[test]
    fn inconsistent_array_entries_are_skipped() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"page_url": "https://a.test/"}},
               {{"page_url": "https://b.test/", "cookies": {{"count": 5, "tracking_count": 1, "functional_count": 1}}}},
               7]"#
        )
        .unwrap();
        let observations = auto_detect_and_load(file.path(), &Ruleset::builtin()).unwrap();
        assert_eq!(observations.len(), 1);
        assert_eq!(observations[0].page_domain, "a.test");
    }

    #[test]
    fn array_without_usable_entries_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"cookies": {{"count": 2, "tracking_count": 0, "functional_count": 0}}}}]"#
        )
        .unwrap();
        let err = auto_detect_and_load(file.path(), &Ruleset::builtin()).unwrap_err();
        assert!(matches!(err, PrivacyError::NoSource(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = auto_detect_and_load(Path::new("does/not/exist.json"), &Ruleset::builtin())
            .unwrap_err();
        assert!(matches!(err, PrivacyError::Io(_)));
    }
}
