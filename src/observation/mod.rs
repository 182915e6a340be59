//! Page observation record: the raw privacy signals seen on one page at one
//! point in time.
//!
//! Every observation source produces a `PageObservation`. The scoring engine
//! consumes nothing else. This decouples how signals are collected from how
//! they are judged.

pub mod builder;
pub mod cookie_surface;
pub mod domain;
pub mod fingerprint_surface;
pub mod header_surface;
pub mod iframe_surface;
pub mod resource_surface;
pub mod script_surface;
pub mod storage_surface;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{PrivacyError, Result};

pub use builder::{ObservationBuilder, PageSnapshot};
pub use cookie_surface::{CookieRecord, CookieSurface};
pub use fingerprint_surface::FingerprintingSignals;
pub use header_surface::{HeaderCheck, HeaderExposure, HeaderSurface};
pub use iframe_surface::{IframeRecord, IframeSurface};
pub use resource_surface::{ResourceElement, ResourceSurface, TrackingResource};
pub use script_surface::{ScriptRecord, ScriptSurface};
pub use storage_surface::{StorageRecord, StorageSurface, StorageType};

/// Complete page observation. Created fresh per analysis pass and never
/// mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageObservation {
    /// Full URL of the observed page.
    #[serde(default)]
    pub page_url: String,
    /// Host name of the observed page.
    #[serde(default)]
    pub page_domain: String,
    /// When the observation was taken (Unix epoch, milliseconds).
    #[serde(default)]
    pub observed_at_epoch_millis: i64,
    #[serde(default)]
    pub cookies: CookieSurface,
    #[serde(default)]
    pub scripts: ScriptSurface,
    #[serde(default)]
    pub storage: StorageSurface,
    #[serde(default)]
    pub iframes: IframeSurface,
    #[serde(default)]
    pub fingerprinting: FingerprintingSignals,
    /// Tracking pixels and beacons among images and frames. Not scored.
    #[serde(default)]
    pub resources: ResourceSurface,
    /// Response header findings. Not scored.
    #[serde(default)]
    pub headers: HeaderSurface,
}

impl PageObservation {
    /// Check the count invariants. Violations are integration defects and
    /// are reported rather than repaired.
    pub fn validate(&self) -> Result<()> {
        if !self.page_domain.is_empty() && !domain::is_valid_domain(&self.page_domain) {
            return Err(PrivacyError::invalid(
                "page_domain",
                format!("'{}' is not a valid host name", self.page_domain),
            ));
        }

        let c = &self.cookies;
        let classified = u64::from(c.tracking_count) + u64::from(c.functional_count);
        if classified != u64::from(c.count) {
            return Err(PrivacyError::invalid(
                "cookies",
                format!(
                    "tracking_count ({}) + functional_count ({}) must equal count ({})",
                    c.tracking_count, c.functional_count, c.count
                ),
            ));
        }
        check_within("cookies.session_count", c.session_count, c.count)?;
        check_within("cookies.persistent_count", c.persistent_count, c.count)?;

        let s = &self.scripts;
        check_within("scripts.tracking_count", s.tracking_count, s.count)?;
        check_within("scripts.analytics_count", s.analytics_count, s.count)?;

        let f = &self.iframes;
        check_within("iframes.third_party_count", f.third_party_count, f.count)?;

        let r = &self.resources;
        check_within("resources.tracking_count", r.tracking_count, r.count)?;

        Ok(())
    }

    /// Observation time as a UTC timestamp, if representable.
    pub fn observed_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.observed_at_epoch_millis).single()
    }
}

fn check_within(field: &str, sub: u32, total: u32) -> Result<()> {
    if sub > total {
        return Err(PrivacyError::invalid(
            field,
            format!("{sub} exceeds parent total {total}"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_observation_is_valid() {
        assert!(PageObservation::default().validate().is_ok());
    }

    #[test]
    fn cookie_partition_must_sum_to_count() {
        let mut obs = PageObservation::default();
        obs.cookies.count = 5;
        obs.cookies.tracking_count = 2;
        obs.cookies.functional_count = 2;
        let err = obs.validate().unwrap_err();
        assert!(matches!(err, PrivacyError::InvalidObservation { ref field, .. } if field == "cookies"));
    }

    #[test]
    fn sub_count_cannot_exceed_total() {
        let mut obs = PageObservation::default();
        obs.iframes.count = 1;
        obs.iframes.third_party_count = 2;
        let err = obs.validate().unwrap_err();
        assert!(err.to_string().contains("iframes.third_party_count"));
    }

    #[test]
    fn session_count_bounded_by_cookie_count() {
        let mut obs = PageObservation::default();
        obs.cookies.count = 1;
        obs.cookies.functional_count = 1;
        obs.cookies.session_count = 3;
        assert!(obs.validate().is_err());
    }

    #[test]
    fn malformed_page_domain_is_rejected() {
        let obs = PageObservation {
            page_domain: "shop example.com".into(),
            ..Default::default()
        };
        let err = obs.validate().unwrap_err();
        assert!(matches!(err, PrivacyError::InvalidObservation { ref field, .. } if field == "page_domain"));

        let ok = PageObservation {
            page_domain: "shop.example.com".into(),
            ..Default::default()
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn negative_count_rejected_at_deserialization() {
        let json = r#"{"cookies": {"count": -1}}"#;
        assert!(serde_json::from_str::<PageObservation>(json).is_err());
    }

    #[test]
    fn missing_sections_default_to_zero() {
        let obs: PageObservation =
            serde_json::from_str(r#"{"page_url": "https://example.com/"}"#).unwrap();
        assert_eq!(obs.cookies.count, 0);
        assert_eq!(obs.iframes.third_party_count, 0);
        assert!(!obs.fingerprinting.canvas_used);
    }

    #[test]
    fn observed_at_converts_epoch_millis() {
        let obs = PageObservation {
            observed_at_epoch_millis: 1_700_000_000_000,
            ..Default::default()
        };
        let ts = obs.observed_at().unwrap();
        assert_eq!(ts.timestamp(), 1_700_000_000);
    }
}
