//! Tallying raw page snapshots into observations.
//!
//! A `PageSnapshot` is what a collector can read straight off a page:
//! cookie names, script URLs, storage keys, frame URLs and probe results,
//! all unclassified. The builder runs them through a `Ruleset` and produces
//! a `PageObservation` that satisfies the count invariants by construction.

use std::collections::BTreeMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::domain::{domain_or_unknown, extract_domain, is_third_party, normalize_url, validate_url};
use super::*;
use crate::rules::{detect_fingerprinting, Ruleset};

/// Unclassified signals collected from one page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageSnapshot {
    pub page_url: String,
    /// Defaults to the host of `page_url`.
    #[serde(default)]
    pub page_domain: Option<String>,
    /// Defaults to the time the snapshot is built.
    #[serde(default)]
    pub observed_at_epoch_millis: Option<i64>,
    #[serde(default)]
    pub cookies: Vec<RawCookie>,
    /// `src` of each external script.
    #[serde(default)]
    pub scripts: Vec<String>,
    /// `None` when the collector was denied access to the area.
    #[serde(default)]
    pub local_storage: Option<Vec<RawStorageEntry>>,
    #[serde(default)]
    pub session_storage: Option<Vec<RawStorageEntry>>,
    #[serde(default)]
    pub iframes: Vec<RawIframe>,
    #[serde(default)]
    pub fingerprinting: FingerprintProbe,
    /// `src` of each `<img>`.
    #[serde(default)]
    pub images: Vec<String>,
    /// Response headers of the page document, when the collector saw them.
    #[serde(default)]
    pub response_headers: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawCookie {
    pub name: String,
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub session: bool,
    #[serde(default)]
    pub secure: bool,
    #[serde(default)]
    pub http_only: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawStorageEntry {
    pub key: String,
    /// Length of the stored value.
    #[serde(default)]
    pub size_bytes: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawIframe {
    #[serde(default)]
    pub src: String,
    #[serde(default)]
    pub sandboxed: bool,
}

/// Raw fingerprinting probe results.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct FingerprintProbe {
    /// At least one `<canvas>` element on the page.
    #[serde(default)]
    pub canvas_present: bool,
    #[serde(default)]
    pub webgl_available: bool,
    /// How many fonts of the probe set rendered with a non-zero width.
    #[serde(default)]
    pub detected_font_count: usize,
}

/// Classifies and tallies snapshots with a fixed ruleset.
pub struct ObservationBuilder<'a> {
    ruleset: &'a Ruleset,
}

impl<'a> ObservationBuilder<'a> {
    pub fn new(ruleset: &'a Ruleset) -> Self {
        Self { ruleset }
    }

    pub fn build(&self, mut snapshot: PageSnapshot) -> PageObservation {
        if validate_url(&snapshot.page_url) {
            snapshot.page_url = normalize_url(&snapshot.page_url);
        } else {
            tracing::warn!(
                page = %snapshot.page_url,
                "page URL has no host, third-party attribution disabled"
            );
        }
        let page_domain = snapshot
            .page_domain
            .clone()
            .or_else(|| extract_domain(&snapshot.page_url))
            .unwrap_or_default();
        let observed_at_epoch_millis = snapshot
            .observed_at_epoch_millis
            .unwrap_or_else(|| Utc::now().timestamp_millis());

        let storage = self.storage(&snapshot);
        let resources = self.resources(&snapshot.images, &snapshot.iframes);
        let headers = snapshot
            .response_headers
            .as_ref()
            .map(|h| self.ruleset.evaluate_headers(h))
            .unwrap_or_default();
        let observation = PageObservation {
            cookies: self.cookies(&snapshot.cookies),
            scripts: self.scripts(&snapshot.scripts, &page_domain),
            storage,
            iframes: self.iframes(&snapshot.iframes, &page_domain),
            fingerprinting: detect_fingerprinting(
                snapshot.fingerprinting.canvas_present,
                snapshot.fingerprinting.webgl_available,
                snapshot.fingerprinting.detected_font_count,
            ),
            page_url: snapshot.page_url,
            page_domain,
            observed_at_epoch_millis,
            resources,
            headers,
        };

        tracing::debug!(
            page = %observation.page_domain,
            cookies = observation.cookies.count,
            scripts = observation.scripts.count,
            iframes = observation.iframes.count,
            tracking_resources = observation.resources.tracking_count,
            "snapshot tallied"
        );
        observation
    }

    fn cookies(&self, raw: &[RawCookie]) -> CookieSurface {
        let mut surface = CookieSurface::default();
        for cookie in raw {
            let is_tracking = self.ruleset.classify_cookie(&cookie.name, &cookie.domain);
            if is_tracking {
                surface.tracking_count += 1;
            } else {
                surface.functional_count += 1;
            }
            if cookie.session {
                surface.session_count += 1;
            } else {
                surface.persistent_count += 1;
            }
            surface.items.push(CookieRecord {
                name: cookie.name.clone(),
                domain: cookie.domain.clone(),
                is_tracking,
                is_session: cookie.session,
                secure: cookie.secure,
                http_only: cookie.http_only,
            });
        }
        surface.count = surface.tracking_count + surface.functional_count;
        surface
    }

    fn scripts(&self, raw: &[String], page_domain: &str) -> ScriptSurface {
        let mut surface = ScriptSurface {
            count: saturating_count(raw.len()),
            ..Default::default()
        };
        for src in raw {
            let class = self.ruleset.classify_script(src);
            if class.is_tracking_related {
                surface.tracking_count += 1;
            }
            if class.is_analytics {
                surface.analytics_count += 1;
            }
            surface.items.push(ScriptRecord {
                source_url: src.clone(),
                domain: domain_or_unknown(src),
                classification: class.category,
                service: class.service,
                is_third_party: is_third_party(src, page_domain),
            });
        }
        surface
    }

    fn storage(&self, snapshot: &PageSnapshot) -> StorageSurface {
        let mut surface = StorageSurface::default();
        let areas = [
            (StorageType::LocalStorage, &snapshot.local_storage),
            (StorageType::SessionStorage, &snapshot.session_storage),
        ];
        for (storage_type, entries) in areas {
            let Some(entries) = entries else {
                tracing::warn!(
                    area = %storage_type,
                    page = %snapshot.page_url,
                    "storage area inaccessible, reporting zero entries"
                );
                continue;
            };
            let count = saturating_count(entries.len());
            match storage_type {
                StorageType::LocalStorage => surface.local_storage_entry_count = count,
                StorageType::SessionStorage => surface.session_storage_entry_count = count,
            }
            surface.items.extend(entries.iter().map(|e| StorageRecord {
                key: e.key.clone(),
                storage_type,
                size_bytes: e.size_bytes,
            }));
        }
        surface
    }

    /// Images and frames whose source carries a tracking marker.
    fn resources(&self, images: &[String], iframes: &[RawIframe]) -> ResourceSurface {
        let sources = images
            .iter()
            .map(|src| (ResourceElement::Img, src.as_str()))
            .chain(iframes.iter().map(|f| (ResourceElement::Iframe, f.src.as_str())))
            .filter(|(_, src)| !src.trim().is_empty());

        let mut surface = ResourceSurface::default();
        for (element, src) in sources {
            surface.count += 1;
            if let Some(marker) = self.ruleset.classify_resource(src) {
                surface.tracking_count += 1;
                surface.items.push(TrackingResource {
                    element,
                    source_url: src.to_string(),
                    domain: domain_or_unknown(src),
                    marker: marker.to_string(),
                });
            }
        }
        surface
    }

    fn iframes(&self, raw: &[RawIframe], page_domain: &str) -> IframeSurface {
        let mut surface = IframeSurface {
            count: saturating_count(raw.len()),
            ..Default::default()
        };
        for frame in raw {
            let third_party = is_third_party(&frame.src, page_domain);
            if third_party {
                surface.third_party_count += 1;
            }
            surface.items.push(IframeRecord {
                source_url: frame.src.clone(),
                domain: domain_or_unknown(&frame.src),
                is_third_party: third_party,
                is_sandboxed: frame.sandboxed,
            });
        }
        surface
    }
}

fn saturating_count(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}
