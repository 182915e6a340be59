use serde::Deserialize;
use serde_json::Value;

use super::{ObservationSource, SourceKind};
use crate::error::Result;
use crate::observation::domain::domain_or_unknown;
use crate::observation::*;
use crate::rules::{Ruleset, ScriptCategory};

/// Payload of the browser extension's `updateAnalysisData` message.
///
/// The extension's content script reports camelCase counts and terse item
/// records; this source maps them onto the observation model. Counts are
/// taken as reported and checked later by the engine.
pub struct ExtensionMessageSource;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Message {
    #[serde(default)]
    url: String,
    #[serde(default)]
    domain: String,
    #[serde(default)]
    timestamp: i64,
    #[serde(default)]
    cookies: MessageCookies,
    #[serde(default)]
    scripts: MessageScripts,
    #[serde(default)]
    storage: MessageStorage,
    #[serde(default)]
    iframes: MessageIframes,
    #[serde(default)]
    fingerprinting: MessageFingerprinting,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MessageCookies {
    #[serde(default, alias = "total")]
    count: u32,
    #[serde(default)]
    tracking: u32,
    #[serde(default)]
    functional: u32,
    #[serde(default)]
    session: u32,
    #[serde(default)]
    persistent: u32,
    #[serde(default)]
    items: Vec<MessageCookie>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MessageCookie {
    #[serde(default)]
    name: String,
    #[serde(default)]
    domain: String,
    #[serde(default)]
    is_tracking: bool,
    #[serde(default)]
    is_session: bool,
    #[serde(default)]
    secure: bool,
    #[serde(default)]
    http_only: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MessageScripts {
    #[serde(default)]
    count: u32,
    #[serde(default)]
    tracking: u32,
    #[serde(default)]
    analytics: u32,
    #[serde(default)]
    items: Vec<MessageScript>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MessageScript {
    #[serde(default)]
    src: String,
    #[serde(default)]
    domain: Option<String>,
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    is_third_party: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MessageStorage {
    #[serde(default)]
    local_storage: u32,
    #[serde(default)]
    session_storage: u32,
    #[serde(default)]
    items: Vec<MessageStorageItem>,
}

#[derive(Debug, Default, Deserialize)]
struct MessageStorageItem {
    #[serde(default)]
    key: String,
    #[serde(default, rename = "type")]
    kind: String,
    #[serde(default)]
    size: u64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MessageIframes {
    #[serde(default)]
    count: u32,
    #[serde(default)]
    third_party: u32,
    #[serde(default)]
    items: Vec<MessageIframe>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MessageIframe {
    #[serde(default)]
    src: Option<String>,
    #[serde(default)]
    domain: Option<String>,
    #[serde(default)]
    is_third_party: bool,
    #[serde(default)]
    sandbox: bool,
}

#[derive(Debug, Default, Deserialize)]
struct MessageFingerprinting {
    #[serde(default)]
    canvas: bool,
    #[serde(default)]
    webgl: bool,
    #[serde(default)]
    fonts: bool,
}

impl ObservationSource for ExtensionMessageSource {
    fn kind(&self) -> SourceKind {
        SourceKind::ExtensionMessage
    }

    fn detect(&self, document: &Value) -> bool {
        document.get("page_url").is_none()
            && (document.get("url").is_some()
                || document.pointer("/storage/localStorage").is_some()
                || document.pointer("/iframes/thirdParty").is_some())
    }

    fn load(&self, document: Value, _ruleset: &Ruleset) -> Result<PageObservation> {
        let msg: Message = serde_json::from_value(document)?;
        Ok(PageObservation {
            page_domain: if msg.domain.is_empty() {
                domain::extract_domain(&msg.url).unwrap_or_default()
            } else {
                msg.domain
            },
            page_url: msg.url,
            observed_at_epoch_millis: msg.timestamp,
            cookies: CookieSurface {
                count: msg.cookies.count,
                tracking_count: msg.cookies.tracking,
                functional_count: msg.cookies.functional,
                session_count: msg.cookies.session,
                persistent_count: msg.cookies.persistent,
                items: msg
                    .cookies
                    .items
                    .into_iter()
                    .map(|c| CookieRecord {
                        name: c.name,
                        domain: c.domain,
                        is_tracking: c.is_tracking,
                        is_session: c.is_session,
                        secure: c.secure,
                        http_only: c.http_only,
                    })
                    .collect(),
            },
            scripts: ScriptSurface {
                count: msg.scripts.count,
                tracking_count: msg.scripts.tracking,
                analytics_count: msg.scripts.analytics,
                items: msg
                    .scripts
                    .items
                    .into_iter()
                    .map(|s| ScriptRecord {
                        domain: s.domain.unwrap_or_else(|| domain_or_unknown(&s.src)),
                        classification: s
                            .kind
                            .as_deref()
                            .and_then(ScriptCategory::from_str_lenient)
                            .unwrap_or_default(),
                        service: None,
                        is_third_party: s.is_third_party,
                        source_url: s.src,
                    })
                    .collect(),
            },
            storage: StorageSurface {
                local_storage_entry_count: msg.storage.local_storage,
                session_storage_entry_count: msg.storage.session_storage,
                items: msg
                    .storage
                    .items
                    .into_iter()
                    .filter_map(|i| {
                        let storage_type = match i.kind.as_str() {
                            "localStorage" => StorageType::LocalStorage,
                            "sessionStorage" => StorageType::SessionStorage,
                            _ => return None,
                        };
                        Some(StorageRecord {
                            key: i.key,
                            storage_type,
                            size_bytes: i.size,
                        })
                    })
                    .collect(),
            },
            iframes: IframeSurface {
                count: msg.iframes.count,
                third_party_count: msg.iframes.third_party,
                items: msg
                    .iframes
                    .items
                    .into_iter()
                    .map(|f| {
                        let src = f.src.unwrap_or_default();
                        IframeRecord {
                            domain: f.domain.unwrap_or_else(|| domain_or_unknown(&src)),
                            source_url: src,
                            is_third_party: f.is_third_party,
                            is_sandboxed: f.sandbox,
                        }
                    })
                    .collect(),
            },
            fingerprinting: FingerprintingSignals {
                canvas_used: msg.fingerprinting.canvas,
                webgl_used: msg.fingerprinting.webgl,
                font_probing_detected: msg.fingerprinting.fonts,
            },
            ..Default::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn message() -> Value {
        json!({
            "url": "https://www.example.com/",
            "domain": "www.example.com",
            "timestamp": 1700000000000i64,
            "cookies": {"count": 3, "tracking": 2, "functional": 1,
                        "items": [{"name": "_ga", "isTracking": true}]},
            "scripts": {"count": 2, "tracking": 1, "analytics": 1,
                        "items": [{"src": "https://www.google-analytics.com/analytics.js",
                                   "domain": "www.google-analytics.com",
                                   "type": "analytics", "isThirdParty": true}]},
            "storage": {"localStorage": 4, "sessionStorage": 1,
                        "items": [{"key": "k", "type": "localStorage", "size": 10}]},
            "iframes": {"count": 1, "thirdParty": 1,
                        "items": [{"src": "https://ads.test/frame", "isThirdParty": true, "sandbox": false}]},
            "fingerprinting": {"canvas": true, "webgl": true, "fonts": false}
        })
    }

    #[test]
    fn maps_message_counts() {
        let doc = message();
        assert!(ExtensionMessageSource.detect(&doc));
        let obs = ExtensionMessageSource.load(doc, &Ruleset::builtin()).unwrap();
        assert_eq!(obs.page_domain, "www.example.com");
        assert_eq!(obs.cookies.tracking_count, 2);
        assert_eq!(obs.scripts.analytics_count, 1);
        assert_eq!(obs.storage.local_storage_entry_count, 4);
        assert_eq!(obs.iframes.third_party_count, 1);
        assert!(obs.fingerprinting.webgl_used);
        assert!(obs.validate().is_ok());
    }

    #[test]
    fn maps_message_items() {
        let obs = ExtensionMessageSource.load(message(), &Ruleset::builtin()).unwrap();
        assert_eq!(obs.scripts.items[0].classification, ScriptCategory::Analytics);
        assert_eq!(obs.storage.items[0].storage_type, StorageType::LocalStorage);
        assert_eq!(obs.iframes.items[0].domain, "ads.test");
    }

    #[test]
    fn background_cookie_total_alias() {
        let doc = json!({"url": "https://a.test/", "cookies": {"total": 2, "functional": 2, "session": 1, "persistent": 1}});
        let obs = ExtensionMessageSource.load(doc, &Ruleset::builtin()).unwrap();
        assert_eq!(obs.cookies.count, 2);
        assert_eq!(obs.cookies.session_count, 1);
        assert_eq!(obs.page_domain, "a.test");
    }

    #[test]
    fn ignores_native_observations() {
        assert!(!ExtensionMessageSource.detect(&json!({"page_url": "https://a.test/", "url": "x"})));
    }
}
