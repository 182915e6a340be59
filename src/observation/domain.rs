//! URL and host helpers shared by the observation builder and observation
//! validation.

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

static DOMAIN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?\.)*[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?$",
    )
    .unwrap()
});

/// Placeholder domain for sources whose URL cannot be parsed.
pub const UNKNOWN_DOMAIN: &str = "unknown";

/// Prefix `https://` when the URL has no http(s) scheme.
pub fn normalize_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}

/// Whether the (normalized) URL has both a scheme and a host.
pub fn validate_url(raw: &str) -> bool {
    if raw.trim().is_empty() {
        return false;
    }
    Url::parse(&normalize_url(raw))
        .map(|u| u.host_str().is_some_and(|h| !h.is_empty()))
        .unwrap_or(false)
}

/// Host of an absolute URL, lowercased. `None` for relative or malformed URLs.
pub fn extract_domain(raw: &str) -> Option<String> {
    Url::parse(raw)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_ascii_lowercase()))
}

/// Host of a URL, or [`UNKNOWN_DOMAIN`].
pub fn domain_or_unknown(raw: &str) -> String {
    extract_domain(raw).unwrap_or_else(|| UNKNOWN_DOMAIN.to_string())
}

/// Syntactic check of a DNS host name.
pub fn is_valid_domain(domain: &str) -> bool {
    !domain.is_empty() && domain.len() <= 253 && DOMAIN_RE.is_match(domain)
}

/// Whether a resource URL is served from outside the page's own domain.
///
/// An empty source (inline frame) and relative URLs count as first party.
/// Subdomains of the page domain count as first party. With no known page
/// domain nothing can be attributed to a third party.
pub fn is_third_party(source_url: &str, page_domain: &str) -> bool {
    if source_url.trim().is_empty() {
        return false;
    }
    let Some(host) = extract_domain(source_url) else {
        return false;
    };
    let page = page_domain.trim().trim_end_matches('.').to_ascii_lowercase();
    if page.is_empty() {
        return false;
    }
    !(host == page || host.ends_with(&format!(".{page}")))
}

/// Shorten `text` to at most `max_len` characters, ending with `...`.
pub fn truncate(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    let keep = max_len.saturating_sub(3);
    let mut out: String = text.chars().take(keep).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_adds_scheme() {
        assert_eq!(normalize_url("example.com"), "https://example.com");
        assert_eq!(normalize_url("http://example.com"), "http://example.com");
    }

    #[test]
    fn validate_rejects_empty_and_hostless() {
        assert!(validate_url("example.com/path"));
        assert!(!validate_url(""));
        assert!(!validate_url("https://"));
    }

    #[test]
    fn extract_domain_lowercases_host() {
        assert_eq!(
            extract_domain("https://WWW.Google-Analytics.com/analytics.js").as_deref(),
            Some("www.google-analytics.com")
        );
        assert_eq!(extract_domain("/static/app.js"), None);
        assert_eq!(domain_or_unknown("not a url"), "unknown");
    }

    #[test]
    fn domain_syntax() {
        assert!(is_valid_domain("news.example.co.uk"));
        assert!(!is_valid_domain("-bad.example.com"));
        assert!(!is_valid_domain("exa mple.com"));
        assert!(!is_valid_domain(""));
    }

    #[test]
    fn third_party_detection() {
        assert!(is_third_party("https://www.youtube.com/embed/x", "example.com"));
        assert!(!is_third_party("https://example.com/widget", "example.com"));
        assert!(!is_third_party("https://cdn.example.com/a.js", "example.com"));
        assert!(!is_third_party("", "example.com"));
        assert!(!is_third_party("/local/frame.html", "example.com"));
        // Suffix match must respect label boundaries.
        assert!(is_third_party("https://badexample.com/x", "example.com"));
    }

    #[test]
    fn unknown_page_domain_is_first_party() {
        assert!(!is_third_party("https://www.youtube.com/embed/x", ""));
        assert!(!is_third_party("https://ads.test/frame", "  "));
    }

    #[test]
    fn truncate_long_text() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghijkl", 8), "abcde...");
    }
}
