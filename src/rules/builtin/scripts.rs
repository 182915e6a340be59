use crate::rules::ScriptCategory::{self, Advertising, Analytics, Social};

/// (domain substring, category, tracking-related, analytics, service).
pub(super) const TABLE: &[(&str, ScriptCategory, bool, bool, &str)] = &[
    ("google-analytics.com", Analytics, true, true, "Google Analytics"),
    ("googletagmanager.com", Analytics, true, true, "Google Tag Manager"),
    ("facebook.com", Social, true, false, "Facebook Pixel"),
    ("facebook.net", Social, true, false, "Facebook SDK"),
    ("doubleclick.net", Advertising, true, false, "Google Ads"),
    ("googlesyndication.com", Advertising, true, false, "Google AdSense"),
    ("twitter.com", Social, true, false, "Twitter"),
    ("linkedin.com", Social, true, false, "LinkedIn"),
    ("amazon-adsystem.com", Advertising, true, false, "Amazon Ads"),
    ("hotjar.com", Analytics, true, true, "Hotjar"),
    ("mixpanel.com", Analytics, true, true, "Mixpanel"),
];
