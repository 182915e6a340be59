/// Substrings of analytics and ad-network cookie names.
pub(super) const NAME_MARKERS: &[&str] = &[
    "_ga",
    "_gid",
    "_gtm",
    "fbp",
    "fbq",
    "_fbp",
    "NID",
    "IDE",
    "__utma",
    "__utmb",
    "__utmc",
    "__utmz",
    "fr",
    "tr",
    "personalization_id",
    "guest_id",
];

/// Substrings of tracking-service cookie domains.
pub(super) const TRACKING_DOMAINS: &[&str] = &[
    "google-analytics.com",
    "googletagmanager.com",
    "facebook.com",
    "doubleclick.net",
    "googlesyndication.com",
    "twitter.com",
    "linkedin.com",
    "amazon-adsystem.com",
];
