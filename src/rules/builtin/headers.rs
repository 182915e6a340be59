use crate::rules::HeaderRequirement;

pub(super) fn security_headers() -> Vec<(&'static str, &'static str, HeaderRequirement)> {
    vec![
        (
            "strict-transport-security",
            "HSTS",
            HeaderRequirement::Contains {
                any: vec!["max-age=".into()],
            },
        ),
        (
            "content-security-policy",
            "CSP",
            HeaderRequirement::MinLength { chars: 11 },
        ),
        (
            "x-frame-options",
            "X-Frame-Options",
            HeaderRequirement::OneOf {
                values: vec!["deny".into(), "sameorigin".into()],
            },
        ),
        ("x-content-type-options", "X-Content-Type-Options", HeaderRequirement::Present),
        (
            "referrer-policy",
            "Referrer-Policy",
            HeaderRequirement::Contains {
                any: vec!["no-referrer".into(), "same-origin".into(), "strict-origin".into()],
            },
        ),
        ("permissions-policy", "Permissions-Policy", HeaderRequirement::Present),
        ("x-xss-protection", "X-XSS-Protection", HeaderRequirement::Present),
    ]
}

/// (header, exposed when longer than, description).
pub(super) const EXPOSURES: &[(&str, usize, &str)] = &[
    ("server", 20, "Detailed server information exposed"),
    ("x-powered-by", 0, "Technology stack exposed"),
];
