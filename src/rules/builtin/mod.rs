mod cookies;
mod headers;
mod resources;
mod scripts;

use super::{CookieRule, ExposureRule, HeaderRule, ResourceRule, ScriptRule};

/// Built-in tracking-cookie markers: name markers first, then domains.
pub fn cookie_rules() -> Vec<CookieRule> {
    cookies::NAME_MARKERS
        .iter()
        .map(|p| CookieRule::name(*p))
        .chain(cookies::TRACKING_DOMAINS.iter().map(|d| CookieRule::domain(*d)))
        .collect()
}

/// Built-in script classification table, in evaluation order.
pub fn script_rules() -> Vec<ScriptRule> {
    scripts::TABLE
        .iter()
        .map(|&(domain, category, tracking, analytics, service)| {
            ScriptRule::new(domain, category, tracking, analytics, service)
        })
        .collect()
}

/// Built-in tracking pixel and beacon markers.
pub fn resource_rules() -> Vec<ResourceRule> {
    resources::TRACKING_MARKERS
        .iter()
        .map(|m| ResourceRule::new(*m))
        .collect()
}

/// Built-in security header checks.
pub fn header_rules() -> Vec<HeaderRule> {
    headers::security_headers()
        .into_iter()
        .map(|(header, label, requirement)| HeaderRule::new(header, label, requirement))
        .collect()
}

/// Built-in information-exposure checks.
pub fn exposure_rules() -> Vec<ExposureRule> {
    headers::EXPOSURES
        .iter()
        .map(|&(header, longer_than, description)| ExposureRule::new(header, longer_than, description))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_tables_are_populated() {
        assert_eq!(cookie_rules().len(), 24);
        assert_eq!(script_rules().len(), 11);
        assert_eq!(resource_rules().len(), 5);
        assert_eq!(header_rules().len(), 7);
        assert_eq!(exposure_rules().len(), 2);
    }

    #[test]
    fn every_builtin_script_rule_is_tracking_related() {
        assert!(script_rules().iter().all(|r| r.is_tracking_related));
    }
}
