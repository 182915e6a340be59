/// URL fragments typical of tracking pixels and beacons.
pub(super) const TRACKING_MARKERS: &[&str] = &["analytics", "tracking", "pixel", "beacon", "metrics"];
