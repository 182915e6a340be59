use crate::observation::FingerprintingSignals;

/// System fonts probed for availability by the observation source.
pub const FONT_PROBE_SET: [&str; 5] = ["Arial", "Times New Roman", "Courier New", "Georgia", "Verdana"];

/// More detectable probe fonts than this indicates font probing.
pub const FONT_PROBING_THRESHOLD: usize = 3;

/// Reduce raw probe results to fingerprinting signals.
pub fn detect_fingerprinting(
    canvas_present: bool,
    webgl_available: bool,
    detected_font_count: usize,
) -> FingerprintingSignals {
    FingerprintingSignals {
        canvas_used: canvas_present,
        webgl_used: webgl_available,
        font_probing_detected: detected_font_count > FONT_PROBING_THRESHOLD,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn font_threshold_is_strict() {
        assert!(!detect_fingerprinting(false, false, 3).font_probing_detected);
        assert!(detect_fingerprinting(false, false, 4).font_probing_detected);
        assert!(detect_fingerprinting(false, false, FONT_PROBE_SET.len()).font_probing_detected);
    }

    #[test]
    fn canvas_and_webgl_pass_through() {
        let s = detect_fingerprinting(true, true, 0);
        assert!(s.canvas_used);
        assert!(s.webgl_used);
        assert!(!s.font_probing_detected);
    }
}
