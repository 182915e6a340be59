use serde::{Deserialize, Serialize};

/// Fingerprinting surfaces detected on the page.
///
/// Reported for display only; none of these affect the numeric score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FingerprintingSignals {
    #[serde(default)]
    pub canvas_used: bool,
    #[serde(default)]
    pub webgl_used: bool,
    #[serde(default)]
    pub font_probing_detected: bool,
}

impl FingerprintingSignals {
    pub fn any(&self) -> bool {
        self.canvas_used || self.webgl_used || self.font_probing_detected
    }

    /// Names of the techniques present, in a fixed order.
    pub fn techniques(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if self.canvas_used {
            out.push("canvas");
        }
        if self.webgl_used {
            out.push("webgl");
        }
        if self.font_probing_detected {
            out.push("font probing");
        }
        out
    }
}
