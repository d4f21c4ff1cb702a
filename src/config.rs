use serde::{Deserialize, Serialize};

use crate::trace::ChainApprox;

/// Defaults for `HandConfig`.
pub const DEFAULT_TOP_N: usize = 1;
pub const DEFAULT_ANGLE_THRESHOLD: f32 = std::f32::consts::FRAC_PI_4;
pub const DEFAULT_MIN_DEFECT_DEPTH: f32 = 10.0;

/// Tunables for one run of the hand pipeline. Missing JSON fields fall back to the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandConfig {
    /// Largest contours kept per frame.
    pub top_n: usize,
    /// Radians. Defects with a larger included angle are dropped.
    pub angle_threshold: f32,
    /// Pixels. Only deeper defects are drawn in the overlay.
    pub min_defect_depth: f32,
    pub chain_approx: ChainApprox,
}

impl Default for HandConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            angle_threshold: DEFAULT_ANGLE_THRESHOLD,
            min_defect_depth: DEFAULT_MIN_DEFECT_DEPTH,
            chain_approx: ChainApprox::default(),
        }
    }
}

pub fn parse_config_json(json_text: &str) -> Result<HandConfig, serde_json::Error> {
    serde_json::from_str(json_text)
}
