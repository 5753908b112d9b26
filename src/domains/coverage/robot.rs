use serde::{Deserialize, Serialize};

/// Vehicle profile used for swath spacing and turn planning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Robot {
    pub width: f64,
    pub cov_width: f64,
    pub min_turning_radius: f64,
    /// Maximum curvature rate, derived from the turning radius.
    pub max_diff_curv: f64,
}

impl Robot {
    pub fn new(width: f64, cov_width: f64, min_turning_radius: f64) -> Self {
        Self {
            width,
            cov_width,
            min_turning_radius,
            max_diff_curv: min_turning_radius / 10.0,
        }
    }
}

impl Default for Robot {
    fn default() -> Self {
        Self::new(1.0, 1.0, 0.0)
    }
}
