use super::geometry::Cells;
use super::robot::Robot;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwathGeneratorType {
    NSwath = 0,
    SwathLength = 1,
    Angle = 2,
}

impl SwathGeneratorType {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::NSwath),
            1 => Some(Self::SwathLength),
            2 => Some(Self::Angle),
            _ => None,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().replace('_', "-").as_str() {
            "n-swath" | "nswath" => Some(Self::NSwath),
            "swath-length" | "length" => Some(Self::SwathLength),
            "angle" => Some(Self::Angle),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RouteGeneratorType {
    Advanced = 0,
    Boustrophedon = 1,
    Snake = 2,
    Spiral = 3,
}

impl RouteGeneratorType {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Advanced),
            1 => Some(Self::Boustrophedon),
            2 => Some(Self::Snake),
            3 => Some(Self::Spiral),
            _ => None,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "advanced" => Some(Self::Advanced),
            "boustrophedon" => Some(Self::Boustrophedon),
            "snake" => Some(Self::Snake),
            "spiral" => Some(Self::Spiral),
            _ => None,
        }
    }
}

/// What the brute-force swath search minimizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwathObjective {
    SwathCount,
    SwathLength,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SwathStrategy {
    /// Fixed swath direction in radians.
    Angle(f64),
    Best(SwathObjective),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwathOrder {
    Boustrophedon,
    Snake,
    Spiral { size: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RouteStrategy {
    /// Multi-cell route planned by the engine.
    Advanced,
    Sorted(SwathOrder),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanOptions {
    pub headland_distance: f64,
    pub swath: SwathStrategy,
    pub route: RouteStrategy,
    pub start_point: u32,
    /// Split angle in radians; only honored by the advanced route.
    pub decompose_angle: Option<f64>,
    pub min_wp_distance: f64,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            headland_distance: 0.0,
            swath: SwathStrategy::Best(SwathObjective::SwathLength),
            route: RouteStrategy::Sorted(SwathOrder::Boustrophedon),
            start_point: 1,
            decompose_angle: None,
            min_wp_distance: 1.0,
        }
    }
}

/// A validated plan request, ready for the planning service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRequest {
    pub robot: Robot,
    pub field: Cells,
    pub options: PlanOptions,
}
