//! Pure-Rust planar coverage engine.
//!
//! Modules:
//! - headland: inward polygon offset of each cell
//! - swaths: scan-line swath generation and brute-force angle search
//! - decomposition: boustrophedon cell decomposition
//! - ordering: single-cell swath orders and the multi-cell route
//! - dubins: shortest Dubins curves
//! - path_planning: route to drivable path

pub mod decomposition;
pub mod dubins;
pub mod headland;
pub mod ordering;
pub mod path_planning;
pub mod swaths;

use crate::common::{EngineError, EngineResult};
use crate::config::PlanningConfig;
use crate::domains::coverage::{
    Cells, CoverageEngine, Path, Robot, Route, SwathOrder, SwathStrategy, Swaths,
};

#[derive(Debug, Clone)]
pub struct PlanarEngine {
    /// Angle increment (degrees) of the best-swath search.
    pub angle_step_deg: f64,
    /// Arc length between sampled turn states.
    pub turn_step: f64,
}

impl PlanarEngine {
    pub fn new(angle_step_deg: f64, turn_step: f64) -> Self {
        Self { angle_step_deg, turn_step }
    }

    pub fn from_config(config: &PlanningConfig) -> Self {
        Self::new(config.angle_step_deg, config.turn_step)
    }
}

impl Default for PlanarEngine {
    fn default() -> Self {
        Self::from_config(&PlanningConfig::default())
    }
}

impl CoverageEngine for PlanarEngine {
    fn generate_headlands(&self, field: &Cells, distance: f64) -> EngineResult<Cells> {
        headland::shrink_cells(field, distance)
    }

    fn decompose(&self, cells: &Cells, split_angle: f64) -> EngineResult<Cells> {
        let parts = decomposition::decompose(cells, split_angle);
        if parts.is_empty() {
            return Err(EngineError::DegenerateCell {
                reason: "decomposition produced no cells".to_string(),
            });
        }
        Ok(parts)
    }

    fn generate_swaths(&self, robot: &Robot, cells: &Cells, strategy: SwathStrategy) -> EngineResult<Swaths> {
        if !(robot.cov_width > 0.0) {
            return Err(EngineError::InvalidRobot {
                reason: format!("coverage width must be positive, got {}", robot.cov_width),
            });
        }
        let mut all = Swaths::default();
        for (cell_id, cell) in cells.iter().enumerate() {
            let generated = match strategy {
                SwathStrategy::Angle(angle) => swaths::swaths_at_angle(cell, cell_id, robot.cov_width, angle),
                SwathStrategy::Best(objective) => {
                    swaths::best_swaths(cell, cell_id, robot.cov_width, objective, self.angle_step_deg)
                }
            };
            generated.into_iter().for_each(|s| all.push(s));
        }
        if all.is_empty() {
            return Err(EngineError::NoSwaths);
        }
        Ok(all)
    }

    fn sort_swaths(&self, swaths: &Swaths, order: SwathOrder, variant: u32) -> EngineResult<Swaths> {
        Ok(ordering::sort_swaths(swaths, order, variant))
    }

    fn plan_route(&self, cells: &Cells, swaths: &Swaths) -> EngineResult<Route> {
        if let Some(stray) = swaths.iter().find(|s| s.cell_id >= cells.len()) {
            return Err(EngineError::Internal(format!(
                "swath refers to cell {} but only {} cells were given",
                stray.cell_id,
                cells.len()
            )));
        }
        ordering::plan_route(swaths)
    }

    fn plan_path(&self, robot: &Robot, route: &Route) -> EngineResult<Path> {
        path_planning::plan_path(robot, route, self.turn_step)
    }
}
