use super::geometry::Cells;
use super::options::{SwathOrder, SwathStrategy};
use super::path::Path;
use super::robot::Robot;
use super::route::Route;
use super::swath::Swaths;
use crate::common::EngineResult;

/// Port the coverage domain depends on for all geometry work.
/// Implementations (adapters) wrap a concrete coverage-planning engine.
pub trait CoverageEngine: Send + Sync {
    /// Shrinks every cell by `distance`, leaving room for turning.
    fn generate_headlands(&self, field: &Cells, distance: f64) -> EngineResult<Cells>;

    /// Splits cells along lines at `split_angle` (radians).
    fn decompose(&self, cells: &Cells, split_angle: f64) -> EngineResult<Cells>;

    fn generate_swaths(&self, robot: &Robot, cells: &Cells, strategy: SwathStrategy) -> EngineResult<Swaths>;

    /// Orders a single cell's swaths. `variant` selects the starting corner.
    fn sort_swaths(&self, swaths: &Swaths, order: SwathOrder, variant: u32) -> EngineResult<Swaths>;

    /// Orders swaths across several cells and adds the connections between them.
    fn plan_route(&self, cells: &Cells, swaths: &Swaths) -> EngineResult<Route>;

    /// Joins the route's swaths and connections with turns the robot can drive.
    fn plan_path(&self, robot: &Robot, route: &Route) -> EngineResult<Path>;
}
