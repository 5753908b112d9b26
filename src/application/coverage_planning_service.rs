use crate::common::{ApplicationError, ApplicationResult};
use crate::domains::coverage::{
    reduce_same_angle_segments, Cells, CoverageEngine, Path, PlanRequest, Route, RouteStrategy, SwathStrategy,
};
use crate::domains::logger::DynLogger;
use async_trait::async_trait;
use std::sync::Arc;

pub const SERVICE_NAME: &str = "Fields2Cover REST API";
pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result of a successful plan: the reduced path and its length.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedPath {
    pub path: Path,
    pub length: f64,
}

/// Inbound port used by the HTTP adapter.
#[async_trait]
pub trait PlanPathUseCase: Send + Sync {
    async fn plan_path(&self, request: PlanRequest) -> ApplicationResult<PlannedPath>;
}

#[derive(Clone)]
pub struct CoveragePlanningService {
    engine: Arc<dyn CoverageEngine>,
    logger: DynLogger,
    same_angle_tolerance: f64,
}

impl CoveragePlanningService {
    pub fn new(engine: Arc<dyn CoverageEngine>, logger: DynLogger, same_angle_tolerance: f64) -> Self {
        Self {
            engine,
            logger,
            same_angle_tolerance,
        }
    }

    /// Runs the full pipeline synchronously: headlands, swaths, ordering,
    /// turns, then both path reductions.
    pub fn plan(&self, request: &PlanRequest) -> ApplicationResult<PlannedPath> {
        let options = &request.options;
        let engine = self.engine.as_ref();

        let headlands = engine.generate_headlands(&request.field, options.headland_distance)?;

        let route = match options.route {
            RouteStrategy::Advanced => {
                let cells = match options.decompose_angle {
                    Some(angle) => {
                        let parts = engine.decompose(&headlands, angle)?;
                        self.logger.info(&format!(
                            "Decomposed {} cell(s) into {} at {:.3} rad",
                            headlands.len(),
                            parts.len(),
                            angle
                        ));
                        parts
                    }
                    None => headlands,
                };
                let swaths = engine.generate_swaths(&request.robot, &cells, options.swath)?;
                self.log_swaths(options.swath, swaths.len());
                let route = engine.plan_route(&cells, &swaths)?;
                self.logger.info("Using advanced route planner");
                if options.start_point % 2 == 0 {
                    route.reversed()
                } else {
                    route
                }
            }
            RouteStrategy::Sorted(order) => {
                // Single-cell orders only look at the first headland cell.
                let first = Cells::new(headlands.get(0).cloned().into_iter().collect());
                let swaths = engine.generate_swaths(&request.robot, &first, options.swath)?;
                self.log_swaths(options.swath, swaths.len());
                let sorted = engine.sort_swaths(&swaths, order, options.start_point)?;
                self.logger.info(&format!("Using {:?} swath order", order));
                Route::from_swaths(sorted)
            }
        };

        let mut path = engine.plan_path(&request.robot, &route)?;
        path.reduce(options.min_wp_distance);
        let path = reduce_same_angle_segments(&path, self.same_angle_tolerance);
        let length = path.length();
        self.logger.info(&format!("Planned {} waypoints, length {:.2}", path.size(), length));

        Ok(PlannedPath { path, length })
    }

    fn log_swaths(&self, strategy: SwathStrategy, count: usize) {
        match strategy {
            SwathStrategy::Angle(angle) => self.logger.info(&format!(
                "Generated {} swaths at {:.1} degrees",
                count,
                angle.to_degrees()
            )),
            SwathStrategy::Best(objective) => {
                self.logger
                    .info(&format!("Generated {} swaths with best angle ({:?})", count, objective))
            }
        }
    }
}

#[async_trait]
impl PlanPathUseCase for CoveragePlanningService {
    async fn plan_path(&self, request: PlanRequest) -> ApplicationResult<PlannedPath> {
        let service = self.clone();
        tokio::task::spawn_blocking(move || service.plan(&request))
            .await
            .map_err(|e| ApplicationError::Task(e.to_string()))?
    }
}
