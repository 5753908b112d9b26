use thiserror::Error;

/// Validation failures for an incoming plan request. These are reported to the
/// caller as a structured `{status: "error"}` body, never as a server fault.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RequestError {
    #[error("Robot (vehicle) data is required")]
    MissingVehicle,

    #[error("Invalid robot data: {reason}")]
    InvalidVehicle { reason: String },

    #[error("Invalid geometry: must be a MultiPolygon with coordinates")]
    InvalidGeometry,

    #[error("Invalid coordinate data: {0}")]
    InvalidCoordinates(String),

    #[error("Invalid swath type: {0}")]
    InvalidSwathType(String),

    #[error("Invalid route type: {0}")]
    InvalidRouteType(String),

    #[error("Invalid planning options: {reason}")]
    InvalidOptions { reason: String },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Degenerate cell: {reason}")]
    DegenerateCell { reason: String },

    #[error("Headland distance {distance} leaves no area to cover")]
    FieldConsumedByHeadland { distance: f64 },

    #[error("No swaths could be generated for the field")]
    NoSwaths,

    #[error("Invalid robot: {reason}")]
    InvalidRobot { reason: String },

    #[error("Turn planning failed: {reason}")]
    TurnPlanning { reason: String },

    #[error("Engine failure: {0}")]
    Internal(String),
}

#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error(transparent)]
    Request(#[from] RequestError),

    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("Planning task failed: {0}")]
    Task(String),

    #[error("Configuration error: {0}")]
    Configuration(#[from] anyhow::Error),
}

pub type RequestResult<T> = Result<T, RequestError>;
pub type EngineResult<T> = Result<T, EngineError>;
pub type ApplicationResult<T> = Result<T, ApplicationError>;
