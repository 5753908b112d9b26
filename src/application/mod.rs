pub mod coverage_planning_service;

pub use coverage_planning_service::*;
