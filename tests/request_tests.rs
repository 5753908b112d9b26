use coverage_planner::adapters::inbound::parse_plan_request;
use coverage_planner::adapters::outbound::{init_noop_logger, PlanarEngine};
use coverage_planner::application::CoveragePlanningService;
use coverage_planner::common::RequestError;
use coverage_planner::domains::coverage::*;
use serde_json::{json, Map, Value};
use std::sync::Arc;

fn body(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("Expected object, got {}", other),
    }
}

fn square() -> Value {
    json!({
        "type": "MultiPolygon",
        "coordinates": [[[[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0], [0.0, 0.0]]]]
    })
}

fn base() -> Map<String, Value> {
    body(json!({
        "robot": { "width": 2.0, "cov-width": 1.5, "min-turning-radius": 0.5 },
        "geometry": square()
    }))
}

#[test]
fn test_defaults() {
    let request = parse_plan_request(&base()).unwrap();

    assert_eq!(request.robot, Robot::new(2.0, 1.5, 0.5));
    assert_eq!(request.field.len(), 1);
    assert_eq!(request.field.get(0).map(|c| c.outer.len()), Some(4));
    assert_eq!(request.options, PlanOptions::default());
}

#[test]
fn test_missing_robot() {
    let mut request = base();
    request.remove("robot");
    let err = parse_plan_request(&request).unwrap_err();

    assert_eq!(err, RequestError::MissingVehicle);
    assert_eq!(err.to_string(), "Robot (vehicle) data is required");
}

#[test]
fn test_empty_robot_counts_as_missing() {
    let mut request = base();
    request.insert("robot".to_string(), json!({}));
    assert_eq!(parse_plan_request(&request).unwrap_err(), RequestError::MissingVehicle);
}

#[test]
fn test_robot_camel_case_aliases() {
    let mut request = base();
    request.insert("robot".to_string(), json!({ "covWidth": 3.0, "minTurningRadius": 2.0 }));
    let parsed = parse_plan_request(&request).unwrap();

    assert_eq!(parsed.robot.width, 1.0);
    assert_eq!(parsed.robot.cov_width, 3.0);
    assert_eq!(parsed.robot.min_turning_radius, 2.0);
}

#[test]
fn test_robot_with_bad_field_type() {
    let mut request = base();
    request.insert("robot".to_string(), json!({ "width": "wide" }));
    assert!(matches!(
        parse_plan_request(&request).unwrap_err(),
        RequestError::InvalidVehicle { .. }
    ));
}

#[test]
fn test_non_positive_coverage_width() {
    let mut request = base();
    request.insert("robot".to_string(), json!({ "cov-width": 0.0, "width": 1.0 }));
    assert!(matches!(
        parse_plan_request(&request).unwrap_err(),
        RequestError::InvalidVehicle { .. }
    ));
}

#[test]
fn test_geometry_must_be_multipolygon() {
    let mut request = base();
    request.insert(
        "geometry".to_string(),
        json!({ "type": "Polygon", "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]] }),
    );
    let err = parse_plan_request(&request).unwrap_err();

    assert_eq!(err, RequestError::InvalidGeometry);
    assert_eq!(err.to_string(), "Invalid geometry: must be a MultiPolygon with coordinates");
}

#[test]
fn test_geometry_missing_or_empty_coordinates() {
    let mut request = base();
    request.remove("geometry");
    assert_eq!(parse_plan_request(&request).unwrap_err(), RequestError::InvalidGeometry);

    request.insert("geometry".to_string(), json!({ "type": "MultiPolygon", "coordinates": [] }));
    assert_eq!(parse_plan_request(&request).unwrap_err(), RequestError::InvalidGeometry);
}

#[test]
fn test_malformed_coordinates() {
    let mut request = base();
    request.insert(
        "geometry".to_string(),
        json!({ "type": "MultiPolygon", "coordinates": [[[[0.0], [1.0, 0.0], [1.0, 1.0]]]] }),
    );
    assert!(matches!(
        parse_plan_request(&request).unwrap_err(),
        RequestError::InvalidCoordinates(_)
    ));

    request.insert(
        "geometry".to_string(),
        json!({ "type": "MultiPolygon", "coordinates": [[[["a", "b"]]]] }),
    );
    assert!(matches!(
        parse_plan_request(&request).unwrap_err(),
        RequestError::InvalidCoordinates(_)
    ));
}

#[test]
fn test_ring_needs_three_distinct_points() {
    let mut request = base();
    request.insert(
        "geometry".to_string(),
        json!({ "type": "MultiPolygon", "coordinates": [[[[0.0, 0.0], [1.0, 0.0], [0.0, 0.0]]]] }),
    );
    assert!(matches!(
        parse_plan_request(&request).unwrap_err(),
        RequestError::InvalidCoordinates(_)
    ));
}

#[test]
fn test_each_polygon_becomes_a_cell_with_holes() {
    let mut request = base();
    request.insert(
        "geometry".to_string(),
        json!({
            "type": "MultiPolygon",
            "coordinates": [
                [
                    [[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0], [0.0, 0.0]],
                    [[4.0, 4.0], [4.0, 6.0], [6.0, 6.0], [6.0, 4.0], [4.0, 4.0]]
                ],
                [
                    [[20.0, 0.0], [30.0, 0.0], [30.0, 10.0], [20.0, 0.0]]
                ]
            ]
        }),
    );
    let parsed = parse_plan_request(&request).unwrap();

    assert_eq!(parsed.field.len(), 2);
    assert_eq!(parsed.field.get(0).map(|c| c.holes.len()), Some(1));
    assert_eq!(parsed.field.get(1).map(|c| c.holes.len()), Some(0));
}

#[test]
fn test_swath_and_route_codes() {
    let mut request = base();
    request.insert("swath".to_string(), json!({ "type": 2, "angle": 90.0 }));
    request.insert("route".to_string(), json!({ "type": 3, "spirals": 4, "startpoint": 2 }));
    let options = parse_plan_request(&request).unwrap().options;

    match options.swath {
        SwathStrategy::Angle(angle) => assert!((angle - std::f64::consts::FRAC_PI_2).abs() < 1e-12),
        other => panic!("Expected fixed angle, got {:?}", other),
    }
    assert_eq!(options.route, RouteStrategy::Sorted(SwathOrder::Spiral { size: 4 }));
    assert_eq!(options.start_point, 2);
}

#[test]
fn test_swath_and_route_names() {
    let mut request = base();
    request.insert("swath".to_string(), json!({ "type": "n-swath" }));
    request.insert("route".to_string(), json!({ "type": "snake" }));
    let options = parse_plan_request(&request).unwrap().options;

    assert_eq!(options.swath, SwathStrategy::Best(SwathObjective::SwathCount));
    assert_eq!(options.route, RouteStrategy::Sorted(SwathOrder::Snake));
}

#[test]
fn test_unknown_swath_and_route_types() {
    let mut request = base();
    request.insert("swath".to_string(), json!({ "type": 7 }));
    assert!(matches!(
        parse_plan_request(&request).unwrap_err(),
        RequestError::InvalidSwathType(_)
    ));

    let mut request = base();
    request.insert("route".to_string(), json!({ "type": "zigzag" }));
    assert!(matches!(
        parse_plan_request(&request).unwrap_err(),
        RequestError::InvalidRouteType(_)
    ));
}

#[test]
fn test_invalid_route_options() {
    let mut request = base();
    request.insert("route".to_string(), json!({ "type": 3, "spirals": 1 }));
    assert!(matches!(
        parse_plan_request(&request).unwrap_err(),
        RequestError::InvalidOptions { .. }
    ));

    let mut request = base();
    request.insert("route".to_string(), json!({ "startpoint": -1 }));
    assert!(matches!(
        parse_plan_request(&request).unwrap_err(),
        RequestError::InvalidOptions { .. }
    ));
}

#[test]
fn test_advanced_options_and_top_level_fallbacks() {
    let mut request = base();
    request.insert("route".to_string(), json!({ "type": 0 }));
    request.insert("decomposeAngle".to_string(), json!(90.0));
    request.insert("minWpDistance".to_string(), json!(0.25));
    request.insert("headlandDistance".to_string(), json!(1.5));
    let options = parse_plan_request(&request).unwrap().options;

    assert_eq!(options.route, RouteStrategy::Advanced);
    assert!((options.decompose_angle.unwrap() - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    assert_eq!(options.min_wp_distance, 0.25);
    assert_eq!(options.headland_distance, 1.5);
}

#[test]
fn test_route_section_wins_over_top_level() {
    let mut request = base();
    request.insert("route".to_string(), json!({ "type": 0, "decompose-angle": -1.0, "min-wp-distance": 2.0 }));
    request.insert("decompose-angle".to_string(), json!(45.0));
    request.insert("min-wp-distance".to_string(), json!(0.1));
    request.insert("headland-dist".to_string(), json!(0.5));
    let options = parse_plan_request(&request).unwrap().options;

    assert_eq!(options.decompose_angle, None);
    assert_eq!(options.min_wp_distance, 2.0);
    assert_eq!(options.headland_distance, 0.5);
}

#[test]
fn test_whole_float_type_codes_are_accepted() {
    let mut request = base();
    request.insert("swath".to_string(), json!({ "type": 0.0 }));
    request.insert("route".to_string(), json!({ "type": 2.0 }));
    let options = parse_plan_request(&request).unwrap().options;

    assert_eq!(options.swath, SwathStrategy::Best(SwathObjective::SwathCount));
    assert_eq!(options.route, RouteStrategy::Sorted(SwathOrder::Snake));

    request.insert("route".to_string(), json!({ "type": 1.5 }));
    assert!(matches!(
        parse_plan_request(&request).unwrap_err(),
        RequestError::InvalidRouteType(_)
    ));
}

#[test]
fn test_coverage_width_too_small_for_field() {
    let mut request = base();
    request.insert("robot".to_string(), json!({ "cov-width": 1e-5 }));
    request.insert(
        "geometry".to_string(),
        json!({
            "type": "MultiPolygon",
            "coordinates": [[[[0.0, 0.0], [100.0, 0.0], [100.0, 100.0], [0.0, 100.0], [0.0, 0.0]]]]
        }),
    );
    let err = parse_plan_request(&request).unwrap_err();

    assert!(matches!(err, RequestError::InvalidVehicle { .. }));
    assert!(err.to_string().starts_with("Invalid robot data"));

    // A sensible width on the same field is fine.
    request.insert("robot".to_string(), json!({ "cov-width": 0.5 }));
    assert!(parse_plan_request(&request).is_ok());
}

#[test]
fn test_sorted_route_plans_only_the_first_polygon() {
    let mut request = base();
    request.insert("robot".to_string(), json!({ "cov-width": 1.0 }));
    request.insert(
        "geometry".to_string(),
        json!({
            "type": "MultiPolygon",
            "coordinates": [
                [[[0.0, 0.0], [10.0, 0.0], [10.0, 4.0], [0.0, 4.0], [0.0, 0.0]]],
                [[[20.0, 0.0], [30.0, 0.0], [30.0, 4.0], [20.0, 4.0], [20.0, 0.0]]]
            ]
        }),
    );
    request.insert("swath".to_string(), json!({ "type": 2, "angle": 0.0 }));
    request.insert("route".to_string(), json!({ "type": "boustrophedon" }));
    let parsed = parse_plan_request(&request).unwrap();
    assert_eq!(parsed.field.len(), 2);

    let service = CoveragePlanningService::new(Arc::new(PlanarEngine::default()), init_noop_logger(), 1e-3);
    let planned = service.plan(&parsed).unwrap();

    assert!(planned.path.states.iter().all(|s| s.point.x <= 10.0 + 1e-9));
    assert!((planned.length - 43.0).abs() < 1e-6);
}
