use crate::common::{RequestError, RequestResult};
use crate::domains::coverage::{
    Cell, Cells, LinearRing, PlanOptions, PlanRequest, Point, Robot, RouteGeneratorType, RouteStrategy,
    SwathGeneratorType, SwathObjective, SwathOrder, SwathStrategy,
};
use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
#[serde(default)]
struct RobotBody {
    width: f64,
    #[serde(rename = "cov-width", alias = "covWidth", alias = "cov_width")]
    cov_width: f64,
    #[serde(rename = "min-turning-radius", alias = "minTurningRadius", alias = "min_turning_radius")]
    min_turning_radius: f64,
}

impl Default for RobotBody {
    fn default() -> Self {
        Self {
            width: 1.0,
            cov_width: 1.0,
            min_turning_radius: 0.0,
        }
    }
}

/// Mode selector, either the numeric code or its name.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum ModeTag {
    Code(i64),
    Float(f64),
    Name(String),
}

impl std::fmt::Display for ModeTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModeTag::Code(code) => write!(f, "{}", code),
            ModeTag::Float(value) => write!(f, "{}", value),
            ModeTag::Name(name) => write!(f, "{:?}", name),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SwathBody {
    #[serde(rename = "type")]
    kind: Option<ModeTag>,
    /// Degrees.
    angle: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RouteBody {
    #[serde(rename = "type")]
    kind: Option<ModeTag>,
    spirals: Option<i64>,
    startpoint: Option<i64>,
    #[serde(rename = "decompose-angle", alias = "decomposeAngle")]
    decompose_angle: Option<f64>,
    #[serde(rename = "min-wp-distance", alias = "minWpDistance")]
    min_wp_distance: Option<f64>,
}

/// Upper bound on parallel passes across the field extent. Keeps the swath
/// angle sweep bounded for tiny coverage widths.
pub const MAX_SWATH_PASSES: f64 = 10_000.0;

const HEADLAND_KEYS: &[&str] = &["headlandDistance", "headland-dist"];
const DECOMPOSE_KEYS: &[&str] = &["decompose-angle", "decomposeAngle"];
const MIN_WP_KEYS: &[&str] = &["min-wp-distance", "minWpDistance"];

/// Null, false, 0, "" and empty containers all count as absent.
fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map(|v| v != 0.0).unwrap_or(true),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(a)) => !a.is_empty(),
        Some(Value::Object(o)) => !o.is_empty(),
    }
}

fn top_level_number(body: &Map<String, Value>, keys: &[&str]) -> RequestResult<Option<f64>> {
    for key in keys {
        match body.get(*key) {
            None | Some(Value::Null) => continue,
            Some(value) => {
                return value.as_f64().map(Some).ok_or_else(|| RequestError::InvalidOptions {
                    reason: format!("'{}' must be a number, got {}", key, value),
                })
            }
        }
    }
    Ok(None)
}

/// Validates a `POST /plan-path` body and translates it into a [`PlanRequest`].
pub fn parse_plan_request(body: &Map<String, Value>) -> RequestResult<PlanRequest> {
    let robot = parse_robot(body.get("robot"))?;
    let field = parse_field(body.get("geometry"))?;
    check_pass_count(&robot, &field)?;
    let options = parse_options(body)?;
    Ok(PlanRequest { robot, field, options })
}

pub fn parse_robot(value: Option<&Value>) -> RequestResult<Robot> {
    if !is_present(value) {
        return Err(RequestError::MissingVehicle);
    }
    let body: RobotBody = match value {
        Some(v @ Value::Object(_)) => {
            serde_json::from_value(v.clone()).map_err(|e| RequestError::InvalidVehicle { reason: e.to_string() })?
        }
        Some(other) => {
            return Err(RequestError::InvalidVehicle {
                reason: format!("expected an object, got {}", other),
            })
        }
        None => return Err(RequestError::MissingVehicle),
    };
    if !(body.cov_width > 0.0) {
        return Err(RequestError::InvalidVehicle {
            reason: format!("cov-width must be positive, got {}", body.cov_width),
        });
    }
    if body.min_turning_radius < 0.0 {
        return Err(RequestError::InvalidVehicle {
            reason: format!("min-turning-radius must not be negative, got {}", body.min_turning_radius),
        });
    }
    Ok(Robot::new(body.width, body.cov_width, body.min_turning_radius))
}

fn check_pass_count(robot: &Robot, field: &Cells) -> RequestResult<()> {
    let (min_x, min_y, max_x, max_y) = field.iter().map(Cell::bounds).fold(
        (f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        |(a, b, c, d), (min_x, min_y, max_x, max_y)| (a.min(min_x), b.min(min_y), c.max(max_x), d.max(max_y)),
    );
    let extent = (max_x - min_x).hypot(max_y - min_y);
    if !(extent / robot.cov_width <= MAX_SWATH_PASSES) {
        return Err(RequestError::InvalidVehicle {
            reason: format!(
                "cov-width {} is too small for a field spanning {:.1}; at most {} passes are planned",
                robot.cov_width, extent, MAX_SWATH_PASSES
            ),
        });
    }
    Ok(())
}

/// GeoJSON MultiPolygon to cells: one cell per polygon, first ring outer,
/// remaining rings holes.
pub fn parse_field(value: Option<&Value>) -> RequestResult<Cells> {
    let Some(Value::Object(object)) = value else {
        return Err(RequestError::InvalidGeometry);
    };
    if object.get("type").and_then(Value::as_str) != Some("MultiPolygon") || !is_present(object.get("coordinates")) {
        return Err(RequestError::InvalidGeometry);
    }
    let geometry = geojson::Geometry::from_json_object(object.clone())
        .map_err(|e| RequestError::InvalidCoordinates(e.to_string()))?;
    let geojson::Value::MultiPolygon(polygons) = geometry.value else {
        return Err(RequestError::InvalidGeometry);
    };

    let mut cells = Vec::with_capacity(polygons.len());
    for (p, polygon) in polygons.iter().enumerate() {
        let mut rings = Vec::with_capacity(polygon.len());
        for (r, ring) in polygon.iter().enumerate() {
            rings.push(parse_ring(ring, p, r)?);
        }
        let cell = Cell::from_rings(rings)
            .ok_or_else(|| RequestError::InvalidCoordinates(format!("polygon {} has no rings", p)))?;
        cells.push(cell);
    }
    Ok(Cells::new(cells))
}

fn parse_ring(positions: &[geojson::Position], polygon: usize, ring: usize) -> RequestResult<LinearRing> {
    let mut points = Vec::with_capacity(positions.len());
    for (i, position) in positions.iter().enumerate() {
        match position.as_slice() {
            [x, y, ..] => points.push(Point::new(*x, *y)),
            short => {
                return Err(RequestError::InvalidCoordinates(format!(
                    "position {} of ring {} in polygon {} has {} value(s), expected at least 2",
                    i,
                    ring,
                    polygon,
                    short.len()
                )))
            }
        }
    }
    let ring_points = LinearRing::new(points);
    if ring_points.len() < 3 {
        return Err(RequestError::InvalidCoordinates(format!(
            "ring {} of polygon {} needs at least 3 distinct positions",
            ring, polygon
        )));
    }
    Ok(ring_points)
}

fn section<T: Default + for<'de> Deserialize<'de>>(
    value: Option<&Value>,
    on_error: impl FnOnce(String) -> RequestError,
) -> RequestResult<T> {
    match value {
        None | Some(Value::Null) => Ok(T::default()),
        Some(v) => serde_json::from_value(v.clone()).map_err(|e| on_error(e.to_string())),
    }
}

pub fn parse_options(body: &Map<String, Value>) -> RequestResult<PlanOptions> {
    let swath_body: SwathBody = section(body.get("swath"), RequestError::InvalidSwathType)?;
    let route_body: RouteBody = section(body.get("route"), |reason| RequestError::InvalidOptions { reason })?;

    let swath_type = match &swath_body.kind {
        None => SwathGeneratorType::SwathLength,
        Some(tag) => resolve_tag(tag, SwathGeneratorType::from_code, SwathGeneratorType::from_name)
            .ok_or_else(|| RequestError::InvalidSwathType(tag.to_string()))?,
    };
    let swath = match swath_type {
        SwathGeneratorType::Angle => SwathStrategy::Angle(swath_body.angle.to_radians()),
        SwathGeneratorType::NSwath => SwathStrategy::Best(SwathObjective::SwathCount),
        SwathGeneratorType::SwathLength => SwathStrategy::Best(SwathObjective::SwathLength),
    };

    let route_type = match &route_body.kind {
        None => RouteGeneratorType::Boustrophedon,
        Some(tag) => resolve_tag(tag, RouteGeneratorType::from_code, RouteGeneratorType::from_name)
            .ok_or_else(|| RequestError::InvalidRouteType(tag.to_string()))?,
    };
    let route = match route_type {
        RouteGeneratorType::Advanced => RouteStrategy::Advanced,
        RouteGeneratorType::Boustrophedon => RouteStrategy::Sorted(SwathOrder::Boustrophedon),
        RouteGeneratorType::Snake => RouteStrategy::Sorted(SwathOrder::Snake),
        RouteGeneratorType::Spiral => {
            let spirals = route_body.spirals.unwrap_or(2);
            if spirals < 2 {
                return Err(RequestError::InvalidOptions {
                    reason: format!("spirals must be at least 2, got {}", spirals),
                });
            }
            RouteStrategy::Sorted(SwathOrder::Spiral { size: spirals as usize })
        }
    };

    let start_point = route_body.startpoint.unwrap_or(1);
    let start_point = u32::try_from(start_point).map_err(|_| RequestError::InvalidOptions {
        reason: format!("startpoint must be a non-negative integer, got {}", start_point),
    })?;

    let decompose_angle = match route_body.decompose_angle {
        Some(angle) => Some(angle),
        None => top_level_number(body, DECOMPOSE_KEYS)?,
    }
    .filter(|angle| *angle >= 0.0)
    .map(f64::to_radians);

    let min_wp_distance = match route_body.min_wp_distance {
        Some(distance) => distance,
        None => top_level_number(body, MIN_WP_KEYS)?.unwrap_or(1.0),
    };
    if min_wp_distance < 0.0 {
        return Err(RequestError::InvalidOptions {
            reason: format!("min-wp-distance must not be negative, got {}", min_wp_distance),
        });
    }

    let headland_distance = top_level_number(body, HEADLAND_KEYS)?.unwrap_or(0.0);
    if headland_distance < 0.0 {
        return Err(RequestError::InvalidOptions {
            reason: format!("headlandDistance must not be negative, got {}", headland_distance),
        });
    }

    Ok(PlanOptions {
        headland_distance,
        swath,
        route,
        start_point,
        decompose_angle,
        min_wp_distance,
    })
}

fn resolve_tag<T>(tag: &ModeTag, by_code: fn(i64) -> Option<T>, by_name: fn(&str) -> Option<T>) -> Option<T> {
    match tag {
        ModeTag::Code(code) => by_code(*code),
        // 1.0 is accepted as code 1
        ModeTag::Float(value) if value.fract() == 0.0 && value.abs() <= i64::MAX as f64 => by_code(*value as i64),
        ModeTag::Float(_) => None,
        ModeTag::Name(name) => name.parse::<i64>().ok().and_then(by_code).or_else(|| by_name(name)),
    }
}
