use super::dubins::{DubinsPath, Pose};
use crate::common::{EngineError, EngineResult};
use crate::domains::coverage::{Connection, Path, PathSectionType, PathState, Point, Robot, Route};

/// Wraps an angle into (-pi, pi], the range swath headings use.
fn wrap_angle(angle: f64) -> f64 {
    angle.sin().atan2(angle.cos())
}

/// Walks the route in order: each group's leading connection, then its swaths
/// joined by turns; connections past the last group trail the path.
pub fn plan_path(robot: &Robot, route: &Route, turn_step: f64) -> EngineResult<Path> {
    let mut path = Path::new();
    for (i, group) in route.swaths.iter().enumerate() {
        if let Some(connection) = route.connections.get(i) {
            add_transit(&mut path, connection);
        }
        for swath in group.iter() {
            let heading = swath.heading();
            if let Some(last) = path.last_state().copied() {
                add_turn(&mut path, robot, &last, swath.start, heading, turn_step)?;
            }
            path.add_state(PathState::new(swath.start, heading, PathSectionType::Swath));
            path.add_state(PathState::new(swath.end, heading, PathSectionType::Swath));
        }
    }
    for connection in route.connections.iter().skip(route.swaths.len()) {
        add_transit(&mut path, connection);
    }
    if path.is_empty() {
        return Err(EngineError::NoSwaths);
    }
    Ok(path)
}

fn add_transit(path: &mut Path, connection: &Connection) {
    for point in &connection.points {
        let heading = match path.last_state() {
            Some(last) if last.point == *point => continue,
            Some(last) => last.point.heading_to(point),
            None => 0.0,
        };
        path.add_state(PathState::new(*point, heading, PathSectionType::Turn));
    }
}

/// Intermediate turn states from `from` to the swath start. Without a turning
/// radius the robot drives straight there and no states are added.
fn add_turn(path: &mut Path, robot: &Robot, from: &PathState, to: Point, heading: f64, step: f64) -> EngineResult<()> {
    let radius = robot.min_turning_radius;
    if radius <= 0.0 {
        return Ok(());
    }
    let start = Pose::new(from.point.x, from.point.y, from.angle);
    let end = Pose::new(to.x, to.y, heading);
    let turn = DubinsPath::shortest(start, end, radius).map_err(|e| EngineError::TurnPlanning {
        reason: format!("{:?} from ({:.3}, {:.3}) to ({:.3}, {:.3})", e, from.point.x, from.point.y, to.x, to.y),
    })?;
    let step = if step > 0.0 { step } else { radius / 10.0 };
    let poses = turn.sample_many(step);
    // Both ends already are (or will be) swath states.
    if poses.len() > 2 {
        for pose in &poses[1..poses.len() - 1] {
            path.add_state(PathState::new(
                Point::new(pose.x, pose.y),
                wrap_angle(pose.heading),
                PathSectionType::Turn,
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::coverage::{Swath, Swaths};

    fn two_rows() -> Route {
        Route::from_swaths(Swaths::new(vec![
            Swath::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0), 0),
            Swath::new(Point::new(10.0, 4.0), Point::new(0.0, 4.0), 0),
        ]))
    }

    #[test]
    fn test_straight_transitions_without_radius() {
        let path = plan_path(&Robot::new(1.0, 1.0, 0.0), &two_rows(), 0.5).unwrap();
        assert_eq!(path.size(), 4);
        assert!((path.length() - 24.0).abs() < 1e-9);
    }

    #[test]
    fn test_dubins_turn_between_rows() {
        let path = plan_path(&Robot::new(1.0, 1.0, 2.0), &two_rows(), 0.5).unwrap();
        assert!(path.size() > 4);
        assert!(path.states.iter().any(|s| s.kind == PathSectionType::Turn));
        // half circle instead of the 4 m straight hop
        assert!((path.length() - (20.0 + 2.0 * std::f64::consts::PI)).abs() < 0.2);
    }

    #[test]
    fn test_connections_are_driven() {
        let mut route = Route::new();
        route.add_connection(Connection::new(vec![Point::new(-5.0, 0.0)]));
        route.add_swaths(Swaths::new(vec![Swath::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0), 0)]));
        route.add_connection(Connection::new(vec![Point::new(15.0, 0.0)]));
        let path = plan_path(&Robot::default(), &route, 0.5).unwrap();
        assert_eq!(path.size(), 4);
        assert_eq!(path.states[0].point, Point::new(-5.0, 0.0));
        assert_eq!(path.states[3].point, Point::new(15.0, 0.0));
    }

    #[test]
    fn test_empty_route_is_an_error() {
        assert_eq!(plan_path(&Robot::default(), &Route::new(), 0.5), Err(EngineError::NoSwaths));
    }
}
