use super::geometry::Point;
use serde::{Deserialize, Serialize};

/// About 0.057 degrees.
pub const DEFAULT_SAME_ANGLE_TOLERANCE: f64 = 1e-3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PathSectionType {
    #[default]
    Swath,
    Turn,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathState {
    pub point: Point,
    /// Heading in radians.
    pub angle: f64,
    pub kind: PathSectionType,
}

impl PathState {
    pub fn new(point: Point, angle: f64, kind: PathSectionType) -> Self {
        Self { point, angle, kind }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Path {
    pub states: Vec<PathState>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_states(states: Vec<PathState>) -> Self {
        Self { states }
    }

    pub fn add_state(&mut self, state: PathState) {
        self.states.push(state);
    }

    pub fn size(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn state(&self, index: usize) -> Option<&PathState> {
        self.states.get(index)
    }

    pub fn last_state(&self) -> Option<&PathState> {
        self.states.last()
    }

    pub fn length(&self) -> f64 {
        self.states
            .windows(2)
            .map(|w| w[0].point.distance(&w[1].point))
            .sum()
    }

    /// Drops states closer than `min_distance` to the previously kept one.
    /// The first and last states always survive.
    pub fn reduce(&mut self, min_distance: f64) {
        let n = self.states.len();
        if n <= 2 {
            return;
        }
        let last = self.states[n - 1];
        let mut kept: Vec<PathState> = Vec::with_capacity(n);
        kept.push(self.states[0]);
        for state in &self.states[1..n - 1] {
            if let Some(prev) = kept.last() {
                if prev.point.distance(&state.point) >= min_distance {
                    kept.push(*state);
                }
            }
        }
        if kept.len() > 1 {
            if let Some(tail) = kept.last() {
                if tail.point.distance(&last.point) < min_distance {
                    kept.pop();
                }
            }
        }
        kept.push(last);
        self.states = kept;
    }

    pub fn to_line_string(&self) -> geojson::Geometry {
        let coordinates = self
            .states
            .iter()
            .map(|s| vec![s.point.x, s.point.y])
            .collect();
        geojson::Geometry::new(geojson::Value::LineString(coordinates))
    }
}

/// Thins straight runs down to their endpoints.
///
/// Keeps the first and last state, plus every interior state whose heading
/// differs from its predecessor or its successor by more than `tolerance`.
/// Headings are compared as raw values: -pi and pi count as different.
pub fn reduce_same_angle_segments(path: &Path, tolerance: f64) -> Path {
    let n = path.size();
    if n <= 2 {
        return path.clone();
    }
    let states = &path.states;
    let mut result = Path::new();
    result.add_state(states[0]);
    for i in 1..n - 1 {
        let prev = &states[i - 1];
        let cur = &states[i];
        let next = &states[i + 1];
        if (cur.angle - prev.angle).abs() > tolerance || (next.angle - cur.angle).abs() > tolerance {
            result.add_state(*cur);
        }
    }
    result.add_state(states[n - 1]);
    result
}
