//! Shortest Dubins paths between two oriented points (float arithmetic).
//!
//! Segment lengths are kept normalized by the turning radius `rho` and scaled
//! back when sampling.

use std::f64::consts::TAU;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub x: f64,
    pub y: f64,
    pub heading: f64,
}

impl Pose {
    pub fn new(x: f64, y: f64, heading: f64) -> Self {
        Self { x, y, heading }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentType {
    Left,
    Straight,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathType {
    LSL,
    RSR,
    LSR,
    RSL,
    RLR,
    LRL,
}

impl PathType {
    fn segments(self) -> [SegmentType; 3] {
        use SegmentType::*;
        match self {
            PathType::LSL => [Left, Straight, Left],
            PathType::RSR => [Right, Straight, Right],
            PathType::LSR => [Left, Straight, Right],
            PathType::RSL => [Right, Straight, Left],
            PathType::RLR => [Right, Left, Right],
            PathType::LRL => [Left, Right, Left],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DubinsPath {
    pub start: Pose,
    pub rho: f64,
    pub path_type: PathType,
    /// Normalized segment lengths.
    pub params: [f64; 3],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DubinsError {
    /// Turning radius must be positive.
    InvalidRadius,
    /// No path family is feasible (numeric issues).
    NoPath,
}

pub fn mod2pi(angle: f64) -> f64 {
    angle.rem_euclid(TAU)
}

impl DubinsPath {
    /// Computes the shortest path over all six families.
    pub fn shortest(start: Pose, end: Pose, rho: f64) -> Result<DubinsPath, DubinsError> {
        if !(rho > 0.0) {
            return Err(DubinsError::InvalidRadius);
        }
        let dx = end.x - start.x;
        let dy = end.y - start.y;
        let d = dx.hypot(dy) / rho;
        let theta = mod2pi(dy.atan2(dx));
        let alpha = mod2pi(start.heading - theta);
        let beta = mod2pi(end.heading - theta);

        [
            PathType::LSL,
            PathType::RSR,
            PathType::LSR,
            PathType::RSL,
            PathType::RLR,
            PathType::LRL,
        ]
        .into_iter()
        .filter_map(|kind| solve(kind, alpha, beta, d).map(|params| (kind, params)))
        .min_by(|a, b| a.1.iter().sum::<f64>().total_cmp(&b.1.iter().sum::<f64>()))
        .map(|(path_type, params)| DubinsPath { start, rho, path_type, params })
        .ok_or(DubinsError::NoPath)
    }

    pub fn length(&self) -> f64 {
        self.params.iter().sum::<f64>() * self.rho
    }

    /// Pose after travelling `distance` along the path (clamped to its length).
    pub fn sample(&self, distance: f64) -> Pose {
        let mut t = (distance / self.rho).clamp(0.0, self.params.iter().sum());
        let mut q = Pose::new(0.0, 0.0, self.start.heading);
        for (kind, len) in self.path_type.segments().into_iter().zip(self.params) {
            let step = t.min(len);
            q = propagate(q, kind, step);
            t -= step;
            if t <= 0.0 {
                break;
            }
        }
        Pose::new(
            q.x * self.rho + self.start.x,
            q.y * self.rho + self.start.y,
            mod2pi(q.heading),
        )
    }

    /// Poses every `step` along the path, always including both ends.
    pub fn sample_many(&self, step: f64) -> Vec<Pose> {
        let length = self.length();
        let mut poses = Vec::new();
        if step > 0.0 {
            let mut s = 0.0;
            while s < length {
                poses.push(self.sample(s));
                s += step;
            }
        }
        poses.push(self.sample(length));
        poses
    }
}

/// Advances a normalized pose along one segment of normalized length `t`.
fn propagate(q: Pose, kind: SegmentType, t: f64) -> Pose {
    match kind {
        SegmentType::Left => Pose::new(
            q.x + (q.heading + t).sin() - q.heading.sin(),
            q.y - (q.heading + t).cos() + q.heading.cos(),
            q.heading + t,
        ),
        SegmentType::Right => Pose::new(
            q.x - (q.heading - t).sin() + q.heading.sin(),
            q.y + (q.heading - t).cos() - q.heading.cos(),
            q.heading - t,
        ),
        SegmentType::Straight => Pose::new(q.x + q.heading.cos() * t, q.y + q.heading.sin() * t, q.heading),
    }
}

fn solve(kind: PathType, a: f64, b: f64, d: f64) -> Option<[f64; 3]> {
    let (sa, sb, ca, cb) = (a.sin(), b.sin(), a.cos(), b.cos());
    let c_ab = (a - b).cos();
    match kind {
        PathType::LSL => {
            let p_sq = 2.0 + d * d - 2.0 * c_ab + 2.0 * d * (sa - sb);
            if p_sq < 0.0 {
                return None;
            }
            let tmp = (cb - ca).atan2(d + sa - sb);
            Some([mod2pi(tmp - a), p_sq.sqrt(), mod2pi(b - tmp)])
        }
        PathType::RSR => {
            let p_sq = 2.0 + d * d - 2.0 * c_ab + 2.0 * d * (sb - sa);
            if p_sq < 0.0 {
                return None;
            }
            let tmp = (ca - cb).atan2(d - sa + sb);
            Some([mod2pi(a - tmp), p_sq.sqrt(), mod2pi(tmp - b)])
        }
        PathType::LSR => {
            let p_sq = -2.0 + d * d + 2.0 * c_ab + 2.0 * d * (sa + sb);
            if p_sq < 0.0 {
                return None;
            }
            let p = p_sq.sqrt();
            let tmp = (-ca - cb).atan2(d + sa + sb) - (-2.0f64).atan2(p);
            Some([mod2pi(tmp - a), p, mod2pi(tmp - mod2pi(b))])
        }
        PathType::RSL => {
            let p_sq = -2.0 + d * d + 2.0 * c_ab - 2.0 * d * (sa + sb);
            if p_sq < 0.0 {
                return None;
            }
            let p = p_sq.sqrt();
            let tmp = (ca + cb).atan2(d - sa - sb) - 2.0f64.atan2(p);
            Some([mod2pi(a - tmp), p, mod2pi(b - tmp)])
        }
        PathType::RLR => {
            let tmp = (6.0 - d * d + 2.0 * c_ab + 2.0 * d * (sa - sb)) / 8.0;
            if tmp.abs() > 1.0 {
                return None;
            }
            let phi = (ca - cb).atan2(d - sa + sb);
            let p = mod2pi(TAU - tmp.acos());
            let t = mod2pi(a - phi + mod2pi(p / 2.0));
            Some([t, p, mod2pi(a - b - t + mod2pi(p))])
        }
        PathType::LRL => {
            let tmp = (6.0 - d * d + 2.0 * c_ab + 2.0 * d * (sb - sa)) / 8.0;
            if tmp.abs() > 1.0 {
                return None;
            }
            let phi = (ca - cb).atan2(d + sa - sb);
            let p = mod2pi(TAU - tmp.acos());
            let t = mod2pi(-a - phi + p / 2.0);
            Some([t, p, mod2pi(mod2pi(b) - a - t + mod2pi(p))])
        }
    }
}
