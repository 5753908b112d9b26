use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Heading (radians) of the segment from `self` to `other`.
    pub fn heading_to(&self, other: &Point) -> f64 {
        (other.y - self.y).atan2(other.x - self.x)
    }

    /// Rotate around the origin by `angle` radians.
    pub fn rotated(&self, angle: f64) -> Point {
        let (s, c) = angle.sin_cos();
        Point::new(self.x * c - self.y * s, self.x * s + self.y * c)
    }
}

/// Closed ring of points. The closing point is not repeated.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LinearRing {
    pub points: Vec<Point>,
}

impl LinearRing {
    /// Builds a ring from a point list, dropping a trailing point equal to the first
    /// (GeoJSON rings are explicitly closed).
    pub fn new(mut points: Vec<Point>) -> Self {
        if points.len() > 1 && points.first() == points.last() {
            points.pop();
        }
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Edges as (from, to) pairs, including the closing edge.
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }

    /// Shoelace area, positive for counter-clockwise rings.
    pub fn signed_area(&self) -> f64 {
        self.edges().map(|(a, b)| a.x * b.y - b.x * a.y).sum::<f64>() / 2.0
    }

    pub fn rotated(&self, angle: f64) -> LinearRing {
        LinearRing {
            points: self.points.iter().map(|p| p.rotated(angle)).collect(),
        }
    }
}

/// A field cell: one outer ring and any number of holes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Cell {
    pub outer: LinearRing,
    pub holes: Vec<LinearRing>,
}

impl Cell {
    pub fn new(outer: LinearRing, holes: Vec<LinearRing>) -> Self {
        Self { outer, holes }
    }

    /// First ring is the boundary, the rest are holes.
    pub fn from_rings(mut rings: Vec<LinearRing>) -> Option<Self> {
        if rings.is_empty() {
            return None;
        }
        let outer = rings.remove(0);
        Some(Self { outer, holes: rings })
    }

    pub fn rings(&self) -> impl Iterator<Item = &LinearRing> {
        std::iter::once(&self.outer).chain(self.holes.iter())
    }

    pub fn area(&self) -> f64 {
        self.outer.signed_area().abs() - self.holes.iter().map(|h| h.signed_area().abs()).sum::<f64>()
    }

    pub fn rotated(&self, angle: f64) -> Cell {
        Cell {
            outer: self.outer.rotated(angle),
            holes: self.holes.iter().map(|h| h.rotated(angle)).collect(),
        }
    }

    /// (min_x, min_y, max_x, max_y) of the outer ring.
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        self.outer.points.iter().fold(
            (f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
            |(min_x, min_y, max_x, max_y), p| (min_x.min(p.x), min_y.min(p.y), max_x.max(p.x), max_y.max(p.y)),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Cells {
    pub cells: Vec<Cell>,
}

impl Cells {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn area(&self) -> f64 {
        self.cells.iter().map(Cell::area).sum()
    }
}
