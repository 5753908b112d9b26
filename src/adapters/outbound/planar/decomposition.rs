use crate::domains::coverage::{Cell, Cells, LinearRing, Point};
use std::f64::consts::FRAC_PI_2;

const EPS: f64 = 1e-7;
const MIN_AREA: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= EPS * (1.0 + a.abs().max(b.abs()))
}

/// Boundary chains of a cell being swept left to right.
struct OpenCell {
    lower: Vec<Point>,
    upper: Vec<Point>,
    right: (f64, f64),
}

impl OpenCell {
    fn into_cell(self, back: f64) -> Option<Cell> {
        let mut points: Vec<Point> = self.lower;
        points.extend(self.upper.into_iter().rev());
        points.dedup_by(|a, b| approx_eq(a.x, b.x) && approx_eq(a.y, b.y));
        if let (Some(first), Some(last)) = (points.first(), points.last()) {
            if points.len() > 1 && approx_eq(first.x, last.x) && approx_eq(first.y, last.y) {
                points.pop();
            }
        }
        let ring = LinearRing::new(points);
        if ring.len() < 3 || ring.signed_area().abs() < MIN_AREA {
            return None;
        }
        Some(Cell::new(ring.rotated(back), Vec::new()))
    }
}

/// Boustrophedon decomposition: sweeps lines parallel to `split_angle` across
/// every cell and starts a new cell wherever the number of boundary crossings
/// changes. Resulting cells have no holes.
pub fn decompose(cells: &Cells, split_angle: f64) -> Cells {
    Cells::new(cells.iter().flat_map(|cell| decompose_cell(cell, split_angle)).collect())
}

pub fn decompose_cell(cell: &Cell, split_angle: f64) -> Vec<Cell> {
    // Split lines become vertical in the rotated frame.
    let rot = FRAC_PI_2 - split_angle;
    let rotated = cell.rotated(rot);
    let edges: Vec<(Point, Point)> = rotated.rings().flat_map(|r| r.edges()).collect();

    let mut xs: Vec<f64> = rotated.rings().flat_map(|r| r.points.iter().map(|p| p.x)).collect();
    xs.sort_by(f64::total_cmp);
    xs.dedup_by(|a, b| approx_eq(*a, *b));

    let mut open: Vec<OpenCell> = Vec::new();
    let mut done: Vec<OpenCell> = Vec::new();

    for slab in xs.windows(2) {
        let (x0, x1) = (slab[0], slab[1]);
        let xm = (x0 + x1) / 2.0;
        let y_at = |a: &Point, b: &Point, x: f64| a.y + (x - a.x) * (b.y - a.y) / (b.x - a.x);

        let mut crossing: Vec<(f64, f64, f64)> = edges
            .iter()
            .filter(|(a, b)| (a.x <= xm) != (b.x <= xm))
            .map(|(a, b)| (y_at(a, b, xm), y_at(a, b, x0), y_at(a, b, x1)))
            .collect();
        crossing.sort_by(|l, r| l.0.total_cmp(&r.0));

        let mut previous: Vec<Option<OpenCell>> = open.drain(..).map(Some).collect();
        for pair in crossing.chunks_exact(2) {
            let (_, lo0, lo1) = pair[0];
            let (_, hi0, hi1) = pair[1];
            let matched = previous.iter().position(|c| {
                c.as_ref()
                    .map(|c| approx_eq(c.right.0, lo0) && approx_eq(c.right.1, hi0))
                    .unwrap_or(false)
            });
            let next = match matched.and_then(|i| previous[i].take()) {
                Some(mut c) => {
                    c.lower.push(Point::new(x1, lo1));
                    c.upper.push(Point::new(x1, hi1));
                    c.right = (lo1, hi1);
                    c
                }
                None => OpenCell {
                    lower: vec![Point::new(x0, lo0), Point::new(x1, lo1)],
                    upper: vec![Point::new(x0, hi0), Point::new(x1, hi1)],
                    right: (lo1, hi1),
                },
            };
            open.push(next);
        }
        done.extend(previous.into_iter().flatten());
    }
    done.extend(open);

    done.into_iter().filter_map(|c| c.into_cell(-rot)).collect()
}
