use crate::domains::coverage::{Cell, Point, Swath, SwathObjective};

const MIN_SWATH_LENGTH: f64 = 1e-6;

/// Parallel swaths `width` apart along direction `angle` (radians), clipped to
/// the cell with an even-odd scan line. The first pass sits half a width in
/// from the cell edge; a cell narrower than `width` gets one centred pass.
pub fn swaths_at_angle(cell: &Cell, cell_id: usize, width: f64, angle: f64) -> Vec<Swath> {
    let rotated = cell.rotated(-angle);
    let (_, min_y, _, max_y) = rotated.bounds();
    let height = max_y - min_y;
    if !(height > 0.0) || !(width > 0.0) {
        return Vec::new();
    }

    let passes = ((height / width).ceil() as usize).max(1);
    let mut swaths = Vec::new();
    for k in 0..passes {
        let mut y = min_y + width * (k as f64 + 0.5);
        if y + width / 2.0 > max_y {
            y = (max_y - width / 2.0).max(min_y + height / 2.0);
        }
        let mut xs = scan_line_crossings(&rotated, y);
        xs.sort_by(f64::total_cmp);
        for pair in xs.chunks_exact(2) {
            if pair[1] - pair[0] > MIN_SWATH_LENGTH {
                swaths.push(Swath::new(
                    Point::new(pair[0], y).rotated(angle),
                    Point::new(pair[1], y).rotated(angle),
                    cell_id,
                ));
            }
        }
    }
    swaths
}

fn scan_line_crossings(cell: &Cell, y: f64) -> Vec<f64> {
    cell.rings()
        .flat_map(|ring| ring.edges())
        .filter(|(a, b)| (a.y <= y) != (b.y <= y))
        .map(|(a, b)| a.x + (y - a.y) * (b.x - a.x) / (b.y - a.y))
        .collect()
}

fn cost(swaths: &[Swath], objective: SwathObjective) -> f64 {
    match objective {
        SwathObjective::SwathCount => swaths.len() as f64,
        SwathObjective::SwathLength => swaths.iter().map(Swath::length).sum(),
    }
}

/// Tries every angle in `[0, 180)` degrees at `step_deg` and keeps the swaths
/// with the lowest cost. Ties go to the smaller angle.
pub fn best_swaths(cell: &Cell, cell_id: usize, width: f64, objective: SwathObjective, step_deg: f64) -> Vec<Swath> {
    let step = if step_deg > 0.0 { step_deg } else { 1.0 };
    let steps = (180.0 / step).ceil() as usize;
    let mut best: Option<(f64, Vec<Swath>)> = None;
    for k in 0..steps {
        let angle = (k as f64 * step).to_radians();
        let candidate = swaths_at_angle(cell, cell_id, width, angle);
        if candidate.is_empty() {
            continue;
        }
        let candidate_cost = cost(&candidate, objective);
        match &best {
            Some((best_cost, _)) if candidate_cost >= *best_cost => {}
            _ => best = Some((candidate_cost, candidate)),
        }
    }
    best.map(|(_, swaths)| swaths).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::coverage::LinearRing;

    fn rectangle(w: f64, h: f64) -> Cell {
        Cell::new(
            LinearRing::new(vec![
                Point::new(0.0, 0.0),
                Point::new(w, 0.0),
                Point::new(w, h),
                Point::new(0.0, h),
            ]),
            Vec::new(),
        )
    }

    #[test]
    fn test_rectangle_swaths_along_x() {
        let swaths = swaths_at_angle(&rectangle(10.0, 4.0), 0, 1.0, 0.0);
        assert_eq!(swaths.len(), 4);
        for (i, s) in swaths.iter().enumerate() {
            assert!((s.length() - 10.0).abs() < 1e-9);
            assert!((s.start.y - (i as f64 + 0.5)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_hole_splits_swaths() {
        let mut cell = rectangle(10.0, 1.0);
        cell.holes.push(LinearRing::new(vec![
            Point::new(4.0, 0.2),
            Point::new(6.0, 0.2),
            Point::new(6.0, 0.8),
            Point::new(4.0, 0.8),
        ]));
        let swaths = swaths_at_angle(&cell, 3, 1.0, 0.0);
        assert_eq!(swaths.len(), 2);
        assert!(swaths.iter().all(|s| s.cell_id == 3));
    }

    #[test]
    fn test_narrow_cell_gets_single_pass() {
        let swaths = swaths_at_angle(&rectangle(10.0, 0.5), 0, 2.0, 0.0);
        assert_eq!(swaths.len(), 1);
        assert!((swaths[0].start.y - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_best_swath_count_follows_long_side() {
        let swaths = best_swaths(&rectangle(10.0, 4.0), 0, 1.0, SwathObjective::SwathCount, 1.0);
        assert_eq!(swaths.len(), 4);
    }
}
