use crate::common::{EngineError, EngineResult};
use crate::domains::coverage::{Cell, Cells, LinearRing, Point};
use geo::orient::{Direction, Orient};
use geo::{Area, LineString, Polygon};
use geo_buf::buffer_polygon;

const MIN_AREA: f64 = 1e-9;

/// Shrinks every cell by `distance` with a straight-skeleton offset: outer
/// rings move inwards and holes grow. A cell pinched apart by the offset
/// yields one cell per remaining piece; a cell that vanishes is dropped.
pub fn shrink_cells(field: &Cells, distance: f64) -> EngineResult<Cells> {
    if distance == 0.0 {
        return Ok(field.clone());
    }
    let mut cells = Vec::with_capacity(field.len());
    for cell in field.iter() {
        cells.extend(shrink_cell(cell, distance));
    }
    if cells.is_empty() {
        return Err(EngineError::FieldConsumedByHeadland { distance });
    }
    Ok(Cells::new(cells))
}

fn shrink_cell(cell: &Cell, distance: f64) -> Vec<Cell> {
    buffer_polygon(&to_polygon(cell), -distance)
        .into_iter()
        .filter(|piece| piece.unsigned_area() > MIN_AREA)
        .filter_map(|piece| from_polygon(&piece))
        .collect()
}

pub fn to_polygon(cell: &Cell) -> Polygon<f64> {
    Polygon::new(to_line_string(&cell.outer), cell.holes.iter().map(to_line_string).collect())
        .orient(Direction::Default)
}

pub fn from_polygon(polygon: &Polygon<f64>) -> Option<Cell> {
    let outer = to_ring(polygon.exterior());
    if outer.len() < 3 {
        return None;
    }
    let holes = polygon
        .interiors()
        .iter()
        .map(to_ring)
        .filter(|hole| hole.len() >= 3)
        .collect();
    Some(Cell::new(outer, holes))
}

fn to_line_string(ring: &LinearRing) -> LineString<f64> {
    ring.points.iter().map(|p| (p.x, p.y)).collect::<Vec<_>>().into()
}

fn to_ring(line: &LineString<f64>) -> LinearRing {
    LinearRing::new(line.coords().map(|c| Point::new(c.x, c.y)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::outbound::planar::swaths::swaths_at_angle;

    fn square(size: f64) -> LinearRing {
        LinearRing::new(vec![
            Point::new(0.0, 0.0),
            Point::new(size, 0.0),
            Point::new(size, size),
            Point::new(0.0, size),
        ])
    }

    fn field(cell: Cell) -> Cells {
        Cells::new(vec![cell])
    }

    #[test]
    fn test_square_shrinks_on_both_orientations() {
        let ccw = shrink_cells(&field(Cell::new(square(10.0), Vec::new())), 1.0).unwrap();
        assert_eq!(ccw.len(), 1);
        assert!((ccw.area() - 64.0).abs() < 1e-6);
        let (min_x, min_y, max_x, max_y) = ccw.cells[0].bounds();
        assert!((min_x - 1.0).abs() < 1e-6 && (min_y - 1.0).abs() < 1e-6);
        assert!((max_x - 9.0).abs() < 1e-6 && (max_y - 9.0).abs() < 1e-6);

        let mut cw = square(10.0);
        cw.points.reverse();
        let shrunk = shrink_cells(&field(Cell::new(cw, Vec::new())), 1.0).unwrap();
        assert!((shrunk.area() - 64.0).abs() < 1e-6);
    }

    #[test]
    fn test_field_consumed_when_offset_too_large() {
        let err = shrink_cells(&field(Cell::new(square(10.0), Vec::new())), 6.0).unwrap_err();
        assert_eq!(err, EngineError::FieldConsumedByHeadland { distance: 6.0 });
    }

    #[test]
    fn test_hole_grows() {
        let cell = Cell::new(square(10.0), vec![LinearRing::new(vec![
            Point::new(4.0, 4.0),
            Point::new(6.0, 4.0),
            Point::new(6.0, 6.0),
            Point::new(4.0, 6.0),
        ])]);
        let shrunk = shrink_cells(&field(cell), 1.0).unwrap();
        assert_eq!(shrunk.len(), 1);
        // 8x8 outer minus a 4x4 hole
        assert!((shrunk.area() - 48.0).abs() < 1e-6);
    }

    #[test]
    fn test_concave_field_splits_into_arms() {
        // 10x10 with a 2 m wide slot cut from the top down to y = 2.
        let u_shape = Cell::new(
            LinearRing::new(vec![
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(10.0, 10.0),
                Point::new(6.0, 10.0),
                Point::new(6.0, 2.0),
                Point::new(4.0, 2.0),
                Point::new(4.0, 10.0),
                Point::new(0.0, 10.0),
            ]),
            Vec::new(),
        );
        let shrunk = shrink_cells(&field(u_shape), 1.5).unwrap();

        // Two 1 x 7 strips; the band under the slot is all headland.
        assert_eq!(shrunk.len(), 2);
        assert!((shrunk.area() - 14.0).abs() < 1e-6);

        for (id, cell) in shrunk.iter().enumerate() {
            for swath in swaths_at_angle(cell, id, 1.0, 0.0) {
                for x in [swath.start.x, swath.end.x] {
                    assert!(x <= 2.5 + 1e-6 || x >= 7.5 - 1e-6, "swath {:?} crosses the slot", swath);
                }
            }
        }
    }

    #[test]
    fn test_polygon_conversion_keeps_holes() {
        let cell = Cell::new(square(10.0), vec![LinearRing::new(vec![
            Point::new(2.0, 2.0),
            Point::new(2.0, 3.0),
            Point::new(3.0, 3.0),
        ])]);
        let back = from_polygon(&to_polygon(&cell)).unwrap();
        assert_eq!(back.outer.len(), 4);
        assert_eq!(back.holes.len(), 1);
        assert!((back.area() - cell.area()).abs() < 1e-12);
    }
}
