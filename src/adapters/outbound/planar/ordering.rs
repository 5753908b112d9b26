use crate::common::{EngineError, EngineResult};
use crate::domains::coverage::{Connection, Route, Swath, SwathOrder, Swaths};
use std::collections::BTreeMap;

/// Orders one cell's swaths. Bit 0 of `variant` starts from the last swath,
/// bit 1 flips every swath before ordering. Consecutive swaths are then driven
/// in alternating directions.
pub fn sort_swaths(swaths: &Swaths, order: SwathOrder, variant: u32) -> Swaths {
    let mut items = swaths.swaths.clone();
    if variant & 1 == 1 {
        items.reverse();
    }
    if variant & 2 == 2 {
        items.iter_mut().for_each(Swath::reverse);
    }
    let ordered = permutation(items.len(), order).into_iter().map(|i| items[i]).collect();
    alternate_directions(ordered)
}

fn permutation(n: usize, order: SwathOrder) -> Vec<usize> {
    match order {
        SwathOrder::Boustrophedon => (0..n).collect(),
        // 0, 2, 4, ... out, then the odd swaths back
        SwathOrder::Snake => (0..n).step_by(2).chain((1..n).step_by(2).rev()).collect(),
        SwathOrder::Spiral { size } => {
            let size = size.max(1);
            let mut indices = Vec::with_capacity(n);
            for start in (0..n).step_by(size) {
                let end = (start + size).min(n);
                let (mut lo, mut hi) = (start, end);
                while lo < hi {
                    indices.push(lo);
                    lo += 1;
                    if lo < hi {
                        hi -= 1;
                        indices.push(hi);
                    }
                }
            }
            indices
        }
    }
}

fn alternate_directions(mut swaths: Vec<Swath>) -> Swaths {
    for i in 1..swaths.len() {
        let prev = swaths[i - 1];
        let cur = swaths[i];
        let dot = (prev.end.x - prev.start.x) * (cur.end.x - cur.start.x)
            + (prev.end.y - prev.start.y) * (cur.end.y - cur.start.y);
        if dot > 0.0 {
            swaths[i].reverse();
        }
    }
    Swaths::new(swaths)
}

/// Multi-cell route: each cell is covered boustrophedon style and cells are
/// chained greedily, always moving to the nearest uncovered cell entry. Every
/// group gets a leading connection and the route a trailing one, all empty:
/// the transits are left to turn planning.
pub fn plan_route(swaths: &Swaths) -> EngineResult<Route> {
    let mut by_cell: BTreeMap<usize, Swaths> = BTreeMap::new();
    for swath in swaths.iter() {
        by_cell.entry(swath.cell_id).or_default().push(*swath);
    }
    let mut remaining: Vec<Swaths> = by_cell
        .into_values()
        .map(|group| sort_swaths(&group, SwathOrder::Boustrophedon, 0))
        .collect();
    if remaining.is_empty() {
        return Err(EngineError::NoSwaths);
    }

    let mut route = Route::new();
    let mut current = remaining.remove(0);
    loop {
        let exit = current.last().map(|s| s.end);
        route.add_connection(Connection::default());
        route.add_swaths(current);

        let Some(exit) = exit else { break };
        let next = remaining
            .iter()
            .enumerate()
            .flat_map(|(i, group)| {
                let forward = group.first().map(|s| (i, false, exit.distance(&s.start)));
                let backward = group.last().map(|s| (i, true, exit.distance(&s.end)));
                forward.into_iter().chain(backward)
            })
            .min_by(|a, b| a.2.total_cmp(&b.2));
        match next {
            Some((i, reversed, _)) => {
                current = remaining.remove(i);
                if reversed {
                    current.reverse();
                }
            }
            None => break,
        }
    }
    route.add_connection(Connection::default());
    Ok(route)
}
