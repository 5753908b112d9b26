use super::geometry::Point;
use super::swath::Swaths;
use serde::{Deserialize, Serialize};

/// Transit points driven between two swath groups.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Connection {
    pub points: Vec<Point>,
}

impl Connection {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn reversed(&self) -> Connection {
        Connection {
            points: self.points.iter().rev().copied().collect(),
        }
    }
}

/// Swath groups interleaved with connections. Connection `i` is driven before
/// group `i`; connection `k` (for `k` groups) trails the last group.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Route {
    pub swaths: Vec<Swaths>,
    pub connections: Vec<Connection>,
}

impl Route {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-group route without connections, as produced by the single-cell orders.
    pub fn from_swaths(swaths: Swaths) -> Self {
        Self {
            swaths: vec![swaths],
            connections: Vec::new(),
        }
    }

    pub fn add_swaths(&mut self, swaths: Swaths) {
        self.swaths.push(swaths);
    }

    pub fn add_connection(&mut self, connection: Connection) {
        self.connections.push(connection);
    }

    pub fn size_vector_swaths(&self) -> usize {
        self.swaths.len()
    }

    pub fn size_connections(&self) -> usize {
        self.connections.len()
    }

    pub fn swath_count(&self) -> usize {
        self.swaths.iter().map(Swaths::len).sum()
    }

    /// New route covering the same groups backwards. Group order, each group's
    /// swaths and each connection's transit points are reversed; the first and
    /// last connections trade places. The receiver is left untouched.
    ///
    /// Only connections that exist are copied. With fewer than `k + 1`
    /// connections the copies keep their relative order but no longer line up
    /// with the same groups.
    pub fn reversed(&self) -> Route {
        let mut reversed = Route::new();
        for i in (0..self.swaths.len()).rev() {
            if let Some(connection) = self.connections.get(i + 1) {
                reversed.add_connection(connection.reversed());
            }
            reversed.add_swaths(self.swaths[i].reversed());
        }
        if let Some(first) = self.connections.first() {
            reversed.add_connection(first.reversed());
        }
        reversed
    }
}
