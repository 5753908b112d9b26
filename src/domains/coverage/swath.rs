use super::geometry::Point;
use serde::{Deserialize, Serialize};

/// A single straight coverage pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Swath {
    pub start: Point,
    pub end: Point,
    /// Index of the cell this swath covers.
    pub cell_id: usize,
}

impl Swath {
    pub fn new(start: Point, end: Point, cell_id: usize) -> Self {
        Self { start, end, cell_id }
    }

    pub fn length(&self) -> f64 {
        self.start.distance(&self.end)
    }

    pub fn heading(&self) -> f64 {
        self.start.heading_to(&self.end)
    }

    pub fn reverse(&mut self) {
        std::mem::swap(&mut self.start, &mut self.end);
    }

    pub fn reversed(&self) -> Swath {
        Swath::new(self.end, self.start, self.cell_id)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Swaths {
    pub swaths: Vec<Swath>,
}

impl Swaths {
    pub fn new(swaths: Vec<Swath>) -> Self {
        Self { swaths }
    }

    pub fn len(&self) -> usize {
        self.swaths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.swaths.is_empty()
    }

    pub fn push(&mut self, swath: Swath) {
        self.swaths.push(swath);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Swath> {
        self.swaths.iter()
    }

    pub fn first(&self) -> Option<&Swath> {
        self.swaths.first()
    }

    pub fn last(&self) -> Option<&Swath> {
        self.swaths.last()
    }

    pub fn total_length(&self) -> f64 {
        self.swaths.iter().map(Swath::length).sum()
    }

    /// Reverses the traversal: swath order and every swath's direction.
    pub fn reverse(&mut self) {
        self.swaths.reverse();
        self.swaths.iter_mut().for_each(Swath::reverse);
    }

    pub fn reversed(&self) -> Swaths {
        let mut copy = self.clone();
        copy.reverse();
        copy
    }
}

impl FromIterator<Swath> for Swaths {
    fn from_iter<I: IntoIterator<Item = Swath>>(iter: I) -> Self {
        Swaths::new(iter.into_iter().collect())
    }
}
