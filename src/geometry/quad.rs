use std::ops::{Index, IndexMut};

use crate::foundation::core::{Point, Vec2};
use crate::foundation::math::solve_columns;

/// Four corners in cyclic order: top-left, top-right, bottom-right, bottom-left
/// of the unwarped box.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Quad(pub [Point; 4]);

impl Quad {
    pub const fn new(corners: [Point; 4]) -> Self {
        Self(corners)
    }

    /// Axis-aligned quad spanned by the opposite corners `a` and `b`.
    pub fn from_rect(a: Point, b: Point) -> Self {
        Self([
            Point::new(a.x, a.y),
            Point::new(b.x, a.y),
            Point::new(b.x, b.y),
            Point::new(a.x, b.y),
        ])
    }

    pub fn corners(&self) -> &[Point; 4] {
        &self.0
    }

    pub fn map(self, f: impl FnMut(Point) -> Point) -> Self {
        Self(self.0.map(f))
    }

    pub fn translate(self, d: Vec2) -> Self {
        self.map(|p| p + d)
    }

    /// Parameters `(t1, t2)` of the diagonal intersection, such that the
    /// intersection is `q0 + t1 (q2 - q0) = q3 - t2 (q1 - q3)`.
    fn diagonal_params(&self) -> (f64, f64) {
        let q = &self.0;
        let diag1 = q[2] - q[0];
        let diag2 = q[1] - q[3];
        solve_columns(diag1, diag2, q[3] - q[0])
    }

    /// Intersection of the two diagonals.
    pub fn midpoint(&self) -> Point {
        let (t1, _) = self.diagonal_params();
        self.0[0] + t1 * (self.0[2] - self.0[0])
    }

    /// Whether the diagonals intersect inside the quad.
    ///
    /// This holds exactly for convex, non self-intersecting quads. Degenerate quads
    /// (NaN parameters) fail the test.
    pub fn is_convex(&self) -> bool {
        let (t1, t2) = self.diagonal_params();
        (0.0..=1.0).contains(&t1) && (0.0..=1.0).contains(&-t2)
    }

    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|p| p.is_finite())
    }
}

impl Index<usize> for Quad {
    type Output = Point;

    fn index(&self, index: usize) -> &Point {
        &self.0[index]
    }
}

impl IndexMut<usize> for Quad {
    fn index_mut(&mut self, index: usize) -> &mut Point {
        &mut self.0[index]
    }
}

impl From<[Point; 4]> for Quad {
    fn from(value: [Point; 4]) -> Self {
        Self(value)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/quad.rs"]
mod tests;
