//! Projective unit-square parametrization of a quad.
//!
//! The map sends the corners of the quad to `(0,0)`, `(1,0)`, `(1,1)`, `(0,1)` and
//! straight lines to straight lines. Both directions are closed-form rational
//! functions of the corner coordinates relative to corner 0. Degenerate quads give
//! non-finite results.

use crate::foundation::core::{Point, Vec2};
use crate::geometry::quad::Quad;

/// Homography `uv -> xy` (relative to corner 0), as the 3x3 matrix
/// `[[a, b, 0], [c, d, 0], [g, h, i]]` acting on `(u, v, 1)`.
struct UnitSquareMap {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    g: f64,
    h: f64,
    i: f64,
}

impl UnitSquareMap {
    fn new(quad: &Quad) -> Self {
        let o = quad[0];
        let (x2, y2) = (quad[1].x - o.x, quad[1].y - o.y);
        let (x3, y3) = (quad[2].x - o.x, quad[2].y - o.y);
        let (x4, y4) = (quad[3].x - o.x, quad[3].y - o.y);

        let k1 = x4 * y3 - x3 * y4;
        let k3 = x3 * y2 - x2 * y3;
        Self {
            a: x2 * k1,
            b: x4 * k3,
            c: y2 * k1,
            d: y4 * k3,
            g: (x4 - x3) * y2 + x2 * (y3 - y4),
            h: x4 * (y2 - y3) + (x3 - x2) * y4,
            i: x4 * (y3 - y2) + x3 * (y2 - y4) + x2 * (y4 - y3),
        }
    }

    fn forward(&self, uv: Vec2) -> Vec2 {
        let w = self.g * uv.x + self.h * uv.y + self.i;
        Vec2::new(
            (self.a * uv.x + self.b * uv.y) / w,
            (self.c * uv.x + self.d * uv.y) / w,
        )
    }

    /// Adjugate of the matrix applied to `(x, y, 1)`; the scale cancels out.
    fn inverse(&self, xy: Vec2) -> Vec2 {
        let u = self.i * (self.d * xy.x - self.b * xy.y);
        let v = self.i * (self.a * xy.y - self.c * xy.x);
        let w = (self.c * self.h - self.d * self.g) * xy.x
            + (self.b * self.g - self.a * self.h) * xy.y
            + (self.a * self.d - self.b * self.c);
        Vec2::new(u / w, v / w)
    }
}

/// Map a point of the plane into the quad's unit-square coordinates.
pub fn xy_to_uv(quad: &Quad, xy: Point) -> Vec2 {
    UnitSquareMap::new(quad).inverse(xy - quad[0])
}

/// Map unit-square coordinates of the quad back into the plane.
pub fn uv_to_xy(quad: &Quad, uv: Vec2) -> Point {
    quad[0] + UnitSquareMap::new(quad).forward(uv)
}

/// Image of the UV rectangle spanned by `c1` and `c2` inside `quad`.
pub fn sub_quad(quad: &Quad, c1: Vec2, c2: Vec2) -> Quad {
    Quad::from_rect(c1.to_point(), c2.to_point()).map(|uv| uv_to_xy(quad, uv.to_vec2()))
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/uv.rs"]
mod tests;
