//! Modifier-key constraints applied to a dragged corner.

use crate::foundation::core::{Point, Vec2};
use crate::foundation::math::vec_is_finite;
use crate::geometry::quad::Quad;
use crate::geometry::uv::{uv_to_xy, xy_to_uv};

fn unit(v: Vec2) -> Vec2 {
    v / v.length()
}

/// Keep whichever projection of `d` onto `a` or `b` (unit vectors) is closer to it.
fn closer_projection(d: Vec2, a: Vec2, b: Vec2) -> Vec2 {
    let snap_a = d.dot(a) * a;
    let snap_b = d.dot(b) * b;
    if (snap_a - d).length_squared() <= (snap_b - d).length_squared() {
        snap_a
    } else {
        snap_b
    }
}

/// Restrict `d` to one of the quad's local axes at `at`, following the perspective.
///
/// Returns `d` unchanged when the quad has no usable axes there.
pub(crate) fn single_axis(quad: &Quad, at: Point, d: Vec2) -> Vec2 {
    let uv = xy_to_uv(quad, at);
    let axis_u = unit(uv_to_xy(quad, uv + Vec2::new(1.0, 0.0)) - at);
    let axis_v = unit(uv_to_xy(quad, uv + Vec2::new(0.0, 1.0)) - at);
    if !(vec_is_finite(axis_u) && vec_is_finite(axis_v)) {
        return d;
    }
    closer_projection(d, axis_u, axis_v)
}

/// Snap `p` onto the closer of the two diagonals of `old`.
pub(crate) fn onto_diagonals(old: &Quad, p: Point) -> Point {
    let center = old.midpoint();
    let dir1 = unit(old[0] - center);
    let dir2 = unit(old[1] - center);
    if !(center.is_finite() && vec_is_finite(dir1) && vec_is_finite(dir2)) {
        return p;
    }
    center + closer_projection(p - center, dir1, dir2)
}

/// Corner of `old` closest to `p`.
pub(crate) fn nearest_corner(old: &Quad, p: Point) -> Point {
    old.corners()
        .iter()
        .copied()
        .min_by(|a, b| (*a - p).length_squared().total_cmp(&(*b - p).length_squared()))
        .unwrap_or(p)
}

/// Signs taking corner `k`'s offset from the center of the unit square to corner 0's.
fn flip(k: usize) -> Vec2 {
    Vec2::new(
        if k == 1 || k == 2 { -1.0 } else { 1.0 },
        if k >= 2 { -1.0 } else { 1.0 },
    )
}

/// Move corner `index` of `old` to `p` and the other corners symmetrically, by point
/// reflections in the unit square of `old`.
pub(crate) fn mirror(old: &Quad, index: usize, p: Point) -> Quad {
    let center = Vec2::new(0.5, 0.5);
    let rel = xy_to_uv(old, p) - center;
    let fi = flip(index);
    Quad::new(std::array::from_fn(|j| {
        let fj = flip(j);
        uv_to_xy(
            old,
            center + Vec2::new(rel.x * fi.x * fj.x, rel.y * fi.y * fj.y),
        )
    }))
}

#[cfg(test)]
#[path = "../../tests/unit/tool/snap.rs"]
mod tests;
