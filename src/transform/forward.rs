use crate::foundation::core::{Point, Vec2, Vec3};
use crate::geometry::quad::Quad;
use crate::transform::params::{TextExtents, TransformParams, floored_size};

/// Corners of the rendered text box, in script coordinates.
///
/// Follows the renderer's order of operations: shear, shift to the alignment point,
/// scale, rotate around `\org` in Z, X, Y order, then perspective-divide at the
/// camera distance `screen_z`.
pub fn project(params: &TransformParams, extents: &TextExtents, screen_z: f64) -> Quad {
    let org = params.origin();
    let size = floored_size(extents);
    let anchor = params.align.anchor();
    let shift = Vec2::new(-size.x * anchor.x, -size.y * anchor.y);
    let to_origin = params.pos - org;

    let (rx, ry, rz) = (
        params.angle_x.to_radians(),
        params.angle_y.to_radians(),
        params.angle_z.to_radians(),
    );

    Quad::from_rect(extents.origin(), Point::new(extents.x1, extents.y1)).map(|p| {
        let sheared = Vec2::new(p.x + p.y * params.fax, p.x * params.fay + p.y) + shift;
        let scaled = Vec2::new(
            sheared.x * params.fsc.x / 100.0,
            sheared.y * params.fsc.y / 100.0,
        ) + to_origin;

        let q = Vec3::from_xy(scaled, 0.0)
            .rotate_z(-rz)
            .rotate_x(-rx)
            .rotate_y(ry);
        let q = q * (screen_z / (q.z + screen_z));
        org + q.xy()
    })
}

#[cfg(test)]
#[path = "../../tests/unit/transform/forward.rs"]
mod tests;
