use std::f64::consts::PI;

use crate::foundation::core::{Point, Vec2, Vec3};
use crate::foundation::error::{SubperspError, SubperspResult};
use crate::foundation::math::{solve_2x2, solve_columns};
use crate::geometry::quad::Quad;
use crate::transform::params::{TextExtents, TransformParams, floored_size};

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
/// Where `\org` goes when a quad is turned back into tags.
pub enum OriginMode {
    /// At the intersection of the quad's diagonals.
    #[default]
    Center,
    /// Where the quad unprojects to a rectangle (`\fax0`), as close as possible to
    /// the previous origin.
    NoShear,
    /// At the previous origin.
    Keep,
}

impl OriginMode {
    /// Next mode in the toolbar cycle.
    pub fn cycle(self) -> Self {
        match self {
            Self::Center => Self::NoShear,
            Self::NoShear => Self::Keep,
            Self::Keep => Self::Center,
        }
    }
}

#[derive(Clone, Copy, Debug)]
/// Everything besides the quad that the inverse projection needs.
pub struct Unprojection<'a> {
    /// Unformatted extents of the line.
    pub extents: &'a TextExtents,
    /// Last committed values: alignment, origin, scale, outline and shadow are read
    /// from here.
    pub previous: &'a TransformParams,
    pub mode: OriginMode,
    /// Camera distance in script pixels.
    pub screen_z: f64,
}

/// Recover override values that make the renderer draw `quad` (script coordinates).
///
/// Degenerate quads show up as non-finite solved values; the whole solve is then
/// rejected with [`SubperspError::NonFinite`].
#[tracing::instrument(level = "trace", skip(ctx))]
pub fn unproject(quad: &Quad, ctx: &Unprojection<'_>) -> SubperspResult<TransformParams> {
    let [q0, q1, q2, q3] = quad.0;
    let screen_z = ctx.screen_z;
    let previous = ctx.previous;

    // Depth factors of corners 1 and 3 such that the quad lifts to a parallelogram.
    let (z1, z3) = solve_columns(q1 - q2, q3 - q2, q0 - q2);

    let org = match ctx.mode {
        OriginMode::Center => quad.midpoint(),
        OriginMode::NoShear => no_shear_origin(quad, z1, z3, screen_z, previous.origin()),
        OriginMode::Keep => previous.origin(),
    };

    let lift = |q: Point, depth: f64| depth * Vec3::from_xy(q - org, screen_z);
    let r = [
        lift(q0, 1.0),
        lift(q1, z1),
        lift(q2, z1 + z3 - 1.0),
        lift(q3, z3),
    ];

    // Depth of the point of the plane that projects onto the origin.
    let side0 = r[1] - r[0];
    let side1 = r[3] - r[0];
    let (la0, la1) = solve_2x2(side0.x, side1.x, side0.y, side1.y, -r[0].x, -r[0].y);
    let org_z = (r[0] + la0 * side0 + la1 * side1).z;

    // Put that point at the camera distance and move the screen plane to z = 0.
    let r = r.map(|p| p * (screen_z / org_z) - Vec3::new(0.0, 0.0, screen_z));

    let mut n = (r[1] - r[0]).cross(r[3] - r[0]);
    let mut rot_y = (n.x / n.z).atan();
    if n.z < 0.0 {
        rot_y += PI;
    }
    n = n.rotate_y(rot_y);
    let rot_x = (n.y / n.z).atan();

    let r = r.map(|p| p.rotate_y(rot_y).rotate_x(rot_x));

    let ab = r[1] - r[0];
    let mut rot_z = (ab.y / ab.x).atan();
    if ab.x < 0.0 {
        rot_z += PI;
    }
    let r = r.map(|p| p.rotate_z(-rot_z));

    // Horizontal parallelogram in the z = 0 plane.
    let ab = r[1] - r[0];
    let ad = r[3] - r[0];
    let raw_fax = ad.x / ad.y;

    let width = ab.length();
    let height = ad.y.abs();
    let size = floored_size(ctx.extents);
    let scale = Vec2::new(width / size.x, height / size.y);

    let anchor = previous.align.anchor();
    let pos = org + r[0].xy()
        - Vec2::new(ctx.extents.x0 * scale.x, ctx.extents.y0 * scale.y)
        + Vec2::new(width * anchor.x, height * anchor.y);

    let fsc = 100.0 * scale;
    // Outline and shadow scale with the text. A zero old scale leaves them as they were.
    let ratio = |new: f64, old: f64| {
        if old.abs() < f64::EPSILON {
            1.0
        } else {
            new / old
        }
    };
    let rescale = |v: Vec2| {
        Vec2::new(
            v.x * ratio(fsc.x, previous.fsc.x),
            v.y * ratio(fsc.y, previous.fsc.y),
        )
    };

    let solved = TransformParams {
        angle_x: rot_x.to_degrees(),
        angle_y: -rot_y.to_degrees(),
        angle_z: -rot_z.to_degrees(),
        fax: raw_fax * scale.y / scale.x,
        fay: 0.0,
        fsc,
        bord: rescale(previous.bord),
        shad: rescale(previous.shad),
        org: Some(org),
        pos,
        align: previous.align,
    };
    check_finite(&solved)?;
    Ok(solved)
}

/// Origin for which the quad unprojects to a rectangle.
///
/// With `t = q0 - org`, the rectangles are cut out by `a |t|^2 - b.t + c = 0`: a line
/// when `a == 0`, otherwise a circle. Picks the solution closest to `previous`.
fn no_shear_origin(quad: &Quad, z1: f64, z3: f64, screen_z: f64, previous: Point) -> Point {
    let q0 = quad[0];
    let v1 = quad[1] - q0;
    let v3 = quad[3] - q0;

    let a = (1.0 - z1) * (1.0 - z3);
    let b = z1 * v1 + z3 * v3 - z1 * z3 * (v1 + v3);
    let c = z1 * z3 * v1.dot(v3) + (z1 - 1.0) * (z3 - 1.0) * screen_z * screen_z;

    let mut t = q0 - previous;
    if a == 0.0 {
        // b == 0 leaves a trivial or impossible equation; keep the previous origin.
        let b_len2 = b.length_squared();
        if b_len2 != 0.0 {
            t += b * ((c - t.dot(b)) / b_len2);
        }
    } else {
        let center = b / (2.0 * a);
        let sq_radius = (b.length_squared() / (4.0 * a) - c) / a;
        if sq_radius <= 0.0 {
            t = center;
        } else {
            let radius = sq_radius.sqrt();
            let from_center = t - center;
            let len = from_center.length();
            t = if len == 0.0 {
                center + Vec2::new(radius, 0.0)
            } else {
                center + from_center * (radius / len)
            };
        }
    }
    q0 - t
}

fn check_finite(p: &TransformParams) -> SubperspResult<()> {
    let org = p.origin();
    let values = [
        ("fax", p.fax),
        ("fscx", p.fsc.x),
        ("fscy", p.fsc.y),
        ("frz", p.angle_z),
        ("frx", p.angle_x),
        ("fry", p.angle_y),
        ("xbord", p.bord.x),
        ("ybord", p.bord.y),
        ("xshad", p.shad.x),
        ("yshad", p.shad.y),
        ("org.x", org.x),
        ("org.y", org.y),
        ("pos.x", p.pos.x),
        ("pos.y", p.pos.y),
    ];
    match values.iter().find(|(_, v)| !v.is_finite()) {
        Some((name, _)) => Err(SubperspError::NonFinite(*name)),
        None => Ok(()),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/inverse.rs"]
mod tests;
