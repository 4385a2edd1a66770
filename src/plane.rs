//! Ambient plane: an outer reference quad that the text quad is a fixed
//! sub-rectangle of, in the outer quad's unit-square coordinates.

use crate::foundation::core::{Point, Vec2};
use crate::foundation::error::{SubperspError, SubperspResult};
use crate::foundation::math::vec_is_finite;
use crate::geometry::quad::Quad;
use crate::geometry::uv::{sub_quad, xy_to_uv};

/// Extradata key the outer quad is stored under.
pub const AMBIENT_PLANE_KEY: &str = "_aegi_perspective_ambient_plane";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// One of the two quads the tool shows.
pub enum QuadRole {
    /// The text box.
    Inner,
    /// The ambient plane.
    Outer,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Which quad is edited freely and which one follows it.
pub enum PlaneMode {
    /// No ambient plane; only the text quad exists.
    #[default]
    Hidden,
    /// The outer quad drives; the text quad is recomputed from `c1`, `c2`.
    InnerFollowsOuter,
    /// The outer quad is locked to the text quad and recomputed from it.
    OuterFollowsInner,
}

impl PlaneMode {
    pub fn has_outer(self) -> bool {
        self != Self::Hidden
    }

    pub fn outer_locked(self) -> bool {
        self == Self::OuterFollowsInner
    }

    /// The quad the user edits directly.
    pub fn driver(self) -> QuadRole {
        match self {
            Self::InnerFollowsOuter => QuadRole::Outer,
            Self::Hidden | Self::OuterFollowsInner => QuadRole::Inner,
        }
    }

    /// The quad recomputed whenever the driver changes.
    pub fn derived(self) -> Option<QuadRole> {
        match self {
            Self::Hidden => None,
            Self::InnerFollowsOuter => Some(QuadRole::Inner),
            Self::OuterFollowsInner => Some(QuadRole::Outer),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// Placement of the text quad inside the outer quad.
///
/// `c1` and `c2` are the unit-square coordinates of the text quad's corners 0 and 2.
pub struct AmbientPlane {
    pub c1: Vec2,
    pub c2: Vec2,
}

impl Default for AmbientPlane {
    fn default() -> Self {
        Self {
            c1: Vec2::new(0.25, 0.25),
            c2: Vec2::new(0.75, 0.75),
        }
    }
}

impl AmbientPlane {
    pub fn inner_from_outer(&self, outer: &Quad) -> Quad {
        sub_quad(outer, self.c1, self.c2)
    }

    pub fn outer_from_inner(&self, inner: &Quad) -> Quad {
        let (d1, d2) = invert_fractions(self.c1, self.c2);
        sub_quad(inner, d1, d2)
    }

    /// Re-derive the fractions from an outer and inner quad pair.
    ///
    /// Leaves the fractions untouched and returns `false` if they come out
    /// non-finite.
    pub fn fit(&mut self, outer: &Quad, inner: &Quad) -> bool {
        let c1 = xy_to_uv(outer, inner[0]);
        let c2 = xy_to_uv(outer, inner[2]);
        if !(vec_is_finite(c1) && vec_is_finite(c2)) {
            return false;
        }
        self.c1 = c1;
        self.c2 = c2;
        true
    }

    /// Move the text quad inside the outer quad by `delta` in outer UV space.
    pub fn shift(&mut self, delta: Vec2) {
        self.c1 += delta;
        self.c2 += delta;
    }

    /// Text quad corner `index` moved to `uv` (outer coordinates); the corners
    /// sharing an edge with it follow.
    pub fn move_inner_corner(&mut self, index: usize, uv: Vec2) {
        (self.c1, self.c2) = move_rect_corner(self.c1, self.c2, index, uv);
    }

    /// Outer quad corner `index` moved to `uv`, given in the text quad's own
    /// coordinates. Used while the outer quad is locked to the text quad.
    pub fn move_outer_corner(&mut self, index: usize, uv: Vec2) {
        let (d1, d2) = invert_fractions(self.c1, self.c2);
        let (d1, d2) = move_rect_corner(d1, d2, index, uv);
        (self.c1, self.c2) = invert_fractions(d1, d2);
    }

    /// Serialize the outer quad (script coordinates) as `x1;y1|x2;y2|x3;y3|x4;y4`.
    pub fn encode(outer: &Quad) -> SubperspResult<String> {
        if !outer.is_finite() {
            return Err(SubperspError::NonFinite("ambient plane corner"));
        }
        let fields: Vec<String> = outer
            .corners()
            .iter()
            .map(|p| format!("{:.2};{:.2}", p.x, p.y))
            .collect();
        Ok(fields.join("|"))
    }

    /// Parse a descriptor written by [`AmbientPlane::encode`].
    pub fn decode(descriptor: &str) -> SubperspResult<Quad> {
        let fields: Vec<&str> = descriptor.split('|').collect();
        if fields.len() != 4 {
            return Err(SubperspError::malformed_plane(format!(
                "expected 4 corners, got {}",
                fields.len()
            )));
        }

        let mut corners = [Point::ORIGIN; 4];
        for (corner, field) in corners.iter_mut().zip(fields) {
            let ordinates: Vec<&str> = field.split(';').collect();
            let [x, y] = ordinates.as_slice() else {
                return Err(SubperspError::malformed_plane(format!(
                    "corner '{field}' is not an x;y pair"
                )));
            };
            *corner = Point::new(parse_ordinate(x)?, parse_ordinate(y)?);
        }
        Ok(Quad::new(corners))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
/// Extradata entry to attach to every selected line.
pub struct PlaneRecord {
    pub key: &'static str,
    pub value: String,
}

impl PlaneRecord {
    pub fn new(value: String) -> Self {
        Self {
            key: AMBIENT_PLANE_KEY,
            value,
        }
    }
}

fn parse_ordinate(s: &str) -> SubperspResult<f64> {
    let v: f64 = s
        .trim()
        .parse()
        .map_err(|_| SubperspError::malformed_plane(format!("'{s}' is not a number")))?;
    if !v.is_finite() {
        return Err(SubperspError::malformed_plane(format!("'{s}' is not finite")));
    }
    Ok(v)
}

/// Swap the roles of the two quads: if the inner rectangle spans `c1..c2` in outer
/// coordinates, the outer one spans the returned pair in inner coordinates.
fn invert_fractions(c1: Vec2, c2: Vec2) -> (Vec2, Vec2) {
    let span = c2 - c1;
    (
        Vec2::new(-c1.x / span.x, -c1.y / span.y),
        Vec2::new((1.0 - c1.x) / span.x, (1.0 - c1.y) / span.y),
    )
}

/// Move one corner of the axis-aligned rectangle `c1..c2` (corner order TL, TR, BR,
/// BL) to `uv`.
fn move_rect_corner(c1: Vec2, c2: Vec2, index: usize, uv: Vec2) -> (Vec2, Vec2) {
    let left = index == 0 || index == 3;
    let top = index < 2;
    (
        Vec2::new(
            if left { uv.x } else { c1.x },
            if top { uv.y } else { c1.y },
        ),
        Vec2::new(
            if left { c2.x } else { uv.x },
            if top { c2.y } else { uv.y },
        ),
    )
}

#[cfg(test)]
#[path = "../tests/unit/plane.rs"]
mod tests;
