//! Quad geometry: diagonal intersection, convexity and the unit-square maps.

pub mod quad;
pub mod uv;

pub use quad::Quad;
pub use uv::{sub_quad, uv_to_xy, xy_to_uv};
