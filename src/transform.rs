//! Conversions between override tags and the on-screen quad.

pub mod forward;
pub mod inverse;
pub mod params;
pub mod tags;

pub use forward::project;
pub use inverse::{OriginMode, Unprojection, unproject};
pub use params::{LineState, StyleDefaults, TextExtents, TransformParams};
pub use tags::{TagEdit, emit, override_block};
