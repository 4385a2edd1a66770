//! subpersp solves the geometry behind 3D perspective typesetting of ASS subtitles.
//!
//! A line's transform overrides (`\frx \fry \frz \fax \fscx \fscy \org \pos`, plus
//! outline and shadow) determine the quadrilateral the renderer draws its text box
//! into. This crate converts in both directions:
//!
//! 1. **Forward**: `TransformParams + TextExtents -> Quad` ([`project`])
//! 2. **Inverse**: `Quad -> TransformParams` ([`unproject`]), with a choice of where
//!    `\org` goes ([`OriginMode`])
//! 3. **Tags**: `TransformParams -> Vec<TagEdit>` ([`emit`]), omitting values equal to
//!    the style defaults
//!
//! [`PerspectiveTool`] drives these from pointer drags on the quad corners, optionally
//! inside an ambient plane ([`AmbientPlane`]) that the text box stays a fixed
//! sub-rectangle of.
//!
//! Reading lines from and writing edits back to a subtitle document is left to the
//! caller.
#![forbid(unsafe_code)]

mod foundation;

pub mod config;
pub mod frame;
pub mod geometry;
pub mod plane;
pub mod tool;
pub mod transform;

pub use config::ToolSettings;
pub use foundation::core::{Alignment, Point, Rect, Vec2, Vec3};
pub use foundation::error::{SubperspError, SubperspResult};
pub use foundation::math::solve_2x2;
pub use frame::{DEFAULT_SCREEN_Z, ScriptFrame};
pub use geometry::{Quad, sub_quad, uv_to_xy, xy_to_uv};
pub use plane::{AMBIENT_PLANE_KEY, AmbientPlane, PlaneMode, PlaneRecord, QuadRole};
pub use tool::{DragOutcome, Handle, HandleGroup, HandleId, Modifiers, PerspectiveTool};
pub use transform::{
    LineState, OriginMode, StyleDefaults, TagEdit, TextExtents, TransformParams, Unprojection,
    emit, override_block, project, unproject,
};
