//! Script and display coordinate frames.

use crate::foundation::core::{Point, Vec2};
use crate::foundation::error::{SubperspError, SubperspResult};

/// Camera distance of the renderer, in layout pixels at a layout height of 1.
pub const DEFAULT_SCREEN_Z: f64 = 312.5;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Relation between script resolution, layout resolution and the video area on screen.
pub struct ScriptFrame {
    /// `PlayResX`, `PlayResY`.
    pub script_res: Vec2,
    /// `LayoutResX`, `LayoutResY`; defaults to the script resolution.
    pub layout_res: Vec2,
    /// Top-left corner of the video area in display coordinates.
    pub video_pos: Point,
    /// Size of the video area in display coordinates.
    pub video_res: Vec2,
}

impl ScriptFrame {
    /// Frame whose display coordinates coincide with script coordinates.
    pub fn identity(script_res: Vec2) -> Self {
        Self {
            script_res,
            layout_res: script_res,
            video_pos: Point::ORIGIN,
            video_res: script_res,
        }
    }

    pub fn validate(&self) -> SubperspResult<()> {
        for (name, v) in [
            ("script_res", self.script_res),
            ("layout_res", self.layout_res),
            ("video_res", self.video_res),
        ] {
            if !(v.x > 0.0 && v.y > 0.0 && v.x.is_finite() && v.y.is_finite()) {
                return Err(SubperspError::validation(format!(
                    "{name} must be positive, got {v:?}"
                )));
            }
        }
        Ok(())
    }

    pub fn to_script(&self, p: Point) -> Point {
        let d = p - self.video_pos;
        Point::new(
            d.x * self.script_res.x / self.video_res.x,
            d.y * self.script_res.y / self.video_res.y,
        )
    }

    pub fn from_script(&self, p: Point) -> Point {
        self.video_pos
            + Vec2::new(
                p.x * self.video_res.x / self.script_res.x,
                p.y * self.video_res.y / self.script_res.y,
            )
    }

    /// Camera distance in script pixels.
    pub fn screen_z(&self) -> f64 {
        DEFAULT_SCREEN_Z * self.script_res.y / self.layout_res.y
    }
}

impl Default for ScriptFrame {
    fn default() -> Self {
        Self::identity(Vec2::new(1920.0, 1080.0))
    }
}
