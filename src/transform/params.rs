use crate::foundation::core::{Alignment, Point, Rect, Vec2};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Override values describing where and how a line is placed in 3D.
pub struct TransformParams {
    /// `\frx` in degrees.
    #[serde(default)]
    pub angle_x: f64,
    /// `\fry` in degrees.
    #[serde(default)]
    pub angle_y: f64,
    /// `\frz` in degrees.
    #[serde(default)]
    pub angle_z: f64,
    /// `\fax` shear factor.
    #[serde(default)]
    pub fax: f64,
    /// `\fay` shear factor.
    #[serde(default)]
    pub fay: f64,
    /// `\fscx`, `\fscy` in percent.
    #[serde(default = "default_scale")]
    pub fsc: Vec2,
    /// `\xbord`, `\ybord`.
    #[serde(default)]
    pub bord: Vec2,
    /// `\xshad`, `\yshad`.
    #[serde(default)]
    pub shad: Vec2,
    /// `\org`, if the line has one.
    #[serde(default)]
    pub org: Option<Point>,
    /// `\pos`.
    #[serde(default)]
    pub pos: Point,
    /// `\an`.
    #[serde(default)]
    pub align: Alignment,
}

fn default_scale() -> Vec2 {
    Vec2::new(100.0, 100.0)
}

impl Default for TransformParams {
    fn default() -> Self {
        Self {
            angle_x: 0.0,
            angle_y: 0.0,
            angle_z: 0.0,
            fax: 0.0,
            fay: 0.0,
            fsc: default_scale(),
            bord: Vec2::ZERO,
            shad: Vec2::ZERO,
            org: None,
            pos: Point::ORIGIN,
            align: Alignment::default(),
        }
    }
}

impl TransformParams {
    /// Rotation origin as the renderer sees it: `\org`, or `\pos` without one.
    pub fn origin(&self) -> Point {
        self.org.unwrap_or(self.pos)
    }
}

/// Bounding box of the unformatted text or drawing, before any transform.
///
/// Supplied by the text measurement collaborator. Text boxes start at the origin;
/// drawings may not.
pub type TextExtents = Rect;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Style values a line falls back to when an override is removed.
pub struct StyleDefaults {
    /// Style `ScaleX`, `ScaleY` in percent.
    pub scale: Vec2,
    /// Style `Angle` in degrees.
    pub angle: f64,
    /// Style `Outline` width.
    pub outline: f64,
    /// Style `Shadow` depth.
    pub shadow: f64,
}

impl Default for StyleDefaults {
    fn default() -> Self {
        Self {
            scale: default_scale(),
            angle: 0.0,
            outline: 2.0,
            shadow: 2.0,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// Snapshot of the active line, as read from the subtitle document.
pub struct LineState {
    /// Current override values (style defaults already applied).
    pub params: TransformParams,
    /// Unformatted extents of the text or drawing.
    pub extents: TextExtents,
    /// Style of the line.
    #[serde(default)]
    pub style: StyleDefaults,
    /// Persisted ambient plane descriptor, if any.
    #[serde(default)]
    pub ambient_plane: Option<String>,
}

/// Extents size with each side floored at one pixel.
pub(crate) fn floored_size(extents: &TextExtents) -> Vec2 {
    Vec2::new(extents.width().max(1.0), extents.height().max(1.0))
}
