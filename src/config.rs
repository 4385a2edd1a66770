//! Persisted tool options.

use crate::foundation::error::{SubperspError, SubperspResult};
use crate::plane::PlaneMode;
use crate::transform::inverse::OriginMode;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
/// Toolbar state of the perspective tool, stored as JSON between sessions.
pub struct ToolSettings {
    /// Show the ambient plane.
    pub outer: bool,
    /// Lock the ambient plane to the text quad. Only meaningful with `outer`.
    pub outer_locked: bool,
    /// Draw the perspective grid. Carried for the drawing layer.
    pub grid: bool,
    pub origin_mode: OriginMode,
}

impl ToolSettings {
    pub fn from_json(s: &str) -> SubperspResult<Self> {
        let mut settings: Self = serde_json::from_str(s)
            .map_err(|e| SubperspError::serde(format!("parse tool settings JSON: {e}")))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> SubperspResult<String> {
        serde_json::to_string(self)
            .map_err(|e| SubperspError::serde(format!("write tool settings JSON: {e}")))
    }

    /// Drop a lock that has no plane to apply to.
    pub fn validate(&mut self) -> SubperspResult<()> {
        if self.outer_locked && !self.outer {
            tracing::debug!("outer_locked without outer plane; clearing lock");
            self.outer_locked = false;
        }
        Ok(())
    }

    pub fn plane_mode(&self) -> PlaneMode {
        match (self.outer, self.outer_locked) {
            (false, _) => PlaneMode::Hidden,
            (true, false) => PlaneMode::InnerFollowsOuter,
            (true, true) => PlaneMode::OuterFollowsInner,
        }
    }

    /// The origin handle is only shown when the origin is kept between solves.
    pub fn has_origin_handle(&self) -> bool {
        self.origin_mode == OriginMode::Keep
    }

    pub fn toggle_outer(&mut self) {
        self.outer = !self.outer;
        if !self.outer {
            self.outer_locked = false;
        }
    }

    /// Has no effect while the plane is hidden.
    pub fn toggle_outer_locked(&mut self) {
        if self.outer {
            self.outer_locked = !self.outer_locked;
        }
    }

    pub fn cycle_origin_mode(&mut self) {
        self.origin_mode = self.origin_mode.cycle();
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
