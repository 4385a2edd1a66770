//! Interactive editing of the perspective quad: handles, drags and modifiers.
//!
//! Handle positions are in display coordinates; the solve runs in script
//! coordinates through the tool's [`ScriptFrame`].

mod handles;
mod snap;

pub use handles::{Handle, HandleGroup, HandleId};

use handles::HandleArena;

use crate::config::ToolSettings;
use crate::foundation::core::{Point, Vec2};
use crate::foundation::error::{SubperspError, SubperspResult};
use crate::frame::ScriptFrame;
use crate::geometry::quad::Quad;
use crate::geometry::uv::xy_to_uv;
use crate::plane::{AmbientPlane, PlaneMode, PlaneRecord, QuadRole};
use crate::transform::forward::project;
use crate::transform::inverse::{Unprojection, unproject};
use crate::transform::params::{LineState, TransformParams};
use crate::transform::tags::{TagEdit, emit};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Keyboard modifiers held during a drag.
pub struct Modifiers {
    /// Move the corners of the dragged quad symmetrically.
    pub ctrl: bool,
    /// Constrain to one axis, or with `ctrl + alt` snap to a corner.
    pub shift: bool,
    /// With `ctrl`, snap onto a diagonal.
    pub alt: bool,
}

#[derive(Clone, Debug, PartialEq)]
/// Result of one drag frame.
pub enum DragOutcome {
    /// The text quad was solved; these edits go to every selected line.
    Applied { edits: Vec<TagEdit> },
    /// The proposed quad could not be used. Handles were reset to the last solved state.
    Rejected,
}

#[derive(Clone, Copy, Debug)]
struct ActiveDrag {
    handle: HandleId,
    start: Point,
}

/// Perspective tool state for one active line.
#[derive(Clone, Debug)]
pub struct PerspectiveTool {
    settings: ToolSettings,
    frame: ScriptFrame,
    handles: HandleArena,
    line: Option<LineState>,
    plane: AmbientPlane,
    // Fractions matching the last solved text quad.
    committed_plane: AmbientPlane,
    // Origin for the next solve, script coordinates.
    origin: Point,
    old_inner: Quad,
    old_outer: Option<Quad>,
    drag: Option<ActiveDrag>,
}

impl PerspectiveTool {
    pub fn new(mut settings: ToolSettings, frame: ScriptFrame) -> SubperspResult<Self> {
        settings.validate()?;
        frame.validate()?;
        let handles = HandleArena::new(
            settings.has_origin_handle(),
            settings.plane_mode().has_outer(),
        );
        let empty = Quad::new([Point::ORIGIN; 4]);
        Ok(Self {
            settings,
            frame,
            handles,
            line: None,
            plane: AmbientPlane::default(),
            committed_plane: AmbientPlane::default(),
            origin: Point::ORIGIN,
            old_inner: empty,
            old_outer: None,
            drag: None,
        })
    }

    pub fn settings(&self) -> &ToolSettings {
        &self.settings
    }

    pub fn frame(&self) -> &ScriptFrame {
        &self.frame
    }

    pub fn mode(&self) -> PlaneMode {
        self.settings.plane_mode()
    }

    /// Apply new toolbar settings. Rebuilds the handle set, so earlier [`HandleId`]s
    /// become invalid.
    pub fn set_settings(&mut self, mut settings: ToolSettings) -> SubperspResult<()> {
        settings.validate()?;
        self.settings = settings;
        self.handles = HandleArena::new(
            settings.has_origin_handle(),
            settings.plane_mode().has_outer(),
        );
        self.drag = None;
        self.reset_to_committed();
        self.save_positions();
        Ok(())
    }

    /// Switch to a new video area or script resolution.
    pub fn set_frame(&mut self, frame: ScriptFrame) -> SubperspResult<()> {
        frame.validate()?;
        self.frame = frame;
        self.reset_to_committed();
        self.save_positions();
        Ok(())
    }

    pub fn handles(&self) -> &[Handle] {
        self.handles.all()
    }

    pub fn handle(&self, id: HandleId) -> Option<&Handle> {
        self.handles.get(id)
    }

    pub fn handle_id(&self, group: HandleGroup, index: usize) -> Option<HandleId> {
        self.handles.find(group, index)
    }

    /// Text quad in display coordinates.
    pub fn inner_quad(&self) -> Quad {
        self.handles.inner()
    }

    /// Ambient plane in display coordinates, when shown.
    pub fn outer_quad(&self) -> Option<Quad> {
        self.handles.quad(HandleGroup::Outer)
    }

    pub fn plane(&self) -> &AmbientPlane {
        &self.plane
    }

    /// The active line, with the values of the last successful solve.
    pub fn line(&self) -> Option<&LineState> {
        self.line.as_ref()
    }

    /// Rotation origin used by the next solve, script coordinates.
    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Make `line` the active line and place the handles from its tags.
    ///
    /// A persisted ambient plane that cannot be parsed or used is ignored and the
    /// current fractions are kept.
    #[tracing::instrument(skip(self, line))]
    pub fn load(&mut self, line: LineState) {
        let text_quad = project(&line.params, &line.extents, self.frame.screen_z());
        if let Some(descriptor) = &line.ambient_plane {
            match AmbientPlane::decode(descriptor) {
                Ok(outer) => {
                    if !self.plane.fit(&outer, &text_quad) {
                        tracing::debug!(
                            descriptor = %descriptor,
                            "ambient plane is degenerate; ignoring it"
                        );
                    }
                }
                Err(e) => tracing::debug!(error = %e, "ignoring persisted ambient plane"),
            }
        }
        self.committed_plane = self.plane;
        self.line = Some(line);
        self.drag = None;
        self.reset_to_committed();
        self.save_positions();
    }

    pub fn begin_drag(&mut self, id: HandleId) -> SubperspResult<()> {
        if self.line.is_none() {
            return Err(SubperspError::validation("no active line"));
        }
        let handle = self
            .handles
            .get(id)
            .ok_or_else(|| SubperspError::validation(format!("unknown handle {id:?}")))?;
        self.drag = Some(ActiveDrag {
            handle: id,
            start: handle.pos,
        });
        Ok(())
    }

    /// Move the dragged handle to its drag start plus `delta` (display coordinates) and
    /// re-solve.
    pub fn drag(
        &mut self,
        id: HandleId,
        delta: Vec2,
        modifiers: Modifiers,
    ) -> SubperspResult<DragOutcome> {
        let active = self
            .drag
            .filter(|d| d.handle == id)
            .ok_or_else(|| {
                SubperspError::validation(format!("handle {id:?} is not being dragged"))
            })?;
        let group = self.handles.all()[id.0].group;

        let mut delta = delta;
        if modifiers.shift && !(modifiers.ctrl && modifiers.alt) && self.axis_snap_applies(group)
        {
            delta = snap::single_axis(&self.old_inner, active.start, delta);
        }
        self.handles.set_pos(id, active.start + delta);
        Ok(self.update(id, modifiers))
    }

    /// Finish the drag. Returns the ambient plane record to store on the selected lines
    /// when the plane is shown.
    pub fn end_drag(&mut self) -> Option<PlaneRecord> {
        self.drag = None;
        self.save_positions();

        let outer = self.handles.quad(HandleGroup::Outer)?;
        let script = outer.map(|p| self.frame.to_script(p));
        match AmbientPlane::encode(&script) {
            Ok(value) => {
                if let Some(line) = self.line.as_mut() {
                    line.ambient_plane = Some(value.clone());
                }
                Some(PlaneRecord::new(value))
            }
            Err(e) => {
                tracing::debug!(error = %e, "not saving ambient plane");
                None
            }
        }
    }

    /// Move the closest corner of the driving quad to `pointer` and commit.
    pub fn double_click(
        &mut self,
        pointer: Point,
        modifiers: Modifiers,
    ) -> SubperspResult<(DragOutcome, Option<PlaneRecord>)> {
        if self.line.is_none() {
            return Err(SubperspError::validation("no active line"));
        }
        let group = match self.mode().driver() {
            QuadRole::Inner => HandleGroup::Inner,
            QuadRole::Outer => HandleGroup::Outer,
        };
        let closest = self.handles.corners(group).and_then(|ids| {
            ids.into_iter().min_by(|a, b| {
                let da = (self.handles.pos(*a) - pointer).length_squared();
                let db = (self.handles.pos(*b) - pointer).length_squared();
                da.total_cmp(&db)
            })
        });
        let Some(id) = closest else {
            return Err(SubperspError::validation("no corner handles"));
        };

        self.handles.set_pos(id, pointer);
        let outcome = self.update(id, modifiers);
        let record = self.end_drag();
        Ok((outcome, record))
    }

    fn axis_snap_applies(&self, group: HandleGroup) -> bool {
        group != HandleGroup::Center || self.mode() == PlaneMode::InnerFollowsOuter
    }

    /// Propagate a moved handle to the quads, then gate and solve.
    fn update(&mut self, id: HandleId, modifiers: Modifiers) -> DragOutcome {
        let handle = self.handles.all()[id.0];
        match handle.group {
            HandleGroup::Center => self.move_center(handle.pos),
            HandleGroup::Origin => self.origin = self.frame.to_script(handle.pos),
            HandleGroup::Inner | HandleGroup::Outer => {
                if modifiers.ctrl {
                    self.mirror_corner(handle, modifiers);
                }
                // Coupling rebuilds quads from fractions, which would hide a crossed corner.
                if !self.group_convex(handle.group) {
                    tracing::debug!(
                        group = ?handle.group,
                        index = handle.index,
                        "dragged quad is not convex"
                    );
                    return self.reject();
                }
                if modifiers.ctrl {
                    self.refit_after_mirror(handle);
                } else {
                    self.move_corner(handle);
                }
            }
        }

        if !self.quads_convex(handle.group) {
            tracing::debug!(group = ?handle.group, index = handle.index, "quad is not convex");
            return self.reject();
        }
        self.solve()
    }

    fn move_center(&mut self, target: Point) {
        let inner = self.handles.inner();
        let old_center = inner.midpoint();
        match (self.mode(), self.handles.quad(HandleGroup::Outer)) {
            (PlaneMode::InnerFollowsOuter, Some(outer)) => {
                self.plane
                    .shift(xy_to_uv(&outer, target) - xy_to_uv(&outer, old_center));
                self.follow(QuadRole::Inner);
            }
            _ => {
                self.handles
                    .set_quad(HandleGroup::Inner, &inner.translate(target - old_center));
                self.follow(QuadRole::Outer);
            }
        }
    }

    fn move_corner(&mut self, handle: Handle) {
        let Some(derived) = self.mode().derived() else {
            return;
        };
        // A dragged follower corner changes where the follower sits on the driver.
        match (role_of(handle.group), derived) {
            (Some(QuadRole::Inner), QuadRole::Inner) => {
                if let Some(outer) = self.handles.quad(HandleGroup::Outer) {
                    self.plane
                        .move_inner_corner(handle.index, xy_to_uv(&outer, handle.pos));
                }
            }
            (Some(QuadRole::Outer), QuadRole::Outer) => {
                let inner = self.handles.inner();
                self.plane
                    .move_outer_corner(handle.index, xy_to_uv(&inner, handle.pos));
            }
            _ => {}
        }
        self.follow(derived);
    }

    fn mirror_corner(&mut self, handle: Handle, modifiers: Modifiers) {
        let old = match handle.group {
            HandleGroup::Outer => match self.old_outer {
                Some(q) => q,
                None => return,
            },
            _ => self.old_inner,
        };

        let mut target = handle.pos;
        if modifiers.alt {
            target = if modifiers.shift {
                snap::nearest_corner(&old, target)
            } else {
                snap::onto_diagonals(&old, target)
            };
        }
        self.handles
            .set_quad(handle.group, &snap::mirror(&old, handle.index, target));
    }

    fn refit_after_mirror(&mut self, handle: Handle) {
        let Some(derived) = self.mode().derived() else {
            return;
        };
        if role_of(handle.group) == Some(derived) {
            if let Some(outer) = self.handles.quad(HandleGroup::Outer) {
                let inner = self.handles.inner();
                self.plane.fit(&outer, &inner);
            }
        }
        self.follow(derived);
    }

    /// Recompute `role` from the other quad and the current fractions.
    fn follow(&mut self, role: QuadRole) {
        let Some(outer) = self.handles.quad(HandleGroup::Outer) else {
            return;
        };
        match role {
            QuadRole::Inner => {
                let inner = self.plane.inner_from_outer(&outer);
                self.handles.set_quad(HandleGroup::Inner, &inner);
            }
            QuadRole::Outer => {
                let outer = self.plane.outer_from_inner(&self.handles.inner());
                self.handles.set_quad(HandleGroup::Outer, &outer);
            }
        }
    }

    fn group_convex(&self, group: HandleGroup) -> bool {
        self.handles.quad(group).is_none_or(|q| q.is_convex())
    }

    fn quads_convex(&self, group: HandleGroup) -> bool {
        let outer_ok = group != HandleGroup::Outer
            || self
                .handles
                .quad(HandleGroup::Outer)
                .is_none_or(|q| q.is_convex());
        outer_ok && self.handles.inner().is_convex()
    }

    fn solve(&mut self) -> DragOutcome {
        let Some(line) = self.line.as_ref() else {
            return DragOutcome::Rejected;
        };
        let quad = self.handles.inner().map(|p| self.frame.to_script(p));
        let previous = TransformParams {
            org: Some(self.origin),
            ..line.params
        };
        let solved = unproject(
            &quad,
            &Unprojection {
                extents: &line.extents,
                previous: &previous,
                mode: self.settings.origin_mode,
                screen_z: self.frame.screen_z(),
            },
        );

        match solved {
            Ok(params) => {
                let edits = emit(&params, &line.style);
                if let Some(line) = self.line.as_mut() {
                    line.params = params;
                }
                self.committed_plane = self.plane;
                self.origin = params.origin();
                self.place_markers();
                DragOutcome::Applied { edits }
            }
            Err(e) => {
                tracing::debug!(error = %e, "solve rejected");
                self.reject()
            }
        }
    }

    fn reject(&mut self) -> DragOutcome {
        self.reset_to_committed();
        DragOutcome::Rejected
    }

    /// Place every handle from the last solved values.
    fn reset_to_committed(&mut self) {
        self.plane = self.committed_plane;
        let Some(line) = self.line.as_ref() else {
            return;
        };
        self.origin = line.params.origin();
        let inner = project(&line.params, &line.extents, self.frame.screen_z())
            .map(|p| self.frame.from_script(p));
        self.handles.set_quad(HandleGroup::Inner, &inner);
        self.follow(QuadRole::Outer);
        self.place_markers();
    }

    fn place_markers(&mut self) {
        let center = self.handles.inner().midpoint();
        self.handles.set_pos(self.handles.center(), center);
        if let Some(id) = self.handles.origin() {
            self.handles.set_pos(id, self.frame.from_script(self.origin));
        }
    }

    fn save_positions(&mut self) {
        self.old_inner = self.handles.inner();
        self.old_outer = self.handles.quad(HandleGroup::Outer);
    }
}

fn role_of(group: HandleGroup) -> Option<QuadRole> {
    match group {
        HandleGroup::Inner => Some(QuadRole::Inner),
        HandleGroup::Outer => Some(QuadRole::Outer),
        HandleGroup::Center | HandleGroup::Origin => None,
    }
}

#[cfg(test)]
#[path = "../tests/unit/tool.rs"]
mod tests;
