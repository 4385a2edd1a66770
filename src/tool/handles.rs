use crate::foundation::core::Point;
use crate::geometry::quad::Quad;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
/// What a handle controls.
pub enum HandleGroup {
    /// Midpoint of the text quad; drags move the whole quad.
    Center,
    /// `\org`, present only while the origin is kept between solves.
    Origin,
    /// Corner of the text quad.
    Inner,
    /// Corner of the ambient plane.
    Outer,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// Index of a handle in the tool's arena. Invalidated when the handle set is rebuilt.
pub struct HandleId(pub(crate) usize);

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
/// Draggable point, in display coordinates.
pub struct Handle {
    pub group: HandleGroup,
    /// Corner index for `Inner` and `Outer`, 0 otherwise.
    pub index: usize,
    pub pos: Point,
}

/// Flat handle storage plus the ids of each group.
#[derive(Clone, Debug)]
pub(crate) struct HandleArena {
    handles: Vec<Handle>,
    center: HandleId,
    origin: Option<HandleId>,
    inner: [HandleId; 4],
    outer: Option<[HandleId; 4]>,
}

impl HandleArena {
    pub(crate) fn new(with_origin: bool, with_outer: bool) -> Self {
        let mut handles = Vec::with_capacity(10);
        let mut push = |group: HandleGroup, index: usize| {
            handles.push(Handle {
                group,
                index,
                pos: Point::ORIGIN,
            });
            HandleId(handles.len() - 1)
        };

        let center = push(HandleGroup::Center, 0);
        let origin = with_origin.then(|| push(HandleGroup::Origin, 0));
        let inner = std::array::from_fn(|i| push(HandleGroup::Inner, i));
        let outer = with_outer.then(|| std::array::from_fn(|i| push(HandleGroup::Outer, i)));

        Self {
            handles,
            center,
            origin,
            inner,
            outer,
        }
    }

    pub(crate) fn all(&self) -> &[Handle] {
        &self.handles
    }

    pub(crate) fn get(&self, id: HandleId) -> Option<&Handle> {
        self.handles.get(id.0)
    }

    pub(crate) fn pos(&self, id: HandleId) -> Point {
        self.handles[id.0].pos
    }

    pub(crate) fn set_pos(&mut self, id: HandleId, pos: Point) {
        self.handles[id.0].pos = pos;
    }

    pub(crate) fn find(&self, group: HandleGroup, index: usize) -> Option<HandleId> {
        self.handles
            .iter()
            .position(|h| h.group == group && h.index == index)
            .map(HandleId)
    }

    pub(crate) fn center(&self) -> HandleId {
        self.center
    }

    pub(crate) fn origin(&self) -> Option<HandleId> {
        self.origin
    }

    pub(crate) fn corners(&self, group: HandleGroup) -> Option<[HandleId; 4]> {
        match group {
            HandleGroup::Inner => Some(self.inner),
            HandleGroup::Outer => self.outer,
            HandleGroup::Center | HandleGroup::Origin => None,
        }
    }

    pub(crate) fn quad(&self, group: HandleGroup) -> Option<Quad> {
        self.corners(group)
            .map(|ids| Quad::new(ids.map(|id| self.pos(id))))
    }

    pub(crate) fn inner(&self) -> Quad {
        Quad::new(self.inner.map(|id| self.pos(id)))
    }

    /// Does nothing for a group without corners.
    pub(crate) fn set_quad(&mut self, group: HandleGroup, quad: &Quad) {
        if let Some(ids) = self.corners(group) {
            for (id, p) in ids.into_iter().zip(quad.0) {
                self.set_pos(id, p);
            }
        }
    }
}
