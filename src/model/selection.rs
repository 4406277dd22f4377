use super::{ProjectId, StudentId};

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct SelectionId(pub usize);

/// Identifier of one step of the search. Pruning performed while at a given
/// call is stamped with it so that it can be undone by
/// [`Selections::backtrack`](super::Selections::backtrack).
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct CallId(pub u32);

impl CallId {
    /// Call used by the uncontested first-choice pass.
    pub const UNCONTESTED: CallId = CallId(1);
    /// Depth at which the backtracking search starts.
    pub const SEARCH: CallId = CallId(2);

    #[must_use]
    pub fn next(self) -> CallId {
        CallId(self.0 + 1)
    }
}

/// A student's ranked link to one project.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection {
    pub id: SelectionId,
    /// Rank within the student's choices, 1 being the most preferred.
    pub serial: u32,
    pub student: StudentId,
    pub project: ProjectId,
    allocated: bool,
    unavailable_since: Option<CallId>,
}

impl Selection {
    pub fn new(id: SelectionId, serial: u32, student: StudentId, project: ProjectId) -> Self {
        Self {
            id,
            serial,
            student,
            project,
            allocated: false,
            unavailable_since: None,
        }
    }

    pub fn is_allocated(&self) -> bool {
        self.allocated
    }

    pub fn is_available(&self) -> bool {
        self.unavailable_since.is_none()
    }

    pub fn unavailable_since(&self) -> Option<CallId> {
        self.unavailable_since
    }

    pub(super) fn hide(&mut self, call: CallId) {
        self.unavailable_since = Some(call);
    }

    pub(super) fn restore(&mut self) {
        self.unavailable_since = None;
    }

    pub(super) fn set_allocated(&mut self, allocated: bool) {
        self.allocated = allocated;
    }
}
