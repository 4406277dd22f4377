//! Allocation and undo primitives of the search.
//!
//! Every selection hidden while exploring a branch is stamped with the
//! [`CallId`] of that branch. Going back to a call restores what was hidden
//! at or after it, except for the selection which was attempted at exactly
//! this call: that one is un-allocated and stays hidden so that it is not
//! tried again from the same position.

use super::*;
use tracing::trace;

/// Capacity limits enforced during allocation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Limits {
    /// Maximum number of allocations across the projects of one supervisor.
    pub max_supervisor_projects: usize,
    /// Maximum number of students on a project accepting several students.
    pub max_project_students: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_supervisor_projects: 4,
            max_project_students: 1,
        }
    }
}

impl Selections {
    pub fn capacity(&self, project: ProjectId, limits: &Limits) -> usize {
        self.project(project).capacity(limits.max_project_students)
    }

    /// Allocate a selection at `call`, then hide every selection which can no
    /// longer be allocated because of it.
    pub fn allocate(&mut self, id: SelectionId, call: CallId, limits: &Limits) {
        let (student, project) = {
            let selection = self.selection(id);
            assert!(
                selection.is_available() && !selection.is_allocated(),
                "selection {id:?} cannot be allocated"
            );
            (selection.student, selection.project)
        };
        assert!(
            self.project_for(student).is_none(),
            "student {} already has a project",
            self.student(student)
        );
        let selection = self.selection_mut(id);
        selection.set_allocated(true);
        selection.hide(call);
        trace!(
            student = %self.student(student),
            project = %self.project(project),
            call = call.0,
            "allocating selection"
        );
        self.prune_project(project, call, limits);
        self.prune_student(student, call);
    }

    /// Hide the remaining selections of a project once it is full.
    fn prune_project(&mut self, project: ProjectId, call: CallId, limits: &Limits) {
        if self.project_allocated_count(project) < self.capacity(project, limits) {
            return;
        }
        let pruned = self
            .for_project(project)
            .filter(|s| s.is_available() && !s.is_allocated())
            .map(|s| s.id)
            .collect::<Vec<_>>();
        for id in pruned {
            self.selection_mut(id).hide(call);
        }
    }

    /// Hide the other choices of a student who just got a project.
    fn prune_student(&mut self, student: StudentId, call: CallId) {
        let pruned = self
            .for_student(student)
            .filter(|s| s.is_available() && !s.is_allocated())
            .map(|s| s.id)
            .collect::<Vec<_>>();
        for id in pruned {
            self.selection_mut(id).hide(call);
        }
    }

    /// Undo everything done at `call` or deeper.
    pub fn backtrack(&mut self, call: CallId) {
        let touched = self
            .iter()
            .filter(|s| s.unavailable_since().is_some_and(|c| c >= call))
            .map(|s| s.id)
            .collect::<Vec<_>>();
        for id in touched {
            let selection = self.selection_mut(id);
            if selection.unavailable_since() == Some(call) && selection.is_allocated() {
                selection.set_allocated(false);
            } else {
                selection.restore();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::selections::tests::selections;

    fn state(s: &Selections) -> Vec<(bool, Option<CallId>)> {
        s.iter()
            .map(|sel| (sel.is_allocated(), sel.unavailable_since()))
            .collect()
    }

    fn sample() -> Selections {
        selections(&[
            ("a", &[("X", "sx"), ("Y", "sy")]),
            ("b", &[("X", "sx"), ("Z", "sz")]),
            ("c", &[("Y", "sy"), ("Z", "sz")]),
        ])
    }

    #[test]
    fn test_allocate_prunes_student_and_full_project() {
        let mut s = sample();
        s.allocate(SelectionId(0), CallId(3), &Limits::default());
        assert!(s.selection(SelectionId(0)).is_allocated());
        assert_eq!(s.selection(SelectionId(0)).unavailable_since(), Some(CallId(3)));
        // a's other choice
        assert_eq!(s.selection(SelectionId(1)).unavailable_since(), Some(CallId(3)));
        // b's choice of the now full project X
        assert_eq!(s.selection(SelectionId(2)).unavailable_since(), Some(CallId(3)));
        assert!(s.selection(SelectionId(3)).is_available());
        assert_eq!(s.project_for(StudentId(0)), Some(ProjectId(0)));
        assert_eq!(s.total_serial(), 1);
    }

    #[test]
    fn test_allocate_keeps_project_open_under_capacity() {
        let mut s = sample();
        let limits = Limits {
            max_project_students: 2,
            ..Limits::default()
        };
        s.allocate(SelectionId(0), CallId(3), &limits);
        assert!(s.selection(SelectionId(2)).is_available());
    }

    #[test]
    fn test_single_student_project_overrides_limit() {
        let mut s = sample();
        let x = s.project_by_code("X").unwrap().id;
        s.set_allow_multiple(x, false);
        let limits = Limits {
            max_project_students: 2,
            ..Limits::default()
        };
        s.allocate(SelectionId(0), CallId(3), &limits);
        assert!(!s.selection(SelectionId(2)).is_available());
    }

    #[test]
    fn test_backtrack_without_stamps_is_noop() {
        let mut s = sample();
        let before = state(&s);
        s.backtrack(CallId(1));
        assert_eq!(state(&s), before);

        s.allocate(SelectionId(0), CallId(3), &Limits::default());
        let allocated = state(&s);
        s.backtrack(CallId(4));
        assert_eq!(state(&s), allocated);
    }

    #[test]
    fn test_allocate_backtrack_round_trip() {
        let mut s = sample();
        let before = state(&s);
        s.allocate(SelectionId(0), CallId(3), &Limits::default());
        s.backtrack(CallId(3));
        // The attempted choice is released but remains hidden at its call.
        let attempted = s.selection(SelectionId(0));
        assert!(!attempted.is_allocated());
        assert_eq!(attempted.unavailable_since(), Some(CallId(3)));
        for sel in s.iter().filter(|sel| sel.id != SelectionId(0)) {
            assert!(sel.is_available() && !sel.is_allocated());
        }
        s.backtrack(CallId(3));
        assert_eq!(state(&s), before);
    }

    #[test]
    fn test_backtrack_unwinds_deeper_calls() {
        let mut s = sample();
        let limits = Limits::default();
        s.allocate(SelectionId(4), CallId(3), &limits);
        let after_first = state(&s);
        s.allocate(SelectionId(3), CallId(4), &limits);
        s.backtrack(CallId(4));
        s.backtrack(CallId(4));
        assert_eq!(state(&s), after_first);
        s.backtrack(CallId(3));
        s.backtrack(CallId(3));
        assert!(s.iter().all(|sel| sel.is_available() && !sel.is_allocated()));
    }

    #[test]
    #[should_panic(expected = "cannot be allocated")]
    fn test_allocate_hidden_selection_panics() {
        let mut s = sample();
        s.allocate(SelectionId(0), CallId(3), &Limits::default());
        s.allocate(SelectionId(1), CallId(4), &Limits::default());
    }
}
