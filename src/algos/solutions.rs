use crate::model::{Project, Selections, Student};
use tracing::debug;

/// One allocated selection, copied out of the live search state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Allocation {
    pub serial: u32,
    pub student: Student,
    pub project: Project,
}

/// A complete allocation set frozen when it was found. Later backtracking
/// cannot alter it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    allocations: Vec<Allocation>,
}

impl Solution {
    /// Copy the currently allocated selections.
    pub fn freeze(selections: &Selections) -> Solution {
        Solution {
            allocations: selections
                .allocated()
                .map(|s| Allocation {
                    serial: s.serial,
                    student: selections.student(s.student).clone(),
                    project: selections.project(s.project).clone(),
                })
                .collect(),
        }
    }

    pub fn allocations(&self) -> &[Allocation] {
        &self.allocations
    }

    pub fn len(&self) -> usize {
        self.allocations.len()
    }

    pub fn total_serial(&self) -> u32 {
        self.allocations.iter().map(|a| a.serial).sum()
    }

    pub fn students_for(&self, project: &Project) -> Vec<&Allocation> {
        self.allocations
            .iter()
            .filter(|a| a.project == *project)
            .collect()
    }
}

/// Complete solutions recorded during a search, in discovery order. Each
/// recorded solution is at least as good as all the previous ones.
#[derive(Clone, Debug, Default)]
pub struct Solutions {
    found: Vec<Solution>,
    incumbent: Option<u32>,
}

impl Solutions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a set with this total serial ties or beats the incumbent.
    pub fn accepts(&self, total_serial: u32) -> bool {
        self.incumbent.is_none_or(|best| total_serial <= best)
    }

    pub fn record(&mut self, solution: Solution) {
        let total = solution.total_serial();
        assert!(
            self.accepts(total),
            "recorded solution ({total}) is worse than the incumbent"
        );
        debug!(
            total_serial = total,
            found = self.found.len() + 1,
            "recording solution"
        );
        self.incumbent = Some(total);
        self.found.push(solution);
    }

    pub fn best(&self) -> Option<&Solution> {
        self.found.last()
    }

    pub fn len(&self) -> usize {
        self.found.len()
    }

    pub fn is_empty(&self) -> bool {
        self.found.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Solution> {
        self.found.iter()
    }
}
