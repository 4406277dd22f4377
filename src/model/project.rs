use std::fmt;
use std::hash::{Hash, Hasher};

/// Dense key assigned at load time, used to count allocations per project.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ProjectId(pub usize);

/// A project offered by a supervisor.
///
/// Two projects compare equal when their codes are equal, whatever their
/// numeric id. Lookups by code keep working on copies taken from a
/// [`Solution`](crate::algos::Solution).
#[derive(Clone, Debug)]
pub struct Project {
    pub id: ProjectId,
    pub code: String,
    pub supervisor: String,
    pub allow_multiple: bool,
}

impl Project {
    pub fn new(id: ProjectId, code: impl Into<String>, supervisor: impl Into<String>) -> Self {
        Self {
            id,
            code: code.into(),
            supervisor: supervisor.into(),
            allow_multiple: true,
        }
    }

    /// When `false`, the project cannot be allocated more than once.
    pub fn set_allow_multiple(&mut self, allow: bool) {
        self.allow_multiple = allow;
    }

    /// Number of simultaneous allocations this project accepts.
    pub fn capacity(&self, max_project_students: usize) -> usize {
        if self.allow_multiple {
            max_project_students
        } else {
            1
        }
    }
}

impl PartialEq for Project {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl Eq for Project {}

impl Hash for Project {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code.hash(state);
    }
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code)
    }
}
