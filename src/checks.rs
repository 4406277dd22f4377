use crate::algos::Solution;
use crate::model::{Limits, Project};
use eyre::{bail, ensure, Result};
use std::collections::{HashMap, HashSet};

/// Check that a solution allocates every student exactly once and respects
/// the project and supervisor limits.
pub fn ensure_valid(solution: &Solution, students: usize, limits: &Limits) -> Result<()> {
    ensure!(
        solution.len() == students,
        "solution allocates {} students out of {students}",
        solution.len()
    );
    let mut seen = HashSet::new();
    let mut per_project: HashMap<&Project, usize> = HashMap::new();
    let mut per_supervisor: HashMap<&str, usize> = HashMap::new();
    for allocation in solution.allocations() {
        ensure!(
            seen.insert(&allocation.student.login),
            "student {} is allocated several times",
            allocation.student
        );
        *per_project.entry(&allocation.project).or_default() += 1;
        *per_supervisor
            .entry(&allocation.project.supervisor)
            .or_default() += 1;
    }
    if let Some((project, n)) = per_project
        .iter()
        .find(|(p, n)| **n > p.capacity(limits.max_project_students))
    {
        bail!(
            "project {project} hosts {n} students, more than its capacity of {}",
            project.capacity(limits.max_project_students)
        );
    }
    if let Some((supervisor, n)) = per_supervisor
        .iter()
        .find(|(_, n)| **n > limits.max_supervisor_projects)
    {
        bail!(
            "supervisor {supervisor} has {n} allocations, more than {}",
            limits.max_supervisor_projects
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::selections::tests::selections;
    use crate::model::{CallId, SelectionId};

    #[test]
    fn test_valid_solution() {
        let mut s = selections(&[("a", &[("X", "s1")]), ("b", &[("Y", "s1")])]);
        s.allocate(SelectionId(0), CallId(3), &Limits::default());
        s.allocate(SelectionId(1), CallId(4), &Limits::default());
        assert!(ensure_valid(&Solution::freeze(&s), 2, &Limits::default()).is_ok());
    }

    #[test]
    fn test_incomplete_solution() {
        let mut s = selections(&[("a", &[("X", "s1")]), ("b", &[("Y", "s1")])]);
        s.allocate(SelectionId(0), CallId(3), &Limits::default());
        assert!(ensure_valid(&Solution::freeze(&s), 2, &Limits::default()).is_err());
    }

    #[test]
    fn test_over_capacity() {
        let mut s = selections(&[
            ("a", &[("X", "s1")]),
            ("b", &[("X", "s1")]),
            ("c", &[("Y", "s1")]),
        ]);
        let relaxed = Limits {
            max_supervisor_projects: 4,
            max_project_students: 2,
        };
        for n in 0..3 {
            s.allocate(SelectionId(n), CallId(3 + n as u32), &relaxed);
        }
        let solution = Solution::freeze(&s);
        assert!(ensure_valid(&solution, 3, &relaxed).is_ok());
        assert!(ensure_valid(&solution, 3, &Limits::default()).is_err());
        let strict_supervisors = Limits {
            max_supervisor_projects: 2,
            ..relaxed
        };
        assert!(ensure_valid(&solution, 3, &strict_supervisors).is_err());
    }
}
