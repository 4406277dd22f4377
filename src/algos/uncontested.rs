use crate::model::{CallId, Limits, SelectionId, Selections};
use std::collections::HashSet;
use tracing::{debug, info, instrument};

/// First choices which can be committed before searching.
///
/// Selections are grouped by supervisor. A group is safe when it is no larger
/// than the supervisor cap and no two of its selections target the same
/// project: nobody else wants these projects and the supervisor cannot be
/// overloaded, so the first choices in it are final.
pub fn uncontested_first_choices(selections: &Selections, limits: &Limits) -> Vec<SelectionId> {
    let mut result = Vec::new();
    for supervisor in selections.supervisors() {
        let group = selections.for_supervisor(supervisor).collect::<Vec<_>>();
        let projects = group.iter().map(|s| s.project).collect::<HashSet<_>>();
        if group.len() > limits.max_supervisor_projects || projects.len() != group.len() {
            debug!(
                supervisor,
                selections = group.len(),
                projects = projects.len(),
                "supervisor is contested"
            );
            continue;
        }
        result.extend(group.iter().filter(|s| s.serial == 1).map(|s| s.id));
    }
    result.sort();
    result
}

/// Allocate every uncontested first choice at [`CallId::UNCONTESTED`].
/// Returns the number of allocated selections.
#[instrument(skip_all)]
pub fn allocate_uncontested(selections: &mut Selections, limits: &Limits) -> usize {
    let uncontested = uncontested_first_choices(selections, limits);
    for &id in &uncontested {
        selections.allocate(id, CallId::UNCONTESTED, limits);
    }
    info!(
        allocated = uncontested.len(),
        students = selections.students().len(),
        "allocated uncontested first choices"
    );
    uncontested.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::selections::tests::selections;

    #[test]
    fn test_distinct_first_choices_are_allocated() {
        let mut s = selections(&[
            ("a", &[("A-s1-1", "s1"), ("A-s2-2", "s2")]),
            ("b", &[("A-s2-1", "s2")]),
            ("c", &[("A-s3-1", "s3")]),
        ]);
        assert_eq!(allocate_uncontested(&mut s, &Limits::default()), 3);
        assert!(s.is_complete());
        assert_eq!(s.total_serial(), 3);
        assert!(s.iter().all(|sel| !sel.is_available()));
    }

    #[test]
    fn test_shared_project_is_contested() {
        let s = selections(&[
            ("a", &[("A-s1-1", "s1")]),
            ("b", &[("A-s2-1", "s2"), ("A-s1-1", "s1")]),
        ]);
        // s1's group holds two selections of the same project.
        assert_eq!(
            uncontested_first_choices(&s, &Limits::default()),
            vec![SelectionId(1)]
        );
    }

    #[test]
    fn test_oversized_group_is_contested() {
        let s = selections(&[
            ("a", &[("A-s1-1", "s1")]),
            ("b", &[("A-s1-2", "s1")]),
            ("c", &[("A-s1-3", "s1")]),
        ]);
        let limits = Limits {
            max_supervisor_projects: 2,
            ..Limits::default()
        };
        assert!(uncontested_first_choices(&s, &limits).is_empty());
        assert_eq!(uncontested_first_choices(&s, &Limits::default()).len(), 3);
    }
}
