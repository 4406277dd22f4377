use crate::model::{ProjectId, Selections, StudentId};
use std::cmp::Reverse;
use tracing::debug;

/// Projects still in play, most requested first. Only available and
/// unallocated selections up to `max_serial` are counted; projects with the
/// same count keep the order in which they first appear.
pub fn popular_projects(selections: &Selections, max_serial: u32) -> Vec<(ProjectId, usize)> {
    let mut counts = vec![0; selections.projects().len()];
    let mut seen = Vec::new();
    for selection in selections
        .unallocated()
        .filter(|s| s.is_available() && s.serial <= max_serial)
    {
        let ProjectId(project) = selection.project;
        if counts[project] == 0 {
            seen.push(selection.project);
        }
        counts[project] += 1;
    }
    let mut popular = seen
        .into_iter()
        .map(|p| (p, counts[p.0]))
        .collect::<Vec<_>>();
    popular.sort_by_key(|&(_, n)| Reverse(n));
    popular
}

/// Order in which the search assigns students, the first one to be assigned
/// being the last of the list.
///
/// Students are listed in the order of the popular projects they still have
/// an available selection on. Unallocated students who have none of those
/// selections, for example because all their serials exceed `max_serial`,
/// are placed in front so that they are assigned last.
pub fn students_by_popular_projects(selections: &Selections, max_serial: u32) -> Vec<StudentId> {
    let mut queued = vec![false; selections.students().len()];
    let mut popular = Vec::new();
    for (project, _) in popular_projects(selections, max_serial) {
        for selection in selections
            .for_project(project)
            .filter(|s| s.is_available())
        {
            let StudentId(student) = selection.student;
            if !queued[student] {
                queued[student] = true;
                popular.push(selection.student);
            }
        }
    }
    let mut students = selections
        .all_students()
        .into_iter()
        .filter(|&s| !queued[s.0] && selections.project_for(s).is_none())
        .collect::<Vec<_>>();
    if !students.is_empty() {
        debug!(
            students = students.len(),
            "students outside the popular projects"
        );
    }
    students.extend(popular);
    students
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::selections::tests::selections;
    use crate::model::{CallId, Limits, SelectionId, SelectionsBuilder};

    fn sample() -> Selections {
        selections(&[
            ("a", &[("P1", "s1"), ("P2", "s1")]),
            ("b", &[("P3", "s2"), ("P2", "s1")]),
            ("c", &[("P2", "s1"), ("P3", "s2")]),
            ("d", &[("P4", "s3")]),
        ])
    }

    #[test]
    fn test_popular_projects() {
        let s = sample();
        let code = |(p, n): (ProjectId, usize)| (s.project(p).code.clone(), n);
        let popular = popular_projects(&s, 100)
            .into_iter()
            .map(code)
            .collect::<Vec<_>>();
        assert_eq!(
            popular,
            vec![
                ("P2".to_owned(), 3),
                ("P3".to_owned(), 2),
                ("P1".to_owned(), 1),
                ("P4".to_owned(), 1)
            ]
        );
        let first_choices = popular_projects(&s, 1)
            .into_iter()
            .map(code)
            .collect::<Vec<_>>();
        assert_eq!(first_choices.len(), 4);
        assert!(first_choices.iter().all(|&(_, n)| n == 1));
    }

    #[test]
    fn test_students_by_popular_projects() {
        let s = sample();
        assert_eq!(
            students_by_popular_projects(&s, 100),
            vec![StudentId(0), StudentId(1), StudentId(2), StudentId(3)]
        );
    }

    #[test]
    fn test_students_beyond_max_serial_are_kept() {
        let mut builder = SelectionsBuilder::new();
        let a = builder.student("a");
        let b = builder.student("b");
        let c = builder.student("c");
        let x = builder.project("X", "s");
        let y = builder.project("Y", "s");
        let z = builder.project("Z", "s");
        builder.choice(a, x, 1);
        builder.choice(a, y, 2);
        builder.choice(b, x, 1);
        // c left the first column empty.
        builder.choice(c, z, 2);
        let s = builder.build();
        assert_eq!(popular_projects(&s, 1), vec![(x, 2)]);
        assert_eq!(students_by_popular_projects(&s, 1), vec![c, a, b]);
    }

    #[test]
    fn test_allocated_students_are_skipped() {
        let mut s = sample();
        s.allocate(SelectionId(6), CallId(1), &Limits::default());
        let students = students_by_popular_projects(&s, 100);
        assert!(!students.contains(&StudentId(3)));
        assert_eq!(students.len(), 3);
    }
}
