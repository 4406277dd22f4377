use crate::model::{Limits, ProjectId, Selections};
use pathfinding::prelude::*;
use std::ops::Range;
use tracing::{debug, instrument};

/// Solve the problem without the supervisor caps, each student taking one
/// seat of a project they chose.
///
/// Returns `None` if even this relaxed problem has no complete assignment,
/// in which case no solution can exist. Otherwise, returns the smallest total
/// serial reachable, a lower bound for any solution.
#[instrument(skip_all)]
pub fn lower_bound(selections: &Selections, limits: &Limits) -> Option<u32> {
    let students = selections.students().len();
    if students == 0 {
        return Some(0);
    }
    let seats = seats(selections, limits);
    let columns = seats.iter().map(|(_, range)| range.len()).sum::<usize>();
    if columns < students {
        debug!(seats = columns, students, "not enough seats for every student");
        return None;
    }
    // Larger than any sum of serials a complete assignment can reach.
    let forbidden = 1 + selections.iter().map(|s| i64::from(s.serial)).sum::<i64>();
    let mut weights = Matrix::new(students, columns, forbidden);
    for (project, range) in seats {
        for selection in selections.for_project(project) {
            for seat in range.clone() {
                weights[(selection.student.0, seat)] = i64::from(selection.serial);
            }
        }
    }
    let (total, assigned) = kuhn_munkres_min(&weights);
    if assigned
        .iter()
        .enumerate()
        .any(|(student, &seat)| weights[(student, seat)] == forbidden)
    {
        debug!("some student cannot get any of their choices");
        return None;
    }
    u32::try_from(total).ok()
}

/// Matrix columns given to each project. A project never needs more seats
/// than it has candidates, nor more than there are students.
fn seats(selections: &Selections, limits: &Limits) -> Vec<(ProjectId, Range<usize>)> {
    let students = selections.students().len();
    let mut next = 0;
    let mut seats = Vec::new();
    for project in selections.projects() {
        let n = project
            .capacity(limits.max_project_students)
            .min(selections.for_project(project.id).count())
            .min(students);
        if n > 0 {
            seats.push((project.id, next..next + n));
            next += n;
        }
    }
    seats
}
