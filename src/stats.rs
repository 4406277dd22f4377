use crate::algos::Solution;
use crate::model::Project;

/// Number of students who got their first, second, … choice.
pub fn statistics(solution: &Solution) -> Vec<usize> {
    let mut ranks = Vec::new();
    for allocation in solution.allocations() {
        let rank = allocation.serial as usize - 1;
        if ranks.len() <= rank {
            ranks.resize(rank + 1, 0);
        }
        ranks[rank] += 1;
    }
    ranks
}

/// Projects hosting at least `n` students, by code.
pub fn projects_allocated_at_least(solution: &Solution, n: usize) -> Vec<(&Project, usize)> {
    let mut projects: Vec<(&Project, usize)> = Vec::new();
    for allocation in solution.allocations() {
        match projects.iter_mut().find(|(p, _)| *p == &allocation.project) {
            Some((_, count)) => *count += 1,
            None => projects.push((&allocation.project, 1)),
        }
    }
    projects.retain(|&(_, count)| count >= n);
    projects.sort_by(|(p, _), (q, _)| p.code.cmp(&q.code));
    projects
}
