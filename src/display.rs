use crate::algos::{Outcome, SearchStats, Solution, Termination};
use crate::stats;

pub fn display_details(solution: &Solution) {
    let mut projects = solution
        .allocations()
        .iter()
        .map(|a| &a.project)
        .collect::<Vec<_>>();
    projects.sort_by(|p, q| p.code.cmp(&q.code));
    projects.dedup();
    for p in projects {
        println!("{} ({}):", p.code, p.supervisor);
        let mut students = solution.students_for(p);
        students.sort_by(|a, b| a.student.login.cmp(&b.student.login));
        for a in students {
            println!("  - {} (rank {})", a.student, a.serial);
        }
    }
}

pub fn display_stats(solution: &Solution) {
    let ranks = stats::statistics(solution);
    let cumul = ranks.iter().scan(0, |s, &r| {
        *s += r;
        Some(*s)
    });
    let total: usize = ranks.iter().sum();
    println!("Final ranking:");
    for (rank, (n, c)) in ranks.iter().zip(cumul).enumerate() {
        if *n != 0 {
            println!(
                "  - rank {}: {} (cumulative {} - {:.2}%)",
                rank + 1,
                n,
                c,
                100.0 * c as f32 / total as f32
            );
        }
    }
}

pub fn display_shared(solution: &Solution) {
    let projects = stats::projects_allocated_at_least(solution, 2);
    if !projects.is_empty() {
        println!("Projects allocated to several students:");
        for (p, n) in projects {
            println!("  - {} ({} students)", p.code, n);
        }
    }
}

pub fn display_outcome(outcome: &Outcome, stats: &SearchStats) {
    for solution in outcome.solutions.iter() {
        println!(
            "{} students in set, total serials: {}",
            solution.len(),
            solution.total_serial()
        );
        display_details(solution);
        println!();
    }
    print!(
        "{} sets found ({})",
        outcome.solutions.len(),
        outcome.termination
    );
    if let Some(bound) = outcome.lower_bound {
        print!(", lowest possible total serials: {bound}");
    }
    println!();
    println!(
        "Search steps/attempts/pruned: {}/{}/{}",
        stats.calls, stats.attempts, stats.pruned
    );
    if let Some(best) = outcome.solutions.best() {
        display_stats(best);
        display_shared(best);
    } else if outcome.termination == Termination::TimedOut {
        println!("No set found before the timeout, the input may still be feasible");
    }
}
