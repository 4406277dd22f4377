use super::deadline::{Deadline, Timeout};
use super::{Algo, Outcome, Solution, Solutions, Termination};
use super::{feasibility, popularity, uncontested};
use crate::config::SolverConfig;
use crate::model::{CallId, Limits, SelectionId, Selections, StudentId};
use std::mem;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

#[derive(Clone, Copy, Debug, Default)]
pub struct SearchStats {
    /// Recursive search steps entered.
    pub calls: usize,
    /// Selections tentatively allocated.
    pub attempts: usize,
    /// Attempts abandoned by the consistency check.
    pub pruned: usize,
}

/// Depth-first search with forward checking over the students' selections.
///
/// Uncontested first choices are committed first. The remaining students are
/// then assigned one at a time, following the popularity ordering, and every
/// complete set at least as good as the best one found so far is recorded.
/// The search is best effort: when the timeout expires, the sets found so far
/// are returned.
pub struct Backtracking<'a> {
    selections: &'a mut Selections,
    limits: Limits,
    timeout: Duration,
    max_popular_serial: u32,
    solutions: Solutions,
    stats: SearchStats,
}

impl<'a> Backtracking<'a> {
    pub fn new(selections: &'a mut Selections, config: &SolverConfig) -> Backtracking<'a> {
        Backtracking {
            selections,
            limits: config.limits(),
            timeout: config.timeout(),
            max_popular_serial: config.max_popular_serial,
            solutions: Solutions::new(),
            stats: SearchStats::default(),
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    fn is_supervisor_within_limit(&self, attempted: SelectionId) -> bool {
        let project = self
            .selections
            .project(self.selections.selection(attempted).project);
        self.selections
            .supervisor_allocated_count(&project.supervisor)
            <= self.limits.max_supervisor_projects
    }

    /// Whether the branch opened by allocating `attempted` can still lead to
    /// a solution at least as good as the incumbent.
    fn is_consistent(&self, attempted: SelectionId) -> bool {
        self.is_supervisor_within_limit(attempted)
            && self.selections.missing_students().is_empty()
            && self.selections.is_still_completable()
            && self.solutions.accepts(self.selections.total_serial())
    }

    /// Assign the last student of `queue`, then recurse over the others.
    /// Every allocation made here is undone before returning, including when
    /// the deadline expires.
    fn search(
        &mut self,
        queue: &[StudentId],
        call: CallId,
        deadline: &Deadline,
    ) -> Result<(), Timeout> {
        deadline.check()?;
        self.stats.calls += 1;
        let Some((&student, rest)) = queue.split_last() else {
            return Ok(());
        };
        let call = call.next();
        let mut choices = self
            .selections
            .available_for_student(student)
            .map(|s| (s.serial, s.id))
            .collect::<Vec<_>>();
        choices.sort_unstable();
        for (_, id) in choices {
            self.stats.attempts += 1;
            self.selections.allocate(id, call, &self.limits);
            let total = self.selections.total_serial();
            let complete = self.selections.is_complete();
            let result = if complete
                && self.is_supervisor_within_limit(id)
                && self.solutions.accepts(total)
            {
                self.solutions.record(Solution::freeze(self.selections));
                info!(
                    total_serial = total,
                    found = self.solutions.len(),
                    "found complete allocation"
                );
                Ok(())
            } else if !complete && self.is_consistent(id) {
                self.search(rest, call, deadline)
            } else {
                self.stats.pruned += 1;
                Ok(())
            };
            self.selections.backtrack(call);
            result?;
        }
        Ok(())
    }

    #[instrument(skip_all)]
    fn run(&mut self, deadline: &Deadline) -> Termination {
        uncontested::allocate_uncontested(self.selections, &self.limits);
        if self.selections.is_complete() {
            info!("uncontested first choices form a complete allocation");
            self.solutions.record(Solution::freeze(self.selections));
            return Termination::Exhausted;
        }
        let students =
            popularity::students_by_popular_projects(self.selections, self.max_popular_serial);
        debug!(students = students.len(), "ordered remaining students");
        let result = self.search(&students, CallId::SEARCH, deadline);
        // The last choice attempted at the top level is still hidden.
        self.selections.backtrack(CallId::SEARCH.next());
        info!(
            calls = self.stats.calls,
            attempts = self.stats.attempts,
            pruned = self.stats.pruned,
            solutions = self.solutions.len(),
            elapsed = ?deadline.elapsed(),
            "search finished"
        );
        match result {
            Ok(()) => Termination::Exhausted,
            Err(Timeout) => {
                warn!(
                    timeout = ?self.timeout,
                    solutions = self.solutions.len(),
                    "search timed out, keeping the allocations found so far"
                );
                Termination::TimedOut
            }
        }
    }
}

impl Algo for Backtracking<'_> {
    /// Search from an unallocated collection. On return, the collection only
    /// holds the uncontested first choices. The timeout covers the whole
    /// call, including the feasibility bound.
    fn assign(&mut self) -> Outcome {
        assert_eq!(
            self.selections.allocated_count(),
            0,
            "selections must be unallocated before searching"
        );
        let deadline = Deadline::after(self.timeout);
        let lower_bound = feasibility::lower_bound(self.selections, &self.limits);
        let termination = match lower_bound {
            Some(bound) => {
                info!(lower_bound = bound, "best possible total serial");
                self.run(&deadline)
            }
            None => {
                warn!("no complete allocation exists, even ignoring supervisor limits");
                Termination::Infeasible
            }
        };
        Outcome {
            solutions: mem::take(&mut self.solutions),
            termination,
            lower_bound,
        }
    }
}
