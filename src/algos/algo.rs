use super::Solutions;
use std::fmt;

pub trait Algo {
    /// Search for complete allocation sets.
    fn assign(&mut self) -> Outcome;
}

/// Why the search stopped.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Termination {
    /// Every branch has been explored or pruned.
    Exhausted,
    /// The deadline was reached before the search could finish.
    TimedOut,
    /// The input admits no complete allocation, no search was attempted.
    Infeasible,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Termination::Exhausted => "search space exhausted",
            Termination::TimedOut => "timed out",
            Termination::Infeasible => "infeasible",
        })
    }
}

#[derive(Debug)]
pub struct Outcome {
    pub solutions: Solutions,
    pub termination: Termination,
    /// Lowest total serial reachable when ignoring supervisor caps.
    pub lower_bound: Option<u32>,
}

impl Outcome {
    /// Whether it is known that no solution exists. A search which timed out
    /// without any solution proves nothing.
    pub fn is_infeasible(&self) -> bool {
        match self.termination {
            Termination::Infeasible => true,
            Termination::Exhausted => self.solutions.is_empty(),
            Termination::TimedOut => false,
        }
    }
}
