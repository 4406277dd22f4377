pub use self::algo::{Algo, Outcome, Termination};
pub use self::backtracking::{Backtracking, SearchStats};
pub use self::solutions::{Solution, Solutions};

mod algo;
mod backtracking;
mod deadline;
mod feasibility;
mod popularity;
mod solutions;
mod uncontested;
