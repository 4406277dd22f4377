pub use self::availability::Limits;
pub use self::project::{Project, ProjectId};
pub use self::selection::{CallId, Selection, SelectionId};
pub use self::selections::{Selections, SelectionsBuilder};
pub use self::student::{Student, StudentId};

mod availability;
mod project;
mod selection;
pub(crate) mod selections;
mod student;
