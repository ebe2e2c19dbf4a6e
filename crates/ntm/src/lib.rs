pub mod branch;
pub mod index;
pub mod scheduler;
pub mod symbol;
pub mod tape;

pub use branch::Branch;
pub use index::TransitionIndex;
pub use scheduler::{Scheduler, Verdict};
pub use symbol::{Move, State, Symbol, Transition};
pub use tape::Tape;

/// Calling this function is a hint to the compiler that this code path is unlikely to be executed.
#[cold]
fn cold() {}
