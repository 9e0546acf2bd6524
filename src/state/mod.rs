//! State module for the dispatch queue
//!
//! # Components
//!
//! - `Frontier`: the pending backlog plus the permanent dispatched set
//! - `Gate`: spacing gate between first-attempt dispatches
//! - `Attempt`: one in-flight fetch of a URL (first try or retry)

mod attempt;
mod frontier;
mod gate;

// Re-export main types
pub use attempt::{Attempt, AttemptNumber};
pub use frontier::{Admission, Frontier};
pub use gate::Gate;
