//! Agent-specific behavior tree nodes.
//!
//! - `conditions`: read the context and return Success/Failure
//! - `actions`: record a [`Decision`](super::Decision) in the context

pub mod actions;
pub mod conditions;

pub use actions::*;
pub use conditions::*;
