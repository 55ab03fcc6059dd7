//! Per-tick target acquisition and return-to-post decisions.
//!
//! The controller builds a [`DecisionContext`] from fresh snapshots, ticks
//! the tree once, and acts on the [`Decision`] left in the context. Nodes
//! never perform I/O.

mod context;
pub mod nodes;
mod tree;

pub use context::{Decision, DecisionContext};
pub use tree::{DecisionTree, agent_tree, decide};
