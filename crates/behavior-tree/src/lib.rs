//! Minimal behavior tree for per-tick agent decisions.
//!
//! The hunter agent re-evaluates its whole tree on every decision tick, so the
//! nodes here are stateless and complete immediately:
//!
//! - **No Running state**: long actions (walking, fighting) are started by the
//!   caller after the tree has picked a decision, never inside a node
//! - **Blackboard context**: nodes communicate through the generic context `C`
//! - **Zero dependencies**
//!
//! # Architecture
//!
//! - [`Behavior`]: trait implemented by every node
//! - [`Status`]: Success or Failure
//! - Composite nodes: [`Sequence`], [`Selector`]
//! - Leaf/decorator nodes: [`Condition`], [`Inverter`]

pub mod behavior;
pub mod builder;
pub mod composite;
pub mod decorator;
pub mod status;

pub use behavior::Behavior;
pub use composite::{Selector, Sequence};
pub use decorator::{Condition, Inverter};
pub use status::Status;
