//! Worker tasks that back the agent runtime.
//!
//! The controller owns mode, anchor and movement state and is the only task
//! that mutates them. Movement and container operations run as short-lived
//! tasks spawned by the controller.

mod controller;

pub(crate) use controller::Schedule;
pub use controller::{Command, Controller};
