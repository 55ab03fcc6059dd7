//! Command-line client for the hunter agent.
//!
//! The binary is the composition root: it parses the connection target,
//! reads configuration from the environment, installs logging, and runs an
//! [`Agent`](runtime::Agent) session.
//!
//! Sessions run against the in-process simulated world; chat lines come from
//! stdin and the agent's replies are printed to stdout.

pub mod config;
pub mod dirs;
pub mod logging;
pub mod session;

pub use config::{ClientConfig, ConnectTarget, USAGE, UsageError};
