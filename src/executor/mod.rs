//! Shell execution of generated curl commands.

mod runner;

pub use runner::{Executor, ExecutorSettings, DEFAULT_SHELL};
