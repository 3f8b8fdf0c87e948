//! Task runner module.

#[allow(clippy::module_inception)]
mod runner;
pub mod store;

pub use runner::{Runner, RunnerBuilder};
pub use store::TaskRunStore;
