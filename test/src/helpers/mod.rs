pub mod assertions;
pub mod link;
pub mod probe;

pub use assertions::assert_converged;
pub use fixtures::{empty_graph, fan_graph, linear_graph, loop_graph, manager_graph};
pub use link::Link;
pub use probe::{HookRecorder, NextScript, Probe};
