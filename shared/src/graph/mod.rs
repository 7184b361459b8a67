pub(crate) mod builder;
pub(crate) mod error;
pub(crate) mod graph;
pub(crate) mod node;

pub use builder::*;
pub use error::*;
pub use graph::*;
pub use node::*;
