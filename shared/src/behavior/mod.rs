pub(crate) mod behavior;
pub(crate) mod context;
pub mod defaults;
pub(crate) mod kind;

pub use behavior::*;
pub use context::*;
pub use kind::*;
