mod session;
pub(crate) use session::Session;

mod session_ref;
pub use session_ref::{SessionMut, SessionRef};
