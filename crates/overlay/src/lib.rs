pub mod classify;
pub mod debounce;
pub mod mutation;
pub mod session;

pub use crate::debounce::Debouncer;
pub use crate::session::{CheckJob, Session};
