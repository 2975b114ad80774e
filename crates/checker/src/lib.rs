pub mod client;
pub mod wire;

pub use crate::client::{CheckCallback, CheckOutcome, CheckerConfig, check_text};
pub use crate::wire::CheckMatch;
