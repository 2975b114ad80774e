pub mod normalize;
pub mod place;
pub mod project;
pub mod resolve;

mod span;

pub use crate::normalize::{NormalizedText, normalize};
pub use crate::place::{PlacementOutcome, PlacementReport, place};
pub use crate::project::{FlattenedText, LeafSpan, OffsetMap, project};
pub use crate::resolve::resolve;
pub use crate::span::ErrorSpan;
