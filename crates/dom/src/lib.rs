pub mod debug;
pub mod leaves;
pub mod mutate;
pub mod traverse;

mod types;

pub use crate::types::{Id, Node, NodeId};
