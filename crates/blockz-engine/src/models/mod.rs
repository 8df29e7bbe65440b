pub mod attributes;
pub mod block_node;

pub use attributes::{Alignment, Attributes};
pub use block_node::{BlockNode, ContentChunk};
