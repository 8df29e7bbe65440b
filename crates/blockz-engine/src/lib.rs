//! # Blockz Engine
//!
//! Turns a parsed tree of content blocks into final markup.
//!
//! Every block passes through the same decision pipeline: skip check,
//! type/slug/id derivation, container and alignment resolution, colour,
//! spacing and class aggregation, recursive content resolution and finally
//! an optional hand-off to a template engine that wraps the block.
//!
//! ## Modules
//!
//! - **`models`**: `BlockNode` and its `Attributes`, in the block-parser JSON shape
//! - **`rules`**: process-wide container/alignment/group tables, overridable once
//! - **`ids`**: id generation (`IdGenerator`, the global `BlockCounter`)
//! - **`collaborators`**: palette lookup, block-type registry, display context
//! - **`template`**: the `TemplateEngine` seam and a reference HTML template
//! - **`rendering`**: `BlockRenderer`, the pipeline stages and content resolution
//! - **`markup`**: tag stripping and blank checks
//!
//! ## Example
//!
//! ```rust
//! use blockz_engine::{BlockContainerTemplate, BlockCounter, BlockNode, BlockRenderer, RenderRequest, RuleTables};
//!
//! let rules = RuleTables::default();
//! let ids = BlockCounter::new();
//! let template = BlockContainerTemplate;
//! let renderer = BlockRenderer::new(&template).with_rules(&rules).with_ids(&ids);
//!
//! let node = BlockNode::named("core/heading").with_literal("<h2>Hello</h2>");
//! let rendered = renderer.render(RenderRequest::new(&node)).unwrap();
//! assert_eq!(rendered.as_markup(), Some("<h2>Hello</h2>"));
//! ```

pub mod collaborators;
pub mod error;
pub mod ids;
pub mod markup;
pub mod models;
pub mod rendering;
pub mod rules;
pub mod template;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use collaborators::*;
pub use error::{BoxError, RenderError};
pub use ids::{BlockCounter, IdGenerator, global_counter, reset_global_counter};
pub use models::{Alignment, Attributes, BlockNode, ContentChunk};
pub use rendering::{BlockRenderer, Container, RenderRequest, Rendered, WorkingRecord};
pub use rules::{
    AlignmentClasses, ContainerClasses, ContainerGroup, ContainerGroups, RuleOverrides,
    RuleTables, RulesError, register_rule_overrides, rule_tables,
};
pub use template::{BLOCK_CONTAINER_TEMPLATE, BlockContainerTemplate, TemplateData, TemplateEngine};
