//! # Block Rendering
//!
//! `BlockRenderer::render` is the single entry point. For one block it:
//!
//! 1. **Skips** blank freeform blocks and empty paragraphs (no id is consumed)
//! 2. Runs the attribute **stages** (`stages::PIPELINE`) over a fresh `WorkingRecord`
//! 3. **Resolves content**, recursing into child blocks as inner calls
//! 4. Either returns the content or hands the record to the container **template**
//!
//! ## Key Invariants
//!
//! - Stages never re-enter earlier stages; recursion only happens while
//!   resolving content, one level per child
//! - Each call owns its record; nothing is shared between sibling calls
//!   except the id generator
//! - Inner calls never get a container element

mod content;
pub mod record;
pub mod request;
pub mod stages;

pub use record::{Container, WorkingRecord};
pub use request::RenderRequest;

use crate::collaborators::{
    BlockTypeRegistry, DisplayContext, EmptyPalette, NoBlockTypes, PaletteLookup,
};
use crate::error::RenderError;
use crate::ids::{IdGenerator, global_counter};
use crate::markup;
use crate::models::BlockNode;
use crate::rules::{ContainerGroup, RuleTables, rule_tables};
use crate::template::{BLOCK_CONTAINER_TEMPLATE, TemplateData, TemplateEngine};

use stages::StageInput;

/// Block name whose empty markup is dropped entirely.
pub const PARAGRAPH_BLOCK: &str = "core/paragraph";

/// Outcome of rendering one block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    /// Nothing to render; distinct from rendering an empty string.
    Skipped,
    Markup(String),
}

impl Rendered {
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped)
    }

    pub fn as_markup(&self) -> Option<&str> {
        match self {
            Self::Skipped => None,
            Self::Markup(markup) => Some(markup),
        }
    }

    pub fn into_markup(self) -> Option<String> {
        match self {
            Self::Skipped => None,
            Self::Markup(markup) => Some(markup),
        }
    }
}

/// Applies presentation rules to block trees.
///
/// Only the template engine is required. Everything else defaults to the
/// process-wide rule tables and id counter, an empty palette, no registered
/// block types and no display context.
pub struct BlockRenderer<'a> {
    templates: &'a dyn TemplateEngine,
    rules: Option<&'a RuleTables>,
    palette: &'a dyn PaletteLookup,
    registry: &'a dyn BlockTypeRegistry,
    ids: &'a dyn IdGenerator,
    display: Option<&'a dyn DisplayContext>,
}

impl<'a> BlockRenderer<'a> {
    pub fn new(templates: &'a dyn TemplateEngine) -> Self {
        Self {
            templates,
            rules: None,
            palette: &EmptyPalette,
            registry: &NoBlockTypes,
            ids: global_counter(),
            display: None,
        }
    }

    /// Use `rules` instead of the process-wide tables.
    pub fn with_rules(mut self, rules: &'a RuleTables) -> Self {
        self.rules = Some(rules);
        self
    }

    pub fn with_palette(mut self, palette: &'a dyn PaletteLookup) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_block_types(mut self, registry: &'a dyn BlockTypeRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_ids(mut self, ids: &'a dyn IdGenerator) -> Self {
        self.ids = ids;
        self
    }

    /// Save and restore `display` around every dynamic block render.
    pub fn with_display_context(mut self, display: &'a dyn DisplayContext) -> Self {
        self.display = Some(display);
        self
    }

    /// The rule tables in effect; resolves the process-wide tables on first use.
    pub fn rules(&self) -> &'a RuleTables {
        match self.rules {
            Some(rules) => rules,
            None => rule_tables(),
        }
    }

    /// Render one block.
    pub fn render(&self, request: RenderRequest<'_>) -> Result<Rendered, RenderError> {
        let node = request.node;
        if is_skippable(&request) {
            log::debug!(
                "Skipping empty block '{}'",
                node.name().unwrap_or(stages::CUSTOM_SLUG)
            );
            return Ok(Rendered::Skipped);
        }

        let rules = self.rules();
        let dynamic_type = node
            .name()
            .and_then(|name| self.registry.get_registered(name))
            .filter(|block_type| block_type.is_dynamic());

        let mut record = WorkingRecord::new(&rules.groups.default_inner, request.content);
        record.is_dynamic = dynamic_type.is_some();

        let input = StageInput {
            request,
            rules,
            palette: self.palette,
            ids: self.ids,
        };
        let record = stages::run(record, &input);
        let record = self.resolve_content(record, request, dynamic_type)?;

        if !self.is_wrapped(&request) {
            return Ok(Rendered::Markup(record.content));
        }

        log::debug!(
            "Wrapping block '{}' with template '{}'",
            record.id,
            BLOCK_CONTAINER_TEMPLATE
        );
        self.templates
            .render(BLOCK_CONTAINER_TEMPLATE, &TemplateData::new(node, &record))
            .map(Rendered::Markup)
            .map_err(|source| RenderError::Template {
                template: BLOCK_CONTAINER_TEMPLATE.to_string(),
                block_id: record.id.clone(),
                source,
            })
    }

    /// Render a sequence of top-level blocks and concatenate their markup.
    pub fn render_blocks(&self, nodes: &[BlockNode], wrap: bool) -> Result<String, RenderError> {
        let mut html = String::new();
        for node in nodes {
            let request = RenderRequest {
                wrap,
                ..RenderRequest::new(node)
            };
            if let Rendered::Markup(markup) = self.render(request)? {
                html.push_str(&markup);
            }
        }
        Ok(html)
    }

    fn is_wrapped(&self, request: &RenderRequest<'_>) -> bool {
        request.wrap
            && !self
                .rules()
                .is_member(ContainerGroup::NoWrap, request.node.name())
    }
}

/// Blank unnamed blocks and paragraphs without text render nothing.
fn is_skippable(request: &RenderRequest<'_>) -> bool {
    let node = request.node;
    let blank_freeform = markup::is_blank(request.content)
        && markup::is_blank(&node.inner_html)
        && node.name().is_none();
    let empty_paragraph =
        node.is_named(PARAGRAPH_BLOCK) && markup::is_blank(&markup::strip_tags(&node.inner_html));

    blank_freeform || empty_paragraph
}
