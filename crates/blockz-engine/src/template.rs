use serde::Serialize;
use std::fmt::Write;

use crate::error::BoxError;
use crate::models::BlockNode;
use crate::rendering::{Container, WorkingRecord};

/// Template used to wrap a rendered block.
pub const BLOCK_CONTAINER_TEMPLATE: &str = "blocks.block-container";

/// Prefix custom field blocks carry in their slug; hidden from templates.
pub const CUSTOM_BLOCK_PREFIX: &str = "acf-";

/// Turns a named template and a data bag into markup.
pub trait TemplateEngine {
    fn render(&self, template: &str, data: &TemplateData<'_>) -> Result<String, BoxError>;
}

/// Everything a container template gets to see about a block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateData<'a> {
    pub block: &'a BlockNode,
    pub content: &'a str,
    /// A class string, or `false` when no container element should be emitted.
    pub container: &'a Container,
    #[serde(rename = "type")]
    pub block_type: &'a str,
    pub slug: String,
    pub class: String,
    pub style: String,
    /// Alignment class with its leading space, or empty.
    pub align: &'a str,
    pub ids: &'a str,
}

impl<'a> TemplateData<'a> {
    pub fn new(block: &'a BlockNode, record: &'a WorkingRecord) -> Self {
        Self {
            block,
            content: &record.content,
            container: &record.container,
            block_type: &record.block_type,
            slug: record.slug.replace(CUSTOM_BLOCK_PREFIX, ""),
            class: record.classes.join(" "),
            style: record.styles.join(" "),
            align: &record.alignment,
            ids: &record.id,
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown template '{0}'")]
pub struct UnknownTemplate(pub String);

/// Reference HTML rendering of [`BLOCK_CONTAINER_TEMPLATE`].
///
/// ```html
/// <section id="{ids}" class="block block-{type}-{slug} {class}{align}" style="{style}">
///   <div class="{container}">{content}</div>
/// </section>
/// ```
///
/// The inner `div` is omitted when the container is `false`; `class` and
/// `style` are omitted when empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockContainerTemplate;

impl TemplateEngine for BlockContainerTemplate {
    fn render(&self, template: &str, data: &TemplateData<'_>) -> Result<String, BoxError> {
        if template != BLOCK_CONTAINER_TEMPLATE {
            return Err(UnknownTemplate(template.to_string()).into());
        }

        let mut classes = format!("block block-{}-{}", data.block_type, data.slug);
        if !data.class.is_empty() {
            classes.push(' ');
            classes.push_str(&data.class);
        }
        classes.push_str(data.align);

        let mut html = String::with_capacity(data.content.len() + 128);
        write!(
            html,
            "<section id=\"{}\" class=\"{}\"",
            html_escape::encode_double_quoted_attribute(data.ids),
            html_escape::encode_double_quoted_attribute(&classes),
        )?;
        if !data.style.is_empty() {
            write!(
                html,
                " style=\"{}\"",
                html_escape::encode_double_quoted_attribute(&data.style)
            )?;
        }
        html.push('>');

        match data.container.as_class() {
            Some(container) => write!(
                html,
                "<div class=\"{}\">{}</div>",
                html_escape::encode_double_quoted_attribute(container),
                data.content
            )?,
            None => html.push_str(data.content),
        }

        html.push_str("</section>");
        Ok(html)
    }
}
