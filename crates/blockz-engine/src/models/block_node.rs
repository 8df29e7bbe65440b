use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Attributes;

/// One entry of a block's `innerContent`.
///
/// Block parsers emit literal markup as strings and use `null` to mark the
/// position of the next entry of `innerBlocks`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum ContentChunk {
    Literal(String),
    Child,
}

impl From<Option<String>> for ContentChunk {
    fn from(chunk: Option<String>) -> Self {
        match chunk {
            Some(markup) => Self::Literal(markup),
            None => Self::Child,
        }
    }
}

impl From<ContentChunk> for Option<String> {
    fn from(chunk: ContentChunk) -> Self {
        match chunk {
            ContentChunk::Literal(markup) => Some(markup),
            ContentChunk::Child => None,
        }
    }
}

/// A parsed content block, in the shape block parsers serialize it.
///
/// The renderer never mutates a node; the same tree can be rendered any
/// number of times.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlockNode {
    /// `"<type>/<slug>"`, or absent for freeform content.
    #[serde(rename = "blockName", default)]
    pub name: Option<String>,
    #[serde(rename = "attrs", default)]
    pub attributes: Attributes,
    /// Concatenation of the literal chunks, without child markup.
    #[serde(rename = "innerHTML", default)]
    pub inner_html: String,
    #[serde(rename = "innerContent", default)]
    pub inner_content: Vec<ContentChunk>,
    #[serde(rename = "innerBlocks", default)]
    pub inner_blocks: Vec<BlockNode>,
}

impl BlockNode {
    /// A block with a name and no content.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// A freeform block (no name), holding a single literal chunk.
    pub fn freeform(markup: impl Into<String>) -> Self {
        Self::default().with_literal(markup)
    }

    /// The block name; an empty name counts as no name at all.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }

    pub fn is_named(&self, name: &str) -> bool {
        self.name() == Some(name)
    }

    /// Append a literal chunk, keeping `inner_html` in step.
    pub fn with_literal(mut self, markup: impl Into<String>) -> Self {
        let markup = markup.into();
        self.inner_html.push_str(&markup);
        self.inner_content.push(ContentChunk::Literal(markup));
        self
    }

    /// Append a child block and the marker that positions it.
    pub fn with_child(mut self, child: BlockNode) -> Self {
        self.inner_content.push(ContentChunk::Child);
        self.inner_blocks.push(child);
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key, value);
        self
    }

    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }
}
