use crate::models::BlockNode;

/// One call into the renderer: the node plus how it is being rendered.
#[derive(Debug, Clone, Copy)]
pub struct RenderRequest<'a> {
    /// Literal content the block's own content is appended to.
    pub content: &'a str,
    pub node: &'a BlockNode,
    /// Set when resolving a child nested in a parent's content.
    pub inner: bool,
    /// Column count of the enclosing layout, passed down unchanged.
    pub columns: Option<u32>,
    /// Whether the caller wants the block handed to the container template.
    pub wrap: bool,
}

impl<'a> RenderRequest<'a> {
    pub fn new(node: &'a BlockNode) -> Self {
        Self {
            content: "",
            node,
            inner: false,
            columns: None,
            wrap: false,
        }
    }

    pub fn with_content(mut self, content: &'a str) -> Self {
        self.content = content;
        self
    }

    pub fn inner(mut self) -> Self {
        self.inner = true;
        self
    }

    pub fn with_columns(mut self, columns: u32) -> Self {
        self.columns = Some(columns);
        self
    }

    pub fn wrapped(mut self) -> Self {
        self.wrap = true;
        self
    }

    /// Request for a child block found while resolving this block's content.
    pub(crate) fn child(&self, node: &'a BlockNode) -> Self {
        Self {
            content: "",
            node,
            inner: true,
            columns: self.columns,
            wrap: false,
        }
    }
}
