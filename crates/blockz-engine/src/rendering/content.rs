use crate::collaborators::{BlockType, DisplayContextGuard};
use crate::error::RenderError;
use crate::models::ContentChunk;

use super::record::WorkingRecord;
use super::request::RenderRequest;
use super::{BlockRenderer, Rendered};

impl BlockRenderer<'_> {
    /// Append the block's own content to the record.
    ///
    /// Literal chunks are copied; each child marker takes the next inner block
    /// and renders it as an inner call. The child cursor is local to this walk,
    /// so rendering the same tree twice (or concurrently) cannot alias it.
    /// A dynamic block whose walk produced nothing is rendered by its block
    /// type instead.
    pub(super) fn resolve_content(
        &self,
        mut record: WorkingRecord,
        request: RenderRequest<'_>,
        dynamic_type: Option<&dyn BlockType>,
    ) -> Result<WorkingRecord, RenderError> {
        let node = request.node;
        let mut children = node.inner_blocks.iter();

        for chunk in &node.inner_content {
            match chunk {
                ContentChunk::Literal(markup) => record.content.push_str(markup),
                ContentChunk::Child => {
                    let Some(child) = children.next() else {
                        log::warn!(
                            "Block '{}' has more child markers than inner blocks",
                            record.id
                        );
                        continue;
                    };
                    if let Rendered::Markup(markup) = self.render(request.child(child))? {
                        record.content.push_str(&markup);
                    }
                }
            }
        }

        if let Some(block_type) = dynamic_type
            && record.content.is_empty()
        {
            record.content = self.render_dynamic(block_type, request, &record.content)?;
        }

        Ok(record)
    }

    fn render_dynamic(
        &self,
        block_type: &dyn BlockType,
        request: RenderRequest<'_>,
        content: &str,
    ) -> Result<String, RenderError> {
        let node = request.node;
        let block = node.name().unwrap_or_default();
        log::debug!("Rendering dynamic block '{block}'");

        let _restore = self.display.map(DisplayContextGuard::save);
        block_type
            .render(&node.attributes, content)
            .map_err(|source| RenderError::DynamicBlock {
                block: block.to_string(),
                source,
            })
    }
}
