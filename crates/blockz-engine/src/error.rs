/// Error type returned by external collaborators (templates, dynamic blocks).
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failures raised while rendering a block tree.
///
/// The renderer never recovers from these: they carry the collaborator's
/// own error up to the caller, who owns the failure policy.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Template '{template}' failed for block '{block_id}': {source}")]
    Template {
        template: String,
        block_id: String,
        source: BoxError,
    },

    #[error("Dynamic block '{block}' failed to render: {source}")]
    DynamicBlock { block: String, source: BoxError },
}
