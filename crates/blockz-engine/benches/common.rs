// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
use blockz_engine::BlockNode;

/// A group nested `depth` levels deep around a single heading.
#[allow(dead_code)]
pub fn nested_tree(depth: usize) -> BlockNode {
    let mut node = BlockNode::named("core/heading").with_literal("<h3>Leaf</h3>");
    for level in 0..depth {
        node = BlockNode::named("core/group")
            .with_literal(format!("<div class=\"level-{level}\">"))
            .with_child(node)
            .with_literal("</div>");
    }
    node
}

/// A flat page of `sections` custom blocks with colours and spacing, separated
/// by the blank freeform blocks the block parser emits between them.
#[allow(dead_code)]
pub fn flat_page(sections: usize) -> Vec<BlockNode> {
    let mut nodes = Vec::with_capacity(sections * 2);
    for section in 0..sections {
        nodes.push(
            BlockNode::named("acf/acf-section")
                .with_attribute("align", if section % 2 == 0 { "full" } else { "wide" })
                .with_attribute(
                    "data",
                    serde_json::json!({
                        "block_background_color": "#0e7490",
                        "block_text_color": "#ffffff",
                        "block_spacing_top": "pt-12",
                    }),
                )
                .with_literal("<div>")
                .with_child(
                    BlockNode::named("core/paragraph")
                        .with_literal(format!("<p>Section {section} body copy.</p>")),
                )
                .with_literal("</div>"),
        );
        nodes.push(BlockNode::freeform("\n\n"));
    }
    nodes
}
