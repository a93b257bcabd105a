use crate::registry::OverrideRegistry;
use html::{Element, Node, traverse};

/// Tags whose content is inline text flow.
pub const PHRASING_TAGS: &[&str] = &[
    "b", "strong", "i", "em", "u", "s", "del", "code", "span", "sub", "sup", "a", "br", "mark",
    "small", "kbd", "q", "cite", "ins", "abbr",
];

pub fn is_phrasing(tag: &str) -> bool {
    PHRASING_TAGS.contains(&tag)
}

/// True when `nodes` can be drawn as one flat styled text run.
///
/// A block-level link override without an inline variant vetoes collapsing
/// if an anchor appears anywhere below `nodes`.
pub fn can_collapse(nodes: &[Node], registry: &OverrideRegistry) -> bool {
    if registry.vetoes_links() && traverse::contains_tag(nodes, "a") {
        log::trace!(target: "render_plan.collapse", "anchor under block link override");
        return false;
    }
    nodes.iter().all(|node| node_collapses(node, registry))
}

/// Per-node check without the subtree-wide link veto; callers that group
/// siblings apply the veto per node via [`can_collapse`].
fn node_collapses(node: &Node, registry: &OverrideRegistry) -> bool {
    match node {
        Node::Text(_) | Node::Comment(_) => true,
        Node::Element(el) => element_collapses(el, registry),
    }
}

fn element_collapses(el: &Element, registry: &OverrideRegistry) -> bool {
    let tag = el.tag_name.as_str();
    if registry.tag_inline(tag).is_some() {
        return children_collapse(el, registry);
    }
    if registry.claims_block(tag) {
        return false;
    }
    if is_phrasing(tag) {
        return children_collapse(el, registry);
    }
    false
}

fn children_collapse(el: &Element, registry: &OverrideRegistry) -> bool {
    el.children.iter().all(|child| node_collapses(child, registry))
}
