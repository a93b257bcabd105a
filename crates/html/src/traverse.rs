use crate::Node;

/// Pre-order walk over `nodes` and all descendants. `visit` receives each node
/// and its depth (0 for the nodes passed in).
pub fn walk<'a>(nodes: &'a [Node], visit: &mut impl FnMut(&'a Node, usize)) {
    fn go<'a>(node: &'a Node, depth: usize, visit: &mut impl FnMut(&'a Node, usize)) {
        visit(node, depth);
        if let Node::Element(el) = node {
            for child in &el.children {
                go(child, depth + 1, visit);
            }
        }
    }

    for node in nodes {
        go(node, 0, visit);
    }
}

/// True if any element at any depth under `nodes` has the given tag.
pub fn contains_tag(nodes: &[Node], tag: &str) -> bool {
    nodes.iter().any(|node| match node {
        Node::Element(el) => el.tag_name == tag || contains_tag(&el.children, tag),
        Node::Text(_) | Node::Comment(_) => false,
    })
}

/// Element nesting depth: 0 for a list with no elements, 1 for flat elements.
#[cfg(test)]
pub(crate) fn max_depth(nodes: &[Node]) -> usize {
    nodes
        .iter()
        .filter_map(Node::as_element)
        .map(|el| 1 + max_depth(&el.children))
        .max()
        .unwrap_or(0)
}

pub fn is_non_rendering_element(tag: &str) -> bool {
    matches!(
        tag,
        "head" | "title" | "meta" | "link" | "base" | "script" | "style" | "template"
    )
}
