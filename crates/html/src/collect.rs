use crate::Node;
use crate::traverse::walk;

/// Concatenated text of all text nodes under `nodes`, comments excluded.
#[cfg(test)]
pub(crate) fn text_content(nodes: &[Node]) -> String {
    let mut out = String::new();
    walk(nodes, &mut |node, _| {
        if let Node::Text(text) = node {
            out.push_str(text);
        }
    });
    out
}

/// Collect `<a href="…">` values in document order. Blank hrefs are skipped.
pub fn link_hrefs(nodes: &[Node]) -> Vec<String> {
    let mut out = Vec::new();
    walk(nodes, &mut |node, _| {
        if let Node::Element(el) = node {
            if el.is("a") {
                if let Some(href) = el.attr("href") {
                    let href = href.trim();
                    if !href.is_empty() {
                        out.push(href.to_string());
                    }
                }
            }
        }
    });
    out
}
