use crate::{Document, Node};
use std::fmt::Write;

const INDENT_STEP: &str = "  ";
const PREVIEW_CHARS: usize = 40;

fn push_preview(out: &mut String, s: &str) {
    for (i, ch) in s.chars().enumerate() {
        if i == PREVIEW_CHARS {
            out.push('\u{2026}');
            break;
        }
        out.push(if ch == '\n' { ' ' } else { ch });
    }
}

/// Indented one-line-per-node outline of a document, capped at `cap` lines.
/// Whitespace-only text nodes are omitted.
pub fn outline(doc: &Document, cap: usize) -> Vec<String> {
    fn walk(node: &Node, indent: &mut String, out: &mut Vec<String>, left: &mut usize) {
        if *left == 0 {
            return;
        }
        match node {
            Node::Element(el) => {
                *left -= 1;
                let mut line = format!("{indent}<{}", el.tag_name);
                for (key, value) in el.attributes.iter().take(3) {
                    let _ = write!(&mut line, r#" {key}="{value}""#);
                }
                if el.attributes.len() > 3 {
                    line.push_str(" \u{2026}");
                }
                line.push('>');
                out.push(line);

                indent.push_str(INDENT_STEP);
                for child in &el.children {
                    walk(child, indent, out, left);
                }
                indent.truncate(indent.len() - INDENT_STEP.len());
            }
            Node::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    return;
                }
                *left -= 1;
                let mut line = format!("{indent}\"");
                push_preview(&mut line, trimmed);
                line.push('"');
                out.push(line);
            }
            Node::Comment(text) => {
                *left -= 1;
                let mut line = format!("{indent}<!-- ");
                push_preview(&mut line, text.trim());
                line.push_str(" -->");
                out.push(line);
            }
        }
    }

    let mut out = Vec::new();
    let mut left = cap;
    let mut indent = String::new();
    for node in &doc.children {
        walk(node, &mut indent, &mut out, &mut left);
    }
    out
}
