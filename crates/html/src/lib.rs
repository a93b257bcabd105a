//! Document model and a forgiving markup parser.
//!
//! The parser is deliberately small: it lowercases names, drops `script`/`style`
//! content, keeps unknown tags under their literal lowercase spelling and applies
//! a practical subset of implied end tags. It never fails.

pub mod collect;
pub mod debug;
pub mod traverse;

mod dom_builder;
mod entities;
mod tokenizer;
mod types;

use crate::dom_builder::{ParseMode, build_tree};

pub use crate::dom_builder::is_void_element;
pub use crate::tokenizer::{Token, tokenize};
pub use crate::types::{Attributes, Document, Element, Node};

/// Parse a complete document. `html`/`head`/`body` are kept as written.
pub fn parse_document(markup: &str) -> Document {
    if markup.is_empty() {
        return Document::default();
    }
    build_tree(tokenize(markup), ParseMode::Document)
}

/// Parse markup as the content of a `<body>`.
pub fn parse_fragment(markup: &str) -> Document {
    if markup.is_empty() {
        return Document::default();
    }
    build_tree(tokenize(markup), ParseMode::Fragment)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_empty_document() {
        assert!(parse_document("").is_empty());
        assert!(parse_fragment("").is_empty());
    }

    #[test]
    fn document_keeps_skeleton() {
        let markup = "<!doctype html><html><head><title>T</title></head><body>x</body></html>";
        let doc = parse_document(markup);
        assert_eq!(doc.children.len(), 1);
        let html = doc.children[0].as_element().unwrap();
        assert!(html.is("html"));
        let names: Vec<&str> = html
            .children
            .iter()
            .filter_map(Node::as_element)
            .map(|el| el.tag_name.as_str())
            .collect();
        assert_eq!(names, ["head", "body"]);
    }

    #[test]
    fn unknown_tags_keep_their_lowercase_spelling() {
        let doc = parse_fragment("<Callout Kind=Note>Hi</Callout>");
        let el = doc.children[0].as_element().unwrap();
        assert_eq!(el.tag_name, "callout");
        assert_eq!(el.attr("kind"), Some("Note"));
        assert_eq!(el.children, vec![Node::text("Hi")]);
    }

    #[test]
    fn duplicate_attributes_last_wins() {
        let doc = parse_fragment(r#"<a href="1" HREF="2">x</a>"#);
        let el = doc.children[0].as_element().unwrap();
        assert_eq!(el.attr("href"), Some("2"));
    }
}
