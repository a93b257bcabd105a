use crate::tokenizer::Token;
use crate::types::{Attributes, Document, Element, Node};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ParseMode {
    Document,
    /// Body-context fragment: `html`/`body` tags are ignored and `head` is discarded.
    Fragment,
}

pub fn is_void_element(name: &str) -> bool {
    matches!(
        name,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

/// Start tags that implicitly close an open `<p>`.
fn closes_paragraph(name: &str) -> bool {
    matches!(
        name,
        "address"
            | "article"
            | "aside"
            | "blockquote"
            | "details"
            | "div"
            | "dl"
            | "fieldset"
            | "figcaption"
            | "figure"
            | "footer"
            | "form"
            | "h1"
            | "h2"
            | "h3"
            | "h4"
            | "h5"
            | "h6"
            | "header"
            | "hr"
            | "main"
            | "nav"
            | "ol"
            | "p"
            | "pre"
            | "section"
            | "table"
            | "ul"
    )
}

const BUTTON_SCOPE: &[&str] = &[
    "applet", "button", "caption", "html", "marquee", "object", "table", "td", "template", "th",
];
const LIST_SCOPE: &[&str] = &["ol", "ul", "table", "td", "th", "template"];
const DEFINITION_SCOPE: &[&str] = &["dl", "table", "td", "th", "template"];
/// Start tags past this nesting depth are dropped; their content joins the
/// innermost open element.
pub(crate) const MAX_OPEN_ELEMENTS: usize = 1024;

const TABLE_SCOPE: &[&str] = &["table", "template", "html"];
const ROW_SCOPE: &[&str] = &["tr", "table", "template", "html"];

pub(crate) fn build_tree(tokens: Vec<Token>, mode: ParseMode) -> Document {
    let mut builder = TreeBuilder::new(mode);
    for token in tokens {
        builder.process(token);
    }
    builder.finish()
}

struct TreeBuilder {
    mode: ParseMode,
    root: Vec<Node>,
    open: Vec<Element>,
    /// Element whose whole subtree is being dropped (`script`, `style`, fragment `head`).
    discard_until: Option<String>,
    discard_depth: usize,
}

impl TreeBuilder {
    fn new(mode: ParseMode) -> Self {
        Self {
            mode,
            root: Vec::new(),
            open: Vec::new(),
            discard_until: None,
            discard_depth: 0,
        }
    }

    fn process(&mut self, token: Token) {
        if let Some(target) = self.discard_until.as_deref() {
            match &token {
                Token::StartTag {
                    name, self_closing, ..
                } if name == target && !*self_closing => self.discard_depth += 1,
                Token::EndTag(name) if name == target => {
                    self.discard_depth -= 1;
                    if self.discard_depth == 0 {
                        self.discard_until = None;
                    }
                }
                _ => {}
            }
            return;
        }

        match token {
            Token::Doctype(_) => {}
            Token::Comment(text) => self.append(Node::Comment(text)),
            Token::Text(text) => {
                if !text.is_empty() {
                    self.append(Node::Text(text));
                }
            }
            Token::StartTag {
                name,
                attributes,
                self_closing,
            } => self.start_tag(name, attributes, self_closing),
            Token::EndTag(name) => self.end_tag(&name),
        }
    }

    fn start_tag(
        &mut self,
        name: String,
        attributes: Vec<(String, Option<String>)>,
        self_closing: bool,
    ) {
        if name == "script" || name == "style" || (self.is_fragment() && name == "head") {
            if !self_closing && !is_void_element(&name) {
                self.discard_until = Some(name);
                self.discard_depth = 1;
            }
            return;
        }
        if self.is_fragment() && matches!(name.as_str(), "html" | "body") {
            return;
        }

        self.close_implied(&name);

        let mut attrs = Attributes::new();
        for (key, value) in attributes {
            // Valueless attributes map to their own name; later duplicates win.
            let value = value.unwrap_or_else(|| key.clone());
            attrs.insert(key, value);
        }
        let element = Element {
            tag_name: name,
            attributes: attrs,
            children: Vec::new(),
        };

        if self_closing || is_void_element(&element.tag_name) {
            self.append(Node::Element(element));
        } else if self.open.len() >= MAX_OPEN_ELEMENTS {
            log::trace!(
                target: "html.tree_builder",
                "nesting limit reached, dropping <{}>",
                element.tag_name
            );
        } else {
            self.open.push(element);
        }
    }

    fn close_implied(&mut self, name: &str) {
        if closes_paragraph(name) {
            if let Some(idx) = self.find_in_scope(&["p"], BUTTON_SCOPE) {
                self.close_through(idx);
            }
        }
        let implied = match name {
            "li" => self.find_in_scope(&["li"], LIST_SCOPE),
            "dt" | "dd" => self.find_in_scope(&["dt", "dd"], DEFINITION_SCOPE),
            "tr" => self.find_in_scope(&["tr"], TABLE_SCOPE),
            "td" | "th" => self.find_in_scope(&["td", "th"], ROW_SCOPE),
            "thead" | "tbody" | "tfoot" => self
                .find_in_scope(&["thead", "tbody", "tfoot"], TABLE_SCOPE)
                .or_else(|| self.find_in_scope(&["tr"], TABLE_SCOPE)),
            _ => None,
        };
        if let Some(idx) = implied {
            self.close_through(idx);
        }
    }

    fn end_tag(&mut self, name: &str) {
        if self.is_fragment() && matches!(name, "html" | "body" | "head") {
            return;
        }
        let Some(idx) = self.open.iter().rposition(|el| el.tag_name == name) else {
            log::trace!(target: "html.tree_builder", "ignoring stray end tag </{name}>");
            return;
        };
        self.close_through(idx);
    }

    fn find_in_scope(&self, targets: &[&str], boundaries: &[&str]) -> Option<usize> {
        for (idx, el) in self.open.iter().enumerate().rev() {
            if targets.contains(&el.tag_name.as_str()) {
                return Some(idx);
            }
            if boundaries.contains(&el.tag_name.as_str()) {
                return None;
            }
        }
        None
    }

    /// Closes the open element at `idx` and everything opened after it.
    fn close_through(&mut self, idx: usize) {
        while self.open.len() > idx {
            self.close_top();
        }
    }

    fn close_top(&mut self) {
        if let Some(el) = self.open.pop() {
            self.append(Node::Element(el));
        }
    }

    fn append(&mut self, node: Node) {
        let siblings = match self.open.last_mut() {
            Some(parent) => &mut parent.children,
            None => &mut self.root,
        };
        if let (Node::Text(text), Some(Node::Text(prev))) = (&node, siblings.last_mut()) {
            prev.push_str(text);
            return;
        }
        siblings.push(node);
    }

    fn is_fragment(&self) -> bool {
        self.mode == ParseMode::Fragment
    }

    fn finish(mut self) -> Document {
        self.close_through(0);
        Document::new(self.root)
    }
}
