use std::collections::BTreeMap;

/// Element attributes. Keys are lowercase; a duplicate attribute in the
/// source replaces the earlier value. Rendering never depends on order.
pub type Attributes = BTreeMap<String, String>;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Node {
    Text(String),
    Comment(String),
    Element(Element),
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }

    /// True for text nodes made only of whitespace (including empty ones).
    pub fn is_whitespace_text(&self) -> bool {
        matches!(self, Node::Text(text) if text.chars().all(char::is_whitespace))
    }

    pub fn is_element_named(&self, tag: &str) -> bool {
        matches!(self, Node::Element(el) if el.tag_name == tag)
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Element {
    /// Always lowercase and non-empty for parsed elements.
    pub tag_name: String,
    pub attributes: Attributes,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag_name: &str) -> Self {
        Self {
            tag_name: tag_name.to_ascii_lowercase(),
            attributes: Attributes::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attributes
            .insert(name.to_ascii_lowercase(), value.into());
        self
    }

    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.with_child(Node::Text(text.into()))
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn is(&self, tag: &str) -> bool {
        self.tag_name == tag
    }

    /// `Some(1..=6)` for `h1`..`h6`.
    pub fn heading_level(&self) -> Option<u8> {
        match self.tag_name.as_bytes() {
            [b'h', d @ b'1'..=b'6'] => Some(d - b'0'),
            _ => None,
        }
    }

    /// Direct element children with the given tag, in document order.
    pub fn child_elements<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children
            .iter()
            .filter_map(Node::as_element)
            .filter(move |el| el.tag_name == tag)
    }
}

/// Root wrapper produced by the parser. Owns its subtree exclusively.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Document {
    pub children: Vec<Node>,
}

impl Document {
    pub fn new(children: Vec<Node>) -> Self {
        Self { children }
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl From<Element> for Document {
    fn from(el: Element) -> Self {
        Document::new(vec![Node::Element(el)])
    }
}
