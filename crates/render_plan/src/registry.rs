//! Caller-supplied rendering overrides.
//!
//! Each [`Component`] claims exactly one [`Slot`]. Registering a second
//! component for a slot replaces the first, so the last registration wins.

use crate::compile::Scope;
use crate::link::LinkTarget;
use crate::plan::{Payload, TextRun};
use html::{Attributes, Element, Node};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

pub type BlockFn = dyn Fn(&Scope<'_>, &[Node], &Attributes) -> Payload + Send + Sync;
pub type HeadingFn = dyn Fn(&Scope<'_>, u8, &[Node], &Attributes) -> Payload + Send + Sync;
pub type LinkFn = dyn Fn(&Scope<'_>, Option<&str>, &[Node], &Attributes) -> Payload + Send + Sync;
pub type ListFn = dyn Fn(&Scope<'_>, bool, &[Node], &Attributes) -> Payload + Send + Sync;
pub type TagFn = dyn Fn(&Scope<'_>, &str, &[Node], &Attributes) -> Payload + Send + Sync;
pub type ElementFn = dyn Fn(&Scope<'_>, &Element) -> Payload + Send + Sync;
pub type InlineFn = dyn Fn(TextRun, &Attributes) -> TextRun + Send + Sync;
pub type LinkInlineFn = dyn Fn(TextRun, Option<&LinkTarget>, &Attributes) -> TextRun + Send + Sync;

/// Fixed semantic constructs that can be overridden as a whole.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Construct {
    Heading,
    Paragraph,
    Link,
    List,
    ListItem,
    Blockquote,
    CodeBlock,
    Table,
    DefinitionList,
}

impl Construct {
    /// Construct an element's tag maps to, if any.
    pub fn for_tag(tag: &str) -> Option<Construct> {
        let construct = match tag {
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => Construct::Heading,
            "p" => Construct::Paragraph,
            "a" => Construct::Link,
            "ul" | "ol" => Construct::List,
            "li" => Construct::ListItem,
            "blockquote" => Construct::Blockquote,
            "pre" => Construct::CodeBlock,
            "table" => Construct::Table,
            "dl" => Construct::DefinitionList,
            _ => return None,
        };
        Some(construct)
    }
}

/// Identity of a registry entry.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Slot {
    Construct(Construct),
    LinkInline,
    Tag(String),
    TagInline(String),
    UnknownElement,
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Construct(construct) => write!(f, "{construct:?}"),
            Slot::LinkInline => f.write_str("LinkInline"),
            Slot::Tag(name) => write!(f, "Tag({name})"),
            Slot::TagInline(name) => write!(f, "TagInline({name})"),
            Slot::UnknownElement => f.write_str("UnknownElement"),
        }
    }
}

/// A renderer claiming one slot.
#[derive(Clone)]
pub enum Component {
    Heading(Arc<HeadingFn>),
    Paragraph(Arc<BlockFn>),
    Link(Arc<LinkFn>),
    LinkInline(Arc<LinkInlineFn>),
    List(Arc<ListFn>),
    ListItem(Arc<BlockFn>),
    Blockquote(Arc<BlockFn>),
    CodeBlock(Arc<BlockFn>),
    Table(Arc<BlockFn>),
    DefinitionList(Arc<BlockFn>),
    UnknownElement(Arc<ElementFn>),
    Tag { name: String, render: Arc<TagFn> },
    TagInline {
        name: String,
        transform: Arc<InlineFn>,
    },
}

impl Component {
    pub fn heading(
        f: impl Fn(&Scope<'_>, u8, &[Node], &Attributes) -> Payload + Send + Sync + 'static,
    ) -> Self {
        Component::Heading(Arc::new(f))
    }

    pub fn paragraph(
        f: impl Fn(&Scope<'_>, &[Node], &Attributes) -> Payload + Send + Sync + 'static,
    ) -> Self {
        Component::Paragraph(Arc::new(f))
    }

    pub fn link<F>(f: F) -> Self
    where
        F: Fn(&Scope<'_>, Option<&str>, &[Node], &Attributes) -> Payload + Send + Sync + 'static,
    {
        Component::Link(Arc::new(f))
    }

    pub fn link_inline(
        f: impl Fn(TextRun, Option<&LinkTarget>, &Attributes) -> TextRun + Send + Sync + 'static,
    ) -> Self {
        Component::LinkInline(Arc::new(f))
    }

    pub fn list(
        f: impl Fn(&Scope<'_>, bool, &[Node], &Attributes) -> Payload + Send + Sync + 'static,
    ) -> Self {
        Component::List(Arc::new(f))
    }

    pub fn list_item(
        f: impl Fn(&Scope<'_>, &[Node], &Attributes) -> Payload + Send + Sync + 'static,
    ) -> Self {
        Component::ListItem(Arc::new(f))
    }

    pub fn blockquote(
        f: impl Fn(&Scope<'_>, &[Node], &Attributes) -> Payload + Send + Sync + 'static,
    ) -> Self {
        Component::Blockquote(Arc::new(f))
    }

    pub fn code_block(
        f: impl Fn(&Scope<'_>, &[Node], &Attributes) -> Payload + Send + Sync + 'static,
    ) -> Self {
        Component::CodeBlock(Arc::new(f))
    }

    pub fn table(
        f: impl Fn(&Scope<'_>, &[Node], &Attributes) -> Payload + Send + Sync + 'static,
    ) -> Self {
        Component::Table(Arc::new(f))
    }

    pub fn definition_list(
        f: impl Fn(&Scope<'_>, &[Node], &Attributes) -> Payload + Send + Sync + 'static,
    ) -> Self {
        Component::DefinitionList(Arc::new(f))
    }

    pub fn unknown_element(
        f: impl Fn(&Scope<'_>, &Element) -> Payload + Send + Sync + 'static,
    ) -> Self {
        Component::UnknownElement(Arc::new(f))
    }

    /// Block renderer for a literal tag name (lowercased).
    pub fn tag(
        name: &str,
        f: impl Fn(&Scope<'_>, &str, &[Node], &Attributes) -> Payload + Send + Sync + 'static,
    ) -> Self {
        Component::Tag {
            name: name.to_ascii_lowercase(),
            render: Arc::new(f),
        }
    }

    /// Inline-text transform for a literal tag name (lowercased).
    pub fn tag_inline(
        name: &str,
        f: impl Fn(TextRun, &Attributes) -> TextRun + Send + Sync + 'static,
    ) -> Self {
        Component::TagInline {
            name: name.to_ascii_lowercase(),
            transform: Arc::new(f),
        }
    }

    pub fn slot(&self) -> Slot {
        match self {
            Component::Heading(_) => Slot::Construct(Construct::Heading),
            Component::Paragraph(_) => Slot::Construct(Construct::Paragraph),
            Component::Link(_) => Slot::Construct(Construct::Link),
            Component::LinkInline(_) => Slot::LinkInline,
            Component::List(_) => Slot::Construct(Construct::List),
            Component::ListItem(_) => Slot::Construct(Construct::ListItem),
            Component::Blockquote(_) => Slot::Construct(Construct::Blockquote),
            Component::CodeBlock(_) => Slot::Construct(Construct::CodeBlock),
            Component::Table(_) => Slot::Construct(Construct::Table),
            Component::DefinitionList(_) => Slot::Construct(Construct::DefinitionList),
            Component::UnknownElement(_) => Slot::UnknownElement,
            Component::Tag { name, .. } => Slot::Tag(name.clone()),
            Component::TagInline { name, .. } => Slot::TagInline(name.clone()),
        }
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Component({})", self.slot())
    }
}

#[derive(Clone, Default)]
pub struct OverrideRegistry {
    heading: Option<Arc<HeadingFn>>,
    paragraph: Option<Arc<BlockFn>>,
    link: Option<Arc<LinkFn>>,
    link_inline: Option<Arc<LinkInlineFn>>,
    list: Option<Arc<ListFn>>,
    list_item: Option<Arc<BlockFn>>,
    blockquote: Option<Arc<BlockFn>>,
    code_block: Option<Arc<BlockFn>>,
    table: Option<Arc<BlockFn>>,
    definition_list: Option<Arc<BlockFn>>,
    unknown_element: Option<Arc<ElementFn>>,
    tags: HashMap<String, Arc<TagFn>>,
    tag_inline: HashMap<String, Arc<InlineFn>>,
}

fn replace<T: ?Sized>(slot: &mut Option<Arc<T>>, value: Arc<T>) -> bool {
    slot.replace(value).is_some()
}

impl OverrideRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, component: Component) {
        let slot = component.slot();
        let replaced = match component {
            Component::Heading(f) => replace(&mut self.heading, f),
            Component::Paragraph(f) => replace(&mut self.paragraph, f),
            Component::Link(f) => replace(&mut self.link, f),
            Component::LinkInline(f) => replace(&mut self.link_inline, f),
            Component::List(f) => replace(&mut self.list, f),
            Component::ListItem(f) => replace(&mut self.list_item, f),
            Component::Blockquote(f) => replace(&mut self.blockquote, f),
            Component::CodeBlock(f) => replace(&mut self.code_block, f),
            Component::Table(f) => replace(&mut self.table, f),
            Component::DefinitionList(f) => replace(&mut self.definition_list, f),
            Component::UnknownElement(f) => replace(&mut self.unknown_element, f),
            Component::Tag { name, render } => self.tags.insert(name, render).is_some(),
            Component::TagInline { name, transform } => {
                self.tag_inline.insert(name, transform).is_some()
            }
        };
        if replaced {
            log::debug!(
                target: "render_plan.overrides",
                "slot {slot} replaced by later registration"
            );
        } else {
            log::trace!(target: "render_plan.overrides", "slot {slot} registered");
        }
    }

    pub fn with(mut self, component: Component) -> Self {
        self.register(component);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.slots().is_empty()
    }

    /// Populated slots, constructs first, then tags in name order.
    pub fn slots(&self) -> Vec<Slot> {
        let constructs = [
            (self.heading.is_some(), Construct::Heading),
            (self.paragraph.is_some(), Construct::Paragraph),
            (self.link.is_some(), Construct::Link),
            (self.list.is_some(), Construct::List),
            (self.list_item.is_some(), Construct::ListItem),
            (self.blockquote.is_some(), Construct::Blockquote),
            (self.code_block.is_some(), Construct::CodeBlock),
            (self.table.is_some(), Construct::Table),
            (self.definition_list.is_some(), Construct::DefinitionList),
        ];
        let mut slots: Vec<Slot> = constructs
            .into_iter()
            .filter(|(set, _)| *set)
            .map(|(_, construct)| Slot::Construct(construct))
            .collect();
        if self.link_inline.is_some() {
            slots.push(Slot::LinkInline);
        }
        if self.unknown_element.is_some() {
            slots.push(Slot::UnknownElement);
        }
        let mut tags: Vec<&String> = self.tags.keys().collect();
        tags.sort();
        slots.extend(tags.into_iter().map(|name| Slot::Tag(name.clone())));
        let mut inline: Vec<&String> = self.tag_inline.keys().collect();
        inline.sort();
        slots.extend(inline.into_iter().map(|name| Slot::TagInline(name.clone())));
        slots
    }

    pub fn has_construct(&self, construct: Construct) -> bool {
        match construct {
            Construct::Heading => self.heading.is_some(),
            Construct::Paragraph => self.paragraph.is_some(),
            Construct::Link => self.link.is_some(),
            Construct::List => self.list.is_some(),
            Construct::ListItem => self.list_item.is_some(),
            Construct::Blockquote => self.blockquote.is_some(),
            Construct::CodeBlock => self.code_block.is_some(),
            Construct::Table => self.table.is_some(),
            Construct::DefinitionList => self.definition_list.is_some(),
        }
    }

    /// A block-level link renderer without an inline variant: anchors can then
    /// never be flattened into text.
    pub fn vetoes_links(&self) -> bool {
        self.link.is_some() && self.link_inline.is_none()
    }

    /// True if `tag` would be rendered by a block override rather than as text.
    pub fn claims_block(&self, tag: &str) -> bool {
        if self.tags.contains_key(tag) {
            return true;
        }
        match Construct::for_tag(tag) {
            Some(Construct::Link) => self.vetoes_links(),
            Some(construct) => self.has_construct(construct),
            None => false,
        }
    }

    pub fn tag(&self, name: &str) -> Option<&TagFn> {
        self.tags.get(name).map(|f| &**f)
    }

    pub fn tag_inline(&self, name: &str) -> Option<&InlineFn> {
        self.tag_inline.get(name).map(|f| &**f)
    }

    pub fn link_inline(&self) -> Option<&LinkInlineFn> {
        self.link_inline.as_deref()
    }

    pub(crate) fn heading(&self) -> Option<&HeadingFn> {
        self.heading.as_deref()
    }

    pub(crate) fn link(&self) -> Option<&LinkFn> {
        self.link.as_deref()
    }

    pub(crate) fn list(&self) -> Option<&ListFn> {
        self.list.as_deref()
    }

    pub(crate) fn unknown_element(&self) -> Option<&ElementFn> {
        self.unknown_element.as_deref()
    }

    /// Renderer for the constructs sharing the plain `(children, attributes)` shape.
    pub(crate) fn block(&self, construct: Construct) -> Option<&BlockFn> {
        match construct {
            Construct::Paragraph => self.paragraph.as_deref(),
            Construct::ListItem => self.list_item.as_deref(),
            Construct::Blockquote => self.blockquote.as_deref(),
            Construct::CodeBlock => self.code_block.as_deref(),
            Construct::Table => self.table.as_deref(),
            Construct::DefinitionList => self.definition_list.as_deref(),
            Construct::Heading | Construct::Link | Construct::List => None,
        }
    }
}

impl Extend<Component> for OverrideRegistry {
    fn extend<I: IntoIterator<Item = Component>>(&mut self, iter: I) {
        for component in iter {
            self.register(component);
        }
    }
}

impl FromIterator<Component> for OverrideRegistry {
    fn from_iter<I: IntoIterator<Item = Component>>(iter: I) -> Self {
        let mut registry = OverrideRegistry::new();
        registry.extend(iter);
        registry
    }
}

impl fmt::Debug for OverrideRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverrideRegistry")
            .field("slots", &self.slots())
            .finish()
    }
}
