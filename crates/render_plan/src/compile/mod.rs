//! Element dispatch: overrides first, then built-in constructs, then the
//! unknown-element fallback.

mod builtin;

#[cfg(test)]
mod tests;

use crate::collapse::can_collapse;
use crate::compose::{Composer, InlineStyle};
use crate::plan::{
    Block, BlockKind, BlockStyle, CustomBlock, Payload, PlanNode, TextBlock, TextRole, TextRun,
};
use crate::registry::{Construct, OverrideRegistry, Slot};
use html::{Document, Element, Node};
use std::slice;
use style::StyleConfiguration;
use url::Url;

pub const DEFAULT_MAX_DEPTH: usize = 512;

#[derive(Clone, Debug, PartialEq)]
pub struct CompileOptions {
    /// Element levels below this depth are dropped.
    pub max_depth: usize,
    /// Base for resolving relative link targets.
    pub base_url: Option<Url>,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            base_url: None,
        }
    }
}

/// Compile nodes with default options.
pub fn compile(
    nodes: &[Node],
    style: &StyleConfiguration,
    registry: &OverrideRegistry,
) -> Vec<PlanNode> {
    Compiler::new(style, registry).compile(nodes)
}

pub fn compile_document(
    document: &Document,
    style: &StyleConfiguration,
    registry: &OverrideRegistry,
) -> Vec<PlanNode> {
    compile(&document.children, style, registry)
}

pub struct Compiler<'a> {
    style: &'a StyleConfiguration,
    registry: &'a OverrideRegistry,
    options: CompileOptions,
    /// Styling from phrasing wrappers around the content being compiled.
    inherited: InlineStyle,
}

impl<'a> Compiler<'a> {
    pub fn new(style: &'a StyleConfiguration, registry: &'a OverrideRegistry) -> Self {
        Self {
            style,
            registry,
            options: CompileOptions::default(),
            inherited: InlineStyle::default(),
        }
    }

    pub fn with_options(mut self, options: CompileOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Compile a node list in block context.
    pub fn compile(&self, nodes: &[Node]) -> Vec<PlanNode> {
        self.flow(nodes, 0, Whitespace::Collapse)
    }

    /// Plan for one element. Transparent wrappers yield their children's
    /// nodes; non-rendering elements yield nothing.
    pub fn compile_element(&self, element: &Element) -> Vec<PlanNode> {
        self.element(element, 0)
    }

    pub fn compose(&self, nodes: &[Node], inherited: &InlineStyle) -> TextRun {
        self.composer().compose(nodes, inherited, 0)
    }

    pub fn can_collapse(&self, nodes: &[Node]) -> bool {
        can_collapse(nodes, self.registry)
    }

    fn composer(&self) -> Composer<'_> {
        Composer {
            config: self.style,
            registry: self.registry,
            base_url: self.options.base_url.as_ref(),
            max_depth: self.options.max_depth,
        }
    }

    /// Same compiler, with `inherited` applied to every run it composes.
    fn restyled(&self, inherited: InlineStyle) -> Compiler<'a> {
        Compiler {
            style: self.style,
            registry: self.registry,
            options: self.options.clone(),
            inherited,
        }
    }

    fn scope(&self, depth: usize) -> Scope<'_> {
        Scope {
            compiler: self,
            depth,
        }
    }

    fn element(&self, el: &Element, depth: usize) -> Vec<PlanNode> {
        if depth >= self.options.max_depth {
            log::warn!(
                target: "render_plan.compile",
                "depth limit {} reached at <{}>, subtree dropped",
                self.options.max_depth,
                el.tag_name
            );
            return Vec::new();
        }
        let tag = el.tag_name.as_str();

        if let Some(node) = self.named_override(el, depth) {
            log::trace!(target: "render_plan.compile", "<{tag}> -> construct override");
            return vec![node];
        }

        if let Some(render) = self.registry.tag(tag) {
            log::trace!(target: "render_plan.compile", "<{tag}> -> tag override");
            let payload = render(&self.scope(depth + 1), tag, &el.children, &el.attributes);
            return vec![custom(Slot::Tag(tag.to_string()), el, payload)];
        }

        if self.registry.tag_inline(tag).is_some() {
            if can_collapse(&el.children, self.registry) {
                log::trace!(target: "render_plan.compile", "<{tag}> -> inline override");
                let run = self.composer().compose_element(el, &self.inherited, depth);
                return text_block(TextRole::Plain, BlockStyle::default(), run)
                    .into_iter()
                    .collect();
            }
            log::debug!(
                target: "render_plan.compile",
                "<{tag}> has block content, inline override skipped"
            );
            return self
                .builtin(el, depth)
                .unwrap_or_else(|| self.flow(&el.children, depth + 1, Whitespace::Collapse));
        }

        if let Some(nodes) = self.builtin(el, depth) {
            log::trace!(target: "render_plan.compile", "<{tag}> -> built-in");
            return nodes;
        }

        if let Some(render) = self.registry.unknown_element() {
            log::trace!(target: "render_plan.compile", "<{tag}> -> unknown element override");
            let payload = render(&self.scope(depth + 1), el);
            return vec![custom(Slot::UnknownElement, el, payload)];
        }
        log::debug!(target: "render_plan.compile", "unknown <{tag}>, rendering its children");
        self.flow(&el.children, depth + 1, Whitespace::Collapse)
    }

    fn named_override(&self, el: &Element, depth: usize) -> Option<PlanNode> {
        let construct = Construct::for_tag(&el.tag_name)?;
        let scope = self.scope(depth + 1);
        let (children, attrs) = (&el.children[..], &el.attributes);
        let payload = match construct {
            Construct::Heading => {
                let render = self.registry.heading()?;
                render(&scope, el.heading_level()?, children, attrs)
            }
            Construct::Link => {
                let render = self.registry.link()?;
                render(&scope, el.attr("href"), children, attrs)
            }
            Construct::List => {
                let render = self.registry.list()?;
                render(&scope, el.is("ol"), children, attrs)
            }
            other => {
                let render = self.registry.block(other)?;
                render(&scope, children, attrs)
            }
        };
        Some(custom(Slot::Construct(construct), el, payload))
    }

    /// Block-context rendering of `nodes`: consecutive inline content is
    /// grouped into text blocks, everything else is dispatched per element.
    fn flow(&self, nodes: &[Node], depth: usize, whitespace: Whitespace) -> Vec<PlanNode> {
        let mut out = Vec::new();
        let mut run_start = None;
        for (idx, node) in nodes.iter().enumerate() {
            if self.joins_inline_run(node) {
                run_start.get_or_insert(idx);
                continue;
            }
            if let Some(start) = run_start.take() {
                out.extend(self.inline_run(&nodes[start..idx], depth, whitespace));
            }
            if let Node::Element(el) = node {
                out.extend(self.element(el, depth));
            }
        }
        if let Some(start) = run_start {
            out.extend(self.inline_run(&nodes[start..], depth, whitespace));
        }
        out
    }

    /// Text, comments and collapsible inline elements that no block override
    /// claims at this level.
    fn joins_inline_run(&self, node: &Node) -> bool {
        match node {
            Node::Text(_) | Node::Comment(_) => true,
            Node::Element(el) => {
                let tag = el.tag_name.as_str();
                let overridden = self.registry.tag(tag).is_some()
                    || Construct::for_tag(tag)
                        .is_some_and(|construct| self.registry.has_construct(construct));
                !overridden && can_collapse(slice::from_ref(node), self.registry)
            }
        }
    }

    fn inline_run(&self, nodes: &[Node], depth: usize, whitespace: Whitespace) -> Option<PlanNode> {
        let nodes = match whitespace {
            Whitespace::Preserve => nodes,
            Whitespace::Collapse => trim_blank_edges(nodes),
        };
        let run = self.composer().compose(nodes, &self.inherited, depth);
        let blank = run.text().trim().is_empty() && !has_line_break(nodes);
        if whitespace == Whitespace::Collapse && blank {
            return None;
        }
        text_block(TextRole::Plain, BlockStyle::default(), run)
    }

    /// Collapsed text when possible, otherwise a block of compiled children.
    fn text_or_block(
        &self,
        nodes: &[Node],
        depth: usize,
        role: TextRole,
        kind: BlockKind,
        style: BlockStyle,
    ) -> PlanNode {
        if can_collapse(nodes, self.registry) {
            let run = self.composer().compose(nodes, &self.inherited, depth + 1);
            return PlanNode::Text(TextBlock { role, style, run });
        }
        log::trace!(target: "render_plan.compile", "{role:?} content is block-level");
        PlanNode::Block(Block {
            kind,
            style,
            children: self.flow(nodes, depth + 1, Whitespace::Collapse),
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Whitespace {
    Collapse,
    Preserve,
}

fn custom(slot: Slot, el: &Element, payload: Payload) -> PlanNode {
    PlanNode::Custom(CustomBlock {
        slot,
        tag: el.tag_name.clone(),
        payload,
    })
}

fn text_block(role: TextRole, style: BlockStyle, run: TextRun) -> Option<PlanNode> {
    if run.is_empty() {
        return None;
    }
    Some(PlanNode::Text(TextBlock { role, style, run }))
}

fn trim_blank_edges(nodes: &[Node]) -> &[Node] {
    let blank = |node: &Node| node.is_whitespace_text() || matches!(node, Node::Comment(_));
    let start = nodes.iter().position(|n| !blank(n)).unwrap_or(nodes.len());
    let end = nodes.iter().rposition(|n| !blank(n)).map_or(start, |i| i + 1);
    &nodes[start..end]
}

fn has_line_break(nodes: &[Node]) -> bool {
    html::traverse::contains_tag(nodes, "br")
}

/// Handle given to overrides for rendering nested content with the same
/// configuration and registry.
pub struct Scope<'a> {
    compiler: &'a Compiler<'a>,
    depth: usize,
}

impl Scope<'_> {
    pub fn compile(&self, nodes: &[Node]) -> Vec<PlanNode> {
        self.compiler.flow(nodes, self.depth, Whitespace::Collapse)
    }

    pub fn compose(&self, nodes: &[Node]) -> TextRun {
        self.compose_with(nodes, &self.compiler.inherited)
    }

    pub fn compose_with(&self, nodes: &[Node], inherited: &InlineStyle) -> TextRun {
        self.compiler.composer().compose(nodes, inherited, self.depth)
    }

    pub fn can_collapse(&self, nodes: &[Node]) -> bool {
        self.compiler.can_collapse(nodes)
    }

    pub fn style(&self) -> &StyleConfiguration {
        self.compiler.style
    }

    pub fn registry(&self) -> &OverrideRegistry {
        self.compiler.registry
    }

    /// Element depth of the nodes this scope renders.
    pub fn depth(&self) -> usize {
        self.depth
    }
}
