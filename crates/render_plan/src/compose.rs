use crate::link::{LinkTarget, resolve_link};
use crate::plan::{Script, TextRun, TextStyle};
use crate::registry::OverrideRegistry;
use html::{Element, Node};
use style::{ElementStyle, StyleConfiguration, defaults};
use url::Url;

const OPEN_QUOTE: &str = "\u{201C}";
const CLOSE_QUOTE: &str = "\u{201D}";

/// Styling inherited while walking nested inline markup. Every step works on
/// its own copy, so siblings never see each other's toggles.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InlineStyle {
    pub text: TextStyle,
    pub link: Option<LinkTarget>,
}

impl InlineStyle {
    fn with(&self, f: impl FnOnce(&mut InlineStyle)) -> InlineStyle {
        let mut next = self.clone();
        f(&mut next);
        next
    }
}

/// Compose `nodes` into one run with default compile options.
pub fn compose(
    nodes: &[Node],
    inherited: &InlineStyle,
    config: &StyleConfiguration,
    registry: &OverrideRegistry,
) -> TextRun {
    Composer {
        config,
        registry,
        base_url: None,
        max_depth: crate::compile::DEFAULT_MAX_DEPTH,
    }
    .compose(nodes, inherited, 0)
}

pub(crate) struct Composer<'a> {
    pub(crate) config: &'a StyleConfiguration,
    pub(crate) registry: &'a OverrideRegistry,
    pub(crate) base_url: Option<&'a Url>,
    pub(crate) max_depth: usize,
}

impl Composer<'_> {
    /// `depth` is the element depth of `nodes` within the document.
    pub(crate) fn compose(&self, nodes: &[Node], inherited: &InlineStyle, depth: usize) -> TextRun {
        let mut run = TextRun::new();
        self.compose_into(&mut run, nodes, inherited, depth);
        run
    }

    /// Composes a single element, as if it were the only node of a run.
    pub(crate) fn compose_element(
        &self,
        el: &Element,
        inherited: &InlineStyle,
        depth: usize,
    ) -> TextRun {
        let mut run = TextRun::new();
        self.element(&mut run, el, inherited, depth);
        run
    }

    fn compose_into(
        &self,
        run: &mut TextRun,
        nodes: &[Node],
        inherited: &InlineStyle,
        depth: usize,
    ) {
        for node in nodes {
            match node {
                Node::Text(text) => run.push(text.as_str(), inherited.text, inherited.link.clone()),
                Node::Comment(_) => {}
                Node::Element(el) => {
                    if depth >= self.max_depth {
                        log::warn!(
                            target: "render_plan.compile",
                            "depth limit {} reached composing <{}>, subtree dropped",
                            self.max_depth,
                            el.tag_name
                        );
                        continue;
                    }
                    self.element(run, el, inherited, depth);
                }
            }
        }
    }

    fn element(&self, run: &mut TextRun, el: &Element, parent: &InlineStyle, depth: usize) {
        let tag = el.tag_name.as_str();
        let children = &el.children;
        let child_depth = depth + 1;

        if tag != "a" {
            if let Some(transform) = self.registry.tag_inline(tag) {
                let inner = self.compose(children, parent, child_depth);
                run.append(transform(inner, &el.attributes));
                return;
            }
        }

        match tag {
            "a" => {
                if let Some(transform) = self.registry.link_inline() {
                    let target = resolve_link(el.attr("href"), self.base_url);
                    let linked = parent.with(|s| {
                        if target.is_some() {
                            s.link = target.clone();
                        }
                    });
                    let inner = self.compose(children, &linked, child_depth);
                    run.append(transform(inner, target.as_ref(), &el.attributes));
                    return;
                }
            }
            "br" => {
                run.push("\n", parent.text, parent.link.clone());
                return;
            }
            "q" => {
                run.push(OPEN_QUOTE, parent.text, parent.link.clone());
                self.compose_into(run, children, parent, child_depth);
                run.push(CLOSE_QUOTE, parent.text, parent.link.clone());
                return;
            }
            _ => {}
        }
        let style = self.wrapper_style(el, parent);
        self.compose_into(run, children, &style, child_depth);
    }

    /// Style that `el` hands down to its children when it merely wraps them.
    pub(crate) fn wrapper_style(&self, el: &Element, parent: &InlineStyle) -> InlineStyle {
        let config = self.config;
        match el.tag_name.as_str() {
            "b" | "strong" => parent.with(|s| {
                s.text.bold = true;
                apply_entry(&mut s.text, &config.bold);
            }),
            "i" | "em" | "cite" => parent.with(|s| {
                s.text.italic = true;
                apply_entry(&mut s.text, &config.italic);
            }),
            "u" | "ins" => parent.with(|s| {
                s.text.underline = true;
                apply_entry(&mut s.text, &config.underline);
            }),
            "s" | "del" => parent.with(|s| {
                s.text.strikethrough = true;
                apply_entry(&mut s.text, &config.strikethrough);
            }),
            "code" => parent.with(|s| {
                s.text.monospaced = true;
                apply_entry(&mut s.text, &config.code);
            }),
            "kbd" => parent.with(|s| {
                s.text.monospaced = true;
                apply_entry(&mut s.text, &config.keyboard);
            }),
            "sub" => parent.with(|s| s.text.script = Script::Sub),
            "sup" => parent.with(|s| s.text.script = Script::Super),
            "a" => {
                let target = resolve_link(el.attr("href"), self.base_url);
                parent.with(|s| {
                    s.text.underline = true;
                    apply_entry(&mut s.text, &config.link);
                    s.text.foreground =
                        Some(config.link.foreground_color.unwrap_or(defaults::LINK_COLOR));
                    if target.is_some() {
                        s.link = target;
                    }
                })
            }
            "mark" => parent.with(|s| {
                s.text.bold = true;
                if s.text.foreground.is_none() {
                    s.text.foreground =
                        Some(config.mark.foreground_color.unwrap_or(defaults::MARK_COLOR));
                }
                if let Some(background) = config.mark.background_color {
                    s.text.background = Some(background);
                }
            }),
            "small" => parent.with(|s| {
                let font = config.small.font.unwrap_or(defaults::SMALL_FONT);
                s.text.font = Some(font.role);
            }),
            "span" | "abbr" | "q" => parent.clone(),
            other => {
                log::debug!(
                    target: "render_plan.compile",
                    "<{other}> is not inline markup, composing its children unstyled"
                );
                parent.clone()
            }
        }
    }
}

/// Colors and font flags from a configured inline entry. Font roles only
/// apply to blocks, except for `small`.
fn apply_entry(text: &mut TextStyle, entry: &ElementStyle) {
    if let Some(font) = entry.font {
        text.bold |= font.bold;
        text.italic |= font.italic;
        text.monospaced |= font.monospaced;
    }
    if let Some(color) = entry.foreground_color {
        text.foreground = Some(color);
    }
    if let Some(color) = entry.background_color {
        text.background = Some(color);
    }
}
