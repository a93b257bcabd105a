use crate::link::LinkTarget;
use crate::registry::Slot;
use std::any::Any;
use std::fmt;
use std::sync::Arc;
use style::{Color, Edges, ElementStyle, Font, FontRole, defaults};

/// One node of the render plan handed to the presentation layer.
#[derive(Clone, Debug, PartialEq)]
pub enum PlanNode {
    Text(TextBlock),
    Block(Block),
    Divider,
    Grid(Grid),
    Custom(CustomBlock),
}

impl PlanNode {
    pub fn as_text(&self) -> Option<&TextBlock> {
        match self {
            PlanNode::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_block(&self) -> Option<&Block> {
        match self {
            PlanNode::Block(block) => Some(block),
            _ => None,
        }
    }

    pub fn as_custom(&self) -> Option<&CustomBlock> {
        match self {
            PlanNode::Custom(custom) => Some(custom),
            _ => None,
        }
    }
}

/// What a text block stands for; presentation layers may map this to
/// accessibility traits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextRole {
    Plain,
    Heading(u8),
    Paragraph,
    ListItem,
    TableHeader,
    TableCell,
    DefinitionTerm,
    DefinitionDescription,
    Caption,
}

/// A single flat run of styled text laid out as one block.
#[derive(Clone, Debug, PartialEq)]
pub struct TextBlock {
    pub role: TextRole,
    pub style: BlockStyle,
    pub run: TextRun,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Script {
    #[default]
    Normal,
    Sub,
    Super,
}

impl Script {
    pub fn baseline_offset(self) -> f32 {
        match self {
            Script::Normal => 0.0,
            Script::Sub => defaults::SUBSCRIPT_BASELINE,
            Script::Super => defaults::SUPERSCRIPT_BASELINE,
        }
    }
}

/// Character-level styling of one fragment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TextStyle {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
    pub monospaced: bool,
    pub script: Script,
    /// Base font hint; `None` inherits the enclosing block's font.
    pub font: Option<FontRole>,
    pub foreground: Option<Color>,
    pub background: Option<Color>,
}

impl TextStyle {
    pub fn is_plain(&self) -> bool {
        *self == TextStyle::default()
    }

    /// Font role actually used for the glyphs: sub/superscript force the
    /// smallest role.
    pub fn effective_font(&self) -> Option<FontRole> {
        match self.script {
            Script::Normal => self.font,
            Script::Sub | Script::Super => Some(defaults::SMALL_FONT.role),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Fragment {
    pub text: String,
    pub style: TextStyle,
    pub link: Option<LinkTarget>,
}

/// Concatenation of fragments in document order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextRun {
    pub fragments: Vec<Fragment>,
}

impl TextRun {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn plain(text: impl Into<String>) -> Self {
        let mut run = TextRun::new();
        run.push(text, TextStyle::default(), None);
        run
    }

    /// Appends a fragment; empty text is skipped.
    pub fn push(&mut self, text: impl Into<String>, style: TextStyle, link: Option<LinkTarget>) {
        let text = text.into();
        if text.is_empty() {
            return;
        }
        self.fragments.push(Fragment { text, style, link });
    }

    pub fn append(&mut self, other: TextRun) {
        self.fragments.extend(other.fragments);
    }

    /// Applies `f` to every fragment's style.
    pub fn restyle(mut self, mut f: impl FnMut(&mut TextStyle)) -> Self {
        for fragment in &mut self.fragments {
            f(&mut fragment.style);
        }
        self
    }

    pub fn text(&self) -> String {
        self.fragments.iter().map(|f| f.text.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }
}

/// A leading rule drawn beside a block.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Border {
    pub color: Color,
    pub width: f32,
}

/// Resolved block-level decoration.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BlockStyle {
    pub font: Option<Font>,
    pub foreground: Option<Color>,
    pub background: Option<Color>,
    pub padding: Edges,
    pub line_spacing: Option<f32>,
    /// Vertical gap between children.
    pub spacing: Option<f32>,
    pub border: Option<Border>,
    pub corner_radius: f32,
}

impl BlockStyle {
    pub fn from_entry(entry: &ElementStyle) -> Self {
        BlockStyle {
            font: entry.font,
            foreground: entry.foreground_color,
            background: entry.background_color,
            padding: entry.padding.unwrap_or_default(),
            line_spacing: entry.line_spacing,
            spacing: None,
            border: entry.border_width.map(|width| Border {
                color: entry
                    .border_color
                    .or(entry.foreground_color)
                    .unwrap_or(defaults::ACCENT_COLOR),
                width,
            }),
            corner_radius: entry.corner_radius.unwrap_or(0.0),
        }
    }

    pub fn with_spacing(self, spacing: f32) -> Self {
        BlockStyle {
            spacing: Some(spacing),
            ..self
        }
    }

    pub fn with_font(self, font: Font) -> Self {
        BlockStyle {
            font: Some(font),
            ..self
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum BlockKind {
    Container,
    Heading(u8),
    Paragraph,
    Blockquote,
    Preformatted,
    Caption,
    List { ordered: bool },
    ListItem { marker: String },
    DefinitionList,
    DefinitionTerm,
    DefinitionDescription,
    TableCell { header: bool },
    /// Tappable when `target` is set.
    Link { target: Option<LinkTarget> },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Block {
    pub kind: BlockKind,
    pub style: BlockStyle,
    pub children: Vec<PlanNode>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Grid {
    pub rows: Vec<GridRow>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GridRow {
    pub cells: Vec<GridCell>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GridCell {
    pub header: bool,
    pub content: Vec<PlanNode>,
}

/// Output of a caller override, carried through untouched.
#[derive(Clone, Debug, PartialEq)]
pub struct CustomBlock {
    pub slot: Slot,
    pub tag: String,
    pub payload: Payload,
}

/// Opaque, shareable value produced by an override.
#[derive(Clone)]
pub struct Payload(Arc<dyn Any + Send + Sync>);

impl Payload {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Payload(Arc::new(value))
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    pub fn is<T: Any>(&self) -> bool {
        self.0.is::<T>()
    }
}

impl PartialEq for Payload {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Payload(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_skips_empty_text_and_concatenates() {
        let mut run = TextRun::plain("a");
        run.push("", TextStyle::default(), None);
        run.append(TextRun::plain("b"));
        assert_eq!(run.len(), 2);
        assert_eq!(run.text(), "ab");
    }

    #[test]
    fn scripts_shrink_the_font() {
        let style = TextStyle {
            script: Script::Super,
            font: Some(FontRole::Body),
            ..TextStyle::default()
        };
        assert_eq!(style.effective_font(), Some(FontRole::Caption2));
        assert_eq!(Script::Super.baseline_offset(), 8.0);
        assert_eq!(Script::Sub.baseline_offset(), -4.0);
    }

    #[test]
    fn border_color_falls_back_to_foreground_then_accent() {
        let entry = ElementStyle {
            border_width: Some(2.0),
            foreground_color: Some(Color::ORANGE),
            ..ElementStyle::UNSET
        };
        let border = BlockStyle::from_entry(&entry).border.unwrap();
        assert_eq!(border.color, Color::ORANGE);

        let entry = ElementStyle {
            border_width: Some(2.0),
            ..ElementStyle::UNSET
        };
        let border = BlockStyle::from_entry(&entry).border.unwrap();
        assert_eq!(border.color, defaults::ACCENT_COLOR);
        assert!(BlockStyle::from_entry(&ElementStyle::UNSET).border.is_none());
    }

    #[test]
    fn payloads_compare_by_identity() {
        let a = Payload::new(7u32);
        assert_eq!(a, a.clone());
        assert_ne!(a, Payload::new(7u32));
        assert_eq!(a.downcast_ref::<u32>(), Some(&7));
        assert!(a.downcast_ref::<String>().is_none());
    }
}
