use crate::defaults;
use crate::numbering::ListNumberFormat;
use crate::values::{Color, Edges, Font};
use serde::Deserialize;

/// Optional visual attributes for one kind of element. Unset fields defer to
/// whatever the consumer would otherwise use.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct ElementStyle {
    pub font: Option<Font>,
    pub foreground_color: Option<Color>,
    pub background_color: Option<Color>,
    pub padding: Option<Edges>,
    pub line_spacing: Option<f32>,
    pub border_color: Option<Color>,
    pub border_width: Option<f32>,
    pub corner_radius: Option<f32>,
}

impl ElementStyle {
    pub const UNSET: ElementStyle = ElementStyle {
        font: None,
        foreground_color: None,
        background_color: None,
        padding: None,
        line_spacing: None,
        border_color: None,
        border_width: None,
        corner_radius: None,
    };

    pub fn with_font(self, font: Font) -> Self {
        ElementStyle {
            font: Some(font),
            ..self
        }
    }

    pub fn with_foreground(self, color: Color) -> Self {
        ElementStyle {
            foreground_color: Some(color),
            ..self
        }
    }

    pub fn with_background(self, color: Color) -> Self {
        ElementStyle {
            background_color: Some(color),
            ..self
        }
    }

    pub fn with_padding(self, padding: Edges) -> Self {
        ElementStyle {
            padding: Some(padding),
            ..self
        }
    }

    pub fn is_unset(&self) -> bool {
        *self == ElementStyle::UNSET
    }

    /// Field-wise merge; set fields of `top` win.
    pub fn overlay(&self, top: &ElementStyle) -> ElementStyle {
        ElementStyle {
            font: top.font.or(self.font),
            foreground_color: top.foreground_color.or(self.foreground_color),
            background_color: top.background_color.or(self.background_color),
            padding: top.padding.or(self.padding),
            line_spacing: top.line_spacing.or(self.line_spacing),
            border_color: top.border_color.or(self.border_color),
            border_width: top.border_width.or(self.border_width),
            corner_radius: top.corner_radius.or(self.corner_radius),
        }
    }
}

/// Immutable styling input to compilation. `Default` leaves everything unset;
/// [`StyleConfiguration::standard`] fills in the documented defaults.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct StyleConfiguration {
    pub heading1: ElementStyle,
    pub heading2: ElementStyle,
    pub heading3: ElementStyle,
    pub heading4: ElementStyle,
    pub heading5: ElementStyle,
    pub heading6: ElementStyle,
    pub paragraph: ElementStyle,
    pub bold: ElementStyle,
    pub italic: ElementStyle,
    pub underline: ElementStyle,
    pub strikethrough: ElementStyle,
    pub code: ElementStyle,
    pub preformatted: ElementStyle,
    pub blockquote: ElementStyle,
    pub link: ElementStyle,
    pub list_item: ElementStyle,
    pub table_header: ElementStyle,
    pub table_cell: ElementStyle,
    pub mark: ElementStyle,
    pub small: ElementStyle,
    pub keyboard: ElementStyle,

    pub block_spacing: Option<f32>,
    pub list_spacing: Option<f32>,
    pub list_marker_spacing: Option<f32>,
    pub bullet: Option<String>,
    pub list_number_format: Option<ListNumberFormat>,
}

static DECIMAL: ListNumberFormat = ListNumberFormat::Decimal;

impl StyleConfiguration {
    pub fn standard() -> Self {
        let pre_block = ElementStyle::UNSET
            .with_font(defaults::BODY_FONT.monospaced())
            .with_background(defaults::code_block_background())
            .with_padding(defaults::code_block_padding());
        StyleConfiguration {
            heading1: ElementStyle::UNSET.with_font(defaults::heading_font(1)),
            heading2: ElementStyle::UNSET.with_font(defaults::heading_font(2)),
            heading3: ElementStyle::UNSET.with_font(defaults::heading_font(3)),
            heading4: ElementStyle::UNSET.with_font(defaults::heading_font(4)),
            heading5: ElementStyle::UNSET.with_font(defaults::heading_font(5)),
            heading6: ElementStyle::UNSET.with_font(defaults::heading_font(6)),
            paragraph: ElementStyle::UNSET.with_font(defaults::BODY_FONT),
            code: ElementStyle::UNSET.with_font(defaults::BODY_FONT.monospaced()),
            preformatted: ElementStyle {
                corner_radius: Some(defaults::CODE_BLOCK_CORNER_RADIUS),
                ..pre_block
            },
            blockquote: ElementStyle {
                padding: Some(Edges::leading(defaults::BLOCKQUOTE_INDENT)),
                border_color: Some(defaults::ACCENT_COLOR),
                border_width: Some(defaults::BLOCKQUOTE_BORDER_WIDTH),
                ..ElementStyle::UNSET
            },
            link: ElementStyle::UNSET.with_foreground(defaults::LINK_COLOR),
            table_header: ElementStyle::UNSET.with_font(defaults::BODY_FONT.bold()),
            mark: ElementStyle::UNSET.with_foreground(defaults::MARK_COLOR),
            small: ElementStyle::UNSET.with_font(defaults::SMALL_FONT),
            keyboard: ElementStyle::UNSET.with_font(defaults::BODY_FONT.monospaced()),
            block_spacing: Some(defaults::BLOCK_SPACING),
            list_spacing: Some(defaults::LIST_SPACING),
            list_marker_spacing: Some(defaults::LIST_MARKER_SPACING),
            bullet: Some(defaults::BULLET.to_string()),
            list_number_format: Some(ListNumberFormat::Decimal),
            ..StyleConfiguration::default()
        }
    }

    /// Style entry for `h1`..`h6`; levels past 6 share `heading6`.
    pub fn heading(&self, level: u8) -> &ElementStyle {
        match level {
            0 | 1 => &self.heading1,
            2 => &self.heading2,
            3 => &self.heading3,
            4 => &self.heading4,
            5 => &self.heading5,
            _ => &self.heading6,
        }
    }

    pub fn block_spacing(&self) -> f32 {
        self.block_spacing.unwrap_or(defaults::BLOCK_SPACING)
    }

    pub fn list_spacing(&self) -> f32 {
        self.list_spacing.unwrap_or(defaults::LIST_SPACING)
    }

    pub fn list_marker_spacing(&self) -> f32 {
        self.list_marker_spacing
            .unwrap_or(defaults::LIST_MARKER_SPACING)
    }

    pub fn bullet(&self) -> &str {
        self.bullet.as_deref().unwrap_or(defaults::BULLET)
    }

    pub fn number_format(&self) -> &ListNumberFormat {
        self.list_number_format.as_ref().unwrap_or(&DECIMAL)
    }

    /// Entry-by-entry merge; anything set in `top` wins.
    pub fn overlay(&self, top: &StyleConfiguration) -> StyleConfiguration {
        StyleConfiguration {
            heading1: self.heading1.overlay(&top.heading1),
            heading2: self.heading2.overlay(&top.heading2),
            heading3: self.heading3.overlay(&top.heading3),
            heading4: self.heading4.overlay(&top.heading4),
            heading5: self.heading5.overlay(&top.heading5),
            heading6: self.heading6.overlay(&top.heading6),
            paragraph: self.paragraph.overlay(&top.paragraph),
            bold: self.bold.overlay(&top.bold),
            italic: self.italic.overlay(&top.italic),
            underline: self.underline.overlay(&top.underline),
            strikethrough: self.strikethrough.overlay(&top.strikethrough),
            code: self.code.overlay(&top.code),
            preformatted: self.preformatted.overlay(&top.preformatted),
            blockquote: self.blockquote.overlay(&top.blockquote),
            link: self.link.overlay(&top.link),
            list_item: self.list_item.overlay(&top.list_item),
            table_header: self.table_header.overlay(&top.table_header),
            table_cell: self.table_cell.overlay(&top.table_cell),
            mark: self.mark.overlay(&top.mark),
            small: self.small.overlay(&top.small),
            keyboard: self.keyboard.overlay(&top.keyboard),
            block_spacing: top.block_spacing.or(self.block_spacing),
            list_spacing: top.list_spacing.or(self.list_spacing),
            list_marker_spacing: top.list_marker_spacing.or(self.list_marker_spacing),
            bullet: top.bullet.clone().or_else(|| self.bullet.clone()),
            list_number_format: top
                .list_number_format
                .clone()
                .or_else(|| self.list_number_format.clone()),
        }
    }
}
