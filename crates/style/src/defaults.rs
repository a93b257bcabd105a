//! Values used wherever a configuration leaves an entry unset.

use crate::values::{Color, Edges, Font, FontRole};

pub const BLOCK_SPACING: f32 = 8.0;
pub const LIST_SPACING: f32 = 4.0;
pub const LIST_MARKER_SPACING: f32 = 6.0;
pub const BULLET: &str = "\u{2022}";

pub const LINK_COLOR: Color = Color::BLUE;
pub const MARK_COLOR: Color = Color::ORANGE;
pub const ACCENT_COLOR: Color = Color::rgb(0, 122, 255);
pub const SECONDARY_COLOR: Color = Color::GRAY;

pub const BLOCKQUOTE_INDENT: f32 = 16.0;
pub const BLOCKQUOTE_BORDER_WIDTH: f32 = 3.0;
pub const DEFINITION_INDENT: f32 = 16.0;

pub const CODE_BLOCK_PADDING: f32 = 8.0;
pub const CODE_BLOCK_CORNER_RADIUS: f32 = 8.0;
pub const CODE_BLOCK_BACKGROUND_OPACITY: f32 = 0.1;

pub const SUBSCRIPT_BASELINE: f32 = -4.0;
pub const SUPERSCRIPT_BASELINE: f32 = 8.0;

pub const SMALL_FONT: Font = Font::role(FontRole::Caption2);
pub const CAPTION_FONT: Font = Font::role(FontRole::Caption);
pub const BODY_FONT: Font = Font::role(FontRole::Body);

pub fn heading_font(level: u8) -> Font {
    let role = match level {
        1 => FontRole::LargeTitle,
        2 => FontRole::Title,
        3 => FontRole::Title2,
        4 => FontRole::Title3,
        5 => FontRole::Headline,
        _ => FontRole::Subheadline,
    };
    Font::role(role)
}

pub fn code_block_background() -> Color {
    Color::GRAY.with_opacity(CODE_BLOCK_BACKGROUND_OPACITY)
}

pub fn code_block_padding() -> Edges {
    Edges::all(CODE_BLOCK_PADDING)
}
