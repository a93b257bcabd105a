use serde::{Deserialize, Deserializer};
use std::fmt;
use std::str::FromStr;

/// Straight (non-premultiplied) RGBA color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const ORANGE: Color = Color::rgb(255, 165, 0);
    pub const GRAY: Color = Color::rgb(128, 128, 128);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color { r, g, b, a }
    }

    /// Same color with alpha scaled to `opacity` (clamped to 0..=1).
    pub fn with_opacity(self, opacity: f32) -> Self {
        let opacity = opacity.clamp(0.0, 1.0);
        Color {
            a: (f32::from(self.a) * opacity).round() as u8,
            ..self
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.a != 255 {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

/// Accepts `#rgb`, `#rrggbb`, `#rrggbbaa` and a small set of color keywords.
pub fn parse_color(value: &str) -> Option<Color> {
    let s = value.trim().to_ascii_lowercase();
    if let Some(hex) = s.strip_prefix('#') {
        if !hex.is_ascii() {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
        return match hex.len() {
            3 => {
                let short = |i: usize| channel(i..i + 1).map(|v| v * 17);
                Some(Color::rgb(short(0)?, short(1)?, short(2)?))
            }
            6 => Some(Color::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            8 => Some(Color::rgba(
                channel(0..2)?,
                channel(2..4)?,
                channel(4..6)?,
                channel(6..8)?,
            )),
            _ => None,
        };
    }

    let named = match s.as_str() {
        "black" => Color::BLACK,
        "blue" => Color::BLUE,
        "cyan" => Color::rgb(0, 255, 255),
        "gray" | "grey" => Color::GRAY,
        "green" => Color::rgb(0, 128, 0),
        "magenta" => Color::rgb(255, 0, 255),
        "maroon" => Color::rgb(128, 0, 0),
        "navy" => Color::rgb(0, 0, 128),
        "olive" => Color::rgb(128, 128, 0),
        "orange" => Color::ORANGE,
        "purple" => Color::rgb(128, 0, 128),
        "red" => Color::rgb(255, 0, 0),
        "silver" => Color::rgb(192, 192, 192),
        "teal" => Color::rgb(0, 128, 128),
        "white" => Color::WHITE,
        "yellow" => Color::rgb(255, 255, 0),
        "transparent" => Color::TRANSPARENT,
        _ => return None,
    };
    Some(named)
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_color(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("unrecognized color `{raw}`")))
    }
}

/// Insets around a block, in points.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Edges {
    pub top: f32,
    pub leading: f32,
    pub bottom: f32,
    pub trailing: f32,
}

impl Edges {
    pub const ZERO: Edges = Edges::all(0.0);

    pub const fn all(v: f32) -> Self {
        Edges {
            top: v,
            leading: v,
            bottom: v,
            trailing: v,
        }
    }

    pub const fn leading(v: f32) -> Self {
        Edges {
            top: 0.0,
            leading: v,
            bottom: 0.0,
            trailing: 0.0,
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Edges::ZERO
    }
}

/// Semantic text style, sized by the host platform.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontRole {
    LargeTitle,
    Title,
    Title2,
    Title3,
    Headline,
    Subheadline,
    #[default]
    Body,
    Callout,
    Footnote,
    Caption,
    Caption2,
}

impl FontRole {
    pub fn as_str(self) -> &'static str {
        match self {
            FontRole::LargeTitle => "large-title",
            FontRole::Title => "title",
            FontRole::Title2 => "title2",
            FontRole::Title3 => "title3",
            FontRole::Headline => "headline",
            FontRole::Subheadline => "subheadline",
            FontRole::Body => "body",
            FontRole::Callout => "callout",
            FontRole::Footnote => "footnote",
            FontRole::Caption => "caption",
            FontRole::Caption2 => "caption2",
        }
    }
}

impl FromStr for FontRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let role = match s.trim().to_ascii_lowercase().as_str() {
            "large-title" => FontRole::LargeTitle,
            "title" => FontRole::Title,
            "title2" => FontRole::Title2,
            "title3" => FontRole::Title3,
            "headline" => FontRole::Headline,
            "subheadline" => FontRole::Subheadline,
            "body" => FontRole::Body,
            "callout" => FontRole::Callout,
            "footnote" => FontRole::Footnote,
            "caption" => FontRole::Caption,
            "caption2" => FontRole::Caption2,
            other => return Err(format!("unknown font role `{other}`")),
        };
        Ok(role)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Font {
    pub role: FontRole,
    /// Explicit point size; `None` keeps the role's platform size.
    pub size: Option<f32>,
    pub monospaced: bool,
    pub bold: bool,
    pub italic: bool,
}

impl Font {
    pub const fn role(role: FontRole) -> Self {
        Font {
            role,
            size: None,
            monospaced: false,
            bold: false,
            italic: false,
        }
    }

    pub const fn monospaced(self) -> Self {
        Font {
            monospaced: true,
            ..self
        }
    }

    pub const fn bold(self) -> Self {
        Font { bold: true, ..self }
    }
}
