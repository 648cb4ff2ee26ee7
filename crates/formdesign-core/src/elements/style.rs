//! Shared visual style records.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An RGBA color that serializes as a CSS color string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub const fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    pub const fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Parse `#rgb`, `#rrggbb`, `#rrggbbaa`, `transparent` and a few
    /// common color keywords.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        match value.to_ascii_lowercase().as_str() {
            "transparent" => return Some(Self::transparent()),
            "black" => return Some(Self::black()),
            "white" => return Some(Self::white()),
            "red" => return Some(Self::new(255, 0, 0, 255)),
            "green" => return Some(Self::new(0, 128, 0, 255)),
            "blue" => return Some(Self::new(0, 0, 255, 255)),
            "gray" | "grey" => return Some(Self::new(128, 128, 128, 255)),
            _ => {}
        }

        let hex = value.strip_prefix('#')?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let byte = |s: &str| u8::from_str_radix(s, 16).ok();
        match hex.len() {
            3 => {
                let r = byte(&hex[0..1])? * 17;
                let g = byte(&hex[1..2])? * 17;
                let b = byte(&hex[2..3])? * 17;
                Some(Self::new(r, g, b, 255))
            }
            6 => Some(Self::new(
                byte(&hex[0..2])?,
                byte(&hex[2..4])?,
                byte(&hex[4..6])?,
                255,
            )),
            8 => Some(Self::new(
                byte(&hex[0..2])?,
                byte(&hex[2..4])?,
                byte(&hex[4..6])?,
                byte(&hex[6..8])?,
            )),
            _ => None,
        }
    }

    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }

    /// CSS representation used in markup and in the persisted document.
    pub fn to_css(&self) -> String {
        match self.a {
            0 => "transparent".to_string(),
            255 => format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b),
            a => format!(
                "#{:02x}{:02x}{:02x}{:02x}",
                self.r, self.g, self.b, a
            ),
        }
    }
}

impl Default for SerializableColor {
    fn default() -> Self {
        Self::black()
    }
}

impl fmt::Display for SerializableColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

impl FromStr for SerializableColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("unrecognized color \"{s}\""))
    }
}

impl TryFrom<String> for SerializableColor {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SerializableColor> for String {
    fn from(color: SerializableColor) -> Self {
        color.to_css()
    }
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl TextAlign {
    pub fn as_css(self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

/// Font weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

impl FontWeight {
    pub fn as_css(self) -> &'static str {
        match self {
            FontWeight::Normal => "normal",
            FontWeight::Bold => "bold",
        }
    }
}

/// Side of the checkbox control the caption sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelPosition {
    Left,
    #[default]
    Right,
}

/// A single run of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextStyle {
    pub text: String,
    /// Font size in points.
    pub font_size: f64,
    pub color: SerializableColor,
    pub text_align: TextAlign,
    pub font_weight: FontWeight,
}

impl TextStyle {
    pub fn new(text: impl Into<String>, font_size: f64) -> Self {
        Self {
            text: text.into(),
            font_size,
            color: SerializableColor::black(),
            text_align: TextAlign::Left,
            font_weight: FontWeight::Normal,
        }
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::new("", 14.0)
    }
}

/// Background and border of a boxed element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BoxStyle {
    #[serde(alias = "fillColor")]
    pub background_color: SerializableColor,
    pub border_color: SerializableColor,
    pub border_width: f64,
}

impl BoxStyle {
    pub fn with_border_width(border_width: f64) -> Self {
        Self {
            border_width,
            ..Self::default()
        }
    }
}

impl Default for BoxStyle {
    fn default() -> Self {
        Self {
            background_color: SerializableColor::transparent(),
            border_color: SerializableColor::black(),
            border_width: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_forms() {
        assert_eq!(SerializableColor::parse("#000"), Some(SerializableColor::black()));
        assert_eq!(
            SerializableColor::parse("#34495e"),
            Some(SerializableColor::new(0x34, 0x49, 0x5e, 255))
        );
        assert_eq!(
            SerializableColor::parse("#ff000080"),
            Some(SerializableColor::new(255, 0, 0, 128))
        );
        assert_eq!(SerializableColor::parse("#12"), None);
        assert_eq!(SerializableColor::parse("#zzzzzz"), None);
        assert_eq!(SerializableColor::parse("rebeccapurple"), None);
    }

    #[test]
    fn test_css_output() {
        assert_eq!(SerializableColor::transparent().to_css(), "transparent");
        assert_eq!(SerializableColor::new(44, 62, 80, 255).to_css(), "#2c3e50");
        assert_eq!(SerializableColor::new(1, 2, 3, 4).to_css(), "#01020304");
    }

    #[test]
    fn test_color_serializes_as_string() {
        let json = serde_json::to_string(&SerializableColor::white()).unwrap();
        assert_eq!(json, "\"#ffffff\"");
        let parsed: SerializableColor = serde_json::from_str("\"transparent\"").unwrap();
        assert!(parsed.is_transparent());
        assert!(serde_json::from_str::<SerializableColor>("\"nope\"").is_err());
    }

    #[test]
    fn test_box_style_accepts_fill_color_alias() {
        let style: BoxStyle =
            serde_json::from_str(r##"{"fillColor":"#ff0000","borderColor":"#000","borderWidth":2}"##)
                .unwrap();
        assert_eq!(style.background_color, SerializableColor::new(255, 0, 0, 255));
        assert_eq!(style.border_width, 2.0);
    }
}
