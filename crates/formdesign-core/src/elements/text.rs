//! Text field and label elements.

use super::style::{BoxStyle, TextStyle};
use serde::{Deserialize, Serialize};

/// A fillable single-line text field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextFieldProps {
    #[serde(flatten)]
    pub text: TextStyle,
    #[serde(flatten)]
    pub box_style: BoxStyle,
    pub placeholder: String,
}

impl TextFieldProps {
    pub const DEFAULT_TEXT: &'static str = "Text Field";
    pub const DEFAULT_FONT_SIZE: f64 = 9.0;
}

impl Default for TextFieldProps {
    fn default() -> Self {
        Self {
            text: TextStyle::new(Self::DEFAULT_TEXT, Self::DEFAULT_FONT_SIZE),
            box_style: BoxStyle::default(),
            placeholder: String::new(),
        }
    }
}

/// Static caption text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LabelProps {
    #[serde(flatten)]
    pub text: TextStyle,
    #[serde(flatten)]
    pub box_style: BoxStyle,
}

impl LabelProps {
    pub const DEFAULT_TEXT: &'static str = "Label Text";
    pub const DEFAULT_FONT_SIZE: f64 = 9.0;
}

impl Default for LabelProps {
    fn default() -> Self {
        Self {
            text: TextStyle::new(Self::DEFAULT_TEXT, Self::DEFAULT_FONT_SIZE),
            box_style: BoxStyle::default(),
        }
    }
}
