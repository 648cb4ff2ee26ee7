//! Signature box element.

use super::style::{BoxStyle, TextAlign, TextStyle};
use serde::{Deserialize, Serialize};

/// Dashed box with a centered caption.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SignatureProps {
    #[serde(flatten)]
    pub text: TextStyle,
    #[serde(flatten)]
    pub box_style: BoxStyle,
}

impl SignatureProps {
    pub const DEFAULT_TEXT: &'static str = "Signature";

    /// Top padding that vertically offsets the caption inside a box of
    /// the given height.
    pub fn caption_padding(height: f64) -> f64 {
        (height / 3.0).floor().max(10.0)
    }
}

impl Default for SignatureProps {
    fn default() -> Self {
        let mut text = TextStyle::new(Self::DEFAULT_TEXT, 14.0);
        text.text_align = TextAlign::Center;
        Self {
            text,
            box_style: BoxStyle::default(),
        }
    }
}
