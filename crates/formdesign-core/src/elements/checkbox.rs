//! Checkbox element: an inline control with a caption.

use super::style::{LabelPosition, SerializableColor, TextStyle};
use serde::{Deserialize, Serialize};

/// Checkbox properties. The stored width/height of a checkbox is advisory;
/// its real extent comes from measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckboxProps {
    #[serde(flatten)]
    pub text: TextStyle,
    pub checked: bool,
    pub label_position: LabelPosition,
    /// Space between the control and the caption, in page units.
    pub gap: f64,
}

impl CheckboxProps {
    pub const DEFAULT_TEXT: &'static str = "Check me";
    pub const DEFAULT_FONT_SIZE: f64 = 14.0;
    pub const DEFAULT_GAP: f64 = 8.0;
    /// Edge length of the control itself.
    pub const CONTROL_SIZE: f64 = 16.0;
}

impl Default for CheckboxProps {
    fn default() -> Self {
        let mut text = TextStyle::new(Self::DEFAULT_TEXT, Self::DEFAULT_FONT_SIZE);
        text.color = SerializableColor::new(0x2c, 0x3e, 0x50, 255);
        Self {
            text,
            checked: false,
            label_position: LabelPosition::Right,
            gap: Self::DEFAULT_GAP,
        }
    }
}
