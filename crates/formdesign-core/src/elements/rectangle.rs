//! Rectangle element: border and fill, no content.

use super::style::BoxStyle;
use serde::{Deserialize, Serialize};

/// A plain bordered box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RectangleProps {
    #[serde(flatten)]
    pub box_style: BoxStyle,
}

impl RectangleProps {
    pub const DEFAULT_BORDER_WIDTH: f64 = 2.0;
}

impl Default for RectangleProps {
    fn default() -> Self {
        Self {
            box_style: BoxStyle::with_border_width(Self::DEFAULT_BORDER_WIDTH),
        }
    }
}
