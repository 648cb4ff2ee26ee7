//! Vertical and horizontal rule elements.
//!
//! A rule is drawn as a single border of `thickness` rather than a filled
//! box so it survives print engines that drop background colors.

use super::style::SerializableColor;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LineProps {
    pub thickness: f64,
    pub color: SerializableColor,
}

impl LineProps {
    pub const DEFAULT_THICKNESS: f64 = 2.0;
}

impl Default for LineProps {
    fn default() -> Self {
        Self {
            thickness: Self::DEFAULT_THICKNESS,
            color: SerializableColor::black(),
        }
    }
}
