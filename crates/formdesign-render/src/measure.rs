//! Size estimates for auto-sized elements when no layout engine is around.

use formdesign_core::elements::CheckboxProps;
use formdesign_core::{Element, ElementKind, Measurer};
use kurbo::Size;

/// CSS pixels per typographic point.
const PX_PER_PT: f64 = 96.0 / 72.0;
/// Average glyph advance as a fraction of the font size.
const AVERAGE_ADVANCE: f64 = 0.55;
const LINE_HEIGHT: f64 = 1.4;

/// Estimates checkbox extents from caption length and font size.
///
/// Useful for headless use (export, tests) where nothing reports real
/// layout sizes back.
#[derive(Debug, Clone, Copy, Default)]
pub struct EstimatingMeasurer;

impl Measurer for EstimatingMeasurer {
    fn measure(&self, element: &Element) -> Option<Size> {
        let ElementKind::Checkbox(props) = &element.kind else {
            return None;
        };
        let font_px = props.text.font_size * PX_PER_PT;
        let caption = props.text.text.chars().count() as f64 * font_px * AVERAGE_ADVANCE;
        let width = CheckboxProps::CONTROL_SIZE + props.gap + caption;
        let height = (font_px * LINE_HEIGHT).max(CheckboxProps::CONTROL_SIZE + 2.0);
        Some(Size::new(width.ceil(), height.ceil()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formdesign_core::{ElementId, ElementType};
    use kurbo::Point;

    #[test]
    fn test_only_checkboxes_are_measured() {
        let label = Element::new(ElementId::from_counter(1), ElementType::Label, Point::ZERO);
        assert_eq!(EstimatingMeasurer.measure(&label), None);
    }

    #[test]
    fn test_longer_caption_is_wider() {
        let mut checkbox = Element::new(ElementId::from_counter(1), ElementType::Checkbox, Point::ZERO);
        let short = EstimatingMeasurer.measure(&checkbox).unwrap();
        if let ElementKind::Checkbox(props) = &mut checkbox.kind {
            props.text.text = "I accept the terms and conditions".into();
        }
        let long = EstimatingMeasurer.measure(&checkbox).unwrap();
        assert!(long.width > short.width);
        assert_eq!(long.height, short.height);
        assert!(short.height >= CheckboxProps::CONTROL_SIZE);
    }
}
