//! Bounds resolution for elements.
//!
//! Most element kinds store authoritative geometry. Auto-sized kinds
//! (checkboxes) only know their size once something has laid them out, so
//! their extent is obtained through a [`Measurer`] supplied by the host.

use crate::elements::{Element, ElementId};
use kurbo::{Point, Rect, Size};
use std::collections::HashMap;

/// Size assumed for an auto-sized element that has not been measured yet.
pub const FALLBACK_AUTO_SIZE: Size = Size::new(100.0, 30.0);

/// Source of laid-out sizes for auto-sized elements.
pub trait Measurer {
    /// Measured size of the element, or `None` if it has not been laid out.
    fn measure(&self, element: &Element) -> Option<Size>;
}

/// Measurer that never has a measurement; every auto-sized element falls
/// back to [`FALLBACK_AUTO_SIZE`].
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMeasurer;

impl Measurer for NoMeasurer {
    fn measure(&self, _element: &Element) -> Option<Size> {
        None
    }
}

/// Sizes reported back by a renderer after layout, keyed by element id.
#[derive(Debug, Clone, Default)]
pub struct MeasurementCache {
    sizes: HashMap<ElementId, Size>,
}

impl MeasurementCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, id: ElementId, size: Size) {
        self.sizes.insert(id, size);
    }

    pub fn forget(&mut self, id: &ElementId) {
        self.sizes.remove(id);
    }

    pub fn clear(&mut self) {
        self.sizes.clear();
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }
}

impl Measurer for MeasurementCache {
    fn measure(&self, element: &Element) -> Option<Size> {
        self.sizes.get(&element.id).copied()
    }
}

fn usable(size: Size) -> bool {
    size.width.is_finite() && size.height.is_finite() && size.width > 0.0 && size.height > 0.0
}

/// Effective on-canvas rectangle of an element.
pub fn bounds(element: &Element, measurer: &dyn Measurer) -> Rect {
    if element.is_auto_sized() {
        let size = measurer
            .measure(element)
            .filter(|s| usable(*s))
            .unwrap_or(FALLBACK_AUTO_SIZE);
        Rect::from_origin_size(element.origin(), size)
    } else {
        element.rect()
    }
}

/// Strict axis-aligned overlap: touching edges do not intersect.
pub fn rects_intersect(a: Rect, b: Rect) -> bool {
    a.x0 < b.x1 && a.x1 > b.x0 && a.y0 < b.y1 && a.y1 > b.y0
}

/// Clamp an origin so a box of `size` stays inside `canvas`.
///
/// A box larger than the canvas is pinned to the top-left corner.
pub fn clamp_origin(origin: Point, size: Size, canvas: Size) -> Point {
    let max_x = (canvas.width - size.width).max(0.0);
    let max_y = (canvas.height - size.height).max(0.0);
    Point::new(origin.x.clamp(0.0, max_x), origin.y.clamp(0.0, max_y))
}

pub fn is_finite_rect(rect: Rect) -> bool {
    rect.x0.is_finite() && rect.y0.is_finite() && rect.x1.is_finite() && rect.y1.is_finite()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::ElementType;

    struct FixedMeasurer(Size);

    impl Measurer for FixedMeasurer {
        fn measure(&self, _element: &Element) -> Option<Size> {
            Some(self.0)
        }
    }

    fn element(element_type: ElementType) -> Element {
        Element::new(ElementId::from_counter(1), element_type, Point::new(5.0, 6.0))
    }

    #[test]
    fn test_stored_geometry_for_regular_kinds() {
        let rect = element(ElementType::Rectangle);
        let measured = bounds(&rect, &FixedMeasurer(Size::new(1.0, 1.0)));
        assert_eq!(measured, Rect::new(5.0, 6.0, 155.0, 106.0));
    }

    #[test]
    fn test_checkbox_fallback_size() {
        let checkbox = element(ElementType::Checkbox);
        assert_eq!(bounds(&checkbox, &NoMeasurer), Rect::new(5.0, 6.0, 105.0, 36.0));
        // Degenerate measurements are ignored.
        let zero = FixedMeasurer(Size::new(0.0, 0.0));
        assert_eq!(bounds(&checkbox, &zero).size(), FALLBACK_AUTO_SIZE);
    }

    #[test]
    fn test_checkbox_uses_measurement() {
        let checkbox = element(ElementType::Checkbox);
        let mut cache = MeasurementCache::new();
        cache.record(checkbox.id.clone(), Size::new(130.0, 22.0));
        assert_eq!(bounds(&checkbox, &cache).size(), Size::new(130.0, 22.0));
        cache.forget(&checkbox.id);
        assert!(cache.is_empty());
        assert_eq!(bounds(&checkbox, &cache).size(), FALLBACK_AUTO_SIZE);
    }

    #[test]
    fn test_rects_intersect_is_strict() {
        let a = Rect::new(0.0, 0.0, 50.0, 50.0);
        assert!(rects_intersect(a, Rect::new(49.0, 49.0, 60.0, 60.0)));
        assert!(!rects_intersect(a, Rect::new(50.0, 0.0, 60.0, 50.0)));
        assert!(!rects_intersect(a, Rect::new(200.0, 200.0, 250.0, 250.0)));
    }

    #[test]
    fn test_clamp_origin() {
        let canvas = Size::new(100.0, 100.0);
        let size = Size::new(20.0, 20.0);
        assert_eq!(clamp_origin(Point::new(-5.0, 50.0), size, canvas), Point::new(0.0, 50.0));
        assert_eq!(clamp_origin(Point::new(95.0, 90.0), size, canvas), Point::new(80.0, 80.0));
        assert_eq!(
            clamp_origin(Point::new(10.0, 10.0), Size::new(300.0, 300.0), canvas),
            Point::ZERO
        );
    }
}
