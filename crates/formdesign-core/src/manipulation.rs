//! Pointer gestures and group layout operations.
//!
//! Every gesture follows the same lifecycle: `begin` captures the starting
//! elements, `update` recomputes a preview from those originals and the
//! pointer position, and the owner commits the preview when the gesture
//! ends. The document itself is never touched mid-gesture, so cancelling
//! is just dropping the gesture.
//!
//! All points are in page coordinates; callers convert pointer positions
//! through the current [`crate::view::View`] first.

use crate::document::{Constraints, constrain_element};
use crate::elements::{Element, ElementId, ElementKind};
use crate::geometry::{bounds, clamp_origin, is_finite_rect};
use crate::handles::ResizeHandle;
use crate::snap::Grid;
use kurbo::{Point, Rect, Size, Vec2};
use std::fmt;

/// Kinds of pointer gesture. At most one of each may be active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureKind {
    Drag,
    Resize,
    Marquee,
    ColumnResize,
}

impl fmt::Display for GestureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GestureKind::Drag => "drag",
            GestureKind::Resize => "resize",
            GestureKind::Marquee => "marquee",
            GestureKind::ColumnResize => "column resize",
        })
    }
}

/// Everything a gesture update needs to know about the page.
#[derive(Clone, Copy)]
pub struct GestureContext<'a> {
    pub canvas: Size,
    pub grid: Grid,
    pub constraints: Constraints<'a>,
}

/// Moving one or more elements together.
#[derive(Debug, Clone)]
pub struct DragGesture {
    pub start: Point,
    pub current: Point,
    originals: Vec<Element>,
    preview: Vec<Element>,
}

impl DragGesture {
    pub fn begin(elements: Vec<Element>, start: Point) -> Self {
        Self {
            start,
            current: start,
            preview: elements.clone(),
            originals: elements,
        }
    }

    pub fn delta(&self) -> Vec2 {
        self.current - self.start
    }

    pub fn ids(&self) -> Vec<ElementId> {
        self.originals.iter().map(|e| e.id.clone()).collect()
    }

    pub fn preview(&self) -> &[Element] {
        &self.preview
    }

    pub fn into_preview(self) -> Vec<Element> {
        self.preview
    }

    /// Recompute positions for a new pointer location.
    ///
    /// The resulting position (start + delta) is snapped, not the delta,
    /// and each element is clamped on its own bounds.
    pub fn update(&mut self, point: Point, ctx: &GestureContext<'_>) {
        let delta = point - self.start;
        if !delta.x.is_finite() || !delta.y.is_finite() {
            return;
        }
        self.current = point;
        let mut moved = Vec::with_capacity(self.originals.len());
        for original in &self.originals {
            let target = ctx.grid.snap_point(original.origin() + delta).point;
            let extent = bounds(original, ctx.constraints.measurer).size();
            let origin = clamp_origin(target, extent, ctx.canvas);
            let mut element = original.clone();
            element.x = origin.x;
            element.y = origin.y;
            moved.push(element);
        }
        self.preview = moved;
    }

    pub fn has_moved(&self) -> bool {
        self.preview
            .iter()
            .zip(&self.originals)
            .any(|(p, o)| p.x != o.x || p.y != o.y)
    }
}

/// Resizing a single element from one of its eight handles.
#[derive(Debug, Clone)]
pub struct ResizeGesture {
    pub handle: ResizeHandle,
    pub start: Point,
    pub current: Point,
    original: Element,
    preview: Element,
}

impl ResizeGesture {
    pub fn begin(element: Element, handle: ResizeHandle, start: Point) -> Self {
        Self {
            handle,
            start,
            current: start,
            preview: element.clone(),
            original: element,
        }
    }

    pub fn id(&self) -> &ElementId {
        &self.original.id
    }

    pub fn preview(&self) -> &Element {
        &self.preview
    }

    pub fn into_preview(self) -> Element {
        self.preview
    }

    pub fn has_changed(&self) -> bool {
        self.preview != self.original
    }

    /// Recompute the element rectangle for a new pointer location.
    ///
    /// Only the edges named by the handle move; the opposite edges stay
    /// anchored. A moving edge that would make the element smaller than the
    /// minimum is pushed back rather than dragging the anchor along. Results
    /// that are not finite keep the previous preview.
    pub fn update(&mut self, point: Point, ctx: &GestureContext<'_>) {
        let delta = point - self.start;
        let handle = self.handle;
        let min = ctx.constraints.min_size;
        let rect = self.original.rect();
        let (mut left, mut top, mut right, mut bottom) = (rect.x0, rect.y0, rect.x1, rect.y1);

        if handle.moves_left() {
            left = ctx.grid.snap(left + delta.x).max(0.0);
            if right - left < min {
                left = right - min;
            }
        }
        if handle.moves_right() {
            right = ctx.grid.snap(right + delta.x).min(ctx.canvas.width);
            if right - left < min {
                right = left + min;
            }
        }
        if handle.moves_top() {
            top = ctx.grid.snap(top + delta.y).max(0.0);
            if bottom - top < min {
                top = bottom - min;
            }
        }
        if handle.moves_bottom() {
            bottom = ctx.grid.snap(bottom + delta.y).min(ctx.canvas.height);
            if bottom - top < min {
                bottom = top + min;
            }
        }

        let resized = Rect::new(left, top, right, bottom);
        if !is_finite_rect(resized) {
            return;
        }
        self.current = point;
        let mut element = self.original.clone();
        element.x = resized.x0;
        element.y = resized.y0;
        element.width = resized.width();
        element.height = resized.height();
        constrain_element(&mut element, ctx.canvas, &ctx.constraints);
        self.preview = element;
    }
}

/// Dragging the border between two adjacent table columns.
#[derive(Debug, Clone)]
pub struct ColumnResizeGesture {
    pub boundary: usize,
    pub start: Point,
    pub current: Point,
    original: Element,
    preview: Element,
}

impl ColumnResizeGesture {
    /// Returns `None` unless the element is a table with a column to the
    /// right of `boundary`.
    pub fn begin(element: Element, boundary: usize, start: Point) -> Option<Self> {
        let table = element.kind.as_table()?;
        if boundary + 1 >= table.columns {
            return None;
        }
        Some(Self {
            boundary,
            start,
            current: start,
            preview: element.clone(),
            original: element,
        })
    }

    pub fn id(&self) -> &ElementId {
        &self.original.id
    }

    pub fn preview(&self) -> &Element {
        &self.preview
    }

    pub fn into_preview(self) -> Element {
        self.preview
    }

    pub fn has_changed(&self) -> bool {
        self.preview != self.original
    }

    /// Convert horizontal pointer travel into a percentage of the table
    /// width and move the boundary by that much, starting from the original
    /// widths each time.
    pub fn update(&mut self, point: Point, ctx: &GestureContext<'_>) {
        let width = self.original.width;
        let delta_px = point.x - self.start.x;
        if width <= 0.0 || !delta_px.is_finite() {
            return;
        }
        self.current = point;
        let delta_percent = delta_px / width * 100.0;
        let mut element = self.original.clone();
        if let ElementKind::Table(table) = &mut element.kind {
            table.resize_boundary(
                self.boundary,
                delta_percent,
                ctx.constraints.column_limits.min,
            );
        }
        self.preview = element;
    }
}

/// Rubber-band selection rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarqueeGesture {
    pub start: Point,
    pub current: Point,
}

impl MarqueeGesture {
    pub fn begin(start: Point) -> Self {
        Self {
            start,
            current: start,
        }
    }

    pub fn update(&mut self, point: Point) {
        if point.x.is_finite() && point.y.is_finite() {
            self.current = point;
        }
    }

    /// Normalized rectangle regardless of drag direction.
    pub fn rect(&self) -> Rect {
        Rect::from_points(self.start, self.current)
    }
}

/// Group alignment targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Right,
    /// Horizontal centers.
    Center,
    Top,
    Bottom,
    /// Vertical centers.
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistributeAxis {
    Horizontal,
    Vertical,
}

/// New origins that align every item. Needs at least two items.
pub fn align(items: &[(ElementId, Rect)], alignment: Alignment) -> Vec<(ElementId, Point)> {
    if items.len() < 2 {
        return Vec::new();
    }
    let count = items.len() as f64;
    let fold = |init: f64, f: fn(f64, f64) -> f64, get: fn(&Rect) -> f64| {
        items.iter().map(|(_, r)| get(r)).fold(init, f)
    };

    items
        .iter()
        .map(|(id, r)| {
            let origin = match alignment {
                Alignment::Left => Point::new(fold(f64::INFINITY, f64::min, |r| r.x0), r.y0),
                Alignment::Right => {
                    Point::new(fold(f64::NEG_INFINITY, f64::max, |r| r.x1) - r.width(), r.y0)
                }
                Alignment::Center => {
                    let center = fold(0.0, |a, b| a + b, |r| r.center().x) / count;
                    Point::new(center - r.width() / 2.0, r.y0)
                }
                Alignment::Top => Point::new(r.x0, fold(f64::INFINITY, f64::min, |r| r.y0)),
                Alignment::Bottom => {
                    Point::new(r.x0, fold(f64::NEG_INFINITY, f64::max, |r| r.y1) - r.height())
                }
                Alignment::Middle => {
                    let middle = fold(0.0, |a, b| a + b, |r| r.center().y) / count;
                    Point::new(r.x0, middle - r.height() / 2.0)
                }
            };
            (id.clone(), origin)
        })
        .collect()
}

/// New origins that space items evenly along an axis, keeping the first
/// and last in place. Needs at least three items.
pub fn distribute(items: &[(ElementId, Rect)], axis: DistributeAxis) -> Vec<(ElementId, Point)> {
    if items.len() < 3 {
        return Vec::new();
    }
    let start_of = |r: &Rect| match axis {
        DistributeAxis::Horizontal => r.x0,
        DistributeAxis::Vertical => r.y0,
    };
    let size_of = |r: &Rect| match axis {
        DistributeAxis::Horizontal => r.width(),
        DistributeAxis::Vertical => r.height(),
    };

    let mut sorted: Vec<&(ElementId, Rect)> = items.iter().collect();
    sorted.sort_by(|a, b| start_of(&a.1).total_cmp(&start_of(&b.1)));

    let start = sorted.iter().map(|(_, r)| start_of(r)).fold(f64::INFINITY, f64::min);
    let end = sorted
        .iter()
        .map(|(_, r)| start_of(r) + size_of(r))
        .fold(f64::NEG_INFINITY, f64::max);
    let total: f64 = sorted.iter().map(|(_, r)| size_of(r)).sum();
    let gap = (end - start - total) / (sorted.len() - 1) as f64;

    let mut cursor = start;
    sorted
        .into_iter()
        .map(|(id, r)| {
            let origin = match axis {
                DistributeAxis::Horizontal => Point::new(cursor, r.y0),
                DistributeAxis::Vertical => Point::new(r.x0, cursor),
            };
            cursor += size_of(r) + gap;
            (id.clone(), origin)
        })
        .collect()
}

/// Active gestures, one slot per kind.
#[derive(Debug, Clone, Default)]
pub struct Gestures {
    pub drag: Option<DragGesture>,
    pub resize: Option<ResizeGesture>,
    pub marquee: Option<MarqueeGesture>,
    pub column_resize: Option<ColumnResizeGesture>,
}

impl Gestures {
    pub fn is_active(&self, kind: GestureKind) -> bool {
        match kind {
            GestureKind::Drag => self.drag.is_some(),
            GestureKind::Resize => self.resize.is_some(),
            GestureKind::Marquee => self.marquee.is_some(),
            GestureKind::ColumnResize => self.column_resize.is_some(),
        }
    }

    pub fn any_active(&self) -> bool {
        self.active().is_some()
    }

    pub fn active(&self) -> Option<GestureKind> {
        [
            GestureKind::Drag,
            GestureKind::Resize,
            GestureKind::ColumnResize,
            GestureKind::Marquee,
        ]
        .into_iter()
        .find(|k| self.is_active(*k))
    }

    /// Preview copies of elements being changed by a geometry gesture.
    pub fn previews(&self) -> Vec<&Element> {
        let mut previews: Vec<&Element> = Vec::new();
        if let Some(drag) = &self.drag {
            previews.extend(drag.preview());
        }
        if let Some(resize) = &self.resize {
            previews.push(resize.preview());
        }
        if let Some(column) = &self.column_resize {
            previews.push(column.preview());
        }
        previews
    }

    /// Drop every active gesture.
    pub fn cancel_all(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::ElementType;
    use crate::geometry::NoMeasurer;

    fn ctx(snap: bool) -> GestureContext<'static> {
        GestureContext {
            canvas: Size::new(794.0, 1123.0),
            grid: Grid {
                size: 10.0,
                snap_enabled: snap,
                visible: false,
            },
            constraints: Constraints::new(&NoMeasurer),
        }
    }

    fn element(n: u64, element_type: ElementType, x: f64, y: f64) -> Element {
        Element::new(ElementId::from_counter(n), element_type, Point::new(x, y))
    }

    #[test]
    fn test_drag_without_snap() {
        let field = element(1, ElementType::TextField, 50.0, 50.0);
        let mut drag = DragGesture::begin(vec![field], Point::new(100.0, 100.0));
        drag.update(Point::new(130.0, 90.0), &ctx(false));
        assert_eq!(drag.preview()[0].origin(), Point::new(80.0, 40.0));
        assert!(drag.has_moved());
    }

    #[test]
    fn test_drag_snaps_result_not_delta() {
        let field = element(1, ElementType::TextField, 50.0, 50.0);
        let mut drag = DragGesture::begin(vec![field], Point::new(0.0, 0.0));
        drag.update(Point::new(30.0, -10.0), &ctx(true));
        assert_eq!(drag.preview()[0].origin(), Point::new(80.0, 40.0));
        drag.update(Point::new(33.0, -9.0), &ctx(true));
        assert_eq!(drag.preview()[0].origin(), Point::new(80.0, 40.0));
    }

    #[test]
    fn test_drag_clamps_each_element_independently() {
        let a = element(1, ElementType::Rectangle, 0.0, 0.0);
        let b = element(2, ElementType::Rectangle, 600.0, 0.0);
        let mut drag = DragGesture::begin(vec![a, b], Point::ZERO);
        drag.update(Point::new(100.0, -50.0), &ctx(false));
        let preview = drag.preview();
        assert_eq!(preview[0].origin(), Point::new(100.0, 0.0));
        assert_eq!(preview[1].origin(), Point::new(794.0 - 150.0, 0.0));
    }

    #[test]
    fn test_drag_checkbox_clamped_on_fallback_bounds() {
        let checkbox = element(1, ElementType::Checkbox, 0.0, 0.0);
        let mut drag = DragGesture::begin(vec![checkbox], Point::ZERO);
        drag.update(Point::new(5000.0, 5000.0), &ctx(false));
        assert_eq!(drag.preview()[0].origin(), Point::new(794.0 - 100.0, 1123.0 - 30.0));
    }

    #[test]
    fn test_resize_se() {
        let rect = element(1, ElementType::Rectangle, 100.0, 100.0);
        let mut resize = ResizeGesture::begin(rect, ResizeHandle::SE, Point::ZERO);
        resize.update(Point::new(50.0, 20.0), &ctx(false));
        let r = resize.preview().rect();
        assert_eq!(r, Rect::new(100.0, 100.0, 300.0, 220.0));
    }

    #[test]
    fn test_resize_nw_keeps_opposite_corner() {
        let rect = element(1, ElementType::Rectangle, 100.0, 100.0);
        let mut resize = ResizeGesture::begin(rect, ResizeHandle::NW, Point::ZERO);
        resize.update(Point::new(30.0, 40.0), &ctx(false));
        assert_eq!(resize.preview().rect(), Rect::new(130.0, 140.0, 250.0, 200.0));

        // Past the minimum the edge stops at anchor - min.
        resize.update(Point::new(500.0, 500.0), &ctx(false));
        assert_eq!(resize.preview().rect(), Rect::new(230.0, 180.0, 250.0, 200.0));
    }

    #[test]
    fn test_resize_clamped_to_canvas() {
        let rect = element(1, ElementType::Rectangle, 700.0, 10.0);
        let mut resize = ResizeGesture::begin(rect, ResizeHandle::E, Point::ZERO);
        resize.update(Point::new(500.0, 0.0), &ctx(false));
        assert_eq!(resize.preview().rect(), Rect::new(700.0, 10.0, 794.0, 110.0));

        let rect = element(1, ElementType::Rectangle, 10.0, 10.0);
        let mut resize = ResizeGesture::begin(rect, ResizeHandle::W, Point::ZERO);
        resize.update(Point::new(-100.0, 0.0), &ctx(false));
        assert_eq!(resize.preview().rect(), Rect::new(0.0, 10.0, 160.0, 110.0));
    }

    #[test]
    fn test_resize_snaps_moving_edge() {
        let rect = element(1, ElementType::Rectangle, 100.0, 100.0);
        let mut resize = ResizeGesture::begin(rect, ResizeHandle::S, Point::ZERO);
        resize.update(Point::new(0.0, 17.0), &ctx(true));
        assert_eq!(resize.preview().rect(), Rect::new(100.0, 100.0, 250.0, 220.0));
    }

    #[test]
    fn test_resize_nan_keeps_last_valid() {
        let rect = element(1, ElementType::Rectangle, 100.0, 100.0);
        let mut resize = ResizeGesture::begin(rect, ResizeHandle::SE, Point::ZERO);
        resize.update(Point::new(10.0, 10.0), &ctx(false));
        let good = resize.preview().clone();
        resize.update(Point::new(f64::NAN, 10.0), &ctx(false));
        assert_eq!(resize.preview(), &good);
    }

    #[test]
    fn test_column_resize() {
        let mut table = element(1, ElementType::Table, 0.0, 0.0);
        if let ElementKind::Table(t) = &mut table.kind {
            t.column_widths = vec![40.0, 30.0, 30.0];
        }
        let mut gesture = ColumnResizeGesture::begin(table, 0, Point::new(120.0, 10.0)).unwrap();
        // 300px wide table: 30px is 10%.
        gesture.update(Point::new(150.0, 10.0), &ctx(false));
        let widths = &gesture.preview().kind.as_table().unwrap().column_widths;
        assert!((widths[0] - 50.0).abs() < 1e-9);
        assert!((widths[1] - 20.0).abs() < 1e-9);
        assert!((widths[2] - 30.0).abs() < 1e-9);

        // Updates are relative to the original widths, not cumulative.
        gesture.update(Point::new(135.0, 10.0), &ctx(false));
        let widths = &gesture.preview().kind.as_table().unwrap().column_widths;
        assert!((widths[0] - 45.0).abs() < 1e-9);
    }

    #[test]
    fn test_column_resize_requires_table() {
        let rect = element(1, ElementType::Rectangle, 0.0, 0.0);
        assert!(ColumnResizeGesture::begin(rect, 0, Point::ZERO).is_none());
        let table = element(2, ElementType::Table, 0.0, 0.0);
        assert!(ColumnResizeGesture::begin(table, 2, Point::ZERO).is_none());
    }

    #[test]
    fn test_marquee_rect_any_direction() {
        let mut marquee = MarqueeGesture::begin(Point::new(120.0, 60.0));
        marquee.update(Point::new(0.0, 0.0));
        assert_eq!(marquee.rect(), Rect::new(0.0, 0.0, 120.0, 60.0));
    }

    fn items(rects: &[Rect]) -> Vec<(ElementId, Rect)> {
        rects
            .iter()
            .enumerate()
            .map(|(i, r)| (ElementId::from_counter(i as u64 + 1), *r))
            .collect()
    }

    #[test]
    fn test_align_left_and_right() {
        let group = items(&[Rect::new(10.0, 0.0, 60.0, 20.0), Rect::new(40.0, 30.0, 140.0, 50.0)]);
        let left = align(&group, Alignment::Left);
        assert_eq!(left[0].1, Point::new(10.0, 0.0));
        assert_eq!(left[1].1, Point::new(10.0, 30.0));

        let right = align(&group, Alignment::Right);
        assert_eq!(right[0].1, Point::new(90.0, 0.0));
        assert_eq!(right[1].1, Point::new(40.0, 30.0));
    }

    #[test]
    fn test_align_center_uses_average_center() {
        let group = items(&[Rect::new(0.0, 0.0, 20.0, 10.0), Rect::new(100.0, 0.0, 140.0, 10.0)]);
        let centered = align(&group, Alignment::Center);
        // Centers are 10 and 120, average 65.
        assert_eq!(centered[0].1.x, 55.0);
        assert_eq!(centered[1].1.x, 45.0);
    }

    #[test]
    fn test_align_needs_two() {
        let single = items(&[Rect::new(0.0, 0.0, 20.0, 10.0)]);
        assert!(align(&single, Alignment::Top).is_empty());
    }

    #[test]
    fn test_distribute_horizontal() {
        let group = items(&[
            Rect::new(0.0, 0.0, 10.0, 10.0),
            Rect::new(200.0, 0.0, 220.0, 10.0),
            Rect::new(30.0, 0.0, 60.0, 10.0),
        ]);
        let spaced = distribute(&group, DistributeAxis::Horizontal);
        // span 220, sizes 60, gap 80.
        let x_of = |n: u64| {
            spaced
                .iter()
                .find(|(id, _)| *id == ElementId::from_counter(n))
                .map(|(_, p)| p.x)
        };
        assert_eq!(x_of(1), Some(0.0));
        assert_eq!(x_of(3), Some(90.0));
        assert_eq!(x_of(2), Some(200.0));
    }

    #[test]
    fn test_distribute_needs_three() {
        let pair = items(&[Rect::new(0.0, 0.0, 10.0, 10.0), Rect::new(50.0, 0.0, 60.0, 10.0)]);
        assert!(distribute(&pair, DistributeAxis::Vertical).is_empty());
    }

    #[test]
    fn test_gesture_slots() {
        let mut gestures = Gestures::default();
        assert!(!gestures.any_active());
        gestures.marquee = Some(MarqueeGesture::begin(Point::ZERO));
        assert_eq!(gestures.active(), Some(GestureKind::Marquee));
        gestures.cancel_all();
        assert!(!gestures.is_active(GestureKind::Marquee));
    }
}
