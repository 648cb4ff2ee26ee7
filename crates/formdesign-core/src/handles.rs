//! Manipulation handles shown on selected elements.

use crate::elements::{Element, ElementKind};
use kurbo::{Point, Rect};

/// Handle size in screen pixels.
pub const HANDLE_SIZE: f64 = 8.0;
/// Handle hit tolerance in screen pixels.
pub const HANDLE_HIT_TOLERANCE: f64 = 6.0;

/// One of the eight directional resize handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeHandle {
    N,
    S,
    E,
    W,
    NE,
    NW,
    SE,
    SW,
}

impl ResizeHandle {
    pub const ALL: [ResizeHandle; 8] = [
        ResizeHandle::NW,
        ResizeHandle::N,
        ResizeHandle::NE,
        ResizeHandle::E,
        ResizeHandle::SE,
        ResizeHandle::S,
        ResizeHandle::SW,
        ResizeHandle::W,
    ];

    pub fn moves_left(self) -> bool {
        matches!(self, ResizeHandle::W | ResizeHandle::NW | ResizeHandle::SW)
    }

    pub fn moves_right(self) -> bool {
        matches!(self, ResizeHandle::E | ResizeHandle::NE | ResizeHandle::SE)
    }

    pub fn moves_top(self) -> bool {
        matches!(self, ResizeHandle::N | ResizeHandle::NE | ResizeHandle::NW)
    }

    pub fn moves_bottom(self) -> bool {
        matches!(self, ResizeHandle::S | ResizeHandle::SE | ResizeHandle::SW)
    }

    /// Lowercase compass name, used as a CSS class.
    pub fn name(self) -> &'static str {
        match self {
            ResizeHandle::N => "n",
            ResizeHandle::S => "s",
            ResizeHandle::E => "e",
            ResizeHandle::W => "w",
            ResizeHandle::NE => "ne",
            ResizeHandle::NW => "nw",
            ResizeHandle::SE => "se",
            ResizeHandle::SW => "sw",
        }
    }

    /// Where the handle sits on a rectangle.
    pub fn anchor(self, rect: Rect) -> Point {
        let x = if self.moves_left() {
            rect.x0
        } else if self.moves_right() {
            rect.x1
        } else {
            rect.center().x
        };
        let y = if self.moves_top() {
            rect.y0
        } else if self.moves_bottom() {
            rect.y1
        } else {
            rect.center().y
        };
        Point::new(x, y)
    }
}

/// What dragging a handle does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleKind {
    Resize(ResizeHandle),
    /// Border between table column `i` and `i + 1`.
    ColumnBoundary(usize),
}

/// A handle with its position in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    pub position: Point,
    pub kind: HandleKind,
}

impl Handle {
    pub fn new(position: Point, kind: HandleKind) -> Self {
        Self { position, kind }
    }

    /// Square hit test; `tolerance` is in page units.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        (point.x - self.position.x).abs() <= tolerance
            && (point.y - self.position.y).abs() <= tolerance
    }
}

/// Resize handles available for an element's kind.
pub fn resize_handles_for(element: &Element) -> &'static [ResizeHandle] {
    match element.kind {
        ElementKind::VLine(_) => &[ResizeHandle::N, ResizeHandle::S],
        ElementKind::HLine(_) | ElementKind::Table(_) => &[ResizeHandle::E, ResizeHandle::W],
        ElementKind::Checkbox(_) => &[],
        ElementKind::TextField(_)
        | ElementKind::Label(_)
        | ElementKind::Rectangle(_)
        | ElementKind::Signature(_) => &ResizeHandle::ALL,
    }
}

/// All handles of an element laid out on its bounds.
pub fn handles_for(element: &Element, bounds: Rect) -> Vec<Handle> {
    let mut handles: Vec<Handle> = resize_handles_for(element)
        .iter()
        .map(|&h| Handle::new(h.anchor(bounds), HandleKind::Resize(h)))
        .collect();

    if let ElementKind::Table(table) = &element.kind {
        let mut edge = bounds.x0;
        let y = bounds.center().y;
        for (i, width) in table
            .column_widths
            .iter()
            .take(table.columns.saturating_sub(1))
            .enumerate()
        {
            edge += bounds.width() * width / 100.0;
            handles.push(Handle::new(Point::new(edge, y), HandleKind::ColumnBoundary(i)));
        }
    }
    handles
}

/// First handle of the element hit by `point`.
pub fn hit_test_handles(element: &Element, bounds: Rect, point: Point, tolerance: f64) -> Option<HandleKind> {
    handles_for(element, bounds)
        .into_iter()
        .find(|h| h.hit_test(point, tolerance))
        .map(|h| h.kind)
}
