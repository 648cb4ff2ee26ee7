//! Grid snapping.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Default grid spacing in page units.
pub const GRID_SIZE: f64 = 10.0;

/// Result of a snap operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapResult {
    /// The snapped point.
    pub point: Point,
    /// Whether snapping changed anything.
    pub snapped: bool,
}

impl SnapResult {
    pub fn none(point: Point) -> Self {
        Self {
            point,
            snapped: false,
        }
    }
}

/// Round a value to the nearest multiple of `grid_size`.
pub fn snap_value(value: f64, grid_size: f64) -> f64 {
    if grid_size <= 0.0 || !grid_size.is_finite() {
        return value;
    }
    (value / grid_size).round() * grid_size
}

/// Snap a point to the nearest grid intersection.
pub fn snap_to_grid(point: Point, grid_size: f64) -> SnapResult {
    let snapped = Point::new(snap_value(point.x, grid_size), snap_value(point.y, grid_size));
    SnapResult {
        point: snapped,
        snapped: snapped != point,
    }
}

/// Grid settings of the editing session. View preference, never persisted
/// with the document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    pub size: f64,
    pub snap_enabled: bool,
    pub visible: bool,
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            size: GRID_SIZE,
            snap_enabled: false,
            visible: false,
        }
    }
}

impl Grid {
    /// Snap a resulting position when snapping is on.
    pub fn snap_point(&self, point: Point) -> SnapResult {
        if self.snap_enabled {
            snap_to_grid(point, self.size)
        } else {
            SnapResult::none(point)
        }
    }

    pub fn snap(&self, value: f64) -> f64 {
        if self.snap_enabled {
            snap_value(value, self.size)
        } else {
            value
        }
    }
}
