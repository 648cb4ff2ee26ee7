//! Zoom transform between screen space and page space.

use kurbo::{Affine, Point, Vec2};
use serde::{Deserialize, Serialize};

/// Zoom limits and step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            min: 0.5,
            max: 2.0,
            step: 0.1,
        }
    }
}

/// View transform of the page inside the editor.
///
/// `origin` is where the page's top-left corner sits on screen; `zoom`
/// scales page units into screen pixels. Neither affects element geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub origin: Vec2,
    pub zoom: f64,
    limits: ZoomConfig,
}

impl Default for View {
    fn default() -> Self {
        Self::new(ZoomConfig::default())
    }
}

impl View {
    pub fn new(limits: ZoomConfig) -> Self {
        Self {
            origin: Vec2::ZERO,
            zoom: 1.0,
            limits,
        }
    }

    /// Page-to-screen transform.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.origin) * Affine::scale(self.zoom)
    }

    pub fn inverse_transform(&self) -> Affine {
        Affine::scale(1.0 / self.zoom) * Affine::translate(-self.origin)
    }

    pub fn screen_to_page(&self, screen_point: Point) -> Point {
        self.inverse_transform() * screen_point
    }

    pub fn page_to_screen(&self, page_point: Point) -> Point {
        self.transform() * page_point
    }

    /// Convert a pointer movement into page units.
    pub fn screen_delta_to_page(&self, delta: Vec2) -> Vec2 {
        delta / self.zoom
    }

    /// Set the zoom, clamped to the configured range and rounded to
    /// hundredths so repeated steps do not accumulate drift.
    pub fn set_zoom(&mut self, zoom: f64) {
        if !zoom.is_finite() {
            return;
        }
        // Inverted ranges must not panic.
        let clamped = zoom.max(self.limits.min).min(self.limits.max);
        self.zoom = (clamped * 100.0).round() / 100.0;
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom + self.limits.step);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom - self.limits.step);
    }

    pub fn reset_zoom(&mut self) {
        self.zoom = 1.0;
    }

    /// Zoom as a whole percentage for display.
    pub fn zoom_percent(&self) -> u32 {
        (self.zoom * 100.0).round() as u32
    }
}
