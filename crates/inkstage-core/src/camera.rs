//! Camera module: the screen/canvas coordinate mapping.

use kurbo::{Affine, Point, Vec2};
use serde::{Deserialize, Serialize};

/// Pan and zoom state the engine reads, and the pan setter the hand tool drives.
pub trait Viewport {
    /// Current stage translation in screen units.
    fn pan(&self) -> Vec2;
    /// Current uniform scale factor.
    fn scale(&self) -> f64;
    /// Move the stage to an absolute translation.
    fn set_pan(&mut self, pan: Vec2);

    /// Map a screen point into canvas space: `(screen - pan) / scale`.
    fn to_canvas(&self, screen: Point) -> Point {
        let pan = self.pan();
        let scale = self.scale();
        Point::new((screen.x - pan.x) / scale, (screen.y - pan.y) / scale)
    }

    /// Map a canvas point back into screen space.
    fn to_screen(&self, canvas: Point) -> Point {
        let pan = self.pan();
        let scale = self.scale();
        Point::new(canvas.x * scale + pan.x, canvas.y * scale + pan.y)
    }
}

/// Map an optional pointer position into canvas space.
///
/// Yields `None` when the render target has not reported a position yet.
pub fn pointer_to_canvas(viewport: &dyn Viewport, screen: Option<Point>) -> Option<Point> {
    screen.map(|p| viewport.to_canvas(p))
}

/// Camera manages the view transform for the canvas.
///
/// It handles panning (translation) and zooming (scaling) operations,
/// converting between screen coordinates and canvas coordinates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Camera {
    /// Current translation offset (pan)
    pub offset: Vec2,
    /// Current zoom level, 1.0 = 100%
    pub zoom: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
            min_zoom: 0.1,
            max_zoom: 10.0,
        }
    }
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Canvas-to-screen transform handed to the renderer.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.zoom)
    }

    /// Screen-to-canvas transform for input handling.
    pub fn inverse_transform(&self) -> Affine {
        Affine::scale(1.0 / self.zoom) * Affine::translate(-self.offset)
    }

    pub fn screen_to_canvas(&self, screen_point: Point) -> Point {
        self.inverse_transform() * screen_point
    }

    pub fn canvas_to_screen(&self, canvas_point: Point) -> Point {
        self.transform() * canvas_point
    }

    /// Pan the camera by a delta in screen coordinates.
    pub fn pan_by(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Zoom the camera, keeping the given screen point fixed.
    pub fn zoom_at(&mut self, screen_point: Point, factor: f64) {
        let new_zoom = (self.zoom * factor).clamp(self.min_zoom, self.max_zoom);
        if (new_zoom - self.zoom).abs() < f64::EPSILON {
            return;
        }

        let canvas_point = self.screen_to_canvas(screen_point);
        self.zoom = new_zoom;

        // Shift so canvas_point lands back under screen_point
        let new_screen = self.canvas_to_screen(canvas_point);
        self.offset += screen_point - new_screen;
    }

    pub fn reset(&mut self) {
        *self = Self {
            min_zoom: self.min_zoom,
            max_zoom: self.max_zoom,
            ..Self::default()
        };
    }
}

impl Viewport for Camera {
    fn pan(&self) -> Vec2 {
        self.offset
    }

    fn scale(&self) -> f64 {
        self.zoom
    }

    fn set_pan(&mut self, pan: Vec2) {
        self.offset = pan;
    }

    fn to_canvas(&self, screen: Point) -> Point {
        self.screen_to_canvas(screen)
    }

    fn to_screen(&self, canvas: Point) -> Point {
        self.canvas_to_screen(canvas)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_camera() {
        let camera = Camera::new();
        assert_eq!(camera.offset, Vec2::ZERO);
        assert!((camera.zoom - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_screen_to_canvas_identity() {
        let camera = Camera::new();
        let screen = Point::new(100.0, 200.0);
        let canvas = camera.to_canvas(screen);
        assert!((canvas.x - screen.x).abs() < f64::EPSILON);
        assert!((canvas.y - screen.y).abs() < f64::EPSILON);
    }

    #[test]
    fn test_screen_to_canvas_with_pan_and_scale() {
        let mut camera = Camera::new();
        camera.offset = Vec2::new(50.0, 100.0);
        camera.zoom = 2.0;
        let canvas = camera.to_canvas(Point::new(150.0, 300.0));
        assert!((canvas.x - 50.0).abs() < f64::EPSILON);
        assert!((canvas.y - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_missing_pointer_maps_to_nothing() {
        let camera = Camera::new();
        assert!(pointer_to_canvas(&camera, None).is_none());
        assert_eq!(
            pointer_to_canvas(&camera, Some(Point::new(1.0, 2.0))),
            Some(Point::new(1.0, 2.0))
        );
    }

    #[test]
    fn test_roundtrip_conversion() {
        let mut camera = Camera::new();
        camera.offset = Vec2::new(30.0, -20.0);
        camera.zoom = 1.5;

        let original = Point::new(123.0, 456.0);
        let back = camera.to_screen(camera.to_canvas(original));

        assert!((back.x - original.x).abs() < 1e-10);
        assert!((back.y - original.y).abs() < 1e-10);
    }

    #[test]
    fn test_zoom_at_keeps_point_fixed() {
        let mut camera = Camera::new();
        camera.offset = Vec2::new(10.0, 10.0);
        let anchor = Point::new(200.0, 150.0);
        let before = camera.to_canvas(anchor);
        camera.zoom_at(anchor, 2.0);
        let after = camera.to_canvas(anchor);
        assert!((before.x - after.x).abs() < 1e-10);
        assert!((before.y - after.y).abs() < 1e-10);
    }

    #[test]
    fn test_zoom_clamp() {
        let mut camera = Camera::new();
        camera.zoom_at(Point::ZERO, 0.001);
        assert!((camera.zoom - camera.min_zoom).abs() < f64::EPSILON);

        camera.zoom = 1.0;
        camera.zoom_at(Point::ZERO, 1000.0);
        assert!((camera.zoom - camera.max_zoom).abs() < f64::EPSILON);
    }

    #[test]
    fn test_set_pan_through_viewport() {
        let mut camera = Camera::new();
        camera.pan_by(Vec2::new(10.0, 20.0));
        let viewport: &mut dyn Viewport = &mut camera;
        viewport.set_pan(viewport.pan() + Vec2::new(5.0, 5.0));
        assert_eq!(camera.offset, Vec2::new(15.0, 25.0));
    }
}
