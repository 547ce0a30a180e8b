//! Drag, resize and rotate gestures, plus the selection handle layout.

use crate::element::{Element, ElementId, ElementPatch};
use crate::error::EngineError;
use crate::input::PointerTarget;
use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Resize handle positions on the element bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleKind {
    N,
    S,
    E,
    W,
    Ne,
    Nw,
    Se,
    Sw,
}

impl HandleKind {
    pub const ALL: [HandleKind; 8] = [
        HandleKind::Nw,
        HandleKind::N,
        HandleKind::Ne,
        HandleKind::E,
        HandleKind::Se,
        HandleKind::S,
        HandleKind::Sw,
        HandleKind::W,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            HandleKind::N => "n",
            HandleKind::S => "s",
            HandleKind::E => "e",
            HandleKind::W => "w",
            HandleKind::Ne => "ne",
            HandleKind::Nw => "nw",
            HandleKind::Se => "se",
            HandleKind::Sw => "sw",
        }
    }

    /// Unit direction from the center: x in {-1, 0, 1}, y in {-1, 0, 1}.
    fn direction(self) -> (f64, f64) {
        match self {
            HandleKind::N => (0.0, -1.0),
            HandleKind::S => (0.0, 1.0),
            HandleKind::E => (1.0, 0.0),
            HandleKind::W => (-1.0, 0.0),
            HandleKind::Ne => (1.0, -1.0),
            HandleKind::Nw => (-1.0, -1.0),
            HandleKind::Se => (1.0, 1.0),
            HandleKind::Sw => (-1.0, 1.0),
        }
    }

    pub fn changes_width(self) -> bool {
        self.direction().0 != 0.0
    }

    pub fn changes_height(self) -> bool {
        self.direction().1 != 0.0
    }

    /// Edge handles on the vertical axis keep the start aspect ratio.
    pub fn locks_aspect(self) -> bool {
        matches!(self, HandleKind::N | HandleKind::S)
    }
}

impl fmt::Display for HandleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HandleKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HandleKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| EngineError::UnknownHandle(s.to_string()))
    }
}

/// What a handle does when grabbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleRole {
    Resize(HandleKind),
    Rotate,
}

/// A selection handle with its canvas-space position.
#[derive(Debug, Clone, Copy)]
pub struct Handle {
    pub position: Point,
    pub role: HandleRole,
}

impl Handle {
    pub fn new(position: Point, role: HandleRole) -> Self {
        Self { position, role }
    }

    /// Check if a canvas point hits this handle.
    /// `tolerance` should be adjusted for camera zoom.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        (point - self.position).hypot2() <= tolerance * tolerance
    }

    /// Pointer target a render surface reports for this handle.
    pub fn target(&self, id: &ElementId) -> PointerTarget {
        match self.role {
            HandleRole::Resize(kind) => PointerTarget::Handle(id.clone(), kind),
            HandleRole::Rotate => PointerTarget::RotateKnob(id.clone()),
        }
    }
}

/// Rotate a center-relative offset by `degrees` and place it around `center`.
fn rotate_about(center: Point, offset: Vec2, degrees: f64) -> Point {
    let (sin_r, cos_r) = degrees.to_radians().sin_cos();
    Point::new(
        center.x + offset.x * cos_r - offset.y * sin_r,
        center.y + offset.x * sin_r + offset.y * cos_r,
    )
}

/// Handles for an element: eight resize handles and the rotation knob above
/// the top edge, all rotated with the element about its center.
pub fn element_handles(element: &Element, knob_offset: f64) -> Vec<Handle> {
    let center = element.center();
    let half = Vec2::new(element.width() / 2.0, element.height() / 2.0);

    let mut handles: Vec<Handle> = HandleKind::ALL
        .into_iter()
        .map(|kind| {
            let (dx, dy) = kind.direction();
            let offset = Vec2::new(dx * half.x, dy * half.y);
            Handle::new(rotate_about(center, offset, element.rotation), HandleRole::Resize(kind))
        })
        .collect();
    handles.push(Handle::new(
        rotate_about(center, Vec2::new(0.0, -half.y - knob_offset), element.rotation),
        HandleRole::Rotate,
    ));
    handles
}

/// Find which handle (if any) is hit at the given canvas point.
pub fn hit_test_handles(
    element: &Element,
    point: Point,
    tolerance: f64,
    knob_offset: f64,
) -> Option<Handle> {
    element_handles(element, knob_offset)
        .into_iter()
        .find(|handle| handle.hit_test(point, tolerance))
}

/// Move gesture: position follows the pointer delta.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragGesture {
    pub start_pointer: Point,
    pub start_position: Point,
}

impl DragGesture {
    pub fn new(element: &Element, pointer: Point) -> Self {
        Self {
            start_pointer: pointer,
            start_position: element.position,
        }
    }

    pub fn position_at(&self, pointer: Point) -> Point {
        self.start_position + (pointer - self.start_pointer)
    }
}

/// Center-anchored resize gesture.
///
/// Each pointer unit moves the grabbed edge and its opposite edge, so sizes
/// change by twice the delta and the center never moves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeGesture {
    pub handle: HandleKind,
    pub start_pointer: Point,
    pub start_size: Size,
    pub center: Point,
    pub min_size: f64,
}

impl ResizeGesture {
    pub fn new(element: &Element, handle: HandleKind, pointer: Point, min_size: f64) -> Self {
        Self {
            handle,
            start_pointer: pointer,
            start_size: element.size(),
            center: element.center(),
            min_size,
        }
    }

    /// Width over height at gesture start, 1 for degenerate boxes.
    fn aspect(&self) -> f64 {
        if self.start_size.width > 0.0 && self.start_size.height > 0.0 {
            self.start_size.width / self.start_size.height
        } else {
            1.0
        }
    }

    /// Bounding box for the pointer at `pointer`.
    pub fn bounds_at(&self, pointer: Point) -> Rect {
        let delta = pointer - self.start_pointer;
        let (dx, dy) = self.handle.direction();
        let aspect = self.aspect();

        let mut width = self.start_size.width + 2.0 * dx * delta.x;
        let mut height = self.start_size.height + 2.0 * dy * delta.y;
        if self.handle.locks_aspect() {
            width = height * aspect;
        }

        if self.handle.changes_width() && width < self.min_size {
            width = self.min_size;
            height = width / aspect;
        }
        if self.handle.changes_height() && height < self.min_size {
            height = self.min_size;
            width = height * aspect;
        }

        Rect::from_center_size(self.center, Size::new(width, height))
    }
}

/// Rotation gesture about the element center, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotateGesture {
    pub center: Point,
    pub start_angle: f64,
    pub start_rotation: f64,
}

impl RotateGesture {
    pub fn new(element: &Element, pointer: Point) -> Self {
        let center = element.center();
        Self {
            center,
            start_angle: angle_degrees(center, pointer),
            start_rotation: element.rotation,
        }
    }

    pub fn rotation_at(&self, pointer: Point) -> f64 {
        self.start_rotation + angle_degrees(self.center, pointer) - self.start_angle
    }
}

fn angle_degrees(center: Point, pointer: Point) -> f64 {
    let v = pointer - center;
    v.y.atan2(v.x).to_degrees()
}

/// Any of the three transform gestures.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransformGesture {
    Drag(DragGesture),
    Resize(ResizeGesture),
    Rotate(RotateGesture),
}

impl TransformGesture {
    /// Geometry for the pointer at `pointer`, applied to the gesture's start element.
    pub fn patch_at(&self, pointer: Point) -> ElementPatch {
        match self {
            TransformGesture::Drag(drag) => ElementPatch::new().position(drag.position_at(pointer)),
            TransformGesture::Resize(resize) => {
                let bounds = resize.bounds_at(pointer);
                ElementPatch::new()
                    .position(bounds.origin())
                    .size(bounds.width(), bounds.height())
            }
            TransformGesture::Rotate(rotate) => ElementPatch::new().rotation(rotate.rotation_at(pointer)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementKind;

    fn rect(x: f64, y: f64, w: f64, h: f64) -> Element {
        Element::create_default(ElementKind::Rectangle, Point::new(x, y), Some("r".into()))
            .update(&ElementPatch::new().size(w, h))
    }

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn test_parse_handle_kind() {
        assert_eq!("se".parse::<HandleKind>().unwrap(), HandleKind::Se);
        assert_eq!("n".parse::<HandleKind>().unwrap(), HandleKind::N);
        assert!("north".parse::<HandleKind>().is_err());
        assert_eq!(HandleKind::Nw.to_string(), "nw");
    }

    #[test]
    fn test_drag() {
        let element = rect(10.0, 10.0, 50.0, 50.0);
        let drag = DragGesture::new(&element, Point::new(20.0, 20.0));
        assert_eq!(drag.position_at(Point::new(35.0, 5.0)), Point::new(25.0, -5.0));
    }

    #[test]
    fn test_resize_se_keeps_center() {
        let element = rect(0.0, 0.0, 100.0, 80.0);
        let resize = ResizeGesture::new(&element, HandleKind::Se, Point::new(100.0, 80.0), 50.0);
        let bounds = resize.bounds_at(Point::new(110.0, 90.0));
        assert_close(bounds.width(), 120.0);
        assert_close(bounds.height(), 100.0);
        assert_eq!(bounds.center(), Point::new(50.0, 40.0));
        assert_eq!(bounds.origin(), Point::new(-10.0, -10.0));
    }

    #[test]
    fn test_resize_edges_scale_independently() {
        let element = rect(0.0, 0.0, 200.0, 100.0);
        let east = ResizeGesture::new(&element, HandleKind::E, Point::ZERO, 50.0);
        let bounds = east.bounds_at(Point::new(10.0, 30.0));
        assert_close(bounds.width(), 220.0);
        assert_close(bounds.height(), 100.0);

        let west = ResizeGesture::new(&element, HandleKind::W, Point::ZERO, 50.0);
        assert_close(west.bounds_at(Point::new(10.0, 0.0)).width(), 180.0);
    }

    #[test]
    fn test_resize_north_south_lock_aspect() {
        let element = rect(0.0, 0.0, 200.0, 100.0);
        let south = ResizeGesture::new(&element, HandleKind::S, Point::ZERO, 50.0);
        let bounds = south.bounds_at(Point::new(0.0, 25.0));
        assert_close(bounds.height(), 150.0);
        assert_close(bounds.width(), 300.0);

        let north = ResizeGesture::new(&element, HandleKind::N, Point::ZERO, 50.0);
        let bounds = north.bounds_at(Point::new(0.0, 10.0));
        assert_close(bounds.height(), 80.0);
        assert_close(bounds.width(), 160.0);
    }

    #[test]
    fn test_resize_floor() {
        let element = rect(0.0, 0.0, 200.0, 100.0);
        let east = ResizeGesture::new(&element, HandleKind::E, Point::ZERO, 50.0);
        let bounds = east.bounds_at(Point::new(-500.0, 0.0));
        assert_close(bounds.width(), 50.0);
        assert_close(bounds.height(), 25.0);

        let north = ResizeGesture::new(&element, HandleKind::N, Point::ZERO, 50.0);
        let bounds = north.bounds_at(Point::new(0.0, 500.0));
        assert_close(bounds.height(), 50.0);
        assert_close(bounds.width(), 100.0);
        assert_eq!(bounds.center(), Point::new(100.0, 50.0));
    }

    #[test]
    fn test_rotate_is_additive() {
        let element = rect(0.0, 0.0, 100.0, 100.0).update(&ElementPatch::new().rotation(30.0));
        let rotate = RotateGesture::new(&element, Point::new(100.0, 50.0));
        assert_close(rotate.rotation_at(Point::new(50.0, 100.0)), 120.0);
        assert_close(rotate.rotation_at(Point::new(100.0, 50.0)), 30.0);
    }

    #[test]
    fn test_rotation_is_not_wrapped() {
        let element = rect(0.0, 0.0, 100.0, 100.0).update(&ElementPatch::new().rotation(350.0));
        let rotate = RotateGesture::new(&element, Point::new(100.0, 50.0));
        assert_close(rotate.rotation_at(Point::new(50.0, 100.0)), 440.0);
    }

    #[test]
    fn test_handle_layout() {
        let element = rect(0.0, 0.0, 100.0, 50.0);
        let handles = element_handles(&element, 25.0);
        assert_eq!(handles.len(), 9);

        let se = handles
            .iter()
            .find(|h| h.role == HandleRole::Resize(HandleKind::Se))
            .unwrap();
        assert_eq!(se.position, Point::new(100.0, 50.0));

        let knob = handles.iter().find(|h| h.role == HandleRole::Rotate).unwrap();
        assert_eq!(knob.position, Point::new(50.0, -25.0));
    }

    #[test]
    fn test_handle_layout_follows_rotation() {
        let element = rect(0.0, 0.0, 100.0, 100.0).update(&ElementPatch::new().rotation(90.0));
        let hit = hit_test_handles(&element, Point::new(100.0, 50.0), 1.0, 25.0).unwrap();
        assert_eq!(hit.role, HandleRole::Resize(HandleKind::N));

        let knob = hit_test_handles(&element, Point::new(125.0, 50.0), 1.0, 25.0).unwrap();
        assert_eq!(knob.role, HandleRole::Rotate);
        assert_eq!(knob.target(element.id()), PointerTarget::RotateKnob("r".into()));
        assert!(hit_test_handles(&element, Point::new(50.0, 50.0), 1.0, 25.0).is_none());
    }

    #[test]
    fn test_gesture_patch() {
        let element = rect(0.0, 0.0, 100.0, 80.0);
        let gesture = TransformGesture::Resize(ResizeGesture::new(&element, HandleKind::Se, Point::ZERO, 50.0));
        let resized = element.update(&gesture.patch_at(Point::new(10.0, 10.0)));
        assert_eq!(resized.position, Point::new(-10.0, -10.0));
        assert_close(resized.width(), 120.0);
    }
}
