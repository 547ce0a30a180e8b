//! Element model: the discriminated union of everything placed on the canvas.

mod data;
mod patch;
mod path;
mod style;

pub use data::{ElementData, ImageAttrs, PathAttrs, ShapeAttrs, TextAlign, TextAttrs};
pub use patch::ElementPatch;
pub use path::{flatten_points, normalize_points, points_bounds, points_from_flat, NormalizedPath};
pub use style::{SerializableColor, StrokeStyle};

use crate::error::EngineResult;
use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Stable element identifier.
///
/// Generated ids are v4 UUIDs; seeded elements may carry readable ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    /// Generate a fresh unique identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ElementId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Element type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ElementKind {
    Rectangle,
    Circle,
    Triangle,
    Star,
    Text,
    Image,
    Pencil,
    Pen,
    ChatBubble,
    ArrowLeft,
    ArrowRight,
    RectangleText,
    CircleText,
}

impl ElementKind {
    pub const ALL: [ElementKind; 13] = [
        ElementKind::Rectangle,
        ElementKind::Circle,
        ElementKind::Triangle,
        ElementKind::Star,
        ElementKind::Text,
        ElementKind::Image,
        ElementKind::Pencil,
        ElementKind::Pen,
        ElementKind::ChatBubble,
        ElementKind::ArrowLeft,
        ElementKind::ArrowRight,
        ElementKind::RectangleText,
        ElementKind::CircleText,
    ];

    /// Identifier used in saved documents and tool names.
    pub fn as_str(self) -> &'static str {
        match self {
            ElementKind::Rectangle => "rectangle",
            ElementKind::Circle => "circle",
            ElementKind::Triangle => "triangle",
            ElementKind::Star => "star",
            ElementKind::Text => "text",
            ElementKind::Image => "image",
            ElementKind::Pencil => "pencil",
            ElementKind::Pen => "pen",
            ElementKind::ChatBubble => "chat-bubble",
            ElementKind::ArrowLeft => "arrow-left",
            ElementKind::ArrowRight => "arrow-right",
            ElementKind::RectangleText => "rectangle-text",
            ElementKind::CircleText => "circle-text",
        }
    }

    /// Human-readable default name.
    pub fn display_name(self) -> &'static str {
        match self {
            ElementKind::Rectangle => "Rectangle",
            ElementKind::Circle => "Circle",
            ElementKind::Triangle => "Triangle",
            ElementKind::Star => "Star",
            ElementKind::Text => "Text",
            ElementKind::Image => "Image",
            ElementKind::Pencil => "Pencil",
            ElementKind::Pen => "Pen",
            ElementKind::ChatBubble => "Chat Bubble",
            ElementKind::ArrowLeft => "Arrow Left",
            ElementKind::ArrowRight => "Arrow Right",
            ElementKind::RectangleText => "Rectangle Text",
            ElementKind::CircleText => "Circle Text",
        }
    }

    /// Whether the kind carries fill/stroke shape attributes.
    pub fn has_shape(self) -> bool {
        matches!(
            self,
            ElementKind::Rectangle | ElementKind::Circle | ElementKind::Triangle | ElementKind::Star
        ) || self.is_text_shape()
    }

    /// Whether the kind carries text content (and therefore an edit mode).
    pub fn has_text(self) -> bool {
        self == ElementKind::Text || self.is_text_shape()
    }

    pub fn is_text_shape(self) -> bool {
        matches!(
            self,
            ElementKind::ChatBubble
                | ElementKind::ArrowLeft
                | ElementKind::ArrowRight
                | ElementKind::RectangleText
                | ElementKind::CircleText
        )
    }

    pub fn is_path(self) -> bool {
        matches!(self, ElementKind::Pencil | ElementKind::Pen)
    }

    /// Size of a freshly created element of this kind.
    pub fn default_size(self) -> Size {
        match self {
            ElementKind::Rectangle
            | ElementKind::Circle
            | ElementKind::Triangle
            | ElementKind::Star => Size::new(100.0, 100.0),
            ElementKind::Text => Size::new(200.0, 40.0),
            ElementKind::Image => Size::new(400.0, 600.0),
            ElementKind::Pencil | ElementKind::Pen => Size::ZERO,
            ElementKind::CircleText => Size::new(150.0, 150.0),
            ElementKind::ChatBubble
            | ElementKind::ArrowLeft
            | ElementKind::ArrowRight
            | ElementKind::RectangleText => Size::new(200.0, 100.0),
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An element on the canvas.
///
/// Values are immutable from the outside: `update` returns a new element, and
/// the caller replaces it in the element collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub(crate) id: ElementId,
    #[serde(rename = "type")]
    pub(crate) kind: ElementKind,
    pub name: String,
    /// Top-left corner of the untransformed bounding box.
    pub position: Point,
    pub(crate) width: f64,
    pub(crate) height: f64,
    /// Rotation in degrees around the element center. Never wrapped.
    #[serde(default)]
    pub rotation: f64,
    pub visible: bool,
    pub locked: bool,
    /// Text edit mode; always false for kinds without text.
    #[serde(default)]
    pub(crate) is_editing: bool,
    pub(crate) data: ElementData,
}

impl Element {
    /// Create a minimal valid element of `kind` at `position`.
    pub fn create_default(kind: ElementKind, position: Point, id: Option<ElementId>) -> Self {
        let size = kind.default_size();
        Self {
            id: id.unwrap_or_default(),
            kind,
            name: kind.display_name().to_string(),
            position,
            width: size.width,
            height: size.height,
            rotation: 0.0,
            visible: true,
            locked: false,
            is_editing: false,
            data: ElementData::for_kind(kind),
        }
    }

    pub fn id(&self) -> &ElementId {
        &self.id
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn is_editing(&self) -> bool {
        self.is_editing
    }

    pub fn data(&self) -> &ElementData {
        &self.data
    }

    /// Path points (element-local once committed), empty for non-path kinds.
    pub fn points(&self) -> &[Point] {
        self.data.path().map(|path| path.points.as_slice()).unwrap_or(&[])
    }

    /// Untransformed bounding box in canvas space.
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size())
    }

    /// Center of the bounding box; the rotation pivot.
    pub fn center(&self) -> Point {
        self.bounds().center()
    }

    /// Return a copy with `patch` merged over this element.
    ///
    /// Attributes that do not apply to this kind are ignored.
    pub fn update(&self, patch: &ElementPatch) -> Element {
        let mut next = self.clone();

        if let Some(name) = &patch.name {
            next.name.clone_from(name);
        }
        if let Some(x) = patch.x {
            next.position.x = x;
        }
        if let Some(y) = patch.y {
            next.position.y = y;
        }
        if let Some(width) = patch.width {
            next.width = width.max(0.0);
        }
        if let Some(height) = patch.height {
            next.height = height.max(0.0);
        }
        if let Some(rotation) = patch.rotation {
            next.rotation = rotation;
        }
        if let Some(visible) = patch.visible {
            next.visible = visible;
        }
        if let Some(locked) = patch.locked {
            next.locked = locked;
        }
        if let (Some(editing), true) = (patch.is_editing, self.kind.has_text()) {
            next.is_editing = editing;
        }

        match &mut next.data {
            ElementData::Shape(shape) => apply_shape(shape, patch),
            ElementData::Text(text) => apply_text(text, patch),
            ElementData::TextShape { shape, text } => {
                apply_shape(shape, patch);
                apply_text(text, patch);
            }
            ElementData::Image(image) => {
                if let Some(src) = &patch.src {
                    image.src.clone_from(src);
                }
            }
            ElementData::Path(path) => apply_path(path, patch),
        }

        let foreign = patch.foreign_fields(self.kind);
        if !foreign.is_empty() {
            log::debug!("Ignoring {:?} on {} element {}", foreign, self.kind, self.id);
        }
        next
    }

    /// Rewrite path points relative to their bounding-box minimum.
    ///
    /// Points are taken in canvas space (element position plus local point);
    /// the position becomes the minimum and the size the extent, clamped to
    /// `min_extent`. Non-path elements and empty paths are returned unchanged.
    pub fn normalize(&self, min_extent: f64) -> Element {
        let absolute: Vec<Point> = self
            .points()
            .iter()
            .map(|p| self.position + p.to_vec2())
            .collect();
        match normalize_points(&absolute, min_extent) {
            Some(normalized) => self.update(
                &ElementPatch::new()
                    .position(normalized.origin)
                    .size(normalized.width, normalized.height)
                    .points(normalized.points),
            ),
            None => self.clone(),
        }
    }

    /// Path points as a flat coordinate list.
    pub fn flat_points(&self) -> Vec<f64> {
        flatten_points(self.points())
    }

    /// Replace path points from a flat coordinate list.
    pub fn with_flat_points(&self, coords: &[f64]) -> EngineResult<Element> {
        let points = points_from_flat(coords)?;
        Ok(self.update(&ElementPatch::new().points(points)))
    }
}

fn apply_shape(shape: &mut ShapeAttrs, patch: &ElementPatch) {
    if let Some(fill) = patch.fill {
        shape.fill = fill;
    }
    if let Some(stroke) = patch.stroke {
        shape.stroke = Some(stroke);
    }
    if let Some(width) = patch.stroke_width {
        shape.stroke_width = width.max(0.0);
    }
    if let Some(style) = patch.stroke_style {
        shape.stroke_style = style;
    }
    if let Some(radius) = patch.corner_radius {
        shape.corner_radius = radius.max(0.0);
    }
    if let Some(sides) = patch.sides {
        shape.sides = sides;
    }
    if let Some(inner) = patch.star_inner_radius {
        shape.star_inner_radius = inner;
    }
}

fn apply_text(text: &mut TextAttrs, patch: &ElementPatch) {
    if let Some(content) = &patch.text {
        text.text.clone_from(content);
    }
    if let Some(size) = patch.font_size {
        text.font_size = size;
    }
    if let Some(family) = &patch.font_family {
        text.font_family.clone_from(family);
    }
    if let Some(color) = patch.text_color {
        text.text_color = color;
    }
    if let Some(stroke) = patch.text_stroke {
        text.text_stroke = Some(stroke);
    }
    if let Some(width) = patch.text_stroke_width {
        text.text_stroke_width = width.max(0.0);
    }
    if let Some(style) = &patch.font_style {
        text.font_style.clone_from(style);
    }
    if let Some(align) = patch.align {
        text.align = align;
    }
    if let Some(line_height) = patch.line_height {
        text.line_height = line_height;
    }
    if let Some(spacing) = patch.letter_spacing {
        text.letter_spacing = spacing;
    }
    if let Some(decoration) = &patch.text_decoration {
        text.text_decoration.clone_from(decoration);
    }
    if let Some(transform) = &patch.text_transform {
        text.text_transform.clone_from(transform);
    }
}

fn apply_path(path: &mut PathAttrs, patch: &ElementPatch) {
    if let Some(points) = &patch.points {
        path.points.clone_from(points);
    }
    if let Some(stroke) = patch.stroke {
        path.stroke = stroke;
    }
    if let Some(width) = patch.stroke_width {
        path.stroke_width = width.max(0.0);
    }
    if let Some(fill) = patch.fill {
        path.fill = Some(fill);
    }
    if let Some(tension) = patch.tension {
        path.tension = tension;
    }
}
