//! Kind-specific element attributes.

use super::style::{SerializableColor, StrokeStyle};
use super::ElementKind;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Fill, stroke and procedural parameters of geometric shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeAttrs {
    /// Fill color (`color` in saved documents).
    #[serde(rename = "color")]
    pub fill: SerializableColor,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<SerializableColor>,
    #[serde(default)]
    pub stroke_width: f64,
    #[serde(default)]
    pub stroke_style: StrokeStyle,
    #[serde(default)]
    pub corner_radius: f64,
    /// Side count for polygons, point count for stars.
    pub sides: u32,
    /// Star inner radius as a percentage of the outer radius.
    pub star_inner_radius: f64,
}

impl ShapeAttrs {
    pub const DEFAULT_POLYGON_SIDES: u32 = 3;
    pub const DEFAULT_STAR_POINTS: u32 = 5;
    pub const DEFAULT_STAR_INNER_RADIUS: f64 = 50.0;

    pub fn for_kind(kind: ElementKind) -> Self {
        Self {
            fill: SerializableColor::accent(),
            stroke: None,
            stroke_width: 0.0,
            stroke_style: StrokeStyle::Solid,
            corner_radius: 0.0,
            sides: if kind == ElementKind::Star {
                Self::DEFAULT_STAR_POINTS
            } else {
                Self::DEFAULT_POLYGON_SIDES
            },
            star_inner_radius: Self::DEFAULT_STAR_INNER_RADIUS,
        }
    }
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Text content and typography.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextAttrs {
    pub text: String,
    pub font_size: f64,
    pub font_family: String,
    pub text_color: SerializableColor,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_stroke: Option<SerializableColor>,
    #[serde(default)]
    pub text_stroke_width: f64,
    #[serde(default = "default_font_style")]
    pub font_style: String,
    #[serde(default)]
    pub align: TextAlign,
    #[serde(default = "default_line_height")]
    pub line_height: f64,
    #[serde(default)]
    pub letter_spacing: f64,
    #[serde(default)]
    pub text_decoration: String,
    #[serde(default = "default_text_transform")]
    pub text_transform: String,
}

fn default_font_style() -> String {
    "normal".to_string()
}

fn default_line_height() -> f64 {
    1.2
}

fn default_text_transform() -> String {
    "none".to_string()
}

impl TextAttrs {
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font_size: 24.0,
            font_family: "sans-serif".to_string(),
            text_color: SerializableColor::black(),
            text_stroke: None,
            text_stroke_width: 0.0,
            font_style: default_font_style(),
            align: TextAlign::default(),
            line_height: default_line_height(),
            letter_spacing: 0.0,
            text_decoration: String::new(),
            text_transform: default_text_transform(),
        }
    }
}

/// Image source reference. Loading is left to the asset collaborator.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ImageAttrs {
    pub src: String,
}

/// Pencil and pen path attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathAttrs {
    /// Points relative to the element position once committed.
    pub points: Vec<Point>,
    pub stroke: SerializableColor,
    pub stroke_width: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<SerializableColor>,
    #[serde(default)]
    pub tension: f64,
}

impl Default for PathAttrs {
    fn default() -> Self {
        Self {
            points: Vec::new(),
            stroke: SerializableColor::black(),
            stroke_width: 2.0,
            fill: None,
            tension: 0.0,
        }
    }
}

/// Kind-specific attributes. The variant always matches the element's kind family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "camelCase")]
pub enum ElementData {
    Shape(ShapeAttrs),
    Text(TextAttrs),
    TextShape {
        shape: ShapeAttrs,
        text: TextAttrs,
    },
    Image(ImageAttrs),
    Path(PathAttrs),
}

impl ElementData {
    /// Default attributes for a kind.
    pub fn for_kind(kind: ElementKind) -> Self {
        match kind {
            ElementKind::Rectangle
            | ElementKind::Circle
            | ElementKind::Triangle
            | ElementKind::Star => ElementData::Shape(ShapeAttrs::for_kind(kind)),
            ElementKind::Text => ElementData::Text(TextAttrs::with_text("Text")),
            ElementKind::ChatBubble
            | ElementKind::ArrowLeft
            | ElementKind::ArrowRight
            | ElementKind::RectangleText
            | ElementKind::CircleText => ElementData::TextShape {
                shape: ShapeAttrs::for_kind(kind),
                text: TextAttrs::with_text("Text"),
            },
            ElementKind::Image => ElementData::Image(ImageAttrs::default()),
            ElementKind::Pencil => ElementData::Path(PathAttrs {
                tension: 0.5,
                ..PathAttrs::default()
            }),
            ElementKind::Pen => ElementData::Path(PathAttrs::default()),
        }
    }

    pub fn shape(&self) -> Option<&ShapeAttrs> {
        match self {
            ElementData::Shape(shape) | ElementData::TextShape { shape, .. } => Some(shape),
            _ => None,
        }
    }

    pub fn text(&self) -> Option<&TextAttrs> {
        match self {
            ElementData::Text(text) | ElementData::TextShape { text, .. } => Some(text),
            _ => None,
        }
    }

    pub fn path(&self) -> Option<&PathAttrs> {
        match self {
            ElementData::Path(path) => Some(path),
            _ => None,
        }
    }

    pub fn image(&self) -> Option<&ImageAttrs> {
        match self {
            ElementData::Image(image) => Some(image),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_kind_family() {
        for kind in ElementKind::ALL {
            let data = ElementData::for_kind(kind);
            assert_eq!(data.shape().is_some(), kind.has_shape(), "{kind:?}");
            assert_eq!(data.text().is_some(), kind.has_text(), "{kind:?}");
            assert_eq!(data.path().is_some(), kind.is_path(), "{kind:?}");
        }
    }

    #[test]
    fn test_star_and_polygon_defaults() {
        assert_eq!(ShapeAttrs::for_kind(ElementKind::Star).sides, 5);
        assert_eq!(ShapeAttrs::for_kind(ElementKind::Triangle).sides, 3);
        assert!((ShapeAttrs::for_kind(ElementKind::Star).star_inner_radius - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shape_attrs_serialize_fill_as_color() {
        let json = serde_json::to_value(ShapeAttrs::for_kind(ElementKind::Rectangle)).unwrap();
        assert_eq!(json["color"], "#3b82f6");
        assert!(json.get("stroke").is_none());
    }
}
