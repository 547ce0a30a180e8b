//! Partial element attributes for `Element::update`.

use super::data::TextAlign;
use super::style::{SerializableColor, StrokeStyle};
use super::{Element, ElementKind};
use crate::error::EngineResult;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// A set of attributes to merge over an element.
///
/// Every field is optional; `None` leaves the element's value untouched.
/// Deserializes from the same camelCase attribute names saved documents use,
/// so collaborators can forward partial JSON updates unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ElementPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_editing: Option<bool>,

    // Shapes (fill is shared with paths)
    #[serde(rename = "color", alias = "fill", skip_serializing_if = "Option::is_none")]
    pub fill: Option<SerializableColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<SerializableColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_style: Option<StrokeStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corner_radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sides: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub star_inner_radius: Option<f64>,

    // Text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_color: Option<SerializableColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_stroke: Option<SerializableColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_stroke_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align: Option<TextAlign>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_decoration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_transform: Option<String>,

    // Image
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,

    // Paths
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<Vec<Point>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tension: Option<f64>,
}

impl ElementPatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a partial attribute object.
    pub fn from_json(json: &str) -> EngineResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Patch carrying an element's position, size and rotation.
    pub fn geometry_of(element: &Element) -> Self {
        Self::new()
            .position(element.position)
            .size(element.width(), element.height())
            .rotation(element.rotation)
    }

    pub fn position(mut self, position: Point) -> Self {
        self.x = Some(position.x);
        self.y = Some(position.y);
        self
    }

    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn rotation(mut self, degrees: f64) -> Self {
        self.rotation = Some(degrees);
        self
    }

    pub fn editing(mut self, editing: bool) -> Self {
        self.is_editing = Some(editing);
        self
    }

    pub fn points(mut self, points: Vec<Point>) -> Self {
        self.points = Some(points);
        self
    }

    pub fn stroke(mut self, stroke: SerializableColor, width: f64) -> Self {
        self.stroke = Some(stroke);
        self.stroke_width = Some(width);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Names of set attributes that have no meaning for `kind`.
    pub(crate) fn foreign_fields(&self, kind: ElementKind) -> Vec<&'static str> {
        let shape_only = [
            ("strokeStyle", self.stroke_style.is_some()),
            ("cornerRadius", self.corner_radius.is_some()),
            ("sides", self.sides.is_some()),
            ("starInnerRadius", self.star_inner_radius.is_some()),
        ];
        let text_only = [
            ("isEditing", self.is_editing.is_some()),
            ("text", self.text.is_some()),
            ("fontSize", self.font_size.is_some()),
            ("fontFamily", self.font_family.is_some()),
            ("textColor", self.text_color.is_some()),
            ("textStroke", self.text_stroke.is_some()),
            ("textStrokeWidth", self.text_stroke_width.is_some()),
            ("fontStyle", self.font_style.is_some()),
            ("align", self.align.is_some()),
            ("lineHeight", self.line_height.is_some()),
            ("letterSpacing", self.letter_spacing.is_some()),
            ("textDecoration", self.text_decoration.is_some()),
            ("textTransform", self.text_transform.is_some()),
        ];
        let path_only = [
            ("points", self.points.is_some()),
            ("tension", self.tension.is_some()),
        ];
        let stroked = [
            ("color", self.fill.is_some()),
            ("stroke", self.stroke.is_some()),
            ("strokeWidth", self.stroke_width.is_some()),
        ];

        let mut foreign = Vec::new();
        let mut collect = |fields: &[(&'static str, bool)], applies: bool| {
            if !applies {
                foreign.extend(fields.iter().filter(|(_, set)| *set).map(|(name, _)| *name));
            }
        };
        collect(&shape_only[..], kind.has_shape());
        collect(&text_only[..], kind.has_text());
        collect(&path_only[..], kind.is_path());
        collect(&stroked[..], kind.has_shape() || kind.is_path());
        collect(&[("src", self.src.is_some())][..], kind == ElementKind::Image);
        foreign
    }
}
