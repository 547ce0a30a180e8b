//! Engine configuration.

use crate::element::SerializableColor;
use crate::error::EngineResult;
use serde::{Deserialize, Serialize};

/// Stroke applied to newly drawn pencil and pen paths.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawingStyle {
    pub stroke: SerializableColor,
    pub stroke_width: f64,
}

impl Default for DrawingStyle {
    fn default() -> Self {
        Self {
            stroke: SerializableColor::black(),
            stroke_width: 2.0,
        }
    }
}

/// Gesture thresholds, in canvas units unless noted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Pen clicks this close to the first point close the path.
    pub close_radius: f64,
    /// Shape drags shorter than this are treated as clicks.
    pub click_threshold: f64,
    /// Smallest width/height a resize can produce.
    pub min_resize: f64,
    /// Smallest extent of a committed path's bounding box.
    pub min_path_extent: f64,
    /// Handle hit radius, in screen pixels.
    pub handle_tolerance: f64,
    /// Distance from the top edge to the rotation knob.
    pub rotate_knob_offset: f64,
    /// Style for new paths; `None` keeps the element defaults.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drawing_style: Option<DrawingStyle>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            close_radius: 20.0,
            click_threshold: 5.0,
            min_resize: 50.0,
            min_path_extent: 1.0,
            handle_tolerance: 8.0,
            rotate_knob_offset: 25.0,
            drawing_style: None,
        }
    }
}

impl EngineConfig {
    pub fn from_json(json: &str) -> EngineResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> EngineResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn with_drawing_style(mut self, style: DrawingStyle) -> Self {
        self.drawing_style = Some(style);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert!((config.close_radius - 20.0).abs() < f64::EPSILON);
        assert!((config.click_threshold - 5.0).abs() < f64::EPSILON);
        assert!((config.min_resize - 50.0).abs() < f64::EPSILON);
        assert!(config.drawing_style.is_none());
    }

    #[test]
    fn test_partial_json() {
        let config = EngineConfig::from_json(
            r##"{"closeRadius": 12, "drawingStyle": {"stroke": "#ff0000", "strokeWidth": 4}}"##,
        )
        .unwrap();
        assert!((config.close_radius - 12.0).abs() < f64::EPSILON);
        assert!((config.min_resize - 50.0).abs() < f64::EPSILON);
        let style = config.drawing_style.unwrap();
        assert_eq!(style.stroke, SerializableColor::rgb(255, 0, 0));
        assert!((style.stroke_width - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_json_roundtrip() {
        let config = EngineConfig::default().with_drawing_style(DrawingStyle::default());
        let json = config.to_json().unwrap();
        assert_eq!(EngineConfig::from_json(&json).unwrap(), config);
    }
}
