//! Error types for the manipulation engine.

use crate::element::ElementId;
use thiserror::Error;

/// Engine errors.
///
/// None of these are fatal. The dispatcher logs them and returns to idle,
/// so they never cross the pointer-handler boundary.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("No pointer position available")]
    NoPointerPosition,
    #[error("Insufficient geometry: {points} point(s), at least 2 required")]
    InsufficientGeometry { points: usize },
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
    #[error("Unknown handle: {0}")]
    UnknownHandle(String),
    #[error("Odd coordinate count: {0}")]
    OddCoordinateCount(usize),
    #[error("Element not found: {0}")]
    ElementNotFound(ElementId),
    #[error("Element is locked: {0}")]
    ElementLocked(ElementId),
    #[error("Invalid color: {0}")]
    InvalidColor(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
