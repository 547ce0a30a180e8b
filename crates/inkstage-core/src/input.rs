//! Pointer events as the engine consumes them.

use crate::element::ElementId;
use crate::transform::HandleKind;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::time::Duration;

// Use web_time for WASM compatibility
#[cfg(target_arch = "wasm32")]
use web_time::Instant;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    #[default]
    Left,
    Right,
    Middle,
}

/// Pointer event phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    DoubleClick,
}

/// What the render surface reports under the pointer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerTarget {
    /// Empty stage.
    #[default]
    Background,
    /// The body of an element.
    Element(ElementId),
    /// A resize handle on the selected element.
    Handle(ElementId, HandleKind),
    /// The rotation knob on the selected element.
    RotateKnob(ElementId),
}

impl PointerTarget {
    pub fn element_id(&self) -> Option<&ElementId> {
        match self {
            PointerTarget::Background => None,
            PointerTarget::Element(id)
            | PointerTarget::Handle(id, _)
            | PointerTarget::RotateKnob(id) => Some(id),
        }
    }
}

/// A pointer event in screen coordinates.
///
/// `position` is `None` when the render target has no pointer position yet;
/// handlers abort the step without touching any state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub position: Option<Point>,
    pub button: MouseButton,
    pub target: PointerTarget,
}

impl PointerEvent {
    fn new(phase: PointerPhase, position: Point) -> Self {
        Self {
            phase,
            position: Some(position),
            button: MouseButton::Left,
            target: PointerTarget::Background,
        }
    }

    pub fn down(position: Point) -> Self {
        Self::new(PointerPhase::Down, position)
    }

    pub fn moved(position: Point) -> Self {
        Self::new(PointerPhase::Move, position)
    }

    pub fn up(position: Point) -> Self {
        Self::new(PointerPhase::Up, position)
    }

    pub fn double_click(position: Point) -> Self {
        Self::new(PointerPhase::DoubleClick, position)
    }

    /// Same event without a pointer position.
    pub fn without_position(mut self) -> Self {
        self.position = None;
        self
    }

    pub fn on(mut self, target: PointerTarget) -> Self {
        self.target = target;
        self
    }

    pub fn with_button(mut self, button: MouseButton) -> Self {
        self.button = button;
        self
    }
}

/// Double-click detection constants.
const DOUBLE_CLICK_TIME: Duration = Duration::from_millis(500);
const DOUBLE_CLICK_DISTANCE: f64 = 5.0;

/// Detects double-clicks for hosts whose surface only reports single presses.
#[derive(Debug, Clone, Default)]
pub struct ClickTracker {
    last_click: Option<(Instant, Point)>,
}

impl ClickTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a left press at `at`; returns true when it completes a double-click.
    pub fn register(&mut self, position: Point, at: Instant) -> bool {
        if let Some((last_time, last_pos)) = self.last_click {
            let elapsed = at.saturating_duration_since(last_time);
            if elapsed < DOUBLE_CLICK_TIME && position.distance(last_pos) < DOUBLE_CLICK_DISTANCE {
                // Reset so a triple click is not a second double-click
                self.last_click = None;
                return true;
            }
        }
        self.last_click = Some((at, position));
        false
    }

    /// Register a pointer event, returning the synthesized double-click if any.
    pub fn observe(&mut self, event: &PointerEvent, at: Instant) -> Option<PointerEvent> {
        if event.phase != PointerPhase::Down || event.button != MouseButton::Left {
            return None;
        }
        let position = event.position?;
        self.register(position, at).then(|| PointerEvent {
            phase: PointerPhase::DoubleClick,
            ..event.clone()
        })
    }
}
