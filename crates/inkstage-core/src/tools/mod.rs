//! Tool system: per-tool pointer handlers behind a closed enum.

mod draw;
mod hand;
mod pen;
mod pencil;
mod preview;
mod select;
mod shape;

pub use hand::HandTool;
pub use pen::PenTool;
pub use pencil::PencilTool;
pub use preview::{Preview, PreviewOrigin};
pub use select::SelectTool;
pub use shape::ShapeTool;

use crate::camera::{Viewport, pointer_to_canvas};
use crate::config::{DrawingStyle, EngineConfig};
use crate::element::{ElementId, ElementKind, ElementPatch};
use crate::error::EngineError;
use crate::input::PointerEvent;
use crate::store::ElementStore;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ToolKind {
    #[default]
    Select,
    Rectangle,
    Circle,
    Triangle,
    Star,
    Text,
    Image,
    ChatBubble,
    ArrowLeft,
    ArrowRight,
    RectangleText,
    CircleText,
    Pencil,
    Pen,
    Hand,
}

impl ToolKind {
    pub const ALL: [ToolKind; 15] = [
        ToolKind::Select,
        ToolKind::Rectangle,
        ToolKind::Circle,
        ToolKind::Triangle,
        ToolKind::Star,
        ToolKind::Text,
        ToolKind::Image,
        ToolKind::ChatBubble,
        ToolKind::ArrowLeft,
        ToolKind::ArrowRight,
        ToolKind::RectangleText,
        ToolKind::CircleText,
        ToolKind::Pencil,
        ToolKind::Pen,
        ToolKind::Hand,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ToolKind::Select => "select",
            ToolKind::Hand => "hand",
            other => other.element_kind().map_or("select", ElementKind::as_str),
        }
    }

    /// Element kind this tool creates, if any.
    pub fn element_kind(self) -> Option<ElementKind> {
        match self {
            ToolKind::Select | ToolKind::Hand => None,
            ToolKind::Rectangle => Some(ElementKind::Rectangle),
            ToolKind::Circle => Some(ElementKind::Circle),
            ToolKind::Triangle => Some(ElementKind::Triangle),
            ToolKind::Star => Some(ElementKind::Star),
            ToolKind::Text => Some(ElementKind::Text),
            ToolKind::Image => Some(ElementKind::Image),
            ToolKind::ChatBubble => Some(ElementKind::ChatBubble),
            ToolKind::ArrowLeft => Some(ElementKind::ArrowLeft),
            ToolKind::ArrowRight => Some(ElementKind::ArrowRight),
            ToolKind::RectangleText => Some(ElementKind::RectangleText),
            ToolKind::CircleText => Some(ElementKind::CircleText),
            ToolKind::Pencil => Some(ElementKind::Pencil),
            ToolKind::Pen => Some(ElementKind::Pen),
        }
    }

    /// Parse a tool id, degrading to `Select` for ids no tool answers to.
    pub fn parse_or_select(id: &str) -> ToolKind {
        id.parse().unwrap_or_else(|err: EngineError| {
            log::warn!("{}, falling back to select", err);
            ToolKind::Select
        })
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ToolKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| EngineError::UnknownTool(s.to_string()))
    }
}

/// Gesture state owned by the dispatcher. Survives tool switches.
#[derive(Debug, Clone, Default)]
pub struct GestureState {
    /// Element under construction or transformation.
    pub preview: Option<Preview>,
    /// A gesture is in progress.
    pub drawing: bool,
    /// The pen cursor is close enough to the first point to close the path.
    pub closing: bool,
}

impl GestureState {
    /// Drop the preview and clear both flags.
    pub fn reset(&mut self) {
        self.preview = None;
        self.drawing = false;
        self.closing = false;
    }

    /// Preview of `kind` while a gesture is in progress.
    pub fn preview_of(&self, kind: ElementKind) -> Option<&Preview> {
        self.preview
            .as_ref()
            .filter(|preview| self.drawing && preview.element.kind() == kind)
    }
}

/// What a handler asks of the dispatcher after an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolOutcome {
    /// Nothing to report.
    Continue,
    /// The preview was promoted into the collection.
    Committed(ElementId),
    /// The preview was dropped without touching the collection.
    Discarded,
    /// Rebuild the active handler for another tool.
    SwitchTool(ToolKind),
}

/// Everything a handler may touch while processing one event.
pub struct ToolContext<'a> {
    pub gesture: &'a mut GestureState,
    pub store: &'a mut dyn ElementStore,
    pub viewport: &'a mut dyn Viewport,
    pub config: &'a EngineConfig,
}

impl ToolContext<'_> {
    /// Canvas-space pointer position, `None` when the event carries none.
    pub fn canvas_point(&self, event: &PointerEvent) -> Option<Point> {
        pointer_to_canvas(&*self.viewport, event.position)
    }

    pub fn drawing_style(&self) -> Option<DrawingStyle> {
        self.config.drawing_style
    }

    /// Take the selected element out of text edit mode.
    pub fn leave_text_edit(&mut self) {
        let Some(selected) = self.store.selected_element() else {
            return;
        };
        if !selected.is_editing() {
            return;
        }
        let id = selected.id().clone();
        if let Err(err) = self.store.update_element(&id, &ElementPatch::new().editing(false)) {
            log::warn!("Failed to leave text edit: {}", err);
        }
    }

    /// Leave text edit and clear the selection.
    pub fn deselect(&mut self) {
        self.leave_text_edit();
        self.store.select_element(None);
    }

    /// Drop the preview without committing it.
    pub fn discard(&mut self) -> ToolOutcome {
        if let Some(preview) = &self.gesture.preview {
            log::debug!("Discarding {} preview", preview.element.kind());
        }
        self.gesture.reset();
        ToolOutcome::Discarded
    }

    /// Promote the preview into the collection and end the gesture.
    pub fn commit(&mut self) -> ToolOutcome {
        let Some(preview) = self.gesture.preview.take() else {
            self.gesture.reset();
            return ToolOutcome::Continue;
        };
        self.gesture.reset();
        match preview.commit(&mut *self.store) {
            Ok(id) => ToolOutcome::Committed(id),
            Err(err) => {
                log::warn!("Commit failed: {}", err);
                ToolOutcome::Discarded
            }
        }
    }
}

/// Pointer handling shared by all tools.
pub trait ToolHandler {
    fn pointer_down(&mut self, event: &PointerEvent, ctx: &mut ToolContext<'_>) -> ToolOutcome;
    fn pointer_move(&mut self, event: &PointerEvent, ctx: &mut ToolContext<'_>) -> ToolOutcome;
    fn pointer_up(&mut self, event: &PointerEvent, ctx: &mut ToolContext<'_>) -> ToolOutcome;

    fn double_click(&mut self, _event: &PointerEvent, _ctx: &mut ToolContext<'_>) -> ToolOutcome {
        ToolOutcome::Continue
    }
}

/// The handler for the current tool.
#[derive(Debug, Clone)]
pub enum ActiveTool {
    Select(SelectTool),
    Shape(ShapeTool),
    Pencil(PencilTool),
    Pen(PenTool),
    Hand(HandTool),
}

impl ActiveTool {
    /// Build a fresh handler for `kind`.
    pub fn for_kind(kind: ToolKind) -> Self {
        match kind {
            ToolKind::Select => ActiveTool::Select(SelectTool::new()),
            ToolKind::Hand => ActiveTool::Hand(HandTool::new()),
            ToolKind::Pencil => ActiveTool::Pencil(PencilTool::new()),
            ToolKind::Pen => ActiveTool::Pen(PenTool::new()),
            other => match other.element_kind() {
                Some(element_kind) => ActiveTool::Shape(ShapeTool::new(element_kind)),
                None => ActiveTool::Select(SelectTool::new()),
            },
        }
    }

    fn handler(&mut self) -> &mut dyn ToolHandler {
        match self {
            ActiveTool::Select(tool) => tool,
            ActiveTool::Shape(tool) => tool,
            ActiveTool::Pencil(tool) => tool,
            ActiveTool::Pen(tool) => tool,
            ActiveTool::Hand(tool) => tool,
        }
    }
}

impl ToolHandler for ActiveTool {
    fn pointer_down(&mut self, event: &PointerEvent, ctx: &mut ToolContext<'_>) -> ToolOutcome {
        self.handler().pointer_down(event, ctx)
    }

    fn pointer_move(&mut self, event: &PointerEvent, ctx: &mut ToolContext<'_>) -> ToolOutcome {
        self.handler().pointer_move(event, ctx)
    }

    fn pointer_up(&mut self, event: &PointerEvent, ctx: &mut ToolContext<'_>) -> ToolOutcome {
        self.handler().pointer_up(event, ctx)
    }

    fn double_click(&mut self, event: &PointerEvent, ctx: &mut ToolContext<'_>) -> ToolOutcome {
        self.handler().double_click(event, ctx)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_kind_parse() {
        assert_eq!("pen".parse::<ToolKind>().unwrap(), ToolKind::Pen);
        assert_eq!("chat-bubble".parse::<ToolKind>().unwrap(), ToolKind::ChatBubble);
        assert_eq!("hand".parse::<ToolKind>().unwrap(), ToolKind::Hand);
        assert!(matches!("laser".parse::<ToolKind>(), Err(EngineError::UnknownTool(_))));
    }

    #[test]
    fn test_unknown_tool_falls_back_to_select() {
        assert_eq!(ToolKind::parse_or_select("eraser"), ToolKind::Select);
        assert_eq!(ToolKind::parse_or_select("star"), ToolKind::Star);
    }

    #[test]
    fn test_every_tool_roundtrips_through_its_id() {
        for kind in ToolKind::ALL {
            assert_eq!(kind.as_str().parse::<ToolKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_dispatch_variants() {
        assert!(matches!(ActiveTool::for_kind(ToolKind::Select), ActiveTool::Select(_)));
        assert!(matches!(ActiveTool::for_kind(ToolKind::Hand), ActiveTool::Hand(_)));
        assert!(matches!(ActiveTool::for_kind(ToolKind::Pencil), ActiveTool::Pencil(_)));
        assert!(matches!(ActiveTool::for_kind(ToolKind::Pen), ActiveTool::Pen(_)));
        for kind in [ToolKind::Rectangle, ToolKind::Text, ToolKind::Image, ToolKind::CircleText] {
            match ActiveTool::for_kind(kind) {
                ActiveTool::Shape(tool) => assert_eq!(Some(tool.kind()), kind.element_kind()),
                other => panic!("Expected shape tool, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_preview_of_requires_drawing() {
        let mut gesture = GestureState::default();
        gesture.preview = Some(Preview::fresh(crate::element::Element::create_default(
            ElementKind::Pen,
            Point::ZERO,
            None,
        )));
        assert!(gesture.preview_of(ElementKind::Pen).is_none());
        gesture.drawing = true;
        assert!(gesture.preview_of(ElementKind::Pen).is_some());
        assert!(gesture.preview_of(ElementKind::Pencil).is_none());
        gesture.reset();
        assert!(gesture.preview.is_none());
        assert!(!gesture.drawing);
    }
}
