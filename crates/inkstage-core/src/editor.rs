//! The editor: routes pointer events to the active tool.

use crate::camera::Viewport;
use crate::config::EngineConfig;
use crate::element::Element;
use crate::error::EngineError;
use crate::input::{PointerEvent, PointerPhase};
use crate::store::ElementStore;
use crate::tools::{ActiveTool, GestureState, ToolContext, ToolHandler, ToolKind, ToolOutcome};

/// Tool dispatcher and owner of the gesture state.
///
/// The element collection and the viewport are passed into every call, so
/// the editor never holds on to either.
#[derive(Debug, Clone)]
pub struct Editor {
    config: EngineConfig,
    tool_kind: ToolKind,
    tool: ActiveTool,
    gesture: GestureState,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Editor {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            tool_kind: ToolKind::Select,
            tool: ActiveTool::for_kind(ToolKind::Select),
            gesture: GestureState::default(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn tool(&self) -> ToolKind {
        self.tool_kind
    }

    /// Switch tools. The new handler starts fresh; the gesture state is kept.
    pub fn set_tool(&mut self, kind: ToolKind) {
        log::debug!("Switching tool {} -> {}", self.tool_kind, kind);
        self.tool_kind = kind;
        self.tool = ActiveTool::for_kind(kind);
    }

    /// Switch tools by id; unknown ids select the select tool.
    pub fn set_tool_by_name(&mut self, id: &str) {
        self.set_tool(ToolKind::parse_or_select(id));
    }

    /// Element being drawn or transformed, for the renderer.
    pub fn preview(&self) -> Option<&Element> {
        self.gesture.preview.as_ref().map(|preview| &preview.element)
    }

    pub fn is_drawing(&self) -> bool {
        self.gesture.drawing
    }

    /// The pen cursor is within closing distance of the first point.
    pub fn is_closing_path(&self) -> bool {
        self.gesture.closing
    }

    /// Process one pointer event against `store` and `viewport`.
    pub fn handle_pointer(
        &mut self,
        event: &PointerEvent,
        store: &mut dyn ElementStore,
        viewport: &mut dyn Viewport,
    ) -> ToolOutcome {
        if event.position.is_none() {
            log::debug!("{} for {:?}", EngineError::NoPointerPosition, event.phase);
        }
        let mut ctx = ToolContext {
            gesture: &mut self.gesture,
            store,
            viewport,
            config: &self.config,
        };
        let outcome = match event.phase {
            PointerPhase::Down => self.tool.pointer_down(event, &mut ctx),
            PointerPhase::Move => self.tool.pointer_move(event, &mut ctx),
            PointerPhase::Up => self.tool.pointer_up(event, &mut ctx),
            PointerPhase::DoubleClick => self.tool.double_click(event, &mut ctx),
        };

        if let ToolOutcome::SwitchTool(kind) = outcome {
            self.set_tool(kind);
        }
        outcome
    }
}
