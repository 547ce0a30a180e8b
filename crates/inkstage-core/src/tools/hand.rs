//! Hand tool: pans the stage.

use super::{ToolContext, ToolHandler, ToolOutcome};
use crate::input::PointerEvent;
use kurbo::Point;

/// Feeds screen-space pointer deltas to the viewport pan.
#[derive(Debug, Clone, Default)]
pub struct HandTool {
    /// Last screen position while grabbing.
    last: Option<Point>,
}

impl HandTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_grabbing(&self) -> bool {
        self.last.is_some()
    }
}

impl ToolHandler for HandTool {
    fn pointer_down(&mut self, event: &PointerEvent, _ctx: &mut ToolContext<'_>) -> ToolOutcome {
        if event.position.is_some() {
            self.last = event.position;
        }
        ToolOutcome::Continue
    }

    fn pointer_move(&mut self, event: &PointerEvent, ctx: &mut ToolContext<'_>) -> ToolOutcome {
        let (Some(last), Some(current)) = (self.last, event.position) else {
            return ToolOutcome::Continue;
        };
        self.last = Some(current);
        let pan = ctx.viewport.pan();
        ctx.viewport.set_pan(pan + (current - last));
        ToolOutcome::Continue
    }

    fn pointer_up(&mut self, _event: &PointerEvent, _ctx: &mut ToolContext<'_>) -> ToolOutcome {
        self.last = None;
        ToolOutcome::Continue
    }
}
