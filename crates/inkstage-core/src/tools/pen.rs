//! Click-to-vertex pen tool with path closing.

use super::draw::{Finish, finish_drawing, start_path};
use super::{ToolContext, ToolHandler, ToolOutcome};
use crate::element::{ElementKind, ElementPatch};
use crate::input::PointerEvent;
use kurbo::Point;

/// Places one anchor per click. The last preview point is a rubber band
/// that follows the cursor until the next click fixes it.
#[derive(Debug, Clone, Default)]
pub struct PenTool;

impl PenTool {
    pub fn new() -> Self {
        Self
    }
}

/// The closing hint needs at least two fixed anchors plus the rubber band.
fn can_close(points: &[Point]) -> bool {
    points.len() >= 3
}

impl ToolHandler for PenTool {
    fn pointer_down(&mut self, event: &PointerEvent, ctx: &mut ToolContext<'_>) -> ToolOutcome {
        let Some(pos) = ctx.canvas_point(event) else {
            return ToolOutcome::Continue;
        };
        ctx.deselect();

        let Some(preview) = ctx.gesture.preview_of(ElementKind::Pen) else {
            start_path(ctx, ElementKind::Pen, vec![pos, pos]);
            return ToolOutcome::Continue;
        };

        let mut points = preview.element.points().to_vec();
        if let Some(&first) = points.first() {
            if pos.distance(first) < ctx.config.close_radius {
                return finish_drawing(ctx, Finish::Close);
            }
        }

        // Fix the rubber band at the click and start a new one
        if let Some(last) = points.last_mut() {
            *last = pos;
        }
        points.push(pos);
        if let Some(preview) = ctx.gesture.preview.as_mut() {
            preview.apply(&ElementPatch::new().points(points));
        }
        ToolOutcome::Continue
    }

    fn pointer_move(&mut self, event: &PointerEvent, ctx: &mut ToolContext<'_>) -> ToolOutcome {
        let Some(pos) = ctx.canvas_point(event) else {
            return ToolOutcome::Continue;
        };
        let Some(preview) = ctx.gesture.preview_of(ElementKind::Pen) else {
            return ToolOutcome::Continue;
        };

        let mut points = preview.element.points().to_vec();
        let Some(&first) = points.first() else {
            return ToolOutcome::Continue;
        };
        let closing = can_close(&points) && pos.distance(first) < ctx.config.close_radius;
        if let Some(last) = points.last_mut() {
            *last = if closing { first } else { pos };
        }

        ctx.gesture.closing = closing;
        if let Some(preview) = ctx.gesture.preview.as_mut() {
            preview.apply(&ElementPatch::new().points(points));
        }
        ToolOutcome::Continue
    }

    fn pointer_up(&mut self, _event: &PointerEvent, _ctx: &mut ToolContext<'_>) -> ToolOutcome {
        ToolOutcome::Continue
    }

    fn double_click(&mut self, event: &PointerEvent, ctx: &mut ToolContext<'_>) -> ToolOutcome {
        if event.position.is_none() || ctx.gesture.preview_of(ElementKind::Pen).is_none() {
            return ToolOutcome::Continue;
        }
        finish_drawing(ctx, Finish::DropRubberBand)
    }
}
