//! Drag-to-size creation tool for shapes, text-shapes, text and images.

use super::{Preview, ToolContext, ToolHandler, ToolKind, ToolOutcome};
use crate::element::{Element, ElementKind, ElementPatch};
use crate::input::PointerEvent;
use kurbo::{Point, Rect};

/// Creates an element of one kind spanning the drag rectangle.
#[derive(Debug, Clone)]
pub struct ShapeTool {
    kind: ElementKind,
    start: Option<Point>,
}

impl ShapeTool {
    pub fn new(kind: ElementKind) -> Self {
        Self { kind, start: None }
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }
}

impl ToolHandler for ShapeTool {
    fn pointer_down(&mut self, event: &PointerEvent, ctx: &mut ToolContext<'_>) -> ToolOutcome {
        let Some(pos) = ctx.canvas_point(event) else {
            return ToolOutcome::Continue;
        };

        self.start = Some(pos);
        let element = Element::create_default(self.kind, pos, None).update(&ElementPatch::new().size(0.0, 0.0));
        ctx.gesture.preview = Some(Preview::fresh(element));
        ctx.gesture.drawing = true;
        ctx.gesture.closing = false;
        ctx.deselect();
        ToolOutcome::Continue
    }

    fn pointer_move(&mut self, event: &PointerEvent, ctx: &mut ToolContext<'_>) -> ToolOutcome {
        let Some(start) = self.start else {
            return ToolOutcome::Continue;
        };
        if !ctx.gesture.drawing {
            return ToolOutcome::Continue;
        }
        let Some(pos) = ctx.canvas_point(event) else {
            return ToolOutcome::Continue;
        };
        if let Some(preview) = ctx.gesture.preview.as_mut() {
            let span = Rect::from_points(start, pos);
            preview.apply(
                &ElementPatch::new()
                    .position(span.origin())
                    .size(span.width(), span.height()),
            );
        }
        ToolOutcome::Continue
    }

    fn pointer_up(&mut self, event: &PointerEvent, ctx: &mut ToolContext<'_>) -> ToolOutcome {
        let start = self.start.take();
        if !ctx.gesture.drawing || ctx.gesture.preview.is_none() {
            return ToolOutcome::Continue;
        }
        let (Some(start), Some(pos)) = (start, ctx.canvas_point(event)) else {
            return ctx.discard();
        };

        if start.distance(pos) < ctx.config.click_threshold {
            ctx.discard();
            return ToolOutcome::SwitchTool(ToolKind::Select);
        }
        ctx.commit()
    }
}
