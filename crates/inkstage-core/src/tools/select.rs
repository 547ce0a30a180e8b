//! Select tool: selection, text edit entry and transform gestures.

use super::{Preview, ToolContext, ToolHandler, ToolOutcome};
use crate::element::{Element, ElementId, ElementPatch};
use crate::error::{EngineError, EngineResult};
use crate::input::{PointerEvent, PointerTarget};
use crate::transform::{DragGesture, ResizeGesture, RotateGesture, TransformGesture};
use kurbo::Point;

/// A transform in progress, against the element as it was at pointer-down.
#[derive(Debug, Clone)]
struct ActiveTransform {
    gesture: TransformGesture,
    start: Element,
}

/// Selects elements and drives drag, resize and rotate on them.
#[derive(Debug, Clone, Default)]
pub struct SelectTool {
    transform: Option<ActiveTransform>,
}

impl SelectTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_transforming(&self) -> bool {
        self.transform.is_some()
    }

    /// Select `id`, leaving text edit on a different selected element first.
    fn select(ctx: &mut ToolContext<'_>, id: &ElementId) {
        if ctx.store.selected_id() != Some(id) {
            ctx.leave_text_edit();
            ctx.store.select_element(Some(id.clone()));
        }
    }

    fn begin(
        &mut self,
        ctx: &mut ToolContext<'_>,
        target: &PointerTarget,
        pos: Point,
    ) -> EngineResult<()> {
        let Some(id) = target.element_id() else {
            return Ok(());
        };
        let element = ctx
            .store
            .get_element(id)
            .cloned()
            .ok_or_else(|| EngineError::ElementNotFound(id.clone()))?;
        Self::select(ctx, id);
        if element.locked {
            return Err(EngineError::ElementLocked(id.clone()));
        }

        let gesture = match target {
            PointerTarget::Background => return Ok(()),
            PointerTarget::Element(_) => TransformGesture::Drag(DragGesture::new(&element, pos)),
            PointerTarget::Handle(_, handle) => {
                TransformGesture::Resize(ResizeGesture::new(&element, *handle, pos, ctx.config.min_resize))
            }
            PointerTarget::RotateKnob(_) => TransformGesture::Rotate(RotateGesture::new(&element, pos)),
        };
        ctx.gesture.preview = Some(Preview::existing(element.clone()));
        ctx.gesture.drawing = true;
        self.transform = Some(ActiveTransform {
            gesture,
            start: element,
        });
        Ok(())
    }

    fn track(&self, ctx: &mut ToolContext<'_>, pos: Point) {
        let (Some(transform), Some(preview)) = (&self.transform, ctx.gesture.preview.as_mut()) else {
            return;
        };
        preview.element = transform.start.update(&transform.gesture.patch_at(pos));
    }
}

impl ToolHandler for SelectTool {
    fn pointer_down(&mut self, event: &PointerEvent, ctx: &mut ToolContext<'_>) -> ToolOutcome {
        let Some(pos) = ctx.canvas_point(event) else {
            return ToolOutcome::Continue;
        };
        self.transform = None;

        if event.target == PointerTarget::Background {
            ctx.deselect();
            return ToolOutcome::Continue;
        }
        if let Err(err) = self.begin(ctx, &event.target, pos) {
            log::warn!("Cannot transform: {}", err);
        }
        ToolOutcome::Continue
    }

    fn pointer_move(&mut self, event: &PointerEvent, ctx: &mut ToolContext<'_>) -> ToolOutcome {
        if let Some(pos) = ctx.canvas_point(event) {
            self.track(ctx, pos);
        }
        ToolOutcome::Continue
    }

    fn pointer_up(&mut self, event: &PointerEvent, ctx: &mut ToolContext<'_>) -> ToolOutcome {
        let Some(transform) = self.transform.take() else {
            return ToolOutcome::Continue;
        };
        let pos = ctx.canvas_point(event);
        let Some(preview) = ctx.gesture.preview.as_mut() else {
            ctx.gesture.reset();
            return ToolOutcome::Continue;
        };
        if let Some(pos) = pos {
            preview.element = transform.start.update(&transform.gesture.patch_at(pos));
        }

        // A click without movement leaves the collection alone
        if ElementPatch::geometry_of(&preview.element) == ElementPatch::geometry_of(&transform.start) {
            ctx.gesture.reset();
            return ToolOutcome::Continue;
        }
        ctx.commit()
    }

    fn double_click(&mut self, event: &PointerEvent, ctx: &mut ToolContext<'_>) -> ToolOutcome {
        if event.position.is_none() {
            return ToolOutcome::Continue;
        }
        let Some(id) = event.target.element_id() else {
            return ToolOutcome::Continue;
        };
        let Some(element) = ctx.store.get_element(id) else {
            return ToolOutcome::Continue;
        };
        if !element.kind().has_text() {
            return ToolOutcome::Continue;
        }
        Self::select(ctx, id);
        if let Err(err) = ctx.store.update_element(id, &ElementPatch::new().editing(true)) {
            log::warn!("Cannot enter text edit: {}", err);
        }
        ToolOutcome::Continue
    }
}
