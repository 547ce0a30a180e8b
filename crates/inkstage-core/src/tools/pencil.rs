//! Freehand pencil tool.

use super::draw::{Finish, finish_drawing, start_path};
use super::{ToolContext, ToolHandler, ToolOutcome};
use crate::element::{ElementKind, ElementPatch};
use crate::input::PointerEvent;

/// Records every pointer position between down and up.
#[derive(Debug, Clone, Default)]
pub struct PencilTool;

impl PencilTool {
    pub fn new() -> Self {
        Self
    }
}

impl ToolHandler for PencilTool {
    fn pointer_down(&mut self, event: &PointerEvent, ctx: &mut ToolContext<'_>) -> ToolOutcome {
        let Some(pos) = ctx.canvas_point(event) else {
            return ToolOutcome::Continue;
        };
        start_path(ctx, ElementKind::Pencil, vec![pos]);
        ctx.deselect();
        ToolOutcome::Continue
    }

    fn pointer_move(&mut self, event: &PointerEvent, ctx: &mut ToolContext<'_>) -> ToolOutcome {
        let Some(pos) = ctx.canvas_point(event) else {
            return ToolOutcome::Continue;
        };
        if ctx.gesture.preview_of(ElementKind::Pencil).is_none() {
            return ToolOutcome::Continue;
        }
        if let Some(preview) = ctx.gesture.preview.as_mut() {
            let mut points = preview.element.points().to_vec();
            points.push(pos);
            preview.apply(&ElementPatch::new().points(points));
        }
        ToolOutcome::Continue
    }

    fn pointer_up(&mut self, _event: &PointerEvent, ctx: &mut ToolContext<'_>) -> ToolOutcome {
        if ctx.gesture.preview_of(ElementKind::Pencil).is_none() {
            return ToolOutcome::Continue;
        }
        finish_drawing(ctx, Finish::KeepAll)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ElementStore;
    use crate::tools::test_support::Harness;
    use kurbo::Point;

    #[test]
    fn test_stroke_commits_all_points() {
        let mut h = Harness::new();
        let mut tool = PencilTool::new();

        tool.pointer_down(&PointerEvent::down(Point::new(10.0, 10.0)), &mut h.ctx());
        tool.pointer_move(&PointerEvent::moved(Point::new(20.0, 20.0)), &mut h.ctx());
        tool.pointer_move(&PointerEvent::moved(Point::new(30.0, 10.0)), &mut h.ctx());
        assert_eq!(h.preview_points().len(), 3);

        let outcome = tool.pointer_up(&PointerEvent::up(Point::new(30.0, 10.0)), &mut h.ctx());
        let ToolOutcome::Committed(id) = outcome.clone() else {
            panic!("Expected commit, got {outcome:?}");
        };
        let element = h.store.get_element(&id).unwrap();
        assert_eq!(element.position, Point::new(10.0, 10.0));
        assert!((element.width() - 20.0).abs() < f64::EPSILON);
        assert!((element.height() - 10.0).abs() < f64::EPSILON);
        assert_eq!(
            element.points(),
            &[Point::new(0.0, 0.0), Point::new(10.0, 10.0), Point::new(20.0, 0.0)]
        );
    }

    #[test]
    fn test_single_point_is_discarded() {
        let mut h = Harness::new();
        let mut tool = PencilTool::new();

        tool.pointer_down(&PointerEvent::down(Point::new(10.0, 10.0)), &mut h.ctx());
        let outcome = tool.pointer_up(&PointerEvent::up(Point::new(10.0, 10.0)), &mut h.ctx());
        assert_eq!(outcome, ToolOutcome::Discarded);
        assert!(h.store.is_empty());
        assert!(!h.gesture.drawing);
    }

    #[test]
    fn test_move_without_position_is_ignored() {
        let mut h = Harness::new();
        let mut tool = PencilTool::new();

        tool.pointer_down(&PointerEvent::down(Point::new(10.0, 10.0)), &mut h.ctx());
        tool.pointer_move(&PointerEvent::moved(Point::ZERO).without_position(), &mut h.ctx());
        assert_eq!(h.preview_points(), vec![Point::new(10.0, 10.0)]);
    }

    #[test]
    fn test_move_before_down_does_nothing() {
        let mut h = Harness::new();
        let mut tool = PencilTool::new();
        tool.pointer_move(&PointerEvent::moved(Point::new(1.0, 1.0)), &mut h.ctx());
        assert!(h.gesture.preview.is_none());
        assert_eq!(tool.pointer_up(&PointerEvent::up(Point::ZERO), &mut h.ctx()), ToolOutcome::Continue);
    }
}
