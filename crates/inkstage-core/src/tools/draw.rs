//! Shared start and commit steps of the path tools.

use super::{Preview, ToolContext, ToolOutcome};
use crate::element::{Element, ElementKind, ElementPatch};
use crate::error::EngineError;
use kurbo::Point;

/// How the last preview point is treated when a path is finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Finish {
    /// Every point was placed by the user.
    KeepAll,
    /// The last point is the rubber band following the cursor; drop it.
    DropRubberBand,
    /// Close the path: the last point becomes the first.
    Close,
}

/// Fresh path preview at the canvas origin, styled from the configuration.
pub(crate) fn start_path(ctx: &mut ToolContext<'_>, kind: ElementKind, points: Vec<Point>) {
    let mut patch = ElementPatch::new().position(Point::ZERO).points(points);
    if let Some(style) = ctx.drawing_style() {
        patch = patch.stroke(style.stroke, style.stroke_width);
    }
    let element = Element::create_default(kind, Point::ZERO, None).update(&patch);
    ctx.gesture.preview = Some(Preview::fresh(element));
    ctx.gesture.drawing = true;
    ctx.gesture.closing = false;
}

/// Normalize and commit the path preview.
///
/// Paths left with fewer than two points are dropped silently. The gesture
/// flags are cleared in every outcome.
pub(crate) fn finish_drawing(ctx: &mut ToolContext<'_>, finish: Finish) -> ToolOutcome {
    let Some(preview) = ctx.gesture.preview.as_mut() else {
        ctx.gesture.reset();
        return ToolOutcome::Continue;
    };

    let mut points = preview.element.points().to_vec();
    match finish {
        Finish::KeepAll => {}
        Finish::DropRubberBand => {
            points.pop();
        }
        Finish::Close => {
            if let Some(&first) = points.first() {
                if let Some(last) = points.last_mut() {
                    *last = first;
                }
            }
        }
    }

    if points.len() < 2 {
        log::debug!("{}", EngineError::InsufficientGeometry { points: points.len() });
        return ctx.discard();
    }

    let min_extent = ctx.config.min_path_extent;
    let element = preview
        .element
        .update(&ElementPatch::new().points(points))
        .normalize(min_extent);
    preview.element = element;
    ctx.commit()
}
