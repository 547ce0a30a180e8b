//! Procedural outlines for polygons, stars and the other element kinds.

use crate::element::{Element, ElementKind, ShapeAttrs};
use kurbo::{Arc, BezPath, Ellipse, Point, Rect, RoundedRect, Shape, SvgArc, Vec2};
use std::f64::consts::{FRAC_PI_2, PI};
use std::fmt::Write as _;

/// Accuracy used when converting arcs and ellipses to Béziers.
const TOLERANCE: f64 = 0.1;

/// Arc direction in SVG terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sweep {
    Clockwise,
    CounterClockwise,
}

impl Sweep {
    fn flag(self) -> u8 {
        match self {
            Sweep::Clockwise => 1,
            Sweep::CounterClockwise => 0,
        }
    }
}

/// One drawing command of an outline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    MoveTo(Point),
    LineTo(Point),
    /// Circular arc from the current point to `to`.
    ArcTo { radius: f64, sweep: Sweep, to: Point },
    Close,
}

/// A closed outline as a list of segments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outline {
    pub segments: Vec<Segment>,
}

impl Outline {
    /// Convert to a kurbo path, arcs approximated with cubic Béziers.
    pub fn to_bez_path(&self) -> BezPath {
        let mut path = BezPath::new();
        let mut current = Point::ZERO;
        for segment in &self.segments {
            match *segment {
                Segment::MoveTo(p) => {
                    path.move_to(p);
                    current = p;
                }
                Segment::LineTo(p) => {
                    path.line_to(p);
                    current = p;
                }
                Segment::ArcTo { radius, sweep, to } => {
                    let svg_arc = SvgArc {
                        from: current,
                        to,
                        radii: Vec2::new(radius, radius),
                        x_rotation: 0.0,
                        large_arc: false,
                        sweep: sweep == Sweep::Clockwise,
                    };
                    match Arc::from_svg_arc(&svg_arc) {
                        Some(arc) => path.extend(arc.append_iter(TOLERANCE)),
                        // Degenerate arcs collapse to a straight line
                        None => path.line_to(to),
                    }
                    current = to;
                }
                Segment::Close => path.close_path(),
            }
        }
        path
    }

    /// SVG path data (`M`, `L`, `A`, `Z` commands).
    pub fn to_svg(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            if !out.is_empty() {
                out.push(' ');
            }
            // Writing into a String cannot fail
            let _ = match *segment {
                Segment::MoveTo(p) => write!(out, "M {} {}", p.x, p.y),
                Segment::LineTo(p) => write!(out, "L {} {}", p.x, p.y),
                Segment::ArcTo { radius, sweep, to } => write!(
                    out,
                    "A {radius} {radius} 0 0 {} {} {}",
                    sweep.flag(),
                    to.x,
                    to.y
                ),
                Segment::Close => write!(out, "Z"),
            };
        }
        out
    }
}

/// Vertices of a regular polygon, first vertex at the top.
///
/// `sides` is clamped to at least 3.
pub fn polygon_vertices(center: Point, radius: f64, sides: u32) -> Vec<Point> {
    let n = sides.max(3);
    (0..n)
        .map(|i| {
            let angle = f64::from(i) * 2.0 * PI / f64::from(n) - FRAC_PI_2;
            center + Vec2::from_angle(angle) * radius
        })
        .collect()
}

/// Vertices of a star: `2 * points` vertices alternating outer and inner radius.
///
/// A point count of zero selects the default of five points.
pub fn star_vertices(center: Point, outer_radius: f64, inner_ratio: f64, points: u32) -> Vec<Point> {
    let n = if points == 0 {
        ShapeAttrs::DEFAULT_STAR_POINTS
    } else {
        points.max(2)
    };
    let inner_radius = outer_radius * inner_ratio;
    (0..2 * n)
        .map(|i| {
            let angle = f64::from(i) * PI / f64::from(n) - FRAC_PI_2;
            let radius = if i % 2 == 0 { outer_radius } else { inner_radius };
            center + Vec2::from_angle(angle) * radius
        })
        .collect()
}

/// Closed outline through `vertices` with corners rounded by `corner_radius`.
///
/// `sweep_for(i)` picks the arc direction at vertex `i`. A zero radius gives a
/// sharp polyline.
pub fn rounded_outline(
    vertices: &[Point],
    corner_radius: f64,
    sweep_for: impl Fn(usize) -> Sweep,
) -> Outline {
    let mut segments = Vec::with_capacity(vertices.len() * 2 + 2);
    let n = vertices.len();
    if n == 0 {
        return Outline { segments };
    }

    if corner_radius <= 0.0 {
        segments.push(Segment::MoveTo(vertices[0]));
        segments.extend(vertices[1..].iter().map(|&p| Segment::LineTo(p)));
        segments.push(Segment::Close);
        return Outline { segments };
    }

    for i in 0..n {
        let current = vertices[i];
        let prev = vertices[(i + n - 1) % n];
        let next = vertices[(i + 1) % n];

        let to_prev = prev - current;
        let to_next = next - current;
        let dist_prev = to_prev.hypot();
        let dist_next = to_next.hypot();

        let (start, end, radius) = if dist_prev <= f64::EPSILON || dist_next <= f64::EPSILON {
            (current, current, 0.0)
        } else {
            let dir_prev = to_prev / dist_prev;
            let dir_next = to_next / dist_next;
            let half_angle = dir_prev.dot(dir_next).clamp(-1.0, 1.0).acos() / 2.0;

            let max_dist = dist_prev.min(dist_next) * 0.5;
            let mut tangent_dist = corner_radius / half_angle.tan();
            let mut radius = corner_radius;
            if tangent_dist > max_dist {
                tangent_dist = max_dist;
                radius = tangent_dist * half_angle.tan();
            }
            (
                current + dir_prev * tangent_dist,
                current + dir_next * tangent_dist,
                radius,
            )
        };

        if i == 0 {
            segments.push(Segment::MoveTo(start));
        }
        segments.push(Segment::LineTo(start));
        segments.push(Segment::ArcTo {
            radius,
            sweep: sweep_for(i),
            to: end,
        });
    }
    segments.push(Segment::Close);
    Outline { segments }
}

/// Rounded regular polygon; every corner sweeps clockwise.
pub fn polygon_outline(center: Point, radius: f64, sides: u32, corner_radius: f64) -> Outline {
    rounded_outline(&polygon_vertices(center, radius, sides), corner_radius, |_| Sweep::Clockwise)
}

/// Rounded star; outer corners sweep clockwise, inner corners counter-clockwise.
pub fn star_outline(
    center: Point,
    outer_radius: f64,
    inner_ratio: f64,
    points: u32,
    corner_radius: f64,
) -> Outline {
    rounded_outline(
        &star_vertices(center, outer_radius, inner_ratio, points),
        corner_radius,
        |i| if i % 2 == 0 { Sweep::Clockwise } else { Sweep::CounterClockwise },
    )
}

/// Element-local outline of an element, `None` for kinds without a fillable outline.
///
/// Polygons and stars are centered in the box with radius `min(w, h) / 2`.
pub fn element_outline(element: &Element) -> Option<BezPath> {
    let bounds = Rect::from_origin_size(Point::ZERO, element.size());
    let center = bounds.center();
    let radius = element.width().min(element.height()) / 2.0;
    let corner_radius = element.data().shape().map_or(0.0, |shape| shape.corner_radius);

    match element.kind() {
        ElementKind::Triangle => {
            let sides = element.data().shape().map_or(ShapeAttrs::DEFAULT_POLYGON_SIDES, |s| s.sides);
            Some(polygon_outline(center, radius, sides, corner_radius).to_bez_path())
        }
        ElementKind::Star => {
            let shape = element.data().shape()?;
            Some(
                star_outline(
                    center,
                    radius,
                    shape.star_inner_radius / 100.0,
                    shape.sides,
                    corner_radius,
                )
                .to_bez_path(),
            )
        }
        ElementKind::Circle | ElementKind::CircleText => {
            Some(Ellipse::from_rect(bounds).to_path(TOLERANCE))
        }
        ElementKind::Rectangle
        | ElementKind::RectangleText
        | ElementKind::ChatBubble
        | ElementKind::ArrowLeft
        | ElementKind::ArrowRight => {
            Some(RoundedRect::from_rect(bounds, corner_radius).to_path(TOLERANCE))
        }
        ElementKind::Pencil | ElementKind::Pen => {
            let points = element.points();
            let (first, rest) = points.split_first()?;
            let mut path = BezPath::new();
            path.move_to(*first);
            for p in rest {
                path.line_to(*p);
            }
            if points.len() > 2 && points.last() == Some(first) {
                path.close_path();
            }
            Some(path)
        }
        ElementKind::Text | ElementKind::Image => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementPatch;

    fn assert_point_close(a: Point, b: Point) {
        assert!((a - b).hypot() < 1e-9, "{a:?} != {b:?}");
    }

    #[test]
    fn test_polygon_starts_at_top() {
        let vertices = polygon_vertices(Point::new(50.0, 50.0), 50.0, 4);
        assert_eq!(vertices.len(), 4);
        assert_point_close(vertices[0], Point::new(50.0, 0.0));
        assert_point_close(vertices[1], Point::new(100.0, 50.0));
    }

    #[test]
    fn test_polygon_sides_clamped() {
        assert_eq!(polygon_vertices(Point::ZERO, 10.0, 1).len(), 3);
    }

    #[test]
    fn test_star_alternates_radius() {
        let center = Point::new(50.0, 50.0);
        let vertices = star_vertices(center, 50.0, 0.5, 5);
        assert_eq!(vertices.len(), 10);
        for (i, v) in vertices.iter().enumerate() {
            let expected = if i % 2 == 0 { 50.0 } else { 25.0 };
            assert!(((*v - center).hypot() - expected).abs() < 1e-9);
        }
        assert_eq!(star_vertices(center, 50.0, 0.5, 0).len(), 10);
    }

    #[test]
    fn test_sharp_outline() {
        let vertices = polygon_vertices(Point::new(50.0, 50.0), 50.0, 3);
        let outline = rounded_outline(&vertices, 0.0, |_| Sweep::Clockwise);
        // move + two lines + close
        assert_eq!(outline.segments.len(), 4);
        assert_eq!(outline.segments[0], Segment::MoveTo(vertices[0]));
        assert_eq!(outline.segments[3], Segment::Close);
        assert!(!outline.to_svg().contains('A'));
    }

    #[test]
    fn test_rounded_square_corners() {
        let square = [
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(100.0, 100.0),
            Point::new(0.0, 100.0),
        ];
        let outline = rounded_outline(&square, 10.0, |_| Sweep::Clockwise);
        // move + (line + arc) per vertex + close
        assert_eq!(outline.segments.len(), 10);

        match outline.segments[2] {
            Segment::ArcTo { radius, sweep, to } => {
                // Right angle: tangent distance equals the radius
                assert!((radius - 10.0).abs() < 1e-9);
                assert_eq!(sweep, Sweep::Clockwise);
                assert_point_close(to, Point::new(10.0, 0.0));
            }
            other => panic!("Expected arc, got {other:?}"),
        }
        match (outline.segments[0], outline.segments[1]) {
            (Segment::MoveTo(start), Segment::LineTo(line_end)) => {
                assert_point_close(start, Point::new(0.0, 10.0));
                assert_point_close(line_end, Point::new(0.0, 10.0));
            }
            other => panic!("Expected move then line, got {other:?}"),
        }
    }

    #[test]
    fn test_radius_clamped_to_half_edge() {
        let square = [
            Point::new(0.0, 0.0),
            Point::new(20.0, 0.0),
            Point::new(20.0, 20.0),
            Point::new(0.0, 20.0),
        ];
        let outline = rounded_outline(&square, 50.0, |_| Sweep::Clockwise);
        match outline.segments[2] {
            Segment::ArcTo { radius, .. } => assert!((radius - 10.0).abs() < 1e-9),
            other => panic!("Expected arc, got {other:?}"),
        }
    }

    #[test]
    fn test_star_sweep_alternates() {
        let outline = star_outline(Point::new(50.0, 50.0), 50.0, 0.5, 5, 4.0);
        let sweeps: Vec<Sweep> = outline
            .segments
            .iter()
            .filter_map(|s| match s {
                Segment::ArcTo { sweep, .. } => Some(*sweep),
                _ => None,
            })
            .collect();
        assert_eq!(sweeps.len(), 10);
        assert_eq!(sweeps[0], Sweep::Clockwise);
        assert_eq!(sweeps[1], Sweep::CounterClockwise);
        assert!(outline.to_svg().contains("A 4 4 0 0 0"));
    }

    #[test]
    fn test_bez_path_has_curves() {
        let outline = polygon_outline(Point::new(50.0, 50.0), 50.0, 3, 8.0);
        let path = outline.to_bez_path();
        assert!(path.elements().iter().any(|el| matches!(el, kurbo::PathEl::CurveTo(..))));
        let bbox = path.bounding_box();
        assert!(bbox.x0 >= 0.0 && bbox.x1 <= 100.0);
    }

    #[test]
    fn test_svg_output() {
        let outline = Outline {
            segments: vec![
                Segment::MoveTo(Point::new(0.0, 0.0)),
                Segment::LineTo(Point::new(10.0, 0.0)),
                Segment::ArcTo {
                    radius: 5.0,
                    sweep: Sweep::Clockwise,
                    to: Point::new(15.0, 5.0),
                },
                Segment::Close,
            ],
        };
        assert_eq!(outline.to_svg(), "M 0 0 L 10 0 A 5 5 0 0 1 15 5 Z");
    }

    #[test]
    fn test_element_outline_triangle_is_centered() {
        let triangle = Element::create_default(ElementKind::Triangle, Point::new(500.0, 500.0), None)
            .update(&ElementPatch::new().size(200.0, 100.0));
        let path = element_outline(&triangle).unwrap();
        let bbox = path.bounding_box();
        // Radius 50 around (100, 50), element-local
        assert!((bbox.y0 - 0.0).abs() < 1e-9);
        assert!(bbox.x0 > 50.0 && bbox.x1 < 150.0);
    }

    #[test]
    fn test_element_outline_kinds() {
        let text = Element::create_default(ElementKind::Text, Point::ZERO, None);
        assert!(element_outline(&text).is_none());

        let circle = Element::create_default(ElementKind::Circle, Point::ZERO, None);
        let bbox = element_outline(&circle).unwrap().bounding_box();
        assert!((bbox.width() - 100.0).abs() < 1e-6);

        let empty_pen = Element::create_default(ElementKind::Pen, Point::ZERO, None);
        assert!(element_outline(&empty_pen).is_none());
    }
}
