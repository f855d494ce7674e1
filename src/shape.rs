// Two-phase shape construction.
//
// A shape is anchored once (`start`), previewed every frame while pending,
// and then either committed with an end point or cancelled.

use serde::{Deserialize, Serialize};

use crate::config::ShapeConfig;
use crate::raster;
use crate::types::{Color, FrameBuffer, Point};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Line,
    Rectangle,
    Circle,
    Arrow,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 4] = [Self::Line, Self::Rectangle, Self::Circle, Self::Arrow];

    /// The kind after this one, wrapping around.
    pub fn next(self) -> Self {
        match self {
            Self::Line => Self::Rectangle,
            Self::Rectangle => Self::Circle,
            Self::Circle => Self::Arrow,
            Self::Arrow => Self::Line,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Line => "LINE",
            Self::Rectangle => "RECTANGLE",
            Self::Circle => "CIRCLE",
            Self::Arrow => "ARROW",
        }
    }
}

/// Arrow head segment length (pixels) and half-angle (radians).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowHead {
    pub length: f64,
    pub angle: f64,
}

impl From<&ShapeConfig> for ArrowHead {
    fn from(config: &ShapeConfig) -> Self {
        Self { length: config.arrow_head_length, angle: config.arrow_head_angle }
    }
}

/// A fully specified shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    pub kind: ShapeKind,
    pub start: Point,
    pub end: Point,
}

/// Drawable primitives a shape expands into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outline {
    Segments(Vec<(Point, Point)>),
    Rectangle(Point, Point),
    Circle { center: Point, radius: i32 },
}

impl Shape {
    pub fn outline(&self, head: ArrowHead) -> Outline {
        let (start, end) = (self.start, self.end);
        match self.kind {
            ShapeKind::Line => Outline::Segments(vec![(start, end)]),
            ShapeKind::Rectangle => Outline::Rectangle(start, end),
            ShapeKind::Circle => Outline::Circle { center: start, radius: start.distance(end) as i32 },
            ShapeKind::Arrow => {
                let dy = f64::from(end.y) - f64::from(start.y);
                let dx = f64::from(end.x) - f64::from(start.x);
                let theta = dy.atan2(dx);
                let barb = |phi: f64| {
                    Point::new(
                        (f64::from(end.x) - head.length * phi.cos()) as i32,
                        (f64::from(end.y) - head.length * phi.sin()) as i32,
                    )
                };
                let left = barb(theta - head.angle);
                let right = barb(theta + head.angle);
                Outline::Segments(vec![(start, end), (end, left), (end, right)])
            }
        }
    }
}

impl Outline {
    pub fn draw(&self, fb: &mut FrameBuffer, thickness: u32, color: Color) {
        match self {
            Outline::Segments(segments) => {
                for &(a, b) in segments {
                    raster::thick_line(fb, a, b, thickness, color);
                }
            }
            Outline::Rectangle(a, b) => raster::rectangle(fb, *a, *b, thickness, color),
            Outline::Circle { center, radius } => raster::circle(fb, *center, *radius, thickness, color),
        }
    }
}

/// Read-only description of the shape under construction, for the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapePreview {
    pub kind: ShapeKind,
    pub start: Point,
    pub end: Point,
    pub color: Color,
}

impl ShapePreview {
    pub fn shape(&self) -> Shape {
        Shape { kind: self.kind, start: self.start, end: self.end }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShapeState {
    #[default]
    Idle,
    Pending { start: Point },
}

#[derive(Debug, Default)]
pub struct ShapeBuilder {
    state: ShapeState,
}

impl ShapeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ShapeState {
        self.state
    }

    /// Anchor a shape at `p`. Returns false (and keeps the old anchor) if one is pending.
    pub fn start(&mut self, p: Point) -> bool {
        match self.state {
            ShapeState::Idle => {
                self.state = ShapeState::Pending { start: p };
                true
            }
            ShapeState::Pending { .. } => false,
        }
    }

    /// Finish the pending shape at `end` and return to Idle.
    pub fn complete(&mut self, kind: ShapeKind, end: Point) -> Option<Shape> {
        match std::mem::take(&mut self.state) {
            ShapeState::Pending { start } => Some(Shape { kind, start, end }),
            ShapeState::Idle => None,
        }
    }

    /// Drop the pending anchor. Returns whether anything was pending.
    pub fn cancel(&mut self) -> bool {
        std::mem::take(&mut self.state) != ShapeState::Idle
    }

    pub fn preview(&self, kind: ShapeKind, end: Point, color: Color) -> Option<ShapePreview> {
        match self.state {
            ShapeState::Pending { start } => Some(ShapePreview { kind, start, end, color }),
            ShapeState::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn head() -> ArrowHead {
        ArrowHead::from(&ShapeConfig::default())
    }

    #[test]
    fn start_is_ignored_while_pending() {
        let mut b = ShapeBuilder::new();
        assert!(b.start(Point::new(1, 1)));
        assert!(!b.start(Point::new(9, 9)));
        assert_eq!(b.state(), ShapeState::Pending { start: Point::new(1, 1) });
    }

    #[test]
    fn complete_returns_to_idle() {
        let mut b = ShapeBuilder::new();
        assert_eq!(b.complete(ShapeKind::Line, Point::new(3, 3)), None);
        b.start(Point::new(1, 2));
        let shape = b.complete(ShapeKind::Rectangle, Point::new(5, 6)).unwrap();
        assert_eq!(shape, Shape { kind: ShapeKind::Rectangle, start: Point::new(1, 2), end: Point::new(5, 6) });
        assert_eq!(b.state(), ShapeState::Idle);
    }

    #[test]
    fn cancel_discards_the_anchor() {
        let mut b = ShapeBuilder::new();
        assert!(!b.cancel());
        b.start(Point::new(4, 4));
        assert!(b.cancel());
        assert_eq!(b.preview(ShapeKind::Line, Point::new(0, 0), 0), None);
    }

    #[test]
    fn preview_only_while_pending() {
        let mut b = ShapeBuilder::new();
        assert!(b.preview(ShapeKind::Circle, Point::new(2, 2), 7).is_none());
        b.start(Point::new(10, 10));
        let p = b.preview(ShapeKind::Circle, Point::new(20, 20), 7).unwrap();
        assert_eq!((p.kind, p.start, p.end, p.color), (ShapeKind::Circle, Point::new(10, 10), Point::new(20, 20), 7));
        // previewing does not consume the anchor
        assert_eq!(b.state(), ShapeState::Pending { start: Point::new(10, 10) });
    }

    #[test]
    fn circle_radius_truncates_the_distance() {
        let shape = Shape { kind: ShapeKind::Circle, start: Point::new(10, 10), end: Point::new(50, 50) };
        assert_eq!(shape.outline(head()), Outline::Circle { center: Point::new(10, 10), radius: 56 });
    }

    #[test]
    fn arrow_head_points_back_along_the_shaft() {
        let shape = Shape { kind: ShapeKind::Arrow, start: Point::new(0, 0), end: Point::new(100, 0) };
        let Outline::Segments(segs) = shape.outline(head()) else { panic!("arrow expands to segments") };
        assert_eq!(segs.len(), 3);
        assert_eq!(segs[0], (Point::new(0, 0), Point::new(100, 0)));
        // 20 * cos(30°) = 17.32 -> x = 82; 20 * sin(30°) ≈ 10, one barb either side
        let (left, right) = (segs[1].1, segs[2].1);
        assert_eq!((left.x, right.x), (82, 82));
        assert!((9..=10).contains(&left.y));
        assert!((-10..=-9).contains(&right.y));
        assert!(segs[1..].iter().all(|(a, _)| *a == Point::new(100, 0)));
    }

    #[test]
    fn kinds_cycle_in_order() {
        let mut k = ShapeKind::Line;
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(k);
            k = k.next();
        }
        assert_eq!(seen, ShapeKind::ALL);
        assert_eq!(k, ShapeKind::Line);
    }
}
