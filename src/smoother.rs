// Moving average over the last few fingertip positions.
// Landmark coordinates jitter by a few pixels per frame; averaging the newest
// points keeps strokes steady at the cost of roughly one frame of lag.

use crate::config::SmootherConfig;
use crate::ring::Ring;
use crate::types::Point;

pub struct CoordinateSmoother {
    buffer: Ring<Point>,
    span: usize, // newest points averaged
}

impl CoordinateSmoother {
    pub fn new(config: &SmootherConfig) -> Self {
        Self { buffer: Ring::with_capacity(config.buffer_size), span: config.span }
    }

    /// Record (x, y) and return the floor-averaged recent position.
    pub fn smooth(&mut self, point: Point) -> Point {
        self.buffer.push(point);
        if self.buffer.len() < 2 {
            return point;
        }

        let n = self.span.min(self.buffer.len()) as i64;
        let (sx, sy) = self
            .buffer
            .recent(self.span)
            .fold((0i64, 0i64), |(sx, sy), p| (sx + i64::from(p.x), sy + i64::from(p.y)));
        Point::new(sx.div_euclid(n) as i32, sy.div_euclid(n) as i32)
    }

    /// Drop history so a reacquired hand doesn't blend with where it was lost.
    pub fn reset(&mut self) {
        self.buffer.clear();
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn smoother() -> CoordinateSmoother {
        CoordinateSmoother::new(&SmootherConfig::default())
    }

    #[test]
    fn first_point_passes_through() {
        let mut s = smoother();
        assert_eq!(s.smooth(Point::new(7, 9)), Point::new(7, 9));
    }

    #[test]
    fn three_points_average_to_the_middle() {
        let mut s = smoother();
        s.smooth(Point::new(0, 0));
        assert_eq!(s.smooth(Point::new(10, 10)), Point::new(5, 5));
        assert_eq!(s.smooth(Point::new(20, 20)), Point::new(10, 10));
    }

    #[test]
    fn only_the_newest_three_are_averaged() {
        let mut s = smoother();
        for p in [(100, 100), (0, 0), (3, 3), (6, 7)] {
            s.smooth(p.into());
        }
        // (3+6+9)/3, (3+7+9)/3 floored
        assert_eq!(s.smooth(Point::new(9, 9)), Point::new(6, 6));
        assert_eq!(s.len(), 4);
    }

    #[test]
    fn averaging_floors() {
        let mut s = smoother();
        s.smooth(Point::new(0, 0));
        assert_eq!(s.smooth(Point::new(1, 3)), Point::new(0, 1));
    }

    #[test]
    fn reset_forgets_old_positions() {
        let mut s = smoother();
        s.smooth(Point::new(500, 500));
        s.smooth(Point::new(510, 510));
        s.reset();
        assert!(s.is_empty());
        assert_eq!(s.smooth(Point::new(4, 4)), Point::new(4, 4));
    }
}
