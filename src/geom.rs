//! 2D geometry for the canvas: integer points and the squared-distance
//! predicate every hit-test in the program goes through.

/// Integer model-space coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Squared euclidean distance to `other`.
    ///
    /// Everything that compares distances here compares against squared
    /// thresholds, so the sqrt is never needed. Widened to i64 so corner-to-
    /// corner distances cannot overflow.
    pub fn dist_sq(self, other: Point) -> i64 {
        let dx = (other.x - self.x) as i64;
        let dy = (other.y - self.y) as i64;
        dx * dx + dy * dy
    }
}
