//! Collision geometry for a snake body stored as straight stretches.
//!
//! The body is never materialized cell by cell. Every containment question
//! is answered against axis-aligned `Segment`s, so these few functions carry
//! all of the collision math.

use super::direction::Direction;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position one cell in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// One straight stretch of the body, retired from the head by a turn.
///
/// `direction` is the direction of travel along the stretch, so
/// `span_start` advanced `length` cells in `direction` lands on
/// `turn_point`. Exactly one axis varies between the two endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    /// Where this stretch begins (tail end)
    pub span_start: Position,
    /// Where the body changed direction (head end)
    pub turn_point: Position,
    /// Direction of travel from `span_start` to `turn_point`
    pub direction: Direction,
    /// Axis-aligned distance from `span_start` to `turn_point`
    pub length: i32,
}

/// Length of a vector known to be purely horizontal or purely vertical.
pub fn axis_distance(dx: i32, dy: i32) -> i32 {
    if dy == 0 {
        dx.abs()
    } else {
        dy.abs()
    }
}

/// Fuzzy scalar comparison, used only for apple pickup. Body collision
/// is always exact.
pub fn within_tolerance(a: i32, b: i32, tolerance: i32) -> bool {
    (a - b).abs() <= tolerance
}

/// Whether `point` lies strictly inside `segment`'s span.
///
/// The interval is open: the corner cells (`span_start`, `turn_point`)
/// themselves do not count. Endpoint ordering is normalized with min/max
/// so both directions of travel test identically.
pub fn point_on_segment(point: Position, segment: &Segment) -> bool {
    if segment.span_start.x == segment.turn_point.x {
        // vertical stretch: x is fixed, y varies
        if point.x != segment.turn_point.x {
            return false;
        }
        let min_y = segment.span_start.y.min(segment.turn_point.y);
        let max_y = segment.span_start.y.max(segment.turn_point.y);
        point.y > min_y && point.y < max_y
    } else {
        // horizontal stretch: y is fixed, x varies
        if point.y != segment.turn_point.y {
            return false;
        }
        let min_x = segment.span_start.x.min(segment.turn_point.x);
        let max_x = segment.span_start.x.max(segment.turn_point.x);
        point.x > min_x && point.x < max_x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn horizontal_segment() -> Segment {
        // travelled left-to-right from (80,40) to (90,40)
        Segment {
            span_start: Position::new(80, 40),
            turn_point: Position::new(90, 40),
            direction: Direction::Right,
            length: 10,
        }
    }

    #[test]
    fn test_axis_distance() {
        assert_eq!(axis_distance(10, 0), 10);
        assert_eq!(axis_distance(-10, 0), 10);
        assert_eq!(axis_distance(0, 7), 7);
        assert_eq!(axis_distance(0, -7), 7);
        assert_eq!(axis_distance(0, 0), 0);
    }

    #[test]
    fn test_within_tolerance() {
        assert!(within_tolerance(50, 52, 2));
        assert!(within_tolerance(52, 50, 2));
        assert!(!within_tolerance(50, 53, 2));
        assert!(within_tolerance(5, 5, 0));
        assert!(!within_tolerance(5, 6, 0));
    }

    #[test]
    fn test_interior_points_are_on_segment() {
        let seg = horizontal_segment();
        for x in 81..90 {
            assert!(point_on_segment(Position::new(x, 40), &seg));
        }
    }

    #[test]
    fn test_corners_are_not_on_segment() {
        let seg = horizontal_segment();
        assert!(!point_on_segment(seg.span_start, &seg));
        assert!(!point_on_segment(seg.turn_point, &seg));
    }

    #[test]
    fn test_off_axis_points_are_not_on_segment() {
        let seg = horizontal_segment();
        assert!(!point_on_segment(Position::new(85, 41), &seg));
        assert!(!point_on_segment(Position::new(85, 39), &seg));
        assert!(!point_on_segment(Position::new(79, 40), &seg));
        assert!(!point_on_segment(Position::new(91, 40), &seg));
    }

    #[test]
    fn test_reversed_travel_direction() {
        // travelled right-to-left: span_start is the larger x
        let seg = Segment {
            span_start: Position::new(90, 40),
            turn_point: Position::new(80, 40),
            direction: Direction::Left,
            length: 10,
        };
        assert!(point_on_segment(Position::new(85, 40), &seg));
        assert!(!point_on_segment(Position::new(80, 40), &seg));
        assert!(!point_on_segment(Position::new(90, 40), &seg));
    }

    #[test]
    fn test_vertical_segment() {
        let seg = Segment {
            span_start: Position::new(12, 4),
            turn_point: Position::new(12, 9),
            direction: Direction::Down,
            length: 5,
        };
        assert!(point_on_segment(Position::new(12, 6), &seg));
        assert!(!point_on_segment(Position::new(12, 4), &seg));
        assert!(!point_on_segment(Position::new(12, 9), &seg));
        assert!(!point_on_segment(Position::new(11, 6), &seg));
    }

    #[test]
    fn test_zero_length_segment_contains_nothing() {
        let p = Position::new(3, 3);
        let seg = Segment {
            span_start: p,
            turn_point: p,
            direction: Direction::Up,
            length: 0,
        };
        assert!(!point_on_segment(p, &seg));
        assert!(!point_on_segment(Position::new(3, 4), &seg));
    }
}
