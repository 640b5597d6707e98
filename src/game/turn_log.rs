//! Bounded circular log of the snake's turning history.
//!
//! Each accepted direction change retires one straight stretch of body into
//! the log as a [`Segment`]. The tail consumes segments from the front as it
//! reaches their turn points, and the collision test walks whatever is live
//! in between. This is the whole body representation: two endpoints plus
//! this ring, never a per-cell list.

use super::direction::Direction;
use super::geometry::{axis_distance, Position, Segment};

/// Fixed-capacity ring of body segments.
///
/// `reader` points at the oldest live segment, `writer` at the next free
/// slot; both wrap modulo the capacity. When the ring is full a new turn is
/// refused rather than overwriting the oldest segment, which the tail still
/// needs for routing.
#[derive(Debug, Clone)]
pub struct TurnLog {
    slots: Box<[Option<Segment>]>,
    writer: usize,
    reader: usize,
    len: usize,
}

impl TurnLog {
    /// Create an empty log holding at most `capacity` segments.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "turn log capacity must be non-zero");
        Self {
            slots: vec![None; capacity].into_boxed_slice(),
            writer: 0,
            reader: 0,
            len: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == self.slots.len()
    }

    /// Append the stretch ending at `turn_point`, travelled along
    /// `direction` from `span_start`. Returns false (and records nothing)
    /// when the ring is full.
    pub fn record_turn(
        &mut self,
        turn_point: Position,
        direction: Direction,
        span_start: Position,
    ) -> bool {
        if self.is_full() {
            return false;
        }
        let length = axis_distance(turn_point.x - span_start.x, turn_point.y - span_start.y);
        self.slots[self.writer] = Some(Segment {
            span_start,
            turn_point,
            direction,
            length,
        });
        self.writer = (self.writer + 1) % self.slots.len();
        self.len += 1;
        true
    }

    /// The oldest live segment, if any.
    pub fn front(&self) -> Option<&Segment> {
        if self.is_empty() {
            None
        } else {
            self.slots[self.reader].as_ref()
        }
    }

    /// Iterate the live segments from oldest to newest. The iterator is
    /// re-derived from the reader index each call; no cursor state persists.
    pub fn iter(&self) -> impl Iterator<Item = &Segment> {
        (0..self.len).filter_map(move |i| {
            let index = (self.reader + i) % self.slots.len();
            self.slots[index].as_ref()
        })
    }

    /// If the tail is standing on the oldest turn point, retire that
    /// segment and return the direction the tail should travel next: the
    /// direction of the stretch it is entering, or the head's current
    /// direction once the log is empty (the remaining body is then one
    /// straight stretch up to the head).
    ///
    /// Retires at most one segment per call.
    pub fn retire_if_tail_arrived(
        &mut self,
        tail: Position,
        head_direction: Direction,
    ) -> Option<Direction> {
        if self.front()?.turn_point != tail {
            return None;
        }
        self.slots[self.reader] = None;
        self.reader = (self.reader + 1) % self.slots.len();
        self.len -= 1;
        Some(
            self.front()
                .map(|next| next.direction)
                .unwrap_or(head_direction),
        )
    }

    /// Re-anchor the oldest segment's span to the tail's position so cells
    /// the tail has vacated stop counting as collision geometry.
    pub fn shrink_front_to(&mut self, tail: Position) {
        if self.is_empty() {
            return;
        }
        if let Some(front) = self.slots[self.reader].as_mut() {
            front.span_start = tail;
            front.length =
                axis_distance(front.turn_point.x - tail.x, front.turn_point.y - tail.y);
        }
    }
}
