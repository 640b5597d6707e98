//! Self-intersection test: the head against every live body segment.

use super::geometry::{point_on_segment, Position};
use super::turn_log::TurnLog;

/// Whether `head` lies strictly inside any live segment's span.
///
/// Corners never collide (the head passes through its own turn points when
/// hugging a wall), and the in-progress stretch behind the head is not in
/// the log, so the head cannot collide with it.
pub fn head_hits_body(head: Position, log: &TurnLog) -> bool {
    log.iter().any(|segment| point_on_segment(head, segment))
}
