use serde::{Deserialize, Serialize};

/// Direction in which the turn pointer moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Next,
    Prev,
}

/// Computes the index one step away from `current` in a rotation of `len`
/// names, wrapping at both ends.
///
/// `current` may be out of range (hand-edited data); it is reduced modulo
/// `len` first. Returns `None` for an empty rotation.
pub fn step(current: usize, len: usize, direction: Direction) -> Option<usize> {
    if len == 0 {
        return None;
    }

    let current = current % len;
    let next = match direction {
        Direction::Next => (current + 1) % len,
        Direction::Prev => (current + len - 1) % len,
    };

    Some(next)
}
