//! Shared pointer event types fed into the trail engine

use serde::{Deserialize, Serialize};

/// A 2-D coordinate in surface-local pixel space.
///
/// `{0, 0}` doubles as the "no prior position recorded" sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_origin(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Euclidean distance in pixels.
    pub fn distance_to(&self, other: Position) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PointerEvent {
    /// Mouse moved to surface-local coordinates.
    MouseMove { x: f64, y: f64 },
    /// Touch moved; may report several contact points, may report none.
    TouchMove { touches: Vec<Position> },
    /// Pointer entered the active region.
    HoverEnter,
    /// Pointer left the active region.
    HoverLeave,
    /// Pointer left the whole tracked document.
    DocumentLeave,
}

impl PointerEvent {
    /// Position carried by a move event. Touch events use the first contact
    /// point only; an empty touch list yields `None` (malformed event, sample
    /// is dropped).
    pub fn position(&self) -> Option<Position> {
        match self {
            PointerEvent::MouseMove { x, y } => Some(Position::new(*x, *y)),
            PointerEvent::TouchMove { touches } => touches.first().copied(),
            _ => None,
        }
    }
}
