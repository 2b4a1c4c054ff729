use crate::pointer::{PointerEvent, Position};

/// Gates raw pointer events on hover state and extracts position samples.
///
/// The tracker owns the hover flag and nothing else: it never creates or
/// destroys markers, and while the pointer is outside the active region every
/// move sample is dropped without touching any downstream state.
#[derive(Debug, Default)]
pub struct PointerTracker {
    hovering: bool,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    /// Process one host event. Returns a position sample only for move events
    /// that pass the hover gate; hover transitions are absorbed here.
    /// Malformed moves (empty touch list) are treated as if hover were false
    /// for that event and dropped.
    pub fn sample(&mut self, event: &PointerEvent) -> Option<Position> {
        match event {
            PointerEvent::HoverEnter => {
                self.hovering = true;
                None
            }
            PointerEvent::HoverLeave => {
                self.hovering = false;
                None
            }
            // Document-leave carries no sample; the engine resets pointer
            // memory when it sees one.
            PointerEvent::DocumentLeave => None,
            PointerEvent::MouseMove { .. } | PointerEvent::TouchMove { .. } => {
                if !self.hovering {
                    return None;
                }
                event.position()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moves_dropped_while_not_hovering() {
        let mut tracker = PointerTracker::new();
        let sample = tracker.sample(&PointerEvent::MouseMove { x: 500.0, y: 500.0 });
        assert!(sample.is_none(), "sample must be dropped before hover-enter");
    }

    #[test]
    fn test_hover_enter_opens_gate() {
        let mut tracker = PointerTracker::new();
        assert!(tracker.sample(&PointerEvent::HoverEnter).is_none());
        assert!(tracker.is_hovering());

        let sample = tracker.sample(&PointerEvent::MouseMove { x: 10.0, y: 20.0 });
        assert_eq!(sample, Some(Position::new(10.0, 20.0)));
    }

    #[test]
    fn test_hover_leave_closes_gate() {
        let mut tracker = PointerTracker::new();
        tracker.sample(&PointerEvent::HoverEnter);
        tracker.sample(&PointerEvent::HoverLeave);
        assert!(!tracker.is_hovering());

        let sample = tracker.sample(&PointerEvent::MouseMove { x: 10.0, y: 20.0 });
        assert!(sample.is_none());
    }

    #[test]
    fn test_empty_touch_list_dropped_without_error() {
        let mut tracker = PointerTracker::new();
        tracker.sample(&PointerEvent::HoverEnter);
        let sample = tracker.sample(&PointerEvent::TouchMove { touches: vec![] });
        assert!(sample.is_none());
        // Gate stays open for the next well-formed event
        assert!(tracker.is_hovering());
    }

    #[test]
    fn test_first_touch_point_wins() {
        let mut tracker = PointerTracker::new();
        tracker.sample(&PointerEvent::HoverEnter);
        let sample = tracker.sample(&PointerEvent::TouchMove {
            touches: vec![Position::new(1.0, 2.0), Position::new(300.0, 400.0)],
        });
        assert_eq!(sample, Some(Position::new(1.0, 2.0)));
    }

    #[test]
    fn test_document_leave_yields_no_sample() {
        let mut tracker = PointerTracker::new();
        tracker.sample(&PointerEvent::HoverEnter);
        assert!(tracker.sample(&PointerEvent::DocumentLeave).is_none());
    }
}
