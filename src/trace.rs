use crate::pointer::PointerEvent;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A pointer event stamped with the time it was observed (milliseconds from
/// trace start, monotonic).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TracedEvent {
    pub at_ms: f64,
    pub event: PointerEvent,
}

/// A recorded stream of pointer events, the replay input for the simulator
/// and renderer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PointerTrace {
    pub events: Vec<TracedEvent>,
}

impl PointerTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, at_ms: f64, event: PointerEvent) {
        self.events.push(TracedEvent { at_ms, event });
    }

    /// Timestamp of the last event, 0 for an empty trace.
    pub fn duration_ms(&self) -> f64 {
        self.events.last().map(|e| e.at_ms).unwrap_or(0.0)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).with_context(|| format!("Failed to write trace to {:?}", path))?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read trace from {:?}", path))?;
        let trace: Self = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse trace file {:?}", path))?;
        Ok(trace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.json");

        let mut trace = PointerTrace::new();
        trace.push(0.0, PointerEvent::HoverEnter);
        trace.push(16.0, PointerEvent::MouseMove { x: 42.0, y: 7.5 });
        trace.push(32.0, PointerEvent::DocumentLeave);
        trace.save(&path).unwrap();

        let loaded = PointerTrace::load(&path).unwrap();
        assert_eq!(loaded.events.len(), 3);
        assert!((loaded.duration_ms() - 32.0).abs() < 1e-9);
        match &loaded.events[1].event {
            PointerEvent::MouseMove { x, y } => {
                assert!((x - 42.0).abs() < 1e-9);
                assert!((y - 7.5).abs() < 1e-9);
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_load_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = PointerTrace::load(&dir.path().join("nope.json"));
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_trace_duration() {
        assert!(PointerTrace::new().duration_ms().abs() < 1e-9);
    }
}
