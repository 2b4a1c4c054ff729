//! Cursor-trail engine: hover-gated pointer tracking, spawn throttling, and
//! marker lifecycle.
//!
//! All state lives in a [`TrailEngine`] value, so independent trail surfaces
//! are just independent engines. Time is an explicit millisecond argument on
//! every entry point; the engine never reads a clock of its own.

pub mod marker;
pub mod throttle;
pub mod tracker;

pub use marker::{Marker, MarkerId, Palette, RemovalTimer, Rgb, Surface};
pub use throttle::{ThrottleConfig, ThrottleState};
pub use tracker::PointerTracker;

use crate::pointer::{PointerEvent, Position};
use anyhow::{ensure, Result};
use marker::RemovalQueue;
use rand::Rng;

/// Startup configuration for one trail surface. Not reconfigurable at
/// runtime.
#[derive(Debug, Clone)]
pub struct TrailConfig {
    pub throttle: ThrottleConfig,
    pub palette: Palette,
    /// Fixed marker lifetime in milliseconds.
    pub marker_lifetime_ms: f64,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            throttle: ThrottleConfig::default(),
            palette: Palette::default(),
            marker_lifetime_ms: 3000.0,
        }
    }
}

impl TrailConfig {
    /// Reject configurations the engine cannot run with. Empty palettes are a
    /// startup error, never a per-spawn condition.
    pub fn validate(&self) -> Result<()> {
        ensure!(!self.palette.colors.is_empty(), "color palette is empty");
        ensure!(!self.palette.sizes_px.is_empty(), "size palette is empty");
        ensure!(
            self.marker_lifetime_ms > 0.0,
            "marker lifetime must be positive, got {}",
            self.marker_lifetime_ms
        );
        ensure!(
            self.throttle.min_interval_ms >= 0.0 && self.throttle.min_distance_px >= 0.0,
            "throttle thresholds must be non-negative"
        );
        Ok(())
    }
}

/// One trail surface: tracker, throttler, and marker lifecycle in a single
/// event-driven state machine.
pub struct TrailEngine<R: Rng> {
    config: TrailConfig,
    tracker: PointerTracker,
    state: ThrottleState,
    surface: Option<Surface>,
    removals: RemovalQueue,
    next_id: u64,
    rng: R,
}

impl<R: Rng> TrailEngine<R> {
    pub fn new(config: TrailConfig, rng: R) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            tracker: PointerTracker::new(),
            state: ThrottleState::new(),
            surface: Some(Surface::new()),
            removals: RemovalQueue::new(),
            next_id: 0,
            rng,
        })
    }

    pub fn config(&self) -> &TrailConfig {
        &self.config
    }

    pub fn is_hovering(&self) -> bool {
        self.tracker.is_hovering()
    }

    pub fn throttle_state(&self) -> &ThrottleState {
        &self.state
    }

    /// The marker container, while it is alive.
    pub fn surface(&self) -> Option<&Surface> {
        self.surface.as_ref()
    }

    /// Feed one host event observed at `now_ms`. Returns the marker spawned
    /// by this event, if any.
    pub fn handle_event(&mut self, event: &PointerEvent, now_ms: f64) -> Option<Marker> {
        if matches!(event, PointerEvent::DocumentLeave) {
            self.state.reset_pointer();
        }

        let pos = self.tracker.sample(event)?;
        if self.surface.is_none() {
            // Surface torn down: engine is inert
            return None;
        }
        if !self.state.evaluate(pos, now_ms, &self.config.throttle) {
            return None;
        }
        Some(self.spawn_marker(pos, now_ms))
    }

    fn spawn_marker(&mut self, position: Position, now_ms: f64) -> Marker {
        let (color, size_px) = self.config.palette.pick(&mut self.rng);
        let marker = Marker {
            id: MarkerId(self.next_id),
            position,
            color,
            size_px,
            spawned_at_ms: now_ms,
        };
        self.next_id += 1;

        if let Some(surface) = self.surface.as_mut() {
            surface.attach(marker.clone());
        }
        self.removals
            .schedule(marker.id, now_ms + self.config.marker_lifetime_ms);
        marker
    }

    /// Fire removal timers due at `now_ms`. Returns the timers that detached
    /// a marker; firing against a torn-down surface is a silent no-op.
    pub fn advance(&mut self, now_ms: f64) -> Vec<RemovalTimer> {
        let due = self.removals.due(now_ms);
        match self.surface.as_mut() {
            Some(surface) => due
                .into_iter()
                .filter(|timer| surface.detach(timer.id))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Destroy the surface. Markers go with it and pending removals become
    /// no-ops.
    pub fn teardown(&mut self) {
        self.surface = None;
    }
}
