use crate::engine::{Marker, MarkerId, TrailConfig, TrailEngine};
use crate::trace::PointerTrace;
use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TimelineEvent {
    Spawned(Marker),
    Removed(MarkerId),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub at_ms: f64,
    pub event: TimelineEvent,
}

/// Everything that happened on the surface during a replay, in chronological
/// order: one `Spawned` entry per marker and one `Removed` entry when its
/// lifetime timer fired.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrailTimeline {
    pub entries: Vec<TimelineEntry>,
}

impl TrailTimeline {
    pub fn spawn_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e.event, TimelineEvent::Spawned(_)))
            .count()
    }

    pub fn removal_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e.event, TimelineEvent::Removed(_)))
            .count()
    }

    /// Largest number of markers alive at once.
    pub fn peak_live_markers(&self) -> usize {
        let mut live = 0usize;
        let mut peak = 0usize;
        for entry in &self.entries {
            match entry.event {
                TimelineEvent::Spawned(_) => {
                    live += 1;
                    peak = peak.max(live);
                }
                TimelineEvent::Removed(_) => live = live.saturating_sub(1),
            }
        }
        peak
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write timeline to {:?}", path))?;
        Ok(())
    }
}

/// Replay a pointer trace through a fresh engine, interleaving due removal
/// timers with pointer events. Events are replayed in recorded order;
/// timestamps are expected to be non-decreasing.
pub fn simulate(trace: &PointerTrace, config: TrailConfig, seed: Option<u64>) -> Result<TrailTimeline> {
    let rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    };
    let mut engine = TrailEngine::new(config, rng)?;
    let mut timeline = TrailTimeline::default();

    for traced in &trace.events {
        // Fire removals that come due before (or exactly at) this event
        for timer in engine.advance(traced.at_ms) {
            timeline.entries.push(TimelineEntry {
                at_ms: timer.fires_at_ms,
                event: TimelineEvent::Removed(timer.id),
            });
        }

        if let Some(marker) = engine.handle_event(&traced.event, traced.at_ms) {
            timeline.entries.push(TimelineEntry {
                at_ms: traced.at_ms,
                event: TimelineEvent::Spawned(marker),
            });
        }
    }

    // Drain timers still pending after the last event
    for timer in engine.advance(f64::INFINITY) {
        timeline.entries.push(TimelineEntry {
            at_ms: timer.fires_at_ms,
            event: TimelineEvent::Removed(timer.id),
        });
    }

    Ok(timeline)
}

/// `simulate` subcommand: trace file in, timeline file out, summary printed.
pub fn run(input: &Path, output: &Path, config: TrailConfig, seed: Option<u64>) -> Result<()> {
    let trace = PointerTrace::load(input)?;

    println!("Simulating trace: {}", input.display());
    println!("  Events: {}", trace.events.len());
    println!("  Duration: {:.2}s", trace.duration_ms() / 1000.0);
    println!(
        "  Throttle: >={}px or >{}ms, lifetime {}ms",
        config.throttle.min_distance_px, config.throttle.min_interval_ms, config.marker_lifetime_ms
    );

    let timeline = simulate(&trace, config, seed)?;

    println!("\nResults:");
    println!("  Markers spawned: {}", timeline.spawn_count());
    println!("  Markers removed: {}", timeline.removal_count());
    println!("  Peak live markers: {}", timeline.peak_live_markers());

    timeline.save(output)?;
    println!("\nDone! Timeline saved to: {}", output.display());

    Ok(())
}
