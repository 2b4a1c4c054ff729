use crate::pointer::Position;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// RGB triple, the palette color unit.
pub type Rgb = [u8; 3];

/// Glow opacity relative to the marker's own color.
pub const GLOW_OPACITY: f64 = 0.4;

/// Visual palettes for spawned markers. Color and size are drawn
/// independently, uniformly over each list.
#[derive(Debug, Clone)]
pub struct Palette {
    pub colors: Vec<Rgb>,
    pub sizes_px: Vec<f64>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: vec![[255, 215, 0], [255, 105, 180], [135, 206, 250]],
            sizes_px: vec![14.0, 20.0, 26.0],
        }
    }
}

impl Palette {
    /// Pick one color and one size, each uniformly at random.
    pub fn pick<R: Rng>(&self, rng: &mut R) -> (Rgb, f64) {
        let color = self.colors[rng.random_range(0..self.colors.len())];
        let size = self.sizes_px[rng.random_range(0..self.sizes_px.len())];
        (color, size)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MarkerId(pub u64);

/// A short-lived visual element spawned at a pointer position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Marker {
    pub id: MarkerId,
    pub position: Position,
    pub color: Rgb,
    pub size_px: f64,
    pub spawned_at_ms: f64,
}

impl Marker {
    /// Foreground color as an RGB triple string.
    pub fn css_color(&self) -> String {
        format!("rgb({}, {}, {})", self.color[0], self.color[1], self.color[2])
    }

    /// Glow/shadow derived from the marker's own color at reduced intensity.
    pub fn css_glow(&self) -> String {
        format!(
            "0 0 10px rgba({}, {}, {}, {})",
            self.color[0], self.color[1], self.color[2], GLOW_OPACITY
        )
    }

    /// Size as a font-size-like unit string.
    pub fn css_font_size(&self) -> String {
        format!("{}px", self.size_px)
    }
}

/// In-memory stand-in for the host container markers attach to. Owns its
/// children for their lifetime; dropping the surface discards them all.
#[derive(Debug, Default)]
pub struct Surface {
    children: Vec<Marker>,
}

impl Surface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&mut self, marker: Marker) {
        self.children.push(marker);
    }

    /// Detach a child. Returns false if it was already gone, which callers
    /// treat as a no-op rather than an error.
    pub fn detach(&mut self, id: MarkerId) -> bool {
        let before = self.children.len();
        self.children.retain(|m| m.id != id);
        self.children.len() != before
    }

    pub fn contains(&self, id: MarkerId) -> bool {
        self.children.iter().any(|m| m.id == id)
    }

    pub fn children(&self) -> &[Marker] {
        &self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RemovalTimer {
    pub id: MarkerId,
    pub fires_at_ms: f64,
}

/// Pending marker removals, drained by the engine's `advance`.
///
/// Invariant: every timer is scheduled with the same fixed lifetime, so
/// insertion order equals deadline order and the queue stays sorted.
#[derive(Debug, Default)]
pub struct RemovalQueue {
    timers: VecDeque<RemovalTimer>,
}

impl RemovalQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, id: MarkerId, fires_at_ms: f64) {
        self.timers.push_back(RemovalTimer { id, fires_at_ms });
    }

    /// Timers due at or before `now_ms`, in scheduled order.
    pub fn due(&mut self, now_ms: f64) -> Vec<RemovalTimer> {
        let mut fired = Vec::new();
        while let Some(timer) = self.timers.front().copied() {
            if timer.fires_at_ms > now_ms {
                break;
            }
            self.timers.pop_front();
            fired.push(timer);
        }
        fired
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}
