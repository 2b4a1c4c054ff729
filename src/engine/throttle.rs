use crate::pointer::Position;

/// Thresholds controlling how densely markers may spawn.
#[derive(Debug, Clone)]
pub struct ThrottleConfig {
    /// Minimum time between markers (milliseconds). A sample spawns on time
    /// alone only once strictly more than this has elapsed.
    pub min_interval_ms: f64,
    /// Minimum distance between markers (pixels). A sample spawns on distance
    /// alone once it is at least this far from the last spawn.
    pub min_distance_px: f64,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            min_interval_ms: 200.0,
            min_distance_px: 100.0,
        }
    }
}

/// Mutable throttle record: where and when the last marker spawned, plus the
/// raw last-seen pointer position (spawn or not).
#[derive(Debug, Clone)]
pub struct ThrottleState {
    last_spawn_at_ms: f64,
    last_spawn_pos: Position,
    last_pointer_pos: Position,
}

impl Default for ThrottleState {
    fn default() -> Self {
        Self::new()
    }
}

impl ThrottleState {
    pub fn new() -> Self {
        Self {
            last_spawn_at_ms: 0.0,
            last_spawn_pos: Position::ORIGIN,
            last_pointer_pos: Position::ORIGIN,
        }
    }

    pub fn last_spawn_at_ms(&self) -> f64 {
        self.last_spawn_at_ms
    }

    pub fn last_spawn_pos(&self) -> Position {
        self.last_spawn_pos
    }

    pub fn last_pointer_pos(&self) -> Position {
        self.last_pointer_pos
    }

    /// Forget the last observed pointer position (pointer left the document).
    /// Spawn position and timestamp are kept.
    pub fn reset_pointer(&mut self) {
        self.last_pointer_pos = Position::ORIGIN;
    }

    /// Decide whether a gated sample at `pos` observed at `now_ms` warrants a
    /// new marker, updating the record either way.
    ///
    /// Spawns when the sample is at least `min_distance_px` from the last
    /// spawn, or strictly more than `min_interval_ms` after it. The `>=` vs
    /// `>` asymmetry is deliberate and matched by tests.
    pub fn evaluate(&mut self, pos: Position, now_ms: f64, config: &ThrottleConfig) -> bool {
        // First sample after a reset: adopt it as the last pointer position
        // so it is not treated as a huge jump from the origin sentinel.
        if self.last_pointer_pos.is_origin() {
            self.last_pointer_pos = pos;
        }

        let distance = pos.distance_to(self.last_spawn_pos);
        let elapsed = now_ms - self.last_spawn_at_ms;

        let spawn = distance >= config.min_distance_px || elapsed > config.min_interval_ms;
        if spawn {
            self.last_spawn_at_ms = now_ms;
            self.last_spawn_pos = pos;
        }
        self.last_pointer_pos = pos;

        spawn
    }
}
