use crate::engine::{TrailConfig, TrailEngine};
use crate::pointer::{PointerEvent, Position};
use crate::trace::PointerTrace;
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

// Synthetic surface the wandering pointer moves over
const SURFACE_WIDTH: f64 = 1280.0;
const SURFACE_HEIGHT: f64 = 720.0;

// ~60Hz pointer sampling
const TICK: Duration = Duration::from_millis(16);

/// `demo` subcommand: drive a synthetic wandering pointer through a live
/// engine until Ctrl+C, printing spawns as they happen. Optionally saves the
/// generated pointer trace for later `simulate`/`render` runs.
pub fn run(config: TrailConfig, seed: Option<u64>, output: Option<&Path>) -> Result<()> {
    let engine_rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    };
    let mut wander_rng = match seed {
        Some(s) => StdRng::seed_from_u64(s.wrapping_add(1)),
        None => StdRng::from_os_rng(),
    };

    let mut engine = TrailEngine::new(config, engine_rng)?;

    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })
    .context("Failed to set Ctrl+C handler")?;

    println!(
        "Wandering a synthetic pointer over a {}x{} surface",
        SURFACE_WIDTH as u32, SURFACE_HEIGHT as u32
    );
    println!("Press Ctrl+C to stop...\n");

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {elapsed_precise} {msg}")
            .unwrap(),
    );

    let start = Instant::now();
    let mut trace = PointerTrace::new();
    let mut pos = Position::new(SURFACE_WIDTH / 2.0, SURFACE_HEIGHT / 2.0);
    let mut vel = (0.0f64, 0.0f64);
    let mut spawned = 0usize;
    let mut removed = 0usize;

    // Pointer starts over the surface
    trace.push(0.0, PointerEvent::HoverEnter);
    engine.handle_event(&PointerEvent::HoverEnter, 0.0);

    while running.load(Ordering::SeqCst) {
        std::thread::sleep(TICK);
        let now_ms = start.elapsed().as_secs_f64() * 1000.0;

        removed += engine.advance(now_ms).len();

        // Random-walk acceleration with edge bounce
        vel.0 = (vel.0 + wander_rng.random_range(-3.0..3.0)).clamp(-25.0, 25.0);
        vel.1 = (vel.1 + wander_rng.random_range(-3.0..3.0)).clamp(-25.0, 25.0);
        pos.x += vel.0;
        pos.y += vel.1;
        if pos.x < 0.0 || pos.x > SURFACE_WIDTH {
            vel.0 = -vel.0;
            pos.x = pos.x.clamp(0.0, SURFACE_WIDTH);
        }
        if pos.y < 0.0 || pos.y > SURFACE_HEIGHT {
            vel.1 = -vel.1;
            pos.y = pos.y.clamp(0.0, SURFACE_HEIGHT);
        }

        // Occasional hover excursions off and back onto the active region
        if wander_rng.random_bool(0.005) {
            let event = if engine.is_hovering() {
                PointerEvent::HoverLeave
            } else {
                PointerEvent::HoverEnter
            };
            trace.push(now_ms, event.clone());
            engine.handle_event(&event, now_ms);
        }

        let event = PointerEvent::MouseMove { x: pos.x, y: pos.y };
        trace.push(now_ms, event.clone());
        if let Some(marker) = engine.handle_event(&event, now_ms) {
            spawned += 1;
            pb.println(format!(
                "  marker #{} at ({:.0}, {:.0}) {} {}",
                spawned,
                marker.position.x,
                marker.position.y,
                marker.css_color(),
                marker.css_font_size()
            ));
        }

        let live = engine.surface().map(|s| s.len()).unwrap_or(0);
        pb.set_message(format!("{} live, {} spawned", live, spawned));
        pb.tick();
    }

    pb.finish_and_clear();

    let duration = start.elapsed();
    println!("\nDemo complete! Duration: {:.1}s", duration.as_secs_f64());
    println!("  Pointer events: {}", trace.events.len());
    println!("  Markers spawned: {}", spawned);
    println!("  Markers removed: {}", removed);

    if let Some(path) = output {
        trace.save(path)?;
        println!("  Trace saved to: {}", path.display());
    }

    Ok(())
}
