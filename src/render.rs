use crate::engine::marker::GLOW_OPACITY;
use crate::engine::{Marker, TrailConfig};
use crate::simulator::{simulate, TimelineEvent, TrailTimeline};
use crate::trace::PointerTrace;
use anyhow::{Context, Result};
use image::{Rgba, RgbaImage};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Output geometry and timing for frame rendering.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    pub fps: f64,
    pub background: Rgba<u8>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 960,
            height: 540,
            fps: 60.0,
            background: Rgba([26, 26, 46, 255]),
        }
    }
}

/// Parse a background color from a hex string like "#1a1a2e".
pub fn parse_background(input: Option<&str>) -> Result<Rgba<u8>> {
    match input {
        None => Ok(RenderConfig::default().background),
        Some(s) => {
            let hex = s.trim_start_matches('#');
            if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
                anyhow::bail!("Invalid background color: {} (expected hex like #1a1a2e)", s);
            }
            let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(0);
            let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(0);
            let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(0);
            Ok(Rgba([r, g, b, 255]))
        }
    }
}

/// One marker's lifetime window, derived from its timeline entries.
struct MarkerSpan {
    marker: Marker,
    from_ms: f64,
    until_ms: f64,
}

impl MarkerSpan {
    fn alive_at(&self, t_ms: f64) -> bool {
        t_ms >= self.from_ms && t_ms < self.until_ms
    }
}

fn marker_spans(timeline: &TrailTimeline) -> Vec<MarkerSpan> {
    let mut spans: Vec<MarkerSpan> = Vec::new();
    for entry in &timeline.entries {
        match &entry.event {
            TimelineEvent::Spawned(marker) => spans.push(MarkerSpan {
                marker: marker.clone(),
                from_ms: entry.at_ms,
                until_ms: f64::INFINITY,
            }),
            TimelineEvent::Removed(id) => {
                if let Some(span) = spans.iter_mut().rev().find(|s| s.marker.id == *id) {
                    span.until_ms = entry.at_ms;
                }
            }
        }
    }
    spans
}

/// `render` subcommand: replay a trace and rasterize the trail to
/// `frame_NNNNNN.png` files under `out_dir`.
pub fn run(
    input: &Path,
    out_dir: &Path,
    trail_config: TrailConfig,
    render_config: RenderConfig,
    seed: Option<u64>,
) -> Result<()> {
    let trace = PointerTrace::load(input)?;

    println!("Rendering trace: {}", input.display());
    println!("  Events: {}", trace.events.len());
    println!(
        "  Output: {}x{} at {:.0}fps",
        render_config.width, render_config.height, render_config.fps
    );

    let timeline = simulate(&trace, trail_config, seed)?;
    let spans = marker_spans(&timeline);
    println!("  Markers: {}", spans.len());

    // Render until the last marker is gone
    let duration_ms = spans
        .iter()
        .map(|s| s.until_ms)
        .fold(trace.duration_ms(), f64::max);
    let frame_count = ((duration_ms / 1000.0 * render_config.fps).ceil() as usize).max(1);
    println!("  Frames: {}", frame_count);

    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output directory {:?}", out_dir))?;

    render_frames(&spans, &render_config, frame_count, out_dir)?;

    println!("\nDone! Frames saved to: {}", out_dir.display());
    Ok(())
}

fn render_frames(
    spans: &[MarkerSpan],
    config: &RenderConfig,
    frame_count: usize,
    out_dir: &Path,
) -> Result<()> {
    let pb = ProgressBar::new(frame_count as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .unwrap()
            .progress_chars("#>-"),
    );

    let processed = AtomicUsize::new(0);

    let results: Vec<Result<()>> = (0..frame_count)
        .into_par_iter()
        .map(|frame_num| {
            let t_ms = frame_num as f64 * 1000.0 / config.fps;
            let mut canvas =
                RgbaImage::from_pixel(config.width, config.height, config.background);

            for span in spans.iter().filter(|s| s.alive_at(t_ms)) {
                draw_marker(&mut canvas, &span.marker);
            }

            let output_path = out_dir.join(format!("frame_{:06}.png", frame_num));
            canvas
                .save(&output_path)
                .with_context(|| format!("Failed to save frame {}", frame_num))?;

            let count = processed.fetch_add(1, Ordering::Relaxed);
            if count % 10 == 0 {
                pb.set_position(count as u64);
            }

            Ok(())
        })
        .collect();

    pb.finish_and_clear();

    for result in results {
        result?;
    }

    Ok(())
}

/// Draw one marker: a soft glow halo in the marker's own color at reduced
/// intensity, with a solid core dot on top.
fn draw_marker(canvas: &mut RgbaImage, marker: &Marker) {
    let glow_radius = marker.size_px;
    let core_radius = marker.size_px * 0.35;
    let cx = marker.position.x;
    let cy = marker.position.y;

    let min_x = ((cx - glow_radius - 1.0).max(0.0)) as u32;
    let min_y = ((cy - glow_radius - 1.0).max(0.0)) as u32;
    let max_x = ((cx + glow_radius + 1.0).min(canvas.width() as f64 - 1.0)) as u32;
    let max_y = ((cy + glow_radius + 1.0).min(canvas.height() as f64 - 1.0)) as u32;
    if min_x > max_x || min_y > max_y {
        return;
    }

    for py in min_y..=max_y {
        for px in min_x..=max_x {
            let dx = px as f64 - cx;
            let dy = py as f64 - cy;
            let dist = (dx * dx + dy * dy).sqrt();
            if dist > glow_radius {
                continue;
            }

            let alpha = if dist <= core_radius {
                // Core dot, anti-aliased at its rim
                let edge = (core_radius - dist).clamp(0.0, 1.0);
                let halo = GLOW_OPACITY;
                halo + (1.0 - halo) * edge
            } else {
                // Quadratic falloff from the core out to the glow radius
                let t = (dist - core_radius) / (glow_radius - core_radius).max(1e-6);
                GLOW_OPACITY * (1.0 - t) * (1.0 - t)
            };

            let alpha = (alpha * 255.0) as u8;
            if alpha == 0 {
                continue;
            }

            let pixel = canvas.get_pixel_mut(px, py);
            pixel[0] = blend_channel(pixel[0], marker.color[0], alpha);
            pixel[1] = blend_channel(pixel[1], marker.color[1], alpha);
            pixel[2] = blend_channel(pixel[2], marker.color[2], alpha);
        }
    }
}

/// Blend a single color channel with alpha
fn blend_channel(bg: u8, fg: u8, alpha: u8) -> u8 {
    let bg = bg as u32;
    let fg = fg as u32;
    let alpha = alpha as u32;
    ((bg * (255 - alpha) + fg * alpha) / 255) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::MarkerId;
    use crate::pointer::Position;

    fn make_marker(id: u64, x: f64, y: f64) -> Marker {
        Marker {
            id: MarkerId(id),
            position: Position::new(x, y),
            color: [255, 215, 0],
            size_px: 20.0,
            spawned_at_ms: 0.0,
        }
    }

    #[test]
    fn test_parse_background_default_and_hex() {
        assert_eq!(parse_background(None).unwrap(), Rgba([26, 26, 46, 255]));
        assert_eq!(
            parse_background(Some("#102030")).unwrap(),
            Rgba([16, 32, 48, 255])
        );
        assert!(parse_background(Some("not-a-color")).is_err());
    }

    #[test]
    fn test_draw_marker_modifies_canvas() {
        let mut canvas = RgbaImage::from_pixel(100, 100, Rgba([0, 0, 0, 255]));
        draw_marker(&mut canvas, &make_marker(1, 50.0, 50.0));

        let center = canvas.get_pixel(50, 50);
        assert!(center[0] > 0, "core should be drawn at the marker position");

        // Well outside the glow radius nothing changes
        let corner = canvas.get_pixel(0, 0);
        assert_eq!(corner[0], 0);
    }

    #[test]
    fn test_draw_marker_off_canvas_is_safe() {
        let mut canvas = RgbaImage::from_pixel(50, 50, Rgba([0, 0, 0, 255]));
        // Mostly outside the canvas; must clip, not panic
        draw_marker(&mut canvas, &make_marker(1, -5.0, -5.0));
        draw_marker(&mut canvas, &make_marker(2, 49.0, 49.0));
        draw_marker(&mut canvas, &make_marker(3, 500.0, 500.0));
    }

    #[test]
    fn test_marker_spans_pair_spawn_and_removal() {
        use crate::simulator::TimelineEntry;

        let marker = make_marker(7, 10.0, 10.0);
        let timeline = TrailTimeline {
            entries: vec![
                TimelineEntry {
                    at_ms: 100.0,
                    event: TimelineEvent::Spawned(marker.clone()),
                },
                TimelineEntry {
                    at_ms: 3100.0,
                    event: TimelineEvent::Removed(marker.id),
                },
            ],
        };

        let spans = marker_spans(&timeline);
        assert_eq!(spans.len(), 1);
        assert!(spans[0].alive_at(100.0));
        assert!(spans[0].alive_at(3099.9));
        assert!(!spans[0].alive_at(3100.0), "absent once the timer fires");
        assert!(!spans[0].alive_at(50.0));
    }
}
