use crate::engine::{ThrottleConfig, TrailConfig};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sparkle")]
#[command(about = "Cursor-trail effect engine with distance/time spawn throttling")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Wander a synthetic pointer through a live engine until Ctrl+C
    Demo {
        /// Save the generated pointer trace to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// RNG seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,

        #[command(flatten)]
        tuning: Tuning,
    },

    /// Replay a pointer trace and write the resulting marker timeline
    Simulate {
        /// Input pointer trace (JSON)
        input: PathBuf,

        /// Output timeline file (JSON)
        #[arg(short, long)]
        output: PathBuf,

        /// RNG seed for reproducible palette picks
        #[arg(long)]
        seed: Option<u64>,

        #[command(flatten)]
        tuning: Tuning,
    },

    /// Render a pointer trace to PNG frames
    Render {
        /// Input pointer trace (JSON)
        input: PathBuf,

        /// Directory for frame_NNNNNN.png output
        #[arg(short, long)]
        out_dir: PathBuf,

        /// Output frame rate
        #[arg(long, default_value_t = 60.0)]
        fps: f64,

        /// Canvas width in pixels
        #[arg(long, default_value_t = 960)]
        width: u32,

        /// Canvas height in pixels
        #[arg(long, default_value_t = 540)]
        height: u32,

        /// Background color (hex, e.g. #1a1a2e)
        #[arg(long)]
        background: Option<String>,

        /// RNG seed for reproducible palette picks
        #[arg(long)]
        seed: Option<u64>,

        #[command(flatten)]
        tuning: Tuning,
    },
}

/// Engine thresholds shared by every subcommand.
#[derive(Args)]
pub struct Tuning {
    /// Minimum time between markers (ms)
    #[arg(long, default_value_t = 200.0)]
    pub min_interval: f64,

    /// Minimum distance between markers (px)
    #[arg(long, default_value_t = 100.0)]
    pub min_distance: f64,

    /// Marker lifetime (ms)
    #[arg(long, default_value_t = 3000.0)]
    pub lifetime: f64,
}

impl Tuning {
    pub fn trail_config(&self) -> TrailConfig {
        TrailConfig {
            throttle: ThrottleConfig {
                min_interval_ms: self.min_interval,
                min_distance_px: self.min_distance,
            },
            marker_lifetime_ms: self.lifetime,
            ..TrailConfig::default()
        }
    }
}
