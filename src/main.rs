mod cli;
mod demo;
mod engine;
mod pointer;
mod render;
mod simulator;
mod trace;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use render::RenderConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Demo {
            output,
            seed,
            tuning,
        } => {
            demo::run(tuning.trail_config(), seed, output.as_deref())?;
        }
        Commands::Simulate {
            input,
            output,
            seed,
            tuning,
        } => {
            simulator::run(&input, &output, tuning.trail_config(), seed)?;
        }
        Commands::Render {
            input,
            out_dir,
            fps,
            width,
            height,
            background,
            seed,
            tuning,
        } => {
            let render_config = RenderConfig {
                width,
                height,
                fps,
                background: render::parse_background(background.as_deref())?,
            };
            render::run(&input, &out_dir, tuning.trail_config(), render_config, seed)?;
        }
    }

    Ok(())
}
