//! Bullet Pong entry point
//!
//! Runs a headless session: a seeded demo player drives the game, frames are
//! reported through the log, and the final frame is printed as JSON.

use anyhow::{Context, Result};
use clap::Parser;

use bullet_pong::platform::DemoInput;
use bullet_pong::renderer::LogRenderer;
use bullet_pong::{Game, Pacing, Rules, Variant};

#[derive(Parser, Debug)]
#[command(about = "Shoot the ball into the target before it runs out of bounces", version)]
struct Args {
    /// Rule preset: classic or simple
    #[arg(long, default_value = "classic")]
    variant: String,
    /// JSON rules override, e.g. '{"win_score": 3}'
    #[arg(long)]
    rules: Option<String>,
    /// Seed for the demo player
    #[arg(long, default_value_t = 1)]
    seed: u64,
    /// Stop after this many frames
    #[arg(long, default_value_t = 60 * 60)]
    frames: u64,
    /// Pace frames at 60 Hz instead of running flat out
    #[arg(long)]
    realtime: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let variant = Variant::from_str(&args.variant)
        .with_context(|| format!("unknown variant {:?}", args.variant))?;
    let base = Rules::from_variant(variant);
    let rules = match &args.rules {
        Some(json) => Rules::from_json(json, base),
        None => base,
    };

    log::info!("Bullet Pong (headless) starting with seed {}", args.seed);

    let mut game = Game::new(rules);
    let mut input = DemoInput::new(args.seed);
    let mut renderer = LogRenderer::default();
    let pacing = if args.realtime {
        Pacing::RealTime
    } else {
        Pacing::Unpaced
    };

    let summary = game.run(&mut input, &mut renderer, pacing, Some(args.frames));
    log::info!(
        "Finished after {} frames: score {}/{} ({:?}{})",
        summary.frames,
        summary.score,
        game.rules().win_score,
        summary.phase,
        if summary.quit { ", quit" } else { "" }
    );

    let json = serde_json::to_string_pretty(&game.frame()).context("serializing final frame")?;
    println!("{json}");
    Ok(())
}
