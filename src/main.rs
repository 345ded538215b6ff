//! Knoll - headless scene host
//!
//! Builds the scene, optionally replays a JSON-lines input script and
//! prints one JSON frame report per line on stdout.
//!
//! Usage: knoll [OPTIONS]
//!
//! Script lines look like
//!   {"frame": 10, "event": {"type": "click", "x": 640.0, "y": 360.0}}
//! and are applied before the tick of that frame.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use log::{error, info, warn};

use knoll::core::logging;
use knoll::core::time::{FrameTimer, StepMode};
use knoll::core::types::Vec2;
use knoll::core::{Error, Result};
use knoll::scene::{SceneConfig, SimulationState};
use knoll_protocol::parse_script;

/// Run the hill scene without a window
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Scene config file (JSON); built-in defaults when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Random seed, overriding the config file
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of frames to simulate
    #[arg(short, long, default_value_t = 600)]
    frames: u64,

    /// Seconds per frame
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// JSON-lines input script
    #[arg(long)]
    script: Option<PathBuf>,

    /// Print a frame report every N frames (0 disables reports)
    #[arg(short, long, default_value_t = 60)]
    report_every: u64,

    /// Viewport size as WIDTHxHEIGHT
    #[arg(long, default_value = "1280x720", value_parser = parse_viewport)]
    viewport: Vec2,

    /// Pace frames in wall-clock time instead of stepping by --dt
    #[arg(long)]
    realtime: bool,
}

fn parse_viewport(s: &str) -> std::result::Result<Vec2, String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let w: u32 = w.trim().parse().map_err(|e| format!("bad width '{w}': {e}"))?;
    let h: u32 = h.trim().parse().map_err(|e| format!("bad height '{h}': {e}"))?;
    if w == 0 || h == 0 {
        return Err("viewport dimensions must be positive".into());
    }
    Ok(Vec2::new(w as f32, h as f32))
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init_timestamped();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => SceneConfig::load(path)?,
        None => SceneConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if !(args.dt.is_finite() && args.dt > 0.0) {
        return Err(Error::InvalidConfig(format!("--dt {} must be positive", args.dt)));
    }

    let script = match &args.script {
        Some(path) => {
            let inputs = parse_script(&std::fs::read_to_string(path)?)?;
            info!("Loaded {} scripted inputs from {}", inputs.len(), path.display());
            inputs
        }
        None => Vec::new(),
    };

    let mut state = SimulationState::new(config, args.viewport)?;
    let mut timer = if args.realtime {
        FrameTimer::new(StepMode::Realtime)
    } else {
        FrameTimer::new(StepMode::Fixed(args.dt))
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut pending = script.iter().peekable();

    for _ in 0..args.frames {
        while let Some(input) = pending.next_if(|i| i.frame <= state.frame()) {
            state.handle_input(&input.event);
        }

        if args.realtime {
            std::thread::sleep(Duration::from_secs_f32(args.dt));
        }
        let dt = timer.tick();
        state.tick(dt);

        if args.report_every > 0 && state.frame() % args.report_every == 0 {
            serde_json::to_writer(&mut out, &state.frame_report()).map_err(std::io::Error::from)?;
            writeln!(out)?;
        }
    }
    out.flush()?;

    let skipped = pending.count();
    if skipped > 0 {
        warn!("{skipped} scripted inputs were scheduled after the last frame and never applied");
    }
    info!(
        "Simulated {} frames ({:.1}s scene time, {} day cycles, {} trees)",
        timer.frame_count(),
        timer.elapsed_secs(),
        state.atmosphere().cycle().cycles_completed(),
        state.trees().len()
    );
    if args.realtime {
        info!("Real-time pacing averaged {:.1} fps", timer.fps());
    }
    Ok(())
}
