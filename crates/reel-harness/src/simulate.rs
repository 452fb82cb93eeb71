//! Deterministic fling simulation.
//!
//! Drags the carousel at a constant pointer speed for a few frames, releases,
//! then ticks at a fixed frame rate. One line is written per frame, as text
//! or as JSON lines, until the carousel rests or the frame budget runs out.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Args;
use reel_widgets::{Carousel, FrameSnapshot};
use serde::Serialize;
use tracing::info;

use crate::error::Result;
use crate::{build_carousel, format_snapshot, frame_duration, load_config};

#[derive(Debug, Clone, Args)]
pub struct SimulateArgs {
    /// Number of sample records.
    #[arg(long, default_value_t = 1000)]
    pub records: usize,

    /// Pointer units the content is dragged toward the start per frame.
    #[arg(long, default_value_t = 40.0, allow_negative_numbers = true)]
    pub fling: f64,

    /// Frames of dragging before release.
    #[arg(long = "drag-frames", default_value_t = 5)]
    pub drag_frames: usize,

    /// Maximum frames to tick after release.
    #[arg(long, default_value_t = 600)]
    pub frames: usize,

    /// Simulated frame rate.
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..))]
    pub fps: u32,

    /// Write JSON lines instead of text.
    #[arg(long)]
    pub json: bool,

    /// Carousel config file (TOML, or JSON with a `.json` extension).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Default for SimulateArgs {
    fn default() -> Self {
        Self {
            records: 1000,
            fling: 40.0,
            drag_frames: 5,
            frames: 600,
            fps: 60,
            json: false,
            config: None,
        }
    }
}

/// Phase of a simulated frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Drag,
    Release,
}

/// One output line.
#[derive(Debug, Clone, Serialize)]
pub struct FrameLine {
    pub frame: usize,
    pub phase: Phase,
    #[serde(flatten)]
    pub snapshot: FrameSnapshot,
}

/// Result of a simulation run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationSummary {
    pub frames: usize,
    pub settled: bool,
    pub final_snapshot: FrameSnapshot,
}

/// Run the simulation described by `args` against `carousel`.
pub fn simulate<W: Write>(
    carousel: &mut Carousel,
    args: &SimulateArgs,
    out: &mut W,
) -> Result<SimulationSummary> {
    let dt = frame_duration(args.fps)?;
    let mut frame = 0;

    carousel.on_begin_drag();
    for _ in 0..args.drag_frames {
        carousel.on_drag(-args.fling, dt);
        frame += 1;
        emit(out, args.json, frame, Phase::Drag, carousel.snapshot())?;
    }
    carousel.on_end_drag();

    let mut settled = false;
    for _ in 0..args.frames {
        let moving = carousel.tick(dt);
        frame += 1;
        emit(out, args.json, frame, Phase::Release, carousel.snapshot())?;
        if !moving {
            settled = true;
            break;
        }
    }

    Ok(SimulationSummary {
        frames: frame,
        settled,
        final_snapshot: carousel.snapshot(),
    })
}

fn emit<W: Write>(
    out: &mut W,
    json: bool,
    frame: usize,
    phase: Phase,
    snapshot: FrameSnapshot,
) -> Result<()> {
    if json {
        let line = FrameLine {
            frame,
            phase,
            snapshot,
        };
        serde_json::to_writer(&mut *out, &line)?;
        writeln!(out)?;
    } else {
        let label = match phase {
            Phase::Drag => "drag",
            Phase::Release => "free",
        };
        writeln!(out, "{frame:>5} {label:<4} {}", format_snapshot(&snapshot))?;
    }
    Ok(())
}

pub fn run_simulate(args: SimulateArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let mut carousel = build_carousel(config, args.records)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let summary = simulate(&mut carousel, &args, &mut out)?;
    info!(
        frames = summary.frames,
        settled = summary.settled,
        center = summary.final_snapshot.center_index,
        "simulation finished"
    );
    Ok(())
}
