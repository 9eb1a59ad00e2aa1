use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::drawing::ImageTarget;
use crate::error::Result;
use crate::framebuffer::FrameBuffer;
use crate::input::InputScript;
use crate::player::MovementSpeeds;
use crate::renderer::FrameRenderer;
use crate::scene::Scene;

/// 1/60 s.
pub const DEFAULT_FRAME_BUDGET: Duration = Duration::from_micros(16_666);

/// Frame budget for a target rate. Zero fps means uncapped.
pub fn budget_for_fps(fps: u32) -> Duration {
    if fps == 0 {
        Duration::ZERO
    } else {
        Duration::from_micros(1_000_000 / fps as u64)
    }
}

/// How the loop measures the time step fed to movement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeStep {
    /// Wall-clock time since the previous frame, with the frame cap applied.
    Measured,
    /// A constant step and no sleeping, for reproducible output.
    Fixed(Duration),
}

/// Tracks frame start times and computes how long to sleep to hold the budget.
///
/// Timing methods take an explicit `Instant` so the arithmetic is testable.
#[derive(Clone, Copy, Debug)]
pub struct FramePacer {
    budget: Duration,
    last_frame: Instant,
}

impl FramePacer {
    pub fn new(budget: Duration, now: Instant) -> Self {
        Self {
            budget,
            last_frame: now,
        }
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Mark the start of a frame and return the time since the previous one.
    pub fn begin_frame(&mut self, now: Instant) -> Duration {
        let delta = now.saturating_duration_since(self.last_frame);
        self.last_frame = now;
        delta
    }

    /// Time left in the current frame's budget, zero once it is spent.
    pub fn remaining(&self, now: Instant) -> Duration {
        self.budget
            .saturating_sub(now.saturating_duration_since(self.last_frame))
    }

    /// Sleep out the rest of the budget. Returns the time slept.
    pub fn cap(&self) -> Duration {
        let now = Instant::now();
        let sleep = self.remaining(now);
        if sleep.is_zero() {
            if !self.budget.is_zero() {
                warn!(
                    "frame overran its budget: {:?} > {:?}",
                    now.saturating_duration_since(self.last_frame),
                    self.budget
                );
            }
        } else {
            std::thread::sleep(sleep);
        }
        sleep
    }
}

/// Which frames get written out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DumpMode {
    /// One specific frame index.
    Frame(usize),
    /// The final frame of the run.
    Last,
    /// Every n-th frame, starting with frame 0. Each file gets a numbered suffix.
    Every(usize),
}

impl DumpMode {
    /// Pick the mode from the `--dump-frame` and `--dump-every` values.
    /// A chosen frame wins; neither means the last frame.
    pub fn from_flags(frame: Option<usize>, every: Option<usize>) -> Self {
        match (frame, every) {
            (Some(n), _) => DumpMode::Frame(n),
            (None, Some(every)) => DumpMode::Every(every.max(1)),
            (None, None) => DumpMode::Last,
        }
    }
}

/// Receives completed frames.
pub trait FrameSink {
    /// Called after frame `index` (out of `total`) is composed.
    fn accept(&mut self, index: usize, total: usize, frame: &FrameBuffer) -> Result<()>;
}

/// Writes selected frames to PNG files.
pub struct PngSink {
    output_path: PathBuf,
    dump_mode: DumpMode,
    written: Vec<PathBuf>,
}

impl PngSink {
    pub fn new(output_path: impl Into<PathBuf>, dump_mode: DumpMode) -> Self {
        Self {
            output_path: output_path.into(),
            dump_mode,
            written: Vec::new(),
        }
    }

    /// Files written so far.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn wants(&self, index: usize, total: usize) -> bool {
        match self.dump_mode {
            DumpMode::Frame(n) => index == n,
            DumpMode::Last => index + 1 == total,
            DumpMode::Every(n) => index % n.max(1) == 0,
        }
    }

    /// Output path for a frame. Numbered dumps insert the index before the
    /// extension: `out.png` becomes `out_00042.png`.
    pub fn frame_path(&self, index: usize) -> PathBuf {
        match self.dump_mode {
            DumpMode::Every(_) => numbered_path(&self.output_path, index),
            _ => self.output_path.clone(),
        }
    }
}

fn numbered_path(path: &Path, index: usize) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "frame".to_string());
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_else(|| "png".to_string());
    path.with_file_name(format!("{stem}_{index:05}.{ext}"))
}

impl FrameSink for PngSink {
    fn accept(&mut self, index: usize, total: usize, frame: &FrameBuffer) -> Result<()> {
        if !self.wants(index, total) {
            return Ok(());
        }
        let path = self.frame_path(index);
        frame.save(&path)?;
        info!(
            "Frame {} saved to {} ({}x{})",
            index,
            path.display(),
            frame.width(),
            frame.height()
        );
        self.written.push(path);
        Ok(())
    }
}

/// Timing for one completed frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameStats {
    pub index: usize,
    /// Time step applied to movement.
    pub dt: Duration,
    pub slept: Duration,
}

/// The per-frame driver: read input, move the player, render, pace.
pub struct GameLoop<'a> {
    scene: &'a mut Scene,
    renderer: FrameRenderer,
    target: ImageTarget,
    input: InputScript,
    speeds: MovementSpeeds,
    time_step: TimeStep,
    pacer: FramePacer,
    frame_index: usize,
}

impl<'a> GameLoop<'a> {
    pub fn new(
        scene: &'a mut Scene,
        renderer: FrameRenderer,
        input: InputScript,
        speeds: MovementSpeeds,
        time_step: TimeStep,
        budget: Duration,
    ) -> Self {
        let (width, height) = renderer.size();
        Self {
            scene,
            renderer,
            target: ImageTarget::new(width, height),
            input,
            speeds,
            time_step,
            pacer: FramePacer::new(budget, Instant::now()),
            frame_index: 0,
        }
    }

    pub fn scene(&self) -> &Scene {
        self.scene
    }

    /// The most recently composed frame.
    pub fn frame(&self) -> &FrameBuffer {
        self.target.frame()
    }

    /// Run one iteration: integrate held keys over the elapsed time, compose
    /// the frame, hand it to `sink`, then sleep out the budget.
    pub fn run_frame(&mut self, total: usize, sink: &mut dyn FrameSink) -> Result<FrameStats> {
        let index = self.frame_index;
        let dt = match self.time_step {
            TimeStep::Measured => self.pacer.begin_frame(Instant::now()),
            TimeStep::Fixed(step) => step,
        };

        let keys = self.input.keys_for_frame(index);
        self.scene
            .player
            .integrate(&self.scene.grid, &keys, &self.speeds, dt.as_secs_f64());

        self.renderer.render(self.scene, &mut self.target);
        sink.accept(index, total, self.target.frame())?;

        let slept = match self.time_step {
            TimeStep::Measured => self.pacer.cap(),
            TimeStep::Fixed(_) => Duration::ZERO,
        };
        debug!(
            "frame {index}: dt {:?}, slept {:?}, pos ({:.3}, {:.3})",
            dt, slept, self.scene.player.pos.x, self.scene.player.pos.y
        );

        self.frame_index += 1;
        Ok(FrameStats { index, dt, slept })
    }

    /// Run `frames` iterations, calling `on_frame` after each one.
    pub fn run(
        &mut self,
        frames: usize,
        sink: &mut dyn FrameSink,
        mut on_frame: impl FnMut(&FrameStats),
    ) -> Result<()> {
        for _ in 0..frames {
            let stats = self.run_frame(frames, sink)?;
            on_frame(&stats);
        }
        Ok(())
    }
}
