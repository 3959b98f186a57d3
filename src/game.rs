//! Frame loop driver
//!
//! Owns the game state and runs input → tick → present at a fixed rate.
//! Per frame every pending input event is drained before the simulation
//! advances, then the renderer receives a fresh `Frame`.
//!
//! Once the game is over the playfield freezes but frames keep being
//! presented (with the "Game Over" banner) until the source quits or the
//! frame limit is hit.

use std::time::{Duration, Instant};

use glam::Vec2;

use crate::consts::TICKS_PER_SECOND;
use crate::platform::{EventSource, InputEvent};
use crate::renderer::{Frame, Renderer};
use crate::settings::Rules;
use crate::sim::{GameEvent, GamePhase, GameState, ResetCause, TickInput, tick};

/// How the loop spends time between frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pacing {
    /// Sleep until the next 60 Hz deadline
    RealTime,
    /// Run frames back to back (headless runs and tests)
    Unpaced,
}

/// Result of a finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Frames presented
    pub frames: u64,
    pub score: u32,
    pub phase: GamePhase,
    /// Ended by a quit event rather than the frame limit
    pub quit: bool,
}

/// A single game session
pub struct Game {
    rules: Rules,
    state: GameState,
    input: TickInput,
    events: Vec<GameEvent>,
    frames: u64,
    quit: bool,
}

impl Game {
    pub fn new(rules: Rules) -> Self {
        log::info!(
            "New {} game: {} bounces per life, {} to win",
            rules.variant.as_str(),
            rules.max_bounces,
            rules.win_score
        );
        Self {
            state: GameState::new(&rules),
            rules,
            input: TickInput::default(),
            events: Vec::new(),
            frames: 0,
            quit: false,
        }
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for setting up scenarios
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// Events produced by the most recent step
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// Queue one input event for the next step
    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::Quit => {
                log::info!("Quit requested");
                self.quit = true;
            }
            InputEvent::KeyDown(key) => self.input.paddle_dy += key.paddle_step(),
            InputEvent::KeyUp(key) => self.input.paddle_dy -= key.paddle_step(),
            InputEvent::PointerDown { x, y } => self.input.fire_at.push(Vec2::new(x, y)),
        }
    }

    /// Run one simulation tick with the queued input
    pub fn step(&mut self) {
        let input = std::mem::take(&mut self.input);
        self.events.clear();
        tick(&mut self.state, &input, &self.rules, &mut self.events);
        self.frames += 1;

        for event in &self.events {
            match event {
                GameEvent::BallReset {
                    ball_id,
                    cause: ResetCause::BounceCap,
                } => log::debug!("Ball {ball_id} hit the bounce cap"),
                GameEvent::GameOver { score } => log::info!("Game over at {score} points"),
                _ => {}
            }
        }
    }

    /// Snapshot for the renderer
    pub fn frame(&self) -> Frame {
        Frame::capture(&self.state, self.frames)
    }

    /// Drive the loop until quit or `max_frames` frames have been presented
    pub fn run<S, R>(
        &mut self,
        source: &mut S,
        renderer: &mut R,
        pacing: Pacing,
        max_frames: Option<u64>,
    ) -> RunSummary
    where
        S: EventSource,
        R: Renderer,
    {
        let period = Duration::from_secs_f64(1.0 / TICKS_PER_SECOND as f64);
        let mut deadline = Instant::now();
        let mut pending = Vec::new();
        let mut frame = self.frame();
        let start = self.frames;

        while !self.quit {
            if max_frames.is_some_and(|limit| self.frames - start >= limit) {
                break;
            }

            pending.clear();
            source.poll(&frame, &mut pending);
            for event in pending.drain(..) {
                self.handle_event(event);
            }
            if self.quit {
                break;
            }

            self.step();
            frame = self.frame();
            renderer.present(&frame);

            if pacing == Pacing::RealTime {
                deadline += period;
                let now = Instant::now();
                if deadline > now {
                    std::thread::sleep(deadline - now);
                } else {
                    // Running behind: don't try to catch up
                    deadline = now;
                }
            }
        }

        RunSummary {
            frames: self.frames - start,
            score: self.state.score,
            phase: self.state.phase,
            quit: self.quit,
        }
    }
}
