//! Platform abstraction layer
//!
//! Windowing backends translate their native events into `InputEvent`s and
//! hand them to the driver through an `EventSource`. Two sources ship with
//! the crate: a fixed script (tests, replays) and a seeded demo player.

use std::collections::VecDeque;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::renderer::{Frame, SpriteKind};

/// Physical keys the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    W,
    S,
    Up,
    Down,
    /// Any key without a binding
    Other,
}

impl Key {
    /// Paddle velocity change while this key is held (pixels per tick)
    pub fn paddle_step(&self) -> i32 {
        use crate::consts::PADDLE_STEP;
        match self {
            Key::W | Key::Up => -PADDLE_STEP,
            Key::S | Key::Down => PADDLE_STEP,
            Key::Other => 0,
        }
    }
}

/// A platform input event
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Window closed
    Quit,
    KeyDown(Key),
    KeyUp(Key),
    /// Mouse button pressed at a screen position
    PointerDown { x: f32, y: f32 },
}

/// Source of input events, polled once per frame without blocking
pub trait EventSource {
    /// Append every pending event to `out`
    ///
    /// `frame` is the most recently presented frame.
    fn poll(&mut self, frame: &Frame, out: &mut Vec<InputEvent>);
}

/// Replays a fixed list of `(frame, event)` pairs
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    script: VecDeque<(u64, InputEvent)>,
}

impl ScriptedInput {
    /// Events must be sorted by frame
    pub fn new(script: impl IntoIterator<Item = (u64, InputEvent)>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.script.is_empty()
    }
}

impl EventSource for ScriptedInput {
    fn poll(&mut self, frame: &Frame, out: &mut Vec<InputEvent>) {
        while let Some(&(at, event)) = self.script.front() {
            if at > frame.tick {
                break;
            }
            self.script.pop_front();
            out.push(event);
        }
    }
}

/// Seeded demo player: wanders the paddle and takes pot shots at the ball
#[derive(Debug, Clone)]
pub struct DemoInput {
    rng: Pcg32,
    held: Option<Key>,
    /// Chance per frame of firing
    pub fire_chance: f64,
    /// Chance per frame of pressing or releasing a direction key
    pub steer_chance: f64,
    /// Frames to keep showing the game over screen before quitting
    pub linger_frames: u32,
}

impl DemoInput {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            held: None,
            fire_chance: 0.08,
            steer_chance: 0.03,
            linger_frames: 120,
        }
    }

    fn steer(&mut self, out: &mut Vec<InputEvent>) {
        match self.held.take() {
            Some(key) => out.push(InputEvent::KeyUp(key)),
            None => {
                let key = if self.rng.random_bool(0.5) {
                    Key::W
                } else {
                    Key::S
                };
                self.held = Some(key);
                out.push(InputEvent::KeyDown(key));
            }
        }
    }

    fn fire(&mut self, frame: &Frame, out: &mut Vec<InputEvent>) {
        let aim = frame
            .sprites_of(SpriteKind::Ball)
            .next()
            .map(|b| b.rect.center())
            .unwrap_or(Vec2::new(400.0, 300.0));
        let x = aim.x + self.rng.random_range(-12.0f32..12.0);
        let y = aim.y + self.rng.random_range(-12.0f32..12.0);
        out.push(InputEvent::PointerDown { x, y });
    }
}

impl EventSource for DemoInput {
    fn poll(&mut self, frame: &Frame, out: &mut Vec<InputEvent>) {
        if frame.game_over {
            if self.linger_frames == 0 {
                out.push(InputEvent::Quit);
            } else {
                self.linger_frames -= 1;
            }
            return;
        }

        if self.rng.random_bool(self.steer_chance) {
            self.steer(out);
        }
        if self.rng.random_bool(self.fire_chance) {
            self.fire(frame, out);
        }
    }
}
