//! Bullet Pong - steer a bouncing ball into a target by shooting it
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, collisions, scoring)
//! - `game`: Fixed-rate frame loop driving the simulation
//! - `renderer`: Render snapshot handed to whatever draws the game
//! - `platform`: Input events and input sources
//! - `settings`: Rule presets for the two game variants

pub mod game;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::{Game, Pacing, RunSummary};
pub use settings::{Rules, Variant};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Simulation rate (one tick per displayed frame)
    pub const TICKS_PER_SECOND: u32 = 60;

    /// Playfield dimensions
    pub const SCREEN_WIDTH: i32 = 800;
    pub const SCREEN_HEIGHT: i32 = 600;

    /// Ball defaults
    pub const BALL_SIZE: i32 = 10;
    /// Bottom edge bounce happens this far above the screen bottom
    pub const BALL_FLOOR_MARGIN: f32 = 25.0;

    /// Paddle defaults
    pub const PADDLE_SIZE: i32 = 15;
    pub const PADDLE_X: i32 = 50;
    /// Vertical pixels per tick while a direction key is held
    pub const PADDLE_STEP: i32 = 3;

    /// Projectile sprite size
    pub const PROJECTILE_WIDTH: i32 = 4;
    pub const PROJECTILE_HEIGHT: i32 = 10;

    /// Target zone (static, right side of the screen)
    pub const TARGET_WIDTH: i32 = 50;
    pub const TARGET_HEIGHT: i32 = 400;
    pub const TARGET_X: i32 = SCREEN_WIDTH - 60;
    pub const TARGET_Y: i32 = SCREEN_HEIGHT / 2 - 200;
}

/// Reflect a heading off a playfield edge: `(2d - 90) mod 360`
///
/// This is a fixed formula, not a surface-normal reflection. The result is
/// always in `[0, 360)`.
#[inline]
pub fn reflect_heading(degrees: f32) -> f32 {
    (2.0 * degrees - 90.0).rem_euclid(360.0)
}

/// Decompose a speed and heading (degrees) into a per-tick velocity
#[inline]
pub fn heading_to_velocity(speed: f32, degrees: f32) -> Vec2 {
    let radians = degrees.to_radians();
    Vec2::new(speed * radians.cos(), speed * radians.sin())
}

/// Angle (radians) of the straight line from `from` to `to`
#[inline]
pub fn aim_angle(from: Vec2, to: Vec2) -> f32 {
    let diff = to - from;
    diff.y.atan2(diff.x)
}
