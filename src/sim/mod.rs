//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one call = one frame)
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod body;
pub mod collision;
pub mod rect;
pub mod state;
pub mod tick;

pub use body::{Advance, Body};
pub use collision::resolve;
pub use rect::Rect;
pub use state::{
    Ball, GameEvent, GamePhase, GameState, Paddle, Projectile, ResetCause, Target,
};
pub use tick::{TickInput, tick};
