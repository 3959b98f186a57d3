//! Capabilities shared by everything on the playfield

use super::rect::Rect;
use super::state::GameEvent;
use crate::settings::Rules;

/// Anything with an on-screen footprint (collision and rendering)
pub trait Body {
    /// Stable entity id
    fn id(&self) -> u32;

    /// Current bounding rect in integer pixels
    fn bounds(&self) -> Rect;
}

/// A body that moves once per tick
pub trait Advance: Body {
    /// Move by one fixed timestep, reporting anything notable into `events`
    fn advance(&mut self, rules: &Rules, events: &mut Vec<GameEvent>);
}
