//! Fixed timestep simulation tick
//!
//! One call advances the game by exactly one frame. There is no delta time.

use glam::Vec2;

use super::body::Advance;
use super::collision::resolve;
use super::state::{GameEvent, GameState};
use crate::settings::Rules;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Change to the paddle's held-key velocity
    pub paddle_dy: i32,
    /// Aim points for bullets fired this tick, in order
    pub fire_at: Vec<Vec2>,
}

/// Advance the game state by one tick
///
/// Once the game is over the playfield is frozen and input is dropped.
pub fn tick(state: &mut GameState, input: &TickInput, rules: &Rules, events: &mut Vec<GameEvent>) {
    if state.is_game_over() {
        return;
    }

    state.time_ticks += 1;

    // Input first: bullets leave from where the paddle is before it moves
    state.paddle.change_speed(0, input.paddle_dy);
    for &dest in &input.fire_at {
        let fired = state.fire_projectile(dest, rules);
        events.push(GameEvent::ProjectileFired {
            projectile_id: fired.id,
            angle_degrees: fired.angle_degrees(),
        });
    }

    state.paddle.advance(rules, events);
    for ball in &mut state.balls {
        ball.advance(rules, events);
    }
    for projectile in &mut state.projectiles {
        projectile.advance(rules, events);
    }

    resolve(state, rules, events);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::GamePhase;

    #[test]
    fn test_tick_moves_paddle() {
        let rules = Rules::default();
        let mut state = GameState::new(&rules);
        let mut events = Vec::new();

        let input = TickInput {
            paddle_dy: -3,
            ..Default::default()
        };
        tick(&mut state, &input, &rules, &mut events);
        assert_eq!(state.paddle.y, 297);

        // Velocity is held until released
        tick(&mut state, &TickInput::default(), &rules, &mut events);
        assert_eq!(state.paddle.y, 294);

        let release = TickInput {
            paddle_dy: 3,
            ..Default::default()
        };
        tick(&mut state, &release, &rules, &mut events);
        assert_eq!(state.paddle.y, 294);
        assert_eq!(state.time_ticks, 3);
    }

    #[test]
    fn test_fired_projectile_moves_on_its_first_tick() {
        let rules = Rules::default();
        let mut state = GameState::new(&rules);
        let mut events = Vec::new();

        let input = TickInput {
            fire_at: vec![Vec2::new(150.0, 300.0)],
            ..Default::default()
        };
        tick(&mut state, &input, &rules, &mut events);

        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.projectiles[0].pixel.x, 60);
        assert_eq!(state.projectiles[0].pixel.y, 300);
        assert_eq!(
            events[0],
            GameEvent::ProjectileFired {
                projectile_id: state.projectiles[0].id,
                angle_degrees: 0.0,
            }
        );
    }

    #[test]
    fn test_projectile_flies_off_and_despawns() {
        let rules = Rules::default();
        let mut state = GameState::new(&rules);
        let mut events = Vec::new();

        let input = TickInput {
            fire_at: vec![Vec2::new(50.0, 0.0)],
            ..Default::default()
        };
        tick(&mut state, &input, &rules, &mut events);

        // 300 px straight up at 10 px/tick: y = 0 after 30 ticks, gone after 31
        for _ in 1..30 {
            tick(&mut state, &TickInput::default(), &rules, &mut events);
        }
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.projectiles[0].pixel.y, 0);

        tick(&mut state, &TickInput::default(), &rules, &mut events);
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_game_over_freezes_playfield() {
        let rules = Rules::default();
        let mut state = GameState::new(&rules);
        state.phase = GamePhase::GameOver;
        let before = state.clone();
        let mut events = Vec::new();

        let input = TickInput {
            paddle_dy: 3,
            fire_at: vec![Vec2::new(10.0, 10.0)],
        };
        tick(&mut state, &input, &rules, &mut events);

        assert_eq!(state.paddle.y, before.paddle.y);
        assert_eq!(state.paddle.change_y, 0);
        assert!(state.projectiles.is_empty());
        assert_eq!(state.time_ticks, before.time_ticks);
        assert!(events.is_empty());
    }

    #[test]
    fn test_determinism() {
        let rules = Rules::default();
        let mut state1 = GameState::new(&rules);
        let mut state2 = GameState::new(&rules);
        let mut events1 = Vec::new();
        let mut events2 = Vec::new();

        let inputs = [
            TickInput {
                fire_at: vec![Vec2::new(405.0, 305.0)],
                ..Default::default()
            },
            TickInput {
                paddle_dy: 3,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for _ in 0..40 {
            for input in &inputs {
                tick(&mut state1, input, &rules, &mut events1);
                tick(&mut state2, input, &rules, &mut events2);
            }
        }

        assert_eq!(events1, events2);
        assert_eq!(state1.balls[0].pos, state2.balls[0].pos);
        assert_eq!(state1.paddle.y, state2.paddle.y);
    }
}
