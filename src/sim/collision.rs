//! Collision detection and scoring
//!
//! Runs once per tick after every entity has moved. The steps are ordered:
//! a ball reset by scoring is already back in the centre when bullets are
//! tested against it.

use super::body::Body;
use super::state::{GameEvent, GamePhase, GameState, ResetCause};
use crate::settings::Rules;

/// Apply every collision rule to the post-move state
pub fn resolve(state: &mut GameState, rules: &Rules, events: &mut Vec<GameEvent>) {
    score_balls_in_targets(state, rules, events);
    strike_balls_with_projectiles(state, rules, events);
    despawn_off_screen_projectiles(state, rules, events);
}

/// Ball-vs-target: one point per ball per call, then the ball resets
fn score_balls_in_targets(state: &mut GameState, rules: &Rules, events: &mut Vec<GameEvent>) {
    for ball in &mut state.balls {
        let bounds = ball.bounds();
        if !state.targets.iter().any(|t| t.bounds().overlaps(&bounds)) {
            continue;
        }

        state.score += 1;
        log::info!("Score! {} / {}", state.score, rules.win_score);
        events.push(GameEvent::Scored { score: state.score });

        if state.score >= rules.win_score && state.phase != GamePhase::GameOver {
            state.phase = GamePhase::GameOver;
            log::info!("Game over with score {}", state.score);
            events.push(GameEvent::GameOver { score: state.score });
        }

        ball.reset(rules);
        events.push(GameEvent::BallReset {
            ball_id: ball.id,
            cause: ResetCause::Scored,
        });
    }
}

/// Projectile-vs-ball: a bullet knocks every ball it touches along its own
/// heading and is spent
fn strike_balls_with_projectiles(
    state: &mut GameState,
    rules: &Rules,
    events: &mut Vec<GameEvent>,
) {
    // Removal is deferred so iteration order stays fixed
    let mut spent: Vec<u32> = Vec::new();

    for projectile in &state.projectiles {
        let hit_box = projectile.bounds();
        let direction = projectile.angle_degrees();

        for ball in &mut state.balls {
            if !ball.bounds().overlaps(&hit_box) {
                continue;
            }

            log::debug!("Bouncing ball {} at {:.2} degrees", ball.id, direction);
            let capped = ball.bounce(direction, rules);
            events.push(GameEvent::ProjectileHit {
                projectile_id: projectile.id,
                ball_id: ball.id,
                direction,
            });
            if capped {
                events.push(GameEvent::BallReset {
                    ball_id: ball.id,
                    cause: ResetCause::BounceCap,
                });
            }

            if !spent.contains(&projectile.id) {
                spent.push(projectile.id);
            }
        }
    }

    if !spent.is_empty() {
        state.projectiles.retain(|p| !spent.contains(&p.id));
    }
}

/// Off-screen despawn
fn despawn_off_screen_projectiles(
    state: &mut GameState,
    rules: &Rules,
    events: &mut Vec<GameEvent>,
) {
    state.projectiles.retain(|p| {
        if !p.off_screen(rules) {
            return true;
        }
        log::debug!(
            "Projectile {} exited screen at ({}, {}) heading {:.2} degrees",
            p.id,
            p.pixel.x,
            p.pixel.y,
            p.angle_degrees()
        );
        events.push(GameEvent::ProjectileDespawned { projectile_id: p.id });
        false
    });
}
