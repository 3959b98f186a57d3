//! Game state and core simulation types
//!
//! Everything the driver needs to reproduce a session lives here.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::body::{Advance, Body};
use super::rect::Rect;
use crate::consts::*;
use crate::settings::Rules;
use crate::{aim_angle, heading_to_velocity, reflect_heading};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Win score reached; the playfield is frozen
    GameOver,
}

/// Why a ball went back to the centre
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResetCause {
    /// Crossed the left edge
    LeftEdge,
    /// Reached the bounce cap
    BounceCap,
    /// Entered a target zone
    Scored,
}

/// Something that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ProjectileFired { projectile_id: u32, angle_degrees: f32 },
    WallBounce { ball_id: u32, direction: f32 },
    ProjectileHit { projectile_id: u32, ball_id: u32, direction: f32 },
    ProjectileDespawned { projectile_id: u32 },
    BallReset { ball_id: u32, cause: ResetCause },
    Scored { score: u32 },
    GameOver { score: u32 },
}

/// The ball the player is trying to steer into the target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub id: u32,
    /// Top-left corner, floating point
    pub pos: Vec2,
    /// Pixels per tick
    pub speed: f32,
    /// Heading in degrees
    pub direction: f32,
    /// Bounces since the last reset
    pub bounces: u32,
}

impl Ball {
    /// A ball at rest in the screen centre
    pub fn new(id: u32, rules: &Rules) -> Self {
        let mut ball = Self::at(id, Vec2::ONE);
        ball.reset(rules);
        ball
    }

    /// A ball at rest at `pos`
    pub fn at(id: u32, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            speed: 0.0,
            direction: 0.0,
            bounces: 0,
        }
    }

    /// Back to the centre, stopped, with no bounces
    pub fn reset(&mut self, rules: &Rules) {
        log::debug!(
            "Resetting ball {} from ({:.1}, {:.1}) speed={:.2} direction={:.1} bounces={}",
            self.id,
            self.pos.x,
            self.pos.y,
            self.speed,
            self.direction,
            self.bounces
        );
        let (cx, cy) = rules.center();
        self.pos = Vec2::new(cx, cy);
        self.speed = 0.0;
        self.direction = 0.0;
        self.bounces = 0;
    }

    /// Send the ball off at `direction` degrees
    ///
    /// A stopped ball restarts at the restart speed, a moving one speeds up.
    /// Returns true if this bounce hit the cap and reset the ball.
    pub fn bounce(&mut self, direction: f32, rules: &Rules) -> bool {
        self.direction = direction;
        self.bounces += 1;

        if self.speed == 0.0 {
            log::debug!("Ball {} was stopped, moving again", self.id);
            self.speed = rules.restart_speed;
        } else if self.speed >= 1.0 {
            self.speed *= rules.speed_up;
            log::debug!("Speeding up ball {} to {:.2}", self.id, self.speed);
        }

        if self.bounces >= rules.max_bounces {
            self.reset(rules);
            return true;
        }
        false
    }

    /// Per-tick displacement
    pub fn velocity(&self) -> Vec2 {
        heading_to_velocity(self.speed, self.direction)
    }

    /// Touching the top, bottom or right edge
    fn at_bouncing_edge(&self, rules: &Rules) -> bool {
        self.pos.y <= 0.0
            || self.pos.y >= rules.screen_height as f32 - BALL_FLOOR_MARGIN
            || self.pos.x >= (rules.screen_width - BALL_SIZE) as f32
    }
}

impl Body for Ball {
    fn id(&self) -> u32 {
        self.id
    }

    fn bounds(&self) -> Rect {
        Rect::at(self.pos, BALL_SIZE, BALL_SIZE)
    }
}

impl Advance for Ball {
    fn advance(&mut self, rules: &Rules, events: &mut Vec<GameEvent>) {
        self.pos += self.velocity();

        if self.at_bouncing_edge(rules) {
            let direction = reflect_heading(self.direction);
            let capped = self.bounce(direction, rules);
            events.push(GameEvent::WallBounce {
                ball_id: self.id,
                direction,
            });
            if capped {
                events.push(GameEvent::BallReset {
                    ball_id: self.id,
                    cause: ResetCause::BounceCap,
                });
            }
        }

        // The left edge is the one side that does not bounce
        if self.pos.x <= 0.0 {
            self.reset(rules);
            events.push(GameEvent::BallReset {
                ball_id: self.id,
                cause: ResetCause::LeftEdge,
            });
        }
    }
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub id: u32,
    pub x: i32,
    pub y: i32,
    /// Per-tick movement, accumulated from held keys
    pub change_x: i32,
    pub change_y: i32,
}

impl Paddle {
    pub fn new(id: u32, x: i32, y: i32) -> Self {
        Self {
            id,
            x,
            y,
            change_x: 0,
            change_y: 0,
        }
    }

    /// Adjust the held-key velocity
    pub fn change_speed(&mut self, dx: i32, dy: i32) {
        self.change_x += dx;
        self.change_y += dy;
    }

    /// Where bullets leave from
    pub fn muzzle(&self) -> IVec2 {
        IVec2::new(self.x, self.y)
    }
}

impl Body for Paddle {
    fn id(&self) -> u32 {
        self.id
    }

    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, PADDLE_SIZE, PADDLE_SIZE)
    }
}

impl Advance for Paddle {
    fn advance(&mut self, rules: &Rules, _events: &mut Vec<GameEvent>) {
        // Clamp before moving, so one tick of overshoot is possible
        let max_y = rules.screen_height - PADDLE_SIZE;
        if self.y <= 0 {
            self.y = 0;
        }
        if self.y > max_y {
            self.y = max_y;
        }

        self.x += self.change_x;
        self.y += self.change_y;
    }
}

/// A bullet travelling in a straight line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    /// Sub-pixel position
    pub pos: Vec2,
    /// Truncated position used for collision and drawing
    pub pixel: IVec2,
    /// Travel angle in radians
    pub angle: f32,
    /// Fixed at creation
    vel: Vec2,
}

impl Projectile {
    /// Fire from `start` toward `dest` at `speed` pixels per tick
    pub fn new(id: u32, start: IVec2, dest: Vec2, speed: f32) -> Self {
        let origin = start.as_vec2();
        let angle = aim_angle(origin, dest);
        Self {
            id,
            pos: origin,
            pixel: start,
            angle,
            vel: Vec2::new(angle.cos() * speed, angle.sin() * speed),
        }
    }

    /// Travel angle in degrees, the heading a struck ball takes
    pub fn angle_degrees(&self) -> f32 {
        self.angle.to_degrees()
    }

    pub fn velocity(&self) -> Vec2 {
        self.vel
    }

    /// Whether the bullet has left the playfield
    pub fn off_screen(&self, rules: &Rules) -> bool {
        self.bounds()
            .origin_outside(rules.screen_width, rules.screen_height)
    }
}

impl Body for Projectile {
    fn id(&self) -> u32 {
        self.id
    }

    fn bounds(&self) -> Rect {
        Rect::new(
            self.pixel.x,
            self.pixel.y,
            PROJECTILE_WIDTH,
            PROJECTILE_HEIGHT,
        )
    }
}

impl Advance for Projectile {
    fn advance(&mut self, _rules: &Rules, _events: &mut Vec<GameEvent>) {
        self.pos += self.vel;
        // Truncate toward zero, never round
        self.pixel = IVec2::new(self.pos.x as i32, self.pos.y as i32);
    }
}

/// The scoring zone
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Target {
    pub id: u32,
    pub rect: Rect,
}

impl Body for Target {
    fn id(&self) -> u32 {
        self.id
    }

    fn bounds(&self) -> Rect {
        self.rect
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Simulated ticks (stops counting once the game is over)
    pub time_ticks: u64,
    pub score: u32,
    pub phase: GamePhase,
    pub paddle: Paddle,
    /// Live balls (sorted by id)
    pub balls: Vec<Ball>,
    /// Live bullets (sorted by id)
    pub projectiles: Vec<Projectile>,
    /// Scoring zones (sorted by id)
    pub targets: Vec<Target>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// The starting layout: paddle on the left, ball centred, target on the right
    pub fn new(rules: &Rules) -> Self {
        let mut state = Self {
            time_ticks: 0,
            score: 0,
            phase: GamePhase::Playing,
            paddle: Paddle::new(0, PADDLE_X, rules.screen_height / 2),
            balls: Vec::new(),
            projectiles: Vec::new(),
            targets: Vec::new(),
            next_id: 1,
        };
        state.paddle.id = state.next_entity_id();

        let ball_id = state.next_entity_id();
        state.balls.push(Ball::new(ball_id, rules));

        let target_id = state.next_entity_id();
        state.targets.push(Target {
            id: target_id,
            rect: Rect::new(TARGET_X, TARGET_Y, TARGET_WIDTH, TARGET_HEIGHT),
        });

        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Fire a bullet from the paddle toward `dest`
    pub fn fire_projectile(&mut self, dest: Vec2, rules: &Rules) -> &Projectile {
        let id = self.next_entity_id();
        let projectile = Projectile::new(id, self.paddle.muzzle(), dest, rules.projectile_speed);
        log::debug!(
            "Firing projectile {} from ({}, {}) at {:.2} degrees",
            id,
            projectile.pixel.x,
            projectile.pixel.y,
            projectile.angle_degrees()
        );
        let index = self.projectiles.len();
        self.projectiles.push(projectile);
        &self.projectiles[index]
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rules() -> Rules {
        Rules::default()
    }

    #[test]
    fn test_new_ball_is_centred_and_stopped() {
        let ball = Ball::new(1, &rules());
        assert_eq!(ball.pos, Vec2::new(400.0, 300.0));
        assert_eq!(ball.speed, 0.0);
        assert_eq!(ball.bounces, 0);
    }

    #[test]
    fn test_bounce_restarts_stopped_ball() {
        let mut ball = Ball::at(1, Vec2::new(100.0, 100.0));
        ball.bounce(30.0, &rules());
        assert_eq!(ball.speed, 4.0);
        assert_eq!(ball.direction, 30.0);
        assert_eq!(ball.bounces, 1);
    }

    #[test]
    fn test_bounce_speeds_up_moving_ball() {
        let mut ball = Ball::at(1, Vec2::new(100.0, 100.0));
        ball.speed = 5.0;
        ball.bounce(90.0, &rules());
        assert!((ball.speed - 5.5).abs() < 1e-5);
    }

    #[test]
    fn test_bounce_leaves_sub_unit_speed_alone() {
        let mut ball = Ball::at(1, Vec2::new(100.0, 100.0));
        ball.speed = 0.5;
        ball.bounce(90.0, &rules());
        assert_eq!(ball.speed, 0.5);
    }

    #[test]
    fn test_bounce_cap_resets_ball() {
        let rules = rules();
        let mut ball = Ball::at(1, Vec2::new(100.0, 100.0));
        for i in 1..rules.max_bounces {
            assert!(!ball.bounce(10.0 * i as f32, &rules));
            assert_eq!(ball.bounces, i);
        }
        assert!(ball.bounce(123.0, &rules));
        assert_eq!(ball.pos, Vec2::new(400.0, 300.0));
        assert_eq!(ball.speed, 0.0);
        assert_eq!(ball.bounces, 0);
        assert_eq!(ball.direction, 0.0);
    }

    #[test]
    fn test_ball_moves_along_heading() {
        let rules = rules();
        let mut ball = Ball::at(1, Vec2::new(200.0, 200.0));
        ball.speed = 4.0;
        ball.direction = 0.0;
        let mut events = Vec::new();
        ball.advance(&rules, &mut events);
        assert!((ball.pos.x - 204.0).abs() < 1e-4);
        assert!((ball.pos.y - 200.0).abs() < 1e-4);
        assert!(events.is_empty());
    }

    #[test]
    fn test_ball_bounces_off_top_edge() {
        let rules = rules();
        let mut ball = Ball::at(1, Vec2::new(200.0, 2.0));
        ball.speed = 4.0;
        ball.direction = 270.0; // straight up
        let mut events = Vec::new();
        ball.advance(&rules, &mut events);
        assert_eq!(ball.direction, reflect_heading(270.0));
        assert_eq!(ball.bounces, 1);
        assert!((ball.speed - 4.4).abs() < 1e-5);
        assert!(matches!(events[0], GameEvent::WallBounce { ball_id: 1, .. }));
    }

    #[test]
    fn test_ball_bounces_off_floor_margin() {
        let rules = rules();
        let mut ball = Ball::at(1, Vec2::new(200.0, 574.0));
        ball.speed = 4.0;
        ball.direction = 90.0;
        let mut events = Vec::new();
        ball.advance(&rules, &mut events);
        assert_eq!(ball.bounces, 1);
    }

    #[test]
    fn test_ball_bounces_off_right_edge() {
        let rules = rules();
        let mut ball = Ball::at(1, Vec2::new(788.0, 300.0));
        ball.speed = 4.0;
        ball.direction = 0.0;
        let mut events = Vec::new();
        ball.advance(&rules, &mut events);
        assert_eq!(ball.bounces, 1);
        assert_eq!(ball.direction, 270.0);
    }

    #[test]
    fn test_ball_resets_on_left_edge() {
        let rules = rules();
        let mut ball = Ball::at(1, Vec2::new(2.0, 300.0));
        ball.speed = 4.0;
        ball.direction = 180.0;
        ball.bounces = 2;
        let mut events = Vec::new();
        ball.advance(&rules, &mut events);
        assert_eq!(ball.pos, Vec2::new(400.0, 300.0));
        assert_eq!(ball.speed, 0.0);
        assert_eq!(ball.bounces, 0);
        assert_eq!(
            events,
            vec![GameEvent::BallReset {
                ball_id: 1,
                cause: ResetCause::LeftEdge
            }]
        );
    }

    #[test]
    fn test_paddle_clamps_before_moving() {
        let rules = rules();
        let mut events = Vec::new();

        let mut paddle = Paddle::new(1, 50, -2);
        paddle.change_speed(0, -3);
        paddle.advance(&rules, &mut events);
        assert_eq!(paddle.y, -3);
        paddle.advance(&rules, &mut events);
        assert_eq!(paddle.y, -3);

        let mut paddle = Paddle::new(1, 50, 590);
        paddle.change_speed(0, 3);
        paddle.advance(&rules, &mut events);
        assert_eq!(paddle.y, 588);
        assert_eq!(paddle.x, 50);
    }

    #[test]
    fn test_projectile_aims_at_destination() {
        let p = Projectile::new(1, IVec2::new(50, 300), Vec2::new(25.0, 25.0), 10.0);
        let expected = (25.0f32 - 300.0).atan2(25.0 - 50.0);
        assert!((p.angle - expected).abs() < 1e-6);
        assert!((p.velocity().length() - 10.0).abs() < 1e-4);
        assert_eq!(p.bounds(), Rect::new(50, 300, 4, 10));
    }

    #[test]
    fn test_projectile_truncates_position() {
        let rules = rules();
        let mut events = Vec::new();
        let mut p = Projectile::new(1, IVec2::new(10, 10), Vec2::new(0.0, 0.0), 10.0);
        p.advance(&rules, &mut events);
        // 10 - 7.07 = 2.93 truncates to 2
        assert_eq!(p.pixel, IVec2::new(2, 2));
        p.advance(&rules, &mut events);
        // 2.93 - 7.07 = -4.14 truncates toward zero to -4
        assert_eq!(p.pixel, IVec2::new(-4, -4));
        assert!(p.off_screen(&rules));
    }

    #[test]
    fn test_game_state_layout() {
        let state = GameState::new(&rules());
        assert_eq!(state.paddle.bounds(), Rect::new(50, 300, 15, 15));
        assert_eq!(state.balls.len(), 1);
        assert_eq!(state.targets[0].bounds(), Rect::new(740, 100, 50, 400));
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_entity_ids_are_unique() {
        let rules = rules();
        let mut state = GameState::new(&rules);
        let a = state.fire_projectile(Vec2::new(100.0, 100.0), &rules).id;
        let b = state.fire_projectile(Vec2::new(100.0, 100.0), &rules).id;
        assert_ne!(a, b);
        assert_ne!(a, state.balls[0].id);
        assert_ne!(a, state.paddle.id);
    }

    proptest! {
        #[test]
        fn ball_speed_never_decreases_on_bounce(
            start in 0.0f32..50.0,
            dirs in proptest::collection::vec(0.0f32..360.0, 1..4)
        ) {
            let rules = Rules::default();
            let mut ball = Ball::at(1, Vec2::new(100.0, 100.0));
            ball.speed = start;
            for d in dirs {
                let before = ball.speed;
                if ball.bounce(d, &rules) {
                    break;
                }
                prop_assert!(ball.speed >= before);
            }
        }

        #[test]
        fn paddle_never_starts_a_move_out_of_bounds(
            y in -50i32..700,
            dy in -3i32..=3
        ) {
            let rules = Rules::default();
            let mut paddle = Paddle::new(1, 50, y);
            paddle.change_speed(0, dy);
            paddle.advance(&rules, &mut Vec::new());
            let low = dy.min(0);
            let high = rules.screen_height - PADDLE_SIZE + dy.max(0);
            prop_assert!(paddle.y >= low && paddle.y <= high);
        }
    }
}
