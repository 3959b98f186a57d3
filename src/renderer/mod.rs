//! Render snapshot handed to the drawing backend
//!
//! The simulation never draws. Each frame the driver captures a `Frame`:
//! plain rectangles with colours plus the HUD values, which any backend can
//! paint. A logging renderer is provided for headless runs.

use serde::{Deserialize, Serialize};

use crate::sim::{Body, GameState, Rect};

/// RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    pub const BLACK: Color = Color(0, 0, 0);
    pub const WHITE: Color = Color(255, 255, 255);
    pub const GREEN: Color = Color(0, 255, 0);
    pub const RED: Color = Color(255, 0, 0);
}

/// What a sprite represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpriteKind {
    Paddle,
    Ball,
    Target,
    Projectile,
}

impl SpriteKind {
    pub fn color(&self) -> Color {
        match self {
            SpriteKind::Ball => Color::GREEN,
            SpriteKind::Target => Color::RED,
            SpriteKind::Paddle | SpriteKind::Projectile => Color::BLACK,
        }
    }
}

/// A filled rectangle to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sprite {
    /// Entity the sprite draws, stable across frames
    pub id: u32,
    pub kind: SpriteKind,
    pub rect: Rect,
    pub color: Color,
}

impl Sprite {
    fn of(kind: SpriteKind, body: &impl Body) -> Self {
        Self {
            id: body.id(),
            kind,
            rect: body.bounds(),
            color: kind.color(),
        }
    }
}

/// Everything a backend needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Frames presented so far
    pub tick: u64,
    pub background: Color,
    /// Draw order: paddle, balls, targets, projectiles
    pub sprites: Vec<Sprite>,
    pub score: u32,
    pub game_over: bool,
    /// Terminal message, shown centred near the top
    pub banner: Option<String>,
}

impl Frame {
    /// Capture the drawable state
    pub fn capture(state: &GameState, tick: u64) -> Self {
        let mut sprites = Vec::with_capacity(
            1 + state.balls.len() + state.targets.len() + state.projectiles.len(),
        );
        sprites.push(Sprite::of(SpriteKind::Paddle, &state.paddle));
        sprites.extend(state.balls.iter().map(|b| Sprite::of(SpriteKind::Ball, b)));
        sprites.extend(state.targets.iter().map(|t| Sprite::of(SpriteKind::Target, t)));
        sprites.extend(
            state
                .projectiles
                .iter()
                .map(|p| Sprite::of(SpriteKind::Projectile, p)),
        );

        let game_over = state.is_game_over();
        Self {
            tick,
            background: Color::WHITE,
            sprites,
            score: state.score,
            game_over,
            banner: game_over.then(|| "Game Over".to_string()),
        }
    }

    /// Sprites of one kind
    pub fn sprites_of(&self, kind: SpriteKind) -> impl Iterator<Item = &Sprite> {
        self.sprites.iter().filter(move |s| s.kind == kind)
    }
}

/// A drawing backend
pub trait Renderer {
    fn present(&mut self, frame: &Frame);
}

/// Headless renderer that reports frames through the log
#[derive(Debug, Clone)]
pub struct LogRenderer {
    /// Emit a summary every this many frames (0 disables summaries)
    pub summary_every: u64,
    /// Frames presented
    pub presented: u64,
    last_score: u32,
}

impl Default for LogRenderer {
    fn default() -> Self {
        Self {
            summary_every: 60,
            presented: 0,
            last_score: 0,
        }
    }
}

impl Renderer for LogRenderer {
    fn present(&mut self, frame: &Frame) {
        self.presented += 1;
        log::trace!("Frame {}: {} sprites", frame.tick, frame.sprites.len());

        if frame.score != self.last_score {
            log::info!("Score: {}", frame.score);
            self.last_score = frame.score;
        }

        if self.summary_every > 0 && frame.tick % self.summary_every == 0 {
            let ball = frame.sprites_of(SpriteKind::Ball).next();
            log::debug!(
                "Frame {} score={} bullets={} ball={:?}{}",
                frame.tick,
                frame.score,
                frame.sprites_of(SpriteKind::Projectile).count(),
                ball.map(|b| (b.rect.x, b.rect.y)),
                frame.banner.as_deref().map(|b| format!(" [{b}]")).unwrap_or_default()
            );
        }
    }
}
