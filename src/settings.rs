//! Game rules and variant presets
//!
//! Two rule sets exist for the game. They differ only in their constants, so
//! they are presets over one `Rules` struct rather than separate code paths.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// Rule preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Variant {
    /// Short bounce cap, two goals to win, fast bullets
    #[default]
    Classic,
    /// Long bounce cap, first goal wins, slow bullets
    Simple,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Classic => "Classic",
            Variant::Simple => "Simple",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" | "default" => Some(Variant::Classic),
            "simple" | "easy" => Some(Variant::Simple),
            _ => None,
        }
    }

    /// Bounces (edge or bullet) before the ball is reset
    pub fn max_bounces(&self) -> u32 {
        match self {
            Variant::Classic => 5,
            Variant::Simple => 20,
        }
    }

    /// Score that ends the game
    pub fn win_score(&self) -> u32 {
        match self {
            Variant::Classic => 2,
            Variant::Simple => 1,
        }
    }

    /// Bullet speed in pixels per tick
    pub fn projectile_speed(&self) -> f32 {
        match self {
            Variant::Classic => 10.0,
            Variant::Simple => 5.0,
        }
    }
}

/// Constants the simulation reads every tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    /// Preset these rules were derived from
    pub variant: Variant,

    // === Playfield ===
    pub screen_width: i32,
    pub screen_height: i32,

    // === Ball ===
    /// Bounce count at which the ball resets
    pub max_bounces: u32,
    /// Speed given to a stopped ball when it is bounced
    pub restart_speed: f32,
    /// Multiplier applied to a moving ball on every bounce
    pub speed_up: f32,

    // === Scoring ===
    pub win_score: u32,

    // === Bullets ===
    pub projectile_speed: f32,
}

impl Default for Rules {
    fn default() -> Self {
        Self::from_variant(Variant::default())
    }
}

impl Rules {
    /// Rules for a preset
    pub fn from_variant(variant: Variant) -> Self {
        Self {
            variant,
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            max_bounces: variant.max_bounces(),
            restart_speed: 4.0,
            speed_up: 1.1,
            win_score: variant.win_score(),
            projectile_speed: variant.projectile_speed(),
        }
    }

    /// Switch to another preset, keeping the playfield and ball physics
    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self.max_bounces = variant.max_bounces();
        self.win_score = variant.win_score();
        self.projectile_speed = variant.projectile_speed();
        self
    }

    /// Layer a JSON override on top of `base`, falling back to `base` on error
    ///
    /// Fields missing from the override keep their `base` values. A `variant`
    /// key first switches the preset, then any explicit constants win.
    pub fn from_json(json: &str, base: Rules) -> Self {
        match Self::layer_json(json, &base) {
            Ok(rules) => {
                log::info!(
                    "Loaded {} rules override: {} bounces, {} to win, bullet speed {}",
                    rules.variant.as_str(),
                    rules.max_bounces,
                    rules.win_score,
                    rules.projectile_speed
                );
                rules
            }
            Err(e) => {
                log::warn!("Ignoring rules override ({e}), using {}", base.variant.as_str());
                base
            }
        }
    }

    fn layer_json(json: &str, base: &Rules) -> serde_json::Result<Rules> {
        let overrides: Map<String, Value> = serde_json::from_str(json)?;

        let start = match overrides.get("variant") {
            Some(variant) => base.clone().with_variant(Variant::deserialize(variant)?),
            None => base.clone(),
        };

        let mut merged = serde_json::to_value(start)?;
        if let Value::Object(fields) = &mut merged {
            fields.extend(overrides);
        }
        serde_json::from_value(merged)
    }

    /// Screen centre, where the ball resets to
    pub fn center(&self) -> (f32, f32) {
        (
            self.screen_width as f32 / 2.0,
            self.screen_height as f32 / 2.0,
        )
    }
}
