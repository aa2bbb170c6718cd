//! Arena settings
//!
//! Geometry and tuning for a game, loaded from JSON on native builds.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Arena geometry and tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Arena ===
    /// Arena width (pixels)
    pub arena_width: f32,
    /// Arena height (pixels); bubbles reaching it end the game
    pub arena_height: f32,

    // === Bubbles ===
    /// Bubble edge length
    pub bubble_size: f32,
    /// Projectile speed (pixels per tick)
    pub bubble_speed: f32,
    /// Rows in the initial wall
    pub wall_rows: u32,
    /// Settle events between downward shifts
    pub rounds_per_shift: u32,

    // === Launcher ===
    pub launcher_width: f32,
    pub launcher_height: f32,
    /// Horizontal distance per move command
    pub launcher_step: f32,
    /// Gap kept between launcher and side walls
    pub launcher_margin: f32,

    // === Preview ===
    /// Step cap for the aim preview
    pub preview_max_steps: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,

            bubble_size: BUBBLE_SIZE,
            bubble_speed: BUBBLE_SPEED,
            wall_rows: WALL_ROWS,
            rounds_per_shift: ROUNDS_PER_SHIFT,

            launcher_width: LAUNCHER_WIDTH,
            launcher_height: LAUNCHER_HEIGHT,
            launcher_step: LAUNCHER_STEP,
            launcher_margin: LAUNCHER_EDGE_MARGIN,

            preview_max_steps: PREVIEW_MAX_STEPS,
        }
    }
}

impl Settings {
    /// Columns in a full row of bubbles
    pub fn columns(&self) -> u32 {
        (self.arena_width / self.bubble_size)
            .floor()
            .min(MAX_COLUMNS as f32) as u32
    }

    /// Largest x a bubble's left edge may take
    #[inline]
    pub fn max_bubble_x(&self) -> f32 {
        (self.arena_width - self.bubble_size).max(0.0)
    }

    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Settings>(json).map(Settings::sanitized)
    }

    /// Serialize settings to pretty JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Clamp nonsensical values into a playable arena instead of rejecting them
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        if !(self.bubble_size.is_finite() && self.bubble_size > 0.0) {
            log::warn!("Invalid bubble_size {}, using {}", self.bubble_size, defaults.bubble_size);
            self.bubble_size = defaults.bubble_size;
        }
        if !(self.bubble_speed.is_finite() && self.bubble_speed > 0.0) {
            log::warn!("Invalid bubble_speed {}, using {}", self.bubble_speed, defaults.bubble_speed);
            self.bubble_speed = defaults.bubble_speed;
        }

        if !self.arena_width.is_finite() || self.arena_width < self.bubble_size {
            self.arena_width = self.bubble_size;
        }

        // Tiny bubbles on a wide arena would mean unbounded rows of bubbles
        let min_size = self.arena_width / MAX_COLUMNS as f32;
        if self.bubble_size < min_size {
            log::warn!("bubble_size {} too small, using {}", self.bubble_size, min_size);
            self.bubble_size = min_size;
        }

        let max_height = self.bubble_size * MAX_ARENA_ROWS as f32;
        self.launcher_height = sane_length(self.launcher_height, defaults.launcher_height)
            .min(max_height / 2.0);

        // Room for the launcher plus one bubble above it
        let min_height = self.launcher_height + self.bubble_size * 2.0;
        if !self.arena_height.is_finite() || self.arena_height < min_height {
            self.arena_height = min_height;
        }
        self.arena_height = self.arena_height.min(max_height).max(min_height);

        self.launcher_width = sane_length(self.launcher_width, defaults.launcher_width)
            .min(self.arena_width);
        self.launcher_step = sane_length(self.launcher_step, defaults.launcher_step);
        if !self.launcher_margin.is_finite() || self.launcher_margin < 0.0 {
            self.launcher_margin = 0.0;
        }

        if self.wall_rows > MAX_WALL_ROWS {
            log::warn!("wall_rows {} too large, using {}", self.wall_rows, MAX_WALL_ROWS);
            self.wall_rows = MAX_WALL_ROWS;
        }
        self.rounds_per_shift = self.rounds_per_shift.max(1);
        self.preview_max_steps = self.preview_max_steps.max(1);
        self
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    return settings;
                }
                Err(e) => log::warn!("Bad settings file {}: {}", path.display(), e),
            },
            Err(e) => log::warn!("Could not read {}: {}", path.display(), e),
        }

        log::info!("Using default settings");
        Self::default()
    }
}

fn sane_length(value: f32, fallback: f32) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        fallback
    }
}
