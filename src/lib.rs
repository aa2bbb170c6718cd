//! Bubble Arena - A bubble shooter simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, game state)
//! - `arena`: Controller owning the simulation, the API input adapters call
//! - `surface`: Presentation boundary (frame snapshots, text surface)
//! - `settings`: Arena geometry and tuning

pub mod arena;
pub mod settings;
pub mod sim;
pub mod surface;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use arena::Arena;
pub use settings::Settings;
pub use surface::{Frame, Surface, TextSurface};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Interval of the external ticker driving the simulation (ms)
    pub const TICK_INTERVAL_MS: u64 = 20;

    /// Arena dimensions (pixels)
    pub const ARENA_WIDTH: f32 = 400.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Bubble edge length; bubbles are axis-aligned squares
    pub const BUBBLE_SIZE: f32 = 20.0;
    /// Projectile speed (pixels per tick)
    pub const BUBBLE_SPEED: f32 = 5.0;

    /// Rows in the initial wall
    pub const WALL_ROWS: u32 = 10;
    /// Settle events between downward shifts of the wall
    pub const ROUNDS_PER_SHIFT: u32 = 3;

    /// Launcher (the seal) defaults
    pub const LAUNCHER_WIDTH: f32 = 40.0;
    pub const LAUNCHER_HEIGHT: f32 = 40.0;
    /// Horizontal distance moved per step command
    pub const LAUNCHER_STEP: f32 = 20.0;
    /// Launcher keeps this distance from the side walls
    pub const LAUNCHER_EDGE_MARGIN: f32 = 10.0;

    /// Aim never gets closer than this to horizontal (radians)
    pub const AIM_EPSILON: f32 = 0.01;
    /// Step cap for the trajectory preview
    pub const PREVIEW_MAX_STEPS: u32 = 500;

    /// Settings limits; keep walls and text frames to a sane allocation
    pub const MAX_COLUMNS: u32 = 256;
    pub const MAX_WALL_ROWS: u32 = 256;
    pub const MAX_ARENA_ROWS: u32 = 1024;
}

/// Clamp an aim angle to the upward arc, strictly away from horizontal.
///
/// Screen coordinates grow downward, so "up" is the negative half-plane.
#[inline]
pub fn clamp_aim(angle: f32) -> f32 {
    use std::f32::consts::PI;
    angle.clamp(-PI + consts::AIM_EPSILON, -consts::AIM_EPSILON)
}

/// Angle from `origin` toward `target` (radians, screen coordinates)
#[inline]
pub fn angle_toward(origin: Vec2, target: Vec2) -> f32 {
    let d = target - origin;
    d.y.atan2(d.x)
}

/// Unit direction for an angle
#[inline]
pub fn direction(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}
