//! Arena controller
//!
//! Owns the settings and the simulation state. Input adapters call its
//! methods; presentation layers read `frame()` and `drain_events()` after
//! each call.

use glam::Vec2;

use crate::settings::Settings;
use crate::sim::{self, Direction, GameEvent, GamePhase, GameState, Preview};
use crate::surface::{Frame, Surface};

/// A single bubble arena
#[derive(Debug, Clone)]
pub struct Arena {
    settings: Settings,
    state: GameState,
}

impl Arena {
    /// Create an unstarted arena; call `reset` to begin
    pub fn new(settings: Settings, seed: u64) -> Self {
        let settings = settings.sanitized();
        let state = GameState::new(seed, &settings);
        Self { settings, state }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable state access for scripted scenarios
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// Start a new game: fresh wall, round 0, phase Running
    pub fn reset(&mut self) {
        sim::reset(&mut self.state, &self.settings);
    }

    /// Aim at a raw angle; clamped into the upward arc
    pub fn set_aim(&mut self, angle: f32) {
        sim::set_aim(&mut self.state, angle, &self.settings);
    }

    /// Aim toward a pointer position in arena coordinates
    pub fn aim_at(&mut self, pointer: Vec2) {
        sim::aim_at(&mut self.state, pointer, &self.settings);
    }

    pub fn move_launcher(&mut self, direction: Direction) {
        sim::move_launcher(&mut self.state, direction, &self.settings);
    }

    /// Fire unless a projectile is already in flight
    pub fn shoot(&mut self) {
        sim::shoot(&mut self.state, &self.settings);
    }

    /// Advance one fixed-interval step
    pub fn tick(&mut self) {
        sim::tick(&mut self.state, &self.settings);
    }

    /// Apply a batch of input and tick once
    pub fn step(&mut self, input: &sim::TickInput) {
        sim::step(&mut self.state, input, &self.settings);
    }

    /// Simulated landing point for the current aim
    pub fn preview(&mut self) -> Preview {
        sim::current_preview(&mut self.state, &self.settings)
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.state.phase == GamePhase::GameOver
    }

    pub fn has_projectile(&self) -> bool {
        self.state.projectile.is_some()
    }

    pub fn round(&self) -> u32 {
        self.state.round
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    /// Snapshot for the presentation layer
    pub fn frame(&self) -> Frame {
        Frame::capture(&self.state, &self.settings)
    }

    /// Events since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }

    /// Push the current frame to a surface
    pub fn present(&self, surface: &mut impl Surface) {
        surface.present(&self.frame());
    }
}
