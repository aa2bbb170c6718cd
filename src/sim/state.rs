//! Game state and core simulation types
//!
//! Positions are top-left corners in screen space: x grows right, y grows
//! down, the ceiling sits at y = 0.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::preview::Preview;
use crate::settings::Settings;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Created, `reset` not called yet
    #[default]
    NotStarted,
    /// Active gameplay
    Running,
    /// Wall reached the bottom; only `reset` leaves this phase
    GameOver,
}

/// Bubble palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BubbleColor {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
}

impl BubbleColor {
    pub const ALL: [BubbleColor; 5] = [
        BubbleColor::Red,
        BubbleColor::Blue,
        BubbleColor::Green,
        BubbleColor::Yellow,
        BubbleColor::Purple,
    ];

    /// Uniform pick from the palette
    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BubbleColor::Red => "red",
            BubbleColor::Blue => "blue",
            BubbleColor::Green => "green",
            BubbleColor::Yellow => "yellow",
            BubbleColor::Purple => "purple",
        }
    }

    /// Single-letter tag for text output
    pub fn glyph(&self) -> char {
        match self {
            BubbleColor::Red => 'R',
            BubbleColor::Blue => 'B',
            BubbleColor::Green => 'G',
            BubbleColor::Yellow => 'Y',
            BubbleColor::Purple => 'P',
        }
    }
}

/// A settled bubble
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bubble {
    pub pos: Vec2,
    pub color: BubbleColor,
}

impl Bubble {
    pub fn new(pos: Vec2, color: BubbleColor) -> Self {
        Self { pos, color }
    }

    #[inline]
    pub fn bounds(&self, size: f32) -> Aabb {
        Aabb::square(self.pos, size)
    }
}

/// The bubble in flight
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: BubbleColor,
}

/// Horizontal launcher move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

/// The launcher (the seal) at the bottom of the arena
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Launcher {
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
}

impl Launcher {
    /// Launcher centered on the arena floor
    pub fn centered(settings: &Settings) -> Self {
        Self {
            pos: Vec2::new(
                (settings.arena_width - settings.launcher_width) / 2.0,
                settings.arena_height - settings.launcher_height,
            ),
            width: settings.launcher_width,
            height: settings.launcher_height,
        }
    }

    /// Aim origin: horizontal center of the top edge
    #[inline]
    pub fn muzzle(&self) -> Vec2 {
        Vec2::new(self.pos.x + self.width / 2.0, self.pos.y)
    }

    /// Top-left corner of a bubble about to leave the launcher
    #[inline]
    pub fn launch_point(&self, bubble_size: f32) -> Vec2 {
        let muzzle = self.muzzle();
        Vec2::new(muzzle.x - bubble_size / 2.0, muzzle.y - bubble_size)
    }

    /// Step sideways unless the launcher would leave the edge margin
    pub fn step(&mut self, direction: Direction, settings: &Settings) -> bool {
        let margin = settings.launcher_margin;
        match direction {
            Direction::Left if self.pos.x > margin => {
                self.pos.x -= settings.launcher_step;
                true
            }
            Direction::Right if self.pos.x < settings.arena_width - self.width - margin => {
                self.pos.x += settings.launcher_step;
                true
            }
            _ => false,
        }
    }
}

/// Things that happened during an operation, for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A projectile left the launcher
    Fired { color: BubbleColor },
    /// The projectile became a settled bubble
    Settled {
        pos: Vec2,
        color: BubbleColor,
        /// Index of the bubble it hit (None for the ceiling)
        against: Option<usize>,
    },
    /// A fresh row was added at the ceiling
    LayerSpawned { count: usize },
    /// The whole wall moved down one row
    WallShifted { round: u32 },
    /// The wall reached the floor
    GameOver { round: u32 },
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Color source for walls, layers and next-color picks
    pub rng: Pcg32,
    /// Current phase
    pub phase: GamePhase,
    /// Shown to the player; no rule ever changes it
    pub score: u64,
    /// Settle events since reset
    pub round: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Settled bubbles in insertion order; collision scans use this order
    pub bubbles: Vec<Bubble>,
    /// Bubble in flight, if any
    pub projectile: Option<Projectile>,
    /// Current aim (radians, always inside the upward arc)
    pub aim_angle: f32,
    /// Color the next shot will carry
    pub next_color: BubbleColor,
    pub launcher: Launcher,
    /// Cached trajectory preview for the current aim
    pub preview: Option<Preview>,
    /// Events not yet drained by the presentation layer
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create an unstarted game with the given seed
    pub fn new(seed: u64, settings: &Settings) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let next_color = BubbleColor::random(&mut rng);
        Self {
            seed,
            rng,
            phase: GamePhase::NotStarted,
            score: 0,
            round: 0,
            time_ticks: 0,
            bubbles: Vec::new(),
            projectile: None,
            aim_angle: -std::f32::consts::FRAC_PI_2, // Straight up
            next_color,
            launcher: Launcher::centered(settings),
            preview: None,
            events: Vec::new(),
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Pick a palette color from the game RNG
    pub fn pick_color(&mut self) -> BubbleColor {
        BubbleColor::random(&mut self.rng)
    }

    /// Append one full row of random bubbles at height `y`
    pub fn spawn_row(&mut self, y: f32, settings: &Settings) -> usize {
        let cols = settings.columns();
        for col in 0..cols {
            let color = self.pick_color();
            let x = col as f32 * settings.bubble_size;
            self.bubbles.push(Bubble::new(Vec2::new(x, y), color));
        }
        cols as usize
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
