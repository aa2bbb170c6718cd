//! Presentation boundary
//!
//! The simulation hands a `Frame` to whatever draws it. Surfaces own no
//! simulation state and never report geometry back.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::settings::Settings;
use crate::sim::{Bubble, BubbleColor, GamePhase, GameState, Launcher, Preview, Projectile};

/// Everything a presentation layer needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub arena_width: f32,
    pub arena_height: f32,
    pub bubble_size: f32,
    pub phase: GamePhase,
    pub score: u64,
    pub round: u32,
    pub bubbles: Vec<Bubble>,
    pub projectile: Option<Projectile>,
    pub launcher: Launcher,
    pub aim_angle: f32,
    pub next_color: BubbleColor,
    pub preview: Option<Preview>,
}

impl Frame {
    pub fn capture(state: &GameState, settings: &Settings) -> Self {
        Self {
            arena_width: settings.arena_width,
            arena_height: settings.arena_height,
            bubble_size: settings.bubble_size,
            phase: state.phase,
            score: state.score,
            round: state.round,
            bubbles: state.bubbles.clone(),
            projectile: state.projectile,
            launcher: state.launcher,
            aim_angle: state.aim_angle,
            next_color: state.next_color,
            preview: state.preview,
        }
    }

    /// JSON payload for the browser page
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// A presentation collaborator
pub trait Surface {
    fn present(&mut self, frame: &Frame);
}

/// Renders frames as a character grid, one cell per bubble slot.
///
/// Settled bubbles show their color letter, the projectile `*`, the preview
/// landing `o`, the launcher `^`. Later bubbles overwrite earlier ones in the
/// same cell.
#[derive(Debug, Default)]
pub struct TextSurface {
    pub last: String,
}

impl TextSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(frame: &Frame) -> String {
        let size = frame.bubble_size;
        let cols = (frame.arena_width / size).ceil().max(1.0) as usize;
        let rows = (frame.arena_height / size).ceil().max(1.0) as usize;
        let mut grid = vec![vec!['.'; cols]; rows];

        let mut plot = |pos: Vec2, glyph: char| {
            let col = (pos.x / size).round();
            let row = (pos.y / size).round();
            if col >= 0.0 && row >= 0.0 && (col as usize) < cols && (row as usize) < rows {
                grid[row as usize][col as usize] = glyph;
            }
        };

        for bubble in &frame.bubbles {
            plot(bubble.pos, bubble.color.glyph());
        }
        if let Some(preview) = frame.preview {
            plot(preview.landing, 'o');
        }
        if let Some(projectile) = frame.projectile {
            plot(projectile.pos, '*');
        }

        let launcher = frame.launcher;
        let mut x = launcher.pos.x;
        while x < launcher.pos.x + launcher.width {
            plot(Vec2::new(x, launcher.pos.y), '^');
            x += size;
        }

        let mut out = String::with_capacity((cols + 1) * (rows + 2));
        out.push_str(&format!(
            "round {}  score {}  next {}  {:?}\n",
            frame.round,
            frame.score,
            frame.next_color.as_str(),
            frame.phase
        ));
        for row in grid {
            out.extend(row);
            out.push('\n');
        }
        out
    }
}

impl Surface for TextSurface {
    fn present(&mut self, frame: &Frame) {
        self.last = Self::render(frame);
    }
}
