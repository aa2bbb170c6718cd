//! Aim preview
//!
//! Runs a throwaway copy of the projectile along the current aim and reports
//! where it would land. Rebuilt from scratch whenever the aim changes; the
//! step cap keeps a trajectory that never resolves from running away.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{first_overlap, reflect_side_walls};
use super::state::{Bubble, BubbleColor};
use crate::direction;
use crate::settings::Settings;

/// How the simulated trajectory ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PreviewOutcome {
    /// Reached the top boundary
    Ceiling,
    /// Hit the settled bubble at this index
    Bubble(usize),
    /// Step cap reached before anything was hit
    Exhausted,
}

/// Simulated landing point for the current aim
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Preview {
    /// Top-left corner of the ghost bubble
    pub landing: Vec2,
    /// Color the shot would carry
    pub color: BubbleColor,
    pub outcome: PreviewOutcome,
    /// Steps simulated
    pub steps: u32,
}

/// Simulate a shot from `start` at `angle` against the settled `bubbles`
pub fn simulate(
    start: Vec2,
    angle: f32,
    color: BubbleColor,
    bubbles: &[Bubble],
    settings: &Settings,
) -> Preview {
    let size = settings.bubble_size;
    let max_x = settings.max_bubble_x();
    let mut pos = start;
    let mut vel = direction(angle) * settings.bubble_speed;

    for step in 1..=settings.preview_max_steps {
        pos += vel;
        reflect_side_walls(&mut pos, &mut vel, max_x);

        if pos.y <= 0.0 {
            return Preview {
                landing: Vec2::new(pos.x, 0.0),
                color,
                outcome: PreviewOutcome::Ceiling,
                steps: step,
            };
        }

        if let Some(index) = first_overlap(pos, size, bubbles) {
            // Same slot a real shot settles into
            let hit = bubbles[index].pos;
            return Preview {
                landing: Vec2::new(hit.x, hit.y + size),
                color,
                outcome: PreviewOutcome::Bubble(index),
                steps: step,
            };
        }
    }

    Preview {
        landing: pos,
        color,
        outcome: PreviewOutcome::Exhausted,
        steps: settings.preview_max_steps,
    }
}
