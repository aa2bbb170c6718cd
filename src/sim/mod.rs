//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Driven by an external fixed-interval ticker, no timers of its own
//! - Seeded RNG only
//! - Stable iteration order (settled bubbles in insertion order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod preview;
pub mod state;
pub mod tick;

pub use collision::{Aabb, first_overlap, reflect_side_walls};
pub use preview::{Preview, PreviewOutcome, simulate};
pub use state::{
    Bubble, BubbleColor, Direction, GameEvent, GamePhase, GameState, Launcher, Projectile,
};
pub use tick::{
    TickInput, aim_at, current_preview, move_launcher, refresh_preview, reset, set_aim, shoot,
    step, tick,
};
