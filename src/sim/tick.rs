//! Fixed-interval simulation tick
//!
//! Every operation here runs to completion synchronously. Calls that make no
//! sense in the current phase (shooting with a bubble in flight, ticking after
//! game over) are silently ignored.

use glam::Vec2;

use super::collision::{first_overlap, reflect_side_walls};
use super::preview::{self, Preview};
use super::state::{Bubble, Direction, GameEvent, GamePhase, GameState, Launcher, Projectile};
use crate::settings::Settings;
use crate::{angle_toward, clamp_aim, direction};

/// Input commands gathered between two ticks
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Raw aim angle (clamped on apply)
    pub aim_angle: Option<f32>,
    /// Launcher step
    pub move_launcher: Option<Direction>,
    /// Fire (space)
    pub shoot: bool,
}

/// Apply queued input, then advance one tick
pub fn step(state: &mut GameState, input: &TickInput, settings: &Settings) {
    if let Some(dir) = input.move_launcher {
        move_launcher(state, dir, settings);
    }
    if let Some(angle) = input.aim_angle {
        set_aim(state, angle, settings);
    }
    if input.shoot {
        shoot(state, settings);
    }
    tick(state, settings);
}

/// Start a fresh game: empty arena, full wall, phase Running
pub fn reset(state: &mut GameState, settings: &Settings) {
    state.score = 0;
    state.round = 0;
    state.time_ticks = 0;
    state.bubbles.clear();
    state.projectile = None;
    state.events.clear();
    state.aim_angle = -std::f32::consts::FRAC_PI_2;
    state.launcher = Launcher::centered(settings);
    state.phase = GamePhase::Running;

    spawn_wall(state, settings);
    refresh_preview(state, settings);

    log::info!(
        "Game reset (seed {}): {} bubbles in {} rows",
        state.seed,
        state.bubbles.len(),
        settings.wall_rows
    );
}

/// Initial wall: `wall_rows` full rows from the ceiling down
fn spawn_wall(state: &mut GameState, settings: &Settings) {
    for row in 0..settings.wall_rows {
        state.spawn_row(row as f32 * settings.bubble_size, settings);
    }
}

/// Store a clamped aim angle and rebuild the preview
pub fn set_aim(state: &mut GameState, angle: f32, settings: &Settings) {
    if !state.is_running() || angle.is_nan() {
        return;
    }
    state.aim_angle = clamp_aim(angle);
    refresh_preview(state, settings);
}

/// Aim from the launcher toward a pointer position
pub fn aim_at(state: &mut GameState, pointer: Vec2, settings: &Settings) {
    let angle = angle_toward(state.launcher.muzzle(), pointer);
    set_aim(state, angle, settings);
}

/// Step the launcher sideways
pub fn move_launcher(state: &mut GameState, dir: Direction, settings: &Settings) {
    if !state.is_running() {
        return;
    }
    if state.launcher.step(dir, settings) {
        refresh_preview(state, settings);
    }
}

/// Fire the pending color along the current aim.
///
/// No-op while a projectile is already in flight.
pub fn shoot(state: &mut GameState, settings: &Settings) {
    if !state.is_running() || state.projectile.is_some() {
        return;
    }

    let color = state.next_color;
    state.projectile = Some(Projectile {
        pos: state.launcher.launch_point(settings.bubble_size),
        vel: direction(state.aim_angle) * settings.bubble_speed,
        color,
    });
    state.events.push(GameEvent::Fired { color });

    state.next_color = state.pick_color();
    refresh_preview(state, settings);
}

/// Recompute the trajectory preview for the current aim and color
pub fn refresh_preview(state: &mut GameState, settings: &Settings) -> Preview {
    let preview = preview::simulate(
        state.launcher.launch_point(settings.bubble_size),
        state.aim_angle,
        state.next_color,
        &state.bubbles,
        settings,
    );
    state.preview = Some(preview);
    preview
}

/// Current preview, rebuilding it if none is cached
pub fn current_preview(state: &mut GameState, settings: &Settings) -> Preview {
    match state.preview {
        Some(preview) => preview,
        None => refresh_preview(state, settings),
    }
}

/// Advance the projectile by one step
pub fn tick(state: &mut GameState, settings: &Settings) {
    if !state.is_running() {
        return;
    }
    let Some(mut projectile) = state.projectile else {
        return;
    };

    state.time_ticks += 1;

    projectile.pos += projectile.vel;
    reflect_side_walls(
        &mut projectile.pos,
        &mut projectile.vel,
        settings.max_bubble_x(),
    );

    if projectile.pos.y <= 0.0 {
        settle(state, projectile, None, settings);
        return;
    }

    match first_overlap(projectile.pos, settings.bubble_size, &state.bubbles) {
        Some(index) => settle(state, projectile, Some(index), settings),
        None => state.projectile = Some(projectile),
    }
}

/// Turn the projectile into a settled bubble and advance the round
fn settle(
    state: &mut GameState,
    projectile: Projectile,
    against: Option<usize>,
    settings: &Settings,
) {
    let pos = match against {
        // Slot on the launcher side of the bubble that was hit
        Some(index) => {
            let hit = state.bubbles[index].pos;
            Vec2::new(hit.x, hit.y + settings.bubble_size)
        }
        None => Vec2::new(projectile.pos.x, 0.0),
    };

    state.bubbles.push(Bubble::new(pos, projectile.color));
    state.projectile = None;
    state.events.push(GameEvent::Settled {
        pos,
        color: projectile.color,
        against,
    });
    log::debug!("Settled {:?} at ({}, {}), against {:?}", projectile.color, pos.x, pos.y, against);

    let count = state.spawn_row(0.0, settings);
    state.events.push(GameEvent::LayerSpawned { count });

    state.round += 1;
    if state.round % settings.rounds_per_shift.max(1) == 0 {
        shift_wall_down(state, settings);
    }

    refresh_preview(state, settings);
}

/// Move every settled bubble down one row, then check for game over
fn shift_wall_down(state: &mut GameState, settings: &Settings) {
    let drop = Vec2::new(0.0, settings.bubble_size);
    for bubble in &mut state.bubbles {
        bubble.pos += drop;
    }
    state.events.push(GameEvent::WallShifted { round: state.round });
    log::debug!("Wall shifted down at round {}", state.round);

    let floor_reached = state
        .bubbles
        .iter()
        .any(|b| b.pos.y + settings.bubble_size >= settings.arena_height);
    if floor_reached {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver { round: state.round });
        log::info!("Game over: wall reached the floor at round {}", state.round);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::BubbleColor;
    use std::f32::consts::{FRAC_PI_2, PI};

    fn running(seed: u64, settings: &Settings) -> GameState {
        let mut state = GameState::new(seed, settings);
        reset(&mut state, settings);
        state
    }

    /// Running state with no bubbles at all
    fn empty_arena(settings: &Settings) -> GameState {
        let mut state = running(1, settings);
        state.bubbles.clear();
        refresh_preview(&mut state, settings);
        state
    }

    fn tick_until_settled(state: &mut GameState, settings: &Settings) -> u32 {
        let mut ticks = 0;
        while state.projectile.is_some() {
            tick(state, settings);
            ticks += 1;
            assert!(ticks < 10_000, "projectile never settled");
        }
        ticks
    }

    #[test]
    fn test_reset_spawns_wall() {
        let settings = Settings::default();
        let state = running(12345, &settings);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.bubbles.len(), 200);
        assert_eq!(state.round, 0);
        assert_eq!(state.score, 0);
        assert!(state.preview.is_some());

        let last = state.bubbles.last().unwrap();
        assert_eq!(last.pos, Vec2::new(380.0, 180.0));
    }

    #[test]
    fn test_reset_restores_launch_pose() {
        let settings = Settings::default();
        let mut state = running(4, &settings);
        move_launcher(&mut state, Direction::Left, &settings);
        set_aim(&mut state, -0.4, &settings);

        reset(&mut state, &settings);
        assert_eq!(state.launcher, Launcher::centered(&settings));
        assert_eq!(state.aim_angle, -FRAC_PI_2);
    }

    #[test]
    fn test_set_aim_clamps() {
        let settings = Settings::default();
        let mut state = running(1, &settings);

        set_aim(&mut state, 0.5, &settings);
        assert_eq!(state.aim_angle, -0.01);

        set_aim(&mut state, -PI, &settings);
        assert!((state.aim_angle - (-PI + 0.01)).abs() < 1e-6);

        set_aim(&mut state, -1.0, &settings);
        assert_eq!(state.aim_angle, -1.0);

        set_aim(&mut state, f32::NAN, &settings);
        assert_eq!(state.aim_angle, -1.0);
    }

    #[test]
    fn test_aim_at_pointer() {
        let settings = Settings::default();
        let mut state = running(1, &settings);
        // Muzzle at (200, 560); pointer up and to the right at 45 degrees
        aim_at(&mut state, Vec2::new(300.0, 460.0), &settings);
        assert!((state.aim_angle - (-PI / 4.0)).abs() < 1e-5);

        // Pointer below the muzzle lands on the right-hand limit
        aim_at(&mut state, Vec2::new(100.0, 590.0), &settings);
        assert_eq!(state.aim_angle, -0.01);
    }

    #[test]
    fn test_input_ignored_before_start() {
        let settings = Settings::default();
        let mut state = GameState::new(1, &settings);
        set_aim(&mut state, -1.0, &settings);
        shoot(&mut state, &settings);
        move_launcher(&mut state, Direction::Left, &settings);
        assert_eq!(state.aim_angle, -FRAC_PI_2);
        assert!(state.projectile.is_none());
        assert_eq!(state.launcher.pos.x, 180.0);
    }

    #[test]
    fn test_shoot_while_active_is_noop() {
        let settings = Settings::default();
        let mut state = running(9, &settings);
        let color = state.next_color;

        shoot(&mut state, &settings);
        let first = state.projectile.unwrap();
        assert_eq!(first.color, color);
        let queued = state.next_color;

        shoot(&mut state, &settings);
        assert_eq!(state.projectile.unwrap(), first);
        assert_eq!(state.next_color, queued);
        assert_eq!(
            state.events.iter().filter(|e| matches!(e, GameEvent::Fired { .. })).count(),
            1
        );
    }

    #[test]
    fn test_shoot_velocity_follows_aim() {
        let settings = Settings::default();
        let mut state = running(2, &settings);
        set_aim(&mut state, -PI / 3.0, &settings);
        shoot(&mut state, &settings);
        let projectile = state.projectile.unwrap();
        assert_eq!(projectile.pos, Vec2::new(190.0, 540.0));
        assert!((projectile.vel.length() - 5.0).abs() < 1e-4);
        assert!(projectile.vel.x > 0.0 && projectile.vel.y < 0.0);
    }

    #[test]
    fn test_ceiling_settle() {
        let settings = Settings::default();
        let mut state = empty_arena(&settings);
        shoot(&mut state, &settings);
        let color = state.projectile.unwrap().color;
        tick_until_settled(&mut state, &settings);

        assert_eq!(state.round, 1);
        assert_eq!(state.bubbles[0].color, color);
        assert_eq!(state.bubbles[0].pos.y, 0.0);
        // Settled bubble plus a new layer
        assert_eq!(state.bubbles.len(), 1 + settings.columns() as usize);
        assert!(state.bubbles[1..].iter().all(|b| b.pos.y == 0.0));
    }

    #[test]
    fn test_settle_below_hit_bubble() {
        let settings = Settings::default();
        let mut state = empty_arena(&settings);
        state.bubbles.push(Bubble::new(Vec2::new(180.0, 200.0), BubbleColor::Red));
        state.bubbles.push(Bubble::new(Vec2::new(200.0, 200.0), BubbleColor::Blue));

        shoot(&mut state, &settings);
        tick_until_settled(&mut state, &settings);

        // Straight up from x=190 overlaps both; the first in order wins
        assert_eq!(state.bubbles[2].pos, Vec2::new(180.0, 220.0));
        assert!(state.events.contains(&GameEvent::Settled {
            pos: Vec2::new(180.0, 220.0),
            color: state.bubbles[2].color,
            against: Some(0),
        }));
    }

    #[test]
    fn test_preview_matches_real_shot() {
        let settings = Settings::default();
        let mut state = running(77, &settings);
        set_aim(&mut state, -1.2, &settings);
        let predicted = state.preview.unwrap().landing;

        shoot(&mut state, &settings);
        let before = state.bubbles.len();
        tick_until_settled(&mut state, &settings);
        assert_eq!(state.bubbles[before].pos, predicted);
    }

    #[test]
    fn test_every_third_round_shifts() {
        let settings = Settings::default();
        let mut state = empty_arena(&settings);
        let mut shifts = 0;

        for _ in 0..7 {
            shoot(&mut state, &settings);
            tick_until_settled(&mut state, &settings);
            shifts += state
                .drain_events()
                .iter()
                .filter(|e| matches!(e, GameEvent::WallShifted { .. }))
                .count();
        }

        assert_eq!(state.round, 7);
        assert_eq!(shifts, 2);
    }

    #[test]
    fn test_shift_moves_every_bubble_one_row() {
        let settings = Settings::default();
        let mut state = running(5, &settings);
        state.round = 2;
        let before: Vec<Vec2> = state.bubbles.iter().map(|b| b.pos).collect();

        shoot(&mut state, &settings);
        tick_until_settled(&mut state, &settings);
        assert_eq!(state.round, 3);

        for (bubble, old) in state.bubbles.iter().zip(&before) {
            assert_eq!(bubble.pos.y, old.y + settings.bubble_size);
            assert_eq!(bubble.pos.x, old.x);
        }
    }

    #[test]
    fn test_game_over_when_wall_reaches_floor() {
        let settings = Settings::default();
        let mut state = empty_arena(&settings);
        // Bottom edge one row short of the floor
        state
            .bubbles
            .push(Bubble::new(Vec2::new(0.0, 560.0), BubbleColor::Green));
        state.round = 2;

        shoot(&mut state, &settings);
        tick_until_settled(&mut state, &settings);

        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.events.iter().any(|e| matches!(e, GameEvent::GameOver { round: 3 })));
    }

    #[test]
    fn test_wall_short_of_floor_keeps_running() {
        let settings = Settings::default();
        let mut state = empty_arena(&settings);
        // Bottom edge lands at 580 after the shift, still above the floor
        state
            .bubbles
            .push(Bubble::new(Vec2::new(0.0, 540.0), BubbleColor::Green));
        state.round = 2;

        shoot(&mut state, &settings);
        tick_until_settled(&mut state, &settings);

        assert_eq!(state.round, 3);
        assert_eq!(state.bubbles[0].pos, Vec2::new(0.0, 560.0));
        assert_eq!(state.phase, GamePhase::Running);
        assert!(state.events.iter().any(|e| matches!(e, GameEvent::WallShifted { round: 3 })));
        assert!(!state.events.iter().any(|e| matches!(e, GameEvent::GameOver { .. })));
    }

    #[test]
    fn test_zero_shift_period_shifts_every_round() {
        // Built directly, so never passed through sanitized()
        let settings = Settings {
            rounds_per_shift: 0,
            ..Settings::default()
        };
        let mut state = empty_arena(&settings);

        shoot(&mut state, &settings);
        tick_until_settled(&mut state, &settings);

        assert_eq!(state.round, 1);
        assert!(state.events.iter().any(|e| matches!(e, GameEvent::WallShifted { round: 1 })));
    }

    #[test]
    fn test_game_over_freezes_state() {
        let settings = Settings::default();
        let mut state = running(3, &settings);
        state.phase = GamePhase::GameOver;
        let bubbles = state.bubbles.clone();

        set_aim(&mut state, -1.0, &settings);
        shoot(&mut state, &settings);
        for _ in 0..50 {
            tick(&mut state, &settings);
        }
        assert_eq!(state.bubbles, bubbles);
        assert!(state.projectile.is_none());
        assert_eq!(state.score, 0);

        reset(&mut state, &settings);
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_step_applies_input() {
        let settings = Settings::default();
        let mut state = empty_arena(&settings);
        let input = TickInput {
            aim_angle: Some(-1.0),
            move_launcher: Some(Direction::Right),
            shoot: true,
        };
        step(&mut state, &input, &settings);

        assert_eq!(state.launcher.pos.x, 200.0);
        assert_eq!(state.aim_angle, -1.0);
        let projectile = state.projectile.unwrap();
        // Launched from the moved launcher, then advanced one tick
        let expected = Vec2::new(210.0, 540.0) + direction(-1.0) * 5.0;
        assert!((projectile.pos - expected).length() < 1e-4);
        assert_eq!(state.time_ticks, 1);
    }
}
