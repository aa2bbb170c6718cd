//! Bubble Arena entry point
//!
//! Native builds run a headless autoplay session and print the final board.
//! The browser build is driven through `bubble_arena::web` instead.
//!
//! Usage: `bubble-arena [settings.json] [seed]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use bubble_arena::sim::{GameEvent, TickInput};
    use bubble_arena::{Arena, Settings, TextSurface};
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;
    use std::f32::consts::PI;

    /// Upper bound on ticks for one session
    const MAX_TICKS: u64 = 500_000;

    env_logger::init();
    log::info!("Bubble Arena (native autoplay) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) if path != "-" => Settings::load(&path),
        _ => Settings::default(),
    };
    let seed = match args.next().map(|s| s.parse::<u64>()) {
        Some(Ok(seed)) => seed,
        Some(Err(e)) => {
            log::warn!("Invalid seed ({}), using 0", e);
            0
        }
        None => 0,
    };

    let mut arena = Arena::new(settings, seed);
    let mut aim_rng = Pcg32::seed_from_u64(seed.wrapping_add(1));
    arena.reset();

    let mut ticks = 0u64;
    let mut shifts = 0u32;
    while !arena.is_game_over() && ticks < MAX_TICKS {
        let mut input = TickInput::default();
        if !arena.has_projectile() {
            input.aim_angle = Some(aim_rng.random_range(-PI + 0.2..-0.2));
            input.shoot = true;
        }
        arena.step(&input);
        ticks += 1;

        for event in arena.drain_events() {
            match event {
                GameEvent::WallShifted { round } => {
                    shifts += 1;
                    log::info!("Round {}: wall shifted ({} total)", round, shifts);
                }
                GameEvent::GameOver { round } => {
                    log::info!("Game over after {} rounds, {} ticks", round, ticks);
                }
                other => log::trace!("{:?}", other),
            }
        }
    }

    if !arena.is_game_over() {
        log::warn!("Stopped after {} ticks without reaching game over", ticks);
    }

    let mut surface = TextSurface::new();
    arena.present(&mut surface);
    println!("{}", surface.last);
    println!(
        "seed {}  rounds {}  shifts {}  bubbles {}  score {}",
        seed,
        arena.round(),
        shifts,
        arena.state().bubbles.len(),
        arena.score()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is bubble_arena::web::wasm_start, this is just to satisfy the compiler
}
