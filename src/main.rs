//! SkyHop entry point
//!
//! Native builds run a headless autopilot session and log the outcome; the
//! browser build is driven through `skyhop::web`.

#[cfg(not(target_arch = "wasm32"))]
use skyhop::consts::{FRAME_DT, PLAYER_SIZE};
#[cfg(not(target_arch = "wasm32"))]
use skyhop::sim::{GameEvent, PlatformKind, Simulation, TickInput, tick};

/// Ticks between autopilot presses
#[cfg(not(target_arch = "wasm32"))]
const PRESS_INTERVAL: u64 = 12;
/// Longest session the demo will run (5 minutes at 60 Hz)
#[cfg(not(target_arch = "wasm32"))]
const MAX_TICKS: u64 = 60 * 60 * 5;

/// Pick an input: keep falling if something safe is underneath, otherwise
/// wall-jump (or dash past a spike)
#[cfg(not(target_arch = "wasm32"))]
fn autopilot(state: &Simulation, last_press: u64) -> TickInput {
    let player = &state.player;
    if player.vel.y <= 0.0 || state.time_ticks < last_press + PRESS_INTERVAL {
        return TickInput::default();
    }

    let feet = player.pos.y + PLAYER_SIZE;
    let below = state
        .platforms
        .iter()
        .filter(|p| !p.broken && p.pos.y >= feet)
        .filter(|p| player.pos.x + PLAYER_SIZE > p.pos.x && player.pos.x < p.pos.x + p.width)
        .min_by(|a, b| a.pos.y.total_cmp(&b.pos.y));

    match below {
        Some(p) if p.kind == PlatformKind::Spike => TickInput::dash(),
        Some(p) if p.pos.y < state.viewport.bottom() => TickInput::default(),
        _ => TickInput::jump(),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("SkyHop (native) starting...");

    // Usage: skyhop [settings.json] [seed] [quality]
    let mut args = std::env::args().skip(1);
    let mut settings = match args.next() {
        Some(path) => skyhop::Settings::load(path),
        None => skyhop::Settings::default(),
    };
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0x5EED);
    if let Some(arg) = args.next() {
        match arg.parse::<skyhop::QualityPreset>() {
            Ok(quality) => settings.quality = quality,
            Err(e) => log::warn!("Keeping {} quality: {}", settings.quality, e),
        }
    }

    let mut state = Simulation::new(seed, settings);
    let mut last_press = 0;
    let mut landings = 0u32;

    while !state.is_over() && state.time_ticks < MAX_TICKS {
        let input = autopilot(&state, last_press);
        if input.jump || input.dash {
            last_press = state.time_ticks;
        }
        tick(&mut state, &input, FRAME_DT);

        for event in state.drain_events() {
            match event {
                GameEvent::Landed { .. } => landings += 1,
                GameEvent::Scored { points, total } => {
                    log::debug!("+{points} (total {total})");
                }
                _ => {}
            }
        }
    }

    println!(
        "seed={} ticks={} score={} height={:.0} landings={} alive={}",
        seed,
        state.time_ticks,
        state.player.score,
        state.max_height(),
        landings,
        state.player.alive
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is skyhop::web::wasm_start, this is just to satisfy the compiler
}
