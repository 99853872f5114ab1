//! Per-frame simulation tick
//!
//! Fixed order: intent, player step, camera, platform advance, particles.
//! The player resolves collisions against platform state before the field
//! moves or shrinks anything this tick.

use super::particle::ParticleColor;
use super::platform::PlatformKind;
use super::player::Maneuver;
use super::state::{GameEvent, GamePhase, Simulation};
use crate::consts::PLAYER_SIZE;
use crate::sanitize_dt;

/// Input intents for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Jump press (wall-jump)
    pub jump: bool,
    /// Dash press (falls back to a wall-jump when no dash is available)
    pub dash: bool,
}

impl TickInput {
    pub fn jump() -> Self {
        Self {
            jump: true,
            dash: false,
        }
    }

    pub fn dash() -> Self {
        Self {
            jump: false,
            dash: true,
        }
    }

    fn pressed(&self) -> bool {
        self.jump || self.dash
    }
}

/// Advance the simulation by one host frame.
///
/// A zero, negative or non-finite `dt` neutralizes the whole tick: nothing
/// moves, no input is consumed and the tick counter stays put.
pub fn tick(state: &mut Simulation, input: &TickInput, dt: f32) {
    let safe_dt = sanitize_dt(dt);
    if safe_dt == 0.0 {
        if dt != 0.0 {
            log::warn!("Ignoring invalid frame delta {dt}");
        }
        return;
    }

    // After death only the particles keep animating
    if state.phase == GamePhase::GameOver {
        state.particles.step(safe_dt);
        return;
    }

    state.time_ticks += 1;

    if input.pressed() {
        match state.player.apply_intent(input.dash, &state.viewport) {
            Some(Maneuver::Dash) => {
                state.events.push(GameEvent::Dashed);
                let at = state.player.center();
                state.burst(at, ParticleColor::Dash);
            }
            Some(Maneuver::WallJump { recharged }) => {
                state.events.push(GameEvent::WallJumped { recharged });
            }
            None => {}
        }
    }

    state
        .player
        .step(&mut state.platforms.platforms, &state.viewport, safe_dt);

    if let Some(contact) = state.player.last_contact {
        state.events.push(GameEvent::Landed {
            platform_id: contact.platform_id,
            kind: contact.kind,
        });
        if contact.points > 0 {
            state.events.push(GameEvent::Scored {
                points: contact.points,
                total: state.player.score,
            });
        }
        match contact.kind {
            PlatformKind::Spring => state.burst(contact.at, ParticleColor::Spring),
            PlatformKind::Bouncy => state.burst(contact.at, ParticleColor::Bouncy),
            PlatformKind::Breakable => {
                state.events.push(GameEvent::PlatformBroken {
                    platform_id: contact.platform_id,
                });
                state.burst(contact.at, ParticleColor::Debris);
            }
            _ => {}
        }
    }

    if !state.player.alive {
        if let Some(cause) = state.player.death {
            state.events.push(GameEvent::Died { cause });
        }
        let at = state.player.center();
        state.burst(at, ParticleColor::Death);
        state.phase = GamePhase::GameOver;
        log::info!(
            "Game over after {} ticks: score={}, height={:.0}, cause={:?}",
            state.time_ticks,
            state.player.score,
            state.max_height(),
            state.player.death
        );
    }

    state.viewport.follow(state.player.pos.y);
    state.best_y = state.best_y.min(state.player.pos.y + PLAYER_SIZE);

    state
        .platforms
        .advance(state.player.score, &state.viewport, &mut state.rng);

    state.particles.step(safe_dt);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{FRAME_DT, JUMP_FORCE};
    use crate::min_active_platforms;
    use crate::settings::Settings;
    use crate::sim::platform::Platform;
    use crate::sim::player::DeathCause;
    use glam::Vec2;

    fn run_idle(state: &mut Simulation, ticks: usize) {
        for _ in 0..ticks {
            tick(state, &TickInput::default(), FRAME_DT);
        }
    }

    #[test]
    fn test_idle_player_bounces_on_start_platform() {
        let mut state = Simulation::new(12345, Settings::default());
        let mut landed = false;
        for _ in 0..60 {
            tick(&mut state, &TickInput::default(), FRAME_DT);
            if state.player.last_contact.is_some() {
                landed = true;
                assert_eq!(state.player.vel.y, JUMP_FORCE);
            }
        }
        assert!(landed);
        assert!(state.player.alive);
        assert!(state
            .drain_events()
            .iter()
            .any(|e| matches!(e, GameEvent::Landed { kind: PlatformKind::Normal, .. })));
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_dash_emits_event_and_particles() {
        let mut state = Simulation::new(1, Settings::default());
        tick(&mut state, &TickInput::dash(), FRAME_DT);

        assert_eq!(state.player.dash_charges, 1);
        assert!(!state.particles.is_empty());
        assert_eq!(state.drain_events()[0], GameEvent::Dashed);
    }

    #[test]
    fn test_spike_ends_game() {
        let mut state = Simulation::new(3, Settings::default());
        let spike = Platform::new(999, PlatformKind::Spike, Vec2::new(100.0, 300.0));
        state.platforms.platforms.insert(0, spike);
        state.player.pos = Vec2::new(110.0, 300.0 - 24.0 + 2.0 - 5.0);
        state.player.vel = Vec2::new(0.0, 5.0);

        tick(&mut state, &TickInput::default(), FRAME_DT);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.drain_events().contains(&GameEvent::Died {
            cause: DeathCause::Spike
        }));

        // Further ticks are inert apart from particles
        let ticks = state.time_ticks;
        let pos = state.player.pos;
        let top = state.viewport.top;
        let life_before: f32 = state.particles.iter().map(|p| p.life).sum();
        assert!(!state.particles.is_empty());
        tick(&mut state, &TickInput::jump(), FRAME_DT);
        assert_eq!(state.time_ticks, ticks);
        assert_eq!(state.player.pos, pos);
        assert_eq!(state.viewport.top, top);
        assert!(state.drain_events().is_empty());
        let life_after: f32 = state.particles.iter().map(|p| p.life).sum();
        assert!(life_after < life_before);
    }

    #[test]
    fn test_breakable_emits_break_event() {
        let mut state = Simulation::new(3, Settings::default());
        let breakable = Platform::new(999, PlatformKind::Breakable, Vec2::new(100.0, 300.0));
        state.platforms.platforms.insert(0, breakable);
        state.player.pos = Vec2::new(110.0, 300.0 - 24.0 + 2.0 - 5.0);
        state.player.vel = Vec2::new(0.0, 5.0);

        tick(&mut state, &TickInput::default(), FRAME_DT);
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::PlatformBroken { platform_id: 999 }));
        let p = state.platforms.iter().find(|p| p.id == 999).unwrap();
        assert!(p.broken);
        // Collision resolved before the field shrank it this same tick
        assert_eq!(p.height, 10.0);
    }

    #[test]
    fn test_falling_out_ends_game() {
        let mut state = Simulation::new(5, Settings::default());
        state.platforms.platforms.clear();
        run_idle(&mut state, 600);
        assert!(state.is_over());
        assert_eq!(state.player.death, Some(DeathCause::Fell));
    }

    #[test]
    fn test_population_floor_holds() {
        let mut state = Simulation::new(77, Settings::default());
        for i in 0..2_000 {
            let input = if i % 40 == 0 { TickInput::jump() } else { TickInput::default() };
            tick(&mut state, &input, FRAME_DT);
            assert!(state.platforms.len() >= min_active_platforms(state.player.score));
            if state.is_over() {
                break;
            }
        }
    }

    #[test]
    fn test_invalid_dt_is_neutralized() {
        let mut state = Simulation::new(9, Settings::default());
        tick(&mut state, &TickInput::dash(), FRAME_DT);
        for _ in 0..4 {
            tick(&mut state, &TickInput::default(), FRAME_DT);
        }
        state.drain_events();

        let pos = state.player.pos;
        let vel = state.player.vel;
        let cooldown = state.player.dash_cooldown;
        let ticks = state.time_ticks;
        let platform_xs: Vec<f32> = state.platforms.iter().map(|p| p.pos.x).collect();
        let particle_lives: Vec<f32> = state.particles.iter().map(|p| p.life).collect();

        tick(&mut state, &TickInput::default(), f32::NAN);
        tick(&mut state, &TickInput::jump(), -1.0);
        tick(&mut state, &TickInput::dash(), f32::INFINITY);

        assert_eq!(state.player.pos, pos);
        assert_eq!(state.player.vel, vel);
        assert_eq!(state.player.dash_cooldown, cooldown);
        assert_eq!(state.time_ticks, ticks);
        assert!(state.drain_events().is_empty());
        let platform_xs_after: Vec<f32> = state.platforms.iter().map(|p| p.pos.x).collect();
        assert_eq!(platform_xs_after, platform_xs);
        let particle_lives_after: Vec<f32> = state.particles.iter().map(|p| p.life).collect();
        assert_eq!(particle_lives_after, particle_lives);
    }

    #[test]
    fn test_determinism() {
        let mut a = Simulation::new(99999, Settings::default());
        let mut b = Simulation::new(99999, Settings::default());

        for i in 0..600 {
            let input = match i % 50 {
                0 => TickInput::jump(),
                25 => TickInput::dash(),
                _ => TickInput::default(),
            };
            tick(&mut a, &input, FRAME_DT);
            tick(&mut b, &input, FRAME_DT);
        }

        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.player.pos, b.player.pos);
        assert_eq!(a.player.score, b.player.score);
        assert_eq!(a.platforms.len(), b.platforms.len());
        assert_eq!(a.particles.len(), b.particles.len());
        for (pa, pb) in a.platforms.iter().zip(b.platforms.iter()) {
            assert_eq!(pa.id, pb.id);
            assert_eq!(pa.kind, pb.kind);
            assert_eq!(pa.pos, pb.pos);
        }
    }
}
