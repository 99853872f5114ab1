//! Simulation context and core game types
//!
//! One `Simulation` per session, owned by the host and passed to `tick`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::particle::{Particle, ParticleColor, ParticleSystem};
use super::platform::{Platform, PlatformField, PlatformKind};
use super::player::{DeathCause, Player};
use super::viewport::Viewport;
use crate::consts::*;
use crate::settings::Settings;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Run ended
    GameOver,
}

/// Things that happened during a tick, drained by the host for audio/haptics
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    Landed { platform_id: u32, kind: PlatformKind },
    Scored { points: u64, total: u64 },
    PlatformBroken { platform_id: u32 },
    Dashed,
    WallJumped { recharged: bool },
    Died { cause: DeathCause },
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct Simulation {
    /// Run seed for reproducibility
    pub seed: u64,
    pub settings: Settings,
    pub player: Player,
    pub platforms: PlatformField,
    /// Visual particles (not gameplay-affecting)
    pub particles: ParticleSystem,
    pub viewport: Viewport,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Highest point (smallest y) the player's feet have reached
    pub(crate) best_y: f32,
    pub(crate) events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
}

impl Simulation {
    /// Create a new session: generate the opening platforms and stand the
    /// player on the lowest one
    pub fn new(seed: u64, settings: Settings) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut platforms = PlatformField::new(settings.screen_width);
        platforms.generate(settings.initial_platforms, settings.start_y, &mut rng);

        let spawn = match platforms.platforms.first() {
            Some(p) => Vec2::new(
                p.pos.x + (p.width - PLAYER_SIZE) / 2.0,
                p.pos.y - PLAYER_SIZE,
            ),
            None => Vec2::new(
                (settings.screen_width - PLAYER_SIZE) / 2.0,
                settings.start_y - PLAYER_SIZE,
            ),
        };
        let player = Player::new(spawn);

        let viewport = Viewport::new(settings.screen_width, settings.screen_height);
        let particles = ParticleSystem::new(settings.max_particles());

        log::info!(
            "New session: seed={}, screen={}x{}, platforms={}, quality={}",
            seed,
            settings.screen_width,
            settings.screen_height,
            platforms.len(),
            settings.quality
        );

        Self {
            seed,
            best_y: player.pos.y + PLAYER_SIZE,
            settings,
            player,
            platforms,
            particles,
            viewport,
            phase: GamePhase::Playing,
            time_ticks: 0,
            events: Vec::new(),
            rng,
        }
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Altitude climbed above the starting floor
    pub fn max_height(&self) -> f32 {
        (self.settings.start_y - self.best_y).max(0.0)
    }

    /// Take all events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Borrowed, serializable view for rendering
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            phase: self.phase,
            tick: self.time_ticks,
            score: self.player.score,
            combo: self.player.combo,
            height: self.max_height(),
            camera_top: self.viewport.top,
            player: &self.player,
            platforms: &self.platforms.platforms,
            particles: &self.particles.particles,
        }
    }

    /// Burst sized by the quality preset
    pub(crate) fn burst(&mut self, at: Vec2, color: ParticleColor) {
        let count = self.settings.quality.burst_size();
        self.particles.spawn(at, color, count, &mut self.rng);
    }
}

/// Render view of a [`Simulation`]
#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    pub phase: GamePhase,
    pub tick: u64,
    pub score: u64,
    pub combo: f32,
    pub height: f32,
    pub camera_top: f32,
    pub player: &'a Player,
    pub platforms: &'a [Platform],
    pub particles: &'a [Particle],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_layout() {
        let sim = Simulation::new(12345, Settings::default());
        assert_eq!(sim.phase, GamePhase::Playing);
        assert_eq!(sim.platforms.len(), 12);
        assert!(sim.platforms.platforms[..3]
            .iter()
            .all(|p| p.kind == PlatformKind::Normal));

        // Player stands centered on the lowest platform
        let floor = &sim.platforms.platforms[0];
        assert_eq!(sim.player.pos.y + PLAYER_SIZE, floor.pos.y);
        assert!(sim.player.pos.x >= floor.pos.x && sim.player.pos.x + PLAYER_SIZE <= floor.right());
        assert_eq!(sim.max_height(), 0.0);
    }

    #[test]
    fn test_snapshot_serializes() {
        let sim = Simulation::new(7, Settings::default());
        let json = serde_json::to_value(sim.snapshot()).unwrap();
        assert_eq!(json["phase"], "Playing");
        assert_eq!(json["score"], 0);
        assert_eq!(json["platforms"].as_array().unwrap().len(), 12);
        assert_eq!(json["platforms"][0]["kind"], "normal");
    }

    #[test]
    fn test_event_serialization() {
        let json = serde_json::to_string(&GameEvent::Died { cause: DeathCause::Spike }).unwrap();
        assert_eq!(json, r#"{"type":"died","cause":"spike"}"#);
    }
}
