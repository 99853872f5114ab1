//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (platform storage order)
//! - No rendering, I/O or platform dependencies

pub mod collision;
pub mod particle;
pub mod platform;
pub mod player;
pub mod state;
pub mod tick;
pub mod viewport;
pub mod weighted;

pub use collision::{clamp_to_walls, find_landing, lands_on, touching_wall};
pub use particle::{Particle, ParticleColor, ParticleSystem};
pub use platform::{Platform, PlatformField, PlatformKind};
pub use player::{Contact, DeathCause, Maneuver, Player, TrailPoint};
pub use state::{GameEvent, GamePhase, Simulation, Snapshot};
pub use tick::{TickInput, tick};
pub use viewport::Viewport;
pub use weighted::WeightedTable;
