//! SkyHop - vertical platformer mini-game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player physics, platforms, particles)
//! - `settings`: Data-driven screen and quality configuration
//! - `error`: Configuration errors
//! - `web`: wasm-bindgen host bindings (wasm32 only)

pub mod error;
pub mod settings;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use error::ConfigError;
pub use settings::{QualityPreset, Settings};

/// Game configuration constants
pub mod consts {
    /// Nominal host frame step (60 Hz render loop)
    pub const FRAME_DT: f32 = 1.0 / 60.0;

    /// Gravity added to vertical velocity every tick (units/tick²)
    pub const GRAVITY: f32 = 0.6;
    /// Terminal falling speed (units/tick)
    pub const MAX_SPEED: f32 = 8.0;
    /// Base bounce impulse (negative = upward)
    pub const JUMP_FORCE: f32 = -12.0;
    /// Horizontal velocity damping per tick
    pub const HORIZONTAL_DAMPING: f32 = 0.92;

    /// Player box is square
    pub const PLAYER_SIZE: f32 = 24.0;
    /// Trail history length
    pub const TRAIL_LENGTH: usize = 10;

    /// Dash tuning
    pub const MAX_DASH_CHARGES: u8 = 2;
    pub const DASH_SPEED: f32 = 15.0;
    pub const DASH_LIFT: f32 = -3.0;
    pub const DASH_COOLDOWN: f32 = 1.0;
    pub const DASH_INVINCIBILITY: f32 = 0.3;

    /// Wall-jump tuning
    pub const WALL_JUMP_SPEED: f32 = 4.0;
    pub const WALL_JUMP_FACTOR: f32 = 0.8;
    /// Distance from a screen edge that counts as wall contact
    pub const WALL_TOUCH_DISTANCE: f32 = 2.0;

    /// Combo above which the bounce force is amplified
    pub const COMBO_BOOST_THRESHOLD: f32 = 5.0;
    pub const COMBO_BOOST_PER_POINT: f32 = 0.05;
    pub const COMBO_NEUTRAL_DECAY: f32 = 0.5;
    pub const COMBO_AIR_DECAY: f32 = 0.1;

    /// Platform defaults
    pub const PLATFORM_GAP: f32 = 90.0;
    pub const PLATFORM_HEIGHT: f32 = 12.0;
    pub const PLATFORM_WIDTH: f32 = 80.0;
    pub const BREAKABLE_WIDTH: f32 = 60.0;
    pub const SPIKE_WIDTH: f32 = 50.0;
    pub const SPRING_FACTOR: f32 = 1.8;
    pub const BOUNCY_FACTOR: f32 = 1.3;
    pub const BROKEN_SHRINK_PER_TICK: f32 = 2.0;
    /// Landing tolerance below a platform's top edge
    pub const LANDING_BAND: f32 = 10.0;
    /// Horizontal inset on each side of a platform for landing checks
    pub const LANDING_INSET: f32 = 2.0;

    /// Active platform window: base count, +1 per 1000 score, up to +8
    pub const BASE_ACTIVE_PLATFORMS: usize = 12;
    pub const SCORE_PER_EXTRA_PLATFORM: u64 = 1000;
    pub const MAX_EXTRA_PLATFORMS: usize = 8;

    /// Margin below the visible window before death / eviction
    pub const OFFSCREEN_MARGIN: f32 = 100.0;
    /// Fraction of the gap a landing must climb to score
    pub const SCORE_CLIMB_FRACTION: f32 = 0.8;
    pub const BASE_LANDING_SCORE: f32 = 10.0;

    /// Camera keeps the player at or below this fraction of the screen height
    pub const CAMERA_FOLLOW_LINE: f32 = 0.4;

    /// Particle tuning
    pub const PARTICLE_SPEED: f32 = 3.0;
    pub const PARTICLE_DRIFT: f32 = 0.1;
    pub const PARTICLE_DECAY: f32 = 0.02;
}

/// Minimum number of active platforms for a given score
#[inline]
pub fn min_active_platforms(score: u64) -> usize {
    let extra = (score / consts::SCORE_PER_EXTRA_PLATFORM).min(consts::MAX_EXTRA_PLATFORMS as u64);
    consts::BASE_ACTIVE_PLATFORMS + extra as usize
}

/// Sanitize a host-supplied frame delta (NaN/negative/infinite become 0)
#[inline]
pub fn sanitize_dt(dt: f32) -> f32 {
    if dt.is_finite() && dt > 0.0 { dt } else { 0.0 }
}
