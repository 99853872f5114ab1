//! Player kinematics, platform effects and control intents

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{clamp_to_walls, find_landing, touching_wall};
use super::platform::{Platform, PlatformKind};
use super::viewport::Viewport;
use crate::consts::*;
use crate::sanitize_dt;

/// Trail point for rendering
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrailPoint {
    pub pos: Vec2,
    /// 1.0 for the newest point, fading toward 0 for the oldest
    pub fade: f32,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeathCause {
    Spike,
    Fell,
}

/// A platform contact resolved during the last step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub platform_id: u32,
    pub kind: PlatformKind,
    /// Points awarded by this landing (0 if it did not climb enough)
    pub points: u64,
    /// Bottom-center of the player at contact
    pub at: Vec2,
}

/// Result of a jump/dash intent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Maneuver {
    Dash,
    WallJump { recharged: bool },
}

/// The player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left of the player box
    pub pos: Vec2,
    pub vel: Vec2,
    /// Facing direction, -1 or +1
    pub direction: f32,
    pub alive: bool,
    pub score: u64,
    pub combo: f32,
    pub dash_charges: u8,
    /// Seconds until dash is ready again (<= 0 means ready)
    pub dash_cooldown: f32,
    /// Seconds of spike immunity left (<= 0 means vulnerable)
    pub invincible: f32,
    /// Recent positions, newest first
    pub trail: Vec<TrailPoint>,
    /// y of the last platform landed on
    pub last_platform_y: f32,
    /// Platform resolved during the last step, if any
    #[serde(skip)]
    pub last_contact: Option<Contact>,
    #[serde(skip)]
    pub death: Option<DeathCause>,
}

impl Player {
    /// A player with its box at `pos`, standing on the floor its feet touch
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            direction: 1.0,
            alive: true,
            score: 0,
            combo: 0.0,
            dash_charges: MAX_DASH_CHARGES,
            dash_cooldown: 0.0,
            invincible: 0.0,
            trail: Vec::with_capacity(TRAIL_LENGTH + 1),
            last_platform_y: pos.y + PLAYER_SIZE,
            last_contact: None,
            death: None,
        }
    }

    /// Bottom-center of the player box
    #[inline]
    pub fn feet(&self) -> Vec2 {
        Vec2::new(self.pos.x + PLAYER_SIZE / 2.0, self.pos.y + PLAYER_SIZE)
    }

    /// Center of the player box
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(PLAYER_SIZE / 2.0)
    }

    /// Record current position to the trail and refresh fades
    pub fn record_trail(&mut self) {
        self.trail.insert(0, TrailPoint { pos: self.pos, fade: 1.0 });
        self.trail.truncate(TRAIL_LENGTH);
        let len = self.trail.len() as f32;
        for (i, point) in self.trail.iter_mut().enumerate() {
            point.fade = 1.0 - i as f32 / len;
        }
    }

    fn kill(&mut self, cause: DeathCause) {
        self.alive = false;
        self.death = Some(cause);
    }

    /// Advance one tick: timers, trail, gravity, drag, walls, platform
    /// contact and the fall-out check.
    ///
    /// Only the first platform (in storage order) the player lands on is
    /// resolved. Breakable platforms are marked broken here.
    ///
    /// A zero, negative or non-finite `dt` clamps to zero and leaves the
    /// player untouched.
    pub fn step(&mut self, platforms: &mut [Platform], viewport: &Viewport, dt: f32) {
        self.last_contact = None;
        let dt = sanitize_dt(dt);
        if !self.alive || dt == 0.0 {
            return;
        }

        self.dash_cooldown -= dt;
        self.invincible -= dt;

        self.record_trail();

        // Position moves with last tick's velocity, then gravity lands
        self.pos.y += self.vel.y;
        self.vel.y = (self.vel.y + GRAVITY).min(MAX_SPEED);

        self.pos.x += self.vel.x;
        self.vel.x *= HORIZONTAL_DAMPING;
        clamp_to_walls(&mut self.pos, &mut self.vel, viewport.width);

        match find_landing(self.pos, self.vel.y, platforms) {
            Some(index) => {
                let platform = &mut platforms[index];
                if platform.kind == PlatformKind::Spike && self.invincible <= 0.0 {
                    self.kill(DeathCause::Spike);
                    return;
                }
                self.land(platform);
            }
            None => {
                if self.vel.y > 0.0 {
                    self.combo = (self.combo - COMBO_AIR_DECAY).max(0.0);
                }
            }
        }

        if self.pos.y > viewport.kill_line() {
            self.kill(DeathCause::Fell);
        }
    }

    /// Bounce off a platform, applying its effect and scoring
    fn land(&mut self, platform: &mut Platform) {
        let force = match platform.kind {
            PlatformKind::Spring => JUMP_FORCE * SPRING_FACTOR,
            PlatformKind::Bouncy => platform.bounce_force,
            _ => JUMP_FORCE,
        };

        // Boost uses the combo held on arrival
        let force = if self.combo > COMBO_BOOST_THRESHOLD {
            force * (1.0 + self.combo * COMBO_BOOST_PER_POINT)
        } else {
            force
        };

        match platform.kind {
            PlatformKind::Spring | PlatformKind::Bouncy => self.combo += 1.0,
            PlatformKind::Breakable => platform.broken = true,
            _ => self.combo = (self.combo - COMBO_NEUTRAL_DECAY).max(0.0),
        }

        self.vel.y = force;
        self.pos.y = platform.top() - PLAYER_SIZE;

        let climbed = self.last_platform_y - platform.top();
        let points = if climbed > SCORE_CLIMB_FRACTION * PLATFORM_GAP {
            (BASE_LANDING_SCORE + self.combo).floor() as u64
        } else {
            0
        };
        self.score += points;
        self.last_platform_y = platform.top();

        self.last_contact = Some(Contact {
            platform_id: platform.id,
            kind: platform.kind,
            points,
            at: self.feet(),
        });
    }

    /// Handle a jump/dash press.
    ///
    /// Dash wins when requested and available; otherwise the press is a
    /// wall-jump that flips direction. Returns `None` when dead.
    pub fn apply_intent(&mut self, dash_requested: bool, viewport: &Viewport) -> Option<Maneuver> {
        if !self.alive {
            return None;
        }

        if dash_requested && self.dash_charges > 0 && self.dash_cooldown <= 0.0 {
            self.vel = Vec2::new(DASH_SPEED * self.direction, DASH_LIFT);
            self.dash_charges -= 1;
            self.dash_cooldown = DASH_COOLDOWN;
            self.invincible = DASH_INVINCIBILITY;
            return Some(Maneuver::Dash);
        }

        self.direction = -self.direction;
        self.vel.x = WALL_JUMP_SPEED * self.direction;
        self.vel.y = JUMP_FORCE * WALL_JUMP_FACTOR;

        let recharged = touching_wall(self.pos.x, viewport.width, WALL_TOUCH_DISTANCE)
            && self.dash_charges < MAX_DASH_CHARGES;
        if recharged {
            self.dash_charges += 1;
        }
        Some(Maneuver::WallJump { recharged })
    }
}
