//! Platforms and the procedurally streamed platform field
//!
//! The field is ordered bottom to top: index 0 is the lowest platform (closest
//! to the bottom of the screen), the last entry is the highest. Eviction pops
//! from the front, generation appends to the back.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::viewport::Viewport;
use super::weighted::WeightedTable;
use crate::consts::*;
use crate::min_active_platforms;

/// Platform types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformKind {
    #[default]
    Normal,
    Spring,
    Spike,
    Moving,
    Breakable,
    Bouncy,
}

impl PlatformKind {
    pub const ALL: [PlatformKind; 6] = [
        PlatformKind::Normal,
        PlatformKind::Spring,
        PlatformKind::Spike,
        PlatformKind::Moving,
        PlatformKind::Breakable,
        PlatformKind::Bouncy,
    ];

    /// Relative spawn weight
    pub fn weight(&self) -> f32 {
        match self {
            PlatformKind::Normal => 4.0,
            _ => 1.0,
        }
    }

    /// Width at creation
    pub fn width(&self) -> f32 {
        match self {
            PlatformKind::Breakable => BREAKABLE_WIDTH,
            PlatformKind::Spike => SPIKE_WIDTH,
            _ => PLATFORM_WIDTH,
        }
    }

    /// Spawn table over all kinds
    pub fn spawn_table() -> WeightedTable<PlatformKind> {
        // ALL has strictly positive weights
        WeightedTable::new(Self::ALL.iter().map(|k| (*k, k.weight())))
            .unwrap_or_else(|| unreachable!("platform weights are positive"))
    }
}

/// A platform entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub id: u32,
    pub kind: PlatformKind,
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Horizontal direction (moving platforms)
    pub dir: f32,
    /// Horizontal speed in units/tick (moving platforms)
    pub speed: f32,
    /// Used up (breakable platforms); no longer collides
    pub broken: bool,
    /// Bounce impulse (bouncy platforms)
    pub bounce_force: f32,
}

impl Platform {
    /// A platform of the given kind with per-kind defaults (no randomness)
    pub fn new(id: u32, kind: PlatformKind, pos: Vec2) -> Self {
        Self {
            id,
            kind,
            pos,
            width: kind.width(),
            height: PLATFORM_HEIGHT,
            dir: 1.0,
            speed: 0.0,
            broken: false,
            bounce_force: if kind == PlatformKind::Bouncy {
                JUMP_FORCE * BOUNCY_FACTOR
            } else {
                0.0
            },
        }
    }

    /// Randomized platform: x within screen bounds, moving platforms get a
    /// random direction and speed
    pub fn spawn<R: Rng + ?Sized>(id: u32, kind: PlatformKind, y: f32, screen_width: f32, rng: &mut R) -> Self {
        let width = kind.width();
        let max_x = (screen_width - width).max(0.0);
        let x = if max_x > 0.0 { rng.random_range(0.0..max_x) } else { 0.0 };
        let mut platform = Self::new(id, kind, Vec2::new(x, y));
        if kind == PlatformKind::Moving {
            platform.dir = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
            platform.speed = rng.random_range(1.2..2.0);
        }
        platform
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.width
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    /// Slide a moving platform, bouncing off the screen edges
    pub fn slide(&mut self, screen_width: f32) {
        if self.kind != PlatformKind::Moving {
            return;
        }
        self.pos.x += self.dir * self.speed;
        if self.left() < 0.0 || self.right() > screen_width {
            self.dir = -self.dir;
        }
    }

    /// Shrink a broken platform toward zero height
    pub fn crumble(&mut self) {
        if self.broken {
            self.height = (self.height - BROKEN_SHRINK_PER_TICK).max(0.0);
        }
    }
}

/// The active, ordered stack of platforms
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformField {
    /// Active platforms, lowest first
    pub platforms: Vec<Platform>,
    pub screen_width: f32,
    /// Platforms generated so far in this session
    generated: u64,
    /// y of the most recently generated (highest) platform
    top_y: Option<f32>,
    next_id: u32,
    #[serde(skip, default = "PlatformKind::spawn_table")]
    table: WeightedTable<PlatformKind>,
}

impl PlatformField {
    pub fn new(screen_width: f32) -> Self {
        Self {
            platforms: Vec::new(),
            screen_width,
            generated: 0,
            top_y: None,
            next_id: 1,
            table: PlatformKind::spawn_table(),
        }
    }

    /// Wrap an explicit platform layout (all counted as already generated)
    pub fn from_platforms(screen_width: f32, platforms: Vec<Platform>) -> Self {
        let next_id = platforms.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        let top_y = platforms.last().map(|p| p.pos.y);
        Self {
            generated: platforms.len() as u64,
            platforms,
            screen_width,
            top_y,
            next_id,
            table: PlatformKind::spawn_table(),
        }
    }

    pub fn len(&self) -> usize {
        self.platforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Platform> {
        self.platforms.iter()
    }

    /// Highest active platform
    pub fn topmost(&self) -> Option<&Platform> {
        self.platforms.last()
    }

    /// Kind of the next generated platform; the first three are always normal
    fn next_kind<R: Rng + ?Sized>(&mut self, rng: &mut R) -> PlatformKind {
        let kind = if self.generated < 3 {
            PlatformKind::Normal
        } else {
            self.table.draw(rng)
        };
        self.generated += 1;
        kind
    }

    fn push_at<R: Rng + ?Sized>(&mut self, y: f32, rng: &mut R) {
        let kind = self.next_kind(rng);
        let id = self.next_id;
        self.next_id += 1;
        self.platforms
            .push(Platform::spawn(id, kind, y, self.screen_width, rng));
        self.top_y = Some(y);
    }

    /// Generate `count` platforms spaced upward from `start_y`
    pub fn generate<R: Rng + ?Sized>(&mut self, count: usize, start_y: f32, rng: &mut R) {
        for i in 0..count {
            self.push_at(start_y - i as f32 * PLATFORM_GAP, rng);
        }
    }

    /// Append one platform a gap above the highest generated so far, and
    /// never below the visible window
    fn extend_upward<R: Rng + ?Sized>(&mut self, viewport: &Viewport, rng: &mut R) {
        let floor = viewport.bottom() - PLATFORM_GAP;
        let y = match self.top_y {
            Some(top) => (top - PLATFORM_GAP).min(floor),
            None => floor,
        };
        self.push_at(y, rng);
    }

    /// Per-tick platform update: slide, crumble, evict below the window and
    /// refill up to the score-scaled minimum.
    pub fn advance<R: Rng + ?Sized>(&mut self, score: u64, viewport: &Viewport, rng: &mut R) {
        for platform in &mut self.platforms {
            platform.slide(self.screen_width);
            platform.crumble();
        }

        let kill_line = viewport.kill_line();
        let evicted = self
            .platforms
            .iter()
            .take_while(|p| p.pos.y > kill_line)
            .count();
        if evicted > 0 {
            self.platforms.drain(..evicted);
            log::debug!("Evicted {} platforms below y={:.0}", evicted, kill_line);
        }

        let target = min_active_platforms(score);
        let before = self.platforms.len();
        while self.platforms.len() < target {
            self.extend_upward(viewport, rng);
        }
        if self.platforms.len() > before {
            log::debug!(
                "Spawned {} platforms (active={}, score={})",
                self.platforms.len() - before,
                self.platforms.len(),
                score
            );
        }
    }
}
