//! Collision detection for the player box
//!
//! Platforms are one-way: they only catch a falling player whose feet are in a
//! thin band at the platform's top edge. Screen edges are inelastic walls.

use glam::Vec2;

use super::platform::Platform;
use crate::consts::{LANDING_BAND, LANDING_INSET, PLAYER_SIZE};

/// Whether a player box at `pos` (top-left) falling with `vel_y` lands on `platform`
pub fn lands_on(pos: Vec2, vel_y: f32, platform: &Platform) -> bool {
    if platform.broken || vel_y <= 0.0 {
        return false;
    }

    let overlaps_x = pos.x + PLAYER_SIZE > platform.left() + LANDING_INSET
        && pos.x < platform.right() - LANDING_INSET;
    if !overlaps_x {
        return false;
    }

    // Tolerate one frame of overshoot past the top edge
    let feet = pos.y + PLAYER_SIZE;
    feet >= platform.top() && feet <= platform.top() + LANDING_BAND
}

/// Index of the first platform, in storage order, the player lands on
pub fn find_landing(pos: Vec2, vel_y: f32, platforms: &[Platform]) -> Option<usize> {
    platforms.iter().position(|p| lands_on(pos, vel_y, p))
}

/// Clamp the player box inside `[0, screen_width]`.
///
/// On contact the horizontal velocity is reflected at half strength.
/// Returns true if a wall was hit.
pub fn clamp_to_walls(pos: &mut Vec2, vel: &mut Vec2, screen_width: f32) -> bool {
    let max_x = (screen_width - PLAYER_SIZE).max(0.0);
    if pos.x < 0.0 {
        pos.x = 0.0;
    } else if pos.x > max_x {
        pos.x = max_x;
    } else {
        return false;
    }
    vel.x = -vel.x * 0.5;
    true
}

/// Whether the player is within `distance` of either side wall
#[inline]
pub fn touching_wall(x: f32, screen_width: f32, distance: f32) -> bool {
    x <= distance || x >= screen_width - PLAYER_SIZE - distance
}
