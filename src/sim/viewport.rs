//! Visible window into the (upward-scrolling) world
//!
//! World y grows downward; climbing means y decreases. The camera only ever
//! scrolls up.

use serde::{Deserialize, Serialize};

use crate::consts::{CAMERA_FOLLOW_LINE, OFFSCREEN_MARGIN};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    /// World y of the top screen edge
    pub top: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            top: 0.0,
        }
    }

    /// World y of the bottom screen edge
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// World y past which things are gone for good
    #[inline]
    pub fn kill_line(&self) -> f32 {
        self.bottom() + OFFSCREEN_MARGIN
    }

    /// Scroll up so `y` stays at or below the follow line. Never scrolls down.
    pub fn follow(&mut self, y: f32) {
        let offset = self.height * CAMERA_FOLLOW_LINE;
        if y < self.top + offset {
            self.top = y - offset;
        }
    }
}
