//! The ball pixel object (`§3`, `§4.3`).
//!
//! Grounded on the teacher's `tia/ball.rs` for the `enable`/`vdel` shadow
//! pair, replacing its `Counter`-driven scan circuit with the direct
//! position-range test `ares/tia.cpp`'s `runBall` uses.

use crate::render::Render;
use serde::{Deserialize, Serialize};

const SIZES: [u8; 4] = [1, 2, 4, 8];

#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize)]
pub struct Ball {
    enable: [bool; 2],
    vdel: bool,
    size: u8,
    position: u8,
    hmove_offset: i8,
}

impl Ball {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enable[0] = enabled;
    }

    /// Called when `GRP1` is written: the hardware latches `ENABL`'s
    /// delayed shadow register at that moment, same as `Player::latch`.
    pub fn latch(&mut self) {
        self.enable[1] = self.enable[0];
    }

    pub fn set_vdel(&mut self, val: bool) {
        self.vdel = val;
    }

    pub fn set_size(&mut self, size: u8) {
        self.size = size & 0x03;
    }

    pub fn set_position(&mut self, position: u8) {
        self.position = position % 160;
    }

    pub fn position(&self) -> u8 {
        self.position
    }

    pub fn set_hmove_offset(&mut self, hmxx: u8) {
        self.hmove_offset = crate::hmove::decode_motion_nibble(hmxx);
    }

    pub fn clear_hmove_offset(&mut self) {
        self.hmove_offset = 0;
    }

    pub fn apply_motion(&mut self) {
        self.position = crate::hmove::apply(self.position, self.hmove_offset);
    }
}

impl Render for Ball {
    fn render(&self, x: u8) -> bool {
        let enabled = if self.vdel {
            self.enable[1]
        } else {
            self.enable[0]
        };
        if !enabled {
            return false;
        }
        let width = SIZES[self.size as usize] as u16;
        let rel = (x as i16 - self.position as i16).rem_euclid(160) as u16;
        rel < width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_ball_never_renders() {
        let b = Ball::new();
        assert!(!b.render(0));
    }

    #[test]
    fn width_scales_with_size() {
        let mut b = Ball::new();
        b.set_enabled(true);
        b.set_position(10);
        b.set_size(3); // width 8

        for x in 10..18 {
            assert!(b.render(x));
        }
        assert!(!b.render(18));
    }

    #[test]
    fn vdel_selects_the_latched_enable() {
        let mut b = Ball::new();
        b.set_enabled(true);
        b.set_position(0);
        b.set_size(0);
        b.latch();
        b.set_enabled(false);
        b.set_vdel(true);

        assert!(b.render(0));
    }
}
