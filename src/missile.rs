//! A missile pixel object (`§3`, `§4.3`).
//!
//! Grounded on the teacher's `tia/missile.rs` for the sibling-player
//! relationship (`reset_to_player`) but, like `player.rs`, replaced its
//! `Counter`-driven scan circuit with the direct position-range test.
//! `repeat`/`spacing` are inherited from the sibling player's `NUSIZx`
//! geometry rather than recomputed, since both registers share one write.

use crate::render::Render;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize)]
pub struct Missile {
    enable: bool,
    width_code: u8,
    repeat: u8,
    spacing: u8,
    stretch: u8,
    position: u8,
    reset_lock: bool,
    hmove_offset: i8,
}

impl Missile {
    pub fn new() -> Self {
        Self {
            repeat: 1,
            stretch: 1,
            ..Self::default()
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enable = enabled;
    }

    /// `NUSIZx` carries both this missile's width (bits 4-5) and, via the
    /// sibling player's size field (bits 0-2), the copy `repeat`/`spacing`
    /// it inherits. `player_size` is the already-masked 3-bit player size.
    pub fn set_nusiz(&mut self, nusiz: u8, player_size: u8) {
        self.width_code = (nusiz >> 4) & 0x03;
        let (_, repeat, spacing) = crate::player::GEOMETRY[player_size as usize];
        self.repeat = repeat;
        self.spacing = spacing;
        // `repeatWidth` scaling is only documented for player sizes 5 and 7
        // (`§4.3`); other sizes are left unscaled per the spec's own flagged
        // open question about latent hardware behavior.
        self.stretch = match player_size {
            5 => 2,
            7 => 4,
            _ => 1,
        };
    }

    pub fn set_position(&mut self, position: u8) {
        self.position = position % 160;
    }

    pub fn position(&self) -> u8 {
        self.position
    }

    pub fn set_reset_lock(&mut self, locked: bool) {
        self.reset_lock = locked;
    }

    /// While `reset_lock` is set (`RESMPx`), the missile continuously
    /// tracks the sibling player's position plus a size-dependent offset.
    pub fn track(&mut self, player_position: u8, player_size: u8) {
        if !self.reset_lock {
            return;
        }
        let offset: u8 = match player_size {
            5 => 6,
            7 => 10,
            _ => 3,
        };
        self.position = (player_position as u16 + offset as u16) as u8 % 160;
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

impl Render for Missile {
    fn render(&self, x: u8) -> bool {
        if self.reset_lock || !self.enable {
            return false;
        }
        // `width` is the unscaled inclusion test; `repeat_width` (scaled by
        // `stretch` for player sizes 5/7) only steps the copy positions, per
        // `ares`'s `width`/`repeatWidth` split.
        let width = 1u16 << self.width_code;
        let repeat_width = width * self.stretch as u16;

        for copy in 0..self.repeat.max(1) {
            let step = self.spacing as u16 + repeat_width;
            let copy_pos = (self.position as u16 + copy as u16 * step) % 160;
            let rel = (x as i16 - copy_pos as i16).rem_euclid(160) as u16;
            if rel < width {
                return true;
            }
        }
        false
    }
}
