//! A player pixel object (`§3`, `§4.3`).
//!
//! Grounded on the teacher's `tia/player.rs` for field shape (`graphics`
//! shadow pair, `reflect`, `vdel`) but replaces its `Counter`/`ScanCounter`
//! scan circuit with the direct position-range test `ares/tia.cpp`'s
//! `runPlayer` uses: for each of `size`'s copies, is `x` inside
//! `[position, position + width)`?

use crate::render::Render;
use serde::{Deserialize, Serialize};

/// `(width, repeat, spacing)` indexed by the 3-bit `NUSIZx` size field.
pub(crate) const GEOMETRY: [(u8, u8, u8); 8] = [
    (8, 1, 0),
    (8, 2, 8),
    (8, 2, 24),
    (8, 3, 8),
    (8, 2, 56),
    (16, 1, 0),
    (8, 3, 24),
    (32, 1, 0),
];

#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize)]
pub struct Player {
    graphics: [u8; 2],
    position: u8,
    size: u8,
    reflect: bool,
    vdel: bool,
    hmove_offset: i8,
}

impl Player {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_graphic(&mut self, val: u8) {
        self.graphics[0] = val;
    }

    /// Called when the *other* player's `GRPx` is written: the hardware
    /// latches this player's delayed shadow register at that moment.
    pub fn latch(&mut self) {
        self.graphics[1] = self.graphics[0];
    }

    pub fn set_reflect(&mut self, val: bool) {
        self.reflect = val;
    }

    pub fn set_vdel(&mut self, val: bool) {
        self.vdel = val;
    }

    pub fn set_size(&mut self, nusiz: u8) {
        self.size = nusiz & 0x07;
    }

    pub fn size(&self) -> u8 {
        self.size
    }

    pub fn position(&self) -> u8 {
        self.position
    }

    pub fn set_position(&mut self, position: u8) {
        self.position = position % 160;
    }

    pub fn set_hmove_offset(&mut self, hmxx: u8) {
        self.hmove_offset = crate::hmove::decode_motion_nibble(hmxx);
    }

    pub fn clear_hmove_offset(&mut self) {
        self.hmove_offset = 0;
    }

    /// Applies this player's latched `HMPx` offset, per `§4.5`.
    pub fn apply_motion(&mut self) {
        self.position = crate::hmove::apply(self.position, self.hmove_offset);
    }
}

impl Render for Player {
    fn render(&self, x: u8) -> bool {
        let (width, repeat, spacing) = GEOMETRY[self.size as usize];
        let graphic = if self.vdel {
            self.graphics[1]
        } else {
            self.graphics[0]
        };
        let stretch = width / 8;

        for copy in 0..repeat {
            let step = spacing as u16 + width as u16;
            let copy_pos = (self.position as u16 + copy as u16 * step) % 160;
            let rel = (x as i16 - copy_pos as i16).rem_euclid(160) as u16;
            if rel < width as u16 {
                let sprite_bit = (rel / stretch as u16) as u8;
                let bit_pos = if self.reflect { sprite_bit } else { 7 - sprite_bit };
                return (graphic >> bit_pos) & 1 != 0;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_s3_player_at_position_40() {
        let mut p = Player::new();
        p.set_graphic(0b1000_0000);
        p.set_position(40);

        assert!(p.render(40));
        for x in 41..48 {
            assert!(!p.render(x));
        }
    }

    #[test]
    fn reflect_reverses_bit_order() {
        let mut p = Player::new();
        p.set_graphic(0b1000_0000);
        p.set_position(0);
        p.set_reflect(true);

        assert!(!p.render(0));
        assert!(p.render(7));
    }

    #[test]
    fn vdel_selects_the_delayed_shadow_register() {
        let mut p = Player::new();
        p.set_graphic(0b1000_0000);
        p.set_position(0);
        p.latch();
        p.set_graphic(0b0000_0001);
        p.set_vdel(true);

        // vdel selects graphics[1], latched before the second GRP write.
        assert!(p.render(0));
    }

    #[test]
    fn two_close_copies_are_both_visible() {
        let mut p = Player::new();
        p.set_graphic(0xff);
        p.set_position(0);
        p.set_size(1); // width 8, repeat 2, spacing 8 -> copies step by spacing+width = 16

        assert!(p.render(0));
        assert!(!p.render(8));
        assert!(p.render(16));
    }
}
