//! The playfield pixel object (`§4.3`).
//!
//! Grounded on the teacher's `tia/playfield.rs` for the packed 20-bit
//! register (kept via `modular_bitfield`, including its left/right bit
//! reversal on `PF0`/`PF2`) but not for its `Counter`-clocked scan circuit:
//! `render` is instead the direct `pos = x / 4` lookup the spec and
//! `ares/tia.cpp`'s `runPlayfield` both use.

use crate::render::Render;
use modular_bitfield::prelude::*;
use serde::{Deserialize, Serialize};
use std::array;

#[bitfield(bits = 20)]
#[derive(Clone, Copy)]
struct PlayfieldData {
    pf0: B4,
    pf1: B8,
    pf2: B8,
}

impl PlayfieldData {
    /// `PF0`, `PF1`, `PF2` concatenated into left-to-right pixel order.
    fn bits(&self) -> [bool; 20] {
        let val = (self.pf0() as u32) << 16 | (self.pf1() as u32) << 8 | self.pf2() as u32;
        array::from_fn(|i| val & (1 << (19 - i)) != 0)
    }
}

const PF_LENGTH: u8 = 20;

/// Raw register contents, stored the way the bus writes them (before the
/// `PF0`/`PF2` bit reversal), so the struct can derive `Serialize` directly
/// instead of threading it through `modular_bitfield`'s generated layout.
#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize)]
pub struct Playfield {
    pf0: u8,
    pf1: u8,
    pf2: u8,
    mirror: bool,
    priority: bool,
}

impl Playfield {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_pf0(&mut self, val: u8) {
        // PF0 occupies the register's top 4 bits, read out in big-endian order.
        self.pf0 = reverse_bit_order(val) & 0x0f;
    }

    pub fn set_pf1(&mut self, val: u8) {
        self.pf1 = val;
    }

    pub fn set_pf2(&mut self, val: u8) {
        self.pf2 = reverse_bit_order(val);
    }

    pub fn set_control(&mut self, val: u8) {
        self.mirror = (val & 0x01) != 0;
        self.priority = (val & 0x04) != 0;
    }

    pub fn priority(&self) -> bool {
        self.priority
    }

    fn data(&self) -> PlayfieldData {
        let mut data = PlayfieldData::from_bytes([0, 0, 0]);
        data.set_pf0(self.pf0);
        data.set_pf1(self.pf1);
        data.set_pf2(self.pf2);
        data
    }
}

impl Render for Playfield {
    fn render(&self, x: u8) -> bool {
        let pos = x / 4;
        let bits = self.data().bits();
        let idx = if pos < PF_LENGTH || !self.mirror {
            pos % PF_LENGTH
        } else {
            PF_LENGTH - 1 - (pos % PF_LENGTH)
        };
        bits[idx as usize]
    }
}

fn reverse_bit_order(value: u8) -> u8 {
    let mut value = value;
    let mut result = 0;
    for _ in 0..8 {
        result = (result << 1) | (value & 1);
        value >>= 1;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn left_half_reads_pf0_msb_first() {
        let mut pf = Playfield::new();
        pf.set_pf0(0x10); // only the msb of the reversed nibble is set
        assert!(pf.render(0));
        assert!(!pf.render(4));
    }

    #[test]
    fn unmirrored_right_half_repeats_left_half() {
        let mut pf = Playfield::new();
        pf.set_pf0(0x10);
        pf.set_control(0x00);
        assert_eq!(pf.render(0), pf.render(80));
    }

    #[test]
    fn mirrored_right_half_reverses_left_half() {
        let mut pf = Playfield::new();
        pf.set_pf0(0x10);
        pf.set_control(0x01);
        // pos 20 mirrors to index 19, the last bit of PF2 (all zero here).
        assert!(!pf.render(80));
        // pos 39 mirrors to index 0, the first bit of PF0.
        assert!(pf.render(4 * 39));
    }

    #[test]
    fn scenario_s2_playfield_stripe() {
        let mut pf = Playfield::new();
        pf.set_pf0(0x10);
        pf.set_pf1(0x00);
        pf.set_pf2(0x00);
        pf.set_control(0x00);

        for x in 0..4u8 {
            assert!(pf.render(x));
        }
        for x in 4..80u8 {
            assert!(!pf.render(x));
        }
        for x in 80..84u8 {
            assert!(pf.render(x));
        }
    }
}
