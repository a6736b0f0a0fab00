//! The two-channel audio engine (`§4.6`).
//!
//! Grounded on the teacher's `tia/audio/{mod,channel,register}.rs` (itself a
//! port of Ron Fries' well-known TIA sound algorithm) for the divider
//! network; the logarithmic volume table and `sample()` mixdown are new,
//! since the teacher fed its channels' raw linear volume straight to an
//! external mixer rather than modelling a sink itself.

mod channel;
mod registers;

use channel::Channel;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

/// Color clocks between the twice-per-scanline divider phases the hardware
/// clocks audio at (`228 / 2 = 114`, sampled once per half-line per spec's
/// ~31.4 kHz figure).
const CLOCKS_PER_LINE: i32 = 228;

lazy_static! {
    /// `volume[level] = 2^(level * -2/6)` for `level in 0..=14`, `volume[15] = 0`.
    static ref VOLUME_TABLE: [f32; 16] = build_volume_table();
}

fn build_volume_table() -> [f32; 16] {
    let mut table = [0f32; 16];
    for (level, slot) in table.iter_mut().enumerate().take(15) {
        *slot = 2f32.powf(level as f32 * -2.0 / 6.0);
    }
    table
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Audio {
    clock_228: i32,
    channel0: Channel,
    channel1: Channel,
}

impl Audio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn set_audc0(&mut self, val: u8) {
        self.channel0.registers.control = val & 0x0f;
    }

    pub fn set_audc1(&mut self, val: u8) {
        self.channel1.registers.control = val & 0x0f;
    }

    pub fn set_audf0(&mut self, val: u8) {
        self.channel0.registers.freq = val & 0x1f;
    }

    pub fn set_audf1(&mut self, val: u8) {
        self.channel1.registers.freq = val & 0x1f;
    }

    pub fn set_audv0(&mut self, val: u8) {
        self.channel0.registers.volume = val & 0x0f;
    }

    pub fn set_audv1(&mut self, val: u8) {
        self.channel1.registers.volume = val & 0x0f;
    }

    /// Advances the dividers by one color clock. Returns `Some(sample)` on
    /// the half-line boundaries the hardware actually latches a new
    /// amplitude (`§4.6`'s ~31.4 kHz rate), `None` otherwise.
    pub fn step(&mut self) -> Option<f32> {
        self.clock_228 += 1;
        if self.clock_228 >= CLOCKS_PER_LINE {
            self.clock_228 = 0;
        }

        match self.clock_228 {
            10 | 82 => {
                self.channel0.phase0();
                self.channel1.phase0();
                None
            }
            38 | 150 => {
                self.channel0.phase1();
                self.channel1.phase1();
                Some(self.sample())
            }
            _ => None,
        }
    }

    fn sample(&self) -> f32 {
        let s0 = if self.channel0.bit() {
            VOLUME_TABLE[self.channel0.registers.volume as usize]
        } else {
            0.0
        };
        let s1 = if self.channel1.bit() {
            VOLUME_TABLE[self.channel1.registers.volume as usize]
        } else {
            0.0
        };
        (s0 + s1) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volume_zero_is_loudest_and_fourteen_is_quietest() {
        assert!(VOLUME_TABLE[0] > VOLUME_TABLE[14]);
    }

    #[test]
    fn volume_fifteen_is_silent() {
        assert_eq!(VOLUME_TABLE[15], 0.0);
    }

    #[test]
    fn silent_channels_produce_a_zero_sample() {
        let mut audio = Audio::new();
        let mut heard_sample = false;
        for _ in 0..CLOCKS_PER_LINE {
            if let Some(sample) = audio.step() {
                heard_sample = true;
                assert_eq!(sample, 0.0);
            }
        }
        assert!(heard_sample);
    }
}
