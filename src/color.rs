//! Background/foreground/player color registers, and the default NTSC
//! palette lookup the video sink may use to resolve a 7-bit index to RGB.
//!
//! Grounded on the teacher's `tia::color`/`tia::palette` submodules, which
//! `tia/mod.rs` referenced (`colors.borrow().colup0()`, `NTSC_PALETTE`) but
//! which were absent from the retrieved pack; rebuilt here from that visible
//! usage plus the well-known Atari 2600 NTSC color generator (16 hues, 8
//! luminance steps per hue, encoded as the top 7 bits of the color byte).

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

/// The four color registers a frame's pixel is resolved against.
#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize)]
pub struct Colors {
    colup0: u8,
    colup1: u8,
    colupf: u8,
    colubk: u8,
}

impl Colors {
    pub fn colup0(&self) -> u8 {
        self.colup0
    }

    pub fn colup1(&self) -> u8 {
        self.colup1
    }

    pub fn colupf(&self) -> u8 {
        self.colupf
    }

    pub fn colubk(&self) -> u8 {
        self.colubk
    }

    pub fn set_colup0(&mut self, val: u8) {
        self.colup0 = val;
    }

    pub fn set_colup1(&mut self, val: u8) {
        self.colup1 = val;
    }

    pub fn set_colupf(&mut self, val: u8) {
        self.colupf = val;
    }

    pub fn set_colubk(&mut self, val: u8) {
        self.colubk = val;
    }
}

lazy_static! {
    /// 128-entry NTSC palette, indexed by the 7-bit value stored in the color
    /// registers (the hardware's low bit is always zero, but the index is
    /// kept at full 7-bit width to match `§3`'s "7-bit palette indices").
    pub static ref NTSC_PALETTE: [(u8, u8, u8); 128] = build_ntsc_palette();
}

fn build_ntsc_palette() -> [(u8, u8, u8); 128] {
    let mut table = [(0u8, 0u8, 0u8); 128];
    for (index, slot) in table.iter_mut().enumerate() {
        let hue = (index >> 3) & 0x0f;
        let luma = index & 0x07;
        *slot = hue_luma_to_rgb(hue, luma);
    }
    table
}

/// Approximates the NTSC chroma/luma decoder: hue 0 is grey, hues 1..15 are
/// spaced 24 degrees apart around the color wheel, and luminance scales
/// linearly with the low 3 bits of the index.
fn hue_luma_to_rgb(hue: usize, luma: usize) -> (u8, u8, u8) {
    let brightness = 40 + (luma as f32) * 27.0;
    if hue == 0 {
        let v = brightness.round().clamp(0.0, 255.0) as u8;
        return (v, v, v);
    }

    let angle = (hue as f32 - 1.0) * (std::f32::consts::TAU / 15.0);
    let chroma = 90.0;
    let r = brightness + chroma * angle.cos();
    let g = brightness + chroma * (angle - std::f32::consts::TAU / 3.0).cos();
    let b = brightness + chroma * (angle + std::f32::consts::TAU / 3.0).cos();

    (
        r.round().clamp(0.0, 255.0) as u8,
        g.round().clamp(0.0, 255.0) as u8,
        b.round().clamp(0.0, 255.0) as u8,
    )
}

/// Convenience resolver for callers that don't supply their own color table.
/// The TIA's own framebuffer always stores raw indices (`§6`); this is never
/// called internally.
pub fn resolve_ntsc(index: u8) -> (u8, u8, u8) {
    NTSC_PALETTE[(index & 0x7f) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grey_hue_is_achromatic() {
        for luma in 0..8 {
            let (r, g, b) = resolve_ntsc(luma as u8);
            assert_eq!(r, g);
            assert_eq!(g, b);
        }
    }

    #[test]
    fn brighter_luma_increases_intensity() {
        let (r0, _, _) = resolve_ntsc(0);
        let (r7, _, _) = resolve_ntsc(7);
        assert!(r7 > r0);
    }
}
