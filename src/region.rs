//! Vertical timing constants for the two broadcast standards the 2600 targets.
//!
//! Neither the distilled spec nor the filtered `ares` source carries these
//! numbers (the bodies of `displayHeight()`/`voffset()`/`vlines()` were
//! outside the retrieval filter), so the conventional breakdown used by
//! reference Atari 2600 software is used here: 3 VSYNC lines, a run of VBLANK
//! lines, the active display, and overscan, totalling 262 lines for NTSC and
//! 312 for PAL.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Region {
    Ntsc,
    Pal,
}

impl Region {
    /// Total scanlines per frame, including VSYNC/VBLANK/overscan.
    pub const fn vlines(self) -> u16 {
        match self {
            Region::Ntsc => 262,
            Region::Pal => 312,
        }
    }

    /// Number of scanlines in the active (visible) display window.
    pub const fn display_height(self) -> u16 {
        match self {
            Region::Ntsc => 192,
            Region::Pal => 242,
        }
    }

    /// `vcounter` value at which the active display window begins.
    pub const fn voffset(self) -> u16 {
        match self {
            Region::Ntsc => 40,
            Region::Pal => 48,
        }
    }
}

impl Default for Region {
    fn default() -> Self {
        Region::Ntsc
    }
}
