//! The 15-bit sticky collision matrix (`§3`, `§4.4`).
//!
//! Not present in the teacher (whose retrieved `tia/mod.rs` never finished
//! wiring collisions up); grounded on the hardware register layout named in
//! `original_source/ares/a26/tia/tia.cpp` (`CXM0P`, `CXM1P`, ... `CXPPMM`),
//! each packing two collision bits into its top two bits.

use serde::{Deserialize, Serialize};

/// Which of the six pixel objects are active at the column currently being
/// evaluated.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectBits {
    pub p0: bool,
    pub p1: bool,
    pub m0: bool,
    pub m1: bool,
    pub bl: bool,
    pub pf: bool,
}

#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize)]
pub struct Collisions {
    p0_p1: bool,
    p0_m0: bool,
    p0_m1: bool,
    p0_bl: bool,
    p0_pf: bool,
    p1_m0: bool,
    p1_m1: bool,
    p1_bl: bool,
    p1_pf: bool,
    m0_m1: bool,
    m0_bl: bool,
    m0_pf: bool,
    m1_bl: bool,
    m1_pf: bool,
    bl_pf: bool,
}

impl Collisions {
    /// Cleared only by a write to `CXCLR`; never spontaneously clears.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// OR's in every unordered pair that is active at this column.
    pub fn update(&mut self, bits: ObjectBits) {
        self.p0_p1 |= bits.p0 && bits.p1;
        self.p0_m0 |= bits.p0 && bits.m0;
        self.p0_m1 |= bits.p0 && bits.m1;
        self.p0_bl |= bits.p0 && bits.bl;
        self.p0_pf |= bits.p0 && bits.pf;
        self.p1_m0 |= bits.p1 && bits.m0;
        self.p1_m1 |= bits.p1 && bits.m1;
        self.p1_bl |= bits.p1 && bits.bl;
        self.p1_pf |= bits.p1 && bits.pf;
        self.m0_m1 |= bits.m0 && bits.m1;
        self.m0_bl |= bits.m0 && bits.bl;
        self.m0_pf |= bits.m0 && bits.pf;
        self.m1_bl |= bits.m1 && bits.bl;
        self.m1_pf |= bits.m1 && bits.pf;
        self.bl_pf |= bits.bl && bits.pf;
    }

    pub fn cxm0p(&self) -> u8 {
        (self.p1_m0 as u8) << 7 | (self.p0_m0 as u8) << 6
    }

    pub fn cxm1p(&self) -> u8 {
        (self.p0_m1 as u8) << 7 | (self.p1_m1 as u8) << 6
    }

    pub fn cxp0fb(&self) -> u8 {
        (self.p0_pf as u8) << 7 | (self.p0_bl as u8) << 6
    }

    pub fn cxp1fb(&self) -> u8 {
        (self.p1_pf as u8) << 7 | (self.p1_bl as u8) << 6
    }

    pub fn cxm0fb(&self) -> u8 {
        (self.m0_pf as u8) << 7 | (self.m0_bl as u8) << 6
    }

    pub fn cxm1fb(&self) -> u8 {
        (self.m1_pf as u8) << 7 | (self.m1_bl as u8) << 6
    }

    pub fn cxblpf(&self) -> u8 {
        (self.bl_pf as u8) << 7
    }

    pub fn cxppmm(&self) -> u8 {
        (self.p0_p1 as u8) << 7 | (self.m0_m1 as u8) << 6
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_s5_collision() {
        let mut c = Collisions::default();
        c.update(ObjectBits {
            p0: true,
            p1: true,
            ..Default::default()
        });
        assert_eq!(c.cxppmm() & 0x80, 0x80);

        c.clear();
        assert_eq!(c.cxppmm(), 0);
    }

    #[test]
    fn collisions_are_sticky_until_cleared() {
        let mut c = Collisions::default();
        c.update(ObjectBits {
            bl: true,
            pf: true,
            ..Default::default()
        });
        c.update(ObjectBits::default());
        assert_eq!(c.cxblpf() & 0x80, 0x80);
    }
}
