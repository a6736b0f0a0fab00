//! The TIA's addressable register file (`§4.7`).
//!
//! Grounded on the teacher's `src/memory.rs`, narrowed to the TIA's own
//! address range (`0x00..=0x2C` for writes, `0x30..=0x3D` for reads) — the
//! cartridge and PIA (RIOT) decoding the teacher's `MemoryMirrors` also
//! carried is out of scope here.

use crate::error::Error;
use serde::{Deserialize, Serialize};

/// Addresses the TIA accepts a write to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WriteAddress {
    Vsync,
    Vblank,
    Wsync,
    Rsync,
    Nusiz0,
    Nusiz1,
    Colup0,
    Colup1,
    Colupf,
    Colubk,
    Ctrlpf,
    Refp0,
    Refp1,
    Pf0,
    Pf1,
    Pf2,
    Resp0,
    Resp1,
    Resm0,
    Resm1,
    Resbl,
    Audc0,
    Audc1,
    Audf0,
    Audf1,
    Audv0,
    Audv1,
    Grp0,
    Grp1,
    Enam0,
    Enam1,
    Enabl,
    Hmp0,
    Hmp1,
    Hmm0,
    Hmm1,
    Hmbl,
    Vdelp0,
    Vdelp1,
    Vdelbl,
    Resmp0,
    Resmp1,
    Hmove,
    Hmclr,
    Cxclr,
}

impl TryFrom<u16> for WriteAddress {
    type Error = Error;

    fn try_from(address: u16) -> Result<Self, Self::Error> {
        use WriteAddress::*;
        Ok(match address & 0x3f {
            0x00 => Vsync,
            0x01 => Vblank,
            0x02 => Wsync,
            0x03 => Rsync,
            0x04 => Nusiz0,
            0x05 => Nusiz1,
            0x06 => Colup0,
            0x07 => Colup1,
            0x08 => Colupf,
            0x09 => Colubk,
            0x0a => Ctrlpf,
            0x0b => Refp0,
            0x0c => Refp1,
            0x0d => Pf0,
            0x0e => Pf1,
            0x0f => Pf2,
            0x10 => Resp0,
            0x11 => Resp1,
            0x12 => Resm0,
            0x13 => Resm1,
            0x14 => Resbl,
            0x15 => Audc0,
            0x16 => Audc1,
            0x17 => Audf0,
            0x18 => Audf1,
            0x19 => Audv0,
            0x1a => Audv1,
            0x1b => Grp0,
            0x1c => Grp1,
            0x1d => Enam0,
            0x1e => Enam1,
            0x1f => Enabl,
            0x20 => Hmp0,
            0x21 => Hmp1,
            0x22 => Hmm0,
            0x23 => Hmm1,
            0x24 => Hmbl,
            0x25 => Vdelp0,
            0x26 => Vdelp1,
            0x27 => Vdelbl,
            0x28 => Resmp0,
            0x29 => Resmp1,
            0x2a => Hmove,
            0x2b => Hmclr,
            0x2c => Cxclr,
            _ => return Err(Error::InvalidAddress(address)),
        })
    }
}

/// Addresses the TIA accepts a read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReadAddress {
    Cxm0p,
    Cxm1p,
    Cxp0fb,
    Cxp1fb,
    Cxm0fb,
    Cxm1fb,
    Cxblpf,
    Cxppmm,
    Inpt0,
    Inpt1,
    Inpt2,
    Inpt3,
    Inpt4,
    Inpt5,
}

impl TryFrom<u16> for ReadAddress {
    type Error = Error;

    fn try_from(address: u16) -> Result<Self, Self::Error> {
        use ReadAddress::*;
        let masked = address & 0x3f;
        if !(0x30..=0x3d).contains(&masked) {
            return Err(Error::InvalidAddress(address));
        }
        Ok(match masked & 0x0f {
            0x00 => Cxm0p,
            0x01 => Cxm1p,
            0x02 => Cxp0fb,
            0x03 => Cxp1fb,
            0x04 => Cxm0fb,
            0x05 => Cxm1fb,
            0x06 => Cxblpf,
            0x07 => Cxppmm,
            0x08 => Inpt0,
            0x09 => Inpt1,
            0x0a => Inpt2,
            0x0b => Inpt3,
            0x0c => Inpt4,
            0x0d => Inpt5,
            _ => unreachable!("range-checked above"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_known_write_addresses() {
        assert_eq!(WriteAddress::try_from(0x00), Ok(WriteAddress::Vsync));
        assert_eq!(WriteAddress::try_from(0x2c), Ok(WriteAddress::Cxclr));
    }

    #[test]
    fn rejects_out_of_range_write_address() {
        assert_eq!(
            WriteAddress::try_from(0x2d),
            Err(Error::InvalidAddress(0x2d))
        );
    }

    #[test]
    fn decodes_known_read_addresses() {
        assert_eq!(ReadAddress::try_from(0x30), Ok(ReadAddress::Cxm0p));
        assert_eq!(ReadAddress::try_from(0x3d), Ok(ReadAddress::Inpt5));
    }

    #[test]
    fn rejects_write_addresses_that_share_a_low_nibble_with_a_read_address() {
        // 0x00 (VSYNC) and 0x10 (RESP0) share a low nibble with the read
        // addresses for CXM0P/RESP0's slot; only 0x30..=0x3d are valid reads.
        assert_eq!(
            ReadAddress::try_from(0x00),
            Err(Error::InvalidAddress(0x00))
        );
        assert_eq!(
            ReadAddress::try_from(0x10),
            Err(Error::InvalidAddress(0x10))
        );
    }
}
