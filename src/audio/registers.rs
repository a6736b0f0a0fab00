use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Default, Debug, Copy, Clone, Serialize, Deserialize)]
pub(crate) struct Registers {
    pub(crate) control: u8, // 4 bit
    pub(crate) freq: u8,    // 5 bit
    pub(crate) volume: u8,  // 4 bit
}

impl fmt::Display for Registers {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{:04b} @ {:05b} ^ {:04b}",
            self.control, self.freq, self.volume
        )
    }
}
