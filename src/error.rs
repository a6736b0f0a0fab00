use thiserror::Error;

/// Errors surfaced at the TIA's bus boundary.
///
/// The chip itself has no recoverable error class — hardware doesn't return
/// errors — so this only covers the two conditions that are genuinely
/// exceptional for a caller: an out-of-range register address, and write-queue
/// overflow (an implementation invariant violation, not a modelled condition).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("invalid TIA register address: {0:#04x}")]
    InvalidAddress(u16),

    #[error("write queue overflow (capacity exceeded)")]
    QueueOverflow,
}
