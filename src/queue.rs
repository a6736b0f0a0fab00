//! The deferred-write ring queue (`§4.2`).
//!
//! Not present in the teacher, which applies every register write to its
//! fields immediately (see its `TIA::write`), nor in the filtered `ares`
//! excerpt (`write-queue.cpp` was outside the retrieval cap). Built from the
//! spec's own `(delay, address, value)` triple and the call shape implied by
//! `ares/tia.cpp`'s `writeQueue.step()`. Every write — immediate (`delay =
//! 0`) or deferred — goes through this one mechanism, concentrating the
//! latency logic in a single, directly testable place per the Design Notes.

use crate::bus::WriteAddress;
use crate::error::Error;
use serde::{Deserialize, Serialize};

/// At least 24 entries per `§3`; sized generously above the worst realistic
/// case (every register strobed in the same clock plus HMOVE headroom).
const CAPACITY: usize = 32;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct Entry {
    delay: u8,
    address: WriteAddress,
    value: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WriteQueue {
    entries: [Option<Entry>; CAPACITY],
}

impl Default for WriteQueue {
    fn default() -> Self {
        Self {
            entries: [None; CAPACITY],
        }
    }
}

impl WriteQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.entries = [None; CAPACITY];
    }

    pub fn len(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Enqueue a write that will commit `delay` color clocks from now
    /// (`delay == 0` commits on the very next `tick`, i.e. the same color
    /// clock the write was issued on).
    pub fn try_push(&mut self, address: WriteAddress, value: u8, delay: u8) -> Result<(), Error> {
        let slot = self
            .entries
            .iter_mut()
            .find(|e| e.is_none())
            .ok_or(Error::QueueOverflow)?;
        *slot = Some(Entry {
            delay,
            address,
            value,
        });
        Ok(())
    }

    /// Infallible counterpart to `try_push`. Per `§7`, overflow is an
    /// implementation invariant violation: it traps in debug builds and is
    /// logged (not silently dropped) in release builds.
    pub fn push(&mut self, address: WriteAddress, value: u8, delay: u8) {
        if let Err(err) = self.try_push(address, value, delay) {
            debug_assert!(false, "{err}");
            log::error!("{err}");
        }
    }

    /// Advance every pending write by one color clock, returning (in
    /// submission order) the `(address, value)` pairs that commit this
    /// clock.
    pub fn tick(&mut self) -> Vec<(WriteAddress, u8)> {
        let mut committed = Vec::new();
        for slot in self.entries.iter_mut() {
            if let Some(entry) = slot {
                entry.delay = entry.delay.saturating_sub(1);
                if entry.delay == 0 {
                    committed.push((entry.address, entry.value));
                    *slot = None;
                }
            }
        }
        committed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn immediate_write_commits_on_first_tick() {
        let mut q = WriteQueue::new();
        q.push(WriteAddress::Colubk, 0x40, 0);
        assert_eq!(q.tick(), vec![(WriteAddress::Colubk, 0x40)]);
    }

    #[test]
    fn deferred_write_is_not_observable_before_its_delay_elapses() {
        let mut q = WriteQueue::new();
        q.push(WriteAddress::Resp0, 40, 4);

        for _ in 0..3 {
            assert!(q.tick().is_empty());
        }
        assert_eq!(q.tick(), vec![(WriteAddress::Resp0, 40)]);
    }

    #[test]
    fn same_address_writes_preserve_submission_order() {
        let mut q = WriteQueue::new();
        q.push(WriteAddress::Grp0, 0x01, 0);
        q.push(WriteAddress::Grp0, 0x02, 0);
        assert_eq!(
            q.tick(),
            vec![(WriteAddress::Grp0, 0x01), (WriteAddress::Grp0, 0x02)]
        );
    }

    #[test]
    fn overflow_is_reported() {
        let mut q = WriteQueue::new();
        for _ in 0..CAPACITY {
            q.try_push(WriteAddress::Wsync, 0, 1).unwrap();
        }
        assert_eq!(
            q.try_push(WriteAddress::Wsync, 0, 1),
            Err(Error::QueueOverflow)
        );
    }
}
