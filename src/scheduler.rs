//! The cooperative-scheduling contract the TIA is stepped through.
//!
//! Per the Design Notes ("cyclic references... replace with an arena owning
//! all chips and a handle-based reference"), the TIA never owns or names its
//! scheduler or the CPU it shares a clock with — the caller holds both and
//! passes the scheduler in by mutable reference on every color clock.

/// Events the TIA can post back to its scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A frame has completed: the video sink has the full pixel plane and
    /// the host loop should yield to the front-end.
    Frame,
}

/// What a chip needs from its cooperative scheduler each color clock.
///
/// `synchronize` is called once per color clock, mirroring `ares`'s
/// `Thread::step`/`Thread::synchronize` pair: it is the single suspension
/// point where control may pass to a co-thread (the CPU) that has fallen
/// behind.
pub trait Scheduler {
    fn synchronize(&mut self);

    fn post(&mut self, event: Event);
}

/// A `Scheduler` that does nothing; useful for unit tests and for hosts that
/// drive the TIA synchronously without a real cooperative thread pool.
#[derive(Debug, Default)]
pub struct NullScheduler {
    pub frames_posted: u32,
}

impl Scheduler for NullScheduler {
    fn synchronize(&mut self) {}

    fn post(&mut self, event: Event) {
        match event {
            Event::Frame => self.frames_posted += 1,
        }
    }
}
