//! Cycle-accurate Television Interface Adaptor (TIA) core for the Atari
//! 2600: horizontal/vertical timing, the playfield/player/missile/ball
//! object engines, the priority and collision mux, `HMOVE`, and the
//! two-channel audio engine.
//!
//! The chip is driven one color clock at a time through [`Tia::clock`],
//! cooperating with a host-owned CPU through the [`Scheduler`] trait rather
//! than owning a CPU reference itself.

mod audio;
mod ball;
mod bus;
mod collisions;
mod color;
mod error;
mod hmove;
mod missile;
mod player;
mod playfield;
mod queue;
mod region;
mod render;
mod scheduler;
mod tia;

pub use bus::{ReadAddress, WriteAddress};
pub use color::resolve_ntsc;
pub use error::Error;
pub use region::Region;
pub use scheduler::{Event, NullScheduler, Scheduler};
pub use tia::{AudioSink, Tia, VideoSink, VISIBLE_WIDTH};
