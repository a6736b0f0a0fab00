//! Uniform rendering capability shared by the four pixel objects (`§4.3`).
//!
//! The teacher's `tia/graphic.rs` gives `Playfield`/`Player`/`Missile`/`Ball`
//! a common trait, but one built around a clocked `Counter` scan circuit
//! (`clock()`, `apply_hmove()`, `get_counter_mut()`...). `SPEC_FULL.md` and
//! `ares/tia.cpp`'s `runPlayer`/`runMissile`/`runBall`/`runPlayfield` instead
//! treat each object as a pure function of the current horizontal pixel: "is
//! this object's color painted at column `x`?" This trait keeps the
//! teacher's intent — one shared capability, queried uniformly by the mux —
//! without the scan-circuit state machine that intent was built on.

/// A pixel object that can be asked whether it paints column `x` (`0..160`)
/// of the current scanline.
pub trait Render {
    fn render(&self, x: u8) -> bool;
}
