//! Platform abstraction layer
//!
//! Handles the parts of the outer loop the simulation must not touch:
//! - Frame pacing and elapsed time
//! - Input sources (scripted or the demo autopilot)

pub mod autopilot;
pub mod clock;
pub mod input;

pub use autopilot::Autopilot;
pub use clock::FrameClock;
pub use input::{InputSource, ScriptedInput};
