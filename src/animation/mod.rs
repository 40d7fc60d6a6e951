//! Frame-stepped animation.
//!
//! [`AnimationDriver`] owns the run: it builds the surface and particle
//! system, advances an [`AnimationState`] once per frame along a
//! [`ViewSweep`], hands each frame to a renderer and the finished sequence
//! to an exporter.

mod driver;
mod state;
mod view;

pub use driver::{AnimationDriver, AnimationError, RunOutcome, RunReport};
pub use state::{AnimationState, DriverState, Modulation};
pub use view::{wrap_degrees, ViewParams, ViewSweep};
