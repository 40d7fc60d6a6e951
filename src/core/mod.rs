//! # Core Module
//!
//! Timing and cancellation utilities shared by the animation driver.

mod cancel;
mod clock;

pub use cancel::CancelToken;
pub use clock::Clock;
