//! Shared primitives: output rounding and the request clock.

pub mod clock;
pub mod money;

pub use clock::StartTime;
pub use money::round2;
