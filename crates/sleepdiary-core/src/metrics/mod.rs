//! Sleep efficiency engine.
//!
//! Pure functions from diary answers to efficiency percentages:
//!
//! - [`clock`]: `HH:MM` strings to minutes since midnight
//! - [`window`]: elapsed minutes between two clock readings, across midnight
//! - [`efficiency`]: actual and vs-target efficiency ratios
//! - [`rounding`]: the [`RoundingPolicy`] applied to every stored percentage
//! - [`assemble`]: [`RecordAssembler`], which wires the above together
//!
//! Nothing here performs I/O or holds shared state.

pub mod assemble;
pub mod clock;
pub mod efficiency;
pub mod rounding;
pub mod window;

pub use assemble::RecordAssembler;
pub use clock::{minutes_or_zero, parse_clock, ClockParseError, ClockTime, MINUTES_PER_DAY};
pub use efficiency::{actual_efficiency, time_in_bed, vs_target_efficiency};
pub use rounding::RoundingPolicy;
pub use window::window;
