//! Placement engine for drizzle.
//!
//! Turns per-node noise parameters into concrete placement times and
//! keeps a session tree's generated content current. The noise field
//! is a pure function of (time, parameters), which is what lets the
//! preview curve and the generated placements agree exactly.
//!
//! Designed to be `no_std` compatible with the `alloc` crate.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod coordinator;
mod noise;
mod planner;
mod rng;

#[cfg(feature = "std")]
pub use coordinator::MonotonicClock;
pub use coordinator::{Clock, Coordinator, Generator, ManualClock, MIN_REGEN_QUANTUM};
pub use noise::{curve, stream_value, value_at, Curve, Stream};
pub use planner::{plan, MAX_PLAN_STEPS};
