//! Domain model for timed mental-arithmetic (anzan) grade attempts.
//!
//! This crate holds the grade ladder, the question generator and the scored
//! result type. It knows nothing about storage or presentation; those live in
//! the `storage` and `services` crates.

#![forbid(unsafe_code)]

pub mod generator;
pub mod model;
pub mod time;

pub use time::Clock;
