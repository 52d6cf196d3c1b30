//! # Adapters Layer (Hexagonal Architecture)

mod time;

pub use time::{MockTimeSource, SystemTimeSource};
