//! Stock game setups built on the engine.

pub mod sands;
