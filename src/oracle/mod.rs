//! Boundary to the external narrative generator.
//!
//! Landing on an ORACLE tile suspends the turn until the generator answers.
//! The engine hands out an [`OracleRequest`], the caller runs an
//! [`OracleService`] (however slow or remote), and feeds the result back.
//! Any failure degrades to [`OracleReading::fallback`].

mod reading;
mod service;

pub use reading::{parse_reply, OracleReading, OracleRequest};
pub use service::{OracleError, OracleService, ScriptedOracle, SilentOracle};
