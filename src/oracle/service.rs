//! The generator trait and the two in-process implementations.

use std::collections::VecDeque;

use thiserror::Error;

use super::reading::{OracleReading, OracleRequest};

/// Why the generator produced no reading.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum OracleError {
    #[error("oracle service is not configured")]
    Unavailable,
    #[error("oracle request failed: {0}")]
    Failed(String),
    #[error("oracle reply could not be parsed: {0}")]
    Malformed(String),
}

/// A narrative generator.
///
/// Implementations may block, call out over the network, or time out; the
/// engine is suspended in `AwaitingOracle` until the result is delivered.
pub trait OracleService {
    fn consult(&mut self, request: &OracleRequest) -> Result<OracleReading, OracleError>;
}

/// The generator used when none is configured. Always unavailable.
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentOracle;

impl OracleService for SilentOracle {
    fn consult(&mut self, _request: &OracleRequest) -> Result<OracleReading, OracleError> {
        Err(OracleError::Unavailable)
    }
}

/// Answers with queued results, then reports itself unavailable.
#[derive(Clone, Debug, Default)]
pub struct ScriptedOracle {
    answers: VecDeque<Result<OracleReading, OracleError>>,
    consulted: Vec<OracleRequest>,
}

impl ScriptedOracle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful reading.
    #[must_use]
    pub fn with_reading(mut self, reading: OracleReading) -> Self {
        self.answers.push_back(Ok(reading));
        self
    }

    /// Queue a failure.
    #[must_use]
    pub fn with_failure(mut self, error: OracleError) -> Self {
        self.answers.push_back(Err(error));
        self
    }

    /// Requests seen so far.
    #[must_use]
    pub fn consulted(&self) -> &[OracleRequest] {
        &self.consulted
    }
}

impl OracleService for ScriptedOracle {
    fn consult(&mut self, request: &OracleRequest) -> Result<OracleReading, OracleError> {
        self.consulted.push(request.clone());
        self.answers
            .pop_front()
            .unwrap_or(Err(OracleError::Unavailable))
    }
}
