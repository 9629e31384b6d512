//! Fatal error taxonomy for the simulation engine (spec §7).
//!
//! Only contract violations, invariant violations, and replay exhaustion
//! propagate out of [`crate::sim::simulate_game`]. Decision ambiguity and
//! clamp events are handled locally and never surface here.

use thiserror::Error;

/// Errors that abort a simulation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A required player slot was empty when a skill check demanded one
    /// (e.g. no kicker on the roster for a field goal attempt).
    #[error("contract violation during {play}: required role `{role}` is unavailable")]
    ContractViolation {
        /// The play being resolved when the contract was violated.
        play: String,
        /// The role that was required but missing.
        role: String,
    },

    /// A structural invariant was violated (field position out of range,
    /// down advanced past Fourth without resolution, etc).
    #[error("invariant violation: {detail}")]
    InvariantViolation {
        /// Description of the invariant that failed.
        detail: String,
    },

    /// A [`crate::rng::ReplaySource`] was asked for more draws than were
    /// recorded, signalling determinism drift between record and replay.
    #[error("replay exhausted: requested {requested} draws named `{name}` but only {available} remain")]
    ReplayExhausted {
        /// Name of the draw site that ran out of recorded values.
        name: String,
        /// Number of draws requested at the exhausted site.
        requested: usize,
        /// Number of draws still available.
        available: usize,
    },

    /// The caller supplied an invalid argument (e.g. a null/empty team).
    #[error("invalid argument: {detail}")]
    InvalidArgument {
        /// Description of what was invalid.
        detail: String,
    },
}
