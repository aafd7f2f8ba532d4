//! Error type for model and observation loading.
//!
//! The inference routines themselves are infallible; everything that can go
//! wrong happens while turning text (or builder calls) into a [`Model`] or an
//! [`ObservationSequence`].
//!
//! [`Model`]: crate::model::Model
//! [`ObservationSequence`]: crate::observation::ObservationSequence

use thiserror::Error;

/// Unified error type for loading and constructing HMM inputs.
#[derive(Debug, Error)]
pub enum HmmError {
    /// I/O error while reading a model or data source.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed token stream (missing or non-numeric fields).
    #[error("parse error: {0}")]
    Parse(String),

    /// The model violates a structural invariant.
    #[error("invalid model: {0}")]
    InvalidModel(String),

    /// The observation records are inconsistent with the model or each other.
    #[error("invalid observations: {0}")]
    InvalidObservations(String),

    /// A state name that the model does not define.
    #[error("unknown state '{0}'")]
    UnknownState(String),

    /// A symbol token outside `a..z` or outside the model alphabet.
    #[error("invalid symbol '{0}'")]
    InvalidSymbol(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, HmmError>;
