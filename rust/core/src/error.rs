// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for QDF record decoding.
//!
//! Every variant describes why a single record was dropped. The assembly
//! builder never propagates these; they exist so callers that want
//! diagnostics can tell rejections apart.

use thiserror::Error;

/// Result type for record decoding
pub type Result<T> = std::result::Result<T, Error>;

/// Broad class of a record rejection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorCategory {
    /// Unbalanced braces, missing orientation block, wrong field count
    Structural,
    /// Non-numeric id, coordinate or scalar field
    Numeric,
    /// Well-formed record that current policy excludes (visibility range)
    Policy,
    /// Line is not a record this decoder understands
    Skipped,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Structural => "structural",
            ErrorCategory::Numeric => "numeric",
            ErrorCategory::Policy => "policy",
            ErrorCategory::Skipped => "skipped",
        }
    }
}

/// Reasons a QDF record is rejected
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("no orientation block found")]
    MissingBraceBlock,

    #[error("unbalanced braces in record body")]
    UnbalancedBraces,

    #[error("orientation block must hold exactly 7 numbers, got {0}")]
    OrientationArity(usize),

    #[error("malformed orientation block: {0}")]
    MalformedOrientation(String),

    #[error("field `{field}` is not a number: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("field `{field}` is not an integer: {value:?}")]
    InvalidInteger { field: &'static str, value: String },

    #[error("{kind} needs at least {expected} fields, found {found}")]
    TooFewFields {
        kind: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("{kind} carries a visibility range, which is not supported")]
    VisibilityRange { kind: &'static str },

    #[error("unknown record keyword: {0}")]
    UnknownKeyword(String),

    #[error("line is not a record")]
    NotARecord,
}

impl Error {
    pub fn invalid_number(field: &'static str, value: impl Into<String>) -> Self {
        Error::InvalidNumber {
            field,
            value: value.into(),
        }
    }

    pub fn invalid_integer(field: &'static str, value: impl Into<String>) -> Self {
        Error::InvalidInteger {
            field,
            value: value.into(),
        }
    }

    /// Classify this rejection
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::MissingBraceBlock
            | Error::UnbalancedBraces
            | Error::OrientationArity(_)
            | Error::MalformedOrientation(_)
            | Error::TooFewFields { .. } => ErrorCategory::Structural,
            Error::InvalidNumber { .. } | Error::InvalidInteger { .. } => ErrorCategory::Numeric,
            Error::VisibilityRange { .. } => ErrorCategory::Policy,
            Error::UnknownKeyword(_) | Error::NotARecord => ErrorCategory::Skipped,
        }
    }
}
