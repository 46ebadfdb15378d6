//! Error types for the Schnorr signature scheme.
//!
//! Failures fall into two groups. Validation errors reject malformed input
//! before any curve arithmetic runs. Arithmetic errors mean a deterministic
//! computation landed on a value it cannot continue from. A signature that
//! simply does not verify is not an error: `verify` returns `Ok(false)`.

use secp_curve::CurveError;
use thiserror::Error;

/// Input rejected at the validation boundary.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("invalid {what} length: expected {expected}, got {actual}")]
    InvalidLength {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("private key must satisfy 1 <= key <= n - 1")]
    PrivateKeyOutOfRange,
    #[error("signature component out of range")]
    SignatureOutOfRange,
    #[error("signer nonce must be nonzero")]
    ZeroNonce,
    #[error("{0} list must not be empty")]
    Empty(&'static str),
    #[error("duplicate {what} at index {index}")]
    Duplicate { what: &'static str, index: usize },
    #[error(
        "input lengths differ: {pubkeys} public keys, {messages} messages, {signatures} signatures"
    )]
    MismatchedLengths {
        pubkeys: usize,
        messages: usize,
        signatures: usize,
    },
    #[error("invalid encoding: {0}")]
    Encoding(CurveError),
    #[error("invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),
}

/// A deterministic computation hit a disallowed value.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticError {
    #[error("nonce collapsed to zero")]
    NonceZero,
    #[error("element is not invertible")]
    NotInvertible,
    #[error("blinding search exhausted after {0} attempts")]
    BlindingExhausted(usize),
    #[error("unexpected point at infinity")]
    PointAtInfinity,
}

/// Errors that can occur during signing and verification operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchnorrError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),
    #[error("arithmetic failure: {0}")]
    Arithmetic(#[from] ArithmeticError),
    /// The randomness source for batch verification failed. The batch is
    /// aborted rather than checked with a predictable coefficient.
    #[error("randomness source failed")]
    Randomness,
}

/// Coarse classification of a [`SchnorrError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Malformed or out-of-range input; nothing was computed.
    Validation,
    /// Fatal for the current operation, never retried.
    Arithmetic,
}

impl SchnorrError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SchnorrError::Validation(_) => ErrorCategory::Validation,
            SchnorrError::Arithmetic(_) | SchnorrError::Randomness => ErrorCategory::Arithmetic,
        }
    }
}

impl From<CurveError> for SchnorrError {
    fn from(err: CurveError) -> Self {
        match err {
            CurveError::NotInvertible => ArithmeticError::NotInvertible.into(),
            CurveError::Infinity => ArithmeticError::PointAtInfinity.into(),
            other => ValidationError::Encoding(other).into(),
        }
    }
}

impl From<hex::FromHexError> for SchnorrError {
    fn from(err: hex::FromHexError) -> Self {
        ValidationError::Hex(err).into()
    }
}
