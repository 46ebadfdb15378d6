use thiserror::Error;

/// Errors raised while decoding or operating on curve values.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveError {
    #[error("point is not on the curve")]
    NotOnCurve,
    #[error("invalid point prefix: {0:#04x}")]
    InvalidPrefix(u8),
    #[error("invalid length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
    #[error("value overflows 32 bytes: {0}")]
    Overflow(usize),
    #[error("value out of range")]
    OutOfRange,
    #[error("point at infinity has no encoding")]
    Infinity,
    #[error("element is not invertible")]
    NotInvertible,
}
