//! Shape and range checks applied before any curve arithmetic runs.

use std::collections::HashSet;
use std::hash::Hash;

use secp_curve::{FieldElement, Point, Scalar, FIELD_BYTES};

use crate::constants::{MESSAGE_SIZE, PK_SIZE, SIG_SIZE, SK_SIZE};
use crate::errors::ValidationError;

/// Messages are 32-byte digests.
pub fn message(bytes: &[u8]) -> Result<&[u8; MESSAGE_SIZE], ValidationError> {
    bytes
        .try_into()
        .map_err(|_| ValidationError::InvalidLength {
            what: "message",
            expected: MESSAGE_SIZE,
            actual: bytes.len(),
        })
}

/// Big-endian private key of at most 32 bytes, in `[1, n - 1]`.
pub fn private_key(bytes: &[u8]) -> Result<Scalar, ValidationError> {
    if bytes.len() > SK_SIZE {
        return Err(ValidationError::InvalidLength {
            what: "private key",
            expected: SK_SIZE,
            actual: bytes.len(),
        });
    }
    let scalar = Scalar::from_be_slice(bytes).map_err(|_| ValidationError::PrivateKeyOutOfRange)?;
    if scalar.is_zero() {
        return Err(ValidationError::PrivateKeyOutOfRange);
    }
    Ok(scalar)
}

/// Compressed public key; the point must lie on the curve.
pub fn public_key(bytes: &[u8]) -> Result<Point, ValidationError> {
    if bytes.len() != PK_SIZE {
        return Err(ValidationError::InvalidLength {
            what: "public key",
            expected: PK_SIZE,
            actual: bytes.len(),
        });
    }
    Point::from_bytes(bytes).map_err(ValidationError::Encoding)
}

/// 64-byte signature with `r < p` and `s < n`.
pub fn signature(bytes: &[u8]) -> Result<(FieldElement, Scalar), ValidationError> {
    if bytes.len() != SIG_SIZE {
        return Err(ValidationError::InvalidLength {
            what: "signature",
            expected: SIG_SIZE,
            actual: bytes.len(),
        });
    }
    let (r_bytes, s_bytes) = bytes.split_at(FIELD_BYTES);
    let r = FieldElement::from_be_slice(r_bytes).map_err(|_| ValidationError::SignatureOutOfRange)?;
    let s = Scalar::from_be_slice(s_bytes).map_err(|_| ValidationError::SignatureOutOfRange)?;
    Ok((r, s))
}

pub fn nonempty<T>(items: &[T], what: &'static str) -> Result<(), ValidationError> {
    if items.is_empty() {
        return Err(ValidationError::Empty(what));
    }
    Ok(())
}

/// Rejects the first item that repeats an earlier one.
pub fn distinct<T, I>(items: I, what: &'static str) -> Result<(), ValidationError>
where
    T: Eq + Hash,
    I: IntoIterator<Item = T>,
{
    let mut seen = HashSet::new();
    for (index, item) in items.into_iter().enumerate() {
        if !seen.insert(item) {
            return Err(ValidationError::Duplicate { what, index });
        }
    }
    Ok(())
}

/// Batch inputs must have equal, nonzero lengths.
pub fn batch_lengths(
    pubkeys: usize,
    messages: usize,
    signatures: usize,
) -> Result<(), ValidationError> {
    if pubkeys != messages || messages != signatures {
        return Err(ValidationError::MismatchedLengths {
            pubkeys,
            messages,
            signatures,
        });
    }
    if pubkeys == 0 {
        return Err(ValidationError::Empty("batch"));
    }
    Ok(())
}
