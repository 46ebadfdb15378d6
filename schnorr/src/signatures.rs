//! Signature types and the nonce and challenge derivations shared by every
//! signing flow.

use secp_curve::{FieldElement, Point, Scalar, FIELD_BYTES};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::constants::{MESSAGE_SIZE, PK_SIZE, SIG_SIZE};
use crate::errors::{ArithmeticError, SchnorrError};
use crate::hash::hash;
use crate::validate;

/// A Schnorr signature `(r, s)`.
///
/// `r` is the x-coordinate of the nonce point R, whose y-coordinate is a
/// quadratic residue, and `s` is the response scalar. The types guarantee
/// `r < p` and `s < n`; that alone does not make a signature valid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Signature {
    /// x-coordinate of the nonce point R = k * G
    pub r: FieldElement,
    /// The response scalar s = k + e * sk
    pub s: Scalar,
}

impl Signature {
    pub fn new(r: FieldElement, s: Scalar) -> Self {
        Self { r, s }
    }

    /// Decodes `r || s`, both 32-byte big-endian.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SchnorrError> {
        let (r, s) = validate::signature(bytes)?;
        Ok(Self { r, s })
    }

    pub fn from_hex(hex: &str) -> Result<Self, SchnorrError> {
        Self::from_bytes(&hex::decode(hex)?)
    }

    pub fn to_bytes(&self) -> [u8; SIG_SIZE] {
        let mut out = [0u8; SIG_SIZE];
        out[..FIELD_BYTES].copy_from_slice(&self.r.to_bytes());
        out[FIELD_BYTES..].copy_from_slice(&self.s.to_bytes());
        out
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }
}

/// Deterministic nonce `k0 = H(d || m) mod n`.
///
/// A zero result is fatal: retrying with another value would break the
/// determinism of nonce generation.
pub(crate) fn deterministic_nonce(
    secret: &Scalar,
    msg: &[u8; MESSAGE_SIZE],
) -> Result<Scalar, SchnorrError> {
    let k0 = Scalar::from_bytes_reduced(&hash(&[&secret.to_bytes(), msg]));
    if k0.is_zero() {
        warn!("deterministic nonce collapsed to zero");
        return Err(ArithmeticError::NonceZero.into());
    }
    Ok(k0)
}

/// Negates `k` unless `r_point` has a quadratic-residue y-coordinate, so the
/// nonce actually used always corresponds to such a point.
pub(crate) fn normalize_nonce(r_point: &Point, k: Scalar) -> Scalar {
    if r_point.has_square_y() { k } else { -k }
}

/// Fiat-Shamir challenge `e = H(r || P || m) mod n`, with P compressed.
pub(crate) fn hash_challenge(
    r: &FieldElement,
    pubkey: &[u8; PK_SIZE],
    msg: &[u8; MESSAGE_SIZE],
) -> Scalar {
    Scalar::from_bytes_reduced(&hash(&[&r.to_bytes(), pubkey, msg]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ValidationError;
    use hex_literal::hex;

    #[test]
    fn test_bytes_roundtrip() {
        let bytes = hex!(
            "00DA9B08172A9B6F0466A2DEFD817F2D7AB437E0D253CB5395A963866B3574BE"
            "00880371D01766935B92D2AB4CD5C8A2A5837EC57FED7660773A05F0DE142380"
        );
        let sig = Signature::from_bytes(&bytes).unwrap();
        assert_eq!(sig.to_bytes(), bytes);
        assert_eq!(Signature::from_hex(&sig.to_hex()).unwrap(), sig);
    }

    #[test]
    fn test_from_bytes_rejects_malformed() {
        assert!(matches!(
            Signature::from_bytes(&[0u8; 63]),
            Err(SchnorrError::Validation(ValidationError::InvalidLength { .. }))
        ));
        assert_eq!(
            Signature::from_bytes(&[0xff; 64]),
            Err(SchnorrError::Validation(ValidationError::SignatureOutOfRange))
        );
        assert!(matches!(
            Signature::from_hex("zz"),
            Err(SchnorrError::Validation(ValidationError::Hex(_)))
        ));
    }

    #[test]
    fn test_deterministic_nonce() {
        let msg = [7u8; 32];
        let d = Scalar::from_u64(3);
        let k1 = deterministic_nonce(&d, &msg).unwrap();
        let k2 = deterministic_nonce(&d, &msg).unwrap();
        assert_eq!(k1, k2);
        assert_ne!(k1, deterministic_nonce(&Scalar::from_u64(4), &msg).unwrap());
    }

    #[test]
    fn test_normalize_nonce() {
        let k = Scalar::from_u64(99);
        let r_point = Point::GENERATOR * k;
        let normalized = normalize_nonce(&r_point, k);
        assert!((Point::GENERATOR * normalized).has_square_y());
        assert_eq!(normalize_nonce(&-r_point, -k), normalized);
    }
}
