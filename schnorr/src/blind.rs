//! Blind Schnorr signatures.
//!
//! The requester blinds a message against the signer's public key and a
//! nonce point R = k * G that the signer committed to in advance. The signer
//! answers the blinded challenge without learning the message or the final
//! nonce point, and the requester unblinds the answer into an ordinary
//! signature that [`VerifyingKey::verify`] accepts.

use secp_curve::{FieldElement, Point, Scalar, double_scalar_mul_basepoint};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::constants::{ALPHA_TAG, BETA_TAG, MAX_BLIND_ATTEMPTS};
use crate::errors::{ArithmeticError, SchnorrError, ValidationError};
use crate::hash::hmac;
use crate::keys::{SigningKey, VerifyingKey};
use crate::signatures::{Signature, hash_challenge};
use crate::validate;

/// The blinded challenge, the only value the requester sends to the signer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlindedMessage {
    pub c: Scalar,
}

/// Kept secret by the requester until the blinded signature arrives.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unblinder {
    pub alpha: Scalar,
    /// x-coordinate of the blinded nonce point R'
    pub r: FieldElement,
}

/// The signer's response to a [`BlindedMessage`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlindedSignature {
    pub s: Scalar,
}

/// Blinds `message` for signing by `signer` under the committed `nonce` point.
///
/// `alpha` and `beta` are derived from `secret` with HMAC-SHA-256. The
/// blinded nonce `R' = R + alpha * G + beta * P` must have a quadratic-residue
/// y-coordinate, so `beta` is re-derived with an incrementing one-byte
/// counter until it does.
///
/// # Errors
///
/// - validation errors for a message that is not 32 bytes or a `nonce` at
///   infinity
/// - [`ArithmeticError::BlindingExhausted`] if every counter value fails
pub fn blind_message(
    secret: &[u8],
    nonce: &Point,
    signer: &VerifyingKey,
    message: &[u8],
) -> Result<(Unblinder, BlindedMessage), SchnorrError> {
    let msg = validate::message(message)?;
    let nonce_bytes = nonce.to_bytes().map_err(ValidationError::Encoding)?;
    let signer_bytes = signer.encoded();

    let alpha = Scalar::from_bytes_reduced(&hmac(
        ALPHA_TAG,
        &[secret, &nonce_bytes, signer_bytes, msg],
    ));

    for retry in 0..=u8::MAX {
        let beta = Scalar::from_bytes_reduced(&hmac(
            BETA_TAG,
            &[secret, &nonce_bytes, signer_bytes, msg, &[retry]],
        ));

        let blinded_nonce = *nonce + double_scalar_mul_basepoint(&alpha, &beta, signer.as_point());
        let Point::Affine { x, y } = blinded_nonce else {
            continue;
        };
        if !y.is_quadratic_residue() {
            continue;
        }
        if retry > 0 {
            debug!(attempts = u32::from(retry) + 1, "blinding search needed retries");
        }

        let c_prime = hash_challenge(&x, signer_bytes, msg);
        return Ok((Unblinder { alpha, r: x }, BlindedMessage { c: c_prime + beta }));
    }

    warn!(attempts = MAX_BLIND_ATTEMPTS, "blinding search exhausted");
    Err(ArithmeticError::BlindingExhausted(MAX_BLIND_ATTEMPTS).into())
}

/// Signer side: `s' = k + c * x` for the committed nonce `k`.
///
/// The nonce must never be reused across sessions.
pub fn blind_sign(
    signer: &SigningKey,
    nonce: &Scalar,
    blinded: &BlindedMessage,
) -> Result<BlindedSignature, SchnorrError> {
    if nonce.is_zero() {
        return Err(ValidationError::ZeroNonce.into());
    }
    Ok(BlindedSignature {
        s: *nonce + blinded.c * *signer.scalar(),
    })
}

/// Requester side: `s = s' + alpha`, giving the signature `(R'.x, s)`.
pub fn unblind(unblinder: &Unblinder, blinded: &BlindedSignature) -> Signature {
    Signature {
        r: unblinder.r,
        s: blinded.s + unblinder.alpha,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use secp_curve::{CurveError, RandomField};

    #[test]
    fn test_blinded_nonce_has_square_y() {
        let mut rng = StdRng::seed_from_u64(42);
        let signer = SigningKey::random(&mut rng);
        let k = Scalar::random_nonzero(&mut rng);
        let nonce = Point::GENERATOR * k;

        let (unblinder, _) =
            blind_message(b"session", &nonce, &signer.verifying_key(), &[3u8; 32]).unwrap();
        let lifted = Point::lift_x(&unblinder.r).unwrap();
        assert!(lifted.has_square_y());
    }

    #[test]
    fn test_blinding_is_deterministic() {
        let mut rng = StdRng::seed_from_u64(7);
        let signer = SigningKey::random(&mut rng).verifying_key();
        let nonce = Point::GENERATOR * Scalar::random_nonzero(&mut rng);

        let first = blind_message(b"secret", &nonce, &signer, &[1u8; 32]).unwrap();
        let second = blind_message(b"secret", &nonce, &signer, &[1u8; 32]).unwrap();
        let other = blind_message(b"other", &nonce, &signer, &[1u8; 32]).unwrap();
        assert_eq!(first, second);
        assert_ne!(first.1, other.1);
    }

    #[test]
    fn test_blind_message_rejects_bad_input() {
        let signer = SigningKey::from_bytes(&[5]).unwrap().verifying_key();

        assert_eq!(
            blind_message(b"s", &Point::Infinity, &signer, &[0u8; 32]),
            Err(SchnorrError::Validation(ValidationError::Encoding(
                CurveError::Infinity
            )))
        );
        assert!(matches!(
            blind_message(b"s", &Point::GENERATOR, &signer, &[0u8; 16]),
            Err(SchnorrError::Validation(ValidationError::InvalidLength { .. }))
        ));
    }

    #[test]
    fn test_blind_sign_rejects_zero_nonce() {
        let signer = SigningKey::from_bytes(&[5]).unwrap();
        let blinded = BlindedMessage { c: Scalar::ONE };
        assert_eq!(
            blind_sign(&signer, &Scalar::ZERO, &blinded),
            Err(SchnorrError::Validation(ValidationError::ZeroNonce))
        );
    }
}
