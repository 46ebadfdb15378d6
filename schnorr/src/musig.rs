//! Non-interactive MuSig key aggregation and co-signing.
//!
//! Every key is weighted by a coefficient bound to the whole ordered key
//! list, so the combined key depends on the order of its inputs. Signing is
//! non-interactive: the caller holds every private key.

use secp_curve::{Group, Point, Projective, Scalar};
use tracing::debug;

use crate::constants::MUSIG_TAG;
use crate::errors::{ArithmeticError, SchnorrError};
use crate::hash::{DIGEST_SIZE, hash};
use crate::keys::{SigningKey, VerifyingKey};
use crate::signatures::{Signature, deterministic_nonce, hash_challenge, normalize_nonce};
use crate::validate;

/// An ordered set of public keys together with their MuSig coefficients and
/// the resulting combined key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyAggregate {
    pubkeys: Vec<VerifyingKey>,
    tag: [u8; DIGEST_SIZE],
    coefficients: Vec<Scalar>,
    combined: VerifyingKey,
}

impl KeyAggregate {
    /// Aggregates `pubkeys` in the given order.
    ///
    /// The aggregation tag is `L = H(P_0 || P_1 || ...)` over the compressed
    /// keys, and key `i` is weighted by
    /// `H(tag || tag || L || i as u32 little-endian) mod n` with
    /// `tag = H("MuSig coefficient")`.
    pub fn new(pubkeys: &[VerifyingKey]) -> Result<Self, SchnorrError> {
        validate::nonempty(pubkeys, "public key")?;

        let encoded: Vec<&[u8]> = pubkeys.iter().map(|key| key.encoded().as_slice()).collect();
        let tag = hash(&encoded);
        let musig_tag = hash(&[MUSIG_TAG]);

        let coefficients: Vec<Scalar> = (0..pubkeys.len())
            .map(|index| coefficient(&musig_tag, &tag, index as u32))
            .collect();

        let points: Vec<Projective> = pubkeys
            .iter()
            .map(|key| Projective::from(key.as_point()))
            .collect();
        let combined =
            VerifyingKey::from_derived(Projective::multi_scalar_mul(&points, &coefficients).to_affine())?;

        debug!(keys = pubkeys.len(), "aggregated public keys");
        Ok(Self {
            pubkeys: pubkeys.to_vec(),
            tag,
            coefficients,
            combined,
        })
    }

    pub fn pubkeys(&self) -> &[VerifyingKey] {
        &self.pubkeys
    }

    /// The aggregation tag L.
    pub fn tag(&self) -> &[u8; DIGEST_SIZE] {
        &self.tag
    }

    pub fn coefficients(&self) -> &[Scalar] {
        &self.coefficients
    }

    pub fn combined_key(&self) -> &VerifyingKey {
        &self.combined
    }
}

fn coefficient(musig_tag: &[u8; DIGEST_SIZE], tag: &[u8; DIGEST_SIZE], index: u32) -> Scalar {
    Scalar::from_bytes_reduced(&hash(&[musig_tag, musig_tag, tag, &index.to_le_bytes()]))
}

/// The MuSig combined key of `pubkeys`, in order.
pub fn pubkey_combine(pubkeys: &[VerifyingKey]) -> Result<VerifyingKey, SchnorrError> {
    Ok(*KeyAggregate::new(pubkeys)?.combined_key())
}

/// Signs `message` with every key in `privkeys`.
///
/// Each signer derives its nonce exactly as in single-signer signing. All
/// nonces are normalized against the y-coordinate of the summed nonce point,
/// and the result verifies under [`pubkey_combine`] of the signers' public
/// keys in the same order.
///
/// # Errors
///
/// - validation errors for an empty or repeated key list, or a message that
///   is not 32 bytes
/// - [`ArithmeticError::NonceZero`] if any signer's nonce is zero
pub fn sign(privkeys: &[SigningKey], message: &[u8]) -> Result<Signature, SchnorrError> {
    validate::nonempty(privkeys, "private key")?;
    validate::distinct(privkeys.iter().map(SigningKey::to_bytes), "private key")?;
    let msg = validate::message(message)?;

    let nonces = privkeys
        .iter()
        .map(|key| deterministic_nonce(key.scalar(), msg))
        .collect::<Result<Vec<_>, _>>()?;
    let r_point: Point = nonces
        .iter()
        .map(<Point as Group>::mul_generator)
        .sum();
    let Some(r) = r_point.x() else {
        return Err(ArithmeticError::PointAtInfinity.into());
    };

    let pubkeys: Vec<VerifyingKey> = privkeys.iter().map(SigningKey::verifying_key).collect();
    let aggregate = KeyAggregate::new(&pubkeys)?;
    let e = hash_challenge(&r, aggregate.combined_key().encoded(), msg);

    let s = privkeys
        .iter()
        .zip(&nonces)
        .zip(aggregate.coefficients())
        .map(|((key, k), a)| normalize_nonce(&r_point, *k) + e * *a * *key.scalar())
        .sum();

    Ok(Signature { r, s })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ValidationError;

    fn keys(values: &[u8]) -> Vec<SigningKey> {
        values
            .iter()
            .map(|v| SigningKey::from_bytes(&[*v]).unwrap())
            .collect()
    }

    #[test]
    fn test_aggregate_shape() {
        let pubkeys: Vec<VerifyingKey> = keys(&[1, 2, 3]).iter().map(SigningKey::verifying_key).collect();
        let aggregate = KeyAggregate::new(&pubkeys).unwrap();

        assert_eq!(aggregate.pubkeys(), pubkeys.as_slice());
        assert_eq!(aggregate.coefficients().len(), 3);
        let encoded: Vec<u8> = pubkeys.iter().flat_map(|k| k.to_bytes()).collect();
        assert_eq!(*aggregate.tag(), hash(&[&encoded]));

        let expected: Point = pubkeys
            .iter()
            .zip(aggregate.coefficients())
            .map(|(key, a)| *key.as_point() * *a)
            .sum();
        assert_eq!(aggregate.combined_key().as_point(), &expected);
    }

    #[test]
    fn test_coefficients_depend_on_index() {
        let musig_tag = hash(&[MUSIG_TAG]);
        let tag = [9u8; 32];
        assert_ne!(coefficient(&musig_tag, &tag, 0), coefficient(&musig_tag, &tag, 1));
    }

    #[test]
    fn test_sign_rejects_bad_key_lists() {
        assert_eq!(
            sign(&[], &[0u8; 32]),
            Err(SchnorrError::Validation(ValidationError::Empty("private key")))
        );
        assert_eq!(
            sign(&keys(&[4, 5, 4]), &[0u8; 32]),
            Err(SchnorrError::Validation(ValidationError::Duplicate {
                what: "private key",
                index: 2
            }))
        );
        assert!(matches!(
            sign(&keys(&[4]), &[0u8; 31]),
            Err(SchnorrError::Validation(ValidationError::InvalidLength { .. }))
        ));
    }

    #[test]
    fn test_combine_rejects_empty() {
        assert_eq!(
            pubkey_combine(&[]),
            Err(SchnorrError::Validation(ValidationError::Empty("public key")))
        );
    }
}
