//! Randomized batch verification.

use rand::TryCryptoRng;
use secp_curve::{Group, Point, Projective, Scalar};
use tracing::{debug, trace, warn};

use crate::errors::SchnorrError;
use crate::keys::VerifyingKey;
use crate::signatures::{Signature, hash_challenge};
use crate::validate;

// An honest source yields a zero or out-of-range draw with negligible
// probability; anything past this is a broken source.
const MAX_COEFFICIENT_DRAWS: usize = 64;

/// Verifies many signatures at once.
///
/// Each nonce point R_i is recovered from `r_i` alone and the batch accepts
/// iff `(Σ a_i s_i) G == Σ (a_i R_i + a_i e_i P_i)`, where `a_0 = 1` and the
/// remaining `a_i` are drawn from `rng`. One bad signature fails the whole
/// batch; there is no per-item result.
///
/// # Errors
///
/// - validation errors for mismatched or empty inputs, or a message that is
///   not 32 bytes
/// - [`SchnorrError::Randomness`] if `rng` fails; the batch is not checked
pub fn batch_verify<M, R>(
    pubkeys: &[VerifyingKey],
    messages: &[M],
    signatures: &[Signature],
    rng: &mut R,
) -> Result<bool, SchnorrError>
where
    M: AsRef<[u8]>,
    R: TryCryptoRng + ?Sized,
{
    validate::batch_lengths(pubkeys.len(), messages.len(), signatures.len())?;
    let messages = messages
        .iter()
        .map(|msg| validate::message(msg.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;

    let mut left = Scalar::ZERO;
    let mut points = Vec::with_capacity(2 * pubkeys.len());
    let mut scalars = Vec::with_capacity(2 * pubkeys.len());

    for (index, ((pubkey, msg), sig)) in pubkeys.iter().zip(messages).zip(signatures).enumerate() {
        let e = hash_challenge(&sig.r, pubkey.encoded(), msg);
        let Ok(r_point) = Point::lift_x(&sig.r) else {
            debug!(index, "batch rejected: r is not a valid x-coordinate");
            return Ok(false);
        };

        let a = if index == 0 {
            Scalar::ONE
        } else {
            random_coefficient(rng)?
        };
        trace!(index, "accumulating batch item");

        left += a * sig.s;
        points.push(Projective::from(r_point));
        scalars.push(a);
        points.push(Projective::from(pubkey.as_point()));
        scalars.push(a * e);
    }

    let right = Projective::multi_scalar_mul(&points, &scalars);
    let valid = <Projective as Group>::mul_generator(&left) == right;
    if !valid {
        debug!(size = pubkeys.len(), "batch rejected: equation does not hold");
    }
    Ok(valid)
}

/// Uniform scalar in `[1, n - 1]`.
fn random_coefficient<R: TryCryptoRng + ?Sized>(rng: &mut R) -> Result<Scalar, SchnorrError> {
    for _ in 0..MAX_COEFFICIENT_DRAWS {
        let mut bytes = [0u8; 32];
        if let Err(err) = rng.try_fill_bytes(&mut bytes) {
            warn!(error = %err, "randomness source failed during batch verification");
            return Err(SchnorrError::Randomness);
        }
        if let Some(a) = Scalar::from_bytes(&bytes).ok().filter(|a| !a.is_zero()) {
            return Ok(a);
        }
    }
    warn!(
        draws = MAX_COEFFICIENT_DRAWS,
        "randomness source never produced a usable coefficient"
    );
    Err(SchnorrError::Randomness)
}
