//! Signing and verifying keys for the Schnorr signature scheme.

use core::fmt;

use rand::Rng;
use secp_curve::{double_scalar_mul_basepoint, Group, Point, RandomField, Scalar};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::constants::{PK_SIZE, SK_SIZE};
use crate::errors::{ArithmeticError, SchnorrError, ValidationError};
use crate::signatures::{Signature, deterministic_nonce, hash_challenge, normalize_nonce};
use crate::validate;

/// A secret signing key for creating Schnorr signatures.
///
/// The signing key is a scalar in `[1, n - 1]`, stored with its verifying
/// key. It must be kept secret, so its `Debug` output is redacted.
///
/// # Example
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use secp_schnorr::SigningKey;
///
/// let mut rng = StdRng::seed_from_u64(42);
/// let signing_key = SigningKey::random(&mut rng);
/// let restored = SigningKey::from_bytes(&signing_key.to_bytes()).unwrap();
/// assert_eq!(signing_key, restored);
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "[u8; 32]", into = "[u8; 32]")]
pub struct SigningKey {
    scalar: Scalar,
    verifying_key: VerifyingKey,
}

/// A public verifying key for verifying Schnorr signatures.
///
/// The verifying key is a finite curve point, derived from the signing key
/// by multiplying the generator by the secret scalar. Its compressed
/// encoding is kept alongside, since every challenge hashes it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct VerifyingKey {
    point: Point,
    encoded: [u8; PK_SIZE],
}

impl SigningKey {
    /// Generates a random signing key using the provided random number generator.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        loop {
            // Only a zero scalar is rejected, and random_nonzero never yields one
            if let Ok(key) = Self::from_scalar(Scalar::random_nonzero(rng)) {
                return key;
            }
        }
    }

    /// Wraps a scalar, rejecting zero.
    pub fn from_scalar(scalar: Scalar) -> Result<Self, SchnorrError> {
        if scalar.is_zero() {
            return Err(ValidationError::PrivateKeyOutOfRange.into());
        }
        let verifying_key = VerifyingKey::from_derived(<Point as Group>::mul_generator(&scalar))?;
        Ok(Self {
            scalar,
            verifying_key,
        })
    }

    /// Decodes a big-endian key of at most 32 bytes; shorter inputs are
    /// left-padded.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SchnorrError> {
        Self::from_scalar(validate::private_key(bytes)?)
    }

    pub fn from_hex(hex: &str) -> Result<Self, SchnorrError> {
        Self::from_bytes(&hex::decode(hex)?)
    }

    pub fn to_bytes(&self) -> [u8; SK_SIZE] {
        self.scalar.to_bytes()
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    pub(crate) fn scalar(&self) -> &Scalar {
        &self.scalar
    }

    /// Derives the public verifying key from this signing key.
    ///
    /// The verifying key is computed as `G * sk`.
    pub fn verifying_key(&self) -> VerifyingKey {
        self.verifying_key
    }

    /// Signs a 32-byte message digest.
    ///
    /// The signature is deterministic:
    /// 1. Derive `k0 = H(sk || msg) mod n`
    /// 2. Compute `R = G * k0`, negating the nonce if `R.y` is not a
    ///    quadratic residue
    /// 3. Compute challenge `e = H(R.x || pk || msg)`
    /// 4. Compute `s = k + e * sk`
    /// 5. Return signature `(R.x, s)`
    ///
    /// # Errors
    ///
    /// - [`ValidationError::InvalidLength`] if `msg` is not 32 bytes
    /// - [`ArithmeticError::NonceZero`] if the derived nonce is zero
    ///
    /// # Example
    ///
    /// ```
    /// use secp_schnorr::SigningKey;
    ///
    /// let signing_key = SigningKey::from_bytes(&[1]).unwrap();
    /// let signature = signing_key.sign(&[0u8; 32]).expect("signing failed");
    /// assert!(signing_key.verifying_key().verify(&[0u8; 32], &signature).unwrap());
    /// ```
    pub fn sign(&self, msg: &[u8]) -> Result<Signature, SchnorrError> {
        let msg = validate::message(msg)?;

        let k0 = deterministic_nonce(&self.scalar, msg)?;
        let r_point = <Point as Group>::mul_generator(&k0);
        let Some(r) = r_point.x() else {
            return Err(ArithmeticError::PointAtInfinity.into());
        };
        let k = normalize_nonce(&r_point, k0);

        let e = hash_challenge(&r, &self.verifying_key.encoded, msg);
        let s = k + e * self.scalar;

        Ok(Signature { r, s })
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningKey(..)")
    }
}

impl TryFrom<[u8; SK_SIZE]> for SigningKey {
    type Error = SchnorrError;

    fn try_from(bytes: [u8; SK_SIZE]) -> Result<Self, Self::Error> {
        Self::from_bytes(&bytes)
    }
}

impl From<SigningKey> for [u8; SK_SIZE] {
    fn from(key: SigningKey) -> Self {
        key.to_bytes()
    }
}

impl VerifyingKey {
    /// Wraps a point produced by key arithmetic. Landing on infinity is an
    /// arithmetic failure rather than an encoding one.
    pub(crate) fn from_derived(point: Point) -> Result<Self, SchnorrError> {
        let encoded = point.to_bytes()?;
        Ok(Self { point, encoded })
    }

    /// Wraps a curve point, rejecting the point at infinity.
    pub fn from_point(point: Point) -> Result<Self, SchnorrError> {
        let encoded = point.to_bytes().map_err(ValidationError::Encoding)?;
        Ok(Self { point, encoded })
    }

    /// Decodes a 33-byte compressed public key.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SchnorrError> {
        let point = validate::public_key(bytes)?;
        Self::from_point(point)
    }

    pub fn from_hex(hex: &str) -> Result<Self, SchnorrError> {
        Self::from_bytes(&hex::decode(hex)?)
    }

    pub fn to_bytes(&self) -> [u8; PK_SIZE] {
        self.encoded
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.encoded)
    }

    pub fn as_point(&self) -> &Point {
        &self.point
    }

    pub(crate) fn encoded(&self) -> &[u8; PK_SIZE] {
        &self.encoded
    }

    /// Verifies a signature on a 32-byte message digest.
    ///
    /// Computes `e = H(r || pk || msg)` and `R = G * s - pk * e`, and accepts
    /// when R is finite, `R.y` is a quadratic residue and `R.x == r`.
    ///
    /// # Returns
    ///
    /// - `Ok(true)` if the signature is valid
    /// - `Ok(false)` for any cryptographic mismatch, including `r = 0` or `s = 0`
    /// - `Err(_)` only when `msg` is not 32 bytes
    pub fn verify(&self, msg: &[u8], sig: &Signature) -> Result<bool, SchnorrError> {
        let msg = validate::message(msg)?;

        if sig.r.is_zero() || sig.s.is_zero() {
            trace!("signature has a zero component");
            return Ok(false);
        }

        let e = hash_challenge(&sig.r, &self.encoded, msg);
        let r_point = double_scalar_mul_basepoint(&sig.s, &-e, &self.point);

        Ok(match r_point {
            Point::Infinity => false,
            Point::Affine { x, y } => y.is_quadratic_residue() && x == sig.r,
        })
    }

    /// Plain sum of public keys.
    ///
    /// Unlike [`crate::musig::pubkey_combine`], no per-key coefficients are
    /// applied.
    pub fn combine(keys: &[VerifyingKey]) -> Result<Self, SchnorrError> {
        validate::nonempty(keys, "public key")?;
        Self::from_derived(keys.iter().map(|key| key.point).sum())
    }

    /// Multiplies this key by a 32-byte big-endian scalar tweak.
    ///
    /// The tweak is reduced mod n, so a multiple of n lands on infinity and
    /// fails with [`ArithmeticError::PointAtInfinity`].
    pub fn tweak_mul(&self, tweak: &[u8]) -> Result<Self, SchnorrError> {
        let tweak: &[u8; SK_SIZE] = tweak
            .try_into()
            .map_err(|_| ValidationError::InvalidLength {
                what: "tweak",
                expected: SK_SIZE,
                actual: tweak.len(),
            })?;
        Self::from_derived(self.point * Scalar::from_bytes_reduced(tweak))
    }
}

impl From<&SigningKey> for VerifyingKey {
    /// Converts a reference to a signing key into a verifying key.
    ///
    /// This is equivalent to calling `signing_key.verifying_key()`.
    fn from(sk: &SigningKey) -> Self {
        sk.verifying_key()
    }
}

impl TryFrom<Vec<u8>> for VerifyingKey {
    type Error = SchnorrError;

    fn try_from(bytes: Vec<u8>) -> Result<Self, Self::Error> {
        Self::from_bytes(&bytes)
    }
}

impl From<VerifyingKey> for Vec<u8> {
    fn from(key: VerifyingKey) -> Self {
        key.encoded.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use secp_curve::CurveError;

    #[test]
    fn test_signing_key_range() {
        assert!(SigningKey::from_bytes(&[0u8; 32]).is_err());
        assert!(SigningKey::from_scalar(Scalar::ZERO).is_err());
        assert_eq!(
            SigningKey::from_bytes(&[1]).unwrap(),
            SigningKey::from_scalar(Scalar::ONE).unwrap()
        );
        assert_eq!(format!("{:?}", SigningKey::from_bytes(&[1]).unwrap()), "SigningKey(..)");
    }

    #[test]
    fn test_verifying_key_of_one_is_generator() {
        let sk = SigningKey::from_bytes(&[1]).unwrap();
        let pk = sk.verifying_key();
        assert_eq!(*pk.as_point(), Point::GENERATOR);
        assert_eq!(
            pk.to_bytes(),
            hex!("0279BE667EF9DCBBAC55A06295CE870B07029BFCDB2DCE28D959F2815B16F81798")
        );
    }

    #[test]
    fn test_hex_roundtrip() {
        let mut rng = StdRng::seed_from_u64(42);
        let sk = SigningKey::random(&mut rng);
        let pk = sk.verifying_key();

        assert_eq!(SigningKey::from_hex(&sk.to_hex()).unwrap(), sk);
        assert_eq!(VerifyingKey::from_hex(&pk.to_hex()).unwrap(), pk);
        assert!(VerifyingKey::from_hex("02abc").is_err());
    }

    #[test]
    fn test_from_point_rejects_infinity() {
        assert_eq!(
            VerifyingKey::from_point(Point::Infinity),
            Err(SchnorrError::Validation(ValidationError::Encoding(
                CurveError::Infinity
            )))
        );
    }

    #[test]
    fn test_combine() {
        let g = VerifyingKey::from_point(Point::GENERATOR).unwrap();
        let two_g = VerifyingKey::from_point(Point::GENERATOR.double()).unwrap();
        let combined = VerifyingKey::combine(&[g, two_g]).unwrap();
        assert_eq!(*combined.as_point(), Point::GENERATOR.mul_u64(3));

        let neg_g = VerifyingKey::from_point(-Point::GENERATOR).unwrap();
        assert_eq!(
            VerifyingKey::combine(&[g, neg_g]),
            Err(SchnorrError::Arithmetic(ArithmeticError::PointAtInfinity))
        );
        assert_eq!(
            VerifyingKey::combine(&[]),
            Err(SchnorrError::Validation(ValidationError::Empty("public key")))
        );
    }

    #[test]
    fn test_tweak_mul() {
        let g = VerifyingKey::from_point(Point::GENERATOR).unwrap();
        let mut tweak = [0u8; 32];
        tweak[31] = 2;
        let tweaked = g.tweak_mul(&tweak).unwrap();
        assert_eq!(*tweaked.as_point(), Point::GENERATOR.double());
        assert_eq!(tweaked.to_bytes(), tweaked.as_point().to_bytes().unwrap());

        assert_eq!(
            g.tweak_mul(&[0u8; 32]),
            Err(SchnorrError::Arithmetic(ArithmeticError::PointAtInfinity))
        );
        assert!(g.tweak_mul(&[1u8; 31]).is_err());
    }

    #[test]
    fn test_tweak_mul_reduces_tweak() {
        let g = VerifyingKey::from_point(Point::GENERATOR).unwrap();
        let n = hex!("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141");
        let n_plus_two = hex!("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364143");

        let tweaked = g.tweak_mul(&n_plus_two).unwrap();
        assert_eq!(*tweaked.as_point(), Point::GENERATOR.double());
        assert_eq!(
            g.tweak_mul(&n),
            Err(SchnorrError::Arithmetic(ArithmeticError::PointAtInfinity))
        );
    }

    #[test]
    fn test_derived_key_rejects_infinity() {
        assert_eq!(
            VerifyingKey::from_derived(Point::Infinity),
            Err(SchnorrError::Arithmetic(ArithmeticError::PointAtInfinity))
        );
    }

    #[test]
    fn test_cached_verifying_key_matches_scalar() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..8 {
            let sk = SigningKey::random(&mut rng);
            let pk = sk.verifying_key();
            assert_eq!(*pk.as_point(), Point::GENERATOR * *sk.scalar());
            assert_eq!(pk.to_bytes(), pk.as_point().to_bytes().unwrap());
            assert_eq!(SigningKey::from_bytes(&sk.to_bytes()).unwrap().verifying_key(), pk);
        }
    }
}
