use rand::distr::{Distribution, StandardUniform};
use rand::Rng;

use crate::field::{FieldParams, Fp, FIELD_BYTES};

/// Helper trait for sampling random field elements.
pub trait RandomField: Sized {
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self;

    /// Samples until a nonzero element is drawn.
    fn random_nonzero<R: Rng + ?Sized>(rng: &mut R) -> Self;
}

impl<P: FieldParams> RandomField for Fp<P> {
    #[inline]
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        StandardUniform.sample(rng)
    }

    fn random_nonzero<R: Rng + ?Sized>(rng: &mut R) -> Self {
        loop {
            let candidate = Self::random(rng);
            if !candidate.is_zero() {
                return candidate;
            }
        }
    }
}

impl<P: FieldParams> Distribution<Fp<P>> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Fp<P> {
        // Rejection sampling keeps the distribution uniform below the modulus.
        loop {
            let bytes: [u8; FIELD_BYTES] = rng.random();
            if let Ok(element) = Fp::from_bytes(&bytes) {
                return element;
            }
        }
    }
}
