use core::ops::{Add, AddAssign, Neg, Sub, SubAssign};

pub trait ScalarBits {
    /// Canonical little-endian limbs.
    fn to_u64_limbs(&self) -> [u64; 4];
}

pub trait Group:
    Sized + Copy + Add<Output = Self> + AddAssign + Sub<Output = Self> + SubAssign + Neg<Output = Self>
{
    type Scalar: ScalarBits;

    fn identity() -> Self;
    fn is_identity(&self) -> bool;
    fn generator() -> Self;
    fn double(&self) -> Self;
    fn negate(&self) -> Self;

    #[inline]
    fn mul_generator(scalar: &Self::Scalar) -> Self {
        Self::generator().scalar_mul(scalar)
    }

    #[inline]
    fn scalar_mul(&self, scalar: &Self::Scalar) -> Self {
        double_and_add(self, &scalar.to_u64_limbs())
    }

    /// Multiplies by an unreduced 256-bit integer.
    #[inline]
    fn mul_limbs(&self, limbs: &[u64; 4]) -> Self {
        double_and_add(self, limbs)
    }

    fn mul_u64(&self, n: u64) -> Self {
        if n == 0 {
            return Self::identity();
        }
        if n == 1 {
            return *self;
        }
        self.mul_limbs(&[n, 0, 0, 0])
    }

    fn multi_scalar_mul(points: &[Self], scalars: &[Self::Scalar]) -> Self {
        assert_eq!(
            points.len(),
            scalars.len(),
            "Points and scalars must have same length"
        );

        let mut result = Self::identity();
        for (point, scalar) in points.iter().zip(scalars.iter()) {
            result += point.scalar_mul(scalar);
        }
        result
    }
}

/// Right-to-left double-and-add over little-endian limbs.
pub(crate) fn double_and_add<G: Group>(point: &G, limbs: &[u64; 4]) -> G {
    let mut result = G::identity();
    let mut temp = *point;

    for &limb in limbs.iter() {
        let mut bits = limb;
        for _ in 0..64 {
            if bits & 1 == 1 {
                result += temp;
            }
            temp = temp.double();
            bits >>= 1;
        }
    }

    result
}
