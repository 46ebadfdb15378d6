//! Montgomery arithmetic over 256-bit prime moduli.
//!
//! The secp256k1 base field (mod p) and its scalar field (mod n) share this
//! implementation and differ only in their [`FieldParams`]. An element is
//! stored as four little-endian `u64` limbs in Montgomery form, i.e. the value
//! `a * 2^256 mod m`.
//!
//! All operations are variable-time.

use core::fmt::{self, Debug, Display, Formatter};
use core::hash::{Hash, Hasher};
use core::iter::{Product, Sum};
use core::marker::PhantomData;
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use num_bigint::BigUint;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::CurveError;

/// Size of a canonical big-endian field encoding.
pub const FIELD_BYTES: usize = 32;

/// Constants describing a 256-bit prime modulus.
pub trait FieldParams: 'static + Copy + Default + Eq + Send + Sync {
    /// Name used when formatting elements.
    const NAME: &'static str;
    /// The modulus `m`, little-endian limbs.
    const MODULUS: [u64; 4];
    /// `2^256 mod m`
    const R: [u64; 4];
    /// `2^512 mod m`
    const R2: [u64; 4];
    /// `-m^{-1} mod 2^64`
    const INV: u64;
}

/// An element of the prime field described by `P`.
#[derive(Copy, Clone, Default, PartialEq, Eq)]
pub struct Fp<P: FieldParams> {
    limbs: [u64; 4],
    _params: PhantomData<P>,
}

impl<P: FieldParams> Fp<P> {
    pub const ZERO: Self = Self::from_montgomery([0, 0, 0, 0]);

    pub const ONE: Self = Self::from_montgomery(P::R);

    #[inline]
    const fn from_montgomery(limbs: [u64; 4]) -> Self {
        Self {
            limbs,
            _params: PhantomData,
        }
    }

    /// Builds an element from canonical little-endian limbs.
    ///
    /// The caller guarantees `limbs < m`. Usable in `const` context, which is
    /// how the curve constants are built.
    pub const fn from_canonical_limbs(limbs: [u64; 4]) -> Self {
        Self::from_montgomery(montgomery_mul(&limbs, &P::R2, &P::MODULUS, P::INV))
    }

    /// Builds an element from canonical limbs, rejecting values `>= m`.
    pub fn from_limbs(limbs: [u64; 4]) -> Result<Self, CurveError> {
        if geq(&limbs, &P::MODULUS) {
            return Err(CurveError::OutOfRange);
        }
        Ok(Self::from_canonical_limbs(limbs))
    }

    /// Reduces arbitrary 256-bit limbs modulo `m`.
    pub fn from_limbs_reduced(mut limbs: [u64; 4]) -> Self {
        while geq(&limbs, &P::MODULUS) {
            limbs = sub_raw(&limbs, &P::MODULUS);
        }
        Self::from_canonical_limbs(limbs)
    }

    #[inline]
    pub fn from_u64(val: u64) -> Self {
        Self::from_limbs_reduced([val, 0, 0, 0])
    }

    /// Canonical little-endian limbs of this element.
    #[inline]
    pub fn to_canonical_limbs(&self) -> [u64; 4] {
        montgomery_mul(&self.limbs, &[1, 0, 0, 0], &P::MODULUS, P::INV)
    }

    /// Decodes a 32-byte big-endian value, rejecting values `>= m`.
    pub fn from_bytes(bytes: &[u8; FIELD_BYTES]) -> Result<Self, CurveError> {
        Self::from_limbs(limbs_from_be_bytes(bytes))
    }

    /// Decodes a 32-byte big-endian value and reduces it modulo `m`.
    pub fn from_bytes_reduced(bytes: &[u8; FIELD_BYTES]) -> Self {
        Self::from_limbs_reduced(limbs_from_be_bytes(bytes))
    }

    /// Decodes a big-endian value of at most 32 bytes, left-padding shorter
    /// inputs with zeros.
    pub fn from_be_slice(bytes: &[u8]) -> Result<Self, CurveError> {
        if bytes.len() > FIELD_BYTES {
            return Err(CurveError::Overflow(bytes.len()));
        }
        let mut padded = [0u8; FIELD_BYTES];
        padded[FIELD_BYTES - bytes.len()..].copy_from_slice(bytes);
        Self::from_bytes(&padded)
    }

    /// Big-endian, zero-padded 32-byte encoding.
    pub fn to_bytes(&self) -> [u8; FIELD_BYTES] {
        let canonical = self.to_canonical_limbs();
        let mut out = [0u8; FIELD_BYTES];
        for (i, limb) in canonical.iter().enumerate() {
            let end = FIELD_BYTES - 8 * i;
            out[end - 8..end].copy_from_slice(&limb.to_be_bytes());
        }
        out
    }

    /// The modulus as an arbitrary precision integer.
    pub fn modulus() -> BigUint {
        limbs_to_biguint(&P::MODULUS)
    }

    pub fn to_biguint(&self) -> BigUint {
        limbs_to_biguint(&self.to_canonical_limbs())
    }

    /// Converts from an arbitrary precision integer, rejecting values `>= m`.
    pub fn from_biguint(value: &BigUint) -> Result<Self, CurveError> {
        let digits = value.to_u64_digits();
        if digits.len() > 4 {
            return Err(CurveError::OutOfRange);
        }
        let mut limbs = [0u64; 4];
        limbs[..digits.len()].copy_from_slice(&digits);
        Self::from_limbs(limbs)
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.limbs == [0, 0, 0, 0]
    }

    /// Parity of the canonical representative.
    #[inline]
    pub fn is_odd(&self) -> bool {
        self.to_canonical_limbs()[0] & 1 == 1
    }

    #[inline]
    pub fn square(&self) -> Self {
        *self * *self
    }

    #[inline]
    pub fn double(&self) -> Self {
        *self + *self
    }

    /// Square-and-multiply exponentiation by a 256-bit exponent.
    pub fn pow(&self, exp: &[u64; 4]) -> Self {
        let mut result = Self::ONE;
        let mut base = *self;

        for &limb in exp.iter() {
            let mut remaining = limb;
            for _ in 0..64 {
                if remaining & 1 == 1 {
                    result *= base;
                }
                base = base.square();
                remaining >>= 1;
            }
        }

        result
    }

    /// Modular inverse by the extended Euclidean algorithm.
    ///
    /// Returns `None` when `gcd(self, m) != 1`, which for a prime modulus
    /// means `self == 0`.
    pub fn try_inverse(&self) -> Option<Self> {
        if self.is_zero() {
            return None;
        }
        let inverse = self.to_biguint().modinv(&Self::modulus())?;
        Self::from_biguint(&inverse).ok()
    }

    /// Modular inverse, failing with [`CurveError::NotInvertible`].
    pub fn inverse(&self) -> Result<Self, CurveError> {
        self.try_inverse().ok_or(CurveError::NotInvertible)
    }
}

#[inline]
fn limbs_from_be_bytes(bytes: &[u8; FIELD_BYTES]) -> [u64; 4] {
    let mut limbs = [0u64; 4];
    for (i, limb) in limbs.iter_mut().enumerate() {
        let end = FIELD_BYTES - 8 * i;
        let mut word = [0u8; 8];
        word.copy_from_slice(&bytes[end - 8..end]);
        *limb = u64::from_be_bytes(word);
    }
    limbs
}

fn limbs_to_biguint(limbs: &[u64; 4]) -> BigUint {
    let mut bytes = Vec::with_capacity(FIELD_BYTES);
    for &limb in limbs {
        bytes.extend_from_slice(&limb.to_le_bytes());
    }
    BigUint::from_bytes_le(&bytes)
}

/// Helper: Carrying addition
#[inline]
const fn carrying_add(a: u64, b: u64, carry: bool) -> (u64, bool) {
    let (sum, overflow1) = a.overflowing_add(b);
    let (sum, overflow2) = sum.overflowing_add(carry as u64);
    (sum, overflow1 || overflow2)
}

/// Helper: Borrowing subtraction
#[inline]
const fn borrowing_sub(a: u64, b: u64, borrow: bool) -> (u64, bool) {
    let (diff, overflow1) = a.overflowing_sub(b);
    let (diff, overflow2) = diff.overflowing_sub(borrow as u64);
    (diff, overflow1 || overflow2)
}

/// `a >= b` on little-endian limbs.
#[inline]
const fn geq(a: &[u64; 4], b: &[u64; 4]) -> bool {
    let (_, borrow) = a[0].overflowing_sub(b[0]);
    let (_, borrow) = borrowing_sub(a[1], b[1], borrow);
    let (_, borrow) = borrowing_sub(a[2], b[2], borrow);
    let (_, borrow) = borrowing_sub(a[3], b[3], borrow);
    !borrow
}

/// `a - b mod 2^256`
#[inline]
const fn sub_raw(a: &[u64; 4], b: &[u64; 4]) -> [u64; 4] {
    let (r0, borrow) = a[0].overflowing_sub(b[0]);
    let (r1, borrow) = borrowing_sub(a[1], b[1], borrow);
    let (r2, borrow) = borrowing_sub(a[2], b[2], borrow);
    let (r3, _) = borrowing_sub(a[3], b[3], borrow);
    [r0, r1, r2, r3]
}

/// Helper: Add two 256-bit numbers mod m
#[inline]
const fn add_mod(a: &[u64; 4], b: &[u64; 4], m: &[u64; 4]) -> [u64; 4] {
    let (r0, carry) = a[0].overflowing_add(b[0]);
    let (r1, carry) = carrying_add(a[1], b[1], carry);
    let (r2, carry) = carrying_add(a[2], b[2], carry);
    let (r3, carry) = carrying_add(a[3], b[3], carry);
    let sum = [r0, r1, r2, r3];

    // The sum may exceed 2^256 when m is close to it.
    if carry || geq(&sum, m) {
        sub_raw(&sum, m)
    } else {
        sum
    }
}

/// Helper: Subtract two 256-bit numbers mod m
#[inline]
const fn sub_mod(a: &[u64; 4], b: &[u64; 4], m: &[u64; 4]) -> [u64; 4] {
    let (r0, borrow) = a[0].overflowing_sub(b[0]);
    let (r1, borrow) = borrowing_sub(a[1], b[1], borrow);
    let (r2, borrow) = borrowing_sub(a[2], b[2], borrow);
    let (r3, borrow) = borrowing_sub(a[3], b[3], borrow);

    if borrow {
        let (r0, carry) = r0.overflowing_add(m[0]);
        let (r1, carry) = carrying_add(r1, m[1], carry);
        let (r2, carry) = carrying_add(r2, m[2], carry);
        let (r3, _) = carrying_add(r3, m[3], carry);
        [r0, r1, r2, r3]
    } else {
        [r0, r1, r2, r3]
    }
}

/// Helper: Negate a 256-bit number mod m
#[inline]
const fn neg_mod(a: &[u64; 4], m: &[u64; 4]) -> [u64; 4] {
    if a[0] == 0 && a[1] == 0 && a[2] == 0 && a[3] == 0 {
        return [0, 0, 0, 0];
    }
    sub_raw(m, a)
}

/// Montgomery multiplication (CIOS): `a * b * 2^{-256} mod m`.
///
/// Keeps a sixth accumulator limb because intermediate values reach `2m`,
/// which overflows 256 bits for moduli close to `2^256`.
const fn montgomery_mul(a: &[u64; 4], b: &[u64; 4], m: &[u64; 4], inv: u64) -> [u64; 4] {
    let mut t = [0u64; 6];
    let mut i = 0;
    while i < 4 {
        // t += a[i] * b
        let mut carry = 0u128;
        let mut j = 0;
        while j < 4 {
            let product = (a[i] as u128) * (b[j] as u128) + (t[j] as u128) + carry;
            t[j] = product as u64;
            carry = product >> 64;
            j += 1;
        }
        let sum = (t[4] as u128) + carry;
        t[4] = sum as u64;
        t[5] = (sum >> 64) as u64;

        // t = (t + k * m) / 2^64
        let k = t[0].wrapping_mul(inv);
        let product = (k as u128) * (m[0] as u128) + (t[0] as u128);
        let mut carry = product >> 64;
        let mut j = 1;
        while j < 4 {
            let product = (k as u128) * (m[j] as u128) + (t[j] as u128) + carry;
            t[j - 1] = product as u64;
            carry = product >> 64;
            j += 1;
        }
        let sum = (t[4] as u128) + carry;
        t[3] = sum as u64;
        t[4] = t[5] + ((sum >> 64) as u64);
        i += 1;
    }

    let result = [t[0], t[1], t[2], t[3]];
    if t[4] != 0 || geq(&result, m) {
        sub_raw(&result, m)
    } else {
        result
    }
}

// Arithmetic operations
impl<P: FieldParams> Add for Fp<P> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::from_montgomery(add_mod(&self.limbs, &rhs.limbs, &P::MODULUS))
    }
}

impl<P: FieldParams> AddAssign for Fp<P> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<P: FieldParams> Sub for Fp<P> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::from_montgomery(sub_mod(&self.limbs, &rhs.limbs, &P::MODULUS))
    }
}

impl<P: FieldParams> SubAssign for Fp<P> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<P: FieldParams> Neg for Fp<P> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::from_montgomery(neg_mod(&self.limbs, &P::MODULUS))
    }
}

impl<P: FieldParams> Mul for Fp<P> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self::from_montgomery(montgomery_mul(
            &self.limbs,
            &rhs.limbs,
            &P::MODULUS,
            P::INV,
        ))
    }
}

impl<P: FieldParams> MulAssign for Fp<P> {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl<P: FieldParams> Sum for Fp<P> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, x| acc + x)
    }
}

impl<P: FieldParams> Product for Fp<P> {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ONE, |acc, x| acc * x)
    }
}

// Display and Debug
impl<P: FieldParams> Display for Fp<P> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let canonical = self.to_canonical_limbs();
        write!(
            f,
            "0x{:016x}{:016x}{:016x}{:016x}",
            canonical[3], canonical[2], canonical[1], canonical[0]
        )
    }
}

impl<P: FieldParams> Debug for Fp<P> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", P::NAME, self)
    }
}

impl<P: FieldParams> Hash for Fp<P> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.limbs.hash(state);
    }
}

impl<P: FieldParams> Serialize for Fp<P> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_bytes().serialize(serializer)
    }
}

impl<'de, P: FieldParams> Deserialize<'de> for Fp<P> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bytes = <[u8; FIELD_BYTES]>::deserialize(deserializer)?;
        Self::from_bytes(&bytes).map_err(serde::de::Error::custom)
    }
}
