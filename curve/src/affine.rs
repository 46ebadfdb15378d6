// secp256k1: y^2 = x^3 + 7 over GF(p), p = 2^256 - 2^32 - 977
// Generator G (SEC 2):
//   x = 0x79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798
//   y = 0x483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8
// Group order n = 0xfffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141
// Cofactor: 1

use crate::basefield::FieldElement;
use crate::errors::CurveError;
use crate::field::FIELD_BYTES;
use crate::group::{double_and_add, ScalarBits};
use crate::projective::Projective;
use crate::{double_scalar_mul_basepoint, Group, Scalar};
use core::iter::Sum;
use core::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

/// Length of a compressed point encoding.
pub const COMPRESSED_BYTES: usize = FIELD_BYTES + 1;

const GX: [u64; 4] = [
    0x59f2815b16f81798,
    0x029bfcdb2dce28d9,
    0x55a06295ce870b07,
    0x79be667ef9dcbbac,
];

const GY: [u64; 4] = [
    0x9c47d08ffb10d4b8,
    0xfd17b448a6855419,
    0x5da4fbfc0e1108a8,
    0x483ada7726a3c465,
];

// Curve coefficient b; a is zero.
pub(crate) const CURVE_B: FieldElement = FieldElement::from_canonical_limbs([7, 0, 0, 0]);

/// Affine point on secp256k1, or the point at infinity.
///
/// A finite point always satisfies the curve equation. Values built through
/// [`Point::new`] or [`Point::from_bytes`] are checked, and the group
/// operations preserve the property.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Point {
    /// The identity element.
    #[default]
    Infinity,
    Affine { x: FieldElement, y: FieldElement },
}

impl Point {
    /// The standard base point G.
    pub const GENERATOR: Self = Point::Affine {
        x: FieldElement::from_canonical_limbs(GX),
        y: FieldElement::from_canonical_limbs(GY),
    };

    /// Create a finite point, checking the curve equation.
    pub fn new(x: FieldElement, y: FieldElement) -> Result<Self, CurveError> {
        let point = Point::Affine { x, y };
        if !point.is_on_curve() {
            return Err(CurveError::NotOnCurve);
        }
        Ok(point)
    }

    #[inline]
    pub fn is_infinity(&self) -> bool {
        matches!(self, Point::Infinity)
    }

    #[inline]
    pub fn x(&self) -> Option<FieldElement> {
        self.coordinates().map(|(x, _)| x)
    }

    #[inline]
    pub fn y(&self) -> Option<FieldElement> {
        self.coordinates().map(|(_, y)| y)
    }

    #[inline]
    pub fn coordinates(&self) -> Option<(FieldElement, FieldElement)> {
        match *self {
            Point::Infinity => None,
            Point::Affine { x, y } => Some((x, y)),
        }
    }

    /// Check if a point is on the curve: y^2 = x^3 + 7.
    pub fn is_on_curve(&self) -> bool {
        match *self {
            Point::Infinity => true,
            Point::Affine { x, y } => y.square() == curve_rhs(&x),
        }
    }

    /// The point with the given x-coordinate whose y is the principal square
    /// root, i.e. a quadratic residue.
    pub fn lift_x(x: &FieldElement) -> Result<Self, CurveError> {
        let y = curve_rhs(x).sqrt().ok_or(CurveError::NotOnCurve)?;
        Ok(Point::Affine { x: *x, y })
    }

    /// True for a finite point whose y-coordinate is a quadratic residue.
    ///
    /// This is the normalization rule for nonce points: a signature's R must
    /// satisfy it.
    pub fn has_square_y(&self) -> bool {
        match self {
            Point::Infinity => false,
            Point::Affine { y, .. } => y.is_quadratic_residue(),
        }
    }

    /// Point doubling: 2*P.
    pub fn double(&self) -> Self {
        let Point::Affine { x, y } = *self else {
            return Point::Infinity;
        };

        // 2y = 0 only for points of order two, of which secp256k1 has none
        let Some(denominator) = y.double().try_inverse() else {
            return Point::Infinity;
        };

        // λ = 3x^2 / 2y
        let x2 = x.square();
        let lambda = (x2.double() + x2) * denominator;

        let x_r = lambda.square() - x.double();
        let y_r = lambda * (x - x_r) - y;

        Point::Affine { x: x_r, y: y_r }
    }

    /// Negate a point.
    pub fn negate(&self) -> Self {
        match *self {
            Point::Infinity => Point::Infinity,
            Point::Affine { x, y } => Point::Affine { x, y: -y },
        }
    }

    /// Double-and-add using only affine additions, one inversion per step.
    ///
    /// Kept as the reference path; [`Group::scalar_mul`] runs in Jacobian
    /// coordinates instead.
    pub fn scalar_mul_affine(&self, scalar: &Scalar) -> Self {
        double_and_add(self, &scalar.to_u64_limbs())
    }

    /// Compute a * G + b * P, where G is the fixed generator.
    pub fn double_scalar_mul_basepoint(a: &Scalar, b: &Scalar, point: &Self) -> Self {
        double_scalar_mul_basepoint(a, b, point)
    }

    /// Compressed encoding: parity prefix (0x02 even, 0x03 odd) then the
    /// big-endian x-coordinate.
    pub fn to_bytes(&self) -> Result<[u8; COMPRESSED_BYTES], CurveError> {
        let Point::Affine { x, y } = self else {
            return Err(CurveError::Infinity);
        };
        let mut out = [0u8; COMPRESSED_BYTES];
        out[0] = if y.is_odd() { 0x03 } else { 0x02 };
        out[1..].copy_from_slice(&x.to_bytes());
        Ok(out)
    }

    /// Decode a compressed point, recovering y from the curve equation.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CurveError> {
        if bytes.len() != COMPRESSED_BYTES {
            return Err(CurveError::InvalidLength {
                expected: COMPRESSED_BYTES,
                actual: bytes.len(),
            });
        }
        let odd = match bytes[0] {
            0x02 => false,
            0x03 => true,
            prefix => return Err(CurveError::InvalidPrefix(prefix)),
        };

        let mut x_bytes = [0u8; FIELD_BYTES];
        x_bytes.copy_from_slice(&bytes[1..]);
        let x = FieldElement::from_bytes(&x_bytes)?;

        let Point::Affine { x, y } = Self::lift_x(&x)? else {
            return Err(CurveError::NotOnCurve);
        };
        let y = if y.is_odd() == odd { y } else { -y };
        Ok(Point::Affine { x, y })
    }
}

#[inline]
fn curve_rhs(x: &FieldElement) -> FieldElement {
    x.square() * *x + CURVE_B
}

impl Group for Point {
    type Scalar = Scalar;

    #[inline]
    fn identity() -> Self {
        Point::Infinity
    }

    #[inline]
    fn is_identity(&self) -> bool {
        self.is_infinity()
    }

    #[inline]
    fn generator() -> Self {
        Self::GENERATOR
    }

    #[inline]
    fn double(&self) -> Self {
        Self::double(self)
    }

    #[inline]
    fn negate(&self) -> Self {
        Self::negate(self)
    }

    fn scalar_mul(&self, scalar: &Scalar) -> Self {
        Projective::from(self).scalar_mul(scalar).to_affine()
    }

    fn mul_limbs(&self, limbs: &[u64; 4]) -> Self {
        Projective::from(self).mul_limbs(limbs).to_affine()
    }

    fn multi_scalar_mul(points: &[Self], scalars: &[Scalar]) -> Self {
        let points: Vec<Projective> = points.iter().map(Projective::from).collect();
        Projective::multi_scalar_mul(&points, scalars).to_affine()
    }
}

// Implement addition for affine points
impl Add for Point {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        let (x1, y1, x2, y2) = match (self, other) {
            (Point::Infinity, p) | (p, Point::Infinity) => return p,
            (Point::Affine { x: x1, y: y1 }, Point::Affine { x: x2, y: y2 }) => (x1, y1, x2, y2),
        };

        if x1 == x2 {
            if y1 == y2 {
                return self.double();
            }
            return Point::Infinity;
        }

        // λ = (y2 - y1) / (x2 - x1)
        let Some(denominator) = (x2 - x1).try_inverse() else {
            return Point::Infinity;
        };
        let lambda = (y2 - y1) * denominator;

        let x_r = lambda.square() - x1 - x2;
        let y_r = lambda * (x1 - x_r) - y1;

        Point::Affine { x: x_r, y: y_r }
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

#[allow(clippy::suspicious_arithmetic_impl)]
impl Sub for Point {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        self + other.negate()
    }
}

impl SubAssign for Point {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl Neg for Point {
    type Output = Self;

    fn neg(self) -> Self {
        self.negate()
    }
}

impl Sum for Point {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.map(Projective::from).sum::<Projective>().to_affine()
    }
}

impl<'a> Sum<&'a Point> for Point {
    fn sum<I: Iterator<Item = &'a Point>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// Scalar multiplication
impl Mul<Scalar> for Point {
    type Output = Self;

    fn mul(self, scalar: Scalar) -> Self {
        <Self as Group>::scalar_mul(&self, &scalar)
    }
}

impl Mul<&Scalar> for Point {
    type Output = Self;

    fn mul(self, scalar: &Scalar) -> Self {
        <Self as Group>::scalar_mul(&self, scalar)
    }
}

impl Mul<Point> for Scalar {
    type Output = Point;

    fn mul(self, point: Point) -> Point {
        <Point as Group>::scalar_mul(&point, &self)
    }
}

impl Mul<&Point> for Scalar {
    type Output = Point;

    fn mul(self, point: &Point) -> Point {
        <Point as Group>::scalar_mul(point, &self)
    }
}
