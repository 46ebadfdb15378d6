use crate::affine::{Point, CURVE_B};
use crate::basefield::FieldElement;
use crate::{Group, Scalar};
use core::iter::Sum;
use core::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

/// Point in Jacobian coordinates (X:Y:Z) where (x,y) = (X/Z^2, Y/Z^3).
/// The point at infinity is any triple with Z = 0.
///
/// Addition and doubling use only field multiplications; converting back to
/// affine costs a single inversion.
#[derive(Copy, Clone, Debug)]
pub struct Projective {
    pub x: FieldElement,
    pub y: FieldElement,
    pub z: FieldElement,
}

impl Projective {
    /// The point at infinity (identity element): (1:1:0)
    pub const INFINITY: Self = Projective {
        x: FieldElement::ONE,
        y: FieldElement::ONE,
        z: FieldElement::ZERO,
    };

    /// Create a new projective point.
    pub fn new(x: FieldElement, y: FieldElement, z: FieldElement) -> Self {
        Projective { x, y, z }
    }

    /// Check if this point is the point at infinity.
    #[inline]
    pub fn is_infinity(&self) -> bool {
        self.z.is_zero()
    }

    /// Convert to affine coordinates.
    pub fn to_affine(&self) -> Point {
        let Some(z_inv) = self.z.try_inverse() else {
            return Point::Infinity;
        };
        let z_inv2 = z_inv.square();

        Point::Affine {
            x: self.x * z_inv2,
            y: self.y * z_inv2 * z_inv,
        }
    }

    /// Convert from affine coordinates.
    pub fn from_affine(point: &Point) -> Self {
        match *point {
            Point::Infinity => Self::INFINITY,
            Point::Affine { x, y } => Projective::new(x, y, FieldElement::ONE),
        }
    }

    /// Check if a point is on the curve: Y^2 = X^3 + 7*Z^6.
    pub fn is_on_curve(&self) -> bool {
        if self.is_infinity() {
            return true;
        }

        let z2 = self.z.square();
        let z6 = z2.square() * z2;
        self.y.square() == self.x.square() * self.x + CURVE_B * z6
    }

    pub fn generator() -> Self {
        Self::from_affine(&Point::GENERATOR)
    }

    /// Point doubling: 2*P (dbl-2009-l, a = 0).
    pub fn double(&self) -> Self {
        if self.is_infinity() || self.y.is_zero() {
            return Self::INFINITY;
        }

        let y2 = self.y.square();
        // S = 4*X*Y^2
        let s = (self.x * y2).double().double();
        // M = 3*X^2
        let x2 = self.x.square();
        let m = x2.double() + x2;

        let x3 = m.square() - s.double();
        // 8*Y^4
        let y4_8 = y2.square().double().double().double();
        let y3 = m * (s - x3) - y4_8;
        let z3 = (self.y * self.z).double();

        Projective::new(x3, y3, z3)
    }

    /// Negate a point.
    pub fn negate(&self) -> Self {
        if self.is_infinity() {
            return *self;
        }
        Projective::new(self.x, -self.y, self.z)
    }
}

impl Group for Projective {
    type Scalar = Scalar;

    #[inline]
    fn identity() -> Self {
        Self::INFINITY
    }

    #[inline]
    fn is_identity(&self) -> bool {
        self.is_infinity()
    }

    #[inline]
    fn generator() -> Self {
        Projective::generator()
    }

    #[inline]
    fn double(&self) -> Self {
        Self::double(self)
    }

    #[inline]
    fn negate(&self) -> Self {
        Self::negate(self)
    }
}

// Equality of the represented affine points
impl PartialEq for Projective {
    fn eq(&self, other: &Self) -> bool {
        match (self.is_infinity(), other.is_infinity()) {
            (true, true) => return true,
            (true, false) | (false, true) => return false,
            (false, false) => {}
        }

        let z1_2 = self.z.square();
        let z2_2 = other.z.square();
        if self.x * z2_2 != other.x * z1_2 {
            return false;
        }
        self.y * z2_2 * other.z == other.y * z1_2 * self.z
    }
}

impl Eq for Projective {}

// add-2007-bl without the Z1 = Z2 shortcut
impl Add for Projective {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        // Handle infinity cases
        if self.is_infinity() {
            return other;
        }
        if other.is_infinity() {
            return self;
        }

        let z1_2 = self.z.square();
        let z2_2 = other.z.square();
        let u1 = self.x * z2_2;
        let u2 = other.x * z1_2;
        let s1 = self.y * z2_2 * other.z;
        let s2 = other.y * z1_2 * self.z;

        if u1 == u2 {
            if s1 == s2 {
                return self.double();
            }
            return Self::INFINITY;
        }

        let h = u2 - u1;
        let r = s2 - s1;
        let h2 = h.square();
        let h3 = h2 * h;
        let u1h2 = u1 * h2;

        let x3 = r.square() - h3 - u1h2.double();
        let y3 = r * (u1h2 - x3) - s1 * h3;
        let z3 = h * self.z * other.z;

        Projective::new(x3, y3, z3)
    }
}

impl AddAssign for Projective {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

#[allow(clippy::suspicious_arithmetic_impl)]
impl Sub for Projective {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        self + other.negate()
    }
}

impl SubAssign for Projective {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl Neg for Projective {
    type Output = Self;

    fn neg(self) -> Self {
        self.negate()
    }
}

impl Sum for Projective {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::INFINITY, |acc, p| acc + p)
    }
}

// Scalar multiplication
impl Mul<Scalar> for Projective {
    type Output = Self;

    fn mul(self, scalar: Scalar) -> Self {
        <Self as Group>::scalar_mul(&self, &scalar)
    }
}

impl Mul<&Scalar> for Projective {
    type Output = Self;

    fn mul(self, scalar: &Scalar) -> Self {
        <Self as Group>::scalar_mul(&self, scalar)
    }
}

impl Mul<Projective> for Scalar {
    type Output = Projective;

    fn mul(self, point: Projective) -> Projective {
        <Projective as Group>::scalar_mul(&point, &self)
    }
}

// Conversions
impl From<Point> for Projective {
    fn from(point: Point) -> Self {
        Projective::from_affine(&point)
    }
}

impl From<&Point> for Projective {
    fn from(point: &Point) -> Self {
        Projective::from_affine(point)
    }
}

impl From<Projective> for Point {
    fn from(point: Projective) -> Self {
        point.to_affine()
    }
}

impl From<&Projective> for Point {
    fn from(point: &Projective) -> Self {
        point.to_affine()
    }
}
