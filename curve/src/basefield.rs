use crate::field::{FieldParams, Fp};

/// secp256k1 field modulus: p = 2^256 - 2^32 - 977
pub const FIELD_MODULUS: [u64; 4] = [
    0xfffffffefffffc2f,
    0xffffffffffffffff,
    0xffffffffffffffff,
    0xffffffffffffffff,
];

// (p - 1) / 2, the Euler criterion exponent
const LEGENDRE_EXP: [u64; 4] = [
    0xffffffff7ffffe17,
    0xffffffffffffffff,
    0xffffffffffffffff,
    0x7fffffffffffffff,
];

// (p + 1) / 4; valid because p = 3 mod 4
const SQRT_EXP: [u64; 4] = [
    0xffffffffbfffff0c,
    0xffffffffffffffff,
    0xffffffffffffffff,
    0x3fffffffffffffff,
];

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct BaseParams;

impl FieldParams for BaseParams {
    const NAME: &'static str = "FieldElement";
    const MODULUS: [u64; 4] = FIELD_MODULUS;
    const R: [u64; 4] = [0x00000001000003d1, 0, 0, 0];
    const R2: [u64; 4] = [0x000007a2000e90a1, 0x0000000000000001, 0, 0];
    const INV: u64 = 0xd838091dd2253531;
}

/// Element of the secp256k1 base field.
pub type FieldElement = Fp<BaseParams>;

impl Fp<BaseParams> {
    /// Euler's criterion `self^((p-1)/2)`: one for nonzero squares, `p - 1`
    /// for non-squares, zero for zero.
    pub fn legendre(&self) -> Self {
        self.pow(&LEGENDRE_EXP)
    }

    /// Whether this element has a square root mod p. Zero is not counted as
    /// a residue.
    pub fn is_quadratic_residue(&self) -> bool {
        self.legendre() == Self::ONE
    }

    /// Square root via `self^((p+1)/4)`, if one exists.
    ///
    /// The returned root is itself a quadratic residue.
    pub fn sqrt(&self) -> Option<Self> {
        let root = self.pow(&SQRT_EXP);
        (root.square() == *self).then_some(root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legendre_values() {
        let four = FieldElement::from_u64(4);
        assert!(four.is_quadratic_residue());
        assert_eq!(FieldElement::ZERO.legendre(), FieldElement::ZERO);
        assert!(!FieldElement::ZERO.is_quadratic_residue());

        // p = 3 mod 4, so -1 is a non-residue
        let minus_one = -FieldElement::ONE;
        assert_eq!(minus_one.legendre(), minus_one);
        assert!(!minus_one.is_quadratic_residue());
    }

    #[test]
    fn test_sqrt() {
        let nine = FieldElement::from_u64(9);
        let root = nine.sqrt().unwrap();
        assert_eq!(root.square(), nine);
        assert!(root.is_quadratic_residue());

        assert!((-FieldElement::ONE).sqrt().is_none());
    }

    #[test]
    fn test_sqrt_of_squares() {
        for v in [2u64, 3, 5, 7, 11, 1 << 40] {
            let x = FieldElement::from_u64(v);
            let square = x.square();
            let root = square.sqrt().unwrap();
            assert!(root == x || root == -x);
        }
    }
}
