//! Scalar field of secp256k1: integers modulo the group order
//! n = 0xfffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141.
//!
//! Scalars reuse the Montgomery implementation of the base field with the
//! group order as modulus, so add, multiply, negate and inverse are the field
//! operations taken mod n.

use crate::field::{FieldParams, Fp};
use crate::group::ScalarBits;

/// Group order n.
pub const GROUP_ORDER: [u64; 4] = [
    0xbfd25e8cd0364141,
    0xbaaedce6af48a03b,
    0xfffffffffffffffe,
    0xffffffffffffffff,
];

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ScalarParams;

impl FieldParams for ScalarParams {
    const NAME: &'static str = "Scalar";
    const MODULUS: [u64; 4] = GROUP_ORDER;
    // R = 2^256 mod n
    const R: [u64; 4] = [
        0x402da1732fc9bebf,
        0x4551231950b75fc4,
        0x0000000000000001,
        0x0000000000000000,
    ];
    // R^2 = 2^512 mod n
    const R2: [u64; 4] = [
        0x896cf21467d7d140,
        0x741496c20e7cf878,
        0xe697f5e45bcd07c6,
        0x9d671cd581c69bc5,
    ];
    const INV: u64 = 0x4b0dff665588b13f;
}

/// Integer modulo the group order.
pub type Scalar = Fp<ScalarParams>;

impl ScalarBits for Scalar {
    #[inline]
    fn to_u64_limbs(&self) -> [u64; 4] {
        self.to_canonical_limbs()
    }
}
