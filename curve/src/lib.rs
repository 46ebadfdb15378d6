//! Field, scalar and group arithmetic for secp256k1.
//!
//! This crate provides the base field and scalar field (both Montgomery form
//! over four 64-bit limbs), affine points with an explicit point at infinity,
//! Jacobian points for fast scalar multiplication, and the compressed point
//! encoding. The curve parameters are compile-time constants.
//!
//! Nothing here is constant-time.

mod affine;
mod basefield;
mod errors;
mod field;
mod group;
mod msm;
mod projective;
mod random;
mod scalarfield;

pub use affine::{Point, COMPRESSED_BYTES};
pub use basefield::{BaseParams, FieldElement, FIELD_MODULUS};
pub use errors::CurveError;
pub use field::{FieldParams, Fp, FIELD_BYTES};
pub use group::{Group, ScalarBits};
pub use msm::double_scalar_mul_basepoint;
pub use projective::Projective;
pub use random::RandomField;
pub use scalarfield::{Scalar, ScalarParams, GROUP_ORDER};
