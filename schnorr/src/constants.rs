//! Constants used in the Schnorr signature scheme implementation.

/// Size of a serialized public verifying key in bytes.
///
/// A verifying key is a compressed secp256k1 point: one parity byte followed
/// by the 32-byte x-coordinate.
pub const PK_SIZE: usize = 33;

/// Size of a serialized secret signing key in bytes.
pub const SK_SIZE: usize = 32;

/// Size of a serialized signature in bytes.
///
/// A signature consists of:
/// - r, the x-coordinate of the nonce point (32 bytes)
/// - a scalar s (32 bytes)
pub const SIG_SIZE: usize = 64;

/// Messages are pre-hashed by the caller and always 32 bytes long.
pub const MESSAGE_SIZE: usize = 32;

/// Upper bound on the beta search when blinding a message.
///
/// The retry counter is hashed as a single byte, so every value of a `u8`
/// is tried once.
pub const MAX_BLIND_ATTEMPTS: usize = u8::MAX as usize + 1;

/// Domain tag hashed into every MuSig coefficient.
pub(crate) const MUSIG_TAG: &[u8] = b"MuSig coefficient";

/// HMAC keys deriving the blinding factors.
pub(crate) const ALPHA_TAG: &[u8] = b"alpha";
pub(crate) const BETA_TAG: &[u8] = b"beta";
