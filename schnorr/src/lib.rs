//! Schnorr signatures over secp256k1.
//!
//! This library implements:
//! - deterministic single-signer signing and verification
//! - randomized batch verification
//! - a blind signature protocol (blind, sign, unblind)
//! - non-interactive MuSig key aggregation and co-signing
//!
//! Nonces are derived as `H(sk || msg)` and normalized so that the nonce
//! point R has a quadratic-residue y-coordinate; a signature carries only
//! `R.x`. Challenges are `H(R.x || compressed pk || msg)`. Messages are
//! 32-byte digests computed by the caller.
//!
//! # Example
//!
//! ```
//! use secp_schnorr::{SigningKey, VerifyingKey, Signature};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! // Generate a random signing key
//! let mut rng = StdRng::seed_from_u64(42);
//! let signing_key = SigningKey::random(&mut rng);
//!
//! // Derive the corresponding verifying key
//! let verifying_key: VerifyingKey = signing_key.verifying_key();
//!
//! // Sign a 32-byte message digest
//! let message = [7u8; 32];
//! let signature = signing_key.sign(&message).expect("signing failed");
//!
//! // Verify the signature
//! let is_valid = verifying_key.verify(&message, &signature).expect("verification failed");
//! assert!(is_valid);
//!
//! // Signatures travel as 64 bytes
//! let decoded = Signature::from_bytes(&signature.to_bytes()).unwrap();
//! assert_eq!(decoded, signature);
//! ```
//!
//! # Security Considerations
//!
//! - Arithmetic is variable-time and leaks timing information about secrets
//! - A blind-signing nonce must never be reused
//! - Batch verification needs a cryptographically secure random source

mod batch;
mod blind;
mod constants;
mod errors;
pub mod hash;
mod keys;
pub mod musig;
mod signatures;
pub mod validate;


pub use batch::batch_verify;
pub use blind::{BlindedMessage, BlindedSignature, Unblinder, blind_message, blind_sign, unblind};
pub use constants::{MAX_BLIND_ATTEMPTS, MESSAGE_SIZE, PK_SIZE, SIG_SIZE, SK_SIZE};
pub use errors::{ArithmeticError, ErrorCategory, SchnorrError, ValidationError};
pub use keys::{SigningKey, VerifyingKey};
pub use musig::KeyAggregate;
pub use secp_curve::{FieldElement, Point, Scalar};
pub use signatures::Signature;
