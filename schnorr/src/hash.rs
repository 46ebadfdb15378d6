//! SHA-256 and HMAC-SHA-256 over concatenated byte strings.

use hmac::digest::generic_array::GenericArray;
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

type HmacSha256 = Hmac<Sha256>;

/// Digest size in bytes.
pub const DIGEST_SIZE: usize = 32;

/// SHA-256 block size in bytes.
const BLOCK_SIZE: usize = 64;

/// SHA-256 of the concatenation of `parts`.
pub fn hash(parts: &[&[u8]]) -> [u8; DIGEST_SIZE] {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

/// HMAC-SHA-256 keyed by `key` over the concatenation of `parts`.
///
/// Any key length is accepted: keys longer than a block are hashed first and
/// shorter ones are zero-padded, as RFC 2104 prescribes.
pub fn hmac(key: &[u8], parts: &[&[u8]]) -> [u8; DIGEST_SIZE] {
    let mut mac = <HmacSha256 as Mac>::new(GenericArray::from_slice(&key_block(key)));
    for part in parts {
        mac.update(part);
    }
    mac.finalize().into_bytes().into()
}

fn key_block(key: &[u8]) -> [u8; BLOCK_SIZE] {
    let mut block = [0u8; BLOCK_SIZE];
    if key.len() > BLOCK_SIZE {
        block[..DIGEST_SIZE].copy_from_slice(&Sha256::digest(key));
    } else {
        block[..key.len()].copy_from_slice(key);
    }
    block
}
