use super::HasherExtensions;
use crate::block::BlockHeader;
use allium_hashes::{DoubleSha256, Hash, Hasher};

/// Returns the header hash: double SHA-256 over the 80-byte little-endian
/// header serialization.
pub fn hash(header: &BlockHeader) -> Hash {
    let mut hasher = DoubleSha256::new();
    hasher
        .write_i32(header.version)
        .update(header.hash_prev_block)
        .update(header.hash_merkle_root)
        .write_u32(header.time)
        .write_u32(header.bits)
        .write_u32(header.nonce);
    hasher.finalize()
}
