//! Byte layouts of the proof-of-stake hashes. All fields are little-endian
//! and concatenated without delimiters; the outputs are compared as
//! little-endian 256-bit integers.

use super::HasherExtensions;
use allium_hashes::{DoubleSha256, Hash, Hasher};

/// Hash by which a candidate block competes during stake modifier selection:
/// its proof hash combined with the previous modifier, so a block owner cannot
/// know at block creation time whether the block will be selected.
pub fn selection_hash(proof: Hash, prev_modifier: u64) -> Hash {
    let mut hasher = DoubleSha256::new();
    hasher.update(proof).write_u64(prev_modifier);
    hasher.finalize()
}

/// The kernel proof hash.
///
/// The hashed fields pin the staked output in historical time (origin block
/// and transaction timestamps), disambiguate outputs maturing at the same
/// second (`tx_prev_offset`, `prevout_index`) and scramble the future through
/// the stake modifier. Block and transaction hashes are deliberately excluded:
/// they can be reground in vast quantities, which would degrade the protocol
/// back into proof-of-work.
pub fn kernel_hash(
    stake_modifier: u64,
    time_block_from: u32,
    tx_prev_offset: u32,
    time_tx_prev: u32,
    prevout_index: u32,
    time_tx: u32,
) -> Hash {
    let mut hasher = DoubleSha256::new();
    hasher
        .write_u64(stake_modifier)
        .write_u32(time_block_from)
        .write_u32(tx_prev_offset)
        .write_u32(time_tx_prev)
        .write_u32(prevout_index)
        .write_u32(time_tx);
    hasher.finalize()
}

/// Input of the chained stake modifier checksum. The genesis block has no
/// predecessor term.
pub fn modifier_checksum_hash(prev_checksum: Option<u32>, flags: u32, hash_proof_of_stake: Hash, stake_modifier: u64) -> Hash {
    let mut hasher = DoubleSha256::new();
    if let Some(prev) = prev_checksum {
        hasher.write_u32(prev);
    }
    hasher.write_u32(flags).update(hash_proof_of_stake).write_u64(stake_modifier);
    hasher.finalize()
}
