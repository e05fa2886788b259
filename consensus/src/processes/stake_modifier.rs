use crate::{
    errors::{RuleError, RuleResult},
    model::stores::block_index::{BlockIndexNode, BlockIndexStore, BlockIndexStoreReader},
};
use allium_consensus_core::{config::params::Params, hashing};
use allium_hashes::Hash;
use allium_math::Uint256;
use log::debug;
use std::{collections::HashSet, sync::Arc};

/// Length in seconds of selection round `section`. Earlier rounds get shorter
/// windows, later rounds longer; the asymmetry prevents shifting a block
/// between rounds by nudging its timestamp.
pub fn stake_modifier_selection_interval_section(params: &Params, section: usize) -> i64 {
    debug_assert!(section < 64, "selection section out of range");
    params.modifier_interval * 63 / (63 + (63 - section as i64) * (params.modifier_interval_ratio - 1))
}

/// Total time window (in seconds) from which modifier contributors are drawn
pub fn stake_modifier_selection_interval(params: &Params) -> i64 {
    (0..64).map(|section| stake_modifier_selection_interval_section(params, section)).sum()
}

/// Evolves the stake modifier along the block-index graph.
///
/// The stake modifier prevents a txout owner from computing future
/// proof-of-stake generated by that txout at the time of its confirmation: to
/// meet the kernel protocol, the txout must hash with a modifier that does not
/// exist yet. The modifier consists of 64 bits, each contributed by a block
/// selected out of one time section of the past selection interval, where the
/// selection is driven by a hash of the block's proof-hash and the previous
/// modifier. It is recomputed at a fixed real-time interval rather than every
/// block, so that gaining control of additional modifier bits stays hard even
/// for an attacker generating a run of blocks.
#[derive(Clone)]
pub struct StakeModifierManager<T: BlockIndexStore> {
    block_index_store: Arc<T>,
    params: Params,
}

impl<T: BlockIndexStore> StakeModifierManager<T> {
    pub fn new(params: Params, block_index_store: Arc<T>) -> Self {
        Self { block_index_store, params }
    }

    /// The most recent generated modifier at or before `node`, with its
    /// generation time
    fn last_stake_modifier(&self, node: &Arc<BlockIndexNode>) -> RuleResult<(u64, i64)> {
        let mut current = Arc::clone(node);
        loop {
            if current.generated_stake_modifier {
                return Ok((current.stake_modifier, current.block_time()));
            }
            match current.prev {
                Some(prev) => current = self.block_index_store.get(prev)?,
                None => return Err(RuleError::NoGenerationAtGenesis),
            }
        }
    }

    fn candidate_selection_hash(node: &BlockIndexNode, prev_modifier: u64) -> Uint256 {
        let hash = hashing::kernel::selection_hash(node.proof_hash(), prev_modifier);
        let selection = Uint256::from_le_bytes(hash.as_bytes());
        // The selection hash of a proof-of-stake block is divided by 2^32 so
        // that proof-of-stake is always favored over proof-of-work, preserving
        // the energy efficiency property
        if node.is_proof_of_stake {
            selection >> 32
        } else {
            selection
        }
    }

    /// Selects one block out of the sorted candidates, excluding blocks
    /// already selected in earlier rounds and, once any candidate qualifies,
    /// stopping at timestamps past `selection_interval_stop`.
    fn select_block_from_candidates(
        &self,
        sorted_by_timestamp: &[(i64, Hash)],
        selected: &HashSet<Hash>,
        selection_interval_stop: i64,
        prev_modifier: u64,
    ) -> RuleResult<Option<Arc<BlockIndexNode>>> {
        let mut best: Option<(Uint256, Arc<BlockIndexNode>)> = None;
        for &(time, hash) in sorted_by_timestamp {
            if best.is_some() && time > selection_interval_stop {
                break;
            }
            if selected.contains(&hash) {
                continue;
            }
            let node = self.block_index_store.get(hash)?;
            let selection = Self::candidate_selection_hash(&node, prev_modifier);
            match &best {
                Some((best_selection, _)) if selection >= *best_selection => {}
                _ => best = Some((selection, node)),
            }
        }
        Ok(best.map(|(_, node)| node))
    }

    /// Computes the stake modifier for the block following `prev`.
    ///
    /// Returns the unchanged previous modifier with `generated = false` while
    /// the current modifier interval has not elapsed, and a freshly assembled
    /// modifier with `generated = true` once it has.
    pub fn compute_next_stake_modifier(&self, prev: Option<&Arc<BlockIndexNode>>) -> RuleResult<(u64, bool)> {
        let Some(prev) = prev else {
            // the genesis block's modifier is 0
            return Ok((0, true));
        };

        let (prev_modifier, modifier_time) = self.last_stake_modifier(prev)?;
        debug!("previous stake modifier 0x{prev_modifier:016x}, generated at time {modifier_time}");
        if modifier_time / self.params.modifier_interval >= prev.block_time() / self.params.modifier_interval {
            return Ok((prev_modifier, false));
        }

        // Gather the candidates: every ancestor within one selection interval
        // back from the latest interval boundary
        let selection_interval = stake_modifier_selection_interval(&self.params);
        let selection_interval_start =
            (prev.block_time() / self.params.modifier_interval) * self.params.modifier_interval - selection_interval;
        let mut sorted_by_timestamp: Vec<(i64, Hash)> =
            Vec::with_capacity((64 * self.params.modifier_interval / self.params.pos_target_spacing) as usize);
        let mut current = Some(Arc::clone(prev));
        while let Some(node) = current {
            if node.block_time() < selection_interval_start {
                break;
            }
            sorted_by_timestamp.push((node.block_time(), node.hash));
            current = match node.prev {
                Some(prev_hash) => Some(self.block_index_store.get(prev_hash)?),
                None => None,
            };
        }
        // Total order: ascending timestamp, ties broken by the hash bytes, so
        // every node sorts the candidates identically
        sorted_by_timestamp.sort_unstable_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));

        // Select up to 64 blocks, one per round, each contributing its entropy
        // bit at the round's position
        let mut new_modifier = 0u64;
        let mut selected: HashSet<Hash> = HashSet::new();
        let mut selection_interval_stop = selection_interval_start;
        for round in 0..64.min(sorted_by_timestamp.len()) {
            selection_interval_stop += stake_modifier_selection_interval_section(&self.params, round);
            let node = self
                .select_block_from_candidates(&sorted_by_timestamp, &selected, selection_interval_stop, prev_modifier)?
                .ok_or(RuleError::NoSelectableCandidate(round))?;
            new_modifier |= (node.stake_entropy_bit as u64) << round;
            selected.insert(node.hash);
        }

        debug!("new stake modifier 0x{new_modifier:016x}, computed at time {}", prev.block_time());
        Ok((new_modifier, true))
    }

    /// Computes and persists the modifier state of a freshly indexed block:
    /// its stake modifier, the chained checksum, and the hard checkpoint
    /// verification of that checksum.
    pub fn apply_to_block_index(&self, hash: Hash) -> RuleResult<(u64, bool)> {
        let node = self.block_index_store.get(hash)?;
        let prev = node.prev.map(|prev_hash| self.block_index_store.get(prev_hash)).transpose()?;
        let (modifier, generated) = self.compute_next_stake_modifier(prev.as_ref())?;
        self.block_index_store.set_stake_modifier(hash, modifier, generated)?;

        let node = self.block_index_store.get(hash)?;
        let checksum = self.stake_modifier_checksum(&node)?;
        self.block_index_store.set_stake_modifier_checksum(hash, checksum)?;
        if let Some(expected) = self.params.stake_modifier_checkpoint(node.height) {
            if checksum != expected {
                return Err(RuleError::StakeModifierCheckpointMismatch { height: node.height, checksum, expected });
            }
        }
        Ok((modifier, generated))
    }

    /// The 32-bit commitment chained across blocks: the predecessor's checksum
    /// (absent at genesis) hashed with the block's flags, kernel proof and
    /// stake modifier, truncated to the top 32 bits of the little-endian
    /// interpretation.
    pub fn stake_modifier_checksum(&self, node: &BlockIndexNode) -> RuleResult<u32> {
        let prev_checksum = match node.prev {
            Some(prev) => Some(self.block_index_store.get(prev)?.stake_modifier_checksum),
            None => None,
        };
        let hash =
            hashing::kernel::modifier_checksum_hash(prev_checksum, node.flags, node.hash_proof_of_stake, node.stake_modifier);
        Ok((Uint256::from_le_bytes(hash.as_bytes()) >> 224).as_u64() as u32)
    }

    /// Verifies a checksum against the hard checkpoints; heights without a
    /// checkpoint always pass
    pub fn check_stake_modifier_checkpoints(&self, height: u64, checksum: u32) -> bool {
        self.params.stake_modifier_checkpoint(height).is_none_or(|expected| expected == checksum)
    }
}
