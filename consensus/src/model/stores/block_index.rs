use super::errors::{StoreError, StoreResult};
use allium_hashes::Hash;
use parking_lot::RwLock;
use std::{collections::HashMap, sync::Arc};

/// A node of the block-index graph.
///
/// The graph is an arena of nodes addressed by block hash; `prev` and `next`
/// are lookups into the owning store, never ownership edges. `next` points to
/// the active-chain successor and is absent for the chain tip and for blocks
/// off the main chain.
///
/// `stake_modifier`, `generated_stake_modifier`, `hash_proof_of_stake` and
/// `stake_modifier_checksum` are written exclusively by the stake processes;
/// everything else is populated by the block-index owner. Block times are
/// stored as on the wire (`u32`) and widened to `i64` for all arithmetic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockIndexNode {
    pub hash: Hash,
    pub height: u64,
    pub time: u32,
    pub bits: u32,
    pub prev: Option<Hash>,
    pub next: Option<Hash>,
    /// Kernel hash recorded when the block was accepted; zero for proof-of-work blocks
    pub hash_proof_of_stake: Hash,
    pub stake_modifier: u64,
    /// True iff a new modifier was generated at this block
    pub generated_stake_modifier: bool,
    /// This block's single bit of modifier entropy, fixed at acceptance time
    pub stake_entropy_bit: bool,
    /// Opaque persisted bitfield; enters the modifier checksum unchanged
    pub flags: u32,
    pub stake_modifier_checksum: u32,
    pub is_proof_of_stake: bool,
}

impl BlockIndexNode {
    #[inline]
    pub fn block_time(&self) -> i64 {
        i64::from(self.time)
    }

    /// The hash a block competes with during modifier selection: the kernel
    /// proof for proof-of-stake blocks, the block hash otherwise.
    #[inline]
    pub fn proof_hash(&self) -> Hash {
        if self.is_proof_of_stake {
            self.hash_proof_of_stake
        } else {
            self.hash
        }
    }
}

pub trait BlockIndexStoreReader {
    fn get(&self, hash: Hash) -> StoreResult<Arc<BlockIndexNode>>;
    fn has(&self, hash: Hash) -> bool;

    /// Walks `prev` links from `node` down to its ancestor at `height`
    fn ancestor_at(&self, node: &Arc<BlockIndexNode>, height: u64) -> StoreResult<Arc<BlockIndexNode>> {
        if height > node.height {
            return Err(StoreError::KeyNotFound(format!("ancestor of {} at height {}", node.hash, height)));
        }
        let mut current = Arc::clone(node);
        while current.height > height {
            match current.prev {
                Some(prev) => current = self.get(prev)?,
                None => return Err(StoreError::KeyNotFound(format!("ancestor of {} at height {}", node.hash, height))),
            }
        }
        Ok(current)
    }
}

pub trait BlockIndexStore: BlockIndexStoreReader {
    fn insert(&self, node: BlockIndexNode) -> StoreResult<()>;
    fn set_stake_modifier(&self, hash: Hash, modifier: u64, generated: bool) -> StoreResult<()>;
    fn set_stake_modifier_checksum(&self, hash: Hash, checksum: u32) -> StoreResult<()>;
    fn set_hash_proof_of_stake(&self, hash: Hash, proof: Hash) -> StoreResult<()>;
}

/// In-memory block-index arena, the reference store implementation
#[derive(Default)]
pub struct MemoryBlockIndexStore {
    map: RwLock<HashMap<Hash, Arc<BlockIndexNode>>>,
}

impl MemoryBlockIndexStore {
    pub fn new() -> Self {
        Self { map: RwLock::new(HashMap::new()) }
    }

    fn update<F: FnOnce(&mut BlockIndexNode)>(&self, hash: Hash, op: F) -> StoreResult<()> {
        let mut map = self.map.write();
        match map.get_mut(&hash) {
            Some(node) => {
                op(Arc::make_mut(node));
                Ok(())
            }
            None => Err(StoreError::KeyNotFound(hash.to_string())),
        }
    }
}

impl BlockIndexStoreReader for MemoryBlockIndexStore {
    fn get(&self, hash: Hash) -> StoreResult<Arc<BlockIndexNode>> {
        match self.map.read().get(&hash) {
            Some(node) => Ok(Arc::clone(node)),
            None => Err(StoreError::KeyNotFound(hash.to_string())),
        }
    }

    fn has(&self, hash: Hash) -> bool {
        self.map.read().contains_key(&hash)
    }
}

impl BlockIndexStore for MemoryBlockIndexStore {
    fn insert(&self, node: BlockIndexNode) -> StoreResult<()> {
        let mut map = self.map.write();
        if map.contains_key(&node.hash) {
            return Err(StoreError::KeyAlreadyExists(node.hash.to_string()));
        }
        map.insert(node.hash, Arc::new(node));
        Ok(())
    }

    fn set_stake_modifier(&self, hash: Hash, modifier: u64, generated: bool) -> StoreResult<()> {
        self.update(hash, |node| {
            node.stake_modifier = modifier;
            node.generated_stake_modifier = generated;
        })
    }

    fn set_stake_modifier_checksum(&self, hash: Hash, checksum: u32) -> StoreResult<()> {
        self.update(hash, |node| node.stake_modifier_checksum = checksum)
    }

    fn set_hash_proof_of_stake(&self, hash: Hash, proof: Hash) -> StoreResult<()> {
        self.update(hash, |node| node.hash_proof_of_stake = proof)
    }
}
