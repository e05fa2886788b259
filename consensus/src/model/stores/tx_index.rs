use super::errors::{StoreError, StoreResult};
use allium_consensus_core::{
    block::BlockHeader,
    tx::{Transaction, TransactionId},
};
use parking_lot::RwLock;
use std::collections::HashMap;

/// Location of a transaction on disk: block file, byte position of the block
/// within it, and the transaction's byte offset counted from the end of the
/// 80-byte block header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DiskTxPos {
    pub file: u32,
    pub block_offset: u64,
    pub tx_offset: u32,
}

impl DiskTxPos {
    pub fn new(file: u32, block_offset: u64, tx_offset: u32) -> Self {
        Self { file, block_offset, tx_offset }
    }
}

/// Read access to the node's transaction index
pub trait TxIndexStoreReader {
    fn get(&self, transaction_id: TransactionId) -> Option<DiskTxPos>;
}

/// Reads a block header and one of its transactions from block storage.
///
/// Implementations own the file handles and release them on every exit path;
/// the byte-level block file layout is theirs alone. The caller still does the
/// header-length offset arithmetic on `DiskTxPos::tx_offset`.
pub trait BlockDataSource {
    fn read_header_and_tx(&self, pos: &DiskTxPos) -> StoreResult<(BlockHeader, Transaction)>;
}

/// In-memory tx index, the reference store implementation
#[derive(Default)]
pub struct MemoryTxIndexStore {
    map: RwLock<HashMap<TransactionId, DiskTxPos>>,
}

impl MemoryTxIndexStore {
    pub fn new() -> Self {
        Self { map: RwLock::new(HashMap::new()) }
    }

    pub fn insert(&self, transaction_id: TransactionId, pos: DiskTxPos) {
        self.map.write().insert(transaction_id, pos);
    }
}

impl TxIndexStoreReader for MemoryTxIndexStore {
    fn get(&self, transaction_id: TransactionId) -> Option<DiskTxPos> {
        self.map.read().get(&transaction_id).copied()
    }
}

/// In-memory block storage keyed by position
#[derive(Default)]
pub struct MemoryBlockDataSource {
    map: RwLock<HashMap<DiskTxPos, (BlockHeader, Transaction)>>,
}

impl MemoryBlockDataSource {
    pub fn new() -> Self {
        Self { map: RwLock::new(HashMap::new()) }
    }

    pub fn insert(&self, pos: DiskTxPos, header: BlockHeader, tx: Transaction) {
        self.map.write().insert(pos, (header, tx));
    }
}

impl BlockDataSource for MemoryBlockDataSource {
    fn read_header_and_tx(&self, pos: &DiskTxPos) -> StoreResult<(BlockHeader, Transaction)> {
        match self.map.read().get(pos) {
            Some((header, tx)) => Ok((header.clone(), tx.clone())),
            None => Err(StoreError::ReadFailure(format!("no block data at file {} offset {}", pos.file, pos.block_offset))),
        }
    }
}
