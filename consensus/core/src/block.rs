use crate::{hashing, tx::Transaction};
use allium_hashes::Hash;
use serde::{Deserialize, Serialize};

/// The 80-byte block header
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockHeader {
    pub version: i32,
    pub hash_prev_block: Hash,
    pub hash_merkle_root: Hash,
    pub time: u32,
    pub bits: u32,
    pub nonce: u32,
}

impl BlockHeader {
    pub fn new(version: i32, hash_prev_block: Hash, hash_merkle_root: Hash, time: u32, bits: u32, nonce: u32) -> Self {
        Self { version, hash_prev_block, hash_merkle_root, time, bits, nonce }
    }

    /// Returns the header hash (double SHA-256 of the serialized header)
    pub fn hash(&self) -> Hash {
        hashing::header::hash(self)
    }
}

#[derive(Clone, Debug)]
pub struct Block {
    pub header: BlockHeader,
    pub transactions: Vec<Transaction>,
}

impl Block {
    pub fn new(header: BlockHeader, transactions: Vec<Transaction>) -> Self {
        Self { header, transactions }
    }

    /// A proof-of-stake block carries its coinstake as the second transaction
    pub fn is_proof_of_stake(&self) -> bool {
        self.transactions.len() > 1 && self.transactions[1].is_coinstake()
    }

    pub fn hash(&self) -> Hash {
        self.header.hash()
    }
}
