use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt::Display;

/// Represents the ID of an Allium transaction
pub type TransactionId = allium_hashes::Hash;

/// Size of the underlying script vector, optimized for the common p2pkh script size (25).
pub const SCRIPT_VECTOR_SIZE: usize = 28;

/// Used as the underlying type for script public key data.
pub type ScriptVec = SmallVec<[u8; SCRIPT_VECTOR_SIZE]>;

/// Alias the `smallvec!` macro to ease maintenance
pub use smallvec::smallvec as scriptvec;

/// Represents an Allium transaction outpoint
#[derive(Eq, Hash, PartialEq, Debug, Copy, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionOutpoint {
    pub transaction_id: TransactionId,
    pub index: u32,
}

impl TransactionOutpoint {
    pub fn new(transaction_id: TransactionId, index: u32) -> Self {
        Self { transaction_id, index }
    }

    /// The sentinel outpoint carried by coinbase inputs
    pub fn null() -> Self {
        Self { transaction_id: TransactionId::ZERO, index: u32::MAX }
    }

    pub fn is_null(&self) -> bool {
        self.transaction_id.is_zero() && self.index == u32::MAX
    }
}

impl Display for TransactionOutpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.transaction_id, self.index)
    }
}

/// Represents an Allium transaction input
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionInput {
    pub previous_outpoint: TransactionOutpoint,
    #[serde(with = "serde_bytes")]
    pub signature_script: Vec<u8>,
    pub sequence: u32,
}

impl TransactionInput {
    pub fn new(previous_outpoint: TransactionOutpoint, signature_script: Vec<u8>, sequence: u32) -> Self {
        Self { previous_outpoint, signature_script, sequence }
    }
}

/// Represents an Allium transaction output
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionOutput {
    /// Satoshi amount; signed as on the wire
    pub value: i64,
    pub script_public_key: ScriptVec,
}

impl TransactionOutput {
    pub fn new(value: i64, script_public_key: ScriptVec) -> Self {
        Self { value, script_public_key }
    }

    /// An empty output marks the first slot of a coinstake transaction
    pub fn is_empty(&self) -> bool {
        self.value == 0 && self.script_public_key.is_empty()
    }
}

/// Represents an Allium transaction.
///
/// Transactions carry their own timestamp (`time`), a legacy of the
/// proof-of-stake protocol: coin age is measured from this field and the
/// coinstake timestamp rule compares it against the block time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub version: i32,
    pub time: u32,
    pub inputs: Vec<TransactionInput>,
    pub outputs: Vec<TransactionOutput>,
    pub lock_time: u32,
}

impl Transaction {
    pub fn new(version: i32, time: u32, inputs: Vec<TransactionInput>, outputs: Vec<TransactionOutput>, lock_time: u32) -> Self {
        Self { version, time, inputs, outputs, lock_time }
    }

    /// Determines whether the transaction is a coinbase: a single input
    /// spending the null outpoint.
    pub fn is_coinbase(&self) -> bool {
        self.inputs.len() == 1 && self.inputs[0].previous_outpoint.is_null()
    }

    /// Determines whether the transaction is a coinstake: its first input
    /// spends a real outpoint (the kernel) and its first output is empty,
    /// leaving the stake payout in the outputs that follow.
    pub fn is_coinstake(&self) -> bool {
        !self.inputs.is_empty()
            && !self.inputs[0].previous_outpoint.is_null()
            && self.outputs.len() >= 2
            && self.outputs[0].is_empty()
    }
}
