use crate::model::stores::errors::StoreError;
use allium_consensus_core::tx::TransactionOutpoint;
use allium_hashes::Hash;
use allium_math::Uint256;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum RuleError {
    #[error("no stake modifier generation at the genesis block")]
    NoGenerationAtGenesis,

    #[error("unable to select a candidate block at selection round {0}")]
    NoSelectableCandidate(usize),

    #[error("block index access failed: {0}")]
    BlockIndexAccess(#[from] StoreError),

    #[error("transaction at the coinstake position is not a coinstake")]
    NotCoinstake,

    #[error("coinstake timestamp {0} is earlier than the staked output timestamp {1}")]
    TimestampViolation(u32, u32),

    #[error("staked output violates the minimum age: origin block time {0}, coinstake time {1}")]
    MinAgeViolation(u32, u32),

    #[error("stake prevout index {0} is out of range")]
    PrevoutOutOfRange(u32),

    #[error("stake prevout value {0} is out of range")]
    InvalidPrevoutValue(i64),

    #[error("coin-day weighted target overflows 256 bits")]
    CoinDayTargetOverflow,

    #[error("kernel hash {hash_proof} does not meet the coin-age weighted target {target_proof}")]
    KernelNotMet { hash_proof: Hash, target_proof: Uint256 },

    #[error("no transaction index entry for staked output {0}")]
    TxIndexNotFound(TransactionOutpoint),

    #[error("failed to read the staked transaction from block storage: {0}")]
    TxReadFailed(String),

    #[error("stake prevout {0} does not exist in the utxo view")]
    PrevoutNotFound(TransactionOutpoint),

    #[error("stake prevout matured to {matured} of the required {required} confirmations")]
    ImmaturePrevout { matured: u64, required: u64 },

    #[error("origin block {index_block} from the tx index differs from the chain ancestor {ancestor}")]
    OriginBlockMismatch { index_block: Hash, ancestor: Hash },

    #[error("reached best block {0} before the selection interval elapsed")]
    ReachedBestBlock(Hash),

    #[error("stake modifier is not yet available for origin block {0}")]
    StakeModifierNotReady(Hash),

    #[error("stake modifier checksum {checksum:#010x} at height {height} does not match the hard checkpoint {expected:#010x}")]
    StakeModifierCheckpointMismatch { height: u64, checksum: u32, expected: u32 },
}

impl RuleError {
    /// Protocol-level misbehavior weight charged to the peer that relayed the
    /// offending block. Transient rejections and internal invariant failures
    /// carry no penalty; every consensus rejection carries the full weight.
    pub fn dos_score(&self) -> u32 {
        match self {
            RuleError::StakeModifierNotReady(_) | RuleError::NoGenerationAtGenesis | RuleError::NoSelectableCandidate(_) => 0,
            _ => 100,
        }
    }
}

pub type RuleResult<T> = std::result::Result<T, RuleError>;
