//! Consensus parameters of the proof-of-stake protocol.
//!
//! The tunables were mutable globals in early node implementations; here they
//! are immutable values threaded into every entry point. Tests may construct
//! alternate instances, production code uses the per-network constants.

/// Hard checkpoints of stake modifier checksums, frozen consensus data.
/// Sorted by height for binary search; any edit that breaks the ordering is a
/// consensus change.
pub const MAINNET_STAKE_MODIFIER_CHECKPOINTS: &[(u64, u32)] = &[
    (0, 0xfd11f4e7),
    (1000, 0x353653fe),
    (10000, 0x8c341084),
    (50008, 0x9f0053f2),
    (100000, 0xaf212909),
    (150006, 0x3883af95),
    (200830, 0xf2daec0a),
    (250008, 0x76bd1777),
    (300836, 0x18dbac5e),
    (350003, 0x17223fa8),
    (400002, 0xd1662b8f),
    (450000, 0x0fc0c8d3),
    (500001, 0x17ac1811),
    (550004, 0xcfb3340f),
    (600014, 0x74d7cf8c),
    (621306, 0x4890a081),
];

pub const TESTNET_STAKE_MODIFIER_CHECKPOINTS: &[(u64, u32)] = &[(0, 0xfd11f4e7)];

/// Consensus parameters relevant to stake validation.
///
/// Changing one of these on a network node would exclude and prevent it from
/// reaching consensus with the other unmodified nodes.
#[derive(Clone, Copy, Debug)]
pub struct Params {
    /// Minimum age in seconds before a coin may stake
    pub stake_min_age: i64,
    /// Age in seconds at which a coin reaches full weight
    pub stake_max_age: i64,
    /// Seconds between stake modifier recomputations
    pub modifier_interval: i64,
    /// Non-uniformity factor across the 64 selection sections
    pub modifier_interval_ratio: i64,
    /// Expected proof-of-stake block spacing in seconds
    pub pos_target_spacing: i64,
    /// Confirmations required before an output may be staked
    pub coinbase_maturity: u64,
    pub stake_modifier_checkpoints: &'static [(u64, u32)],
}

impl Params {
    /// Looks up the frozen checksum for a checkpointed height
    pub fn stake_modifier_checkpoint(&self, height: u64) -> Option<u32> {
        self.stake_modifier_checkpoints.binary_search_by_key(&height, |&(h, _)| h).ok().map(|i| self.stake_modifier_checkpoints[i].1)
    }
}

pub const MAINNET_PARAMS: Params = Params {
    stake_min_age: 60 * 60 * 24,
    stake_max_age: 60 * 60 * 24 * 30,
    modifier_interval: 8 * 60,
    modifier_interval_ratio: 3,
    pos_target_spacing: 4 * 60,
    coinbase_maturity: 500,
    stake_modifier_checkpoints: MAINNET_STAKE_MODIFIER_CHECKPOINTS,
};

pub const TESTNET_PARAMS: Params = Params {
    stake_min_age: 60 * 60 * 24,
    stake_max_age: 60 * 60 * 24 * 30,
    modifier_interval: 8 * 60,
    modifier_interval_ratio: 3,
    pos_target_spacing: 4 * 60,
    coinbase_maturity: 500,
    stake_modifier_checkpoints: TESTNET_STAKE_MODIFIER_CHECKPOINTS,
};
