use crate::{
    errors::{RuleError, RuleResult},
    model::stores::{
        block_index::{BlockIndexNode, BlockIndexStoreReader},
        tx_index::{BlockDataSource, TxIndexStoreReader},
    },
    processes::stake_modifier::stake_modifier_selection_interval,
};
use allium_consensus_core::{
    block::Block,
    config::params::Params,
    constants::{BLOCK_HEADER_SIZE, COIN, SECONDS_PER_DAY},
    hashing,
    tx::{Transaction, TransactionOutpoint},
    utxo::CoinView,
};
use allium_hashes::Hash;
use allium_math::Uint256;
use log::debug;
use std::cmp;
use std::sync::Arc;

/// Network-adjusted wall clock, owned by the caller
pub trait NetworkTime {
    fn adjusted_time(&self) -> i64;
}

/// Plain wall-clock source for deployments without network time adjustment
#[derive(Default)]
pub struct SystemNetworkTime;

impl NetworkTime for SystemNetworkTime {
    fn adjusted_time(&self) -> i64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs() as i64)
            .unwrap_or_default()
    }
}

/// Proof data of an accepted coinstake kernel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StakeProof {
    pub hash_proof: Hash,
    pub target_proof: Uint256,
}

/// The coinstake timestamp must equal the block timestamp exactly
pub fn check_coinstake_timestamp(time_block: i64, time_tx: i64) -> bool {
    time_block == time_tx
}

/// Validates coinstake transactions against the kernel protocol: the kernel
/// (input 0) must satisfy
///
/// ```text
/// hash(stake_modifier ‖ time_block_from ‖ tx_prev_offset ‖ time_tx_prev ‖ prevout.n ‖ time_tx)
///     ≤ coin_day_weight · target_per_coin_day
/// ```
///
/// which makes the chance of producing a coinstake proportional to the coin
/// age consumed, scrambled by a stake modifier that postdates the staked
/// output by a full selection interval.
#[derive(Clone)]
pub struct ProofOfStakeManager<T, U, V, W>
where
    T: BlockIndexStoreReader,
    U: TxIndexStoreReader,
    V: BlockDataSource,
    W: NetworkTime,
{
    params: Params,
    block_index_store: Arc<T>,
    tx_index_store: Arc<U>,
    block_data_source: Arc<V>,
    clock: Arc<W>,
}

impl<T, U, V, W> ProofOfStakeManager<T, U, V, W>
where
    T: BlockIndexStoreReader,
    U: TxIndexStoreReader,
    V: BlockDataSource,
    W: NetworkTime,
{
    pub fn new(params: Params, block_index_store: Arc<T>, tx_index_store: Arc<U>, block_data_source: Arc<V>, clock: Arc<W>) -> Self {
        Self { params, block_index_store, tx_index_store, block_data_source, clock }
    }

    /// Coin-age weight accrued over `[interval_begin, interval_end]`: zero at
    /// the minimum age, saturating at the maximum age. Starting the weight at
    /// zero rather than the minimum age increases the coins actively
    /// participating in the hash when proof-of-stake difficulty is low.
    pub fn coin_age_weight(&self, interval_begin: i64, interval_end: i64) -> i64 {
        cmp::min(interval_end - interval_begin - self.params.stake_min_age, self.params.stake_max_age)
    }

    /// The stake modifier a kernel must hash with: the first modifier
    /// generated at least one selection interval after the origin block, found
    /// by walking the active-chain successors.
    fn kernel_stake_modifier(&self, block_from: &Arc<BlockIndexNode>) -> RuleResult<u64> {
        let selection_interval = stake_modifier_selection_interval(&self.params);
        let mut modifier_height = block_from.height;
        let mut modifier_time = block_from.block_time();
        let mut current = Arc::clone(block_from);
        while modifier_time < block_from.block_time() + selection_interval {
            let Some(next) = current.next else {
                // Reached the best block. If the origin block is too recent
                // for the required modifier to exist yet, the coinstake cannot
                // be judged now and may validate later; otherwise the chain is
                // missing blocks it should already have.
                if block_from.block_time() + self.params.stake_min_age - selection_interval > self.clock.adjusted_time() {
                    return Err(RuleError::StakeModifierNotReady(block_from.hash));
                }
                return Err(RuleError::ReachedBestBlock(current.hash));
            };
            current = self.block_index_store.get(next)?;
            if current.generated_stake_modifier {
                modifier_height = current.height;
                modifier_time = current.block_time();
            }
        }
        debug!("using stake modifier 0x{:016x} generated at height {modifier_height} time {modifier_time}", current.stake_modifier);
        Ok(current.stake_modifier)
    }

    /// Checks a kernel against the coin-age weighted target and returns the
    /// proof pair on success.
    pub fn check_stake_kernel_hash(
        &self,
        bits: u32,
        block_from: &Arc<BlockIndexNode>,
        tx_prev: &Transaction,
        tx_prev_offset: u32,
        prevout: &TransactionOutpoint,
        time_tx: u32,
    ) -> RuleResult<StakeProof> {
        if time_tx < tx_prev.time {
            return Err(RuleError::TimestampViolation(time_tx, tx_prev.time));
        }
        let time_block_from = block_from.time;
        if i64::from(time_block_from) + self.params.stake_min_age > i64::from(time_tx) {
            return Err(RuleError::MinAgeViolation(time_block_from, time_tx));
        }

        let target_per_coin_day = Uint256::from_compact_target_bits(bits);
        let output = tx_prev.outputs.get(prevout.index as usize).ok_or(RuleError::PrevoutOutOfRange(prevout.index))?;
        let value_prev = u64::try_from(output.value).map_err(|_| RuleError::InvalidPrevoutValue(output.value))?;

        // Under-aged kernels were rejected above; a negative weight can then
        // only arise from a transaction timestamped after its own block, so
        // clamp it and let the zero target reject the kernel
        let weight = self.coin_age_weight(i64::from(tx_prev.time), i64::from(time_tx)).max(0);
        // value · weight stays below 2^84, so the fixed-point coin-day figure
        // fits comfortably in 128-bit intermediates
        let coin_day_weight = u128::from(value_prev) * weight as u128 / COIN as u128 / SECONDS_PER_DAY as u128;
        let target_proof =
            target_per_coin_day.checked_mul_u64(coin_day_weight as u64).ok_or(RuleError::CoinDayTargetOverflow)?;

        let stake_modifier = self.kernel_stake_modifier(block_from)?;
        let hash_proof =
            hashing::kernel::kernel_hash(stake_modifier, time_block_from, tx_prev_offset, tx_prev.time, prevout.index, time_tx);

        if Uint256::from_le_bytes(hash_proof.as_bytes()) > target_proof {
            return Err(RuleError::KernelNotMet { hash_proof, target_proof });
        }
        Ok(StakeProof { hash_proof, target_proof })
    }

    /// Validates the coinstake of a proof-of-stake block building on
    /// `prev_index`.
    ///
    /// Resolves the staked output through the tx index and block storage,
    /// enforces its existence and maturity in the UTXO view, cross-checks the
    /// indexed origin block against the chain ancestor at the coin's height,
    /// and runs the kernel hash check. Signature verification of the kernel
    /// input is the script engine's concern and is not performed here.
    pub fn check_proof_of_stake(
        &self,
        block: &Block,
        prev_index: &Arc<BlockIndexNode>,
        coin_view: &impl CoinView,
    ) -> RuleResult<StakeProof> {
        let tx = block.transactions.get(1).filter(|tx| tx.is_coinstake()).ok_or(RuleError::NotCoinstake)?;
        let txin = &tx.inputs[0];

        let pos = self
            .tx_index_store
            .get(txin.previous_outpoint.transaction_id)
            .ok_or(RuleError::TxIndexNotFound(txin.previous_outpoint))?;
        let (header_prev, tx_prev) =
            self.block_data_source.read_header_and_tx(&pos).map_err(|err| RuleError::TxReadFailed(err.to_string()))?;
        // The recorded offset counts from the end of the block header
        let tx_prev_offset = pos.tx_offset + BLOCK_HEADER_SIZE;
        let block_from = self.block_index_store.get(header_prev.hash())?;

        let coin_prev =
            coin_view.get_coin(&txin.previous_outpoint).ok_or(RuleError::PrevoutNotFound(txin.previous_outpoint))?;
        let matured = (prev_index.height + 1).saturating_sub(coin_prev.height);
        if matured < self.params.coinbase_maturity {
            return Err(RuleError::ImmaturePrevout { matured, required: self.params.coinbase_maturity });
        }

        // The tx index and the chain must agree on the origin block
        let ancestor = self.block_index_store.ancestor_at(prev_index, coin_prev.height)?;
        if ancestor.hash != block_from.hash {
            return Err(RuleError::OriginBlockMismatch { index_block: block_from.hash, ancestor: ancestor.hash });
        }

        self.check_stake_kernel_hash(block.header.bits, &block_from, &tx_prev, tx_prev_offset, &txin.previous_outpoint, tx.time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::stores::{
        block_index::{BlockIndexStore, MemoryBlockIndexStore},
        tx_index::{DiskTxPos, MemoryBlockDataSource, MemoryTxIndexStore},
    };
    use allium_consensus_core::{
        block::BlockHeader,
        tx::{scriptvec, ScriptVec, TransactionInput, TransactionOutput},
        utxo::Coin,
    };
    use std::collections::HashMap;

    struct FixedNetworkTime(i64);

    impl NetworkTime for FixedNetworkTime {
        fn adjusted_time(&self) -> i64 {
            self.0
        }
    }

    fn test_params() -> Params {
        Params {
            stake_min_age: 86_400,
            stake_max_age: 2_592_000,
            modifier_interval: 480,
            modifier_interval_ratio: 3,
            pos_target_spacing: 240,
            coinbase_maturity: 10,
            stake_modifier_checkpoints: &[],
        }
    }

    fn chain_hash(height: u64) -> Hash {
        Hash::from_u64(0xC0DE_0000 + height)
    }

    /// Active chain of heights `0..=len` spaced 600 s apart with height 5 at
    /// time 1,000,000; a modifier is generated every 8th block, so a walk from
    /// height 5 exits at height 40 with modifier `0xC0FFEE28`.
    fn build_active_chain(store: &MemoryBlockIndexStore, len: u64, height5_hash: Option<Hash>) {
        let hash_of = |height: u64| match height5_hash {
            Some(hash) if height == 5 => hash,
            _ => chain_hash(height),
        };
        for height in 0..=len {
            let mut n = BlockIndexNode {
                hash: hash_of(height),
                height,
                time: (997_000 + height as i64 * 600) as u32,
                bits: 0x1d00ffff,
                prev: height.checked_sub(1).map(hash_of),
                next: if height < len { Some(hash_of(height + 1)) } else { None },
                hash_proof_of_stake: Hash::ZERO,
                stake_modifier: 0,
                generated_stake_modifier: false,
                stake_entropy_bit: false,
                flags: 0,
                stake_modifier_checksum: 0,
                is_proof_of_stake: false,
            };
            if height % 8 == 0 {
                n.generated_stake_modifier = true;
                n.stake_modifier = 0xC0FF_EE00 + height;
            }
            store.insert(n).unwrap();
        }
    }

    fn manager_over(
        store: Arc<MemoryBlockIndexStore>,
        tx_index: Arc<MemoryTxIndexStore>,
        block_data: Arc<MemoryBlockDataSource>,
        now: i64,
    ) -> ProofOfStakeManager<MemoryBlockIndexStore, MemoryTxIndexStore, MemoryBlockDataSource, FixedNetworkTime> {
        ProofOfStakeManager::new(test_params(), store, tx_index, block_data, Arc::new(FixedNetworkTime(now)))
    }

    fn kernel_manager(
        store: Arc<MemoryBlockIndexStore>,
        now: i64,
    ) -> ProofOfStakeManager<MemoryBlockIndexStore, MemoryTxIndexStore, MemoryBlockDataSource, FixedNetworkTime> {
        manager_over(store, Arc::new(MemoryTxIndexStore::new()), Arc::new(MemoryBlockDataSource::new()), now)
    }

    fn staked_tx(value: i64) -> Transaction {
        Transaction::new(
            1,
            1_000_000,
            vec![TransactionInput::new(TransactionOutpoint::new(0x11.into(), 0), vec![], 0)],
            vec![TransactionOutput::new(COIN, scriptvec![0x51]), TransactionOutput::new(value, scriptvec![0x51])],
            0,
        )
    }

    #[test]
    fn test_coin_age_weight() {
        let store = Arc::new(MemoryBlockIndexStore::new());
        let manager = kernel_manager(store, 0);
        // Zero at exactly the minimum age, negative below it
        assert_eq!(manager.coin_age_weight(0, 86_400), 0);
        assert_eq!(manager.coin_age_weight(0, 86_399), -1);
        assert_eq!(manager.coin_age_weight(0, 86_400 + 3600), 3600);
        // Saturates at the maximum age
        assert_eq!(manager.coin_age_weight(0, 86_400 + 2_592_000 + 1), 2_592_000);
    }

    #[test]
    fn test_timestamp_rule() {
        assert!(check_coinstake_timestamp(1_090_000, 1_090_000));
        assert!(!check_coinstake_timestamp(1_090_000, 1_090_001));
        assert!(!check_coinstake_timestamp(1_090_001, 1_090_000));
    }

    #[test]
    fn test_kernel_stake_modifier_walk() {
        let store = Arc::new(MemoryBlockIndexStore::new());
        build_active_chain(&store, 40, None);
        let manager = kernel_manager(Arc::clone(&store), 2_000_000);
        let block_from = store.get(chain_hash(5)).unwrap();

        assert_eq!(manager.kernel_stake_modifier(&block_from).unwrap(), 0xC0FF_EE28);
    }

    #[test]
    fn test_kernel_stake_modifier_at_the_tip() {
        let store = Arc::new(MemoryBlockIndexStore::new());
        build_active_chain(&store, 10, None);
        let block_from = store.get(chain_hash(5)).unwrap();

        // The origin block is too recent for the modifier to exist: transient
        let manager = kernel_manager(Arc::clone(&store), 1_050_000);
        assert!(matches!(manager.kernel_stake_modifier(&block_from), Err(RuleError::StakeModifierNotReady(_))));

        // Plenty of time has passed, the chain is missing blocks: hard error
        let manager = kernel_manager(Arc::clone(&store), 2_000_000);
        assert!(matches!(manager.kernel_stake_modifier(&block_from), Err(RuleError::ReachedBestBlock(_))));
    }

    #[test]
    fn test_kernel_hash_accepts_golden() {
        let store = Arc::new(MemoryBlockIndexStore::new());
        build_active_chain(&store, 40, None);
        let manager = kernel_manager(Arc::clone(&store), 2_000_000);
        let block_from = store.get(chain_hash(5)).unwrap();
        let tx_prev = staked_tx(100 * COIN);
        let prevout = TransactionOutpoint::new(0x7A.into(), 1);

        let proof = manager.check_stake_kernel_hash(0x20200000, &block_from, &tx_prev, 999, &prevout, 1_090_000).unwrap();
        assert_eq!(proof.hash_proof.to_string(), "513221f0cde9ca0d590eaab8a31165c94cd80e55cb3a87a80b04ae495cda5970");
        // coin_day_weight = 100 coins · 3600 s / 86,400 s = 4; target 2^253
        assert_eq!(proof.target_proof, Uint256::from_u64(1) << 255);
    }

    #[test]
    fn test_kernel_hash_rejects_hard_target() {
        let store = Arc::new(MemoryBlockIndexStore::new());
        build_active_chain(&store, 40, None);
        let manager = kernel_manager(Arc::clone(&store), 2_000_000);
        let block_from = store.get(chain_hash(5)).unwrap();
        let tx_prev = staked_tx(100 * COIN);
        let prevout = TransactionOutpoint::new(0x7A.into(), 1);

        assert!(matches!(
            manager.check_stake_kernel_hash(0x1d00ffff, &block_from, &tx_prev, 999, &prevout, 1_090_000),
            Err(RuleError::KernelNotMet { .. })
        ));
    }

    #[test]
    fn test_kernel_hash_fails_closed_on_target_overflow() {
        let store = Arc::new(MemoryBlockIndexStore::new());
        build_active_chain(&store, 40, None);
        let manager = kernel_manager(Arc::clone(&store), 2_000_000);
        let block_from = store.get(chain_hash(5)).unwrap();
        let tx_prev = staked_tx(100 * COIN);
        let prevout = TransactionOutpoint::new(0x7A.into(), 1);

        assert!(matches!(
            manager.check_stake_kernel_hash(0x207fffff, &block_from, &tx_prev, 999, &prevout, 1_090_000),
            Err(RuleError::CoinDayTargetOverflow)
        ));
    }

    #[test]
    fn test_kernel_hash_rejects_min_age_violation() {
        let store = Arc::new(MemoryBlockIndexStore::new());
        build_active_chain(&store, 40, None);
        let manager = kernel_manager(Arc::clone(&store), 2_000_000);
        let block_from = store.get(chain_hash(5)).unwrap();
        let tx_prev = staked_tx(100 * COIN);
        let prevout = TransactionOutpoint::new(0x7A.into(), 1);

        // One second short of the minimum age
        let err = manager.check_stake_kernel_hash(0x20200000, &block_from, &tx_prev, 999, &prevout, 1_086_399).unwrap_err();
        assert!(matches!(err, RuleError::MinAgeViolation(1_000_000, 1_086_399)));
        assert_eq!(err.dos_score(), 100);
    }

    #[test]
    fn test_kernel_hash_rejects_timestamp_violation() {
        let store = Arc::new(MemoryBlockIndexStore::new());
        build_active_chain(&store, 40, None);
        let manager = kernel_manager(Arc::clone(&store), 2_000_000);
        let block_from = store.get(chain_hash(5)).unwrap();
        let tx_prev = staked_tx(100 * COIN);
        let prevout = TransactionOutpoint::new(0x7A.into(), 1);

        let err = manager.check_stake_kernel_hash(0x20200000, &block_from, &tx_prev, 999, &prevout, 999_999).unwrap_err();
        assert!(matches!(err, RuleError::TimestampViolation(999_999, 1_000_000)));
        assert_eq!(err.dos_score(), 100);
    }

    #[test]
    fn test_kernel_hash_rejects_out_of_range_prevout() {
        let store = Arc::new(MemoryBlockIndexStore::new());
        build_active_chain(&store, 40, None);
        let manager = kernel_manager(Arc::clone(&store), 2_000_000);
        let block_from = store.get(chain_hash(5)).unwrap();
        let tx_prev = staked_tx(100 * COIN);
        let prevout = TransactionOutpoint::new(0x7A.into(), 9);

        assert!(matches!(
            manager.check_stake_kernel_hash(0x20200000, &block_from, &tx_prev, 999, &prevout, 1_090_000),
            Err(RuleError::PrevoutOutOfRange(9))
        ));
    }

    /// Full `check_proof_of_stake` fixture: the staked transaction lives in
    /// the height-5 block whose index entry is keyed by its real header hash.
    struct PosFixture {
        store: Arc<MemoryBlockIndexStore>,
        tx_index: Arc<MemoryTxIndexStore>,
        block_data: Arc<MemoryBlockDataSource>,
        coins: HashMap<TransactionOutpoint, Coin>,
        block: Block,
        prev_index: Arc<BlockIndexNode>,
        prevout: TransactionOutpoint,
    }

    fn pos_fixture() -> PosFixture {
        let header_prev = BlockHeader::new(1, 0x99.into(), 0x88.into(), 1_000_000, 0x1f00ffff, 7);
        let tx_prev = staked_tx(100 * COIN);
        let tx_prev_id = Hash::from_u64(0x7A);
        let prevout = TransactionOutpoint::new(tx_prev_id, 1);

        let store = Arc::new(MemoryBlockIndexStore::new());
        build_active_chain(&store, 40, Some(header_prev.hash()));

        let tx_index = Arc::new(MemoryTxIndexStore::new());
        let pos = DiskTxPos::new(0, 0, 421);
        tx_index.insert(tx_prev_id, pos);
        let block_data = Arc::new(MemoryBlockDataSource::new());
        block_data.insert(pos, header_prev, tx_prev);

        let mut coins = HashMap::new();
        coins.insert(prevout, Coin::new(5, 100 * COIN, false));

        let coinstake = Transaction::new(
            1,
            1_090_000,
            vec![TransactionInput::new(prevout, vec![], 0)],
            vec![TransactionOutput::new(0, ScriptVec::new()), TransactionOutput::new(101 * COIN, scriptvec![0x51])],
            0,
        );
        let coinbase = Transaction::new(
            1,
            1_090_000,
            vec![TransactionInput::new(TransactionOutpoint::null(), vec![], 0)],
            vec![TransactionOutput::new(0, ScriptVec::new())],
            0,
        );
        let header = BlockHeader::new(1, chain_hash(20), 0x77.into(), 1_090_000, 0x203C0000, 0);
        let block = Block::new(header, vec![coinbase, coinstake]);
        let prev_index = store.get(chain_hash(20)).unwrap();

        PosFixture { store, tx_index, block_data, coins, block, prev_index, prevout }
    }

    fn fixture_manager(
        fixture: &PosFixture,
    ) -> ProofOfStakeManager<MemoryBlockIndexStore, MemoryTxIndexStore, MemoryBlockDataSource, FixedNetworkTime> {
        manager_over(Arc::clone(&fixture.store), Arc::clone(&fixture.tx_index), Arc::clone(&fixture.block_data), 2_000_000)
    }

    #[test]
    fn test_check_proof_of_stake_accepts() {
        let fixture = pos_fixture();
        let manager = fixture_manager(&fixture);

        let proof = manager.check_proof_of_stake(&fixture.block, &fixture.prev_index, &fixture.coins).unwrap();
        assert_eq!(proof.hash_proof.to_string(), "4270008ed4dd0abf9d5848fad5a77ece8fa808204676ba7c3f5396288c8409d2");
    }

    #[test]
    fn test_check_proof_of_stake_rejects_non_coinstake() {
        let mut fixture = pos_fixture();
        fixture.block.transactions.truncate(1);
        let manager = fixture_manager(&fixture);
        let err = manager.check_proof_of_stake(&fixture.block, &fixture.prev_index, &fixture.coins).unwrap_err();
        assert!(matches!(err, RuleError::NotCoinstake));
        assert_eq!(err.dos_score(), 100);

        let mut fixture = pos_fixture();
        // Swapping in the coinbase at position 1 also fails the shape check
        fixture.block.transactions[1] = fixture.block.transactions[0].clone();
        let manager = fixture_manager(&fixture);
        assert!(matches!(
            manager.check_proof_of_stake(&fixture.block, &fixture.prev_index, &fixture.coins),
            Err(RuleError::NotCoinstake)
        ));
    }

    #[test]
    fn test_check_proof_of_stake_rejects_missing_tx_index() {
        let fixture = pos_fixture();
        let manager = manager_over(
            Arc::clone(&fixture.store),
            Arc::new(MemoryTxIndexStore::new()),
            Arc::clone(&fixture.block_data),
            2_000_000,
        );
        assert!(matches!(
            manager.check_proof_of_stake(&fixture.block, &fixture.prev_index, &fixture.coins),
            Err(RuleError::TxIndexNotFound(_))
        ));
    }

    #[test]
    fn test_check_proof_of_stake_rejects_unreadable_tx() {
        let fixture = pos_fixture();
        let manager = manager_over(
            Arc::clone(&fixture.store),
            Arc::clone(&fixture.tx_index),
            Arc::new(MemoryBlockDataSource::new()),
            2_000_000,
        );
        assert!(matches!(
            manager.check_proof_of_stake(&fixture.block, &fixture.prev_index, &fixture.coins),
            Err(RuleError::TxReadFailed(_))
        ));
    }

    #[test]
    fn test_check_proof_of_stake_rejects_missing_prevout() {
        let fixture = pos_fixture();
        let manager = fixture_manager(&fixture);
        let empty_coins: HashMap<TransactionOutpoint, Coin> = HashMap::new();
        let err = manager.check_proof_of_stake(&fixture.block, &fixture.prev_index, &empty_coins).unwrap_err();
        assert!(matches!(err, RuleError::PrevoutNotFound(_)));
        assert_eq!(err.dos_score(), 100);
    }

    #[test]
    fn test_check_proof_of_stake_rejects_immature_prevout() {
        let mut fixture = pos_fixture();
        // Pretend the coin was created at height 15: only 6 of 10 required
        // confirmations at prev_index height 20
        fixture.coins.insert(fixture.prevout, Coin::new(15, 100 * COIN, false));
        let manager = fixture_manager(&fixture);
        assert!(matches!(
            manager.check_proof_of_stake(&fixture.block, &fixture.prev_index, &fixture.coins),
            Err(RuleError::ImmaturePrevout { matured: 6, required: 10 })
        ));
    }

    #[test]
    fn test_check_proof_of_stake_rejects_origin_block_mismatch() {
        let mut fixture = pos_fixture();
        // A mature coin height that disagrees with the tx index origin block
        fixture.coins.insert(fixture.prevout, Coin::new(6, 100 * COIN, false));
        let manager = fixture_manager(&fixture);
        assert!(matches!(
            manager.check_proof_of_stake(&fixture.block, &fixture.prev_index, &fixture.coins),
            Err(RuleError::OriginBlockMismatch { .. })
        ));
    }
}
