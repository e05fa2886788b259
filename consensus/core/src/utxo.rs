use crate::tx::TransactionOutpoint;

/// An unspent output as recorded by the UTXO set: the height of the block that
/// created it, its amount and whether it came from a coinbase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coin {
    pub height: u64,
    pub value: i64,
    pub is_coinbase: bool,
}

impl Coin {
    pub fn new(height: u64, value: i64, is_coinbase: bool) -> Self {
        Self { height, value, is_coinbase }
    }
}

/// Read-only view over the UTXO set, owned by the caller
pub trait CoinView {
    fn get_coin(&self, outpoint: &TransactionOutpoint) -> Option<Coin>;
}

impl CoinView for std::collections::HashMap<TransactionOutpoint, Coin> {
    fn get_coin(&self, outpoint: &TransactionOutpoint) -> Option<Coin> {
        self.get(outpoint).copied()
    }
}
