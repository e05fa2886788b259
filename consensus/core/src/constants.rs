/// Number of satoshis in one coin
pub const COIN: i64 = 100_000_000;

/// Serialized size of a block header in bytes. Transaction offsets recorded by
/// the tx index count from the end of the header.
pub const BLOCK_HEADER_SIZE: u32 = 80;

/// Seconds per day, the unit of coin-age weighting
pub const SECONDS_PER_DAY: i64 = 24 * 60 * 60;
