mod hashers;

use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display, Formatter};
use std::mem::size_of;
use std::str::{self, FromStr};

pub const HASH_SIZE: usize = 32;

pub use hashers::*;

/// A 256-bit chain hash. Stored in the byte order the canonical hasher emits;
/// arithmetic interpretations live in `allium-math`.
#[derive(PartialEq, Eq, Clone, Copy, Hash, Default, Debug, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Hash([u8; HASH_SIZE]);

impl Hash {
    pub const ZERO: Hash = Hash([0; HASH_SIZE]);

    pub const fn from_bytes(bytes: [u8; HASH_SIZE]) -> Self {
        Hash(bytes)
    }

    pub const fn as_bytes(self) -> [u8; 32] {
        self.0
    }

    pub fn from_slice(bytes: &[u8]) -> Self {
        Self(<[u8; HASH_SIZE]>::try_from(bytes).expect("Slice must have the length of Hash"))
    }

    #[inline(always)]
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&b| b == 0)
    }

    pub fn from_u64(word: u64) -> Self {
        let mut bytes = [0u8; HASH_SIZE];
        bytes[0..size_of::<u64>()].copy_from_slice(&word.to_le_bytes());
        Hash(bytes)
    }

    /// To be used for test purposes only
    pub fn new_unique() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        let c = COUNTER.fetch_add(1, Ordering::Relaxed);
        Self::from_u64(c)
    }
}

impl Display for Hash {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut hex = [0u8; HASH_SIZE * 2];
        faster_hex::hex_encode(&self.0, &mut hex).expect("The output is exactly twice the size of the input");
        f.write_str(str::from_utf8(&hex).expect("hex is always valid UTF-8"))
    }
}

impl FromStr for Hash {
    type Err = faster_hex::Error;

    fn from_str(hash_str: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; HASH_SIZE];
        faster_hex::hex_decode(hash_str.as_bytes(), &mut bytes)?;
        Ok(Hash(bytes))
    }
}

impl From<u64> for Hash {
    fn from(word: u64) -> Self {
        Self::from_u64(word)
    }
}

impl AsRef<[u8]> for Hash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
