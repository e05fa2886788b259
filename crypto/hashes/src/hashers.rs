use crate::Hash;
use sha2::{Digest, Sha256};

pub trait Hasher: Clone + Default {
    fn update<A: AsRef<[u8]>>(&mut self, data: A) -> &mut Self;
    fn finalize(self) -> Hash;
}

/// The chain's canonical hash: SHA-256 applied twice.
///
/// Every consensus hash (block headers, kernel proofs, selection hashes,
/// modifier checksums) is a double SHA-256 over a little-endian field
/// concatenation with no delimiters.
#[derive(Clone, Default)]
pub struct DoubleSha256(Sha256);

impl DoubleSha256 {
    #[inline(always)]
    pub fn new() -> Self {
        Self(Sha256::new())
    }

    /// One-shot convenience over [`Hasher::update`] + [`Hasher::finalize`].
    pub fn hash<A: AsRef<[u8]>>(data: A) -> Hash {
        let mut hasher = Self::new();
        Hasher::update(&mut hasher, data);
        hasher.finalize()
    }
}

impl Hasher for DoubleSha256 {
    #[inline(always)]
    fn update<A: AsRef<[u8]>>(&mut self, data: A) -> &mut Self {
        Digest::update(&mut self.0, data.as_ref());
        self
    }

    #[inline(always)]
    fn finalize(self) -> Hash {
        let first = self.0.finalize();
        Hash::from_slice(&Sha256::digest(first))
    }
}
