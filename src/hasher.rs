use core::hash::BuildHasher;

/// Maps a string key to a 64-bit hash.
///
/// The table reduces the hash modulo its current bucket count on every
/// access, so implementations only need to be deterministic for a given key.
pub trait KeyHasher {
    /// Hashes `key`.
    fn hash_key(&self, key: &str) -> u64;
}

/// Sums the Unicode scalar values of every character in the key.
///
/// Accumulation wraps on overflow. Anagrams share a hash, and the empty key
/// hashes to `0`. Cheap and reproducible, but not well mixed.
///
/// # Examples
///
/// ```rust
/// use chain_hash::hasher::CharCodeSum;
/// use chain_hash::hasher::KeyHasher;
///
/// assert_eq!(CharCodeSum.hash_key(""), 0);
/// assert_eq!(CharCodeSum.hash_key("ab"), 97 + 98);
/// assert_eq!(CharCodeSum.hash_key("abc"), CharCodeSum.hash_key("cab"));
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CharCodeSum;

impl KeyHasher for CharCodeSum {
    #[inline]
    fn hash_key(&self, key: &str) -> u64 {
        key.chars()
            .fold(0u64, |acc, ch| acc.wrapping_add(u64::from(u32::from(ch))))
    }
}

/// Adapts any [`BuildHasher`] into a [`KeyHasher`].
///
/// # Examples
///
/// ```rust
/// # #[cfg(feature = "std")]
/// # {
/// use std::collections::hash_map::RandomState;
///
/// use chain_hash::HashTable;
/// use chain_hash::TableConfig;
/// use chain_hash::chain::VecChain;
/// use chain_hash::hasher::Hashed;
///
/// let mut table: HashTable<u32, Hashed<RandomState>, VecChain<u32>> =
///     HashTable::with_config_and_hasher(TableConfig::default(), Hashed::new(RandomState::new()))
///         .unwrap();
/// table.set("abc", 1);
/// table.set("cab", 2);
/// assert_eq!(table.get("abc"), Some(&1));
/// # }
/// ```
#[derive(Debug, Default, Clone)]
pub struct Hashed<B> {
    build_hasher: B,
}

impl<B> Hashed<B> {
    /// Wraps `build_hasher`.
    pub fn new(build_hasher: B) -> Self {
        Self { build_hasher }
    }
}

impl<B: BuildHasher> KeyHasher for Hashed<B> {
    #[inline]
    fn hash_key(&self, key: &str) -> u64 {
        self.build_hasher.hash_one(key)
    }
}

/// A well-mixed key hasher backed by `foldhash`.
#[cfg(feature = "foldhash")]
pub type FoldKeyHasher = Hashed<foldhash::fast::RandomState>;

#[cfg(test)]
mod tests {
    use core::hash::BuildHasher;

    use siphasher::sip::SipHasher;

    use super::*;

    #[derive(Default)]
    struct SipBuilder;

    impl BuildHasher for SipBuilder {
        type Hasher = SipHasher;

        fn build_hasher(&self) -> Self::Hasher {
            SipHasher::new()
        }
    }

    #[test]
    fn char_code_sum_matches_manual_sum() {
        assert_eq!(CharCodeSum.hash_key("name"), 110 + 97 + 109 + 101);
        assert_eq!(CharCodeSum.hash_key("é"), 0xE9);
        assert_eq!(CharCodeSum.hash_key("🦀"), 0x1F980);
    }

    #[test]
    fn char_code_sum_collides_on_anagrams() {
        assert_eq!(CharCodeSum.hash_key("abc"), CharCodeSum.hash_key("acb"));
        assert_eq!(
            CharCodeSum.hash_key("listen"),
            CharCodeSum.hash_key("silent")
        );
    }

    #[test]
    fn hashed_is_deterministic_per_builder() {
        let hasher = Hashed::new(SipBuilder);
        assert_eq!(hasher.hash_key("abc"), hasher.hash_key("abc"));
        assert_ne!(hasher.hash_key("abc"), hasher.hash_key("acb"));
    }

    #[cfg(feature = "foldhash")]
    #[test]
    fn fold_hasher_separates_anagrams() {
        let hasher = FoldKeyHasher::default();
        assert_eq!(hasher.hash_key("abc"), hasher.hash_key("abc"));
        assert_ne!(hasher.hash_key("abc"), hasher.hash_key("acb"));
    }
}
