use alloc::collections::BTreeMap;
use alloc::collections::btree_map;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Debug;
use core::marker::PhantomData;

use crate::chain::Chain;
use crate::chain::Entry;
use crate::chain::VecChain;
use crate::config::ConfigError;
use crate::config::TableConfig;
use crate::hasher::CharCodeSum;
use crate::hasher::KeyHasher;

/// Bucket and chain statistics for a table.
///
/// Available under `cfg(test)` or with the `stats` feature.
#[cfg(any(test, feature = "stats"))]
#[derive(Debug, Clone, PartialEq)]
pub struct TableStats {
    /// Number of entries currently in the table
    pub entries: usize,
    /// Number of buckets
    pub buckets: usize,
    /// Number of buckets holding an empty chain
    pub empty_buckets: usize,
    /// Length of the longest chain
    pub longest_chain: usize,
    /// Current ratio of entries to buckets
    pub load: f64,
    /// Configured load factor threshold
    pub load_factor: f64,
}

#[cfg(any(test, feature = "stats"))]
impl TableStats {
    /// Pretty-print the statistics.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        println!("=== Hash Table Statistics ===");
        println!(
            "Population: {} entries in {} buckets (load {:.3}, threshold {:.3})",
            self.entries, self.buckets, self.load, self.load_factor
        );
        println!(
            "Empty buckets: {} ({:.2}%)",
            self.empty_buckets,
            (self.empty_buckets as f64 / self.buckets as f64) * 100.0
        );
        println!("Longest chain: {}", self.longest_chain);
    }
}

/// A string-keyed hash table using separate chaining.
///
/// Keys are hashed by `S` (by default [`CharCodeSum`]) and reduced modulo the
/// bucket count. Each bucket holds a chain `C` (by default [`VecChain`]) that
/// is searched linearly. A key index records the bucket of every stored key,
/// answering [`has`](Self::has), [`len`](Self::len) and
/// [`keys`](Self::keys) without touching the chains.
///
/// The bucket count doubles whenever the number of entries exceeds
/// `bucket_count * load_factor`. Removal never shrinks the table.
///
/// ## Example
///
/// ```rust
/// use chain_hash::HashTable;
///
/// let mut table = HashTable::new();
/// table.set("name", "Alice");
/// table.set("city", "Paris");
///
/// assert_eq!(table.get("name"), Some(&"Alice"));
/// assert!(table.has("city"));
/// assert!(table.remove("city"));
/// assert_eq!(table.len(), 1);
/// ```
#[derive(Clone)]
pub struct HashTable<V, S = CharCodeSum, C = VecChain<V>> {
    buckets: Vec<C>,
    index: BTreeMap<String, usize>,

    count: usize,
    load_factor: f64,

    hasher: S,

    _phantom: PhantomData<V>,
}

impl<V, S, C> Debug for HashTable<V, S, C>
where
    V: Debug,
    S: KeyHasher,
    C: Chain<V>,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.entries()).finish()
    }
}

impl<V> HashTable<V> {
    /// Creates an empty table with 16 buckets and a load factor of 0.75.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::HashTable;
    /// #
    /// let table: HashTable<u32> = HashTable::new();
    /// assert_eq!(table.bucket_count(), 16);
    /// assert_eq!(table.load_factor(), 0.75);
    /// assert!(table.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::with_hasher(CharCodeSum)
    }

    /// Creates an empty table from `config`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `config` has no buckets or its load factor
    /// is not finite or is below [`MIN_LOAD_FACTOR`](crate::config::MIN_LOAD_FACTOR).
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::HashTable;
    /// # use chain_hash::TableConfig;
    /// #
    /// let table: HashTable<u32> =
    ///     HashTable::with_config(TableConfig::new().bucket_count(8).load_factor(1.0))?;
    /// assert_eq!(table.bucket_count(), 8);
    ///
    /// assert!(HashTable::<u32>::with_config(TableConfig::new().bucket_count(0)).is_err());
    /// # Ok::<(), chain_hash::ConfigError>(())
    /// ```
    pub fn with_config(config: TableConfig) -> Result<Self, ConfigError> {
        Self::with_config_and_hasher(config, CharCodeSum)
    }
}

impl<V, S, C> HashTable<V, S, C>
where
    S: KeyHasher,
    C: Chain<V>,
{
    /// Creates an empty table with the default configuration and the given
    /// key hasher.
    pub fn with_hasher(hasher: S) -> Self {
        Self::from_valid_config(TableConfig::default(), hasher)
    }

    /// Creates an empty table from `config` and the given key hasher.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `config` fails
    /// [`TableConfig::validate`].
    pub fn with_config_and_hasher(config: TableConfig, hasher: S) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid_config(config, hasher))
    }

    fn from_valid_config(config: TableConfig, hasher: S) -> Self {
        debug_assert!(config.validate().is_ok());

        Self {
            buckets: Self::empty_buckets(config.bucket_count),
            index: BTreeMap::new(),
            count: 0,
            load_factor: config.load_factor,
            hasher,
            _phantom: PhantomData,
        }
    }

    fn empty_buckets(bucket_count: usize) -> Vec<C> {
        let mut buckets = Vec::with_capacity(bucket_count);
        buckets.resize_with(bucket_count, C::default);
        buckets
    }

    /// Returns the bucket `key` maps to under the current bucket count.
    ///
    /// The result changes whenever the table grows, so it should not be
    /// stored.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::HashTable;
    /// #
    /// let table: HashTable<u32> = HashTable::new();
    /// assert_eq!(table.bucket_index(""), 0);
    /// assert_eq!(table.bucket_index("a"), 97 % 16);
    /// assert_eq!(table.bucket_index("abc"), table.bucket_index("cba"));
    /// ```
    #[inline]
    pub fn bucket_index(&self, key: &str) -> usize {
        self.locate(key, self.buckets.len())
    }

    #[inline]
    fn locate(&self, key: &str, bucket_count: usize) -> usize {
        (self.hasher.hash_key(key) % bucket_count as u64) as usize
    }

    /// Returns the number of buckets.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the load factor threshold.
    pub fn load_factor(&self) -> f64 {
        self.load_factor
    }

    /// Returns a configuration describing the table's current shape.
    pub fn config(&self) -> TableConfig {
        TableConfig::new()
            .bucket_count(self.buckets.len())
            .load_factor(self.load_factor)
    }

    /// Returns a reference to the key hasher.
    pub fn hasher(&self) -> &S {
        &self.hasher
    }

    /// Inserts or updates the value stored under `key`.
    ///
    /// If the key was not present, a new entry is appended to its bucket's
    /// chain and `None` is returned. Otherwise the value is replaced in
    /// place and the previous value is returned.
    ///
    /// If the insertion pushes the number of entries above
    /// `bucket_count * load_factor`, the bucket count is doubled and every
    /// entry is rehashed.
    ///
    /// The key is only converted into an owned `String` when it is new, so
    /// updating through a `&str` does not allocate.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::HashTable;
    /// #
    /// let mut table = HashTable::new();
    /// assert_eq!(table.set("name", "Alice"), None);
    /// assert_eq!(table.set("name", "Bob"), Some("Alice"));
    /// assert_eq!(table.get("name"), Some(&"Bob"));
    /// assert_eq!(table.len(), 1);
    /// ```
    pub fn set<K>(&mut self, key: K, value: V) -> Option<V>
    where
        K: AsRef<str> + Into<String>,
    {
        let bucket = self.bucket_index(key.as_ref());

        if let Some(entry) = self.buckets[bucket].find_mut(|e| e.key() == key.as_ref()) {
            return Some(core::mem::replace(entry.value_mut(), value));
        }

        self.insert_new(bucket, Entry::new(key.into(), value));
        while self.exceeds_load_factor() {
            self.grow();
        }

        None
    }

    /// Links a key that is known to be absent into `bucket` and the key
    /// index.
    fn insert_new(&mut self, bucket: usize, entry: Entry<V>) {
        debug_assert_eq!(bucket, self.bucket_index(entry.key()));

        let previous = self.index.insert(String::from(entry.key()), bucket);
        debug_assert!(previous.is_none(), "duplicate key {:?}", entry.key());

        self.buckets[bucket].append(entry);
        self.count += 1;
    }

    #[inline]
    fn exceeds_load_factor(&self) -> bool {
        self.count as f64 > self.buckets.len() as f64 * self.load_factor
    }

    /// Doubles the bucket count and reinserts every entry, visiting the old
    /// buckets in index order and each chain front to back. Entries are
    /// staged per bucket and every new chain is built in a single pass.
    #[cold]
    fn grow(&mut self) {
        let bucket_count = self
            .buckets
            .len()
            .checked_mul(2)
            .expect("bucket count overflow");

        log::debug!(
            "growing hash table from {} to {} buckets ({} entries)",
            self.buckets.len(),
            bucket_count,
            self.count
        );

        let mut staged: Vec<Vec<Entry<V>>> = Vec::with_capacity(bucket_count);
        staged.resize_with(bucket_count, Vec::new);

        let old_buckets = core::mem::take(&mut self.buckets);
        self.index.clear();
        self.count = 0;

        for chain in old_buckets {
            for entry in chain.into_entries() {
                let bucket = self.locate(entry.key(), bucket_count);
                let previous = self.index.insert(String::from(entry.key()), bucket);
                debug_assert!(previous.is_none(), "duplicate key {:?}", entry.key());

                staged[bucket].push(entry);
                self.count += 1;
            }
        }

        self.buckets = staged.into_iter().map(C::from_iter).collect();
    }

    /// Returns a reference to the value stored under `key`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::HashTable;
    /// #
    /// let mut table = HashTable::new();
    /// table.set("abc", 1);
    /// table.set("acb", 2);
    /// assert_eq!(table.get("abc"), Some(&1));
    /// assert_eq!(table.get("acb"), Some(&2));
    /// assert_eq!(table.get("bca"), None);
    /// ```
    pub fn get(&self, key: &str) -> Option<&V> {
        self.buckets[self.bucket_index(key)]
            .find(|e| e.key() == key)
            .map(Entry::value)
    }

    /// Returns a mutable reference to the value stored under `key`.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let bucket = self.bucket_index(key);
        self.buckets[bucket]
            .find_mut(|e| e.key() == key)
            .map(Entry::value_mut)
    }

    /// Returns `true` if `key` is stored in the table.
    ///
    /// Answered from the key index alone.
    pub fn has(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Removes `key`, returning `true` if it was present.
    ///
    /// # Panics
    ///
    /// Panics if the key index and the bucket chains disagree about whether
    /// `key` is stored.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::HashTable;
    /// #
    /// let mut table = HashTable::new();
    /// table.set("name", "Alice");
    /// assert!(table.remove("name"));
    /// assert!(!table.remove("name"));
    /// assert!(table.is_empty());
    /// ```
    pub fn remove(&mut self, key: &str) -> bool {
        self.remove_entry(key).is_some()
    }

    /// Removes `key`, returning the stored key and value if it was present.
    ///
    /// # Panics
    ///
    /// Panics if the key index and the bucket chains disagree about whether
    /// `key` is stored.
    pub fn remove_entry(&mut self, key: &str) -> Option<(String, V)> {
        if self.count == 0 {
            debug_assert!(self.index.is_empty());
            return None;
        }

        let bucket = self.bucket_index(key);
        let removed = self.buckets[bucket].remove(|e| e.key() == key);
        let indexed = self.index.remove(key);

        match (removed, indexed) {
            (Some(entry), Some(indexed_bucket)) => {
                assert_eq!(
                    indexed_bucket, bucket,
                    "key index is out of sync for {key:?}"
                );
                self.count -= 1;
                Some(entry.into_pair())
            }
            (None, None) => None,
            (removed, indexed) => panic!(
                "key index is out of sync for {key:?}: in chain {}: {}, in index: {}",
                bucket,
                removed.is_some(),
                indexed.is_some()
            ),
        }
    }

    /// Returns the number of distinct keys in the table.
    pub fn len(&self) -> usize {
        debug_assert_eq!(self.index.len(), self.count);
        self.index.len()
    }

    /// Returns `true` if the table holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes every entry.
    ///
    /// The current bucket count is kept, not reset to the initial one.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::HashTable;
    /// #
    /// let mut table = HashTable::new();
    /// for i in 0..32 {
    ///     table.set(format!("key{i}"), i);
    /// }
    /// let grown = table.bucket_count();
    /// assert!(grown > 16);
    ///
    /// table.clear();
    /// assert!(table.is_empty());
    /// assert_eq!(table.bucket_count(), grown);
    /// ```
    pub fn clear(&mut self) {
        log::trace!(
            "clearing hash table ({} entries, {} buckets)",
            self.count,
            self.buckets.len()
        );

        self.buckets = Self::empty_buckets(self.buckets.len());
        self.index.clear();
        self.count = 0;
    }

    /// Returns an iterator over the stored keys, read from the key index.
    ///
    /// The order is unspecified.
    pub fn keys(&self) -> Keys<'_> {
        Keys {
            inner: self.index.keys(),
        }
    }

    /// Returns an iterator over the stored values.
    ///
    /// Values are yielded bucket by bucket, in chain order within each
    /// bucket.
    pub fn values(&self) -> Values<'_, V, C> {
        Values {
            inner: self.entries(),
        }
    }

    /// Returns an iterator over `(key, value)` pairs.
    ///
    /// Pairs are yielded bucket by bucket, in chain order within each
    /// bucket.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::HashTable;
    /// #
    /// let mut table = HashTable::new();
    /// table.set("a", 1); // bucket 1
    /// table.set("b", 2); // bucket 2
    /// table.set("q", 3); // bucket 1, after "a"
    ///
    /// let pairs: Vec<_> = table.entries().collect();
    /// assert_eq!(pairs, [("a", &1), ("q", &3), ("b", &2)]);
    /// ```
    pub fn entries(&self) -> Iter<'_, V, C> {
        Iter {
            buckets: self.buckets.iter(),
            chain: None,
            remaining: self.count,
        }
    }

    /// Returns an iterator over `(key, value)` pairs. Same as
    /// [`entries`](Self::entries).
    pub fn iter(&self) -> Iter<'_, V, C> {
        self.entries()
    }

    /// Returns how many buckets hold a chain of each length: index `n` of
    /// the result counts the buckets with exactly `n` entries.
    ///
    /// Available under `cfg(test)` or with the `stats` feature.
    #[cfg(any(test, feature = "stats"))]
    pub fn chain_histogram(&self) -> Vec<usize> {
        let longest = self
            .buckets
            .iter()
            .map(|chain| chain.len())
            .max()
            .unwrap_or(0);

        let mut hist = alloc::vec![0usize; longest + 1];
        for chain in &self.buckets {
            hist[chain.len()] += 1;
        }
        hist
    }

    /// Returns bucket and chain statistics.
    ///
    /// Available under `cfg(test)` or with the `stats` feature.
    #[cfg(any(test, feature = "stats"))]
    pub fn debug_stats(&self) -> TableStats {
        let hist = self.chain_histogram();

        TableStats {
            entries: self.count,
            buckets: self.buckets.len(),
            empty_buckets: hist[0],
            longest_chain: hist.len() - 1,
            load: self.count as f64 / self.buckets.len() as f64,
            load_factor: self.load_factor,
        }
    }

    /// Pretty-prints the chain-length histogram as a horizontal bar chart.
    ///
    /// Requires the `std` feature, and `cfg(test)` or the `stats` feature.
    #[cfg(all(any(test, feature = "stats"), feature = "std"))]
    pub fn print_chain_histogram(&self) {
        let hist = self.chain_histogram();
        let max = hist.iter().copied().max().unwrap_or(0);
        if max == 0 {
            println!("chain histogram: empty");
            return;
        }

        let max_bar = 60usize;
        println!(
            "chain histogram ({} entries, {} buckets):",
            self.count,
            self.buckets.len()
        );
        for (len, &buckets) in hist.iter().enumerate() {
            let width = (buckets * max_bar).div_ceil(max);
            println!("{:>3} | {} ({})", len, "█".repeat(width), buckets);
        }
    }
}

impl<V, S, C> Default for HashTable<V, S, C>
where
    S: KeyHasher + Default,
    C: Chain<V>,
{
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K, V, S, C> FromIterator<(K, V)> for HashTable<V, S, C>
where
    K: AsRef<str> + Into<String>,
    S: KeyHasher + Default,
    C: Chain<V>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::default();
        table.extend(iter);
        table
    }
}

impl<K, V, S, C> Extend<(K, V)> for HashTable<V, S, C>
where
    K: AsRef<str> + Into<String>,
    S: KeyHasher,
    C: Chain<V>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}

impl<'a, V, S, C> IntoIterator for &'a HashTable<V, S, C>
where
    S: KeyHasher,
    C: Chain<V>,
{
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries()
    }
}

/// An iterator over the `(key, value)` pairs of a [`HashTable`].
///
/// This struct is created by [`HashTable::entries`] and [`HashTable::iter`].
pub struct Iter<'a, V, C>
where
    V: 'a,
    C: Chain<V> + 'a,
{
    buckets: core::slice::Iter<'a, C>,
    chain: Option<C::Iter<'a>>,
    remaining: usize,
}

impl<'a, V, C> Iterator for Iter<'a, V, C>
where
    V: 'a,
    C: Chain<V> + 'a,
{
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.chain.as_mut().and_then(Iterator::next) {
                self.remaining -= 1;
                return Some((entry.key(), entry.value()));
            }

            self.chain = Some(self.buckets.next()?.iter());
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, V, C> ExactSizeIterator for Iter<'a, V, C>
where
    V: 'a,
    C: Chain<V> + 'a,
{
}

/// An iterator over the values of a [`HashTable`].
///
/// This struct is created by [`HashTable::values`].
pub struct Values<'a, V, C>
where
    V: 'a,
    C: Chain<V> + 'a,
{
    inner: Iter<'a, V, C>,
}

impl<'a, V, C> Iterator for Values<'a, V, C>
where
    V: 'a,
    C: Chain<V> + 'a,
{
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, V, C> ExactSizeIterator for Values<'a, V, C>
where
    V: 'a,
    C: Chain<V> + 'a,
{
}

/// An iterator over the keys of a [`HashTable`].
///
/// This struct is created by [`HashTable::keys`].
pub struct Keys<'a> {
    inner: btree_map::Keys<'a, String, usize>,
}

impl<'a> Iterator for Keys<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(String::as_str)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Keys<'_> {}
