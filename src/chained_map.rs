use std::{
    borrow::Borrow,
    collections::hash_map::DefaultHasher,
    fmt,
    hash::{Hash, Hasher},
    mem,
};

use rand::{SeedableRng, rngs::StdRng};

use crate::universal_hash::{DEFAULT_PRIME, UniversalHasher};

/// Capacity a table starts with when none is given. Odd, per the table's
/// capacity invariant.
const DEFAULT_CAPACITY: usize = 11;

/// Load factor above which an insert triggers a rebuild.
const MAX_LOAD_FACTOR: f64 = 0.75;

/// Capability trait deciding how a key is routed to a bucket.
///
/// Integer keys return their `u64` operand and take the universal-hash path,
/// which carries the collision bound against adversarial key choice. Every
/// other key type keeps the default `None` and falls back to the standard
/// library's [`DefaultHasher`] reduced modulo capacity; that path has no
/// uniformity or adversarial-resistance guarantee, which is an accepted
/// limitation of the design, not a defect.
///
/// Custom key types opt in to the table with an empty impl:
///
/// ```rust
/// use chainmap::TableKey;
///
/// #[derive(PartialEq, Eq, Hash)]
/// struct UserId(String);
///
/// impl TableKey for UserId {}
/// ```
pub trait TableKey: Eq + Hash {
    /// Integer operand for the universal-hash path, or `None` to take the
    /// generic fallback.
    fn universal_operand(&self) -> Option<u64> {
        None
    }
}

/// Implements [`TableKey`] for unsigned integers that widen losslessly into
/// the `u64` operand.
macro_rules! impl_widening_table_key {
    ($($int:ty),* $(,)?) => {
        $(
            impl TableKey for $int {
                fn universal_operand(&self) -> Option<u64> {
                    Some(u64::from(*self))
                }
            }
        )*
    };
}

/// Implements [`TableKey`] for integers that reach the `u64` operand through
/// a bit-reinterpreting cast (sign extension for the signed types). The
/// mapping is injective per type, so equal keys always produce equal
/// operands.
macro_rules! impl_reinterpret_table_key {
    ($($int:ty),* $(,)?) => {
        $(
            impl TableKey for $int {
                #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
                fn universal_operand(&self) -> Option<u64> {
                    Some(*self as u64)
                }
            }
        )*
    };
}

impl_widening_table_key!(u8, u16, u32);
impl_reinterpret_table_key!(usize, i8, i16, i32, i64, isize);

impl TableKey for u64 {
    fn universal_operand(&self) -> Option<u64> {
        Some(*self)
    }
}

impl TableKey for String {}
impl TableKey for str {}
impl TableKey for char {}
impl TableKey for bool {}

impl<T: TableKey + ?Sized> TableKey for &T {
    fn universal_operand(&self) -> Option<u64> {
        (**self).universal_operand()
    }
}

/// A hash table resolving collisions by chaining, with integer keys routed
/// through a randomly drawn universal hash function.
///
/// Each bucket owns an ordered chain of `(key, value)` pairs holding at most
/// one entry per distinct key. When an insert pushes the load factor above
/// 0.75 the table rebuilds itself at `2 * capacity + 1` buckets under a
/// freshly drawn hasher, so capacity stays odd and strictly increases for the
/// lifetime of the table. Deletes never shrink.
///
/// Note: This implementation is not thread-safe; wrap it in a lock or shard
/// it for concurrent access.
#[derive(Debug, Clone)]
pub struct ChainedHashMap<K, V> {
    /// The bucket array; each bucket is an independently owned chain.
    buckets: Vec<Vec<(K, V)>>,
    /// Current number of live entries across all chains.
    size: usize,
    /// The hash function instance for the current capacity.
    hasher: UniversalHasher,
    /// Randomness source for every hasher this table will ever draw.
    rng: StdRng,
}

impl<K, V> Default for ChainedHashMap<K, V>
where
    K: TableKey,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Extend<(K, V)> for ChainedHashMap<K, V>
where
    K: TableKey,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K, V> ChainedHashMap<K, V>
where
    K: TableKey,
{
    /// Creates an empty table with the default initial capacity of 11.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty table with the given initial capacity.
    ///
    /// Even capacities are rounded up to the next odd number, since modular
    /// hashing into an even bucket count invites periodicity pathologies.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_rng(capacity, StdRng::from_os_rng())
    }

    /// Creates an empty table whose hasher draws all come from a
    /// deterministic source seeded with `seed`.
    ///
    /// Two tables built from the same seed and fed the same operations end up
    /// with identical bucket layouts, which makes hashing-dependent behavior
    /// reproducible in tests.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    #[must_use]
    pub fn with_seed(capacity: usize, seed: u64) -> Self {
        Self::with_capacity_and_rng(capacity, StdRng::seed_from_u64(seed))
    }

    /// Shared constructor: normalizes the capacity to odd and draws the
    /// initial hasher from `rng`.
    fn with_capacity_and_rng(capacity: usize, mut rng: StdRng) -> Self {
        assert!(capacity >= 1, "table capacity must be at least 1");
        let capacity = capacity | 1;

        let hasher = UniversalHasher::from_rng(capacity, DEFAULT_PRIME, &mut rng);
        Self { buckets: Self::empty_buckets(capacity), size: 0, hasher, rng }
    }

    /// Allocates `capacity` fresh, empty chains.
    fn empty_buckets(capacity: usize) -> Vec<Vec<(K, V)>> {
        std::iter::repeat_with(Vec::new).take(capacity).collect()
    }

    /// Computes the bucket index for a key: universal hash for integer keys,
    /// generic fallback for everything else.
    fn route<Q>(&self, key: &Q) -> usize
    where
        Q: TableKey + ?Sized,
    {
        key.universal_operand()
            .map_or_else(|| self.fallback_index(key), |operand| self.hasher.index(operand))
    }

    /// Fallback path for non-integer keys: `DefaultHasher` reduced modulo
    /// capacity. No adversarial-resistance guarantee.
    #[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]
    fn fallback_index<Q>(&self, key: &Q) -> usize
    where
        Q: Hash + ?Sized,
    {
        let mut state = DefaultHasher::new();
        key.hash(&mut state);
        // Capacity is never zero, so the reduction is well-defined.
        (state.finish() % self.buckets.len() as u64) as usize
    }

    /// Inserts a key-value pair, returning the previous value if the key was
    /// already present (the entry is updated in place and the size does not
    /// change). Triggers a rebuild when the insert leaves the load factor
    /// above 0.75.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let previous = self.insert_entry(key, value);

        if self.load_factor() > MAX_LOAD_FACTOR {
            self.resize();
        }

        previous
    }

    /// Chain mutation shared by `insert` and the rebuild loop: update in
    /// place on an equal key, append otherwise. No load-factor check here, so
    /// the rebuild cannot re-enter itself.
    fn insert_entry(&mut self, key: K, value: V) -> Option<V> {
        let index = self.route(&key);
        // The routed index is always below capacity; returning None instead
        // of panicking mirrors the lookup paths.
        let chain = self.buckets.get_mut(index)?;

        if let Some(entry) = chain.iter_mut().find(|entry| entry.0 == key) {
            return Some(mem::replace(&mut entry.1, value));
        }

        chain.push((key, value));
        self.size = self.size.saturating_add(1);
        None
    }

    /// Retrieves the value for a key, or `None` if the key is absent.
    ///
    /// Absence is an ordinary outcome, not a failure. Expected O(1), worst
    /// case proportional to the chain length.
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: TableKey + ?Sized,
    {
        let index = self.route(key);
        self.buckets.get(index)?.iter().find(|entry| entry.0.borrow() == key).map(|entry| &entry.1)
    }

    /// Retrieves a mutable reference to the value for a key.
    #[must_use]
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: TableKey + ?Sized,
    {
        let index = self.route(key);
        self.buckets
            .get_mut(index)?
            .iter_mut()
            .find(|entry| entry.0.borrow() == key)
            .map(|entry| &mut entry.1)
    }

    /// Removes the entry for a key, returning its value if it was present.
    ///
    /// `remove(..).is_some()` is the "was it deleted" answer: `true` exactly
    /// once per prior insert until the key is inserted again. Removal never
    /// shrinks the table; capacity is monotonically non-decreasing.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: TableKey + ?Sized,
    {
        let index = self.route(key);
        let chain = self.buckets.get_mut(index)?;
        let position = chain.iter().position(|entry| entry.0.borrow() == key)?;

        self.size = self.size.saturating_sub(1);
        Some(chain.remove(position).1)
    }

    /// Returns the number of entries in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns true if the table holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the number of buckets. Always odd, never decreases.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the current load factor, computed fresh from the latest
    /// `size` and capacity.
    #[must_use]
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    pub fn load_factor(&self) -> f64 {
        self.size as f64 / self.buckets.len() as f64
    }

    /// Rebuilds the table at `2 * capacity + 1` buckets.
    ///
    /// A full rebuild, not an in-place rehash: the old buckets are moved out
    /// wholesale, a fresh hasher is drawn for the new capacity from the
    /// table-owned RNG, and every entry is re-inserted in old-bucket then
    /// chain order so each one recomputes its index under the new hasher.
    /// After reinserting `n` entries the load factor is `n / (2n + 1)`, below
    /// the threshold, so the rebuild never cascades.
    fn resize(&mut self) {
        let new_capacity = self.capacity().saturating_mul(2).saturating_add(1);

        self.hasher = UniversalHasher::from_rng(new_capacity, DEFAULT_PRIME, &mut self.rng);
        let old_buckets = mem::replace(&mut self.buckets, Self::empty_buckets(new_capacity));
        self.size = 0;

        for chain in old_buckets {
            for (key, value) in chain {
                self.insert_entry(key, value);
            }
        }
    }

    /// Returns a borrowing iterator over the entries in bucket-then-chain
    /// order. The order is an implementation detail, not a guarantee.
    #[must_use]
    #[allow(clippy::iter_without_into_iter)]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter { buckets: &self.buckets, bucket: 0, position: 0 }
    }

    /// Removes every entry while keeping the current capacity and hasher.
    pub fn clear(&mut self) {
        for chain in &mut self.buckets {
            chain.clear();
        }
        self.size = 0;
    }
}

/// Lists each non-empty bucket with its chain contents, one per line.
/// Diagnostic output only; the exact format is not a stable contract.
impl<K, V> fmt::Display for ChainedHashMap<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, chain) in self.buckets.iter().enumerate() {
            if !chain.is_empty() {
                writeln!(f, "Bucket {index}: {chain:?}")?;
            }
        }
        Ok(())
    }
}

/// Iterator over the entries of a [`ChainedHashMap`].
#[derive(Debug, Clone)]
pub struct Iter<'a, K, V> {
    /// The chains being walked.
    buckets: &'a [Vec<(K, V)>],
    /// Index of the current bucket.
    bucket: usize,
    /// Position within the current bucket's chain.
    position: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(chain) = self.buckets.get(self.bucket) {
            if let Some(entry) = chain.get(self.position) {
                self.position = self.position.saturating_add(1);
                return Some((&entry.0, &entry.1));
            }
            self.bucket = self.bucket.saturating_add(1);
            self.position = 0;
        }
        None
    }
}
