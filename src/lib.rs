//! # Chainmap
//!
//! A Rust implementation of a separate-chaining hash table with universal
//! hashing for integer keys.
//!
//! Every table owns one randomly drawn member of an affine universal hash
//! family, `((a*k + b) mod p) mod capacity`. Because `a` and `b` are unknown
//! to whoever picks the keys, no fixed key sequence can force long chains in
//! expectation, which is the table's defense against adversarial workloads.
//! When the load factor climbs past 0.75 the table rebuilds itself at
//! `2 * capacity + 1` buckets under a freshly drawn hash function.
//!
//! Non-integer keys are accepted through a generic fallback hash with no
//! adversarial-resistance guarantee; see [`TableKey`] for how keys are
//! routed.
//!
//! ## Basic Usage
//!
//! ```rust
//! use chainmap::ChainedHashMap;
//!
//! // Create a new table (11 buckets to start)
//! let mut map = ChainedHashMap::new();
//!
//! // Insert values
//! map.insert(1_i64, "one");
//! map.insert(2, "two");
//!
//! // Retrieve values
//! assert_eq!(map.get(&1), Some(&"one"));
//!
//! // Update values in place
//! map.insert(1, "uno");
//! assert_eq!(map.get(&1), Some(&"uno"));
//! assert_eq!(map.len(), 2);
//!
//! // Remove values
//! assert_eq!(map.remove(&1), Some("uno"));
//! assert_eq!(map.get(&1), None);
//! ```
//!
//! ## Growth
//!
//! ```rust
//! use chainmap::ChainedHashMap;
//!
//! let mut map = ChainedHashMap::new();
//! for key in 0..20_i64 {
//!     map.insert(key, key * key);
//! }
//!
//! // 20 entries no longer fit 11 buckets at a 0.75 load factor, so the
//! // table has grown; capacity stays odd and every entry survives.
//! assert!(map.capacity() > 11);
//! assert_eq!(map.capacity() % 2, 1);
//! assert!(map.load_factor() <= 0.75);
//! assert_eq!(map.get(&5), Some(&25));
//! ```
//!
//! ## Reproducible hashing
//!
//! The coefficients of every hash function a table draws come from a
//! table-owned randomness source. Seed it explicitly when a test needs the
//! same bucket layout on every run:
//!
//! ```rust
//! use chainmap::ChainedHashMap;
//!
//! let mut a = ChainedHashMap::with_seed(11, 42);
//! let mut b = ChainedHashMap::with_seed(11, 42);
//! a.insert(7_i64, ());
//! b.insert(7_i64, ());
//! assert_eq!(a.to_string(), b.to_string());
//! ```

/// Module implementing the chained hash table and its key-routing trait
mod chained_map;
/// Module implementing the affine universal hash family
mod universal_hash;
/// Utility functions and traits for the table
mod utils;

pub use chained_map::{ChainedHashMap, Iter, TableKey};
pub use universal_hash::{DEFAULT_PRIME, UniversalHasher};
pub use utils::{MapExtensions, from_iter};
