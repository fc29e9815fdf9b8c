//! Lazily computed, cached structural hash codes.
//!
//! Built nodes are deeply immutable, so the hash of a node never changes once
//! it exists. Each node carries a [`HashCache`] that is filled on the first
//! call to `hash_code()`. The cache takes no part in equality or hashing.
//! Concurrent first calls wait for a single computation to fill the cell.

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::sync::OnceLock;

#[derive(Clone, Default)]
pub struct HashCache(OnceLock<u64>);

impl HashCache {
    pub fn get_or_compute(&self, compute: impl FnOnce() -> u64) -> u64 {
        *self.0.get_or_init(compute)
    }

    pub fn is_computed(&self) -> bool {
        self.0.get().is_some()
    }
}

impl PartialEq for HashCache {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for HashCache {}

impl fmt::Debug for HashCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.get() {
            Some(code) => write!(f, "HashCache({:#x})", code),
            None => f.write_str("HashCache(-)"),
        }
    }
}

/// Hasher used for node hash codes. Fixed keys keep codes stable for the
/// lifetime of the process.
pub fn field_hasher() -> DefaultHasher {
    DefaultHasher::new()
}

/// Implements `hash_code()` and `Hash` for a node type from its field list.
///
/// The listed fields must be exactly the fields compared by `PartialEq`,
/// in declaration order, excluding the `hash` cache itself.
macro_rules! cached_hash {
    ($ty:ty => $($field:ident),+ $(,)?) => {
        impl $ty {
            /// Structural hash code, computed on first request and cached.
            pub fn hash_code(&self) -> u64 {
                self.hash.get_or_compute(|| {
                    let mut hasher = $crate::hash::field_hasher();
                    $( ::std::hash::Hash::hash(&self.$field, &mut hasher); )+
                    ::std::hash::Hasher::finish(&hasher)
                })
            }
        }

        impl ::std::hash::Hash for $ty {
            fn hash<H: ::std::hash::Hasher>(&self, state: &mut H) {
                state.write_u64(self.hash_code());
            }
        }
    };
}

pub(crate) use cached_hash;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_is_written_once() {
        let cache = HashCache::default();
        assert!(!cache.is_computed());
        assert_eq!(cache.get_or_compute(|| 7), 7);
        assert_eq!(cache.get_or_compute(|| 9), 7);
        assert!(cache.is_computed());
    }

    #[test]
    fn cache_never_affects_equality() {
        let filled = HashCache::default();
        filled.get_or_compute(|| 42);
        assert_eq!(filled, HashCache::default());
    }
}
