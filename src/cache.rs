//! Bounded, insertion-ordered entity cache.

use std::{hash::Hash, num::NonZeroUsize};

use bon::bon;
use indexmap::IndexMap;

/// Caller-supplied predicate deciding whether a value is worth retaining.
pub type AdmissionFilter<V> = Box<dyn Fn(&V) -> bool + Send + Sync>;

/// Normalization of a raw ID, an entity, or a richer object carrying an ID, to a cache key.
///
/// Implemented by the entity objects themselves, so lookups accept whatever reference
/// the caller already holds. The result is `None` when the carrier has no ID to offer,
/// for example a channel post without a sender.
pub trait EntityRef<K> {
    fn entity_id(&self) -> Option<K>;
}

impl EntityRef<i64> for i64 {
    fn entity_id(&self) -> Option<i64> {
        Some(*self)
    }
}

impl<K, T: EntityRef<K> + ?Sized> EntityRef<K> for &T {
    fn entity_id(&self) -> Option<K> {
        (**self).entity_id()
    }
}

/// Keyed store memoizing constructed entities, bounded to keep long-running
/// processes from growing without limit.
///
/// Eviction is FIFO: when a new key arrives at capacity, the oldest-*inserted*
/// entry goes, regardless of how recently it was read. Losing an entry is never
/// a correctness problem here, only a lost memoization, so no operation ever
/// fails: absence is `None` or `false`.
#[must_use]
pub struct BoundedCache<K, V> {
    entries: IndexMap<K, V>,

    max_size: Option<NonZeroUsize>,

    filter: Option<AdmissionFilter<V>>,
}

#[bon]
impl<K: Hash + Eq, V: Clone> BoundedCache<K, V> {
    /// Build a new cache.
    ///
    /// A `size` of zero means «unbounded», same as leaving it unset. The permissive
    /// reading keeps a misconfigured bound from silently disabling memoization.
    #[builder]
    pub fn new(size: Option<usize>, filter: Option<AdmissionFilter<V>>) -> Self {
        Self {
            entries: IndexMap::new(),
            max_size: size.and_then(NonZeroUsize::new),
            filter,
        }
    }

    /// Insert or overwrite the entry, and hand the value back.
    ///
    /// When the admission filter rejects the value, it is returned without being
    /// stored: a cache miss by design, not an error. Overwriting an existing key
    /// never evicts, the key already counts towards the size.
    pub fn add(&mut self, key: K, value: V) -> V {
        if let Some(filter) = &self.filter {
            if !filter(&value) {
                return value;
            }
        }
        if let Some(max_size) = self.max_size {
            if self.entries.len() >= max_size.get() && !self.entries.contains_key(&key) {
                self.entries.shift_remove_index(0);
            }
        }
        self.entries.insert(key, value.clone());
        value
    }

    /// Delete the entry if present. Returns whether a deletion occurred.
    pub fn remove(&mut self, key: &K) -> bool {
        self.entries.shift_remove(key).is_some()
    }

    /// Look the entity up by anything that normalizes to its key.
    ///
    /// Strictly a read path: the cache is never mutated, a miss is `None`.
    #[must_use]
    pub fn resolve(&self, entity_ref: &impl EntityRef<K>) -> Option<V> {
        self.entries.get(&entity_ref.entity_id()?).cloned()
    }

    /// Same normalization as [`Self::resolve`], without the lookup.
    #[must_use]
    pub fn resolve_id(&self, entity_ref: &impl EntityRef<K>) -> Option<K> {
        entity_ref.entity_id()
    }

    /// Iterate the entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unbounded() -> BoundedCache<i64, &'static str> {
        BoundedCache::builder().build()
    }

    #[test]
    fn add_then_resolve_ok() {
        let mut cache = unbounded();
        cache.add(1, "u1");
        assert_eq!(cache.resolve(&1), Some("u1"));
        assert_eq!(cache.resolve(&2), None);
    }

    #[test]
    fn fifo_eviction_ok() {
        let mut cache = BoundedCache::builder().size(1).build();
        cache.add(1, "u1");
        cache.add(2, "u2");
        assert_eq!(cache.resolve(&1), None);
        assert_eq!(cache.resolve(&2), Some("u2"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn eviction_is_insertion_ordered_not_lru() {
        let mut cache = BoundedCache::builder().size(2).build();
        cache.add(1, "u1");
        cache.add(2, "u2");
        // Reading the oldest entry must not save it from eviction.
        assert_eq!(cache.resolve(&1), Some("u1"));
        cache.add(3, "u3");
        assert_eq!(cache.resolve(&1), None);
        assert_eq!(cache.resolve(&2), Some("u2"));
        assert_eq!(cache.resolve(&3), Some("u3"));
    }

    #[test]
    fn size_never_exceeds_bound() {
        let mut cache = BoundedCache::builder().size(3).build();
        for key in 0..100 {
            cache.add(key, "value");
            assert!(cache.len() <= 3);
        }
    }

    #[test]
    fn overwrite_does_not_evict() {
        let mut cache = BoundedCache::builder().size(2).build();
        cache.add(1, "u1");
        cache.add(2, "u2");
        cache.add(1, "u1-bis");
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.resolve(&1), Some("u1-bis"));
        assert_eq!(cache.resolve(&2), Some("u2"));
    }

    #[test]
    fn zero_size_means_unbounded() {
        let mut cache = BoundedCache::builder().size(0).build();
        for key in 0..100 {
            cache.add(key, "value");
        }
        assert_eq!(cache.len(), 100);
    }

    #[test]
    fn admission_filter_rejects_but_returns() {
        let mut cache = BoundedCache::builder()
            .filter(Box::new(|value: &&str| !value.is_empty()) as AdmissionFilter<&str>)
            .build();
        assert_eq!(cache.add(1, ""), "");
        assert_eq!(cache.resolve(&1), None);
        assert_eq!(cache.add(2, "u2"), "u2");
        assert_eq!(cache.resolve(&2), Some("u2"));
    }

    #[test]
    fn remove_reports_presence() {
        let mut cache = unbounded();
        cache.add(1, "u1");
        assert!(cache.remove(&1));
        assert!(!cache.remove(&1));
        assert_eq!(cache.resolve(&1), None);
    }

    #[test]
    fn iteration_is_insertion_ordered_and_lazy() {
        let mut cache = unbounded();
        cache.add(3, "u3");
        cache.add(1, "u1");
        cache.add(2, "u2");
        let keys: Vec<i64> = cache.iter().map(|(key, _)| *key).collect();
        assert_eq!(keys, [3, 1, 2]);
        // Early termination needs no materialization of the rest.
        assert_eq!(cache.iter().next().map(|(key, _)| *key), Some(3));
    }
}
