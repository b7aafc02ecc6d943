//! Per-entity-kind managers over the [`BoundedCache`].

use std::sync::Arc;

use bon::Builder;

use crate::cache::{BoundedCache, EntityRef};

/// Per-entity-kind cache configuration, as consumed from the owning client.
#[derive(Builder)]
#[must_use]
pub struct CacheOptions<T> {
    /// Maximum number of cached entities. Zero or unset means unbounded.
    pub size: Option<usize>,

    /// Admission predicate: entities it rejects are constructed but not retained.
    pub filter: Option<Box<dyn Fn(&T) -> bool + Send + Sync>>,
}

impl<T> Default for CacheOptions<T> {
    fn default() -> Self {
        Self { size: None, filter: None }
    }
}

/// Manager memoizing one kind of entity (users, chats) by its platform ID.
///
/// One instance per entity kind, owned by the dispatcher. Mutation goes through
/// `&mut self`, which is exactly the single-writer discipline the shared caches
/// need: two canonical instances for the same ID must never coexist.
#[must_use]
pub struct EntityManager<T> {
    cache: BoundedCache<i64, Arc<T>>,
}

impl<T: EntityRef<i64> + 'static> EntityManager<T> {
    pub fn new(options: CacheOptions<T>) -> Self {
        let filter = options
            .filter
            .map(|filter| Box::new(move |entity: &Arc<T>| filter(entity)) as _);
        Self {
            cache: BoundedCache::builder()
                .maybe_size(options.size)
                .maybe_filter(filter)
                .build(),
        }
    }

    /// Return the canonical instance for the entity's ID, caching the given
    /// one on a miss.
    ///
    /// Repeated references to the same remote object (the same user as the
    /// sender of fifty messages) all end up sharing one local instance.
    pub fn intern(&mut self, entity: Arc<T>) -> Arc<T> {
        if let Some(canonical) = self.cache.resolve(&*entity) {
            return canonical;
        }
        match entity.entity_id() {
            Some(id) => self.cache.add(id, entity),
            // Nothing to key on; hand the instance back uncached.
            None => entity,
        }
    }

    /// Canonicalize the reference in place.
    pub fn intern_in_place(&mut self, entity: &mut Arc<T>) {
        *entity = self.intern(Arc::clone(entity));
    }

    /// Read-only view of the underlying cache.
    pub const fn cache(&self) -> &BoundedCache<i64, Arc<T>> {
        &self.cache
    }

    /// Drop the cached instance for the given ID, if any.
    pub fn remove(&mut self, id: i64) -> bool {
        self.cache.remove(&id)
    }
}

impl<T: EntityRef<i64> + 'static> Default for EntityManager<T> {
    fn default() -> Self {
        Self::new(CacheOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::User;

    fn user(id: i64) -> Arc<User> {
        Arc::new(User {
            id,
            is_bot: false,
            first_name: "Test".to_string(),
            last_name: None,
            username: None,
            language_code: None,
        })
    }

    #[test]
    fn intern_shares_one_instance_per_id() {
        let mut users = EntityManager::default();
        let first = users.intern(user(1));
        let second = users.intern(user(1));
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(users.cache().len(), 1);
    }

    #[test]
    fn intern_respects_admission_filter() {
        let options = CacheOptions::builder()
            .filter(Box::new(|user: &User| !user.is_bot) as Box<dyn Fn(&User) -> bool + Send + Sync>)
            .build();
        let mut users = EntityManager::new(options);

        let mut bot = user(1);
        Arc::get_mut(&mut bot).unwrap().is_bot = true;
        let interned = users.intern(bot);
        assert_eq!(interned.id, 1);
        assert!(users.cache().is_empty());
    }
}
