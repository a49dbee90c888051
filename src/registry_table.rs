//! Lock-protected registration table.
//!
//! Each operation takes the table lock for exactly one lookup or mutation and releases it
//! before returning. Nothing caller-supplied runs while the lock is held, so factories may
//! call back into the container. Removed instances are dropped only after the guard is
//! released, since an instance's `Drop` may itself touch the container.

use std::any::Any;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::registry_key::RegistryKey;
use crate::{BoxError, Container};

/// Type-erased instance. The payload is always an `Arc<T>` for the entry's contract `T`,
/// which keeps unsized contracts (`dyn Trait`) storable behind `dyn Any`.
pub(crate) type Instance = Arc<dyn Any + Send + Sync>;

/// Type-erased factory.
pub(crate) type ErasedFactory =
    Arc<dyn Fn(&Container) -> Result<Instance, BoxError> + Send + Sync + 'static>;

struct Entry {
    factory: ErasedFactory,
    cached: Option<Instance>,
    generation: u64,
}

/// Copy of an entry taken under the lock.
pub(crate) struct EntrySnapshot {
    pub(crate) factory: ErasedFactory,
    pub(crate) cached: Option<Instance>,
    pub(crate) generation: u64,
}

/// Returned by [`RegistryTable::try_insert`] when the key is taken.
#[derive(Debug)]
pub(crate) struct Occupied;

#[derive(Default)]
pub(crate) struct RegistryTable {
    entries: RwLock<HashMap<RegistryKey, Entry>>,
    next_generation: AtomicU64,
}

impl RegistryTable {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Inserts a fresh entry unless `key` already has one.
    pub(crate) fn try_insert(
        &self,
        key: RegistryKey,
        factory: ErasedFactory,
    ) -> Result<(), Occupied> {
        let mut entries = self.entries.write();
        if entries.contains_key(&key) {
            return Err(Occupied);
        }

        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
        entries.insert(
            key,
            Entry {
                factory,
                cached: None,
                generation,
            },
        );
        Ok(())
    }

    /// Removes the entry for `key`, factory and cached instance alike.
    pub(crate) fn remove(&self, key: &RegistryKey) -> bool {
        let removed = self.entries.write().remove(key);
        removed.is_some()
    }

    /// Drops the cached instance of `key`, keeping the factory.
    ///
    /// Returns `false` when there is no entry or the entry holds no cached instance.
    pub(crate) fn clear_cache(&self, key: &RegistryKey) -> bool {
        let released = self
            .entries
            .write()
            .get_mut(key)
            .and_then(|entry| entry.cached.take());
        released.is_some()
    }

    pub(crate) fn snapshot(&self, key: &RegistryKey) -> Option<EntrySnapshot> {
        self.entries.read().get(key).map(|entry| EntrySnapshot {
            factory: Arc::clone(&entry.factory),
            cached: entry.cached.clone(),
            generation: entry.generation,
        })
    }

    /// Publishes `instance` as the cached instance of `key`.
    ///
    /// The write happens only if the entry still carries `generation` and nothing is cached
    /// yet. Returns whatever is cached afterwards; if the entry vanished or was replaced by a
    /// newer registration, the caller's own instance comes back uncached.
    pub(crate) fn set_cache_if_absent(
        &self,
        key: &RegistryKey,
        generation: u64,
        instance: Instance,
    ) -> Instance {
        let mut entries = self.entries.write();
        match entries.get_mut(key) {
            Some(entry) if entry.generation == generation => match &entry.cached {
                Some(cached) => Arc::clone(cached),
                None => {
                    entry.cached = Some(Arc::clone(&instance));
                    instance
                }
            },
            _ => instance,
        }
    }

    pub(crate) fn contains(&self, key: &RegistryKey) -> bool {
        self.entries.read().contains_key(key)
    }

    pub(crate) fn is_cached(&self, key: &RegistryKey) -> bool {
        self.entries
            .read()
            .get(key)
            .is_some_and(|entry| entry.cached.is_some())
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub(crate) fn clear(&self) {
        let drained: Vec<Entry> = self.entries.write().drain().map(|(_, e)| e).collect();
        drop(drained);
    }
}
