use std::{
    collections::HashMap,
    hash::Hash,
    sync::{Arc, Mutex, MutexGuard},
};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

type LockMap<K> = HashMap<K, Arc<AsyncMutex<()>>>;

/// Async mutex per key. Entries are dropped once nobody holds or waits on
/// them.
pub struct KeyLocks<K> {
    locks: Arc<Mutex<LockMap<K>>>,
}

impl<K> Clone for KeyLocks<K> {
    fn clone(&self) -> Self {
        Self {
            locks: self.locks.clone(),
        }
    }
}

impl<K> Default for KeyLocks<K> {
    fn default() -> Self {
        Self {
            locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl<K> KeyLocks<K>
where
    K: Eq + Hash + Clone,
{
    fn map(&self) -> MutexGuard<'_, LockMap<K>> {
        match self.locks.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    pub async fn lock(&self, key: &K) -> KeyGuard<K> {
        let lock = self.map().entry(key.clone()).or_default().clone();
        let guard = lock.lock_owned().await;
        KeyGuard {
            key: key.clone(),
            locks: self.clone(),
            guard: Some(guard),
        }
    }

    pub fn len(&self) -> usize {
        self.map().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub struct KeyGuard<K>
where
    K: Eq + Hash + Clone,
{
    key: K,
    locks: KeyLocks<K>,
    guard: Option<OwnedMutexGuard<()>>,
}

impl<K> Drop for KeyGuard<K>
where
    K: Eq + Hash + Clone,
{
    fn drop(&mut self) {
        drop(self.guard.take());
        let mut map = self.locks.map();
        // Only the map still holds it once no other caller is waiting.
        if map
            .get(&self.key)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            map.remove(&self.key);
        }
    }
}
