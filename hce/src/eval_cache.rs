use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Mutex, MutexGuard, PoisonError,
};

use ahash::AHashMap;

pub const EVAL_CACHE_CAPACITY: usize = 10_000;
pub const EVAL_CACHE_SHARDS: usize = 16;

/// Board-hash keyed evaluation cache shared by every search thread.
///
/// Keys are spread over mutex-guarded shards so pool threads rarely wait on each
/// other. Once `capacity` entries are resident, new positions are no longer
/// inserted; resident entries stay until [`EvalCache::clear`]. Racing inserts can
/// overshoot the capacity by at most one entry per thread.
pub struct EvalCache {
    shards: Box<[Mutex<AHashMap<u64, i32>>]>,
    len: AtomicUsize,
    capacity: usize,
}

impl EvalCache {
    pub fn new(capacity: usize) -> Self {
        Self::with_shards(capacity, EVAL_CACHE_SHARDS)
    }

    pub fn with_shards(capacity: usize, shards: usize) -> Self {
        let shards = shards.max(1);
        let per_shard = capacity.div_ceil(shards);
        Self {
            shards: (0..shards)
                .map(|_| Mutex::new(AHashMap::with_capacity(per_shard)))
                .collect(),
            len: AtomicUsize::new(0),
            capacity,
        }
    }

    pub fn get(&self, key: u64) -> Option<i32> {
        self.shard(key).get(&key).copied()
    }

    pub fn insert(&self, key: u64, score: i32) {
        let mut shard = self.shard(key);
        if let Some(resident) = shard.get_mut(&key) {
            *resident = score;
            return;
        }
        if self.len.load(Ordering::Relaxed) >= self.capacity {
            return;
        }

        shard.insert(key, score);
        self.len.fetch_add(1, Ordering::Relaxed);
    }

    pub fn len(&self) -> usize {
        self.len.load(Ordering::Relaxed)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        for shard in self.shards.iter() {
            let mut shard = lock(shard);
            self.len.fetch_sub(shard.len(), Ordering::Relaxed);
            shard.clear();
        }
    }

    fn shard(&self, key: u64) -> MutexGuard<'_, AHashMap<u64, i32>> {
        let idx = ((key ^ (key >> 32)) as usize) % self.shards.len();
        lock(&self.shards[idx])
    }
}

// Entries are plain values, so a poisoned shard is still consistent
fn lock(shard: &Mutex<AHashMap<u64, i32>>) -> MutexGuard<'_, AHashMap<u64, i32>> {
    shard.lock().unwrap_or_else(PoisonError::into_inner)
}
