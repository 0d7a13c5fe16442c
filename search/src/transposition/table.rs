use std::mem::size_of;
use std::sync::{Mutex, MutexGuard, PoisonError};

use ahash::AHashMap;

/// A memoized minimax result.
///
/// Only authoritative for a cutoff when `depth` is at least the depth being searched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TTEntry {
    pub score: i32,
    pub depth: u32,
}

/// What happens when a store hits a fingerprint that is already present.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Replacement {
    /// Last writer wins, even if it searched shallower than the resident entry.
    Always,
    /// Overwrite only when the new result is at least as deep.
    #[default]
    DepthPreferred,
}

pub const DEFAULT_SHARDS: usize = 64;

// Number of resident entries inspected when a full shard needs a victim.
const EVICTION_SAMPLE: usize = 8;

// Approximate heap cost of one entry: key + value, doubled for hash map slack.
const ENTRY_FOOTPRINT: usize = 2 * (size_of::<u64>() + size_of::<TTEntry>());

type Shard = AHashMap<u64, TTEntry>;

/// Fingerprint-keyed cache shared by all search workers.
///
/// Each shard is guarded by its own mutex; a fingerprint always maps to the same
/// shard. `lookup` and `store` are individually atomic, but a lookup followed by a
/// store is not, so two workers may both miss and both store the same position.
///
/// <https://www.chessprogramming.org/Transposition_Table>
pub struct TranspositionTable {
    shards: Box<[Mutex<Shard>]>,
    shard_capacity: Option<usize>,
    replacement: Replacement,
}

impl TranspositionTable {
    /// Creates a table bounded to roughly `mb` megabytes.
    pub fn with_size_mb(mb: usize, shards: usize, replacement: Replacement) -> Self {
        let entries = mb.saturating_mul(1024 * 1024) / ENTRY_FOOTPRINT;
        Self::new(shards, Some(entries), replacement)
    }

    /// Creates a table that grows without bound.
    pub fn unbounded(shards: usize, replacement: Replacement) -> Self {
        Self::new(shards, None, replacement)
    }

    /// `capacity` is the total entry budget, split evenly across shards.
    pub fn new(shards: usize, capacity: Option<usize>, replacement: Replacement) -> Self {
        let shards = shards.max(1);
        let shard_capacity = capacity.map(|total| (total / shards).max(1));

        Self {
            shards: (0..shards).map(|_| Mutex::new(Shard::default())).collect(),
            shard_capacity,
            replacement,
        }
    }

    /// Returns the entry for `fingerprint` if it was searched at least `min_depth` deep.
    pub fn lookup(&self, fingerprint: u64, min_depth: u32) -> Option<TTEntry> {
        self.shard(fingerprint)
            .get(&fingerprint)
            .filter(|entry| entry.depth >= min_depth)
            .copied()
    }

    pub fn store(&self, fingerprint: u64, entry: TTEntry) {
        let mut shard = self.shard(fingerprint);

        if let Some(existing) = shard.get_mut(&fingerprint) {
            if self.replacement == Replacement::Always || entry.depth >= existing.depth {
                *existing = entry;
            }
            return;
        }

        if let Some(capacity) = self.shard_capacity {
            if shard.len() >= capacity && !evict_shallower(&mut shard, entry.depth) {
                return;
            }
        }

        shard.insert(fingerprint, entry);
    }

    pub fn clear(&self) {
        for shard in self.shards.iter() {
            lock(shard).clear();
        }
    }

    pub fn len(&self) -> usize {
        self.shards.iter().map(|shard| lock(shard).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fill rate in permille (0-1000). Always 0 for an unbounded table.
    pub fn hashfull(&self) -> u16 {
        let Some(shard_capacity) = self.shard_capacity else {
            return 0;
        };
        let capacity = shard_capacity * self.shards.len();
        ((self.len() * 1000) / capacity).min(1000) as u16
    }

    pub fn capacity(&self) -> Option<usize> {
        self.shard_capacity.map(|c| c * self.shards.len())
    }

    pub fn replacement(&self) -> Replacement {
        self.replacement
    }

    #[inline]
    fn shard(&self, fingerprint: u64) -> MutexGuard<'_, Shard> {
        let idx = ((fingerprint ^ (fingerprint >> 32)) as usize) % self.shards.len();
        lock(&self.shards[idx])
    }
}

// A panic can't happen while a shard lock is held (no foreign code runs under it),
// so a poisoned shard still holds consistent entries.
#[inline]
fn lock(shard: &Mutex<Shard>) -> MutexGuard<'_, Shard> {
    shard.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Frees a slot for an entry searched `depth` deep by removing the shallowest of a
/// few resident entries. Returns false if every sampled entry is deeper.
fn evict_shallower(shard: &mut Shard, depth: u32) -> bool {
    let victim = shard
        .iter()
        .take(EVICTION_SAMPLE)
        .min_by_key(|(_, entry)| entry.depth)
        .map(|(&key, entry)| (key, entry.depth));

    match victim {
        Some((key, victim_depth)) if victim_depth <= depth => {
            shard.remove(&key);
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn entry(score: i32, depth: u32) -> TTEntry {
        TTEntry { score, depth }
    }

    #[test]
    fn test_lookup_respects_min_depth() {
        let tt = TranspositionTable::unbounded(4, Replacement::Always);
        tt.store(42, entry(17, 5));

        assert_eq!(tt.lookup(42, 5), Some(entry(17, 5)));
        assert_eq!(tt.lookup(42, 3), Some(entry(17, 5)));
        assert_eq!(tt.lookup(42, 6), None);
        assert_eq!(tt.lookup(43, 0), None);
    }

    #[test]
    fn test_always_replace_is_last_writer_wins() {
        let tt = TranspositionTable::unbounded(4, Replacement::Always);
        tt.store(7, entry(100, 6));
        tt.store(7, entry(-20, 2));

        assert_eq!(tt.lookup(7, 0), Some(entry(-20, 2)));
        assert_eq!(tt.len(), 1);
    }

    #[test]
    fn test_depth_preferred_keeps_deeper_entry() {
        let tt = TranspositionTable::unbounded(4, Replacement::DepthPreferred);
        tt.store(7, entry(100, 6));
        tt.store(7, entry(-20, 2));
        assert_eq!(tt.lookup(7, 0), Some(entry(100, 6)));

        tt.store(7, entry(55, 6));
        assert_eq!(tt.lookup(7, 0), Some(entry(55, 6)));
    }

    #[test]
    fn test_capacity_bounds_growth() {
        let tt = TranspositionTable::new(1, Some(16), Replacement::DepthPreferred);
        for fp in 0..1000u64 {
            tt.store(fp, entry(fp as i32, (fp % 5) as u32));
        }

        assert!(tt.len() <= 16);
        assert_eq!(tt.capacity(), Some(16));
        assert_eq!(tt.hashfull(), (tt.len() * 1000 / 16) as u16);
    }

    #[test]
    fn test_full_table_keeps_deeper_entries() {
        let tt = TranspositionTable::new(1, Some(4), Replacement::DepthPreferred);
        for fp in 0..4u64 {
            tt.store(fp, entry(0, 10));
        }
        tt.store(99, entry(0, 1));

        assert_eq!(tt.lookup(99, 0), None);
        assert_eq!(tt.len(), 4);

        tt.store(100, entry(0, 12));
        assert_eq!(tt.lookup(100, 12), Some(entry(0, 12)));
        assert_eq!(tt.len(), 4);
    }

    #[test]
    fn test_clear() {
        let tt = TranspositionTable::with_size_mb(1, 8, Replacement::Always);
        for fp in 0..100u64 {
            tt.store(fp, entry(1, 1));
        }
        assert_eq!(tt.len(), 100);
        assert!(tt.hashfull() > 0);

        tt.clear();
        assert!(tt.is_empty());
        assert_eq!(tt.hashfull(), 0);
    }

    #[test]
    fn test_unbounded_reports_no_fill() {
        let tt = TranspositionTable::unbounded(2, Replacement::Always);
        tt.store(1, entry(1, 1));
        assert_eq!(tt.hashfull(), 0);
        assert_eq!(tt.capacity(), None);
    }

    #[test]
    fn test_concurrent_store_and_lookup_never_tears() {
        const THREADS: u32 = 8;
        const ITERATIONS: u32 = 5_000;
        const HOT_KEY: u64 = 0xDEAD_BEEF;

        for replacement in [Replacement::Always, Replacement::DepthPreferred] {
            let tt = TranspositionTable::new(4, Some(64), replacement);

            thread::scope(|scope| {
                for t in 0..THREADS {
                    let tt = &tt;
                    scope.spawn(move || {
                        for i in 0..ITERATIONS {
                            let depth = (t * ITERATIONS + i) % 32;
                            // Every writer keeps score == depth * 10, so any torn
                            // entry would break the relation.
                            tt.store(HOT_KEY, entry(depth as i32 * 10, depth));
                            tt.store(u64::from(i), entry(depth as i32 * 10, depth));

                            if let Some(found) = tt.lookup(HOT_KEY, 0) {
                                assert_eq!(found.score, found.depth as i32 * 10);
                            }
                            if let Some(found) = tt.lookup(u64::from(i), 0) {
                                assert_eq!(found.score, found.depth as i32 * 10);
                            }
                        }
                    });
                }
            });

            if let Some(found) = tt.lookup(HOT_KEY, 0) {
                assert_eq!(found.score, found.depth as i32 * 10);
            }
            assert!(tt.len() <= 64);
        }
    }
}
