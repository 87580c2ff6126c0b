// ==============================================
// LRU-K CACHE CONCURRENCY TESTS (integration)
// ==============================================
//
// LrukCache serializes every call through one mutex. These tests hammer a
// shared instance from several threads and check that the result is some
// sequential interleaving: capacity holds, the clock counts exactly the
// successful calls, and the structure stays self-consistent.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

use lrukit::error::CacheError;
use lrukit::policy::lru_k::{LrukCache, Tier};
use lrukit::traits::KeyValueCache;

const THREADS: usize = 8;

// ==============================================
// Clock accounting
// ==============================================

mod clock_accounting {
    use super::*;

    #[test]
    fn clock_equals_successful_calls() {
        let cache = LrukCache::new(32, 2);
        let successes = Arc::new(AtomicU64::new(0));
        let barrier = Arc::new(Barrier::new(THREADS));

        let handles: Vec<_> = (0..THREADS)
            .map(|t| {
                let cache = cache.clone();
                let successes = successes.clone();
                let barrier = barrier.clone();
                thread::spawn(move || {
                    barrier.wait();
                    for i in 0..500i64 {
                        let key = (i * 31 + t as i64) % 64;
                        let result = if i % 3 == 0 {
                            cache.set(key, i)
                        } else {
                            cache.get(key)
                        };
                        match result {
                            Ok(_) => {
                                successes.fetch_add(1, Ordering::Relaxed);
                            },
                            Err(CacheError::KeyNotFound(k)) => assert_eq!(k, key),
                            Err(other) => panic!("unexpected error: {other}"),
                        }
                    }
                })
            })
            .collect();

        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(cache.clock(), successes.load(Ordering::Relaxed));
        assert!(cache.len() <= 32);
        cache.check_invariants().unwrap();
    }
}

// ==============================================
// Capacity under contention
// ==============================================

mod capacity {
    use super::*;

    #[test]
    fn disjoint_writers_never_exceed_capacity() {
        let cache = LrukCache::new(50, 3);
        let barrier = Arc::new(Barrier::new(THREADS + 1));

        let writers: Vec<_> = (0..THREADS)
            .map(|t| {
                let cache = cache.clone();
                let barrier = barrier.clone();
                thread::spawn(move || {
                    barrier.wait();
                    for i in 0..1_000i64 {
                        cache.set(t as i64 * 10_000 + i, i).unwrap();
                    }
                })
            })
            .collect();

        let observer = {
            let cache = cache.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                for _ in 0..1_000 {
                    let (len, capacity) = cache.with_core(|core| (core.len(), core.capacity()));
                    assert!(len <= capacity);
                }
            })
        };

        for w in writers {
            w.join().unwrap();
        }
        observer.join().unwrap();

        assert_eq!(cache.len(), 50);
        cache.check_invariants().unwrap();
    }
}

// ==============================================
// Promotion stays one-way
// ==============================================

mod promotion {
    use super::*;

    #[test]
    fn hot_keys_stay_hot_while_readers_race() {
        let cache = LrukCache::new(16, 2);
        for key in 0..4 {
            cache.set(key, key).unwrap();
            cache.get(key).unwrap();
            assert_eq!(cache.tier(key), Some(Tier::Hot));
        }

        let barrier = Arc::new(Barrier::new(THREADS));
        let handles: Vec<_> = (0..THREADS)
            .map(|t| {
                let cache = cache.clone();
                let barrier = barrier.clone();
                thread::spawn(move || {
                    barrier.wait();
                    for i in 0..300i64 {
                        // every churn key is new, so a cold victim always exists
                        let key = 1_000 + t as i64 * 10_000 + i;
                        cache.set(key, i).unwrap();
                        assert_eq!(cache.get(i % 4).map(|_| ()), Ok(()));
                    }
                })
            })
            .collect();

        for h in handles {
            h.join().unwrap();
        }

        for key in 0..4 {
            assert_eq!(cache.tier(key), Some(Tier::Hot));
        }
        cache.check_invariants().unwrap();
    }

    #[test]
    fn trait_objects_share_state_across_threads() {
        let cache: Arc<dyn KeyValueCache> = Arc::new(LrukCache::new(8, 2));
        let barrier = Arc::new(Barrier::new(2));

        let writer = {
            let cache = cache.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                cache.set(1, 11).unwrap();
                barrier.wait();
            })
        };
        barrier.wait();
        writer.join().unwrap();

        assert_eq!(cache.get(1), Ok(11));
    }
}
