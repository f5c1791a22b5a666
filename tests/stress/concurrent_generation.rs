//! Stress test: many threads generate keys at once, each with its own
//! cache. Keys must be well formed and never collide.

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use keygen::{BitCache, KeyBuilder, KeyRequest, Preset};

#[test]
fn stress_parallel_generation_shared_request() {
    let request = Arc::new(
        KeyBuilder::new()
            .preset(Preset::Base58)
            .min_entropy(128)
            .build()
            .expect("config should be valid"),
    );

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let request = Arc::clone(&request);
            thread::spawn(move || {
                (0..500)
                    .map(|_| request.generate().expect("generation should succeed").into_string())
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut seen = HashSet::new();
    for handle in handles {
        for key in handle.join().expect("thread panicked") {
            assert_eq!(key.chars().count(), request.key_length());
            assert!(key.chars().all(|c| request.charset().contains(c)));
            assert!(seen.insert(key), "duplicate key across threads");
        }
    }
    assert_eq!(seen.len(), 8 * 500);
}

#[test]
fn stress_per_thread_cache_reuse() {
    let request = KeyRequest::default();

    thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                let mut cache = BitCache::new();
                for _ in 0..1000 {
                    let key = request.generate_with(&mut cache).unwrap();
                    assert_eq!(key.char_count(), 22);
                }
                // 22 six-bit draws per key, ten draws per refill, plus rejections.
                assert!(cache.refills() >= 1000 * 22 / 10);
                assert!(cache.refills() < 1000 * 22 / 5);
            });
        }
    });
}

#[test]
fn stress_10000_sequential_keys_unique() {
    let request = KeyRequest::default();
    let mut seen = HashSet::new();

    for i in 0..10_000 {
        let key = request.generate().unwrap().into_string();
        assert!(seen.insert(key), "duplicate key at iteration {i}");
    }
}
