//! MemTable Tests
//!
//! Tests verify:
//! - Basic put/lookup operations
//! - Three-way lookup results (found / tombstone / absent)
//! - Size tracking
//! - Sorted iteration
//! - Concurrent access patterns

use std::sync::Arc;
use std::thread;

use bytes::Bytes;
use minilsm::memtable::{Lookup, MemTable, MemTableEntry};

fn b(s: &'static [u8]) -> Bytes {
    Bytes::from_static(s)
}

// =============================================================================
// Basic Operations Tests
// =============================================================================

#[test]
fn test_new_memtable_is_empty() {
    let memtable = MemTable::new();
    assert_eq!(memtable.entry_count(), 0);
    assert_eq!(memtable.size(), 0);
    assert!(memtable.is_empty());
}

#[test]
fn test_put_and_lookup() {
    let memtable = MemTable::new();

    memtable.put(b(b"key1"), b(b"value1"));

    assert_eq!(memtable.lookup(b"key1"), Lookup::Found(b(b"value1")));
    assert_eq!(
        memtable.get(b"key1"),
        Some(MemTableEntry::Value(b(b"value1")))
    );
}

#[test]
fn test_lookup_nonexistent_key_is_absent() {
    let memtable = MemTable::new();

    assert_eq!(memtable.lookup(b"nonexistent"), Lookup::Absent);
    assert_eq!(memtable.get(b"nonexistent"), None);
}

#[test]
fn test_put_overwrites_existing() {
    let memtable = MemTable::new();

    memtable.put(b(b"key1"), b(b"value1"));
    memtable.put(b(b"key1"), b(b"value2"));

    assert_eq!(memtable.entry_count(), 1);
    assert_eq!(memtable.lookup(b"key1"), Lookup::Found(b(b"value2")));
}

// =============================================================================
// Delete / Tombstone Tests
// =============================================================================

#[test]
fn test_delete_creates_tombstone() {
    let memtable = MemTable::new();

    memtable.put(b(b"key1"), b(b"value1"));
    memtable.delete(b(b"key1"));

    assert_eq!(memtable.lookup(b"key1"), Lookup::Tombstone);
    assert_eq!(memtable.entry_count(), 1); // Tombstone still counts as entry
}

#[test]
fn test_delete_nonexistent_key() {
    let memtable = MemTable::new();

    memtable.delete(b(b"nonexistent"));

    assert_eq!(memtable.lookup(b"nonexistent"), Lookup::Tombstone);
    assert_eq!(memtable.entry_count(), 1);
}

#[test]
fn test_tombstone_is_not_absent() {
    let memtable = MemTable::new();

    memtable.delete(b(b"gone"));

    assert_ne!(memtable.lookup(b"gone"), Lookup::Absent);
    assert_eq!(memtable.lookup(b"never"), Lookup::Absent);
}

#[test]
fn test_put_after_delete() {
    let memtable = MemTable::new();

    memtable.put(b(b"key1"), b(b"value1"));
    memtable.delete(b(b"key1"));
    memtable.put(b(b"key1"), b(b"value2"));

    assert_eq!(memtable.lookup(b"key1"), Lookup::Found(b(b"value2")));
}

// =============================================================================
// Size Tracking Tests
// =============================================================================

#[test]
fn test_size_tracking_put() {
    let memtable = MemTable::new();

    let returned = memtable.put(b(b"key"), b(b"value"));

    let expected_size = b"key".len() + b"value".len();
    assert_eq!(returned, expected_size);
    assert_eq!(memtable.size(), expected_size);
}

#[test]
fn test_size_tracking_multiple_puts() {
    let memtable = MemTable::new();

    memtable.put(b(b"key1"), b(b"value1"));
    memtable.put(b(b"key2"), b(b"value2"));

    let expected_size = (b"key1".len() + b"value1".len()) + (b"key2".len() + b"value2".len());
    assert_eq!(memtable.size(), expected_size);
}

#[test]
fn test_size_tracking_overwrite_accumulates() {
    let memtable = MemTable::new();

    memtable.put(b(b"key"), b(b"short"));
    let size_after_first = memtable.size();

    memtable.put(b(b"key"), b(b"much_longer_value"));
    let size_after_second = memtable.size();

    // Overwrites are charged again; the counter never shrinks
    assert_eq!(size_after_first, b"key".len() + b"short".len());
    assert_eq!(
        size_after_second,
        size_after_first + b"key".len() + b"much_longer_value".len()
    );
}

#[test]
fn test_size_tracking_delete() {
    let memtable = MemTable::new();

    memtable.put(b(b"key"), b(b"value"));
    let size_after_put = memtable.size();

    let returned = memtable.delete(b(b"key"));

    assert_eq!(returned, size_after_put);
    assert_eq!(memtable.size(), size_after_put);
}

#[test]
fn test_tombstones_alone_add_no_size() {
    let memtable = MemTable::new();

    memtable.delete(b(b"a"));
    memtable.delete(b(b"b"));

    assert_eq!(memtable.size(), 0);
    assert!(!memtable.is_empty());
}

#[test]
fn test_size_is_monotonic() {
    let memtable = MemTable::new();
    let mut last = memtable.size();

    for i in 0..100u32 {
        let key = Bytes::from(format!("key{}", i % 10));
        if i % 3 == 0 {
            memtable.delete(key);
        } else {
            memtable.put(key, Bytes::from(format!("v{}", i)));
        }
        let now = memtable.size();
        assert!(now >= last);
        last = now;
    }
}

// =============================================================================
// Should Rotate Tests
// =============================================================================

#[test]
fn test_should_rotate_under_limit() {
    let memtable = MemTable::new();

    memtable.put(b(b"key"), b(b"value"));

    assert!(!memtable.should_rotate(1000));
}

#[test]
fn test_should_rotate_at_and_over_limit() {
    let memtable = MemTable::new();

    memtable.put(b(b"key"), b(b"value"));

    let size = memtable.size();
    assert!(memtable.should_rotate(size - 1));
    assert!(memtable.should_rotate(size));
}

// =============================================================================
// Iteration Tests
// =============================================================================

#[test]
fn test_entries_empty() {
    let memtable = MemTable::new();

    assert!(memtable.entries().is_empty());
}

#[test]
fn test_entries_sorted_order() {
    let memtable = MemTable::new();

    // Insert in random order
    memtable.put(b(b"cherry"), b(b"3"));
    memtable.put(b(b"apple"), b(b"1"));
    memtable.put(b(b"banana"), b(b"2"));

    let entries = memtable.entries();

    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].0, b(b"apple"));
    assert_eq!(entries[1].0, b(b"banana"));
    assert_eq!(entries[2].0, b(b"cherry"));
}

#[test]
fn test_entries_include_tombstones() {
    let memtable = MemTable::new();

    memtable.put(b(b"key1"), b(b"value1"));
    memtable.delete(b(b"key2"));
    memtable.put(b(b"key3"), b(b"value3"));

    let entries = memtable.entries();

    assert_eq!(entries.len(), 3);
    assert!(matches!(entries[0].1, MemTableEntry::Value(_)));
    assert!(matches!(entries[1].1, MemTableEntry::Tombstone));
    assert!(matches!(entries[2].1, MemTableEntry::Value(_)));
}

#[test]
fn test_entries_are_a_snapshot() {
    let memtable = MemTable::new();

    memtable.put(b(b"key"), b(b"value"));

    let entries = memtable.entries();

    memtable.put(b(b"key"), b(b"modified"));

    assert_eq!(entries[0].1, MemTableEntry::Value(b(b"value")));
}

#[test]
fn test_lexicographic_byte_order() {
    let memtable = MemTable::new();

    memtable.put(b(b"b"), b(b"2"));
    memtable.put(b(b"ab"), b(b"1"));
    memtable.put(b(b"\xff"), b(b"4"));
    memtable.put(b(b"ba"), b(b"3"));

    let keys: Vec<Bytes> = memtable.entries().into_iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec![b(b"ab"), b(b"b"), b(b"ba"), b(b"\xff")]);
}

// =============================================================================
// Edge Cases
// =============================================================================

#[test]
fn test_empty_key() {
    let memtable = MemTable::new();

    memtable.put(Bytes::new(), b(b"value"));

    assert_eq!(memtable.lookup(b""), Lookup::Found(b(b"value")));
}

#[test]
fn test_empty_value() {
    let memtable = MemTable::new();

    memtable.put(b(b"key"), Bytes::new());

    // An empty value is still a value, not a delete
    assert_eq!(memtable.lookup(b"key"), Lookup::Found(Bytes::new()));
    assert_eq!(memtable.size(), b"key".len());
}

#[test]
fn test_large_value() {
    let memtable = MemTable::new();

    let large_value = Bytes::from(vec![0xAB; 1024 * 1024]); // 1 MB
    memtable.put(b(b"big_key"), large_value.clone());

    match memtable.lookup(b"big_key") {
        Lookup::Found(v) => assert_eq!(v, large_value),
        other => panic!("Expected Found, got {:?}", other),
    }
}

#[test]
fn test_many_entries() {
    let memtable = MemTable::new();

    for i in 0..1000 {
        let key = Bytes::from(format!("key{:04}", i));
        let value = Bytes::from(format!("value{}", i));
        memtable.put(key, value);
    }

    assert_eq!(memtable.entry_count(), 1000);

    let entries = memtable.entries();
    for i in 0..999 {
        assert!(entries[i].0 < entries[i + 1].0);
    }
}

// =============================================================================
// Concurrent Access Tests
// =============================================================================

#[test]
fn test_concurrent_reads() {
    let memtable = Arc::new(MemTable::new());
    memtable.put(b(b"key"), b(b"value"));

    let mut handles = vec![];

    for _ in 0..10 {
        let mt = Arc::clone(&memtable);
        let handle = thread::spawn(move || {
            for _ in 0..100 {
                assert_eq!(mt.lookup(b"key"), Lookup::Found(b(b"value")));
            }
        });
        handles.push(handle);
    }

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_concurrent_writes() {
    let memtable = Arc::new(MemTable::new());

    let mut handles = vec![];

    for i in 0..10 {
        let mt = Arc::clone(&memtable);
        let handle = thread::spawn(move || {
            for j in 0..10 {
                let key = Bytes::from(format!("key{}_{}", i, j));
                let value = Bytes::from(format!("value{}_{}", i, j));
                mt.put(key, value);
            }
        });
        handles.push(handle);
    }

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(memtable.entry_count(), 100);

    // Every write is charged exactly once
    let expected: usize = (0..10)
        .flat_map(|i| (0..10).map(move |j| (i, j)))
        .map(|(i, j)| format!("key{}_{}", i, j).len() + format!("value{}_{}", i, j).len())
        .sum();
    assert_eq!(memtable.size(), expected);
}

#[test]
fn test_concurrent_reads_and_writes() {
    let memtable = Arc::new(MemTable::new());
    memtable.put(b(b"stable"), b(b"value"));

    let mut handles = vec![];

    for i in 0..4 {
        let mt = Arc::clone(&memtable);
        handles.push(thread::spawn(move || {
            for j in 0..200 {
                let key = Bytes::from(format!("w{}_{}", i, j));
                if j % 2 == 0 {
                    mt.put(key, b(b"x"));
                } else {
                    mt.delete(key);
                }
            }
        }));
    }

    for _ in 0..4 {
        let mt = Arc::clone(&memtable);
        handles.push(thread::spawn(move || {
            for _ in 0..200 {
                assert_eq!(mt.lookup(b"stable"), Lookup::Found(b(b"value")));
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(memtable.entry_count(), 1 + 4 * 200);
}
