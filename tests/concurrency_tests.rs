use std::sync::mpsc;
use std::sync::Arc;
use std::thread;

use snapstore::{CowCell, ObjectLock, SnapList, SnapMap};

#[test]
fn test_concurrent_push_completeness() {
    let list: SnapList<i64> = SnapList::new();

    let mut handles = vec![];
    for n in 0..8i64 {
        let list = list.clone();
        handles.push(thread::spawn(move || {
            list.push(n);
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    // Every push survived the publish race exactly once
    let view = list.view();
    assert_eq!(view.len(), 8);
    for n in 0..8i64 {
        assert_eq!(view.iter().filter(|&&v| v == n).count(), 1);
    }
}

#[test]
fn test_concurrent_updates_never_lose_writes() {
    let cell = Arc::new(CowCell::new(0i64));

    let mut handles = vec![];
    for _ in 0..10 {
        let cell = Arc::clone(&cell);
        handles.push(thread::spawn(move || {
            for _ in 0..100 {
                cell.update(|count| *count += 1);
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(*cell.read(), 1000); // 10 threads * 100 increments
}

#[test]
fn test_concurrent_map_sets_distinct_keys() {
    let map: SnapMap<String, i64> = SnapMap::new();

    let mut handles = vec![];
    for n in 0..8i64 {
        let map = map.clone();
        handles.push(thread::spawn(move || {
            map.set(format!("key-{n}"), n);
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(map.len(), 8);
    for n in 0..8i64 {
        assert_eq!(map.get(format!("key-{n}").as_str()), n);
    }

    // The pair list stayed sorted and unique throughout
    let view = map.view();
    for window in view.windows(2) {
        assert!(window[0].0 < window[1].0);
    }
}

#[test]
fn test_snapshot_survives_concurrent_mutation() {
    let list = SnapList::from_vec(vec![1i64, 2, 3]);
    let held = list.view();

    let writer = {
        let list = list.clone();
        thread::spawn(move || {
            list.clear();
            for n in 0..100i64 {
                list.push(n);
            }
        })
    };
    writer.join().unwrap();

    assert_eq!(held.as_slice(), &[1, 2, 3]);
    assert_eq!(list.len(), 100);
}

#[test]
fn test_read_after_write_across_threads() {
    let map: SnapMap<String, i64> = SnapMap::new();
    let (ready_tx, ready_rx) = mpsc::channel();

    let writer = {
        let map = map.clone();
        thread::spawn(move || {
            map.set("state".to_string(), 2);
            ready_tx.send(()).unwrap();
        })
    };

    // Once the write is signalled, a fresh read must observe it
    ready_rx.recv().unwrap();
    assert_eq!(map.get("state"), 2);
    writer.join().unwrap();
}

#[test]
fn test_object_lock_serializes_compound_access() {
    let map: SnapMap<String, i64> = SnapMap::new();
    map.set("counter".to_string(), 0);

    let mut handles = vec![];
    for _ in 0..4 {
        let map = map.clone();
        handles.push(thread::spawn(move || {
            for _ in 0..250 {
                let _scope = ObjectLock::new(Some(&map));
                // Non-atomic read-modify-write pair, safe only under the lock
                let count = map.get("counter");
                map.set("counter".to_string(), count + 1);
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(map.get("counter"), 1000);
}

#[test]
fn test_object_lock_is_reentrant_across_scopes() {
    let list: SnapList<i64> = SnapList::new();

    let outer = ObjectLock::new(Some(&list));
    assert!(outer.is_locked());

    // Same thread, second scope: must not deadlock
    let inner = ObjectLock::new(Some(&list));
    assert!(inner.is_locked());

    drop(inner);
    drop(outer);
}

#[test]
fn test_object_lock_explicit_lock_unlock() {
    let list: SnapList<i64> = SnapList::new();

    let mut scope = ObjectLock::new(Some(&list));
    assert!(scope.is_locked());

    scope.unlock();
    assert!(!scope.is_locked());

    scope.lock();
    assert!(scope.is_locked());
}

#[test]
fn test_object_lock_without_target_is_inert() {
    let mut scope = ObjectLock::new(None);
    assert!(!scope.is_locked());

    // unlock() on an inert scope does nothing
    scope.unlock();
    assert!(!scope.is_locked());
}

#[test]
#[should_panic(expected = "already held by this scope")]
fn test_object_lock_double_acquire_panics() {
    let list: SnapList<i64> = SnapList::new();

    let mut scope = ObjectLock::new(Some(&list));
    scope.lock();
}

#[test]
#[should_panic(expected = "no target object")]
fn test_object_lock_lock_without_target_panics() {
    let mut scope = ObjectLock::new(None);
    scope.lock();
}

#[test]
fn test_object_lock_blocks_other_threads() {
    let map: SnapMap<String, i64> = SnapMap::new();
    let (started_tx, started_rx) = mpsc::channel();
    let (release_tx, release_rx) = mpsc::channel::<()>();

    let holder = {
        let map = map.clone();
        thread::spawn(move || {
            let _scope = ObjectLock::new(Some(&map));
            map.set("owner".to_string(), 1);
            started_tx.send(()).unwrap();
            // Hold the lock until the main thread says otherwise
            release_rx.recv().unwrap();
        })
    };

    started_rx.recv().unwrap();

    let contender = {
        let map = map.clone();
        thread::spawn(move || {
            let _scope = ObjectLock::new(Some(&map));
            map.set("owner".to_string(), 2);
        })
    };

    // The contender is blocked; the holder's write is still the visible one
    thread::sleep(std::time::Duration::from_millis(50));
    assert_eq!(map.get("owner"), 1);

    release_tx.send(()).unwrap();
    holder.join().unwrap();
    contender.join().unwrap();
    assert_eq!(map.get("owner"), 2);
}
