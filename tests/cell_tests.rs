use std::sync::Arc;

use snapstore::CowCell;

#[test]
fn test_read_returns_owning_handle() {
    let cell = CowCell::new(vec![1i64, 2]);

    let before = cell.read();
    cell.update(|items| items.push(3));

    assert_eq!(before.as_slice(), &[1, 2]);
    assert_eq!(cell.read().as_slice(), &[1, 2, 3]);
}

#[test]
fn test_assign_ignores_prior_value() {
    let cell = CowCell::new(vec![1i64, 2, 3]);

    cell.assign(Vec::new());
    assert!(cell.read().is_empty());
}

#[test]
fn test_assign_shared_publishes_the_given_snapshot() {
    let cell = CowCell::new(vec![1i64]);
    let canonical: Arc<Vec<i64>> = Arc::new(Vec::new());

    cell.assign_shared(Arc::clone(&canonical));
    assert!(Arc::ptr_eq(&cell.read(), &canonical));
}

#[test]
fn test_with_borrows_without_retaining() {
    let cell = CowCell::new(vec![1i64, 2, 3]);

    let len = cell.with(Vec::len);
    assert_eq!(len, 3);
}

#[test]
fn test_try_update_failure_publishes_nothing() {
    let cell = CowCell::new(vec![1i64, 2]);
    let before = cell.read();

    let result: Result<(), &str> = cell.try_update(|items| {
        items.push(3);
        Err("abandon this attempt")
    });

    assert_eq!(result, Err("abandon this attempt"));
    // The failed attempt's copy was discarded, not published
    assert!(Arc::ptr_eq(&cell.read(), &before));
}

#[test]
fn test_update_sees_latest_state() {
    let cell = CowCell::new(0i64);

    cell.update(|n| *n += 1);
    cell.update(|n| *n *= 10);

    assert_eq!(*cell.read(), 10);
}

#[test]
fn test_default_is_empty_payload() {
    let cell: CowCell<Vec<i64>> = CowCell::default();
    assert!(cell.read().is_empty());
}

#[test]
fn test_debug_shows_current_snapshot() {
    let cell = CowCell::new(vec![1i64, 2]);
    assert_eq!(format!("{cell:?}"), "CowCell([1, 2])");
}
