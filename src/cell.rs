use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwap;
use tracing::trace;

/// An atomic copy-on-write holder for a shared, immutable snapshot.
///
/// A `CowCell` owns a single pointer to the *current snapshot* of its payload.
/// Readers grab that pointer without taking any lock; writers build a fresh
/// copy of the payload, modify the copy, and publish it with a compare-and-swap.
/// A reader that captured a snapshot before a write committed keeps observing
/// that snapshot for as long as it holds on to it.
///
/// The cell is the primitive underneath [`SnapList`](crate::SnapList) and
/// [`SnapMap`](crate::SnapMap); it knows nothing about what it stores beyond
/// the `Clone` needed for the copy step.
///
/// # Examples
///
/// ```
/// use snapstore::CowCell;
///
/// let cell = CowCell::new(vec![1, 2]);
///
/// // Lock-free read: the handle stays valid across later writes.
/// let before = cell.read();
///
/// cell.update(|items| items.push(3));
///
/// assert_eq!(before.as_slice(), &[1, 2]);
/// assert_eq!(cell.read().as_slice(), &[1, 2, 3]);
/// ```
pub struct CowCell<T> {
    inner: ArcSwap<T>,
}

impl<T> CowCell<T> {
    /// Creates a cell holding `value` as its initial snapshot.
    pub fn new(value: T) -> Self {
        Self {
            inner: ArcSwap::from_pointee(value),
        }
    }

    /// Creates a cell whose initial snapshot is an already-shared allocation.
    ///
    /// This lets several cells (or a cell and its owner) share one snapshot,
    /// e.g. a canonical empty payload that "reset" operations reinstall
    /// without allocating.
    pub fn from_shared(snapshot: Arc<T>) -> Self {
        Self {
            inner: ArcSwap::new(snapshot),
        }
    }

    /// Returns a handle to the current snapshot.
    ///
    /// The load is atomic with acquire semantics: every write that produced
    /// the snapshot is visible to the calling thread. The returned `Arc` keeps
    /// the snapshot alive regardless of how many writes are published after
    /// this call. Never blocks; the only cost beyond the atomic load is one
    /// reference-count increment.
    pub fn read(&self) -> Arc<T> {
        self.inner.load_full()
    }

    /// Runs `f` against the current snapshot without handing out an owning
    /// handle.
    ///
    /// Cheaper than [`read`](Self::read) for short-lived access (a length
    /// check, a lookup); the snapshot is pinned only for the duration of `f`.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let guard = self.inner.load();
        f(&guard)
    }

    /// Atomically replaces the current snapshot with a fresh one wrapping
    /// `value`, ignoring whatever was there before.
    ///
    /// Intended for resets; use [`update`](Self::update) when the new state
    /// depends on the old one.
    pub fn assign(&self, value: T) {
        self.inner.store(Arc::new(value));
    }

    /// Like [`assign`](Self::assign), but publishes an existing shared
    /// snapshot instead of allocating a new one.
    pub fn assign_shared(&self, snapshot: Arc<T>) {
        self.inner.store(snapshot);
    }
}

impl<T: Clone> CowCell<T> {
    /// The copy-on-write write path.
    ///
    /// Loads the current snapshot, clones the payload, applies `mutator` to
    /// the clone, and publishes the clone if and only if the cell still holds
    /// the snapshot loaded at the start. If another writer published in the
    /// meantime, the clone is discarded and the whole cycle restarts against
    /// the latest snapshot.
    ///
    /// The retry loop is unbounded and has no backoff: the cell is lock-free,
    /// not wait-free, and a writer racing against a continuous stream of other
    /// writers can in principle be starved. Readers are never blocked.
    ///
    /// `mutator` may run several times (once per attempt) and must therefore
    /// be free of side effects outside the payload copy it is given.
    pub fn update(&self, mut mutator: impl FnMut(&mut T)) {
        self.try_update(|value| -> Result<(), std::convert::Infallible> {
            mutator(value);
            Ok(())
        })
        .unwrap_or_else(|never| match never {});
    }

    /// Fallible variant of [`update`](Self::update).
    ///
    /// If `mutator` returns an error, the attempt is abandoned: nothing is
    /// published, the cell keeps its current snapshot, and the error is
    /// returned to the caller. The bounds check of
    /// [`SnapList::set`](crate::SnapList::set) rides on this.
    pub fn try_update<E>(&self, mut mutator: impl FnMut(&mut T) -> Result<(), E>) -> Result<(), E> {
        let mut attempts: u32 = 0;
        let mut current = self.inner.load();

        loop {
            attempts += 1;

            let mut copy = T::clone(&current);
            mutator(&mut copy)?;

            let previous = self.inner.compare_and_swap(&*current, Arc::new(copy));

            if Arc::ptr_eq(&*current, &*previous) {
                if attempts > 1 {
                    trace!(retries = attempts - 1, "copy-on-write publish raced, retried");
                }
                return Ok(());
            }

            // Someone else published first; retry against their snapshot.
            current = previous;
        }
    }
}

impl<T: Default> Default for CowCell<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for CowCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let current = self.inner.load();
        f.debug_tuple("CowCell").field(&**current).finish()
    }
}
