use parking_lot::{ReentrantMutex, ReentrantMutexGuard};

/// An object that carries a per-object reentrant mutex for scoped locking.
///
/// The mutex serializes *callers*, not snapshots: it has no interaction with
/// the containers' lock-free read/write paths. Callers that need several
/// container calls (or calls across related objects) to observe one combined
/// state take an [`ObjectLock`] around the whole sequence by convention.
pub trait Lockable {
    fn object_mutex(&self) -> &ReentrantMutex<()>;
}

/// A scoped hold on a [`Lockable`] object's mutex.
///
/// Constructing the scope with a target acquires the mutex immediately,
/// blocking while another thread holds it. Constructing it with `None` is a
/// deliberate no-op, for call sites where locking is conditional. Dropping
/// the scope releases the lock if it is held.
///
/// The underlying mutex is reentrant per thread: a thread already holding an
/// object's lock may acquire it again through a *different* `ObjectLock`
/// without deadlocking itself. [`lock`](Self::lock) on a scope that already
/// holds the lock, by contrast, is a programming error and panics.
///
/// # Examples
///
/// ```
/// use snapstore::{ObjectLock, SnapMap};
///
/// let map: SnapMap<String, i64> = SnapMap::new();
/// map.set("errors".to_string(), 1);
///
/// {
///     let _scope = ObjectLock::new(Some(&map));
///     // Other threads taking an ObjectLock on `map` wait here, so this
///     // read-modify-write pair is not interleaved with theirs.
///     let count = map.get("errors");
///     map.set("errors".to_string(), count + 1);
/// }
///
/// assert_eq!(map.get("errors"), 2);
/// ```
pub struct ObjectLock<'a> {
    mutex: Option<&'a ReentrantMutex<()>>,
    guard: Option<ReentrantMutexGuard<'a, ()>>,
}

impl<'a> ObjectLock<'a> {
    /// Creates a scope over `target`, acquiring its mutex immediately.
    ///
    /// With `None`, the scope is inert: it holds nothing, and dropping it
    /// does nothing.
    pub fn new(target: Option<&'a dyn Lockable>) -> Self {
        let mut scope = Self {
            mutex: target.map(|object| object.object_mutex()),
            guard: None,
        };
        if scope.mutex.is_some() {
            scope.lock();
        }
        scope
    }

    /// Acquires the target's mutex, blocking until available.
    ///
    /// # Panics
    ///
    /// Panics if this scope already holds the lock (re-acquiring through the
    /// *same* scope is a double-acquire bug; use a second `ObjectLock` for
    /// legitimate reentrancy) or if the scope was constructed without a
    /// target.
    pub fn lock(&mut self) {
        assert!(self.guard.is_none(), "ObjectLock is already held by this scope");
        assert!(self.mutex.is_some(), "ObjectLock has no target object");
        self.guard = self.mutex.map(ReentrantMutex::lock);
    }

    /// Releases the lock if this scope holds it.
    pub fn unlock(&mut self) {
        self.guard = None;
    }

    /// Returns true while this scope holds the lock.
    pub fn is_locked(&self) -> bool {
        self.guard.is_some()
    }
}
