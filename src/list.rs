use std::fmt;
use std::sync::Arc;

use parking_lot::ReentrantMutex;

use crate::cell::CowCell;
use crate::error::StoreError;
use crate::lock::Lockable;
use crate::render::Renderer;
use crate::value::Value;

/// A snapshot of a list's elements, in insertion order.
///
/// Obtained from [`SnapList::view`]; immutable and kept alive for as long as
/// the handle exists, no matter how the list is mutated afterwards.
pub type ListView<V> = Arc<Vec<V>>;

struct ListInner<V: Value> {
    data: CowCell<Vec<V>>,
    /// Canonical empty snapshot reinstalled by `clear()`, so resets never
    /// allocate and repeated clears share one allocation.
    empty: Arc<Vec<V>>,
    mutex: ReentrantMutex<()>,
}

/// An ordered sequence of values with lock-free reads and copy-on-write
/// writes.
///
/// `SnapList` is a handle: cloning it produces another handle to the *same*
/// underlying store, the way cloning an `Arc` shares the allocation. Use
/// [`shallow_clone`](Self::shallow_clone) or
/// [`deep_clone`](Self::deep_clone) for an independent container.
///
/// Reads ([`get`](Self::get), [`len`](Self::len), [`view`](Self::view), …)
/// never block, even while writes are in flight. Each mutating call builds a
/// private copy of the current snapshot, edits it, and publishes it
/// atomically; no reader ever observes a half-applied write.
///
/// # Examples
///
/// ```
/// use snapstore::SnapList;
///
/// let list = SnapList::from_vec(vec![10i64, 20, 30]);
///
/// list.set(1, 99)?;
/// list.push(40);
/// assert_eq!(list.view().as_slice(), &[10, 99, 30, 40]);
///
/// // A view taken before a mutation keeps reporting the old state.
/// let before = list.view();
/// list.clear();
/// assert_eq!(before.as_slice(), &[10, 99, 30, 40]);
/// assert!(list.is_empty());
/// # Ok::<(), snapstore::StoreError>(())
/// ```
pub struct SnapList<V: Value> {
    inner: Arc<ListInner<V>>,
}

impl<V: Value> SnapList<V> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::with_data(Vec::new())
    }

    /// Creates a list holding `values` in order.
    pub fn from_vec(values: Vec<V>) -> Self {
        Self::with_data(values)
    }

    fn with_data(values: Vec<V>) -> Self {
        let empty = Arc::new(Vec::new());
        let data = if values.is_empty() {
            CowCell::from_shared(Arc::clone(&empty))
        } else {
            CowCell::new(values)
        };
        Self {
            inner: Arc::new(ListInner {
                data,
                empty,
                mutex: ReentrantMutex::new(()),
            }),
        }
    }

    /// Returns a copy of the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::IndexOutOfRange` if `index >= len`.
    pub fn get(&self, index: usize) -> Result<V, StoreError> {
        self.inner.data.with(|data| {
            data.get(index).cloned().ok_or(StoreError::IndexOutOfRange {
                index,
                len: data.len(),
            })
        })
    }

    /// Replaces the element at `index`.
    ///
    /// Strict: the index must already be populated; `set` never grows the
    /// list. (The named-field write path,
    /// [`set_field_by_name`](Self::set_field_by_name), is the permissive
    /// variant that does.)
    ///
    /// # Errors
    ///
    /// Returns `StoreError::IndexOutOfRange` if `index >= len`; nothing is
    /// published in that case.
    pub fn set(&self, index: usize, value: V) -> Result<(), StoreError> {
        self.inner.data.try_update(|data| {
            if index >= data.len() {
                return Err(StoreError::IndexOutOfRange {
                    index,
                    len: data.len(),
                });
            }
            data[index] = value.clone();
            Ok(())
        })
    }

    /// Appends a value.
    pub fn push(&self, value: V) {
        self.inner.data.update(|data| data.push(value.clone()));
    }

    /// Inserts `value` at `index`, shifting later elements right.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`. An insert position past the end is a
    /// programming error, not a recoverable condition.
    pub fn insert(&self, index: usize, value: V) {
        self.inner.data.update(|data| {
            assert!(index <= data.len(), "insert index {index} beyond list length {}", data.len());
            data.insert(index, value.clone());
        });
    }

    /// Removes the element at `index`, shifting later elements left.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn remove(&self, index: usize) {
        self.inner.data.update(|data| {
            data.remove(index);
        });
    }

    /// Resizes to `len` elements, filling new slots with the empty sentinel.
    pub fn resize(&self, len: usize) {
        self.inner.data.update(|data| data.resize(len, V::default()));
    }

    /// Capacity hint for upcoming appends, applied to the next snapshot.
    pub fn reserve(&self, additional: usize) {
        self.inner.data.update(|data| data.reserve(additional));
    }

    /// Resets the list to empty.
    ///
    /// Publishes the list's canonical empty snapshot rather than allocating a
    /// new one; apart from that, equivalent to assigning an empty payload.
    pub fn clear(&self) {
        self.inner.data.assign_shared(Arc::clone(&self.inner.empty));
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.inner.data.with(Vec::len)
    }

    /// Returns true if the list holds no elements.
    pub fn is_empty(&self) -> bool {
        self.inner.data.with(Vec::is_empty)
    }

    /// Linear scan for `value` using structural equality.
    pub fn contains(&self, value: &V) -> bool {
        self.inner.data.with(|data| data.contains(value))
    }

    /// Returns a handle to the current snapshot.
    ///
    /// The view is immutable and stays valid (and unchanged) for its entire
    /// lifetime, regardless of later writes to the list. Iteration order is
    /// insertion order.
    pub fn view(&self) -> ListView<V> {
        self.inner.data.read()
    }

    /// Returns a new list with the elements in reverse order.
    ///
    /// The receiver is left untouched.
    pub fn reversed(&self) -> SnapList<V> {
        let data = self.view();
        SnapList::from_vec(data.iter().rev().cloned().collect())
    }

    /// Sorts the elements in place (copy-on-write) by their total order.
    ///
    /// The sort is stable.
    pub fn sort(&self) {
        self.inner.data.update(|data| data.sort());
    }

    /// Makes an independent list from a copy of the current snapshot.
    ///
    /// Elements are copied by value; an element that wraps a shared object
    /// still refers to that same object through both lists.
    pub fn shallow_clone(&self) -> SnapList<V> {
        let data = self.view();
        SnapList::from_vec(data.as_ref().clone())
    }

    /// Makes an independent list, recursively cloning every element.
    ///
    /// Unlike [`shallow_clone`](Self::shallow_clone), nested state reachable
    /// through an element is cloned too, via [`Value::deep_clone`].
    pub fn deep_clone(&self) -> SnapList<V> {
        let data = self.view();
        SnapList::from_vec(data.iter().map(Value::deep_clone).collect())
    }

    /// Appends a copy of this list's current elements onto `dest`.
    ///
    /// One copy-update on `dest`; `self` is read once and left untouched.
    pub fn copy_to(&self, dest: &SnapList<V>) {
        let source = self.view();
        dest.inner
            .data
            .update(|data| data.extend(source.iter().cloned()));
    }

    /// Returns true if `other` is a handle to the same underlying store.
    pub fn ptr_eq(&self, other: &SnapList<V>) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Renders the current snapshot through an external writer.
    ///
    /// The list only supplies its elements in insertion order; formatting is
    /// wholly owned by the renderer.
    pub fn to_string_with(&self, renderer: &impl Renderer<V>) -> String {
        let data = self.view();
        renderer.render_list(&data)
    }

    /// Permissive write path used by the named-field bridge: grows the list
    /// to `index + 1` when needed, filling new slots with the empty sentinel.
    pub(crate) fn set_growing(&self, index: usize, value: V) {
        self.inner.data.update(|data| {
            if index >= data.len() {
                data.resize(index + 1, V::default());
            }
            data[index] = value.clone();
        });
    }
}

impl<V: Value> Default for SnapList<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Cloning a `SnapList` yields another handle to the same store.
impl<V: Value> Clone for SnapList<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V: Value> FromIterator<V> for SnapList<V> {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<V: Value + fmt::Debug> fmt::Debug for SnapList<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.inner
            .data
            .with(|data| f.debug_list().entries(data.iter()).finish())
    }
}

impl<V: Value> Lockable for SnapList<V> {
    fn object_mutex(&self) -> &ReentrantMutex<()> {
        &self.inner.mutex
    }
}
