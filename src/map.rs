use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

use parking_lot::ReentrantMutex;

use crate::cell::CowCell;
use crate::lock::Lockable;
use crate::render::Renderer;
use crate::value::Value;

/// A snapshot of a map's entries, ascending by key.
///
/// Obtained from [`SnapMap::view`]; immutable for its entire lifetime.
pub type MapView<K, V> = Arc<Vec<(K, V)>>;

struct MapInner<K, V: Value> {
    /// Invariant: strictly ascending by key, no duplicate keys. Holds in
    /// every published snapshot; no reader can observe a window where it is
    /// violated.
    data: CowCell<Vec<(K, V)>>,
    empty: Arc<Vec<(K, V)>>,
    mutex: ReentrantMutex<()>,
}

/// A sorted, key-unique associative container with lock-free reads and
/// copy-on-write writes.
///
/// Entries are stored as a flat pair list kept strictly ascending by key;
/// lookups are binary searches, writes are O(n) copy-and-shift. That tradeoff
/// fits the intended use: small attribute sets read far more often than they
/// are written.
///
/// Like [`SnapList`](crate::SnapList), `SnapMap` is a handle: `clone()`
/// shares the store, [`shallow_clone`](Self::shallow_clone) and
/// [`deep_clone`](Self::deep_clone) copy it.
///
/// An absent key is an expected outcome, not an error: [`get`](Self::get)
/// returns the empty sentinel and [`get_checked`](Self::get_checked) reports
/// presence explicitly.
///
/// # Examples
///
/// ```
/// use snapstore::SnapMap;
///
/// let map = SnapMap::from_pairs(vec![
///     ("b".to_string(), 1i64),
///     ("a".to_string(), 2),
///     ("b".to_string(), 3),
/// ]);
///
/// // Duplicate keys collapse deterministically: the last pair wins.
/// assert_eq!(map.keys(), vec!["a".to_string(), "b".to_string()]);
/// assert_eq!(map.get("a"), 2);
/// assert_eq!(map.get("b"), 3);
///
/// // Absent keys read as the sentinel.
/// assert_eq!(map.get("x"), 0);
/// assert!(!map.contains_key("x"));
/// ```
pub struct SnapMap<K, V>
where
    K: Ord + Clone + Send + Sync + 'static,
    V: Value,
{
    inner: Arc<MapInner<K, V>>,
}

impl<K, V> SnapMap<K, V>
where
    K: Ord + Clone + Send + Sync + 'static,
    V: Value,
{
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::from_sorted(Vec::new())
    }

    /// Builds a map from an unordered batch of pairs.
    ///
    /// Pairs are stable-sorted by key and runs of equal keys collapse to a
    /// single entry keeping the **last** pair in batch order, the same
    /// outcome as feeding the batch through [`set`](Self::set) one pair at a
    /// time.
    pub fn from_pairs(mut pairs: Vec<(K, V)>) -> Self {
        pairs.sort_by(|a, b| a.0.cmp(&b.0));

        let mut data: Vec<(K, V)> = Vec::with_capacity(pairs.len());
        for (key, value) in pairs {
            match data.last_mut() {
                Some(last) if last.0 == key => last.1 = value,
                _ => data.push((key, value)),
            }
        }

        Self::from_sorted(data)
    }

    /// `data` must already be sorted and key-unique.
    fn from_sorted(data: Vec<(K, V)>) -> Self {
        let empty = Arc::new(Vec::new());
        let cell = if data.is_empty() {
            CowCell::from_shared(Arc::clone(&empty))
        } else {
            CowCell::new(data)
        };
        Self {
            inner: Arc::new(MapInner {
                data: cell,
                empty,
                mutex: ReentrantMutex::new(()),
            }),
        }
    }

    /// Returns the value for `key`, or the empty sentinel if absent.
    pub fn get<Q>(&self, key: &Q) -> V
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get_checked(key).unwrap_or_default()
    }

    /// Returns the value for `key`, reporting absence explicitly.
    ///
    /// Use this instead of [`get`](Self::get) when the sentinel is a valid
    /// stored value and comparing against it would be ambiguous.
    pub fn get_checked<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.inner.data.with(|data| {
            Self::search(data, key)
                .ok()
                .map(|found| data[found].1.clone())
        })
    }

    /// Inserts or replaces the value for `key`.
    ///
    /// The copy is binary-searched for the insertion point, so the published
    /// snapshot is sorted and key-unique by construction.
    pub fn set(&self, key: K, value: V) {
        self.inner.data.update(|data| {
            match data.binary_search_by(|probe| probe.0.cmp(&key)) {
                Ok(found) => data[found].1 = value.clone(),
                Err(slot) => data.insert(slot, (key.clone(), value.clone())),
            }
        });
    }

    /// Returns true if `key` is present.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.inner.data.with(|data| Self::search(data, key).is_ok())
    }

    /// Removes `key` if present; absent keys are a no-op.
    pub fn remove<Q>(&self, key: &Q)
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.inner.data.update(|data| {
            if let Ok(found) = Self::search(data, key) {
                data.remove(found);
            }
        });
    }

    /// Resets the map to empty, reinstalling the canonical empty snapshot.
    pub fn clear(&self) {
        self.inner.data.assign_shared(Arc::clone(&self.inner.empty));
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.inner.data.with(Vec::len)
    }

    /// Returns true if the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.inner.data.with(Vec::is_empty)
    }

    /// Returns every key, ascending, matching the order iteration of
    /// [`view`](Self::view) yields.
    pub fn keys(&self) -> Vec<K> {
        self.inner
            .data
            .with(|data| data.iter().map(|(key, _)| key.clone()).collect())
    }

    /// Returns a handle to the current snapshot, entries ascending by key.
    pub fn view(&self) -> MapView<K, V> {
        self.inner.data.read()
    }

    /// Makes an independent map from a copy of the current pair list.
    ///
    /// Values are copied by value; a value wrapping a shared object still
    /// refers to that object through both maps.
    pub fn shallow_clone(&self) -> SnapMap<K, V> {
        let data = self.view();
        SnapMap::from_sorted(data.as_ref().clone())
    }

    /// Makes an independent map, recursively cloning every value.
    pub fn deep_clone(&self) -> SnapMap<K, V> {
        let data = self.view();
        SnapMap::from_sorted(
            data.iter()
                .map(|(key, value)| (key.clone(), value.deep_clone()))
                .collect(),
        )
    }

    /// Merges a copy of this map's current entries into `dest`.
    ///
    /// Each entry is written with [`set`](Self::set) semantics: keys already
    /// present in `dest` are overwritten, others are inserted.
    pub fn copy_to(&self, dest: &SnapMap<K, V>) {
        let source = self.view();
        for (key, value) in source.iter() {
            dest.set(key.clone(), value.clone());
        }
    }

    /// Returns true if `other` is a handle to the same underlying store.
    pub fn ptr_eq(&self, other: &SnapMap<K, V>) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    fn search<Q>(data: &[(K, V)], key: &Q) -> Result<usize, usize>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        data.binary_search_by(|probe| probe.0.borrow().cmp(key))
    }
}

impl<V: Value> SnapMap<String, V> {
    /// Renders the current snapshot through an external writer.
    ///
    /// The map only supplies its entries in ascending key order; formatting
    /// is wholly owned by the renderer.
    pub fn to_string_with(&self, renderer: &impl Renderer<V>) -> String {
        let data = self.view();
        renderer.render_map(&data)
    }
}

impl<K, V> Default for SnapMap<K, V>
where
    K: Ord + Clone + Send + Sync + 'static,
    V: Value,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Cloning a `SnapMap` yields another handle to the same store.
impl<K, V> Clone for SnapMap<K, V>
where
    K: Ord + Clone + Send + Sync + 'static,
    V: Value,
{
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V> FromIterator<(K, V)> for SnapMap<K, V>
where
    K: Ord + Clone + Send + Sync + 'static,
    V: Value,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_pairs(iter.into_iter().collect())
    }
}

impl<K, V> fmt::Debug for SnapMap<K, V>
where
    K: Ord + Clone + Send + Sync + 'static + fmt::Debug,
    V: Value + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.inner.data.with(|data| {
            f.debug_map()
                .entries(data.iter().map(|(key, value)| (key, value)))
                .finish()
        })
    }
}

impl<K, V> Lockable for SnapMap<K, V>
where
    K: Ord + Clone + Send + Sync + 'static,
    V: Value,
{
    fn object_mutex(&self) -> &ReentrantMutex<()> {
        &self.inner.mutex
    }
}
