/// Contract the containers require of their element type.
///
/// The containers never look inside a value; they rely on exactly four
/// capabilities, all expressed through supertraits plus one method:
///
/// - `Clone`: the top-level copy taken by every copy-on-write step. For
///   values that wrap a shared object this is a handle copy, not a deep copy.
/// - `Eq`/`Ord` (via `Ord`): structural equality for
///   [`SnapList::contains`](crate::SnapList::contains) and a total order for
///   [`SnapList::sort`](crate::SnapList::sort).
/// - `Default`: the empty sentinel, what an absent key reads as and what
///   newly grown slots are filled with.
/// - [`deep_clone`](Value::deep_clone): a recursive clone. The provided body
///   is a plain clone, which is correct for scalar-like values; a value type
///   that wraps a nested container must override it to clone the container's
///   contents as well.
///
/// # Examples
///
/// A value type wrapping a nested container overrides `deep_clone` so that
/// [`SnapList::deep_clone`](crate::SnapList::deep_clone) recurses:
///
/// ```
/// use snapstore::{SnapMap, Value};
///
/// #[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
/// enum Setting {
///     #[default]
///     Empty,
///     Text(String),
/// }
///
/// impl Value for Setting {}
///
/// let map: SnapMap<String, Setting> = SnapMap::new();
/// map.set("mode".to_string(), Setting::Text("active".to_string()));
/// assert_eq!(map.get("missing"), Setting::Empty);
/// ```
pub trait Value: Clone + Ord + Default + Send + Sync + 'static {
    /// Recursively clones this value and any nested state it owns.
    fn deep_clone(&self) -> Self {
        self.clone()
    }
}

macro_rules! scalar_value {
    ($($ty:ty),* $(,)?) => {
        $(impl Value for $ty {})*
    };
}

// f32/f64 are deliberately absent: they have no total order.
scalar_value!(
    (),
    bool,
    char,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    String,
);
