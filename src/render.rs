/// External writer the containers delegate textual rendering to.
///
/// The containers own no text format. `to_string_with` hands the renderer the
/// current snapshot in canonical order (insertion order for a list, ascending
/// key order for a map) and returns whatever the renderer produces.
///
/// # Examples
///
/// ```
/// use snapstore::{Renderer, SnapList};
///
/// struct Brackets;
///
/// impl Renderer<i64> for Brackets {
///     fn render_list(&self, items: &[i64]) -> String {
///         let parts: Vec<String> = items.iter().map(|v| v.to_string()).collect();
///         format!("[ {} ]", parts.join(", "))
///     }
///
///     fn render_map(&self, entries: &[(String, i64)]) -> String {
///         let parts: Vec<String> = entries
///             .iter()
///             .map(|(k, v)| format!("{} = {}", k, v))
///             .collect();
///         format!("{{ {} }}", parts.join(", "))
///     }
/// }
///
/// let list = SnapList::from_vec(vec![1i64, 2, 3]);
/// assert_eq!(list.to_string_with(&Brackets), "[ 1, 2, 3 ]");
/// ```
pub trait Renderer<V> {
    /// Renders a sequence snapshot, given in insertion order.
    fn render_list(&self, items: &[V]) -> String;

    /// Renders a map snapshot, given ascending by key.
    fn render_map(&self, entries: &[(String, V)]) -> String;
}
