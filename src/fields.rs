//! Named-field access onto the containers.
//!
//! Scripting layers address container elements by field name: `"0"`, `"1"`, …
//! on a sequence, any string key on a map. The sequence side needs an escape
//! hatch, because a non-numeric name is not an error there: it belongs to
//! whatever attribute model sits above this crate. The bridge therefore takes
//! an injected [`FieldFallback`] to forward those lookups to.

use crate::error::StoreError;
use crate::list::SnapList;
use crate::map::SnapMap;
use crate::value::Value;

/// Fallback lookup for field names a sequence cannot resolve positionally.
///
/// `ctx` is an opaque pass-through: the containers never inspect it, they
/// only hand it on. Implementations own their error taxonomy; an
/// implementation with no use for a name conventionally returns
/// [`StoreError::InvalidFieldName`].
pub trait FieldFallback<V, C> {
    fn get_field(&self, field: &str, ctx: &C) -> Result<V, StoreError>;
}

impl<V: Value> SnapList<V> {
    /// Field read: a numeric name addresses an element, anything else is
    /// forwarded to `fallback` with `ctx` passed through untouched.
    ///
    /// # Errors
    ///
    /// `StoreError::IndexOutOfRange` for a numeric name past the end,
    /// `StoreError::InvalidFieldName` for a negative one, and whatever the
    /// fallback returns for a non-numeric one.
    pub fn get_field_by_name<C, F>(&self, field: &str, ctx: &C, fallback: &F) -> Result<V, StoreError>
    where
        F: FieldFallback<V, C>,
    {
        let Ok(signed) = field.parse::<i64>() else {
            return fallback.get_field(field, ctx);
        };
        let index = usize::try_from(signed)
            .map_err(|_| StoreError::InvalidFieldName(field.to_string()))?;
        self.get(index)
    }

    /// Field write: a numeric name addresses an element, growing the list to
    /// `index + 1` if needed with new slots filled by the empty sentinel.
    ///
    /// Deliberately more permissive than [`set`](SnapList::set), which
    /// rejects out-of-bounds indices; scripted assignment to a fresh slot is
    /// expected usage, positional assignment past the end is a bug.
    ///
    /// # Errors
    ///
    /// `StoreError::InvalidFieldName` if `field` is not a non-negative
    /// integer; the write path has no fallback.
    pub fn set_field_by_name(&self, field: &str, value: V) -> Result<(), StoreError> {
        let index = field
            .parse::<i64>()
            .ok()
            .and_then(|signed| usize::try_from(signed).ok())
            .ok_or_else(|| StoreError::InvalidFieldName(field.to_string()))?;
        self.set_growing(index, value);
        Ok(())
    }
}

impl<V: Value> SnapMap<String, V> {
    /// Field read; every string is a valid key, so this is exactly
    /// [`get`](SnapMap::get) and no fallback is involved.
    pub fn get_field_by_name(&self, field: &str) -> V {
        self.get(field)
    }

    /// Field write; exactly [`set`](SnapMap::set).
    pub fn set_field_by_name(&self, field: &str, value: V) {
        self.set(field.to_string(), value);
    }

    /// Presence check for the attribute protocol; exactly
    /// [`contains_key`](SnapMap::contains_key).
    pub fn has_own_field(&self, field: &str) -> bool {
        self.contains_key(field)
    }

    /// Checked field read; exactly [`get_checked`](SnapMap::get_checked).
    pub fn get_own_field(&self, field: &str) -> Option<V> {
        self.get_checked(field)
    }
}
