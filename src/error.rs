/// Errors that can occur when using the containers
///
/// Every error is synchronous and local to the failing call; nothing in this
/// crate retries a failed operation. An absent key in a
/// [`SnapMap`](crate::SnapMap) is *not* an error; lookups return the empty
/// sentinel or an `Option` instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// A positional access on a sequence was outside `[0, len)`
    #[error("index {index} is out of bounds (len {len})")]
    IndexOutOfRange { index: usize, len: usize },
    /// A field name could not be used to address a sequence element
    #[error("invalid field name '{0}' for sequence access")]
    InvalidFieldName(String),
}
