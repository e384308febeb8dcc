//! # snapstore
//!
//! Thread-safe value containers with lock-free reads and copy-on-write writes.
//!
//! `snapstore` is the shared container layer for object models that are read
//! by many threads at once while being mutated by others: configuration
//! objects, check results, runtime attribute sets. Readers never take a lock
//! and never observe a partially-applied write; writers build a private copy
//! of the current state and publish it atomically, retrying if another writer
//! got there first.
//!
//! ## Key Features
//!
//! - **Lock-free reads**: [`CowCell::read`] is an atomic pointer load plus a
//!   reference-count bump, safe from any number of threads at once
//! - **Copy-on-write writes**: mutations never touch data a reader might be
//!   looking at; old snapshots stay valid for readers that captured them
//! - **Two containers on one primitive**: an ordered sequence
//!   ([`SnapList`]) and a sorted key-unique map ([`SnapMap`]), both thin
//!   wrappers over [`CowCell`]
//! - **Scoped locking for compound access**: [`ObjectLock`] serializes
//!   multi-call sequences that need one consistent combined view
//!
//! ## Usage Examples
//!
//! ### Basic Usage
//!
//! ```rust
//! use snapstore::{SnapList, SnapMap, StoreError};
//!
//! fn main() -> Result<(), StoreError> {
//!     let hosts = SnapList::from_vec(vec![
//!         "web-1".to_string(),
//!         "web-2".to_string(),
//!     ]);
//!
//!     hosts.push("db-1".to_string());
//!     hosts.set(0, "web-0".to_string())?;
//!
//!     assert_eq!(hosts.len(), 3);
//!     assert!(hosts.contains(&"db-1".to_string()));
//!
//!     let attrs: SnapMap<String, i64> = SnapMap::new();
//!     attrs.set("check_interval".to_string(), 60);
//!     attrs.set("retry_interval".to_string(), 30);
//!
//!     // Absent keys are not errors; they read as the empty sentinel.
//!     assert_eq!(attrs.get("check_interval"), 60);
//!     assert_eq!(attrs.get("max_attempts"), 0);
//!     assert_eq!(attrs.get_checked("max_attempts"), None);
//!
//!     Ok(())
//! }
//! ```
//!
//! ### Snapshot Isolation
//!
//! A view captured before a write keeps reporting the pre-write state for its
//! entire lifetime, even across a `clear()`:
//!
//! ```rust
//! use snapstore::SnapList;
//!
//! let list = SnapList::from_vec(vec![1i64, 2, 3]);
//!
//! let snapshot = list.view();
//! list.clear();
//!
//! assert_eq!(snapshot.as_slice(), &[1, 2, 3]);
//! assert!(list.is_empty());
//! ```
//!
//! ### Sharing a Container Between Threads
//!
//! Containers are handles: cloning one shares the underlying store. Readers
//! proceed without locks while writers race on the publish step only:
//!
//! ```rust
//! use std::thread;
//! use snapstore::SnapList;
//!
//! let list: SnapList<i64> = SnapList::new();
//!
//! let mut handles = vec![];
//! for n in 0..4 {
//!     let list = list.clone();
//!     handles.push(thread::spawn(move || {
//!         list.push(n);
//!     }));
//! }
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//!
//! assert_eq!(list.len(), 4);
//! ```
//!
//! ### Compound Access Under a Scoped Lock
//!
//! Each container call is atomic on its own; a sequence of calls is not. When
//! several calls must observe one combined state, cooperating callers wrap
//! the sequence in an [`ObjectLock`]:
//!
//! ```rust
//! use snapstore::{ObjectLock, SnapMap};
//!
//! let attrs: SnapMap<String, i64> = SnapMap::new();
//! attrs.set("soft_failures".to_string(), 2);
//!
//! {
//!     let _scope = ObjectLock::new(Some(&attrs));
//!     let failures = attrs.get("soft_failures");
//!     attrs.set("soft_failures".to_string(), failures + 1);
//! }
//!
//! assert_eq!(attrs.get("soft_failures"), 3);
//! ```
//!
//! ### The Primitive Itself
//!
//! [`CowCell`] is payload-agnostic; the containers are convenience layers
//! over it:
//!
//! ```rust
//! use snapstore::CowCell;
//!
//! let cell = CowCell::new(String::from("pending"));
//!
//! let before = cell.read();
//! cell.update(|state| state.push_str(" -> hard"));
//!
//! assert_eq!(*before, "pending");
//! assert_eq!(*cell.read(), "pending -> hard");
//! ```

mod cell;
mod error;
mod fields;
mod list;
mod lock;
mod map;
mod render;
mod value;

pub use cell::CowCell;
pub use error::StoreError;
pub use fields::FieldFallback;
pub use list::{ListView, SnapList};
pub use lock::{Lockable, ObjectLock};
pub use map::{MapView, SnapMap};
pub use render::Renderer;
pub use value::Value;
