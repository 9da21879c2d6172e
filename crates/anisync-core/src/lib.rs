//! # anisync-core
//!
//! Core library for reconciling two anime lists.
//!
//! A *reference* list (the one that receives writes) is compared against a
//! *target* list (the desired state). Every target entry is classified as
//! missing, needing an update, up to date or uncertain, and the resulting
//! [`comparison::Diff`] can be replayed against the reference store by the
//! [`sync`] executor.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;

/// Canonical entry model
pub mod entry;

/// Conversion between source records and canonical entries
pub mod normalize;

/// Sorted lookup by entry ID
pub mod lookup;

/// List comparison and field-level diffs
pub mod comparison;

/// External source capabilities and file-backed adapters
pub mod source;

/// Applying a diff to the reference source
pub mod sync;

/// Configuration file parsing and management
pub mod config;

pub use comparison::{Classification, Diff, EntryDiff, FieldDiff, compare, compare_entries};
pub use entry::{Entry, EntryId, Rating, Status};
pub use lookup::find_by_id;
pub use source::{ReferenceSource, Resources, TargetSource};
pub use sync::{Reconciler, SyncExecutor, SyncResult};
