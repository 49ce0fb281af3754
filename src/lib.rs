//! Bookkeeping for a code-reading project.
//!
//! A reader working through an unfamiliar codebase marks the line ranges they
//! have covered, per file and in one of a few colors. This crate keeps those
//! marks in canonical form (sorted, disjoint, non-adjacent per file and
//! color) and reports, for every mutation, exactly which previously stored
//! ranges disappeared and which new ones took their place, so that an editor
//! overlay can be updated without redrawing the whole file. The store
//! round-trips through a `.code-reader.json` document in the project root.
//!
//! Everything is plain in-memory data; the only I/O lives in
//! [`read_project`] and [`write_project`].

mod codec;
pub use codec::*;

mod error;
pub use error::*;

mod interval_set;
pub use interval_set::*;

mod range;
pub use range::*;

mod store;
pub use store::*;
