//! Query Model
//!
//! The normalized shape of "what data is being asked for" and the canonical
//! cache-key derivation over it.

mod descriptor;
mod key;

pub use descriptor::{ColumnFilter, ExtraParams, PageRequest, QueryDescriptor, SortRule};
pub use key::derive_key;
