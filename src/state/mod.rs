//! Grid State Layer
//!
//! Ephemeral UI-side state for one table: current sort, page, filters, and
//! the rows last applied. Owned by the grid controller; the data layer only
//! ever receives the descriptors it derives.

mod table_state;

pub use table_state::{TableLoadState, TableState};
