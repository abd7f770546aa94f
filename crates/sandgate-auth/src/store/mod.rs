//! User persistence.
//!
//! - [`UserStore`]: data-access trait (implement this for new backends)
//! - [`MemoryStore`]: in-process store, useful for tests and single-node setups
//!
//! SQL-backed storage lives in [`crate::sql`] behind the `sql` feature.

mod memory;
mod traits;

pub use memory::MemoryStore;
pub use traits::UserStore;
