//! In-memory query cache
//!
//! - Memoizes one [`QueryEntry`] per [`crate::resource::QueryKey`]
//! - Deduplicates concurrent requests for a key that is already in flight
//! - Notifies observers of every pending/success/error transition
//! - Supports explicit invalidation (refetch); refreshing an in-flight key joins
//!   the running attempt

mod entry;
mod query_cache;

pub use entry::{QueryEntry, QueryState, QueryStatus};
pub use query_cache::QueryCache;
