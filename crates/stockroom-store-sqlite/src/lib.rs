//! SQLite backend for the Stockroom inventory store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated
//! thread without blocking the async runtime. Every item query issued here
//! carries the owner-scope predicate; nothing in this crate reads or writes
//! an item row without it.

mod encode;
mod error;
mod query;
mod schema;
mod store;

pub use store::SqliteStore;

#[cfg(test)]
mod tests;
