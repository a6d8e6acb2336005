//! Core types and trait definitions for the Stockroom inventory service.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod error;
pub mod item;
pub mod report;
pub mod stats;
pub mod store;
pub mod user;

pub use error::{Error, Result};
