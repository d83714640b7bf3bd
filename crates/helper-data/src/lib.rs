//! Persistence layer for the Immigrant Helper toolkit.
//!
//! Loads and saves immigrants, mentors and resources as JSON documents and
//! provides the demo data used to populate a fresh installation.

pub mod error;
pub mod seed;
pub mod store;

pub use error::{Result, StoreError};
pub use store::{JsonStore, LoadOutcome, RejectedRecord};

pub use helper_core as core;
