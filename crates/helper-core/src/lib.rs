//! Mentor-matching and resource-lookup core for the Immigrant Helper toolkit.
//!
//! Holds the data model, validated record construction, the resource catalog,
//! the mentor registry and the matching engine. The crate has no knowledge of
//! files, prompts or logging; callers hand it in-memory collections and get
//! plain values back.

pub mod catalog;
pub mod error;
pub mod formatting;
pub mod goals;
pub mod matching;
pub mod models;
pub mod records;
pub mod registry;
pub mod validation;

pub use catalog::ResourceCatalog;
pub use error::{CoreError, Result};
pub use matching::{MatchBasis, MatchOutcome, MatchingEngine};
pub use models::{Expertise, Immigrant, Mentor, ProgressEntry, Resource};
pub use registry::{MentorFilter, MentorRegistry};
