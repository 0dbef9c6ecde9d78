//! Domain models with validation at construction
//!
//! Request input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod contact;
pub mod group_description;
pub mod pagination;
pub mod validation;

pub use contact::{Contact, ContactFields, ContactPayload};
pub use group_description::GroupDescription;
pub use pagination::{ContentRange, ListParams, ListRequest, PageRequest, SortOrder, Window};
pub use validation::ValidationError;

/// A database row passed through as a JSON object
pub type Row = serde_json::Map<String, serde_json::Value>;
