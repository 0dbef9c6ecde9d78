use serde::{Deserialize, Serialize};

/// Group description row, or the placeholder served when the table is empty
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupDescription {
    pub id: Option<i64>,
    pub description: String,
}

impl GroupDescription {
    /// `{ "id": null, "description": "" }`
    pub fn placeholder() -> Self {
        Self::default()
    }
}
