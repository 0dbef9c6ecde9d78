//! Contact entity and its validated input

use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Contact row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: i64,
    pub info_type: String,
    pub value: String,
}

/// Body of `POST /contacts` and `PUT /contacts/{id}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactPayload {
    pub info_type: Option<String>,
    pub value: Option<String>,
}

/// Contact fields that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactFields {
    info_type: String,
    value: String,
}

impl ContactFields {
    /// Both fields must be present and not blank.
    pub fn new(info_type: Option<String>, value: Option<String>) -> Result<Self, ValidationError> {
        Ok(Self {
            info_type: required("info_type", info_type)?,
            value: required("value", value)?,
        })
    }

    pub fn info_type(&self) -> &str {
        &self.info_type
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Attach an id, producing the entity echoed back to the client.
    pub fn into_contact(self, id: i64) -> Contact {
        Contact {
            id,
            info_type: self.info_type,
            value: self.value,
        }
    }
}

impl TryFrom<ContactPayload> for ContactFields {
    type Error = ValidationError;

    fn try_from(payload: ContactPayload) -> Result<Self, Self::Error> {
        Self::new(payload.info_type, payload.value)
    }
}

fn required(field: &'static str, value: Option<String>) -> Result<String, ValidationError> {
    match value {
        None => Err(ValidationError::Missing { field }),
        Some(v) if v.trim().is_empty() => Err(ValidationError::Empty { field }),
        Some(v) => Ok(v),
    }
}
