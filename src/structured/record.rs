//! Extracted record: the validated projection of a backend reply.

use crate::{Error, Result};
use serde::Serialize;
use std::collections::BTreeMap;

/// Field name to string value, containing exactly the schema's required fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ExtractedRecord {
    fields: BTreeMap<String, String>,
}

impl ExtractedRecord {
    pub(crate) fn from_fields(fields: BTreeMap<String, String>) -> Self {
        Self { fields }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Remove a field the schema guarantees.
    pub fn take_required(&mut self, field: &str) -> Result<String> {
        self.fields.remove(field).ok_or_else(|| Error::SchemaViolation {
            missing: vec![field.to_string()],
        })
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.fields
    }
}
