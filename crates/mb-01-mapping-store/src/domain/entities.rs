//! # Domain Entities

use super::keys::Namespace;
use serde::{Deserialize, Serialize};

/// A single `<prefix><identifier> → value` record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingRecord {
    /// Full key including namespace prefix.
    pub key: String,
    /// Opaque identifier value.
    pub value: String,
}

impl MappingRecord {
    /// Create a record for `identifier` in `namespace`.
    pub fn new(namespace: Namespace, identifier: &str, value: impl Into<String>) -> Self {
        Self {
            key: namespace.key(identifier),
            value: value.into(),
        }
    }

    /// Namespace of this record, if its key carries a known prefix.
    pub fn namespace(&self) -> Option<Namespace> {
        Namespace::classify(&self.key)
    }

    /// Identifier part of the key.
    pub fn identifier(&self) -> Option<&str> {
        self.namespace()
            .and_then(|namespace| namespace.identifier(&self.key))
    }
}
