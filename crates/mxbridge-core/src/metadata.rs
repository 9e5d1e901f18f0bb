//! Transformation metadata
//!
//! A small descriptive record about a transformation capability: the pair of
//! message types, when the record was produced, and free-form properties.
//! Records are minted fresh on each request so the timestamp reflects the
//! query, not registration time.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::message_type::MessageType;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformationMetadata {
    pub source_type: MessageType,
    pub target_type: MessageType,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub properties: HashMap<String, String>,
}

impl TransformationMetadata {
    pub fn new(source_type: MessageType, target_type: MessageType) -> Self {
        Self {
            source_type,
            target_type,
            timestamp: Utc::now(),
            properties: HashMap::new(),
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for TransformationMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} at {}",
            self.source_type, self.target_type, self.timestamp
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_carries_pair_and_properties() {
        let md = TransformationMetadata::new(MessageType::Pain001, MessageType::Pacs008)
            .with_property("mapper", "pain001-to-pacs008");
        assert_eq!(md.source_type, MessageType::Pain001);
        assert_eq!(md.target_type, MessageType::Pacs008);
        assert_eq!(md.properties.get("mapper").map(String::as_str), Some("pain001-to-pacs008"));
    }

    #[test]
    fn test_metadata_display() {
        let md = TransformationMetadata::new(MessageType::Pacs008, MessageType::Pacs009);
        let shown = md.to_string();
        assert!(shown.starts_with("pacs.008.001.13 -> pacs.009.001.12 at "));
    }
}
