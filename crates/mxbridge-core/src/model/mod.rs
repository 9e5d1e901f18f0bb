//! Typed document models for the supported ISO 20022 releases
//!
//! Each release gets its own module with its own shapes; the skew between
//! them (flat identifier slots vs generic lists, list-valued vs single-valued
//! proprietary slots, structured remittance lists vs an inline slot) is the
//! whole reason the mapping layer exists, so the models never paper over it.

pub mod common;
pub mod pacs008;
pub mod pacs009;
pub mod pain001;

use crate::message_type::MessageType;

/// A parsed payment document together with its release tag.
///
/// This is the unit the orchestrator routes: mappers accept and produce
/// `PaymentDocument` values and downcast to the release they declare support
/// for.
#[derive(Debug, Clone, PartialEq)]
pub enum PaymentDocument {
    Pain001(pain001::Document),
    Pacs008(pacs008::Document),
    Pacs009(pacs009::Document),
}

impl PaymentDocument {
    pub fn message_type(&self) -> MessageType {
        match self {
            PaymentDocument::Pain001(_) => MessageType::Pain001,
            PaymentDocument::Pacs008(_) => MessageType::Pacs008,
            PaymentDocument::Pacs009(_) => MessageType::Pacs009,
        }
    }

    pub fn as_pain001(&self) -> Option<&pain001::Document> {
        match self {
            PaymentDocument::Pain001(doc) => Some(doc),
            _ => None,
        }
    }

    pub fn as_pacs008(&self) -> Option<&pacs008::Document> {
        match self {
            PaymentDocument::Pacs008(doc) => Some(doc),
            _ => None,
        }
    }

    pub fn as_pacs009(&self) -> Option<&pacs009::Document> {
        match self {
            PaymentDocument::Pacs009(doc) => Some(doc),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_type_tag_matches_variant() {
        let doc = PaymentDocument::Pain001(pain001::Document::default());
        assert_eq!(doc.message_type(), MessageType::Pain001);
        assert!(doc.as_pain001().is_some());
        assert!(doc.as_pacs008().is_none());
    }
}
