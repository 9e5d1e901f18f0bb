//! Error types for the mxbridge core library
//!
//! Every mapping failure is a single typed value carrying the failure message,
//! the source/target message types of the attempted transformation, a stable
//! error code, and (for wrapped engine failures) an opaque cause.
//!
//! Copyright (c) 2026 Mxbridge Team
//! Licensed under the Apache-2.0 license

use thiserror::Error;

/// Main error type for payment message transformations
#[derive(Error, Debug)]
pub enum Error {
    /// The source document reference was absent
    #[error("source document cannot be null ({source_type} -> {target_type})")]
    NullSource {
        source_type: String,
        target_type: String,
    },

    /// The source document is missing a structural container required by its
    /// declared message type
    #[error("invalid source structure: {message}")]
    InvalidSourceStructure {
        message: String,
        source_type: String,
        target_type: String,
    },

    /// A mandatory field failed pre-validation
    #[error("missing required field '{field}': {message}")]
    MissingRequiredField {
        field: String,
        message: String,
        source_type: String,
        target_type: String,
    },

    /// No mapper is registered for the requested transformation pair
    #[error("no mapper found for transformation from {source_type} to {target_type}")]
    MapperNotFound {
        source_type: String,
        target_type: String,
    },

    /// A mapper was found but rejected the provided source document
    #[error("mapper does not support the provided source message ({source_type} -> {target_type})")]
    UnsupportedSource {
        source_type: String,
        target_type: String,
    },

    /// Any other failure inside the mapping engine, with the underlying cause
    /// retained but its concrete type never exposed across the boundary
    #[error("failed to transform {source_type} to {target_type}: {message}")]
    MappingEngineError {
        message: String,
        source_type: String,
        target_type: String,
        cause: Option<anyhow::Error>,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Stable error code, preserved for diagnostics and transport mapping
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::NullSource { .. } => "NULL_SOURCE",
            Error::InvalidSourceStructure { .. } => "INVALID_SOURCE_STRUCTURE",
            Error::MissingRequiredField { .. } => "MISSING_REQUIRED_FIELD",
            Error::MapperNotFound { .. } => "MAPPER_NOT_FOUND",
            Error::UnsupportedSource { .. } => "UNSUPPORTED_SOURCE",
            Error::MappingEngineError { .. } => "MAPPING_ENGINE_ERROR",
        }
    }

    /// Source message type the failing transformation was attempted from
    pub fn source_type(&self) -> &str {
        match self {
            Error::NullSource { source_type, .. }
            | Error::InvalidSourceStructure { source_type, .. }
            | Error::MissingRequiredField { source_type, .. }
            | Error::MapperNotFound { source_type, .. }
            | Error::UnsupportedSource { source_type, .. }
            | Error::MappingEngineError { source_type, .. } => source_type,
        }
    }

    /// Target message type the failing transformation was attempted towards
    pub fn target_type(&self) -> &str {
        match self {
            Error::NullSource { target_type, .. }
            | Error::InvalidSourceStructure { target_type, .. }
            | Error::MissingRequiredField { target_type, .. }
            | Error::MapperNotFound { target_type, .. }
            | Error::UnsupportedSource { target_type, .. }
            | Error::MappingEngineError { target_type, .. } => target_type,
        }
    }

    /// Transport classification: client-class failures are caused by the
    /// request (malformed input, unknown or unsupported transformation);
    /// everything else is a server-class engine failure.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Error::MappingEngineError { .. })
    }

    pub(crate) fn null_source(source_type: impl ToString, target_type: impl ToString) -> Self {
        Error::NullSource {
            source_type: source_type.to_string(),
            target_type: target_type.to_string(),
        }
    }

    pub(crate) fn invalid_structure(
        message: impl Into<String>,
        source_type: impl ToString,
        target_type: impl ToString,
    ) -> Self {
        Error::InvalidSourceStructure {
            message: message.into(),
            source_type: source_type.to_string(),
            target_type: target_type.to_string(),
        }
    }

    pub(crate) fn missing_field(
        field: impl Into<String>,
        message: impl Into<String>,
        source_type: impl ToString,
        target_type: impl ToString,
    ) -> Self {
        Error::MissingRequiredField {
            field: field.into(),
            message: message.into(),
            source_type: source_type.to_string(),
            target_type: target_type.to_string(),
        }
    }

    pub(crate) fn engine(
        message: impl Into<String>,
        source_type: impl ToString,
        target_type: impl ToString,
        cause: Option<anyhow::Error>,
    ) -> Self {
        Error::MappingEngineError {
            message: message.into(),
            source_type: source_type.to_string(),
            target_type: target_type.to_string(),
            cause,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::null_source("pain.001.001.12", "pacs.008.001.13");
        assert_eq!(
            err.to_string(),
            "source document cannot be null (pain.001.001.12 -> pacs.008.001.13)"
        );
    }

    #[test]
    fn test_error_codes() {
        let err = Error::missing_field("grp_hdr.msg_id", "message id is mandatory", "a", "b");
        assert_eq!(err.error_code(), "MISSING_REQUIRED_FIELD");
        assert_eq!(err.source_type(), "a");
        assert_eq!(err.target_type(), "b");
    }

    #[test]
    fn test_client_error_classification() {
        assert!(Error::null_source("a", "b").is_client_error());
        assert!(Error::MapperNotFound {
            source_type: "a".into(),
            target_type: "b".into(),
        }
        .is_client_error());
        assert!(!Error::engine("boom", "a", "b", None).is_client_error());
    }
}
