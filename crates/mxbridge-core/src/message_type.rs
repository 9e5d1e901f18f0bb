//! Message type identification and normalization
//!
//! The engine works with exactly three ISO 20022 message releases. Everything
//! the outside world hands us (HTTP headers, queue properties, file names)
//! is normalized into the closed [`MessageType`] enum before any mapping
//! decision is made; free-form strings never travel further than this module.
//!
//! Copyright (c) 2026 Mxbridge Team
//! Licensed under the Apache-2.0 license

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// The closed set of message releases this engine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    /// pain.001.001.12 - customer credit transfer initiation
    Pain001,
    /// pacs.008.001.13 - FI-to-FI customer credit transfer
    Pacs008,
    /// pacs.009.001.12 - financial institution credit transfer
    Pacs009,
}

impl MessageType {
    /// The canonical dotted identifier, release suffix included.
    pub const fn canonical_id(&self) -> &'static str {
        match self {
            MessageType::Pain001 => "pain.001.001.12",
            MessageType::Pacs008 => "pacs.008.001.13",
            MessageType::Pacs009 => "pacs.009.001.12",
        }
    }

    pub const fn all() -> [MessageType; 3] {
        [
            MessageType::Pain001,
            MessageType::Pacs008,
            MessageType::Pacs009,
        ]
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_id())
    }
}

/// Outcome of normalizing a free-form message type string.
///
/// Unrecognized inputs are carried along (cleaned) rather than silently
/// dropped, so callers can produce precise diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Normalized {
    Canonical(MessageType),
    Unrecognized(String),
}

impl Normalized {
    pub fn message_type(&self) -> Option<MessageType> {
        match self {
            Normalized::Canonical(mt) => Some(*mt),
            Normalized::Unrecognized(_) => None,
        }
    }
}

impl fmt::Display for Normalized {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Normalized::Canonical(mt) => f.write_str(mt.canonical_id()),
            Normalized::Unrecognized(raw) => f.write_str(raw),
        }
    }
}

/// Normalizes a raw message type string to a canonical [`MessageType`].
///
/// Matching is case-insensitive, ignores embedded whitespace, and accepts
/// both dotted ("pacs.008") and undotted ("pacs008") family spellings with or
/// without a release suffix. Families are probed in a fixed priority order
/// (pacs.009, pacs.008, pain.001) so mixed inputs resolve deterministically.
pub fn normalize(raw: &str) -> Normalized {
    let cleaned: String = raw.trim().to_lowercase().split_whitespace().collect();
    if cleaned.is_empty() {
        return Normalized::Unrecognized(cleaned);
    }
    if cleaned.contains("pacs.009") || cleaned.contains("pacs009") {
        return Normalized::Canonical(MessageType::Pacs009);
    }
    if cleaned.contains("pacs.008") || cleaned.contains("pacs008") {
        return Normalized::Canonical(MessageType::Pacs008);
    }
    if cleaned.contains("pain.001") || cleaned.contains("pain001") {
        return Normalized::Canonical(MessageType::Pain001);
    }
    Normalized::Unrecognized(cleaned)
}

fn root_element_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // First real element tag, skipping XML declarations and comments.
        Regex::new(r"<\s*([A-Za-z_][\w.:-]*)((?:[^>]|\n)*?)>").unwrap()
    })
}

fn xmlns_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"xmlns(?::[\w.-]+)?\s*=\s*["']([^"']*)["']"#).unwrap())
}

/// Best-effort detection of the message type from a raw payload.
///
/// Tries the root element's namespace declarations first, then falls back to
/// content heuristics (family identifiers and well-known container element
/// names anywhere in the text). Returns `None` when nothing matches; this
/// function never fails.
pub fn detect_from_payload(payload: &str) -> Option<MessageType> {
    let trimmed = payload.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(found) = detect_from_namespaces(trimmed) {
        return Some(found);
    }

    let lower = trimmed.to_lowercase();
    // pacs.008 is probed before pacs.009: the pacs.008 container name embeds
    // shorter fragments that would otherwise shadow it. Container names are
    // matched in both their XML and snake_case spellings.
    if lower.contains("pacs.008")
        || lower.contains("pacs008")
        || lower.contains("fitoficstmrcdttrf")
        || lower.contains("fi_to_fi_cstmr_cdt_trf")
    {
        return Some(MessageType::Pacs008);
    }
    if lower.contains("pacs.009")
        || lower.contains("pacs009")
        || lower.contains("ficdttrf")
        || lower.contains("fi_cdt_trf")
    {
        return Some(MessageType::Pacs009);
    }
    if lower.contains("pain.001")
        || lower.contains("pain001")
        || lower.contains("cstmrcdttrfinitn")
        || lower.contains("cstmr_cdt_trf_initn")
    {
        return Some(MessageType::Pain001);
    }
    None
}

fn detect_from_namespaces(payload: &str) -> Option<MessageType> {
    if let Some(caps) = root_element_regex().captures(payload) {
        let attrs = caps.get(2).map(|m| m.as_str()).unwrap_or_default();
        for ns in xmlns_regex().captures_iter(attrs) {
            let uri = ns.get(1).map(|m| m.as_str().to_lowercase()).unwrap_or_default();
            if uri.contains("pacs.009") {
                return Some(MessageType::Pacs009);
            }
            if uri.contains("pacs.008") {
                return Some(MessageType::Pacs008);
            }
            if uri.contains("pain.001") {
                return Some(MessageType::Pain001);
            }
        }
    }
    None
}
