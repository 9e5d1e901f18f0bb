//! Payload-level dispatch
//!
//! Bridges raw message text to the typed orchestrator: resolve the source
//! type from a caller hint or the payload itself, pick the default target
//! for the source when the caller names none, decode, transform, encode.
//! The codec is a trait seam so wire bindings (XML, ISO envelopes) stay
//! outside this crate.
//!
//! Copyright (c) 2026 Mxbridge Team
//! Licensed under the Apache-2.0 license

use tracing::debug;

use crate::error::{Error, Result};
use crate::message_type::{detect_from_payload, normalize, MessageType, Normalized};
use crate::model::{pacs008, pacs009, pain001, PaymentDocument};
use crate::orchestrator::Orchestrator;

/// Decodes payload text into typed documents and back.
pub trait MessageCodec: Send + Sync {
    fn unmarshal(&self, payload: &str, message_type: MessageType) -> Result<PaymentDocument>;

    fn marshal(&self, document: &PaymentDocument) -> Result<String>;
}

/// JSON codec over the typed document models.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl MessageCodec for JsonCodec {
    fn unmarshal(&self, payload: &str, message_type: MessageType) -> Result<PaymentDocument> {
        let decoded = match message_type {
            MessageType::Pain001 => serde_json::from_str::<pain001::Document>(payload)
                .map(PaymentDocument::Pain001),
            MessageType::Pacs008 => serde_json::from_str::<pacs008::Document>(payload)
                .map(PaymentDocument::Pacs008),
            MessageType::Pacs009 => serde_json::from_str::<pacs009::Document>(payload)
                .map(PaymentDocument::Pacs009),
        };
        decoded.map_err(|e| {
            Error::invalid_structure(
                format!("payload is not a valid {message_type} document: {e}"),
                message_type,
                message_type,
            )
        })
    }

    fn marshal(&self, document: &PaymentDocument) -> Result<String> {
        let result = match document {
            PaymentDocument::Pain001(doc) => serde_json::to_string_pretty(doc),
            PaymentDocument::Pacs008(doc) => serde_json::to_string_pretty(doc),
            PaymentDocument::Pacs009(doc) => serde_json::to_string_pretty(doc),
        };
        result.map_err(|e| {
            Error::engine(
                "failed to encode mapped document",
                document.message_type(),
                document.message_type(),
                Some(e.into()),
            )
        })
    }
}

/// Text-in, text-out mapping front door.
pub struct MappingDispatcher<C: MessageCodec> {
    codec: C,
    orchestrator: Orchestrator,
}

impl<C: MessageCodec> MappingDispatcher<C> {
    pub fn new(codec: C, orchestrator: Orchestrator) -> Self {
        Self { codec, orchestrator }
    }

    pub fn orchestrator(&self) -> &Orchestrator {
        &self.orchestrator
    }

    /// Maps a raw payload. The source type comes from the hint when one is
    /// given, otherwise from payload detection; the target type comes from
    /// the hint when one is given, otherwise from the source's default
    /// route (pain.001 -> pacs.008, pacs.008 -> pacs.009).
    pub fn map_payload(
        &self,
        payload: &str,
        source_hint: Option<&str>,
        target_hint: Option<&str>,
    ) -> Result<String> {
        if payload.trim().is_empty() {
            return Err(Error::invalid_structure(
                "payload is empty",
                "unknown",
                target_hint.unwrap_or("unknown"),
            ));
        }
        let source_type = self.resolve_source_type(payload, source_hint)?;
        let target_type = resolve_target_type(source_type, target_hint)?;
        debug!(source = %source_type, target = %target_type, "dispatching payload");

        let document = self.codec.unmarshal(payload, source_type)?;
        let mapped = self
            .orchestrator
            .transform(Some(&document), source_type, target_type)?;
        self.codec.marshal(&mapped)
    }

    fn resolve_source_type(
        &self,
        payload: &str,
        source_hint: Option<&str>,
    ) -> Result<MessageType> {
        if let Some(hint) = source_hint {
            return match normalize(hint) {
                Normalized::Canonical(mt) => Ok(mt),
                Normalized::Unrecognized(raw) => Err(Error::invalid_structure(
                    format!("unrecognized source message type '{raw}'"),
                    raw.clone(),
                    "unknown",
                )),
            };
        }
        detect_from_payload(payload).ok_or_else(|| {
            Error::invalid_structure(
                "unable to determine source message type from payload",
                "unknown",
                "unknown",
            )
        })
    }
}

fn resolve_target_type(
    source_type: MessageType,
    target_hint: Option<&str>,
) -> Result<MessageType> {
    if let Some(hint) = target_hint {
        return match normalize(hint) {
            Normalized::Canonical(mt) => Ok(mt),
            Normalized::Unrecognized(raw) => Err(Error::MapperNotFound {
                source_type: source_type.to_string(),
                target_type: raw,
            }),
        };
    }
    match source_type {
        MessageType::Pain001 => Ok(MessageType::Pacs008),
        MessageType::Pacs008 => Ok(MessageType::Pacs009),
        MessageType::Pacs009 => Err(Error::MapperNotFound {
            source_type: source_type.to_string(),
            target_type: "no default target for pacs.009".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_orchestrator;

    fn dispatcher() -> MappingDispatcher<JsonCodec> {
        MappingDispatcher::new(JsonCodec, default_orchestrator())
    }

    fn pain001_payload() -> String {
        serde_json::json!({
            "cstmr_cdt_trf_initn": {
                "grp_hdr": {
                    "msg_id": "MSG-D",
                    "cre_dt_tm": "2026-08-26T09:00:00Z",
                    "nb_of_txs": "1",
                    "ctrl_sum": "100.00"
                },
                "pmt_inf": [{
                    "pmt_inf_id": "PMT-D",
                    "dbtr": { "nm": "A" },
                    "cdt_trf_tx_inf": [{
                        "pmt_id": { "end_to_end_id": "E2E-D" },
                        "amt": { "instd_amt": { "value": "100.00", "ccy": "EUR" } },
                        "cdtr": { "nm": "B" }
                    }]
                }]
            }
        })
        .to_string()
    }

    #[test]
    fn test_default_route_from_hint() {
        let out = dispatcher()
            .map_payload(&pain001_payload(), Some("pain.001.001.12"), None)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(
            value["fi_to_fi_cstmr_cdt_trf"]["grp_hdr"]["msg_id"],
            "MSG-D"
        );
        assert_eq!(value["fi_to_fi_cstmr_cdt_trf"]["pmt_drctn"], "OUTBOUND");
    }

    #[test]
    fn test_source_detected_from_payload() {
        let out = dispatcher()
            .map_payload(&pain001_payload(), None, None)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(
            value["fi_to_fi_cstmr_cdt_trf"]["grp_hdr"]["msg_id"],
            "MSG-D"
        );
    }

    #[test]
    fn test_empty_payload_rejected() {
        let err = dispatcher().map_payload("   ", None, None).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_SOURCE_STRUCTURE");
    }

    #[test]
    fn test_unrecognized_source_hint_rejected() {
        let err = dispatcher()
            .map_payload(&pain001_payload(), Some("camt.053"), None)
            .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_SOURCE_STRUCTURE");
    }

    #[test]
    fn test_unregistered_pair_surfaces_mapper_not_found() {
        let err = dispatcher()
            .map_payload(&pain001_payload(), Some("pain.001"), Some("pacs.009"))
            .unwrap_err();
        assert_eq!(err.error_code(), "MAPPER_NOT_FOUND");
    }

    #[test]
    fn test_malformed_payload_is_client_error() {
        let err = dispatcher()
            .map_payload("{not json", Some("pain.001"), None)
            .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_SOURCE_STRUCTURE");
        assert!(err.is_client_error());
    }
}
