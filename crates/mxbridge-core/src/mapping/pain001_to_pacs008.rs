//! pain.001.001.12 -> pacs.008.001.13
//!
//! Turns a customer credit transfer initiation into the interbank customer
//! credit transfer it originates. Group-level fields run through the mapping
//! table; per-transaction mapping is an aggregate qualifier that flattens
//! every instruction batch into one transaction list, folding identifier,
//! payment-type and remittance skew through the shared bridging layers.

use std::collections::HashMap;

use serde_json::{json, Value};

use crate::config::MapperConfig;
use crate::error::{Error, Result};
use crate::mapping::adapter::{
    apply_agent_instructions, apply_institution, apply_payment_type, resolve_agent_instructions,
    resolve_institution, resolve_payment_type, AgentInstructionSource, AgentInstructionTarget,
    InstitutionSource, InstitutionTarget, PaymentTypeSource, PaymentTypeTarget, Resolved,
};
use crate::mapping::identifiers::{
    aggregate_identifiers, attach_proprietary, PartyIdentificationSource, ProprietarySlot,
};
use crate::mapping::path::get_path;
use crate::mapping::remittance::{reconcile_remittance, RemittanceTarget};
use crate::mapping::rule::{MappingRule, MappingTable, QualifierFn};
use crate::mapping::trace::TransformTrace;
use crate::message_type::MessageType;
use crate::metadata::TransformationMetadata;
use crate::model::common::{CurrencyAmount, PaymentIdentification, RemittanceInformation, SettlementMethod};
use crate::model::{pacs008, pain001, PaymentDocument};
use crate::orchestrator::PaymentMessageMapper;

const SOURCE: MessageType = MessageType::Pain001;
const TARGET: MessageType = MessageType::Pacs008;

/// Every target field this mapping is aware of. Fields covered by no rule
/// are reported per the configured unmapped-target policy.
const TARGET_FIELDS: &[&str] = &[
    "fi_to_fi_cstmr_cdt_trf.grp_hdr.msg_id",
    "fi_to_fi_cstmr_cdt_trf.grp_hdr.cre_dt_tm",
    "fi_to_fi_cstmr_cdt_trf.grp_hdr.nb_of_txs",
    "fi_to_fi_cstmr_cdt_trf.grp_hdr.ctrl_sum",
    "fi_to_fi_cstmr_cdt_trf.grp_hdr.ttl_intr_bk_sttlm_amt",
    "fi_to_fi_cstmr_cdt_trf.grp_hdr.intr_bk_sttlm_dt",
    "fi_to_fi_cstmr_cdt_trf.grp_hdr.sttlm_inf.sttlm_mtd",
    "fi_to_fi_cstmr_cdt_trf.grp_hdr.sttlm_inf.sttlm_acct",
    "fi_to_fi_cstmr_cdt_trf.grp_hdr.instg_agt",
    "fi_to_fi_cstmr_cdt_trf.grp_hdr.instd_agt",
    "fi_to_fi_cstmr_cdt_trf.cdt_trf_tx_inf",
    "fi_to_fi_cstmr_cdt_trf.pmt_drctn",
    "fi_to_fi_cstmr_cdt_trf.initl_sts",
];

pub struct Pain001ToPacs008Mapper {
    table: MappingTable,
    config: MapperConfig,
}

impl Pain001ToPacs008Mapper {
    pub fn new(config: MapperConfig) -> Self {
        let mut qualifiers: HashMap<&'static str, QualifierFn> = HashMap::new();
        qualifiers.insert("settlement_amount", settlement_amount);
        qualifiers.insert("transactions", transactions);
        let table = MappingTable::new(
            SOURCE,
            TARGET,
            vec![
                MappingRule::direct(
                    "cstmr_cdt_trf_initn.grp_hdr.msg_id",
                    "fi_to_fi_cstmr_cdt_trf.grp_hdr.msg_id",
                ),
                MappingRule::direct(
                    "cstmr_cdt_trf_initn.grp_hdr.cre_dt_tm",
                    "fi_to_fi_cstmr_cdt_trf.grp_hdr.cre_dt_tm",
                ),
                MappingRule::direct(
                    "cstmr_cdt_trf_initn.grp_hdr.nb_of_txs",
                    "fi_to_fi_cstmr_cdt_trf.grp_hdr.nb_of_txs",
                ),
                MappingRule::direct(
                    "cstmr_cdt_trf_initn.grp_hdr.ctrl_sum",
                    "fi_to_fi_cstmr_cdt_trf.grp_hdr.ctrl_sum",
                ),
                MappingRule::derived(
                    "cstmr_cdt_trf_initn.grp_hdr.ctrl_sum",
                    "fi_to_fi_cstmr_cdt_trf.grp_hdr.ttl_intr_bk_sttlm_amt",
                    "settlement_amount",
                ),
                // First batch's requested execution date becomes the
                // interbank settlement date.
                MappingRule::direct(
                    "cstmr_cdt_trf_initn.pmt_inf.0.reqd_exctn_dt",
                    "fi_to_fi_cstmr_cdt_trf.grp_hdr.intr_bk_sttlm_dt",
                ),
                MappingRule::constant(
                    "fi_to_fi_cstmr_cdt_trf.grp_hdr.sttlm_inf.sttlm_mtd",
                    json!("CLRG"),
                ),
                // Instructing and instructed agents are assigned by the
                // clearing layer, never by this mapping.
                MappingRule::ignore("fi_to_fi_cstmr_cdt_trf.grp_hdr.instg_agt"),
                MappingRule::ignore("fi_to_fi_cstmr_cdt_trf.grp_hdr.instd_agt"),
                MappingRule::aggregate(
                    "cstmr_cdt_trf_initn.pmt_inf",
                    "fi_to_fi_cstmr_cdt_trf.cdt_trf_tx_inf",
                    "transactions",
                ),
                MappingRule::constant("fi_to_fi_cstmr_cdt_trf.pmt_drctn", json!("OUTBOUND")),
                MappingRule::constant("fi_to_fi_cstmr_cdt_trf.initl_sts", json!("INITD")),
            ],
            qualifiers,
            TARGET_FIELDS,
            config.unmapped_target_policy,
        );
        Self { table, config }
    }

    /// Maps a pain.001 document to pacs.008, returning the mapped document
    /// together with its degradation trace.
    pub fn map_document(
        &self,
        source: &pain001::Document,
    ) -> Result<(pacs008::Document, TransformTrace)> {
        let initiation = source.cstmr_cdt_trf_initn.as_ref().ok_or_else(|| {
            Error::invalid_structure(
                "pain.001 document carries no CustomerCreditTransferInitiation",
                SOURCE,
                TARGET,
            )
        })?;
        validate_source(initiation)?;

        let mut trace = TransformTrace::new();
        let source_value = serde_json::to_value(source)
            .map_err(|e| engine("failed to serialize source document", e))?;
        let target_value = self.table.apply(&source_value, &self.config, &mut trace)?;
        let document: pacs008::Document = serde_json::from_value(target_value)
            .map_err(|e| engine("mapped value tree does not form a valid pacs.008 document", e))?;

        validate_target(&document)?;
        Ok((document, trace))
    }
}

impl PaymentMessageMapper for Pain001ToPacs008Mapper {
    fn source_type(&self) -> MessageType {
        SOURCE
    }

    fn target_type(&self) -> MessageType {
        TARGET
    }

    fn supports(&self, source: &PaymentDocument) -> bool {
        source.as_pain001().is_some()
    }

    fn transform(&self, source: &PaymentDocument) -> Result<PaymentDocument> {
        let doc = source.as_pain001().ok_or_else(|| Error::UnsupportedSource {
            source_type: SOURCE.to_string(),
            target_type: TARGET.to_string(),
        })?;
        let (mapped, trace) = self.map_document(doc)?;
        trace.log_summary(SOURCE, TARGET);
        Ok(PaymentDocument::Pacs008(mapped))
    }

    fn metadata(&self) -> TransformationMetadata {
        TransformationMetadata::new(SOURCE, TARGET).with_property("mapper", "pain001-to-pacs008")
    }
}

/// First-violation pre-validation of the mandatory source fields.
fn validate_source(initiation: &pain001::CustomerCreditTransferInitiation) -> Result<()> {
    if initiation.grp_hdr.msg_id.trim().is_empty() {
        return Err(Error::missing_field(
            "grp_hdr.msg_id",
            "message identification is mandatory",
            SOURCE,
            TARGET,
        ));
    }
    if initiation.grp_hdr.cre_dt_tm.is_none() {
        return Err(Error::missing_field(
            "grp_hdr.cre_dt_tm",
            "creation date-time is mandatory",
            SOURCE,
            TARGET,
        ));
    }
    if initiation.pmt_inf.is_empty() {
        return Err(Error::missing_field(
            "pmt_inf",
            "at least one payment instruction is required",
            SOURCE,
            TARGET,
        ));
    }
    if initiation.pmt_inf.iter().all(|i| i.cdt_trf_tx_inf.is_empty()) {
        return Err(Error::missing_field(
            "pmt_inf.cdt_trf_tx_inf",
            "at least one credit transfer transaction is required",
            SOURCE,
            TARGET,
        ));
    }
    for instruction in &initiation.pmt_inf {
        if instruction
            .dbtr
            .as_ref()
            .and_then(|d| d.nm.as_deref())
            .map_or(true, |nm| nm.trim().is_empty())
        {
            return Err(Error::missing_field(
                "pmt_inf.dbtr.nm",
                "debtor name is mandatory",
                SOURCE,
                TARGET,
            ));
        }
        for tx in &instruction.cdt_trf_tx_inf {
            if tx
                .cdtr
                .as_ref()
                .and_then(|c| c.nm.as_deref())
                .map_or(true, |nm| nm.trim().is_empty())
            {
                return Err(Error::missing_field(
                    "cdt_trf_tx_inf.cdtr.nm",
                    "creditor name is mandatory",
                    SOURCE,
                    TARGET,
                ));
            }
            if !tx.amt.settlement_amount().is_positive() {
                return Err(Error::missing_field(
                    "cdt_trf_tx_inf.amt",
                    "transaction amount must be positive",
                    SOURCE,
                    TARGET,
                ));
            }
        }
    }
    Ok(())
}

/// Post-mapping invariants on the produced pacs.008 document. A violation
/// here is an engine defect, not bad input.
fn validate_target(document: &pacs008::Document) -> Result<()> {
    let envelope = document.fi_to_fi_cstmr_cdt_trf.as_ref().ok_or_else(|| {
        engine_invariant("mapped document carries no FIToFICustomerCreditTransfer")
    })?;
    if envelope.grp_hdr.msg_id.trim().is_empty() {
        return Err(engine_invariant("mapped group header lost the message identification"));
    }
    if envelope.cdt_trf_tx_inf.is_empty() {
        return Err(engine_invariant("mapped document carries no transactions"));
    }
    let settlement_ok = envelope
        .grp_hdr
        .sttlm_inf
        .as_ref()
        .is_some_and(|s| s.sttlm_mtd == SettlementMethod::Clrg);
    if !settlement_ok {
        return Err(engine_invariant("settlement method must be CLRG"));
    }
    if envelope.pmt_drctn.as_deref() != Some("OUTBOUND") {
        return Err(engine_invariant("payment direction must be OUTBOUND"));
    }
    if envelope.initl_sts.as_deref() != Some("INITD") {
        return Err(engine_invariant("initial status must be INITD"));
    }
    Ok(())
}

fn engine(message: &str, cause: impl Into<anyhow::Error>) -> Error {
    Error::engine(message, SOURCE, TARGET, Some(cause.into()))
}

fn engine_invariant(message: &str) -> Error {
    Error::engine(message, SOURCE, TARGET, None)
}

/// Qualifier: total interbank settlement amount from the control sum plus
/// the first transaction's currency, falling back to the configured default
/// currency; omitted entirely when no currency can be determined.
fn settlement_amount(
    source: &Value,
    config: &MapperConfig,
    trace: &mut TransformTrace,
) -> Result<Option<Value>> {
    let Some(ctrl_sum_value) = get_path(source, "cstmr_cdt_trf_initn.grp_hdr.ctrl_sum") else {
        return Ok(None);
    };
    let ctrl_sum: rust_decimal::Decimal = serde_json::from_value(ctrl_sum_value.clone())
        .map_err(|e| engine("control sum is not a valid decimal", e))?;
    let ccy = first_transaction_currency(source).or_else(|| config.settlement_ccy_default.clone());
    match ccy {
        Some(ccy) => {
            let amount = CurrencyAmount::new(ctrl_sum, ccy);
            Ok(Some(serde_json::to_value(amount).map_err(|e| {
                engine("failed to serialize settlement amount", e)
            })?))
        }
        None => {
            trace.record_absent_source(
                "cstmr_cdt_trf_initn.pmt_inf",
                "no currency available for the total settlement amount",
            );
            Ok(None)
        }
    }
}

fn first_transaction_currency(source: &Value) -> Option<String> {
    let amt = get_path(source, "cstmr_cdt_trf_initn.pmt_inf.0.cdt_trf_tx_inf.0.amt")?;
    let choice: pain001::AmountChoice = serde_json::from_value(amt.clone()).ok()?;
    Some(choice.settlement_amount().ccy)
}

/// Qualifier: flattens every instruction batch into one transaction list.
/// Batch-level values (debtor, debtor account, debtor agent, charge bearer,
/// payment type) apply to each transaction unless the transaction overrides
/// them.
fn transactions(
    source: &Value,
    _config: &MapperConfig,
    trace: &mut TransformTrace,
) -> Result<Option<Value>> {
    let Some(pmt_inf_value) = get_path(source, "cstmr_cdt_trf_initn.pmt_inf") else {
        return Ok(None);
    };
    let instructions: Vec<pain001::PaymentInstruction> =
        serde_json::from_value(pmt_inf_value.clone())
            .map_err(|e| engine("payment instructions do not match the pain.001 shape", e))?;

    let mut mapped = Vec::new();
    for instruction in &instructions {
        for tx in &instruction.cdt_trf_tx_inf {
            mapped.push(map_transaction(instruction, tx, trace));
        }
    }
    if mapped.is_empty() {
        return Ok(None);
    }
    Ok(Some(serde_json::to_value(mapped).map_err(|e| {
        engine("failed to serialize mapped transactions", e)
    })?))
}

fn map_transaction(
    instruction: &pain001::PaymentInstruction,
    tx: &pain001::CreditTransferTransaction,
    trace: &mut TransformTrace,
) -> pacs008::CreditTransferTransaction {
    let mut target = pacs008::CreditTransferTransaction {
        pmt_id: PaymentIdentification {
            instr_id: tx.pmt_id.instr_id.clone(),
            end_to_end_id: tx.pmt_id.end_to_end_id.clone(),
            tx_id: None,
        },
        pmt_tp_inf: None,
        intr_bk_sttlm_amt: tx.amt.settlement_amount(),
        chrg_br: tx.chrg_br.or(instruction.chrg_br),
        prvs_instg_agt: None,
        ultmt_dbtr: tx.ultmt_dbtr.as_ref().map(|p| map_party(p, trace)),
        dbtr: instruction.dbtr.as_ref().map(|p| map_party(p, trace)),
        dbtr_acct: instruction.dbtr_acct.clone(),
        dbtr_agt: None,
        cdtr_agt: None,
        cdtr: tx.cdtr.as_ref().map(|p| map_party(p, trace)),
        cdtr_acct: tx.cdtr_acct.clone(),
        ultmt_cdtr: tx.ultmt_cdtr.as_ref().map(|p| map_party(p, trace)),
        instr_for_cdtr_agt: Vec::new(),
        purp: tx.purp.clone(),
        rmt_inf: None,
    };

    // Transaction-level payment type information wins over the batch level.
    let pti = tx.pmt_tp_inf.as_ref().or(instruction.pmt_tp_inf.as_ref());
    if let Resolved::Value(view) = resolve_payment_type(pti.map(PaymentTypeSource::Pain001)) {
        apply_payment_type(PaymentTypeTarget::Pacs008(&mut target.pmt_tp_inf), &view, trace);
    }

    if let Resolved::Value(view) =
        resolve_institution(instruction.dbtr_agt.as_ref().map(InstitutionSource::Pain001))
    {
        apply_institution(InstitutionTarget::Pacs008(&mut target.dbtr_agt), &view, trace);
    }
    if let Resolved::Value(view) =
        resolve_institution(tx.cdtr_agt.as_ref().map(InstitutionSource::Pain001))
    {
        apply_institution(InstitutionTarget::Pacs008(&mut target.cdtr_agt), &view, trace);
    }

    if let Resolved::Value(views) =
        resolve_agent_instructions(AgentInstructionSource::Pain001(&tx.instr_for_cdtr_agt))
    {
        apply_agent_instructions(
            AgentInstructionTarget::Pacs008(&mut target.instr_for_cdtr_agt),
            &views,
            trace,
        );
    }

    if let Some(rmt) = &tx.rmt_inf {
        let mut out = RemittanceInformation::default();
        reconcile_remittance(rmt, RemittanceTarget::StructuredList(&mut out), trace);
        if !out.is_empty() {
            target.rmt_inf = Some(out);
        }
    }

    target
}

fn map_party(
    party: &pain001::PartyIdentification,
    trace: &mut TransformTrace,
) -> pacs008::PartyIdentification {
    let id = party.id.as_ref().map(|party_id| {
        let aggregated = aggregate_identifiers(PartyIdentificationSource::Pain001(party_id));
        let mut org = pacs008::OrganisationIdentification {
            any_bic: aggregated.bic,
            othr: Vec::new(),
        };
        attach_proprietary(
            ProprietarySlot::ListValued(&mut org.othr),
            aggregated.proprietary,
            trace,
        );
        pacs008::PartyId {
            org_id: Some(org),
            prvt_id: None,
        }
    });
    pacs008::PartyIdentification {
        nm: party.nm.clone(),
        pstl_adr: party.pstl_adr.clone(),
        id,
        ctry_of_res: party.ctry_of_res.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;
    use crate::model::common::GenericIdentification;

    fn party(name: &str) -> pain001::PartyIdentification {
        pain001::PartyIdentification {
            nm: Some(name.to_string()),
            ..Default::default()
        }
    }

    fn test_document() -> pain001::Document {
        pain001::Document {
            cstmr_cdt_trf_initn: Some(pain001::CustomerCreditTransferInitiation {
                grp_hdr: pain001::GroupHeader {
                    msg_id: "MSG-1".into(),
                    cre_dt_tm: Some(Utc.with_ymd_and_hms(2026, 8, 26, 9, 0, 0).unwrap()),
                    nb_of_txs: "1".into(),
                    ctrl_sum: Some(Decimal::new(10000, 2)),
                    initg_pty: None,
                },
                pmt_inf: vec![pain001::PaymentInstruction {
                    pmt_inf_id: "PMT-1".into(),
                    pmt_tp_inf: None,
                    reqd_exctn_dt: None,
                    chrg_br: None,
                    dbtr: Some(party("A")),
                    dbtr_acct: None,
                    dbtr_agt: None,
                    cdt_trf_tx_inf: vec![pain001::CreditTransferTransaction {
                        pmt_id: pain001::PaymentIdentification {
                            instr_id: Some("INSTR-1".into()),
                            end_to_end_id: "E2E-1".into(),
                        },
                        pmt_tp_inf: None,
                        amt: pain001::AmountChoice::InstdAmt(CurrencyAmount::new(
                            Decimal::new(10000, 2),
                            "EUR",
                        )),
                        chrg_br: None,
                        ultmt_dbtr: None,
                        cdtr_agt: None,
                        cdtr: Some(party("B")),
                        cdtr_acct: None,
                        ultmt_cdtr: None,
                        instr_for_cdtr_agt: vec![],
                        purp: None,
                        rmt_inf: None,
                    }],
                }],
            }),
        }
    }

    fn mapper() -> Pain001ToPacs008Mapper {
        Pain001ToPacs008Mapper::new(MapperConfig::default().with_settlement_ccy_default("EUR"))
    }

    #[test]
    fn test_group_header_carries_over() {
        let (doc, _) = mapper().map_document(&test_document()).unwrap();
        let env = doc.fi_to_fi_cstmr_cdt_trf.unwrap();
        assert_eq!(env.grp_hdr.msg_id, "MSG-1");
        assert_eq!(env.grp_hdr.nb_of_txs, "1");
        assert_eq!(env.grp_hdr.ctrl_sum, Some(Decimal::new(10000, 2)));
    }

    #[test]
    fn test_settlement_defaults_applied() {
        let (doc, _) = mapper().map_document(&test_document()).unwrap();
        let env = doc.fi_to_fi_cstmr_cdt_trf.unwrap();
        assert_eq!(
            env.grp_hdr.sttlm_inf.unwrap().sttlm_mtd,
            SettlementMethod::Clrg
        );
        assert_eq!(env.pmt_drctn.as_deref(), Some("OUTBOUND"));
        assert_eq!(env.initl_sts.as_deref(), Some("INITD"));
    }

    #[test]
    fn test_settlement_amount_from_control_sum_and_tx_currency() {
        let (doc, _) = mapper().map_document(&test_document()).unwrap();
        let total = doc
            .fi_to_fi_cstmr_cdt_trf
            .unwrap()
            .grp_hdr
            .ttl_intr_bk_sttlm_amt
            .unwrap();
        assert_eq!(total.value, Decimal::new(10000, 2));
        assert_eq!(total.ccy, "EUR");
    }

    /// First batch carries no transactions, so no transaction currency is
    /// visible at the probed path and the configured default has to step in.
    fn document_with_empty_first_batch() -> pain001::Document {
        let mut doc = test_document();
        let initn = doc.cstmr_cdt_trf_initn.as_mut().unwrap();
        let mut second = initn.pmt_inf[0].clone();
        second.pmt_inf_id = "PMT-2".into();
        initn.pmt_inf[0].cdt_trf_tx_inf.clear();
        initn.pmt_inf.push(second);
        doc
    }

    #[test]
    fn test_settlement_currency_falls_back_to_configured_default() {
        let (mapped, _) = mapper()
            .map_document(&document_with_empty_first_batch())
            .unwrap();
        let total = mapped
            .fi_to_fi_cstmr_cdt_trf
            .unwrap()
            .grp_hdr
            .ttl_intr_bk_sttlm_amt
            .unwrap();
        assert_eq!(total.ccy, "EUR");
        assert_eq!(total.value, Decimal::new(10000, 2));
    }

    #[test]
    fn test_settlement_amount_omitted_without_currency_or_default() {
        let mapper = Pain001ToPacs008Mapper::new(MapperConfig::default());
        let (mapped, trace) = mapper
            .map_document(&document_with_empty_first_batch())
            .unwrap();
        assert!(mapped
            .fi_to_fi_cstmr_cdt_trf
            .unwrap()
            .grp_hdr
            .ttl_intr_bk_sttlm_amt
            .is_none());
        assert!(trace
            .entries()
            .iter()
            .any(|e| e.path == "cstmr_cdt_trf_initn.pmt_inf"));
    }

    #[test]
    fn test_transaction_amount_and_ids() {
        let (doc, _) = mapper().map_document(&test_document()).unwrap();
        let env = doc.fi_to_fi_cstmr_cdt_trf.unwrap();
        assert_eq!(env.cdt_trf_tx_inf.len(), 1);
        let tx = &env.cdt_trf_tx_inf[0];
        assert_eq!(tx.pmt_id.end_to_end_id, "E2E-1");
        assert_eq!(tx.pmt_id.instr_id.as_deref(), Some("INSTR-1"));
        assert_eq!(tx.intr_bk_sttlm_amt.value, Decimal::new(10000, 2));
        assert_eq!(tx.dbtr.as_ref().unwrap().nm.as_deref(), Some("A"));
        assert_eq!(tx.cdtr.as_ref().unwrap().nm.as_deref(), Some("B"));
    }

    #[test]
    fn test_equivalent_amount_uses_transfer_currency() {
        let mut doc = test_document();
        doc.cstmr_cdt_trf_initn.as_mut().unwrap().pmt_inf[0].cdt_trf_tx_inf[0].amt =
            pain001::AmountChoice::EqvtAmt(pain001::EquivalentAmount {
                amt: CurrencyAmount::new(Decimal::new(5000, 2), "USD"),
                ccy_of_trf: "GBP".into(),
            });
        let (mapped, _) = mapper().map_document(&doc).unwrap();
        let tx = &mapped.fi_to_fi_cstmr_cdt_trf.unwrap().cdt_trf_tx_inf[0];
        assert_eq!(tx.intr_bk_sttlm_amt.ccy, "GBP");
    }

    #[test]
    fn test_batch_flattening_preserves_order() {
        let mut doc = test_document();
        let initn = doc.cstmr_cdt_trf_initn.as_mut().unwrap();
        let mut second = initn.pmt_inf[0].clone();
        second.pmt_inf_id = "PMT-2".into();
        second.cdt_trf_tx_inf[0].pmt_id.end_to_end_id = "E2E-2".into();
        initn.pmt_inf.push(second);
        let (mapped, _) = mapper().map_document(&doc).unwrap();
        let ids: Vec<String> = mapped
            .fi_to_fi_cstmr_cdt_trf
            .unwrap()
            .cdt_trf_tx_inf
            .iter()
            .map(|tx| tx.pmt_id.end_to_end_id.clone())
            .collect();
        assert_eq!(ids, vec!["E2E-1", "E2E-2"]);
    }

    #[test]
    fn test_party_identifiers_fold_into_generic_list() {
        let mut doc = test_document();
        let initn = doc.cstmr_cdt_trf_initn.as_mut().unwrap();
        initn.pmt_inf[0].dbtr.as_mut().unwrap().id = Some(pain001::PartyId {
            org_id: Some(pain001::OrganisationIdentification {
                bic: Some("BANKDEFF".into()),
                prtry_id: Some(GenericIdentification::new("Y", None)),
                bei: Some("B-1".into()),
                ..Default::default()
            }),
            prvt_id: None,
        });
        let (mapped, _) = mapper().map_document(&doc).unwrap();
        let dbtr = mapped.fi_to_fi_cstmr_cdt_trf.unwrap().cdt_trf_tx_inf[0]
            .dbtr
            .clone()
            .unwrap();
        let org = dbtr.id.unwrap().org_id.unwrap();
        assert_eq!(org.any_bic.as_deref(), Some("BANKDEFF"));
        let ids: Vec<&str> = org.othr.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, vec!["Y", "B-1"]);
        assert_eq!(org.othr[1].issr.as_deref(), Some("BEI"));
    }

    #[test]
    fn test_remittance_notes_flattened() {
        let mut doc = test_document();
        doc.cstmr_cdt_trf_initn.as_mut().unwrap().pmt_inf[0].cdt_trf_tx_inf[0].rmt_inf =
            Some(RemittanceInformation {
                ustrd: vec!["INV-1".into()],
                strd: vec![crate::model::common::StructuredRemittance {
                    addtl_rmt_inf: vec!["EXTRA-1".into()],
                    ..Default::default()
                }],
            });
        let (mapped, _) = mapper().map_document(&doc).unwrap();
        let rmt = mapped.fi_to_fi_cstmr_cdt_trf.unwrap().cdt_trf_tx_inf[0]
            .rmt_inf
            .clone()
            .unwrap();
        assert_eq!(rmt.ustrd, vec!["INV-1", "EXTRA-1"]);
        assert!(rmt.strd.is_empty());
    }

    #[test]
    fn test_missing_container_is_invalid_structure() {
        let err = mapper()
            .map_document(&pain001::Document::default())
            .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_SOURCE_STRUCTURE");
    }

    #[test]
    fn test_blank_msg_id_fails_first() {
        let mut doc = test_document();
        let initn = doc.cstmr_cdt_trf_initn.as_mut().unwrap();
        initn.grp_hdr.msg_id = "  ".into();
        initn.grp_hdr.cre_dt_tm = None;
        let err = mapper().map_document(&doc).unwrap_err();
        match err {
            Error::MissingRequiredField { field, .. } => assert_eq!(field, "grp_hdr.msg_id"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_creditor_name_rejected() {
        let mut doc = test_document();
        doc.cstmr_cdt_trf_initn.as_mut().unwrap().pmt_inf[0].cdt_trf_tx_inf[0].cdtr = None;
        let err = mapper().map_document(&doc).unwrap_err();
        assert_eq!(err.error_code(), "MISSING_REQUIRED_FIELD");
    }

    #[test]
    fn test_zero_amount_rejected() {
        let mut doc = test_document();
        doc.cstmr_cdt_trf_initn.as_mut().unwrap().pmt_inf[0].cdt_trf_tx_inf[0].amt =
            pain001::AmountChoice::InstdAmt(CurrencyAmount::new(Decimal::ZERO, "EUR"));
        let err = mapper().map_document(&doc).unwrap_err();
        match err {
            Error::MissingRequiredField { field, .. } => assert_eq!(field, "cdt_trf_tx_inf.amt"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_trait_rejects_other_releases() {
        let mapper = mapper();
        let wrong = PaymentDocument::Pacs008(pacs008::Document::default());
        assert!(!mapper.supports(&wrong));
        let err = mapper.transform(&wrong).unwrap_err();
        assert_eq!(err.error_code(), "UNSUPPORTED_SOURCE");
    }
}
