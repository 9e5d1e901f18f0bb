//! pacs.008.001.13 -> pacs.009.001.12
//!
//! Turns an interbank customer credit transfer into the institution-to-
//! institution cover message. Customer parties fold into institution
//! identification (single-valued proprietary slot), remittance collapses
//! into the inline structured slot, and everything the cover shape cannot
//! carry (category purpose, creditor agent instructions, charge bearer,
//! debtor account, the processing extension fields) is recorded as dropped.

use std::collections::HashMap;

use serde_json::Value;

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
use crate::model::common::NameAndAddress;
use crate::model::{pacs008, pacs009, PaymentDocument};
use crate::orchestrator::PaymentMessageMapper;

const SOURCE: MessageType = MessageType::Pacs008;
const TARGET: MessageType = MessageType::Pacs009;

const TARGET_FIELDS: &[&str] = &[
    "fi_cdt_trf.grp_hdr.msg_id",
    "fi_cdt_trf.grp_hdr.cre_dt_tm",
    "fi_cdt_trf.grp_hdr.nb_of_txs",
    "fi_cdt_trf.grp_hdr.ctrl_sum",
    "fi_cdt_trf.grp_hdr.ttl_intr_bk_sttlm_amt",
    "fi_cdt_trf.grp_hdr.intr_bk_sttlm_dt",
    "fi_cdt_trf.grp_hdr.sttlm_inf",
    "fi_cdt_trf.grp_hdr.instg_agt",
    "fi_cdt_trf.grp_hdr.instd_agt",
    "fi_cdt_trf.cdt_trf_tx_inf",
];

pub struct Pacs008ToPacs009Mapper {
    table: MappingTable,
    config: MapperConfig,
}

impl Pacs008ToPacs009Mapper {
    pub fn new(config: MapperConfig) -> Self {
        let mut qualifiers: HashMap<&'static str, QualifierFn> = HashMap::new();
        qualifiers.insert("instructing_agent", instructing_agent);
        qualifiers.insert("instructed_agent", instructed_agent);
        qualifiers.insert("transactions", transactions);
        let table = MappingTable::new(
            SOURCE,
            TARGET,
            vec![
                MappingRule::direct(
                    "fi_to_fi_cstmr_cdt_trf.grp_hdr.msg_id",
                    "fi_cdt_trf.grp_hdr.msg_id",
                ),
                MappingRule::direct(
                    "fi_to_fi_cstmr_cdt_trf.grp_hdr.cre_dt_tm",
                    "fi_cdt_trf.grp_hdr.cre_dt_tm",
                ),
                MappingRule::direct(
                    "fi_to_fi_cstmr_cdt_trf.grp_hdr.nb_of_txs",
                    "fi_cdt_trf.grp_hdr.nb_of_txs",
                ),
                MappingRule::direct(
                    "fi_to_fi_cstmr_cdt_trf.grp_hdr.ctrl_sum",
                    "fi_cdt_trf.grp_hdr.ctrl_sum",
                ),
                // The total settlement amount is copied verbatim: this
                // mapping never invents a currency for an absent amount.
                MappingRule::direct(
                    "fi_to_fi_cstmr_cdt_trf.grp_hdr.ttl_intr_bk_sttlm_amt",
                    "fi_cdt_trf.grp_hdr.ttl_intr_bk_sttlm_amt",
                ),
                MappingRule::direct(
                    "fi_to_fi_cstmr_cdt_trf.grp_hdr.intr_bk_sttlm_dt",
                    "fi_cdt_trf.grp_hdr.intr_bk_sttlm_dt",
                ),
                MappingRule::direct(
                    "fi_to_fi_cstmr_cdt_trf.grp_hdr.sttlm_inf",
                    "fi_cdt_trf.grp_hdr.sttlm_inf",
                ),
                MappingRule::derived(
                    "fi_to_fi_cstmr_cdt_trf.grp_hdr.instg_agt",
                    "fi_cdt_trf.grp_hdr.instg_agt",
                    "instructing_agent",
                ),
                MappingRule::derived(
                    "fi_to_fi_cstmr_cdt_trf.grp_hdr.instd_agt",
                    "fi_cdt_trf.grp_hdr.instd_agt",
                    "instructed_agent",
                ),
                MappingRule::aggregate(
                    "fi_to_fi_cstmr_cdt_trf.cdt_trf_tx_inf",
                    "fi_cdt_trf.cdt_trf_tx_inf",
                    "transactions",
                ),
            ],
            qualifiers,
            TARGET_FIELDS,
            config.unmapped_target_policy,
        );
        Self { table, config }
    }

    /// Maps a pacs.008 document to pacs.009, returning the mapped document
    /// together with its degradation trace.
    pub fn map_document(
        &self,
        source: &pacs008::Document,
    ) -> Result<(pacs009::Document, TransformTrace)> {
        let envelope = source.fi_to_fi_cstmr_cdt_trf.as_ref().ok_or_else(|| {
            Error::invalid_structure(
                "pacs.008 document carries no FIToFICustomerCreditTransfer",
                SOURCE,
                TARGET,
            )
        })?;
        validate_source(envelope)?;

        let mut trace = TransformTrace::new();
        if envelope.pmt_drctn.is_some() {
            trace.record_dropped("fi_to_fi_cstmr_cdt_trf.pmt_drctn", "no counterpart on pacs.009");
        }
        if envelope.initl_sts.is_some() {
            trace.record_dropped("fi_to_fi_cstmr_cdt_trf.initl_sts", "no counterpart on pacs.009");
        }

        let source_value = serde_json::to_value(source)
            .map_err(|e| engine("failed to serialize source document", e))?;
        let target_value = self.table.apply(&source_value, &self.config, &mut trace)?;
        let document: pacs009::Document = serde_json::from_value(target_value)
            .map_err(|e| engine("mapped value tree does not form a valid pacs.009 document", e))?;

        validate_target(&document)?;
        Ok((document, trace))
    }
}

impl PaymentMessageMapper for Pacs008ToPacs009Mapper {
    fn source_type(&self) -> MessageType {
        SOURCE
    }

    fn target_type(&self) -> MessageType {
        TARGET
    }

    fn supports(&self, source: &PaymentDocument) -> bool {
        source.as_pacs008().is_some()
    }

    fn transform(&self, source: &PaymentDocument) -> Result<PaymentDocument> {
        let doc = source.as_pacs008().ok_or_else(|| Error::UnsupportedSource {
            source_type: SOURCE.to_string(),
            target_type: TARGET.to_string(),
        })?;
        let (mapped, trace) = self.map_document(doc)?;
        trace.log_summary(SOURCE, TARGET);
        Ok(PaymentDocument::Pacs009(mapped))
    }

    fn metadata(&self) -> TransformationMetadata {
        TransformationMetadata::new(SOURCE, TARGET).with_property("mapper", "pacs008-to-pacs009")
    }
}

fn validate_source(envelope: &pacs008::FIToFICustomerCreditTransfer) -> Result<()> {
    if envelope.grp_hdr.msg_id.trim().is_empty() {
        return Err(Error::missing_field(
            "grp_hdr.msg_id",
            "message identification is mandatory",
            SOURCE,
            TARGET,
        ));
    }
    if envelope.grp_hdr.cre_dt_tm.is_none() {
        return Err(Error::missing_field(
            "grp_hdr.cre_dt_tm",
            "creation date-time is mandatory",
            SOURCE,
            TARGET,
        ));
    }
    if envelope.cdt_trf_tx_inf.is_empty() {
        return Err(Error::missing_field(
            "cdt_trf_tx_inf",
            "at least one credit transfer transaction is required",
            SOURCE,
            TARGET,
        ));
    }
    for tx in &envelope.cdt_trf_tx_inf {
        if tx
            .dbtr
            .as_ref()
            .and_then(|d| d.nm.as_deref())
            .map_or(true, |nm| nm.trim().is_empty())
        {
            return Err(Error::missing_field(
                "cdt_trf_tx_inf.dbtr.nm",
                "debtor name is mandatory",
                SOURCE,
                TARGET,
            ));
        }
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
        if !tx.intr_bk_sttlm_amt.is_positive() {
            return Err(Error::missing_field(
                "cdt_trf_tx_inf.intr_bk_sttlm_amt",
                "settlement amount must be positive",
                SOURCE,
                TARGET,
            ));
        }
    }
    Ok(())
}

fn validate_target(document: &pacs009::Document) -> Result<()> {
    let envelope = document
        .fi_cdt_trf
        .as_ref()
        .ok_or_else(|| engine_invariant("mapped document carries no FinancialInstitutionCreditTransfer"))?;
    if envelope.grp_hdr.msg_id.trim().is_empty() {
        return Err(engine_invariant("mapped group header lost the message identification"));
    }
    if envelope.cdt_trf_tx_inf.is_empty() {
        return Err(engine_invariant("mapped document carries no transactions"));
    }
    Ok(())
}

fn engine(message: &str, cause: impl Into<anyhow::Error>) -> Error {
    Error::engine(message, SOURCE, TARGET, Some(cause.into()))
}

fn engine_invariant(message: &str) -> Error {
    Error::engine(message, SOURCE, TARGET, None)
}

fn instructing_agent(
    source: &Value,
    _config: &MapperConfig,
    trace: &mut TransformTrace,
) -> Result<Option<Value>> {
    agent_as_institution(source, "fi_to_fi_cstmr_cdt_trf.grp_hdr.instg_agt", trace)
}

fn instructed_agent(
    source: &Value,
    _config: &MapperConfig,
    trace: &mut TransformTrace,
) -> Result<Option<Value>> {
    agent_as_institution(source, "fi_to_fi_cstmr_cdt_trf.grp_hdr.instd_agt", trace)
}

/// Re-shapes a pacs.008 agent into a pacs.009 institution via the
/// version-neutral institution view.
fn agent_as_institution(
    source: &Value,
    path: &str,
    trace: &mut TransformTrace,
) -> Result<Option<Value>> {
    let Some(agent_value) = get_path(source, path) else {
        return Ok(None);
    };
    let agent: pacs008::Agent = serde_json::from_value(agent_value.clone())
        .map_err(|e| engine("agent does not match the pacs.008 shape", e))?;
    let mut slot = None;
    if let Resolved::Value(view) = resolve_institution(Some(InstitutionSource::Pacs008(&agent))) {
        apply_institution(InstitutionTarget::Pacs009(&mut slot), &view, trace);
    }
    match slot {
        Some(institution) => Ok(Some(serde_json::to_value(institution).map_err(|e| {
            engine("failed to serialize mapped institution", e)
        })?)),
        None => Ok(None),
    }
}

fn transactions(
    source: &Value,
    _config: &MapperConfig,
    trace: &mut TransformTrace,
) -> Result<Option<Value>> {
    let Some(txs_value) = get_path(source, "fi_to_fi_cstmr_cdt_trf.cdt_trf_tx_inf") else {
        return Ok(None);
    };
    let txs: Vec<pacs008::CreditTransferTransaction> = serde_json::from_value(txs_value.clone())
        .map_err(|e| engine("transactions do not match the pacs.008 shape", e))?;

    let mapped: Vec<pacs009::CreditTransferTransaction> =
        txs.iter().map(|tx| map_transaction(tx, trace)).collect();
    if mapped.is_empty() {
        return Ok(None);
    }
    Ok(Some(serde_json::to_value(mapped).map_err(|e| {
        engine("failed to serialize mapped transactions", e)
    })?))
}

fn map_transaction(
    tx: &pacs008::CreditTransferTransaction,
    trace: &mut TransformTrace,
) -> pacs009::CreditTransferTransaction {
    let mut target = pacs009::CreditTransferTransaction {
        pmt_id: tx.pmt_id.clone(),
        pmt_tp_inf: None,
        intr_bk_sttlm_amt: tx.intr_bk_sttlm_amt.clone(),
        intr_bk_sttlm_dt: None,
        prvs_instg_agt: None,
        ultmt_dbtr: tx.ultmt_dbtr.as_ref().map(|p| fold_party(p, trace)),
        dbtr: tx.dbtr.as_ref().map(|p| fold_party(p, trace)),
        dbtr_agt: None,
        cdtr_agt: None,
        cdtr: tx.cdtr.as_ref().map(|p| fold_party(p, trace)),
        cdtr_acct: tx.cdtr_acct.clone(),
        ultmt_cdtr: tx.ultmt_cdtr.as_ref().map(|p| fold_party(p, trace)),
        rmt_inf: None,
    };

    if let Resolved::Value(view) =
        resolve_payment_type(tx.pmt_tp_inf.as_ref().map(PaymentTypeSource::Pacs008))
    {
        apply_payment_type(PaymentTypeTarget::Pacs009(&mut target.pmt_tp_inf), &view, trace);
    }

    for (slot, agent) in [
        (&mut target.prvs_instg_agt, &tx.prvs_instg_agt),
        (&mut target.dbtr_agt, &tx.dbtr_agt),
        (&mut target.cdtr_agt, &tx.cdtr_agt),
    ] {
        if let Resolved::Value(view) =
            resolve_institution(agent.as_ref().map(InstitutionSource::Pacs008))
        {
            apply_institution(InstitutionTarget::Pacs009(slot), &view, trace);
        }
    }

    if let Resolved::Value(views) =
        resolve_agent_instructions(AgentInstructionSource::Pacs008(&tx.instr_for_cdtr_agt))
    {
        apply_agent_instructions(AgentInstructionTarget::Pacs009, &views, trace);
    }

    if tx.chrg_br.is_some() {
        trace.record_dropped("cdt_trf_tx_inf.chrg_br", "pacs.009 carries no charge bearer");
    }
    if tx.dbtr_acct.is_some() {
        trace.record_dropped("cdt_trf_tx_inf.dbtr_acct", "pacs.009 carries no debtor account");
    }
    if tx.purp.is_some() {
        trace.record_dropped("cdt_trf_tx_inf.purp", "pacs.009 carries no purpose element");
    }

    if let Some(rmt) = &tx.rmt_inf {
        let mut out = pacs009::RemittanceInformation::default();
        reconcile_remittance(rmt, RemittanceTarget::InlineStructured(&mut out), trace);
        target.rmt_inf = Some(out);
    }

    target
}

/// Folds a customer party into an institution: the aggregated BIC becomes
/// the institution BIC, the first proprietary identifier fills the
/// single-valued slot, and the party's name and address fold into one
/// element.
fn fold_party(
    party: &pacs008::PartyIdentification,
    trace: &mut TransformTrace,
) -> pacs009::Institution {
    let mut fin = pacs009::FinancialInstitutionIdentification::default();
    if let Some(party_id) = &party.id {
        let aggregated = aggregate_identifiers(PartyIdentificationSource::Pacs008(party_id));
        fin.bic = aggregated.bic;
        attach_proprietary(
            ProprietarySlot::SingleValued(&mut fin.prtry_id),
            aggregated.proprietary,
            trace,
        );
    }
    if party.nm.is_some() || party.pstl_adr.is_some() {
        fin.nm_and_adr = Some(NameAndAddress {
            nm: party.nm.clone(),
            pstl_adr: party.pstl_adr.clone(),
        });
    }
    pacs009::Institution {
        fin_instn_id: fin,
        brnch_id: None,
    }
}
