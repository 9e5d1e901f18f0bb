//! pacs.009.001.12 - FinancialInstitutionCreditTransfer
//!
//! The institution-to-institution cover shape. Debtor and creditor are
//! institutions rather than customer parties, institution identification
//! carries a single-valued proprietary slot with name and address folded into
//! one `nm_and_adr` element, remittance inlines one structured slot, and
//! payment type information has no category purpose.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::common::{
    BranchData, CashAccount, CodeOrProprietary, CreditorReferenceInformation, CurrencyAmount,
    GarnishmentRemittance, GenericIdentification, NameAndAddress, PaymentIdentification, Priority,
    SettlementInstruction, TaxRemittance,
};

/// Top-level pacs.009 document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fi_cdt_trf: Option<FinancialInstitutionCreditTransfer>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialInstitutionCreditTransfer {
    pub grp_hdr: GroupHeader,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cdt_trf_tx_inf: Vec<CreditTransferTransaction>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupHeader {
    pub msg_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cre_dt_tm: Option<DateTime<Utc>>,
    pub nb_of_txs: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ctrl_sum: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl_intr_bk_sttlm_amt: Option<CurrencyAmount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intr_bk_sttlm_dt: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sttlm_inf: Option<SettlementInstruction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instg_agt: Option<Institution>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instd_agt: Option<Institution>,
}

/// Payment type information without a category purpose slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentTypeInformation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instr_prty: Option<Priority>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub svc_lvl: Vec<CodeOrProprietary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lcl_instrm: Option<CodeOrProprietary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditTransferTransaction {
    pub pmt_id: PaymentIdentification,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pmt_tp_inf: Option<PaymentTypeInformation>,
    pub intr_bk_sttlm_amt: CurrencyAmount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intr_bk_sttlm_dt: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prvs_instg_agt: Option<Institution>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ultmt_dbtr: Option<Institution>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dbtr: Option<Institution>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dbtr_agt: Option<Institution>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cdtr_agt: Option<Institution>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cdtr: Option<Institution>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cdtr_acct: Option<CashAccount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ultmt_cdtr: Option<Institution>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rmt_inf: Option<RemittanceInformation>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Institution {
    pub fin_instn_id: FinancialInstitutionIdentification,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brnch_id: Option<BranchData>,
}

/// Institution identification with a single-valued proprietary slot and the
/// name/address folded into one element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialInstitutionIdentification {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nm_and_adr: Option<NameAndAddress>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prtry_id: Option<GenericIdentification>,
}

/// Remittance information with the structured slot inlined: at most one set
/// of typed sub-fields can be carried per transaction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RemittanceInformation {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ustrd: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cdtr_ref_inf: Option<CreditorReferenceInformation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rfrd_doc_amt: Option<CurrencyAmount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_rmt: Option<TaxRemittance>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grnshmt_rmt: Option<GarnishmentRemittance>,
}
