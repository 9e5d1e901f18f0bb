//! pacs.008.001.13 - FIToFICustomerCreditTransfer
//!
//! The interbank customer credit transfer shape. Compared with pain.001 the
//! organisation identification is modernized (AnyBIC plus a generic `othr`
//! list instead of flat scheme slots) and agent identification carries a
//! list-valued proprietary slot. The envelope also carries two processing
//! extension fields (`pmt_drctn`, `initl_sts`) used by downstream routing.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::common::{
    BranchData, CashAccount, ChargeBearer, CodeOrProprietary, CurrencyAmount,
    GenericIdentification, GenericPersonIdentification, PaymentIdentification, PostalAddress,
    Priority, RemittanceInformation, SettlementInstruction,
};

/// Top-level pacs.008 document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fi_to_fi_cstmr_cdt_trf: Option<FIToFICustomerCreditTransfer>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FIToFICustomerCreditTransfer {
    pub grp_hdr: GroupHeader,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cdt_trf_tx_inf: Vec<CreditTransferTransaction>,
    /// Processing extension: direction of the payment from this institution's
    /// perspective ("OUTBOUND" for everything originated from pain.001).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pmt_drctn: Option<String>,
    /// Processing extension: initial processing status ("INITD").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initl_sts: Option<String>,
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
    pub instg_agt: Option<Agent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instd_agt: Option<Agent>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentTypeInformation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instr_prty: Option<Priority>,
    /// Service level became repeatable in this release.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub svc_lvl: Vec<CodeOrProprietary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lcl_instrm: Option<CodeOrProprietary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ctgy_purp: Option<CodeOrProprietary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditTransferTransaction {
    pub pmt_id: PaymentIdentification,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pmt_tp_inf: Option<PaymentTypeInformation>,
    pub intr_bk_sttlm_amt: CurrencyAmount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chrg_br: Option<ChargeBearer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prvs_instg_agt: Option<Agent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ultmt_dbtr: Option<PartyIdentification>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dbtr: Option<PartyIdentification>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dbtr_acct: Option<CashAccount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dbtr_agt: Option<Agent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cdtr_agt: Option<Agent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cdtr: Option<PartyIdentification>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cdtr_acct: Option<CashAccount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ultmt_cdtr: Option<PartyIdentification>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub instr_for_cdtr_agt: Vec<AgentInstruction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purp: Option<CodeOrProprietary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rmt_inf: Option<RemittanceInformation>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentInstruction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cd: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instr_inf: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartyIdentification {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nm: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pstl_adr: Option<PostalAddress>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<PartyId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ctry_of_res: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartyId {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org_id: Option<OrganisationIdentification>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prvt_id: Option<PersonIdentification>,
}

/// Modern organisation identification: AnyBIC plus a generic identifier list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrganisationIdentification {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub any_bic: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub othr: Vec<GenericIdentification>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonIdentification {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub othr: Vec<GenericPersonIdentification>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub fin_instn_id: FinancialInstitutionIdentification,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brnch_id: Option<BranchData>,
}

/// Agent identification with a list-valued proprietary slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialInstitutionIdentification {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bicfi: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nm: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pstl_adr: Option<PostalAddress>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prtry_id: Vec<GenericIdentification>,
}
