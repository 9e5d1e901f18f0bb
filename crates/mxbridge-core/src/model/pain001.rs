//! pain.001.001.12 - CustomerCreditTransferInitiation
//!
//! The customer-side initiation shape. Its organisation identification still
//! carries the legacy flat scheme slots (BEI, IBEI, EANGLN, ...) that later
//! releases collapsed into generic identifier lists; the identifier
//! aggregation in `mapping::identifiers` exists to bridge exactly that skew.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::common::{
    CashAccount, ChargeBearer, CodeOrProprietary, CurrencyAmount, GenericIdentification,
    GenericPersonIdentification, PostalAddress, Priority, RemittanceInformation,
};

/// Top-level pain.001 document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cstmr_cdt_trf_initn: Option<CustomerCreditTransferInitiation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerCreditTransferInitiation {
    pub grp_hdr: GroupHeader,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pmt_inf: Vec<PaymentInstruction>,
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
    pub initg_pty: Option<PartyIdentification>,
}

/// One payment instruction batch; transaction-level values override the
/// batch-level ones where both are present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentInstruction {
    pub pmt_inf_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pmt_tp_inf: Option<PaymentTypeInformation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reqd_exctn_dt: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chrg_br: Option<ChargeBearer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dbtr: Option<PartyIdentification>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dbtr_acct: Option<CashAccount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dbtr_agt: Option<Agent>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cdt_trf_tx_inf: Vec<CreditTransferTransaction>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentTypeInformation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instr_prty: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub svc_lvl: Option<CodeOrProprietary>,
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
    pub amt: AmountChoice,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chrg_br: Option<ChargeBearer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ultmt_dbtr: Option<PartyIdentification>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cdtr_agt: Option<Agent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cdtr: Option<PartyIdentification>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cdtr_acct: Option<CashAccount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ultmt_cdtr: Option<PartyIdentification>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub instr_for_cdtr_agt: Vec<InstructionForCreditorAgent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purp: Option<CodeOrProprietary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rmt_inf: Option<RemittanceInformation>,
}

/// Payment identification in pain.001 (no transaction id yet; that is minted
/// downstream).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentIdentification {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instr_id: Option<String>,
    pub end_to_end_id: String,
}

/// Instructed amount or an equivalent amount in another transfer currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmountChoice {
    InstdAmt(CurrencyAmount),
    EqvtAmt(EquivalentAmount),
}

impl AmountChoice {
    /// The amount and currency a settlement leg would carry for this
    /// instruction: the instructed amount as-is, or the equivalent amount
    /// re-denominated in the currency of transfer.
    pub fn settlement_amount(&self) -> CurrencyAmount {
        match self {
            AmountChoice::InstdAmt(a) => a.clone(),
            AmountChoice::EqvtAmt(e) => CurrencyAmount::new(e.amt.value, e.ccy_of_trf.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquivalentAmount {
    pub amt: CurrencyAmount,
    pub ccy_of_trf: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstructionForCreditorAgent {
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

/// Organisation-or-person identification choice. Both arms are kept optional
/// because upstream producers have been observed filling both; aggregation
/// handles them in a fixed order rather than rejecting the message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartyId {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org_id: Option<OrganisationIdentification>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prvt_id: Option<PersonIdentification>,
}

/// Legacy flat-slot organisation identification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrganisationIdentification {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prtry_id: Option<GenericIdentification>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bei: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ibei: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eangln: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uschu: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duns: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bk_pty_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_id_nb: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonIdentification {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub othr: Vec<GenericPersonIdentification>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub fin_instn_id: FinancialInstitutionIdentification,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialInstitutionIdentification {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bicfi: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nm: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pstl_adr: Option<PostalAddress>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub othr: Option<GenericIdentification>,
}
