//! Leaf types shared across message releases
//!
//! Shapes that are genuinely stable across pain.001.001.12, pacs.008.001.13
//! and pacs.009.001.12 live here. Anything the releases disagree on stays in
//! the per-release modules; cross-release reuse is only allowed where the
//! schemas actually align.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An amount with its ISO 4217 currency code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyAmount {
    pub value: Decimal,
    pub ccy: String,
}

impl CurrencyAmount {
    pub fn new(value: Decimal, ccy: impl Into<String>) -> Self {
        Self {
            value,
            ccy: ccy.into(),
        }
    }

    pub fn is_positive(&self) -> bool {
        self.value > Decimal::ZERO
    }
}

/// Postal address, carried opaquely between releases.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostalAddress {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strt_nm: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bldg_nb: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pst_cd: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twn_nm: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ctry: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub adr_line: Vec<String>,
}

/// A name combined with an optional postal address (pacs.009 institution
/// identification folds these into one element).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NameAndAddress {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nm: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pstl_adr: Option<PostalAddress>,
}

/// A generic identifier with an optional issuer label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenericIdentification {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issr: Option<String>,
}

impl GenericIdentification {
    pub fn new(id: impl Into<String>, issr: Option<String>) -> Self {
        Self {
            id: id.into(),
            issr,
        }
    }
}

/// Either a standardized code or a proprietary text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodeOrProprietary {
    Cd(String),
    Prtry(String),
}

impl CodeOrProprietary {
    /// The carried text, regardless of which arm holds it.
    pub fn text(&self) -> &str {
        match self {
            CodeOrProprietary::Cd(s) | CodeOrProprietary::Prtry(s) => s,
        }
    }
}

/// Instruction priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    High,
    Norm,
}

/// Charge bearer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChargeBearer {
    Debt,
    Cred,
    Shar,
    Slev,
}

/// Interbank settlement method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SettlementMethod {
    Inda,
    Inga,
    Cova,
    Clrg,
}

/// Settlement instruction on a pacs group header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementInstruction {
    pub sttlm_mtd: SettlementMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sttlm_acct: Option<CashAccount>,
}

/// Account identification: IBAN or an other scheme-qualified identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountIdentification {
    Iban(String),
    Othr(GenericIdentification),
}

/// Cash account, carried opaquely between releases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashAccount {
    pub id: AccountIdentification,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ccy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nm: Option<String>,
}

/// Branch data attached to agent identification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BranchData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nm: Option<String>,
}

/// Payment identification on pacs transactions (pain.001 lacks `tx_id`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentIdentification {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instr_id: Option<String>,
    pub end_to_end_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_id: Option<String>,
}

/// A person identification entry with its scheme name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenericPersonIdentification {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schme_nm: Option<CodeOrProprietary>,
}

/// Creditor reference information inside structured remittance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreditorReferenceInformation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tp: Option<CodeOrProprietary>,
    #[serde(rename = "ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

/// Tax remittance details, carried opaquely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaxRemittance {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cdtr_tax_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dbtr_tax_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl_tax_amt: Option<CurrencyAmount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dt: Option<NaiveDate>,
}

/// Garnishment remittance details, carried opaquely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GarnishmentRemittance {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tp: Option<CodeOrProprietary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grnshee_nm: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rmtd_amt: Option<CurrencyAmount>,
}

/// One structured remittance entry (pain.001 / pacs.008 carry a list of
/// these; pacs.009 inlines a single slot).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuredRemittance {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cdtr_ref_inf: Option<CreditorReferenceInformation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rfrd_doc_amt: Option<CurrencyAmount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_rmt: Option<TaxRemittance>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grnshmt_rmt: Option<GarnishmentRemittance>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub addtl_rmt_inf: Vec<String>,
}

impl StructuredRemittance {
    /// Whether any typed sub-field (as opposed to free-text notes) is set.
    pub fn has_typed_fields(&self) -> bool {
        self.cdtr_ref_inf.is_some()
            || self.rfrd_doc_amt.is_some()
            || self.tax_rmt.is_some()
            || self.grnshmt_rmt.is_some()
    }
}

/// Remittance information as carried by pain.001 and pacs.008 (a list of
/// unstructured lines plus a list of structured entries). pacs.009 uses its
/// own reduced shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RemittanceInformation {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ustrd: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub strd: Vec<StructuredRemittance>,
}

impl RemittanceInformation {
    pub fn is_empty(&self) -> bool {
        self.ustrd.is_empty() && self.strd.is_empty()
    }
}
