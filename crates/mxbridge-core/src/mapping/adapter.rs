//! Schema-version bridging with closed variants
//!
//! For each concept whose shape drifts across releases (payment type
//! information, institution identification, agent instructions), this module
//! defines one source enum and one target enum with a variant per release, a
//! version-neutral view struct in between, and exhaustive matches on both
//! sides. Adding a release means adding a variant and letting the compiler
//! point at every match that must learn about it; nothing here probes shapes
//! at runtime.
//!
//! Copyright (c) 2026 Mxbridge Team
//! Licensed under the Apache-2.0 license

use crate::mapping::identifiers::{attach_proprietary, ProprietarySlot};
use crate::mapping::trace::TransformTrace;
use crate::model::common::{
    BranchData, CodeOrProprietary, GenericIdentification, NameAndAddress, PostalAddress, Priority,
};
use crate::model::{pacs008, pacs009, pain001};

/// Result of resolving a concept from a source release.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved<T> {
    Value(T),
    /// The source release carries the concept but this document does not.
    Absent,
}

impl<T> Resolved<T> {
    pub fn into_option(self) -> Option<T> {
        match self {
            Resolved::Value(v) => Some(v),
            Resolved::Absent => None,
        }
    }
}

/// Result of applying a view to a target release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied,
    /// The target release has no slot for this concept at all.
    NotSupported,
}

// ---------------------------------------------------------------------------
// Payment type information
// ---------------------------------------------------------------------------

pub enum PaymentTypeSource<'a> {
    Pain001(&'a pain001::PaymentTypeInformation),
    Pacs008(&'a pacs008::PaymentTypeInformation),
    Pacs009(&'a pacs009::PaymentTypeInformation),
}

/// Version-neutral payment type view. The service level is held as a list
/// (the widest release shape); single-valued releases contribute at most one
/// element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaymentTypeView {
    pub instr_prty: Option<Priority>,
    pub svc_lvl: Vec<CodeOrProprietary>,
    pub lcl_instrm: Option<CodeOrProprietary>,
    pub ctgy_purp: Option<CodeOrProprietary>,
}

pub fn resolve_payment_type(source: Option<PaymentTypeSource<'_>>) -> Resolved<PaymentTypeView> {
    let Some(source) = source else {
        return Resolved::Absent;
    };
    let view = match source {
        PaymentTypeSource::Pain001(pti) => PaymentTypeView {
            instr_prty: pti.instr_prty,
            svc_lvl: pti.svc_lvl.iter().cloned().collect(),
            lcl_instrm: pti.lcl_instrm.clone(),
            ctgy_purp: pti.ctgy_purp.clone(),
        },
        PaymentTypeSource::Pacs008(pti) => PaymentTypeView {
            instr_prty: pti.instr_prty,
            svc_lvl: pti.svc_lvl.clone(),
            lcl_instrm: pti.lcl_instrm.clone(),
            ctgy_purp: pti.ctgy_purp.clone(),
        },
        PaymentTypeSource::Pacs009(pti) => PaymentTypeView {
            instr_prty: pti.instr_prty,
            svc_lvl: pti.svc_lvl.clone(),
            lcl_instrm: pti.lcl_instrm.clone(),
            ctgy_purp: None,
        },
    };
    Resolved::Value(view)
}

pub enum PaymentTypeTarget<'a> {
    Pacs008(&'a mut Option<pacs008::PaymentTypeInformation>),
    Pacs009(&'a mut Option<pacs009::PaymentTypeInformation>),
}

pub fn apply_payment_type(
    target: PaymentTypeTarget<'_>,
    view: &PaymentTypeView,
    trace: &mut TransformTrace,
) -> ApplyOutcome {
    match target {
        PaymentTypeTarget::Pacs008(slot) => {
            *slot = Some(pacs008::PaymentTypeInformation {
                instr_prty: view.instr_prty,
                svc_lvl: view.svc_lvl.clone(),
                lcl_instrm: view.lcl_instrm.clone(),
                ctgy_purp: view.ctgy_purp.clone(),
            });
            ApplyOutcome::Applied
        }
        PaymentTypeTarget::Pacs009(slot) => {
            if view.ctgy_purp.is_some() {
                trace.record_dropped(
                    "pmt_tp_inf.ctgy_purp",
                    "pacs.009 payment type information has no category purpose",
                );
            }
            *slot = Some(pacs009::PaymentTypeInformation {
                instr_prty: view.instr_prty,
                svc_lvl: view.svc_lvl.clone(),
                lcl_instrm: view.lcl_instrm.clone(),
            });
            ApplyOutcome::Applied
        }
    }
}

// ---------------------------------------------------------------------------
// Financial institution identification
// ---------------------------------------------------------------------------

pub enum InstitutionSource<'a> {
    Pain001(&'a pain001::Agent),
    Pacs008(&'a pacs008::Agent),
    Pacs009(&'a pacs009::Institution),
}

/// Version-neutral institution view: BIC, display name, postal address,
/// proprietary identifiers (widest shape: a list), branch data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InstitutionView {
    pub bic: Option<String>,
    pub name: Option<String>,
    pub postal_address: Option<PostalAddress>,
    pub proprietary: Vec<GenericIdentification>,
    pub branch: Option<BranchData>,
}

pub fn resolve_institution(source: Option<InstitutionSource<'_>>) -> Resolved<InstitutionView> {
    let Some(source) = source else {
        return Resolved::Absent;
    };
    let view = match source {
        InstitutionSource::Pain001(agent) => {
            let fin = &agent.fin_instn_id;
            InstitutionView {
                bic: fin.bicfi.clone(),
                name: fin.nm.clone(),
                postal_address: fin.pstl_adr.clone(),
                proprietary: fin.othr.iter().cloned().collect(),
                branch: None,
            }
        }
        InstitutionSource::Pacs008(agent) => {
            let fin = &agent.fin_instn_id;
            InstitutionView {
                bic: fin.bicfi.clone(),
                name: fin.nm.clone(),
                postal_address: fin.pstl_adr.clone(),
                proprietary: fin.prtry_id.clone(),
                branch: agent.brnch_id.clone(),
            }
        }
        InstitutionSource::Pacs009(inst) => {
            let fin = &inst.fin_instn_id;
            let (name, postal_address) = match &fin.nm_and_adr {
                Some(na) => (na.nm.clone(), na.pstl_adr.clone()),
                None => (None, None),
            };
            InstitutionView {
                bic: fin.bic.clone(),
                name,
                postal_address,
                proprietary: fin.prtry_id.iter().cloned().collect(),
                branch: inst.brnch_id.clone(),
            }
        }
    };
    Resolved::Value(view)
}

pub enum InstitutionTarget<'a> {
    Pacs008(&'a mut Option<pacs008::Agent>),
    Pacs009(&'a mut Option<pacs009::Institution>),
}

pub fn apply_institution(
    target: InstitutionTarget<'_>,
    view: &InstitutionView,
    trace: &mut TransformTrace,
) -> ApplyOutcome {
    match target {
        InstitutionTarget::Pacs008(slot) => {
            let mut fin = pacs008::FinancialInstitutionIdentification {
                bicfi: view.bic.clone(),
                nm: view.name.clone(),
                pstl_adr: view.postal_address.clone(),
                prtry_id: Vec::new(),
            };
            attach_proprietary(
                ProprietarySlot::ListValued(&mut fin.prtry_id),
                view.proprietary.clone(),
                trace,
            );
            *slot = Some(pacs008::Agent {
                fin_instn_id: fin,
                brnch_id: view.branch.clone(),
            });
            ApplyOutcome::Applied
        }
        InstitutionTarget::Pacs009(slot) => {
            let nm_and_adr = if view.name.is_some() || view.postal_address.is_some() {
                Some(NameAndAddress {
                    nm: view.name.clone(),
                    pstl_adr: view.postal_address.clone(),
                })
            } else {
                None
            };
            let mut fin = pacs009::FinancialInstitutionIdentification {
                bic: view.bic.clone(),
                nm_and_adr,
                prtry_id: None,
            };
            attach_proprietary(
                ProprietarySlot::SingleValued(&mut fin.prtry_id),
                view.proprietary.clone(),
                trace,
            );
            *slot = Some(pacs009::Institution {
                fin_instn_id: fin,
                brnch_id: view.branch.clone(),
            });
            ApplyOutcome::Applied
        }
    }
}

// ---------------------------------------------------------------------------
// Agent instructions
// ---------------------------------------------------------------------------

pub enum AgentInstructionSource<'a> {
    Pain001(&'a [pain001::InstructionForCreditorAgent]),
    Pacs008(&'a [pacs008::AgentInstruction]),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AgentInstructionView {
    pub cd: Option<String>,
    pub instr_inf: Option<String>,
}

pub fn resolve_agent_instructions(
    source: AgentInstructionSource<'_>,
) -> Resolved<Vec<AgentInstructionView>> {
    let views: Vec<AgentInstructionView> = match source {
        AgentInstructionSource::Pain001(items) => items
            .iter()
            .map(|i| AgentInstructionView {
                cd: i.cd.clone(),
                instr_inf: i.instr_inf.clone(),
            })
            .collect(),
        AgentInstructionSource::Pacs008(items) => items
            .iter()
            .map(|i| AgentInstructionView {
                cd: i.cd.clone(),
                instr_inf: i.instr_inf.clone(),
            })
            .collect(),
    };
    if views.is_empty() {
        Resolved::Absent
    } else {
        Resolved::Value(views)
    }
}

pub enum AgentInstructionTarget<'a> {
    Pacs008(&'a mut Vec<pacs008::AgentInstruction>),
    /// pacs.009 carries no creditor agent instructions.
    Pacs009,
}

pub fn apply_agent_instructions(
    target: AgentInstructionTarget<'_>,
    views: &[AgentInstructionView],
    trace: &mut TransformTrace,
) -> ApplyOutcome {
    match target {
        AgentInstructionTarget::Pacs008(slot) => {
            slot.extend(views.iter().map(|v| pacs008::AgentInstruction {
                cd: v.cd.clone(),
                instr_inf: v.instr_inf.clone(),
            }));
            ApplyOutcome::Applied
        }
        AgentInstructionTarget::Pacs009 => {
            if !views.is_empty() {
                trace.record_dropped(
                    "instr_for_cdtr_agt",
                    "pacs.009 carries no creditor agent instructions",
                );
            }
            ApplyOutcome::NotSupported
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_type_absent_source() {
        assert_eq!(resolve_payment_type(None), Resolved::Absent);
    }

    #[test]
    fn test_pacs009_target_drops_category_purpose() {
        let view = PaymentTypeView {
            instr_prty: Some(Priority::High),
            svc_lvl: vec![CodeOrProprietary::Cd("SEPA".into())],
            lcl_instrm: None,
            ctgy_purp: Some(CodeOrProprietary::Cd("SUPP".into())),
        };
        let mut slot = None;
        let mut trace = TransformTrace::new();
        let outcome = apply_payment_type(PaymentTypeTarget::Pacs009(&mut slot), &view, &mut trace);
        assert_eq!(outcome, ApplyOutcome::Applied);
        let pti = slot.unwrap();
        assert_eq!(pti.instr_prty, Some(Priority::High));
        assert_eq!(pti.svc_lvl.len(), 1);
        assert!(!trace.is_clean());
    }

    #[test]
    fn test_institution_view_folds_name_and_address() {
        let inst = pacs009::Institution {
            fin_instn_id: pacs009::FinancialInstitutionIdentification {
                bic: Some("BANKDEFF".into()),
                nm_and_adr: Some(NameAndAddress {
                    nm: Some("Bank".into()),
                    pstl_adr: None,
                }),
                prtry_id: None,
            },
            brnch_id: None,
        };
        let resolved = resolve_institution(Some(InstitutionSource::Pacs009(&inst)));
        let view = resolved.into_option().unwrap();
        assert_eq!(view.bic.as_deref(), Some("BANKDEFF"));
        assert_eq!(view.name.as_deref(), Some("Bank"));
    }

    #[test]
    fn test_agent_instructions_not_supported_on_pacs009() {
        let views = vec![AgentInstructionView {
            cd: Some("CHQB".into()),
            instr_inf: Some("pay by cheque".into()),
        }];
        let mut trace = TransformTrace::new();
        let outcome =
            apply_agent_instructions(AgentInstructionTarget::Pacs009, &views, &mut trace);
        assert_eq!(outcome, ApplyOutcome::NotSupported);
        assert!(!trace.is_clean());
    }

    #[test]
    fn test_agent_instructions_empty_is_absent() {
        let resolved = resolve_agent_instructions(AgentInstructionSource::Pacs008(&[]));
        assert_eq!(resolved, Resolved::Absent);
    }
}
