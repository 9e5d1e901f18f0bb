//! Party identifier aggregation
//!
//! Older releases spread organisation identifiers across flat, named scheme
//! slots; newer releases carry a BIC plus a generic identifier list; the
//! institution shape carries a single proprietary slot. Aggregation collects
//! whatever a source party carries into one ordered, labeled list so the
//! target side can attach it to whichever slot shape it has.
//!
//! The slot order is load-bearing: downstream reconciliation matches
//! identifiers positionally, so it must never change.
//!
//! Copyright (c) 2026 Mxbridge Team
//! Licensed under the Apache-2.0 license

use crate::mapping::trace::TransformTrace;
use crate::model::common::{CodeOrProprietary, GenericIdentification};
use crate::model::{pacs008, pain001};

/// Party identification as carried by a source release.
pub enum PartyIdentificationSource<'a> {
    Pain001(&'a pain001::PartyId),
    Pacs008(&'a pacs008::PartyId),
}

/// The version-neutral result of identifier aggregation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregatedIdentifiers {
    /// The BIC stays primary and is carried separately from the list.
    pub bic: Option<String>,
    /// Everything else, in aggregation order, labeled with its origin scheme.
    pub proprietary: Vec<GenericIdentification>,
}

impl AggregatedIdentifiers {
    pub fn is_empty(&self) -> bool {
        self.bic.is_none() && self.proprietary.is_empty()
    }
}

/// Collects every identifier a party carries.
///
/// Organisation identifiers come first: the explicit proprietary identifier
/// keeps its own issuer, then each named scheme slot in fixed order (BEI,
/// IBEI, EANGLN, USCHU, DUNS, BkPtyId, TaxIdNb) becomes a generic entry
/// whose issuer is the slot name. Person identifier entries follow, keeping
/// their scheme text as issuer. Empty values never produce entries.
pub fn aggregate_identifiers(source: PartyIdentificationSource<'_>) -> AggregatedIdentifiers {
    let mut out = AggregatedIdentifiers::default();
    match source {
        PartyIdentificationSource::Pain001(party_id) => {
            if let Some(org) = &party_id.org_id {
                out.bic = non_empty(&org.bic);
                if let Some(prtry) = &org.prtry_id {
                    if !prtry.id.is_empty() {
                        out.proprietary.push(prtry.clone());
                    }
                }
                for (slot, value) in [
                    ("BEI", &org.bei),
                    ("IBEI", &org.ibei),
                    ("EANGLN", &org.eangln),
                    ("USCHU", &org.uschu),
                    ("DUNS", &org.duns),
                    ("BkPtyId", &org.bk_pty_id),
                    ("TaxIdNb", &org.tax_id_nb),
                ] {
                    if let Some(id) = non_empty(value) {
                        out.proprietary
                            .push(GenericIdentification::new(id, Some(slot.to_string())));
                    }
                }
            }
            if let Some(prvt) = &party_id.prvt_id {
                collect_person_entries(&prvt.othr, &mut out.proprietary);
            }
        }
        PartyIdentificationSource::Pacs008(party_id) => {
            if let Some(org) = &party_id.org_id {
                out.bic = non_empty(&org.any_bic);
                out.proprietary
                    .extend(org.othr.iter().filter(|g| !g.id.is_empty()).cloned());
            }
            if let Some(prvt) = &party_id.prvt_id {
                collect_person_entries(&prvt.othr, &mut out.proprietary);
            }
        }
    }
    out
}

fn collect_person_entries(
    entries: &[crate::model::common::GenericPersonIdentification],
    into: &mut Vec<GenericIdentification>,
) {
    for entry in entries {
        if entry.id.is_empty() {
            continue;
        }
        let issuer = entry.schme_nm.as_ref().map(|s| match s {
            CodeOrProprietary::Prtry(text) | CodeOrProprietary::Cd(text) => text.clone(),
        });
        into.push(GenericIdentification::new(entry.id.clone(), issuer));
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_deref().filter(|s| !s.is_empty()).map(String::from)
}

/// The proprietary identifier slot a target release offers.
pub enum ProprietarySlot<'a> {
    /// The slot holds arbitrarily many identifiers.
    ListValued(&'a mut Vec<GenericIdentification>),
    /// The slot holds at most one identifier; surplus entries are dropped.
    SingleValued(&'a mut Option<GenericIdentification>),
}

/// Attaches aggregated identifiers to a target slot. List-valued slots take
/// everything in order; single-valued slots take the first entry and record
/// the rest as dropped. An empty list leaves the slot untouched.
pub fn attach_proprietary(
    slot: ProprietarySlot<'_>,
    identifiers: Vec<GenericIdentification>,
    trace: &mut TransformTrace,
) {
    if identifiers.is_empty() {
        return;
    }
    match slot {
        ProprietarySlot::ListValued(list) => list.extend(identifiers),
        ProprietarySlot::SingleValued(single) => {
            let mut iter = identifiers.into_iter();
            *single = iter.next();
            for surplus in iter {
                trace.record_dropped(
                    "prtry_id",
                    format!(
                        "single-valued proprietary slot full; identifier '{}' dropped",
                        surplus.id
                    ),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::common::GenericPersonIdentification;

    fn party_with_everything() -> pain001::PartyId {
        pain001::PartyId {
            org_id: Some(pain001::OrganisationIdentification {
                bic: Some("X".into()),
                prtry_id: Some(GenericIdentification::new("Y", None)),
                ..Default::default()
            }),
            prvt_id: Some(pain001::PersonIdentification {
                othr: vec![
                    GenericPersonIdentification {
                        id: "P1".into(),
                        schme_nm: Some(CodeOrProprietary::Prtry("S1".into())),
                    },
                    GenericPersonIdentification {
                        id: "P2".into(),
                        schme_nm: Some(CodeOrProprietary::Cd("S2".into())),
                    },
                ],
            }),
        }
    }

    #[test]
    fn test_aggregation_order_org_then_private() {
        let party = party_with_everything();
        let agg = aggregate_identifiers(PartyIdentificationSource::Pain001(&party));
        assert_eq!(agg.bic.as_deref(), Some("X"));
        let ids: Vec<&str> = agg.proprietary.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, vec!["Y", "P1", "P2"]);
        assert_eq!(agg.proprietary[1].issr.as_deref(), Some("S1"));
        assert_eq!(agg.proprietary[2].issr.as_deref(), Some("S2"));
    }

    #[test]
    fn test_named_slots_keep_fixed_order_and_labels() {
        let party = pain001::PartyId {
            org_id: Some(pain001::OrganisationIdentification {
                tax_id_nb: Some("T-9".into()),
                bei: Some("B-1".into()),
                duns: Some("D-5".into()),
                ..Default::default()
            }),
            prvt_id: None,
        };
        let agg = aggregate_identifiers(PartyIdentificationSource::Pain001(&party));
        let labeled: Vec<(&str, &str)> = agg
            .proprietary
            .iter()
            .map(|g| (g.id.as_str(), g.issr.as_deref().unwrap()))
            .collect();
        // Declaration order of the source fields is irrelevant; slot order
        // wins.
        assert_eq!(labeled, vec![("B-1", "BEI"), ("D-5", "DUNS"), ("T-9", "TaxIdNb")]);
    }

    #[test]
    fn test_bic_only_party_yields_empty_list() {
        let party = pain001::PartyId {
            org_id: Some(pain001::OrganisationIdentification {
                bic: Some("BANKDEFF".into()),
                ..Default::default()
            }),
            prvt_id: None,
        };
        let agg = aggregate_identifiers(PartyIdentificationSource::Pain001(&party));
        assert_eq!(agg.bic.as_deref(), Some("BANKDEFF"));
        assert!(agg.proprietary.is_empty());
    }

    #[test]
    fn test_empty_values_produce_no_entries() {
        let party = pain001::PartyId {
            org_id: Some(pain001::OrganisationIdentification {
                bic: Some(String::new()),
                bei: Some(String::new()),
                ..Default::default()
            }),
            prvt_id: Some(pain001::PersonIdentification {
                othr: vec![GenericPersonIdentification {
                    id: String::new(),
                    schme_nm: None,
                }],
            }),
        };
        let agg = aggregate_identifiers(PartyIdentificationSource::Pain001(&party));
        assert!(agg.is_empty());
    }

    #[test]
    fn test_list_valued_slot_takes_everything() {
        let party = party_with_everything();
        let agg = aggregate_identifiers(PartyIdentificationSource::Pain001(&party));
        let mut list = Vec::new();
        let mut trace = TransformTrace::new();
        attach_proprietary(ProprietarySlot::ListValued(&mut list), agg.proprietary, &mut trace);
        assert_eq!(list.len(), 3);
        assert!(trace.is_clean());
    }

    #[test]
    fn test_single_valued_slot_takes_first_and_records_drops() {
        let party = party_with_everything();
        let agg = aggregate_identifiers(PartyIdentificationSource::Pain001(&party));
        let mut single = None;
        let mut trace = TransformTrace::new();
        attach_proprietary(
            ProprietarySlot::SingleValued(&mut single),
            agg.proprietary,
            &mut trace,
        );
        assert_eq!(single.unwrap().id, "Y");
        assert_eq!(trace.entries().len(), 2);
    }

    #[test]
    fn test_empty_aggregate_leaves_slot_untouched() {
        let mut single = Some(GenericIdentification::new("keep", None));
        let mut trace = TransformTrace::new();
        attach_proprietary(ProprietarySlot::SingleValued(&mut single), Vec::new(), &mut trace);
        assert_eq!(single.unwrap().id, "keep");
    }

    #[test]
    fn test_pacs008_source_aggregates_generic_list() {
        let party = pacs008::PartyId {
            org_id: Some(pacs008::OrganisationIdentification {
                any_bic: Some("X".into()),
                othr: vec![
                    GenericIdentification::new("G-1", Some("BEI".into())),
                    GenericIdentification::new("", None),
                ],
            }),
            prvt_id: None,
        };
        let agg = aggregate_identifiers(PartyIdentificationSource::Pacs008(&party));
        assert_eq!(agg.bic.as_deref(), Some("X"));
        assert_eq!(agg.proprietary.len(), 1);
        assert_eq!(agg.proprietary[0].id, "G-1");
    }
}
