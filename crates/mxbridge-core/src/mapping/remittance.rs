//! Remittance information reconciliation
//!
//! Source releases carry a list of unstructured lines plus a list of
//! structured entries; target releases offer a structured list, a single
//! inline structured slot, or nothing but text. Reconciliation folds the
//! source into whatever the target offers and records everything that could
//! not be carried.
//!
//! Only the first structured entry's typed sub-fields travel; the free-text
//! notes of every entry are flattened into the unstructured lines so no text
//! is lost even when the typed data is. Widening this to multiple structured
//! slots is an open product decision and deliberately not done here.

use crate::mapping::trace::TransformTrace;
use crate::model::common::{RemittanceInformation, StructuredRemittance};
use crate::model::pacs009;

/// The remittance shape a target release offers.
pub enum RemittanceTarget<'a> {
    /// A list of structured entries (pain.001 / pacs.008 shape).
    StructuredList(&'a mut RemittanceInformation),
    /// A single inline structured slot (pacs.009 shape).
    InlineStructured(&'a mut pacs009::RemittanceInformation),
    /// Unstructured lines only.
    TextOnly(&'a mut Vec<String>),
}

/// Folds source remittance information into the target shape.
///
/// Unstructured lines are copied in order first. The first structured
/// entry's typed sub-fields go to the target's structured slot when it has
/// one; typed sub-fields of later entries are recorded as dropped. Every
/// entry's additional-information notes are appended to the unstructured
/// lines, in entry order.
pub fn reconcile_remittance(
    source: &RemittanceInformation,
    target: RemittanceTarget<'_>,
    trace: &mut TransformTrace,
) {
    match target {
        RemittanceTarget::StructuredList(out) => {
            out.ustrd.extend(source.ustrd.iter().cloned());
            if let Some(first) = source.strd.first() {
                if first.has_typed_fields() {
                    out.strd.push(StructuredRemittance {
                        cdtr_ref_inf: first.cdtr_ref_inf.clone(),
                        rfrd_doc_amt: first.rfrd_doc_amt.clone(),
                        tax_rmt: first.tax_rmt.clone(),
                        grnshmt_rmt: first.grnshmt_rmt.clone(),
                        addtl_rmt_inf: Vec::new(),
                    });
                }
            }
            flatten_notes(source, &mut out.ustrd, trace);
        }
        RemittanceTarget::InlineStructured(out) => {
            out.ustrd.extend(source.ustrd.iter().cloned());
            if let Some(first) = source.strd.first() {
                out.cdtr_ref_inf = first.cdtr_ref_inf.clone();
                out.rfrd_doc_amt = first.rfrd_doc_amt.clone();
                out.tax_rmt = first.tax_rmt.clone();
                out.grnshmt_rmt = first.grnshmt_rmt.clone();
            }
            flatten_notes(source, &mut out.ustrd, trace);
        }
        RemittanceTarget::TextOnly(lines) => {
            lines.extend(source.ustrd.iter().cloned());
            if source.strd.first().is_some_and(StructuredRemittance::has_typed_fields) {
                trace.record_dropped(
                    "rmt_inf.strd",
                    "target carries no structured remittance; typed sub-fields dropped",
                );
            }
            flatten_notes(source, lines, trace);
        }
    }
}

/// Appends every structured entry's free-text notes to the unstructured
/// sink and records the typed sub-fields of entries past the first, which
/// no target shape can carry.
fn flatten_notes(source: &RemittanceInformation, sink: &mut Vec<String>, trace: &mut TransformTrace) {
    for (index, entry) in source.strd.iter().enumerate() {
        if index > 0 && entry.has_typed_fields() {
            trace.record_dropped(
                format!("rmt_inf.strd.{index}"),
                "only the first structured entry's typed sub-fields are carried",
            );
        }
        sink.extend(entry.addtl_rmt_inf.iter().cloned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::common::CreditorReferenceInformation;

    fn entry(notes: &[&str]) -> StructuredRemittance {
        StructuredRemittance {
            addtl_rmt_inf: notes.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    fn typed_entry(reference: &str, notes: &[&str]) -> StructuredRemittance {
        StructuredRemittance {
            cdtr_ref_inf: Some(CreditorReferenceInformation {
                tp: None,
                reference: Some(reference.to_string()),
            }),
            addtl_rmt_inf: notes.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_notes_flatten_after_unstructured_lines() {
        let source = RemittanceInformation {
            ustrd: vec!["INV-1".into()],
            strd: vec![entry(&["EXTRA-1"])],
        };
        let mut lines = Vec::new();
        reconcile_remittance(
            &source,
            RemittanceTarget::TextOnly(&mut lines),
            &mut TransformTrace::new(),
        );
        assert_eq!(lines, vec!["INV-1", "EXTRA-1"]);
    }

    #[test]
    fn test_notes_from_all_entries_in_order() {
        let source = RemittanceInformation {
            ustrd: vec![],
            strd: vec![entry(&["A"]), entry(&["B"])],
        };
        let mut lines = Vec::new();
        let mut trace = TransformTrace::new();
        reconcile_remittance(&source, RemittanceTarget::TextOnly(&mut lines), &mut trace);
        assert_eq!(lines, vec!["A", "B"]);
        // Neither entry carried typed sub-fields, so nothing was dropped.
        assert!(trace.is_clean());
    }

    #[test]
    fn test_inline_slot_takes_first_entry_typed_fields() {
        let source = RemittanceInformation {
            ustrd: vec!["INV-1".into()],
            strd: vec![typed_entry("RF-FIRST", &["N1"]), typed_entry("RF-SECOND", &["N2"])],
        };
        let mut out = pacs009::RemittanceInformation::default();
        let mut trace = TransformTrace::new();
        reconcile_remittance(&source, RemittanceTarget::InlineStructured(&mut out), &mut trace);
        assert_eq!(
            out.cdtr_ref_inf.unwrap().reference.as_deref(),
            Some("RF-FIRST")
        );
        assert_eq!(out.ustrd, vec!["INV-1", "N1", "N2"]);
        // The second entry's typed fields had nowhere to go.
        assert_eq!(trace.entries().len(), 1);
    }

    #[test]
    fn test_structured_list_keeps_one_entry_without_notes() {
        let source = RemittanceInformation {
            ustrd: vec![],
            strd: vec![typed_entry("RF", &["NOTE"])],
        };
        let mut out = RemittanceInformation::default();
        reconcile_remittance(
            &source,
            RemittanceTarget::StructuredList(&mut out),
            &mut TransformTrace::new(),
        );
        assert_eq!(out.strd.len(), 1);
        // Notes are flattened, never duplicated inside the structured entry.
        assert!(out.strd[0].addtl_rmt_inf.is_empty());
        assert_eq!(out.ustrd, vec!["NOTE"]);
    }

    #[test]
    fn test_empty_source_is_a_no_op() {
        let source = RemittanceInformation::default();
        let mut out = pacs009::RemittanceInformation::default();
        let mut trace = TransformTrace::new();
        reconcile_remittance(&source, RemittanceTarget::InlineStructured(&mut out), &mut trace);
        assert!(out.ustrd.is_empty());
        assert!(out.cdtr_ref_inf.is_none());
        assert!(trace.is_clean());
    }
}
