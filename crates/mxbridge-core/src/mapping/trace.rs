//! Degradation ledger for a single transformation
//!
//! Cross-release mapping is lossy by construction: fields get dropped,
//! targets are deliberately left unset, sources turn out absent. The trace
//! records each such event so a transformation can report exactly what
//! degraded instead of degrading silently.

use serde::Serialize;
use tracing::{debug, warn};

use crate::message_type::MessageType;

/// What kind of degradation a trace entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceKind {
    /// Source data existed but the target shape cannot carry it.
    Dropped,
    /// A target location was deliberately left unset by a mapping rule.
    Ignored,
    /// A declared target field is covered by no rule at all.
    Unmapped,
    /// A rule fired but its source location was absent.
    AbsentSource,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceEntry {
    pub kind: TraceKind,
    pub path: String,
    pub message: String,
}

/// Accumulated degradation records for one transformation run.
#[derive(Debug, Clone, Default)]
pub struct TransformTrace {
    entries: Vec<TraceEntry>,
}

impl TransformTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_dropped(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.record(TraceKind::Dropped, path, message);
    }

    pub fn record_ignored(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.record(TraceKind::Ignored, path, message);
    }

    pub fn record_unmapped(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.record(TraceKind::Unmapped, path, message);
    }

    pub fn record_absent_source(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.record(TraceKind::AbsentSource, path, message);
    }

    fn record(&mut self, kind: TraceKind, path: impl Into<String>, message: impl Into<String>) {
        self.entries.push(TraceEntry {
            kind,
            path: path.into(),
            message: message.into(),
        });
    }

    pub fn entries(&self) -> &[TraceEntry] {
        &self.entries
    }

    pub fn count_of(&self, kind: TraceKind) -> usize {
        self.entries.iter().filter(|e| e.kind == kind).count()
    }

    /// True when nothing degraded.
    pub fn is_clean(&self) -> bool {
        self.entries.is_empty()
    }

    /// Emits a structured log summary for this run. Dropped data is worth a
    /// warning; the rest is debug-level.
    pub fn log_summary(&self, source_type: MessageType, target_type: MessageType) {
        if self.is_clean() {
            debug!(
                source = %source_type,
                target = %target_type,
                "transformation completed without degradation"
            );
            return;
        }
        let dropped = self.count_of(TraceKind::Dropped);
        if dropped > 0 {
            warn!(
                source = %source_type,
                target = %target_type,
                dropped,
                total = self.entries.len(),
                "transformation dropped source data"
            );
        }
        for entry in &self.entries {
            debug!(
                kind = ?entry.kind,
                path = %entry.path,
                message = %entry.message,
                "degradation record"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_starts_clean() {
        let trace = TransformTrace::new();
        assert!(trace.is_clean());
        assert_eq!(trace.entries().len(), 0);
    }

    #[test]
    fn test_trace_counts_by_kind() {
        let mut trace = TransformTrace::new();
        trace.record_dropped("a.b", "no counterpart");
        trace.record_dropped("a.c", "no counterpart");
        trace.record_ignored("x.y", "left unset");
        assert_eq!(trace.count_of(TraceKind::Dropped), 2);
        assert_eq!(trace.count_of(TraceKind::Ignored), 1);
        assert_eq!(trace.count_of(TraceKind::Unmapped), 0);
        assert!(!trace.is_clean());
    }
}
