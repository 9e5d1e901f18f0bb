//! Mapper configuration and default wiring
//!
//! Configuration is plain data handed to mappers at construction; nothing in
//! the engine reads global state. `default_orchestrator` builds the standard
//! production wiring explicitly so tests and embedders can see (and replace)
//! every choice it makes.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::mapping::pacs008_to_pacs009::Pacs008ToPacs009Mapper;
use crate::mapping::pain001_to_pacs008::Pain001ToPacs008Mapper;
use crate::mapping::rule::UnmappedTargetPolicy;
use crate::orchestrator::Orchestrator;

/// Per-mapper configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapperConfig {
    /// How to report declared target fields no rule covers.
    #[serde(default)]
    pub unmapped_target_policy: UnmappedTargetPolicy,
    /// Currency to assume for the total settlement amount when the source
    /// carries a control sum but no transaction currency. `None` means the
    /// settlement amount is omitted rather than invented.
    #[serde(default)]
    pub settlement_ccy_default: Option<String>,
}

impl MapperConfig {
    pub fn with_settlement_ccy_default(mut self, ccy: impl Into<String>) -> Self {
        self.settlement_ccy_default = Some(ccy.into());
        self
    }

    pub fn with_unmapped_target_policy(mut self, policy: UnmappedTargetPolicy) -> Self {
        self.unmapped_target_policy = policy;
        self
    }
}

/// Builds an orchestrator with the standard mapper wiring:
/// pain.001 -> pacs.008 (EUR settlement-currency fallback) and
/// pacs.008 -> pacs.009 (no currency fallback; absent stays absent).
pub fn default_orchestrator() -> Orchestrator {
    let orchestrator = Orchestrator::new();
    orchestrator.register(Arc::new(Pain001ToPacs008Mapper::new(
        MapperConfig::default().with_settlement_ccy_default("EUR"),
    )));
    orchestrator.register(Arc::new(Pacs008ToPacs009Mapper::new(MapperConfig::default())));
    info!(
        pairs = orchestrator.supported_transformations().len(),
        "default orchestrator wired"
    );
    orchestrator
}
