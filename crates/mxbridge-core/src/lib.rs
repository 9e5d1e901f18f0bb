//! mxbridge-core: ISO 20022 payment message transformation engine
//!
//! Maps payment documents across schema releases: pain.001.001.12
//! (customer initiation) to pacs.008.001.13 (interbank customer credit
//! transfer) to pacs.009.001.12 (institution cover). Transformations run
//! through declarative mapping tables, closed-variant version bridging, and
//! an orchestrator that routes documents by (source, target) message type
//! pair.
//!
//! # Quick start
//!
//! ```no_run
//! use mxbridge_core::{default_orchestrator, MessageType, PaymentDocument};
//!
//! let orchestrator = default_orchestrator();
//! # let document: PaymentDocument = todo!();
//! let pacs008 = orchestrator.transform(
//!     Some(&document),
//!     MessageType::Pain001,
//!     MessageType::Pacs008,
//! )?;
//! let pacs009 = orchestrator.chain_transform(
//!     Some(&document),
//!     MessageType::Pain001,
//!     MessageType::Pacs008,
//!     MessageType::Pacs009,
//! )?;
//! # Ok::<(), mxbridge_core::Error>(())
//! ```
//!
//! Copyright (c) 2026 Mxbridge Team
//! Licensed under the Apache-2.0 license

pub mod config;
pub mod dispatch;
pub mod error;
pub mod mapping;
pub mod message_type;
pub mod metadata;
pub mod model;
pub mod orchestrator;

pub use config::{default_orchestrator, MapperConfig};
pub use dispatch::{JsonCodec, MappingDispatcher, MessageCodec};
pub use error::{Error, Result};
pub use mapping::pacs008_to_pacs009::Pacs008ToPacs009Mapper;
pub use mapping::pain001_to_pacs008::Pain001ToPacs008Mapper;
pub use mapping::rule::UnmappedTargetPolicy;
pub use mapping::trace::{TraceEntry, TraceKind, TransformTrace};
pub use message_type::{detect_from_payload, normalize, MessageType, Normalized};
pub use metadata::TransformationMetadata;
pub use model::PaymentDocument;
pub use orchestrator::{Orchestrator, PaymentMessageMapper};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
