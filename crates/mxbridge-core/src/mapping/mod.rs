//! Mapping engine: tables, version bridging, concrete mappers
//!
//! Execution model in one sentence: a mapper declares an ordered
//! [`rule::MappingTable`] over dotted paths; simple correspondences copy
//! values through the JSON tree, while derivations and aggregations run as
//! named qualifier functions that deserialize the subtrees they need into
//! the typed models, fold version skew through [`adapter`], [`identifiers`]
//! and [`remittance`], and serialize back.

pub mod adapter;
pub mod identifiers;
pub mod pacs008_to_pacs009;
pub mod pain001_to_pacs008;
pub mod path;
pub mod remittance;
pub mod rule;
pub mod trace;
