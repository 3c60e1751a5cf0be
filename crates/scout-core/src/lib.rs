//! # scout-core
//!
//! Core types and error types for Scout.
//!
//! This crate provides the foundational types shared across all Scout crates:
//! - Job mode and status enums with state machine transitions
//! - The `ResearchJob` record tracked by the job controller
//! - Provider derivation from model identifiers
//! - The research-capable model allow-list and built-in provider catalog
//! - Cross-cutting error types

pub mod enums;
pub mod errors;
pub mod job;
pub mod providers;

pub use enums::{ErrorKind, JobStatus, Mode};
pub use errors::CoreError;
pub use job::{JobOptions, ResearchJob};
pub use providers::{
    DEFAULT_MODEL, DEFAULT_RESEARCH_MODEL, FALLBACK_PROVIDER, ModelInfo, ProviderInfo,
    RESEARCH_MODELS, builtin_catalog, determine_provider, is_research_capable,
};
