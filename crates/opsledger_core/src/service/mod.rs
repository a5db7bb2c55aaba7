//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store calls into the operations the presentation layer
//!   invokes, including the metrics recompute after mutations.
//! - Keep callers decoupled from storage details.

pub mod workspace_service;
