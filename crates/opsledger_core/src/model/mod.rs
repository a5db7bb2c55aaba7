//! Canonical domain records for the operations ledger.
//!
//! # Responsibility
//! - Define the entity shapes shared by storage, services and the engine.
//! - Provide write-edge validation so malformed records never reach SQL.
//!
//! # Invariants
//! - Every entity is identified by a stable UUID that is never reused.
//! - Monetary fields are fixed-point `Decimal` values, validated `>= 0`.
//! - `type`/`status` style fields are open strings: storage accepts any
//!   value, and unrecognized values simply match no derivation bucket.

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub mod person;
pub mod project;
pub mod scope_change;
pub mod settings;
pub mod team_cost;
pub mod transaction;

/// Stable identifier of the workspace that owns every record.
pub type WorkspaceId = Uuid;

/// Validation failure raised before any record reaches persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordValidationError {
    /// A required text field is empty or whitespace-only.
    EmptyField(&'static str),
    /// A monetary field is negative.
    NegativeAmount(&'static str),
    /// A calendar field does not match `YYYY-MM-DD`.
    InvalidDate {
        field: &'static str,
        value: String,
    },
}

impl Display for RecordValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField(field) => write!(f, "field `{field}` must not be empty"),
            Self::NegativeAmount(field) => write!(f, "field `{field}` must not be negative"),
            Self::InvalidDate { field, value } => {
                write!(f, "field `{field}` must be a YYYY-MM-DD date, got `{value}`")
            }
        }
    }
}

impl Error for RecordValidationError {}

static DATE_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("date shape pattern is valid"));

pub(crate) fn require_text(field: &'static str, value: &str) -> Result<(), RecordValidationError> {
    if value.trim().is_empty() {
        return Err(RecordValidationError::EmptyField(field));
    }
    Ok(())
}

pub(crate) fn require_non_negative(
    field: &'static str,
    amount: Decimal,
) -> Result<(), RecordValidationError> {
    if amount < Decimal::ZERO {
        return Err(RecordValidationError::NegativeAmount(field));
    }
    Ok(())
}

pub(crate) fn require_date(field: &'static str, value: &str) -> Result<(), RecordValidationError> {
    if !DATE_SHAPE.is_match(value) {
        return Err(RecordValidationError::InvalidDate {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}
