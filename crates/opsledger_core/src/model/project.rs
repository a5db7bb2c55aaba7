//! Project domain model.
//!
//! # Responsibility
//! - Define the client-engagement record the derivation engine aggregates
//!   transactions against.
//!
//! # Invariants
//! - `contract_amount` is non-negative once validated.
//! - `department` is a free string; membership in the configured department
//!   list is a presentation concern, never enforced here.

use crate::model::{require_date, require_non_negative, require_text, RecordValidationError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a project.
pub type ProjectId = Uuid;

/// Project lifecycle status kept as an open string.
///
/// `Active` and `Completed` are the canonical values; anything else is
/// carried through storage untouched and treated as non-active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectStatus(String);

impl ProjectStatus {
    pub const ACTIVE: &'static str = "Active";
    pub const COMPLETED: &'static str = "Completed";

    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn active() -> Self {
        Self::new(Self::ACTIVE)
    }

    pub fn completed() -> Self {
        Self::new(Self::COMPLETED)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_active(&self) -> bool {
        self.0 == Self::ACTIVE
    }

    /// Returns the status the toggle operation switches to.
    ///
    /// Active flips to Completed; Completed and any unrecognized value flip
    /// back to Active.
    pub fn toggled(&self) -> Self {
        if self.is_active() {
            Self::completed()
        } else {
            Self::active()
        }
    }
}

impl Default for ProjectStatus {
    fn default() -> Self {
        Self::active()
    }
}

impl Display for ProjectStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Client engagement with a fixed contract value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Stable global ID used for transaction linkage and cascades.
    pub id: ProjectId,
    pub name: String,
    pub client: String,
    /// Conventionally one of the workspace's configured department names.
    pub department: String,
    /// Agreed contract value; the basis for due/profit/progress figures.
    pub contract_amount: Decimal,
    /// Optional `YYYY-MM-DD` start date.
    pub start_date: Option<String>,
    pub status: ProjectStatus,
}

impl Project {
    /// Creates an active project with a generated stable ID.
    pub fn new(
        name: impl Into<String>,
        client: impl Into<String>,
        department: impl Into<String>,
        contract_amount: Decimal,
    ) -> Self {
        Self::with_id(Uuid::new_v4(), name, client, department, contract_amount)
    }

    /// Creates a project with a caller-provided stable ID.
    ///
    /// Used by import paths where identity already exists externally.
    pub fn with_id(
        id: ProjectId,
        name: impl Into<String>,
        client: impl Into<String>,
        department: impl Into<String>,
        contract_amount: Decimal,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            client: client.into(),
            department: department.into(),
            contract_amount,
            start_date: None,
            status: ProjectStatus::active(),
        }
    }

    /// Checks write-edge invariants before persistence.
    pub fn validate(&self) -> Result<(), RecordValidationError> {
        require_text("name", &self.name)?;
        require_text("client", &self.client)?;
        require_text("department", &self.department)?;
        require_non_negative("contract_amount", self.contract_amount)?;
        if let Some(start_date) = &self.start_date {
            require_date("start_date", start_date)?;
        }
        Ok(())
    }
}
