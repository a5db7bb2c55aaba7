//! Scope change domain model: a recorded contract amendment.
//!
//! Scope changes are persisted for reporting but are NOT folded into the
//! derivation formulas: due/progress keep reading `Project::contract_amount`
//! directly. Callers that want an amendment reflected in the figures must
//! update the project's contract amount themselves.

use crate::model::project::ProjectId;
use crate::model::{require_date, require_non_negative, RecordValidationError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a scope change.
pub type ScopeChangeId = Uuid;

/// Contract amendment attached to one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeChange {
    pub id: ScopeChangeId,
    pub project_id: ProjectId,
    /// `YYYY-MM-DD` amendment date.
    pub date: String,
    pub added_contract_amount: Decimal,
    pub added_dev_cost: Decimal,
    pub note: Option<String>,
}

impl ScopeChange {
    /// Creates an amendment record with a generated stable ID.
    pub fn new(
        project_id: ProjectId,
        date: impl Into<String>,
        added_contract_amount: Decimal,
        added_dev_cost: Decimal,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            project_id,
            date: date.into(),
            added_contract_amount,
            added_dev_cost,
            note: None,
        }
    }

    /// Checks write-edge invariants before persistence.
    pub fn validate(&self) -> Result<(), RecordValidationError> {
        require_date("date", &self.date)?;
        require_non_negative("added_contract_amount", self.added_contract_amount)?;
        require_non_negative("added_dev_cost", self.added_dev_cost)?;
        Ok(())
    }
}
