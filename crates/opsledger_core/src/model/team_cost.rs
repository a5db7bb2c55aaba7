//! Team cost domain model: a standing cost record for one project.
//!
//! Like scope changes, team costs are raw data for the presentation layer;
//! the derivation engine never reads them.

use crate::model::person::PersonId;
use crate::model::project::ProjectId;
use crate::model::{require_non_negative, require_text, RecordValidationError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a team cost record.
pub type TeamCostId = Uuid;

/// Fixed cost booked against a project, optionally tied to a person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamCost {
    pub id: TeamCostId,
    pub project_id: ProjectId,
    /// Soft reference; cleared (not cascaded) when the person is deleted.
    pub person_id: Option<PersonId>,
    pub cost_type: String,
    pub fixed_amount: Decimal,
}

impl TeamCost {
    /// Creates a cost record with a generated stable ID.
    pub fn new(
        project_id: ProjectId,
        cost_type: impl Into<String>,
        fixed_amount: Decimal,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            project_id,
            person_id: None,
            cost_type: cost_type.into(),
            fixed_amount,
        }
    }

    /// Checks write-edge invariants before persistence.
    pub fn validate(&self) -> Result<(), RecordValidationError> {
        require_text("cost_type", &self.cost_type)?;
        require_non_negative("fixed_amount", self.fixed_amount)?;
        Ok(())
    }
}
