//! Person domain model: staff, contractors and vendors.

use crate::model::{require_non_negative, require_text, RecordValidationError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a person.
pub type PersonId = Uuid;

/// Engagement category kept as an open string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonKind(String);

impl PersonKind {
    pub const IN_HOUSE: &'static str = "In-House";
    pub const REMOTE: &'static str = "Remote";
    pub const VENDOR: &'static str = "Vendor";

    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Person lifecycle status kept as an open string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonStatus(String);

impl PersonStatus {
    pub const ACTIVE: &'static str = "Active";
    pub const INACTIVE: &'static str = "Inactive";

    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn active() -> Self {
        Self::new(Self::ACTIVE)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_active(&self) -> bool {
        self.0 == Self::ACTIVE
    }
}

impl Default for PersonStatus {
    fn default() -> Self {
        Self::active()
    }
}

/// Team member record.
///
/// `monthly_salary` is informational only: it is never posted to the
/// transaction ledger automatically, so it contributes to no aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    pub role: String,
    #[serde(rename = "type")]
    pub kind: PersonKind,
    pub monthly_salary: Decimal,
    pub status: PersonStatus,
}

impl Person {
    /// Creates an active person with a generated stable ID and zero salary.
    pub fn new(name: impl Into<String>, role: impl Into<String>, kind: PersonKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            role: role.into(),
            kind,
            monthly_salary: Decimal::ZERO,
            status: PersonStatus::active(),
        }
    }

    /// Checks write-edge invariants before persistence.
    pub fn validate(&self) -> Result<(), RecordValidationError> {
        require_text("name", &self.name)?;
        require_text("role", &self.role)?;
        require_non_negative("monthly_salary", self.monthly_salary)?;
        Ok(())
    }
}
