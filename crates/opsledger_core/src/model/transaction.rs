//! Transaction domain model: the ledger's atomic unit.
//!
//! # Responsibility
//! - Define the single record type every financial aggregate is derived
//!   from.
//!
//! # Invariants
//! - `amount` is non-negative once validated; direction comes from `type`,
//!   not from sign.
//! - `project_id`/`person_id` are soft references: deletes clear them
//!   asynchronously, so readers must tolerate dangling values.

use crate::model::person::PersonId;
use crate::model::project::ProjectId;
use crate::model::{require_date, require_non_negative, require_text, RecordValidationError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a ledger transaction.
pub type TransactionId = Uuid;

/// Transaction type kept as an open string.
///
/// The engine only distinguishes `Client Payment` (income) and
/// `Remote Dev Payment` (team payout); every other value, canonical or not,
/// lands in the generic expense bucket when paid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxnKind(String);

impl TxnKind {
    pub const CLIENT_PAYMENT: &'static str = "Client Payment";
    pub const REMOTE_DEV_PAYMENT: &'static str = "Remote Dev Payment";
    pub const OFFICE_EXPENSE: &'static str = "Office Expense";
    pub const SALARY_PAYMENT: &'static str = "Salary Payment";

    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_client_payment(&self) -> bool {
        self.0 == Self::CLIENT_PAYMENT
    }

    pub fn is_remote_dev_payment(&self) -> bool {
        self.0 == Self::REMOTE_DEV_PAYMENT
    }
}

/// Settlement status kept as an open string.
///
/// `Paid` and `Pending` are the values the engine recognizes; anything else
/// contributes to no sum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxnStatus(String);

impl TxnStatus {
    pub const PAID: &'static str = "Paid";
    pub const PENDING: &'static str = "Pending";

    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn paid() -> Self {
        Self::new(Self::PAID)
    }

    pub fn pending() -> Self {
        Self::new(Self::PENDING)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_paid(&self) -> bool {
        self.0 == Self::PAID
    }

    pub fn is_pending(&self) -> bool {
        self.0 == Self::PENDING
    }
}

/// One money movement in or out of the business.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    /// `YYYY-MM-DD` booking date.
    pub date: String,
    #[serde(rename = "type")]
    pub kind: TxnKind,
    pub project_id: Option<ProjectId>,
    pub person_id: Option<PersonId>,
    /// Free text, conventionally one of the configured expense categories.
    pub category: Option<String>,
    pub amount: Decimal,
    pub status: TxnStatus,
    pub note: Option<String>,
}

impl Transaction {
    /// Creates an unlinked transaction with a generated stable ID.
    pub fn new(
        date: impl Into<String>,
        kind: TxnKind,
        amount: Decimal,
        status: TxnStatus,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            date: date.into(),
            kind,
            project_id: None,
            person_id: None,
            category: None,
            amount,
            status,
            note: None,
        }
    }

    /// Checks write-edge invariants before persistence.
    pub fn validate(&self) -> Result<(), RecordValidationError> {
        require_date("date", &self.date)?;
        require_text("type", self.kind.as_str())?;
        require_text("status", self.status.as_str())?;
        require_non_negative("amount", self.amount)?;
        Ok(())
    }
}
