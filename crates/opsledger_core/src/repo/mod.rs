//! Repository layer: the entity-store collaborator behind the services.
//!
//! # Responsibility
//! - Define use-case oriented persistence contracts, one per aggregate.
//! - Keep SQL details and cascade ordering inside the storage boundary.
//!
//! # Invariants
//! - Write paths validate records before any SQL mutation.
//! - Stored monetary text that fails to parse loads as zero; structurally
//!   broken rows (bad uuid) surface as `InvalidData` instead of being
//!   silently masked.
//! - Cross-table delete cleanup runs as one immediate transaction, never as
//!   a database trigger, so the policy stays visible and testable.

use crate::db::DbError;
use crate::model::RecordValidationError;
use rusqlite::Connection;
use rust_decimal::Decimal;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

pub mod person_repo;
pub mod project_repo;
pub mod scope_change_repo;
pub mod team_cost_repo;
pub mod transaction_repo;
pub mod workspace_repo;

pub use person_repo::PersonRepository;
pub use project_repo::ProjectRepository;
pub use scope_change_repo::ScopeChangeRepository;
pub use team_cost_repo::TeamCostRepository;
pub use transaction_repo::TransactionRepository;
pub use workspace_repo::WorkspaceRepository;

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error shared by every aggregate contract.
#[derive(Debug)]
pub enum RepoError {
    Validation(RecordValidationError),
    Db(DbError),
    /// Target row does not exist in the given workspace.
    NotFound {
        entity: &'static str,
        id: Uuid,
    },
    /// Connection schema is not at the migrated version this build expects.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Persisted data cannot be converted to a valid read model.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "ledger store requires schema version {expected_version}, got {actual_version}"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted ledger data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RecordValidationError> for RepoError {
    fn from(value: RecordValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Every aggregate contract at once: the full store surface services
/// program against.
pub trait LedgerStore:
    ProjectRepository
    + PersonRepository
    + TransactionRepository
    + ScopeChangeRepository
    + TeamCostRepository
    + WorkspaceRepository
{
}

impl<T> LedgerStore for T where
    T: ProjectRepository
        + PersonRepository
        + TransactionRepository
        + ScopeChangeRepository
        + TeamCostRepository
        + WorkspaceRepository
{
}

/// SQLite-backed implementation of every ledger repository trait.
pub struct SqliteLedgerStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteLedgerStore<'conn> {
    /// Creates a store over a migrated connection.
    ///
    /// Rejects connections whose `PRAGMA user_version` does not match this
    /// build's latest migration, so raw unmigrated handles cannot sneak in.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let expected_version = crate::db::migrations::latest_version();
        let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
        if actual_version != expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }
        Ok(Self { conn })
    }

    pub(crate) fn conn(&self) -> &Connection {
        self.conn
    }
}

pub(crate) fn parse_uuid(value: &str, column: &'static str) -> RepoResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid `{value}` in {column}")))
}

pub(crate) fn parse_optional_uuid(
    value: Option<String>,
    column: &'static str,
) -> RepoResult<Option<Uuid>> {
    value.map(|text| parse_uuid(&text, column)).transpose()
}

/// Decodes a stored monetary value, coercing absent or unparseable text to
/// zero so one malformed record can never corrupt whole-collection sums.
pub(crate) fn parse_amount(value: Option<String>) -> Decimal {
    value
        .and_then(|text| Decimal::from_str(text.trim()).ok())
        .unwrap_or(Decimal::ZERO)
}

pub(crate) fn amount_to_db(amount: Decimal) -> String {
    amount.to_string()
}

#[cfg(test)]
mod tests {
    use super::parse_amount;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    #[test]
    fn amount_decoding_coerces_garbage_to_zero() {
        assert_eq!(parse_amount(None), Decimal::ZERO);
        assert_eq!(parse_amount(Some("".to_string())), Decimal::ZERO);
        assert_eq!(parse_amount(Some("not-a-number".to_string())), Decimal::ZERO);
        assert_eq!(
            parse_amount(Some(" 1250.75 ".to_string())),
            Decimal::from_str("1250.75").unwrap()
        );
    }
}
