//! Core domain logic for OpsLedger, a single-workspace operations ledger.
//! This crate is the single source of truth for financial derivation rules.

pub mod db;
pub mod engine;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use engine::{compute_metrics, DeptSales, Metrics, PersonStats, ProjectStats};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::person::{Person, PersonId, PersonKind, PersonStatus};
pub use model::project::{Project, ProjectId, ProjectStatus};
pub use model::scope_change::{ScopeChange, ScopeChangeId};
pub use model::settings::{default_departments, default_expense_categories, WorkspaceSettings};
pub use model::team_cost::{TeamCost, TeamCostId};
pub use model::transaction::{Transaction, TransactionId, TxnKind, TxnStatus};
pub use model::{RecordValidationError, WorkspaceId};
pub use repo::{
    LedgerStore, PersonRepository, ProjectRepository, RepoError, RepoResult,
    ScopeChangeRepository, SqliteLedgerStore, TeamCostRepository, TransactionRepository,
    WorkspaceRepository,
};
pub use service::workspace_service::{WorkspaceService, WorkspaceSnapshot};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
