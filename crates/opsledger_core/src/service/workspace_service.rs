//! Workspace use-case service.
//!
//! # Responsibility
//! - Provide the presentation layer's entry points: entity mutations,
//!   snapshot reads and on-demand metrics recomputation.
//!
//! # Invariants
//! - Metrics are always a full recompute over a fresh snapshot; nothing is
//!   cached between calls.
//! - Snapshot settings are never empty: defaults are substituted whenever
//!   stored configuration is absent.

use crate::engine::{compute_metrics, Metrics};
use crate::model::person::{Person, PersonId};
use crate::model::project::{Project, ProjectId};
use crate::model::scope_change::{ScopeChange, ScopeChangeId};
use crate::model::settings::WorkspaceSettings;
use crate::model::team_cost::{TeamCost, TeamCostId};
use crate::model::transaction::{Transaction, TransactionId};
use crate::model::WorkspaceId;
use crate::repo::{LedgerStore, RepoError, RepoResult};
use log::debug;
use serde::Serialize;

/// Everything the store holds for one workspace, loaded in one pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkspaceSnapshot {
    pub projects: Vec<Project>,
    pub people: Vec<Person>,
    pub transactions: Vec<Transaction>,
    pub scope_changes: Vec<ScopeChange>,
    pub team_costs: Vec<TeamCost>,
    pub settings: WorkspaceSettings,
}

/// Use-case service wrapper over a ledger store implementation.
pub struct WorkspaceService<S: LedgerStore> {
    store: S,
}

impl<S: LedgerStore> WorkspaceService<S> {
    /// Creates a service using the provided store implementation.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Resolves the workspace by name, creating it on first use.
    pub fn bootstrap_workspace(&self, name: &str) -> RepoResult<WorkspaceId> {
        self.store.ensure_workspace(name)
    }

    /// Loads every collection plus effective (defaulted) settings.
    pub fn load_snapshot(&self, workspace: WorkspaceId) -> RepoResult<WorkspaceSnapshot> {
        Ok(WorkspaceSnapshot {
            projects: self.store.list_projects(workspace)?,
            people: self.store.list_people(workspace)?,
            transactions: self.store.list_transactions(workspace)?,
            scope_changes: self.store.list_scope_changes(workspace)?,
            team_costs: self.store.list_team_costs(workspace)?,
            settings: self.store.get_settings(workspace)?.unwrap_or_default(),
        })
    }

    /// Recomputes all derived figures from a fresh snapshot.
    ///
    /// Callers invoke this after every successful mutation; the recompute is
    /// cheap at workspace scale and trivially consistent.
    pub fn metrics(&self, workspace: WorkspaceId) -> RepoResult<Metrics> {
        let snapshot = self.load_snapshot(workspace)?;
        debug!(
            "event=metrics_recompute module=service workspace={workspace} projects={} transactions={} people={}",
            snapshot.projects.len(),
            snapshot.transactions.len(),
            snapshot.people.len()
        );
        Ok(compute_metrics(
            &snapshot.projects,
            &snapshot.transactions,
            &snapshot.people,
            &snapshot.settings.departments,
        ))
    }

    /// Creates a new project through store persistence.
    pub fn create_project(&self, workspace: WorkspaceId, project: &Project) -> RepoResult<ProjectId> {
        self.store.create_project(workspace, project)
    }

    /// Updates an existing project by stable ID.
    pub fn update_project(&self, workspace: WorkspaceId, project: &Project) -> RepoResult<()> {
        self.store.update_project(workspace, project)
    }

    /// Flips a project between Active and Completed.
    ///
    /// Unrecognized stored statuses reset to Active. Returns the project
    /// with its new status applied.
    pub fn toggle_project_status(
        &self,
        workspace: WorkspaceId,
        id: ProjectId,
    ) -> RepoResult<Project> {
        let project = self
            .store
            .get_project(workspace, id)?
            .ok_or(RepoError::NotFound {
                entity: "project",
                id,
            })?;
        let status = project.status.toggled();
        self.store.set_project_status(workspace, id, &status)?;
        Ok(Project { status, ..project })
    }

    /// Deletes a project with referential cleanup (see the store contract).
    pub fn delete_project(&self, workspace: WorkspaceId, id: ProjectId) -> RepoResult<()> {
        self.store.delete_project(workspace, id)
    }

    /// Creates a new person through store persistence.
    pub fn create_person(&self, workspace: WorkspaceId, person: &Person) -> RepoResult<PersonId> {
        self.store.create_person(workspace, person)
    }

    /// Updates an existing person by stable ID.
    pub fn update_person(&self, workspace: WorkspaceId, person: &Person) -> RepoResult<()> {
        self.store.update_person(workspace, person)
    }

    /// Deletes a person, clearing references from transactions and team
    /// costs.
    pub fn delete_person(&self, workspace: WorkspaceId, id: PersonId) -> RepoResult<()> {
        self.store.delete_person(workspace, id)
    }

    /// Records a new ledger transaction.
    pub fn create_transaction(
        &self,
        workspace: WorkspaceId,
        txn: &Transaction,
    ) -> RepoResult<TransactionId> {
        self.store.create_transaction(workspace, txn)
    }

    /// Updates an existing transaction by stable ID.
    pub fn update_transaction(&self, workspace: WorkspaceId, txn: &Transaction) -> RepoResult<()> {
        self.store.update_transaction(workspace, txn)
    }

    /// Deletes one transaction row.
    pub fn delete_transaction(&self, workspace: WorkspaceId, id: TransactionId) -> RepoResult<()> {
        self.store.delete_transaction(workspace, id)
    }

    /// Records a contract amendment.
    pub fn create_scope_change(
        &self,
        workspace: WorkspaceId,
        change: &ScopeChange,
    ) -> RepoResult<ScopeChangeId> {
        self.store.create_scope_change(workspace, change)
    }

    /// Updates an existing scope change by stable ID.
    pub fn update_scope_change(
        &self,
        workspace: WorkspaceId,
        change: &ScopeChange,
    ) -> RepoResult<()> {
        self.store.update_scope_change(workspace, change)
    }

    /// Deletes one scope change row.
    pub fn delete_scope_change(&self, workspace: WorkspaceId, id: ScopeChangeId) -> RepoResult<()> {
        self.store.delete_scope_change(workspace, id)
    }

    /// Records a standing team cost.
    pub fn create_team_cost(
        &self,
        workspace: WorkspaceId,
        cost: &TeamCost,
    ) -> RepoResult<TeamCostId> {
        self.store.create_team_cost(workspace, cost)
    }

    /// Updates an existing team cost by stable ID.
    pub fn update_team_cost(&self, workspace: WorkspaceId, cost: &TeamCost) -> RepoResult<()> {
        self.store.update_team_cost(workspace, cost)
    }

    /// Deletes one team cost row.
    pub fn delete_team_cost(&self, workspace: WorkspaceId, id: TeamCostId) -> RepoResult<()> {
        self.store.delete_team_cost(workspace, id)
    }

    /// Replaces the workspace's configuration lists.
    pub fn save_settings(
        &self,
        workspace: WorkspaceId,
        settings: &WorkspaceSettings,
    ) -> RepoResult<()> {
        self.store.save_settings(workspace, settings)
    }
}
