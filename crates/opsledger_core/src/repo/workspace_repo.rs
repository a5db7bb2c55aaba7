//! Workspace bootstrap and workspace-level configuration.
//!
//! # Responsibility
//! - Get-or-create the workspace row the rest of the store is keyed by.
//! - Persist the ordered department / expense-category lists.
//!
//! # Invariants
//! - `ensure_workspace` seeds default settings exactly once, atomically
//!   with workspace creation.
//! - Saving settings replaces both lists wholesale; list order is the
//!   stored `position` order.

use crate::model::settings::WorkspaceSettings;
use crate::model::WorkspaceId;
use crate::repo::{parse_uuid, RepoResult, SqliteLedgerStore};
use log::info;
use rusqlite::{params, OptionalExtension, Transaction as SqlTransaction, TransactionBehavior};
use uuid::Uuid;

const KIND_DEPARTMENT: &str = "department";
const KIND_EXPENSE_CATEGORY: &str = "expense_category";

/// Repository interface for workspace identity and configuration.
pub trait WorkspaceRepository {
    /// Returns the workspace with the given name, creating it (with default
    /// settings) when absent.
    fn ensure_workspace(&self, name: &str) -> RepoResult<WorkspaceId>;
    /// Loads stored settings; `None` when the workspace has never saved any.
    fn get_settings(&self, workspace: WorkspaceId) -> RepoResult<Option<WorkspaceSettings>>;
    /// Replaces both configuration lists for the workspace.
    fn save_settings(&self, workspace: WorkspaceId, settings: &WorkspaceSettings) -> RepoResult<()>;
}

impl WorkspaceRepository for SqliteLedgerStore<'_> {
    fn ensure_workspace(&self, name: &str) -> RepoResult<WorkspaceId> {
        let existing: Option<String> = self
            .conn()
            .query_row(
                "SELECT uuid
                 FROM workspaces
                 WHERE name = ?1
                 ORDER BY created_at ASC
                 LIMIT 1;",
                [name],
                |row| row.get(0),
            )
            .optional()?;

        if let Some(uuid_text) = existing {
            return parse_uuid(&uuid_text, "workspaces.uuid");
        }

        let workspace = Uuid::new_v4();
        let tx = SqlTransaction::new_unchecked(self.conn(), TransactionBehavior::Immediate)?;
        tx.execute(
            "INSERT INTO workspaces (uuid, name) VALUES (?1, ?2);",
            params![workspace.to_string(), name],
        )?;
        write_settings_rows(&tx, workspace, &WorkspaceSettings::default())?;
        tx.commit()?;

        info!("event=workspace_create module=repo status=ok workspace={workspace}");
        Ok(workspace)
    }

    fn get_settings(&self, workspace: WorkspaceId) -> RepoResult<Option<WorkspaceSettings>> {
        let mut stmt = self.conn().prepare(
            "SELECT kind, label
             FROM workspace_settings
             WHERE workspace_uuid = ?1
             ORDER BY kind ASC, position ASC;",
        )?;

        let mut rows = stmt.query([workspace.to_string()])?;
        let mut any = false;
        let mut departments = Vec::new();
        let mut expense_categories = Vec::new();
        while let Some(row) = rows.next()? {
            any = true;
            let kind: String = row.get("kind")?;
            let label: String = row.get("label")?;
            match kind.as_str() {
                KIND_DEPARTMENT => departments.push(label),
                KIND_EXPENSE_CATEGORY => expense_categories.push(label),
                // Unknown kinds are ignored so newer builds can extend the
                // table without breaking older readers.
                _ => {}
            }
        }

        if !any {
            return Ok(None);
        }

        Ok(Some(WorkspaceSettings {
            departments,
            expense_categories,
        }))
    }

    fn save_settings(&self, workspace: WorkspaceId, settings: &WorkspaceSettings) -> RepoResult<()> {
        settings.validate()?;

        let tx = SqlTransaction::new_unchecked(self.conn(), TransactionBehavior::Immediate)?;
        tx.execute(
            "DELETE FROM workspace_settings WHERE workspace_uuid = ?1;",
            [workspace.to_string()],
        )?;
        write_settings_rows(&tx, workspace, settings)?;
        tx.commit()?;

        Ok(())
    }
}

fn write_settings_rows(
    tx: &SqlTransaction<'_>,
    workspace: WorkspaceId,
    settings: &WorkspaceSettings,
) -> RepoResult<()> {
    let mut stmt = tx.prepare(
        "INSERT INTO workspace_settings (workspace_uuid, kind, position, label)
         VALUES (?1, ?2, ?3, ?4);",
    )?;

    for (position, label) in settings.departments.iter().enumerate() {
        stmt.execute(params![
            workspace.to_string(),
            KIND_DEPARTMENT,
            position as i64,
            label.as_str(),
        ])?;
    }
    for (position, label) in settings.expense_categories.iter().enumerate() {
        stmt.execute(params![
            workspace.to_string(),
            KIND_EXPENSE_CATEGORY,
            position as i64,
            label.as_str(),
        ])?;
    }

    Ok(())
}
