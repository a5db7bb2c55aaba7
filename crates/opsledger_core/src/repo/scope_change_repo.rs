//! Scope change repository contract and SQLite implementation.

use crate::model::scope_change::{ScopeChange, ScopeChangeId};
use crate::model::WorkspaceId;
use crate::repo::{
    amount_to_db, parse_amount, parse_uuid, RepoError, RepoResult, SqliteLedgerStore,
};
use rusqlite::{params, Row};

const SCOPE_CHANGE_SELECT_SQL: &str = "SELECT
    uuid,
    project_uuid,
    change_date,
    added_contract_amount,
    added_dev_cost,
    note
FROM scope_changes";

/// Repository interface for contract amendment records.
pub trait ScopeChangeRepository {
    fn create_scope_change(
        &self,
        workspace: WorkspaceId,
        change: &ScopeChange,
    ) -> RepoResult<ScopeChangeId>;
    fn update_scope_change(&self, workspace: WorkspaceId, change: &ScopeChange) -> RepoResult<()>;
    fn list_scope_changes(&self, workspace: WorkspaceId) -> RepoResult<Vec<ScopeChange>>;
    fn delete_scope_change(&self, workspace: WorkspaceId, id: ScopeChangeId) -> RepoResult<()>;
}

impl ScopeChangeRepository for SqliteLedgerStore<'_> {
    fn create_scope_change(
        &self,
        workspace: WorkspaceId,
        change: &ScopeChange,
    ) -> RepoResult<ScopeChangeId> {
        change.validate()?;

        self.conn().execute(
            "INSERT INTO scope_changes (
                uuid,
                workspace_uuid,
                project_uuid,
                change_date,
                added_contract_amount,
                added_dev_cost,
                note
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                change.id.to_string(),
                workspace.to_string(),
                change.project_id.to_string(),
                change.date.as_str(),
                amount_to_db(change.added_contract_amount),
                amount_to_db(change.added_dev_cost),
                change.note.as_deref(),
            ],
        )?;

        Ok(change.id)
    }

    fn update_scope_change(&self, workspace: WorkspaceId, change: &ScopeChange) -> RepoResult<()> {
        change.validate()?;

        let changed = self.conn().execute(
            "UPDATE scope_changes
             SET
                project_uuid = ?1,
                change_date = ?2,
                added_contract_amount = ?3,
                added_dev_cost = ?4,
                note = ?5,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE workspace_uuid = ?6
               AND uuid = ?7;",
            params![
                change.project_id.to_string(),
                change.date.as_str(),
                amount_to_db(change.added_contract_amount),
                amount_to_db(change.added_dev_cost),
                change.note.as_deref(),
                workspace.to_string(),
                change.id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "scope change",
                id: change.id,
            });
        }

        Ok(())
    }

    fn list_scope_changes(&self, workspace: WorkspaceId) -> RepoResult<Vec<ScopeChange>> {
        let mut stmt = self.conn().prepare(&format!(
            "{SCOPE_CHANGE_SELECT_SQL}
             WHERE workspace_uuid = ?1
             ORDER BY change_date DESC, uuid ASC;"
        ))?;

        let mut rows = stmt.query([workspace.to_string()])?;
        let mut changes = Vec::new();
        while let Some(row) = rows.next()? {
            changes.push(parse_scope_change_row(row)?);
        }

        Ok(changes)
    }

    fn delete_scope_change(&self, workspace: WorkspaceId, id: ScopeChangeId) -> RepoResult<()> {
        let changed = self.conn().execute(
            "DELETE FROM scope_changes
             WHERE workspace_uuid = ?1
               AND uuid = ?2;",
            params![workspace.to_string(), id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "scope change",
                id,
            });
        }

        Ok(())
    }
}

fn parse_scope_change_row(row: &Row<'_>) -> RepoResult<ScopeChange> {
    let uuid_text: String = row.get("uuid")?;
    let project_text: String = row.get("project_uuid")?;
    Ok(ScopeChange {
        id: parse_uuid(&uuid_text, "scope_changes.uuid")?,
        project_id: parse_uuid(&project_text, "scope_changes.project_uuid")?,
        date: row.get("change_date")?,
        added_contract_amount: parse_amount(row.get("added_contract_amount")?),
        added_dev_cost: parse_amount(row.get("added_dev_cost")?),
        note: row.get("note")?,
    })
}
