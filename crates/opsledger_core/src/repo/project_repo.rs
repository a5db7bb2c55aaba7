//! Project repository contract and SQLite implementation.
//!
//! # Responsibility
//! - CRUD over `projects`, scoped to one workspace.
//! - Own the project-delete cascade: dependent cost/amendment rows go away,
//!   ledger transactions keep their history with the reference cleared.
//!
//! # Invariants
//! - Write paths call `Project::validate()` before SQL mutations.
//! - Listing order is `created_at DESC, uuid ASC`.
//! - The delete cascade runs inside a single immediate transaction.

use crate::model::project::{Project, ProjectId, ProjectStatus};
use crate::model::WorkspaceId;
use crate::repo::{amount_to_db, parse_amount, parse_uuid, RepoError, RepoResult, SqliteLedgerStore};
use log::info;
use rusqlite::{params, Row, Transaction as SqlTransaction, TransactionBehavior};

const PROJECT_SELECT_SQL: &str = "SELECT
    uuid,
    name,
    client,
    department,
    contract_amount,
    start_date,
    status
FROM projects";

/// Repository interface for project records.
pub trait ProjectRepository {
    fn create_project(&self, workspace: WorkspaceId, project: &Project) -> RepoResult<ProjectId>;
    fn update_project(&self, workspace: WorkspaceId, project: &Project) -> RepoResult<()>;
    fn get_project(&self, workspace: WorkspaceId, id: ProjectId) -> RepoResult<Option<Project>>;
    fn list_projects(&self, workspace: WorkspaceId) -> RepoResult<Vec<Project>>;
    /// Overwrites only the lifecycle status; used by the toggle operation.
    fn set_project_status(
        &self,
        workspace: WorkspaceId,
        id: ProjectId,
        status: &ProjectStatus,
    ) -> RepoResult<()>;
    /// Deletes one project with referential cleanup: its team costs and
    /// scope changes are removed, transactions keep their rows but lose the
    /// project reference.
    fn delete_project(&self, workspace: WorkspaceId, id: ProjectId) -> RepoResult<()>;
}

impl ProjectRepository for SqliteLedgerStore<'_> {
    fn create_project(&self, workspace: WorkspaceId, project: &Project) -> RepoResult<ProjectId> {
        project.validate()?;

        self.conn().execute(
            "INSERT INTO projects (
                uuid,
                workspace_uuid,
                name,
                client,
                department,
                contract_amount,
                start_date,
                status
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
            params![
                project.id.to_string(),
                workspace.to_string(),
                project.name.as_str(),
                project.client.as_str(),
                project.department.as_str(),
                amount_to_db(project.contract_amount),
                project.start_date.as_deref(),
                project.status.as_str(),
            ],
        )?;

        Ok(project.id)
    }

    fn update_project(&self, workspace: WorkspaceId, project: &Project) -> RepoResult<()> {
        project.validate()?;

        let changed = self.conn().execute(
            "UPDATE projects
             SET
                name = ?1,
                client = ?2,
                department = ?3,
                contract_amount = ?4,
                start_date = ?5,
                status = ?6,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE workspace_uuid = ?7
               AND uuid = ?8;",
            params![
                project.name.as_str(),
                project.client.as_str(),
                project.department.as_str(),
                amount_to_db(project.contract_amount),
                project.start_date.as_deref(),
                project.status.as_str(),
                workspace.to_string(),
                project.id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "project",
                id: project.id,
            });
        }

        Ok(())
    }

    fn get_project(&self, workspace: WorkspaceId, id: ProjectId) -> RepoResult<Option<Project>> {
        let mut stmt = self.conn().prepare(&format!(
            "{PROJECT_SELECT_SQL}
             WHERE workspace_uuid = ?1
               AND uuid = ?2;"
        ))?;

        let mut rows = stmt.query(params![workspace.to_string(), id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_project_row(row)?));
        }

        Ok(None)
    }

    fn list_projects(&self, workspace: WorkspaceId) -> RepoResult<Vec<Project>> {
        let mut stmt = self.conn().prepare(&format!(
            "{PROJECT_SELECT_SQL}
             WHERE workspace_uuid = ?1
             ORDER BY created_at DESC, uuid ASC;"
        ))?;

        let mut rows = stmt.query([workspace.to_string()])?;
        let mut projects = Vec::new();
        while let Some(row) = rows.next()? {
            projects.push(parse_project_row(row)?);
        }

        Ok(projects)
    }

    fn set_project_status(
        &self,
        workspace: WorkspaceId,
        id: ProjectId,
        status: &ProjectStatus,
    ) -> RepoResult<()> {
        let changed = self.conn().execute(
            "UPDATE projects
             SET
                status = ?1,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE workspace_uuid = ?2
               AND uuid = ?3;",
            params![status.as_str(), workspace.to_string(), id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "project",
                id,
            });
        }

        Ok(())
    }

    fn delete_project(&self, workspace: WorkspaceId, id: ProjectId) -> RepoResult<()> {
        let tx = SqlTransaction::new_unchecked(self.conn(), TransactionBehavior::Immediate)?;
        let workspace_key = workspace.to_string();
        let project_key = id.to_string();

        tx.execute(
            "DELETE FROM team_costs
             WHERE workspace_uuid = ?1
               AND project_uuid = ?2;",
            params![workspace_key, project_key],
        )?;
        tx.execute(
            "DELETE FROM scope_changes
             WHERE workspace_uuid = ?1
               AND project_uuid = ?2;",
            params![workspace_key, project_key],
        )?;
        tx.execute(
            "UPDATE transactions
             SET
                project_uuid = NULL,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE workspace_uuid = ?1
               AND project_uuid = ?2;",
            params![workspace_key, project_key],
        )?;

        let changed = tx.execute(
            "DELETE FROM projects
             WHERE workspace_uuid = ?1
               AND uuid = ?2;",
            params![workspace_key, project_key],
        )?;

        if changed == 0 {
            // Drop of `tx` rolls back, keeping related rows untouched.
            return Err(RepoError::NotFound {
                entity: "project",
                id,
            });
        }

        tx.commit()?;
        info!("event=project_delete module=repo status=ok workspace={workspace} project={id}");
        Ok(())
    }
}

fn parse_project_row(row: &Row<'_>) -> RepoResult<Project> {
    let uuid_text: String = row.get("uuid")?;
    Ok(Project {
        id: parse_uuid(&uuid_text, "projects.uuid")?,
        name: row.get("name")?,
        client: row.get("client")?,
        department: row.get("department")?,
        contract_amount: parse_amount(row.get("contract_amount")?),
        start_date: row.get("start_date")?,
        status: ProjectStatus::new(row.get::<_, String>("status")?),
    })
}
