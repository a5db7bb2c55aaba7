//! Team cost repository contract and SQLite implementation.

use crate::model::team_cost::{TeamCost, TeamCostId};
use crate::model::WorkspaceId;
use crate::repo::{
    amount_to_db, parse_amount, parse_optional_uuid, parse_uuid, RepoError, RepoResult,
    SqliteLedgerStore,
};
use rusqlite::{params, Row};

const TEAM_COST_SELECT_SQL: &str = "SELECT
    uuid,
    project_uuid,
    person_uuid,
    cost_type,
    fixed_amount
FROM team_costs";

/// Repository interface for standing project cost records.
pub trait TeamCostRepository {
    fn create_team_cost(&self, workspace: WorkspaceId, cost: &TeamCost) -> RepoResult<TeamCostId>;
    fn update_team_cost(&self, workspace: WorkspaceId, cost: &TeamCost) -> RepoResult<()>;
    fn list_team_costs(&self, workspace: WorkspaceId) -> RepoResult<Vec<TeamCost>>;
    fn delete_team_cost(&self, workspace: WorkspaceId, id: TeamCostId) -> RepoResult<()>;
}

impl TeamCostRepository for SqliteLedgerStore<'_> {
    fn create_team_cost(&self, workspace: WorkspaceId, cost: &TeamCost) -> RepoResult<TeamCostId> {
        cost.validate()?;

        self.conn().execute(
            "INSERT INTO team_costs (
                uuid,
                workspace_uuid,
                project_uuid,
                person_uuid,
                cost_type,
                fixed_amount
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                cost.id.to_string(),
                workspace.to_string(),
                cost.project_id.to_string(),
                cost.person_id.map(|id| id.to_string()),
                cost.cost_type.as_str(),
                amount_to_db(cost.fixed_amount),
            ],
        )?;

        Ok(cost.id)
    }

    fn update_team_cost(&self, workspace: WorkspaceId, cost: &TeamCost) -> RepoResult<()> {
        cost.validate()?;

        let changed = self.conn().execute(
            "UPDATE team_costs
             SET
                project_uuid = ?1,
                person_uuid = ?2,
                cost_type = ?3,
                fixed_amount = ?4,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE workspace_uuid = ?5
               AND uuid = ?6;",
            params![
                cost.project_id.to_string(),
                cost.person_id.map(|id| id.to_string()),
                cost.cost_type.as_str(),
                amount_to_db(cost.fixed_amount),
                workspace.to_string(),
                cost.id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "team cost",
                id: cost.id,
            });
        }

        Ok(())
    }

    fn list_team_costs(&self, workspace: WorkspaceId) -> RepoResult<Vec<TeamCost>> {
        let mut stmt = self.conn().prepare(&format!(
            "{TEAM_COST_SELECT_SQL}
             WHERE workspace_uuid = ?1
             ORDER BY created_at DESC, uuid ASC;"
        ))?;

        let mut rows = stmt.query([workspace.to_string()])?;
        let mut costs = Vec::new();
        while let Some(row) = rows.next()? {
            costs.push(parse_team_cost_row(row)?);
        }

        Ok(costs)
    }

    fn delete_team_cost(&self, workspace: WorkspaceId, id: TeamCostId) -> RepoResult<()> {
        let changed = self.conn().execute(
            "DELETE FROM team_costs
             WHERE workspace_uuid = ?1
               AND uuid = ?2;",
            params![workspace.to_string(), id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "team cost",
                id,
            });
        }

        Ok(())
    }
}

fn parse_team_cost_row(row: &Row<'_>) -> RepoResult<TeamCost> {
    let uuid_text: String = row.get("uuid")?;
    let project_text: String = row.get("project_uuid")?;
    Ok(TeamCost {
        id: parse_uuid(&uuid_text, "team_costs.uuid")?,
        project_id: parse_uuid(&project_text, "team_costs.project_uuid")?,
        person_id: parse_optional_uuid(row.get("person_uuid")?, "team_costs.person_uuid")?,
        cost_type: row.get("cost_type")?,
        fixed_amount: parse_amount(row.get("fixed_amount")?),
    })
}
