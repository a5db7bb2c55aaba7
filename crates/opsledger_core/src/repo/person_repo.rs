//! Person repository contract and SQLite implementation.
//!
//! # Invariants
//! - Write paths call `Person::validate()` before SQL mutations.
//! - Deleting a person clears (never deletes) referencing transaction and
//!   team-cost rows, inside a single immediate transaction.

use crate::model::person::{Person, PersonId, PersonKind, PersonStatus};
use crate::model::WorkspaceId;
use crate::repo::{amount_to_db, parse_amount, parse_uuid, RepoError, RepoResult, SqliteLedgerStore};
use log::info;
use rusqlite::{params, Row, Transaction as SqlTransaction, TransactionBehavior};

const PERSON_SELECT_SQL: &str = "SELECT
    uuid,
    name,
    role,
    type,
    monthly_salary,
    status
FROM people";

/// Repository interface for person records.
pub trait PersonRepository {
    fn create_person(&self, workspace: WorkspaceId, person: &Person) -> RepoResult<PersonId>;
    fn update_person(&self, workspace: WorkspaceId, person: &Person) -> RepoResult<()>;
    fn get_person(&self, workspace: WorkspaceId, id: PersonId) -> RepoResult<Option<Person>>;
    fn list_people(&self, workspace: WorkspaceId) -> RepoResult<Vec<Person>>;
    /// Deletes one person with referential cleanup: transactions and team
    /// costs keep their rows but lose the person reference.
    fn delete_person(&self, workspace: WorkspaceId, id: PersonId) -> RepoResult<()>;
}

impl PersonRepository for SqliteLedgerStore<'_> {
    fn create_person(&self, workspace: WorkspaceId, person: &Person) -> RepoResult<PersonId> {
        person.validate()?;

        self.conn().execute(
            "INSERT INTO people (
                uuid,
                workspace_uuid,
                name,
                role,
                type,
                monthly_salary,
                status
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                person.id.to_string(),
                workspace.to_string(),
                person.name.as_str(),
                person.role.as_str(),
                person.kind.as_str(),
                amount_to_db(person.monthly_salary),
                person.status.as_str(),
            ],
        )?;

        Ok(person.id)
    }

    fn update_person(&self, workspace: WorkspaceId, person: &Person) -> RepoResult<()> {
        person.validate()?;

        let changed = self.conn().execute(
            "UPDATE people
             SET
                name = ?1,
                role = ?2,
                type = ?3,
                monthly_salary = ?4,
                status = ?5,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE workspace_uuid = ?6
               AND uuid = ?7;",
            params![
                person.name.as_str(),
                person.role.as_str(),
                person.kind.as_str(),
                amount_to_db(person.monthly_salary),
                person.status.as_str(),
                workspace.to_string(),
                person.id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "person",
                id: person.id,
            });
        }

        Ok(())
    }

    fn get_person(&self, workspace: WorkspaceId, id: PersonId) -> RepoResult<Option<Person>> {
        let mut stmt = self.conn().prepare(&format!(
            "{PERSON_SELECT_SQL}
             WHERE workspace_uuid = ?1
               AND uuid = ?2;"
        ))?;

        let mut rows = stmt.query(params![workspace.to_string(), id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_person_row(row)?));
        }

        Ok(None)
    }

    fn list_people(&self, workspace: WorkspaceId) -> RepoResult<Vec<Person>> {
        let mut stmt = self.conn().prepare(&format!(
            "{PERSON_SELECT_SQL}
             WHERE workspace_uuid = ?1
             ORDER BY created_at DESC, uuid ASC;"
        ))?;

        let mut rows = stmt.query([workspace.to_string()])?;
        let mut people = Vec::new();
        while let Some(row) = rows.next()? {
            people.push(parse_person_row(row)?);
        }

        Ok(people)
    }

    fn delete_person(&self, workspace: WorkspaceId, id: PersonId) -> RepoResult<()> {
        let tx = SqlTransaction::new_unchecked(self.conn(), TransactionBehavior::Immediate)?;
        let workspace_key = workspace.to_string();
        let person_key = id.to_string();

        tx.execute(
            "UPDATE transactions
             SET
                person_uuid = NULL,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE workspace_uuid = ?1
               AND person_uuid = ?2;",
            params![workspace_key, person_key],
        )?;
        tx.execute(
            "UPDATE team_costs
             SET
                person_uuid = NULL,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE workspace_uuid = ?1
               AND person_uuid = ?2;",
            params![workspace_key, person_key],
        )?;

        let changed = tx.execute(
            "DELETE FROM people
             WHERE workspace_uuid = ?1
               AND uuid = ?2;",
            params![workspace_key, person_key],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "person",
                id,
            });
        }

        tx.commit()?;
        info!("event=person_delete module=repo status=ok workspace={workspace} person={id}");
        Ok(())
    }
}

fn parse_person_row(row: &Row<'_>) -> RepoResult<Person> {
    let uuid_text: String = row.get("uuid")?;
    Ok(Person {
        id: parse_uuid(&uuid_text, "people.uuid")?,
        name: row.get("name")?,
        role: row.get("role")?,
        kind: PersonKind::new(row.get::<_, String>("type")?),
        monthly_salary: parse_amount(row.get("monthly_salary")?),
        status: PersonStatus::new(row.get::<_, String>("status")?),
    })
}
