//! Transaction repository contract and SQLite implementation.
//!
//! # Invariants
//! - Write paths call `Transaction::validate()` before SQL mutations.
//! - Stored amounts that fail to parse load as zero (the ledger-wide
//!   garbage-in, zero-out policy).
//! - Project/person references are stored verbatim even when dangling;
//!   resolution is the reader's concern.

use crate::model::transaction::{Transaction, TransactionId, TxnKind, TxnStatus};
use crate::model::WorkspaceId;
use crate::repo::{
    amount_to_db, parse_amount, parse_optional_uuid, parse_uuid, RepoError, RepoResult,
    SqliteLedgerStore,
};
use rusqlite::{params, Row};

const TXN_SELECT_SQL: &str = "SELECT
    uuid,
    txn_date,
    type,
    project_uuid,
    person_uuid,
    category,
    amount,
    status,
    note
FROM transactions";

/// Repository interface for ledger transactions.
pub trait TransactionRepository {
    fn create_transaction(
        &self,
        workspace: WorkspaceId,
        txn: &Transaction,
    ) -> RepoResult<TransactionId>;
    fn update_transaction(&self, workspace: WorkspaceId, txn: &Transaction) -> RepoResult<()>;
    fn get_transaction(
        &self,
        workspace: WorkspaceId,
        id: TransactionId,
    ) -> RepoResult<Option<Transaction>>;
    fn list_transactions(&self, workspace: WorkspaceId) -> RepoResult<Vec<Transaction>>;
    fn delete_transaction(&self, workspace: WorkspaceId, id: TransactionId) -> RepoResult<()>;
}

impl TransactionRepository for SqliteLedgerStore<'_> {
    fn create_transaction(
        &self,
        workspace: WorkspaceId,
        txn: &Transaction,
    ) -> RepoResult<TransactionId> {
        txn.validate()?;

        self.conn().execute(
            "INSERT INTO transactions (
                uuid,
                workspace_uuid,
                txn_date,
                type,
                project_uuid,
                person_uuid,
                category,
                amount,
                status,
                note
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10);",
            params![
                txn.id.to_string(),
                workspace.to_string(),
                txn.date.as_str(),
                txn.kind.as_str(),
                txn.project_id.map(|id| id.to_string()),
                txn.person_id.map(|id| id.to_string()),
                txn.category.as_deref(),
                amount_to_db(txn.amount),
                txn.status.as_str(),
                txn.note.as_deref(),
            ],
        )?;

        Ok(txn.id)
    }

    fn update_transaction(&self, workspace: WorkspaceId, txn: &Transaction) -> RepoResult<()> {
        txn.validate()?;

        let changed = self.conn().execute(
            "UPDATE transactions
             SET
                txn_date = ?1,
                type = ?2,
                project_uuid = ?3,
                person_uuid = ?4,
                category = ?5,
                amount = ?6,
                status = ?7,
                note = ?8,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE workspace_uuid = ?9
               AND uuid = ?10;",
            params![
                txn.date.as_str(),
                txn.kind.as_str(),
                txn.project_id.map(|id| id.to_string()),
                txn.person_id.map(|id| id.to_string()),
                txn.category.as_deref(),
                amount_to_db(txn.amount),
                txn.status.as_str(),
                txn.note.as_deref(),
                workspace.to_string(),
                txn.id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "transaction",
                id: txn.id,
            });
        }

        Ok(())
    }

    fn get_transaction(
        &self,
        workspace: WorkspaceId,
        id: TransactionId,
    ) -> RepoResult<Option<Transaction>> {
        let mut stmt = self.conn().prepare(&format!(
            "{TXN_SELECT_SQL}
             WHERE workspace_uuid = ?1
               AND uuid = ?2;"
        ))?;

        let mut rows = stmt.query(params![workspace.to_string(), id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_transaction_row(row)?));
        }

        Ok(None)
    }

    fn list_transactions(&self, workspace: WorkspaceId) -> RepoResult<Vec<Transaction>> {
        let mut stmt = self.conn().prepare(&format!(
            "{TXN_SELECT_SQL}
             WHERE workspace_uuid = ?1
             ORDER BY txn_date DESC, uuid ASC;"
        ))?;

        let mut rows = stmt.query([workspace.to_string()])?;
        let mut transactions = Vec::new();
        while let Some(row) = rows.next()? {
            transactions.push(parse_transaction_row(row)?);
        }

        Ok(transactions)
    }

    fn delete_transaction(&self, workspace: WorkspaceId, id: TransactionId) -> RepoResult<()> {
        let changed = self.conn().execute(
            "DELETE FROM transactions
             WHERE workspace_uuid = ?1
               AND uuid = ?2;",
            params![workspace.to_string(), id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "transaction",
                id,
            });
        }

        Ok(())
    }
}

fn parse_transaction_row(row: &Row<'_>) -> RepoResult<Transaction> {
    let uuid_text: String = row.get("uuid")?;
    Ok(Transaction {
        id: parse_uuid(&uuid_text, "transactions.uuid")?,
        date: row.get("txn_date")?,
        kind: TxnKind::new(row.get::<_, String>("type")?),
        project_id: parse_optional_uuid(row.get("project_uuid")?, "transactions.project_uuid")?,
        person_id: parse_optional_uuid(row.get("person_uuid")?, "transactions.person_uuid")?,
        category: row.get("category")?,
        amount: parse_amount(row.get("amount")?),
        status: TxnStatus::new(row.get::<_, String>("status")?),
        note: row.get("note")?,
    })
}
