//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `opsledger_core` wiring end to
//!   end: open storage, bootstrap a workspace, run one metrics pass.

use opsledger_core::{SqliteLedgerStore, WorkspaceService};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("opsledger_core ping={}", opsledger_core::ping());
    println!("opsledger_core version={}", opsledger_core::core_version());

    let conn = opsledger_core::db::open_db_in_memory()?;
    let service = WorkspaceService::new(SqliteLedgerStore::try_new(&conn)?);
    let workspace = service.bootstrap_workspace("Default Workspace")?;
    let metrics = service.metrics(workspace)?;

    println!(
        "workspace={workspace} departments={} net={}",
        metrics.dept_sales.len(),
        metrics.net
    );
    Ok(())
}
