//! Workspace-level configuration: department and expense-category lists.

use crate::model::{require_text, RecordValidationError};
use serde::{Deserialize, Serialize};

/// Ordered selection lists scoped to one workspace.
///
/// Order is significant: department rollups are reported in exactly this
/// order. The lists are never empty in practice; defaults are supplied
/// whenever stored configuration is absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceSettings {
    pub departments: Vec<String>,
    pub expense_categories: Vec<String>,
}

impl WorkspaceSettings {
    /// Checks write-edge invariants before persistence.
    pub fn validate(&self) -> Result<(), RecordValidationError> {
        for department in &self.departments {
            require_text("department", department)?;
        }
        for category in &self.expense_categories {
            require_text("expense_category", category)?;
        }
        Ok(())
    }
}

impl Default for WorkspaceSettings {
    fn default() -> Self {
        Self {
            departments: default_departments(),
            expense_categories: default_expense_categories(),
        }
    }
}

/// Department list seeded into fresh workspaces.
pub fn default_departments() -> Vec<String> {
    ["Web Development", "SEO", "SaaS & CRM", "Mobile Apps", "General"]
        .map(String::from)
        .to_vec()
}

/// Expense-category list seeded into fresh workspaces.
pub fn default_expense_categories() -> Vec<String> {
    ["Office Rent", "Tools & Software", "Hosting & Domains", "Marketing", "Other"]
        .map(String::from)
        .to_vec()
}
