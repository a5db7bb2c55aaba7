//! Financial derivation engine.
//!
//! # Responsibility
//! - Derive every financial aggregate (global figures, per-project stats,
//!   department rollups, per-person pay status) from the raw collections.
//!
//! # Invariants
//! - `compute_metrics` is pure: no I/O, no state, identical inputs yield
//!   identical output, inputs are never mutated.
//! - Always a full recompute over the whole collections; there is no
//!   incremental maintenance and no cache to invalidate.
//! - Unrecognized transaction `type`/`status` values fall through every
//!   filter and contribute to no sum. This permissiveness is deliberate.
//! - A dangling `project_id`/`person_id` lands in no per-entity bucket but
//!   still counts toward the global figures.
//! - Division is guarded: a zero contract amount yields zero progress.

use crate::model::person::Person;
use crate::model::project::Project;
use crate::model::transaction::Transaction;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Per-project derived figures. Retains every raw project field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectStats {
    #[serde(flatten)]
    pub project: Project,
    /// Paid client payments booked against this project.
    pub received: Decimal,
    /// Paid remote-dev payouts booked against this project.
    pub paid_to_team: Decimal,
    /// `contract_amount - received`; negative when the client overpaid.
    pub due: Decimal,
    /// `contract_amount - paid_to_team`; a simplified margin that ignores
    /// office, salary and vendor costs attributable to the project.
    pub profit: Decimal,
    /// Percent of contract value collected; zero when the contract is zero.
    pub progress: Decimal,
}

/// Contract and collection totals for one configured department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeptSales {
    pub department: String,
    pub contracts: Decimal,
    pub received: Decimal,
}

/// Per-person payout totals. Retains every raw person field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonStats {
    #[serde(flatten)]
    pub person: Person,
    pub total_paid: Decimal,
    pub total_pending: Decimal,
}

/// Complete derived view over one workspace's ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metrics {
    /// Paid client payments, all projects and unlinked entries included.
    pub income: Decimal,
    /// Every other paid transaction.
    pub expenses: Decimal,
    /// `income - expenses`.
    pub net: Decimal,
    /// Sum of ALL pending transaction amounts. Despite the name this mixes
    /// pending receivables and pending payables; the behavior is kept as-is
    /// for fidelity with historical reports.
    pub pending_payables: Decimal,
    /// Sum of `due` across projects; can go negative in aggregate.
    pub total_client_dues: Decimal,
    pub project_stats: Vec<ProjectStats>,
    pub dept_sales: Vec<DeptSales>,
    pub people_stats: Vec<PersonStats>,
}

/// Derives all financial aggregates from the raw entity collections.
///
/// `departments` is the workspace's configured department list; the rollup
/// output contains exactly one entry per name, in the given order,
/// zero-filled when no project matches.
pub fn compute_metrics(
    projects: &[Project],
    transactions: &[Transaction],
    people: &[Person],
    departments: &[String],
) -> Metrics {
    let income = sum_amounts(
        transactions
            .iter()
            .filter(|txn| txn.kind.is_client_payment() && txn.status.is_paid()),
    );
    let expenses = sum_amounts(
        transactions
            .iter()
            .filter(|txn| !txn.kind.is_client_payment() && txn.status.is_paid()),
    );
    let pending_payables = sum_amounts(transactions.iter().filter(|txn| txn.status.is_pending()));

    let project_stats: Vec<ProjectStats> = projects
        .iter()
        .map(|project| {
            let own: Vec<&Transaction> = transactions
                .iter()
                .filter(|txn| txn.project_id == Some(project.id))
                .collect();
            let received = sum_amounts(
                own.iter()
                    .copied()
                    .filter(|txn| txn.kind.is_client_payment() && txn.status.is_paid()),
            );
            let paid_to_team = sum_amounts(
                own.iter()
                    .copied()
                    .filter(|txn| txn.kind.is_remote_dev_payment() && txn.status.is_paid()),
            );
            let progress = if project.contract_amount > Decimal::ZERO {
                received / project.contract_amount * Decimal::ONE_HUNDRED
            } else {
                Decimal::ZERO
            };

            ProjectStats {
                received,
                paid_to_team,
                due: project.contract_amount - received,
                profit: project.contract_amount - paid_to_team,
                progress,
                project: project.clone(),
            }
        })
        .collect();

    let total_client_dues = project_stats
        .iter()
        .fold(Decimal::ZERO, |sum, stats| sum + stats.due);

    let dept_sales = departments
        .iter()
        .map(|department| {
            let mut contracts = Decimal::ZERO;
            let mut received = Decimal::ZERO;
            for stats in project_stats
                .iter()
                .filter(|stats| stats.project.department == *department)
            {
                contracts += stats.project.contract_amount;
                received += stats.received;
            }
            DeptSales {
                department: department.clone(),
                contracts,
                received,
            }
        })
        .collect();

    let people_stats = people
        .iter()
        .map(|person| {
            let own: Vec<&Transaction> = transactions
                .iter()
                .filter(|txn| txn.person_id == Some(person.id))
                .collect();
            PersonStats {
                total_paid: sum_amounts(own.iter().copied().filter(|txn| txn.status.is_paid())),
                total_pending: sum_amounts(
                    own.iter().copied().filter(|txn| txn.status.is_pending()),
                ),
                person: person.clone(),
            }
        })
        .collect();

    Metrics {
        income,
        expenses,
        net: income - expenses,
        pending_payables,
        total_client_dues,
        project_stats,
        dept_sales,
        people_stats,
    }
}

fn sum_amounts<'txn>(transactions: impl Iterator<Item = &'txn Transaction>) -> Decimal {
    transactions.fold(Decimal::ZERO, |sum, txn| sum + txn.amount)
}
