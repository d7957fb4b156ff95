//! Tabular listings of stored records

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::report::{format_percentage, money, truncate};
use crate::models::{Budget, CategoryLimit, FinancialGoal, RecurringExpense, Transaction};

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

#[derive(Tabled)]
struct CeilingRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Limit")]
    limit: String,
}

#[derive(Tabled)]
struct RecurringRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Frequency")]
    frequency: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Monthly")]
    monthly: String,
    #[tabled(rename = "Next")]
    next: String,
    #[tabled(rename = "Active")]
    active: String,
}

#[derive(Tabled)]
struct GoalRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    goal_type: String,
    #[tabled(rename = "Saved")]
    saved: String,
    #[tabled(rename = "Target")]
    target: String,
    #[tabled(rename = "Progress")]
    progress: String,
    #[tabled(rename = "Due")]
    due: String,
}

fn render<T: Tabled>(rows: Vec<T>) -> String {
    let mut table = Table::new(rows);
    table.with(Style::modern());
    format!("{}\n", table)
}

fn yes_no(flag: bool) -> String {
    if flag { "yes" } else { "no" }.to_string()
}

pub fn format_transaction_table(transactions: &[Transaction], symbol: &str) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let rows = transactions
        .iter()
        .map(|txn| TransactionRow {
            id: txn.id.to_string(),
            date: txn.date.to_string(),
            kind: txn.kind.to_string(),
            category: truncate(&txn.category, 20),
            description: truncate(&txn.description, 30),
            amount: money(txn.amount, symbol),
        })
        .collect();
    render(rows)
}

/// Monthly budgets followed by standing limits; limits show "every" as month
pub fn format_ceiling_table(budgets: &[Budget], limits: &[CategoryLimit], symbol: &str) -> String {
    if budgets.is_empty() && limits.is_empty() {
        return "No budgets or category limits set.\n".to_string();
    }

    let budget_rows = budgets.iter().map(|b| CeilingRow {
        id: b.id.to_string(),
        category: b.category.clone(),
        month: b.month.to_string(),
        limit: money(b.limit, symbol),
    });
    let limit_rows = limits.iter().map(|l| CeilingRow {
        id: l.id.to_string(),
        category: l.category.clone(),
        month: "every".to_string(),
        limit: money(l.limit, symbol),
    });
    render(budget_rows.chain(limit_rows).collect())
}

pub fn format_recurring_table(expenses: &[RecurringExpense], symbol: &str) -> String {
    if expenses.is_empty() {
        return "No recurring expenses.\n".to_string();
    }

    let rows = expenses
        .iter()
        .map(|exp| RecurringRow {
            id: exp.id.to_string(),
            description: truncate(&exp.description, 24),
            category: exp.category.clone(),
            frequency: exp.frequency.to_string(),
            amount: money(exp.amount, symbol),
            monthly: money(exp.monthly_equivalent(), symbol),
            next: exp.next_charge_date.to_string(),
            active: yes_no(exp.is_active),
        })
        .collect();
    render(rows)
}

pub fn format_goal_table(goals: &[FinancialGoal], symbol: &str) -> String {
    if goals.is_empty() {
        return "No financial goals.\n".to_string();
    }

    let rows = goals
        .iter()
        .map(|goal| GoalRow {
            id: goal.id.to_string(),
            name: truncate(&goal.name, 24),
            goal_type: goal.goal_type.to_string(),
            saved: money(goal.current_amount, symbol),
            target: money(goal.target_amount, symbol),
            progress: format_percentage(goal.progress_percent()),
            due: goal.target_date.to_string(),
        })
        .collect();
    render(rows)
}
