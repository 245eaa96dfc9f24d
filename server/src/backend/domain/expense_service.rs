//! Operating expense tracking.

use log::{debug, info};

use crate::backend::domain::commands::expenses::CreateExpenseCommand;
use crate::backend::domain::error::{DomainError, DomainResult};
use crate::backend::domain::ledger::round_money;
use crate::backend::domain::models::Expense;
use crate::backend::storage::Store;

#[derive(Clone)]
pub struct ExpenseService {
    store: Store,
}

impl ExpenseService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Vec<Expense> {
        self.store.read(|document| document.expenses.clone())
    }

    pub fn add(&self, command: CreateExpenseCommand) -> DomainResult<Expense> {
        let title = command.title.trim().to_string();
        if title.is_empty() {
            return Err(DomainError::Validation(
                "expense title must not be empty".to_string(),
            ));
        }
        if command.amount <= 0.0 {
            return Err(DomainError::Validation(
                "expense amount must be positive".to_string(),
            ));
        }
        let expense = Expense {
            id: Store::next_id(),
            title,
            amount: round_money(command.amount),
            category: command.category,
            date: command.date.unwrap_or_else(|| Store::now().date_naive()),
            created_at: Store::now(),
        };
        self.store
            .mutate(|document| document.expenses.push(expense.clone()))?;
        info!(
            "added {} expense {} ({})",
            expense.category, expense.title, expense.id
        );
        Ok(expense)
    }

    /// Remove an expense. Unknown ids are a silent no-op.
    pub fn delete(&self, id: &str) -> DomainResult<()> {
        self.store.mutate(|document| {
            let before = document.expenses.len();
            document.expenses.retain(|e| e.id != id);
            if document.expenses.len() == before {
                debug!("delete for unknown expense {} ignored", id);
            }
        })?;
        Ok(())
    }
}
