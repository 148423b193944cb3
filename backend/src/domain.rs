use chrono::{SubsecRound, Utc};
use serde_json::Value;
use shared::Expense;
use tracing::info;
use uuid::Uuid;

use crate::db::DbConnection;
use crate::error::Result;
use crate::validation::{parse_new_expense, NewExpense};

/// Create and query operations over the expense store
#[derive(Clone)]
pub struct ExpenseService {
    db: DbConnection,
}

impl ExpenseService {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Coerce a raw create payload, assign an id and default date, and persist it.
    /// Returns the record exactly as stored.
    pub async fn create_expense(&self, payload: &Value) -> Result<Expense> {
        let new_expense = parse_new_expense(payload)?;
        let expense = self.build_expense(new_expense);

        self.db.insert_expense(&expense).await?;

        info!(
            "Stored expense {} for user {} in {}: {} {}",
            expense.id, expense.user_id, expense.month, expense.category, expense.amount
        );
        Ok(expense)
    }

    /// Every expense with exactly this user id and month, in storage order
    pub async fn list_expenses(&self, user_id: &str, month: &str) -> Result<Vec<Expense>> {
        let expenses = self.db.find_expenses(user_id, month).await?;
        info!("Found {} expenses for user {} in {}", expenses.len(), user_id, month);
        Ok(expenses)
    }

    fn build_expense(&self, new_expense: NewExpense) -> Expense {
        // millisecond precision, matching what callers get back from a query
        let date = new_expense.date.unwrap_or_else(Utc::now).trunc_subsecs(3);

        Expense {
            id: Uuid::new_v4().to_string(),
            user_id: new_expense.user_id,
            month: new_expense.month,
            category: new_expense.category,
            amount: new_expense.amount,
            date,
            description: new_expense.description,
        }
    }
}
