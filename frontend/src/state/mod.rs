pub mod aggregates;
mod budget;

pub use budget::{parse_amount_input, BudgetAction, BudgetState, ExpenseDraft, Status};
