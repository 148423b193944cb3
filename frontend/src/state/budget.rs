use std::rc::Rc;

use chrono::NaiveDate;
use shared::{Category, CreateExpenseRequest, Expense};
use yew::Reducible;

use super::aggregates;

/// Where the dashboard is in its load/submit lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Initial,
    Loading,
    Loaded,
    Submitting,
    /// The last load or submit failed; input stays enabled
    Errored,
}

/// The not-yet-submitted expense form
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseDraft {
    pub category: Option<Category>,
    pub amount: f64,
    /// YYYY-MM-DD, as produced by a date input
    pub date: String,
    pub description: String,
}

impl ExpenseDraft {
    pub fn empty(today: NaiveDate) -> Self {
        Self {
            category: None,
            amount: 0.0,
            date: today.format("%Y-%m-%d").to_string(),
            description: String::new(),
        }
    }

    /// Build the create request for this draft. Returns `None` while no
    /// category has been chosen.
    pub fn to_request(&self, user_id: &str, month: &str) -> Option<CreateExpenseRequest> {
        let category = self.category?;
        let description = self.description.trim();
        let date = self.date.trim();

        Some(CreateExpenseRequest {
            user_id: user_id.to_string(),
            month: month.to_string(),
            category: category.as_str().to_string(),
            amount: self.amount,
            description: (!description.is_empty()).then(|| description.to_string()),
            date: (!date.is_empty()).then(|| date.to_string()),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BudgetAction {
    LoadStarted,
    LoadSucceeded(Vec<Expense>),
    LoadFailed(String),
    SalaryChanged(f64),
    DraftCategoryChanged(Option<Category>),
    DraftAmountChanged(f64),
    DraftDateChanged(String),
    DraftDescriptionChanged(String),
    SubmitStarted,
    SubmitSucceeded { expense: Expense, today: NaiveDate },
    SubmitFailed(String),
}

/// Complete client state. Only [`BudgetState::apply`] produces new states.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetState {
    pub user_id: String,
    /// Month the dashboard is showing and new expenses are filed under
    pub month: String,
    pub salary: f64,
    pub expenses: Vec<Expense>,
    pub draft: ExpenseDraft,
    pub status: Status,
    /// Set by a failed load, cleared only by a successful one
    pub load_error: Option<String>,
    /// Set by a failed submit, cleared only by a successful one
    pub submit_error: Option<String>,
}

impl BudgetState {
    pub fn new(user_id: impl Into<String>, month: impl Into<String>, today: NaiveDate) -> Self {
        Self {
            user_id: user_id.into(),
            month: month.into(),
            salary: 0.0,
            expenses: Vec::new(),
            draft: ExpenseDraft::empty(today),
            status: Status::Initial,
            load_error: None,
            submit_error: None,
        }
    }

    pub fn apply(mut self, action: BudgetAction) -> Self {
        match action {
            BudgetAction::LoadStarted => {
                self.status = Status::Loading;
            }
            BudgetAction::LoadSucceeded(expenses) => {
                self.expenses = expenses;
                self.load_error = None;
                // a submit that raced the initial load keeps its status
                if self.status != Status::Submitting {
                    self.status = Status::Loaded;
                }
            }
            BudgetAction::LoadFailed(message) => {
                self.load_error = Some(message);
                if self.status != Status::Submitting {
                    self.status = Status::Errored;
                }
            }
            BudgetAction::SalaryChanged(salary) => {
                self.salary = salary;
            }
            BudgetAction::DraftCategoryChanged(category) => {
                self.draft.category = category;
            }
            BudgetAction::DraftAmountChanged(amount) => {
                self.draft.amount = amount;
            }
            BudgetAction::DraftDateChanged(date) => {
                self.draft.date = date;
            }
            BudgetAction::DraftDescriptionChanged(description) => {
                self.draft.description = description;
            }
            BudgetAction::SubmitStarted => {
                self.status = Status::Submitting;
            }
            BudgetAction::SubmitSucceeded { expense, today } => {
                self.expenses.push(expense);
                self.draft = ExpenseDraft::empty(today);
                self.submit_error = None;
                self.status = if self.load_error.is_some() {
                    Status::Errored
                } else {
                    Status::Loaded
                };
            }
            BudgetAction::SubmitFailed(message) => {
                self.submit_error = Some(message);
                self.status = Status::Errored;
            }
        }
        self
    }

    /// Message for the error banner; the most recent submit failure wins
    pub fn error(&self) -> Option<&str> {
        self.submit_error.as_deref().or(self.load_error.as_deref())
    }

    pub fn total_expenses(&self) -> f64 {
        aggregates::total_expenses(&self.expenses)
    }

    pub fn remaining_budget(&self) -> f64 {
        aggregates::remaining_budget(self.salary, &self.expenses)
    }

    pub fn category_totals(&self) -> Vec<(String, f64)> {
        aggregates::category_totals(&self.expenses)
    }

    pub fn is_loading(&self) -> bool {
        self.status == Status::Loading
    }

    pub fn is_submitting(&self) -> bool {
        self.status == Status::Submitting
    }
}

impl Reducible for BudgetState {
    type Action = BudgetAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        Rc::new((*self).clone().apply(action))
    }
}

/// Number inputs report free text; anything that is not a finite number counts as zero
pub fn parse_amount_input(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}
