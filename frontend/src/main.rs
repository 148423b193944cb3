use yew::prelude::*;

mod components;
mod hooks;
mod services;
mod state;

use components::budget_summary::BudgetSummary;
use components::category_breakdown::CategoryBreakdown;
use components::expense_form::ExpenseForm;
use components::expense_table::ExpenseTable;
use hooks::use_expenses::use_expenses;
use services::config::ClientConfig;

#[derive(Properties, PartialEq)]
pub struct AppProps {
    pub config: ClientConfig,
}

#[function_component(App)]
fn app(props: &AppProps) -> Html {
    let expenses = use_expenses(&props.config);
    let state = &*expenses.state;
    let actions = expenses.actions;

    // Derived figures are recomputed on every render
    let total_expenses = state.total_expenses();
    let remaining_budget = state.remaining_budget();
    let category_totals = state.category_totals();

    html! {
        <div class="container">
            <h1 class="title">{"Expense Tracker"}</h1>
            <p class="subtitle">{format!("{} · {}", state.user_id, state.month)}</p>

            {if let Some(error) = state.error() {
                html! { <div class="alert alert-danger">{error.to_string()}</div> }
            } else { html! {} }}

            <div class="row">
                <div class="column">
                    <BudgetSummary
                        salary={state.salary}
                        total_expenses={total_expenses}
                        remaining_budget={remaining_budget}
                        on_salary_change={actions.on_salary_change.clone()}
                    />
                    <ExpenseForm
                        draft={state.draft.clone()}
                        submitting={state.is_submitting()}
                        on_category_change={actions.on_category_change.clone()}
                        on_amount_change={actions.on_amount_change.clone()}
                        on_date_change={actions.on_date_change.clone()}
                        on_description_change={actions.on_description_change.clone()}
                        on_submit={actions.submit.clone()}
                    />
                </div>
                <div class="column">
                    <CategoryBreakdown totals={category_totals} total_expenses={total_expenses} />
                </div>
            </div>

            <ExpenseTable expenses={state.expenses.clone()} loading={state.is_loading()} />
        </div>
    }
}

fn main() {
    let config = ClientConfig::from_env();
    yew::Renderer::<App>::with_props(AppProps { config }).render();
}
