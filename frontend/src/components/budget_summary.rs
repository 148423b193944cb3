use yew::prelude::*;

use super::salary_bar_chart::SalaryBarChart;
use crate::services::date_utils::format_amount;

#[derive(Properties, PartialEq)]
pub struct BudgetSummaryProps {
    pub salary: f64,
    pub total_expenses: f64,
    pub remaining_budget: f64,
    pub on_salary_change: Callback<Event>,
}

#[function_component(BudgetSummary)]
pub fn budget_summary(props: &BudgetSummaryProps) -> Html {
    let remaining_class = if props.remaining_budget < 0.0 {
        "remaining negative"
    } else {
        "remaining"
    };

    html! {
        <section class="budget-summary">
            <div class="card salary-card">
                <h3>{"Salary Information"}</h3>
                <label for="salary">{"Monthly Salary (₹)"}</label>
                <input
                    id="salary"
                    type="number"
                    value={props.salary.to_string()}
                    onchange={props.on_salary_change.clone()}
                />
                <h5 class={remaining_class}>
                    {format!("Remaining Budget: {}", format_amount(props.remaining_budget))}
                </h5>
            </div>

            <div class="card salary-vs-expenses">
                <h3>{"Salary vs. Expenses"}</h3>
                <SalaryBarChart salary={props.salary} total_expenses={props.total_expenses} />
            </div>
        </section>
    }
}
