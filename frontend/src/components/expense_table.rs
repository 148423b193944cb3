use shared::Expense;
use yew::prelude::*;

use crate::services::date_utils::{format_amount, format_expense_date};

#[derive(Properties, PartialEq)]
pub struct ExpenseTableProps {
    pub expenses: Vec<Expense>,
    pub loading: bool,
}

#[function_component(ExpenseTable)]
pub fn expense_table(props: &ExpenseTableProps) -> Html {
    html! {
        <section class="card expense-history">
            <h3>{"Expense History"}</h3>

            {if props.loading {
                html! { <div class="loading">{"Loading expenses..."}</div> }
            } else if props.expenses.is_empty() {
                html! { <p>{"No expenses recorded yet."}</p> }
            } else {
                html! {
                    <div class="table-container">
                        <table class="expenses-table">
                            <thead>
                                <tr>
                                    <th>{"Date"}</th>
                                    <th>{"Category"}</th>
                                    <th>{"Amount"}</th>
                                    <th>{"Description"}</th>
                                </tr>
                            </thead>
                            <tbody>
                                {for props.expenses.iter().map(|expense| {
                                    html! {
                                        <tr key={expense.id.clone()}>
                                            <td class="date">{format_expense_date(&expense.date)}</td>
                                            <td class="category">{&expense.category}</td>
                                            <td class="amount">{format_amount(expense.amount)}</td>
                                            <td class="description">
                                                {expense.description.clone().unwrap_or_default()}
                                            </td>
                                        </tr>
                                    }
                                })}
                            </tbody>
                        </table>
                    </div>
                }
            }}
        </section>
    }
}
