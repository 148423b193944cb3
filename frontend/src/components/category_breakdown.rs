use yew::prelude::*;

use super::category_pie_chart::CategoryPieChart;
use crate::services::date_utils::format_amount;

#[derive(Properties, PartialEq)]
pub struct CategoryBreakdownProps {
    /// (category, total) in first-seen order
    pub totals: Vec<(String, f64)>,
    pub total_expenses: f64,
}

#[function_component(CategoryBreakdown)]
pub fn category_breakdown(props: &CategoryBreakdownProps) -> Html {
    html! {
        <section class="card category-breakdown">
            <h3>{"Expense Breakdown"}</h3>
            {if props.totals.is_empty() {
                html! { <p>{"No expenses to break down yet."}</p> }
            } else {
                html! {
                    <>
                    <CategoryPieChart totals={props.totals.clone()} />
                    <table class="breakdown-table">
                        <thead>
                            <tr>
                                <th>{"Category"}</th>
                                <th>{"Amount"}</th>
                                <th>{"Share"}</th>
                            </tr>
                        </thead>
                        <tbody>
                            {for props.totals.iter().map(|(category, total)| {
                                let share = if props.total_expenses != 0.0 {
                                    format!("{:.1}%", total / props.total_expenses * 100.0)
                                } else {
                                    "-".to_string()
                                };
                                html! {
                                    <tr key={category.clone()}>
                                        <td>{category}</td>
                                        <td>{format_amount(*total)}</td>
                                        <td>{share}</td>
                                    </tr>
                                }
                            })}
                        </tbody>
                    </table>
                    </>
                }
            }}
        </section>
    }
}
