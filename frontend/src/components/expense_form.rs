use shared::Category;
use yew::prelude::*;

use crate::state::ExpenseDraft;

#[derive(Properties, PartialEq)]
pub struct ExpenseFormProps {
    pub draft: ExpenseDraft,
    pub submitting: bool,

    // Event handlers
    pub on_category_change: Callback<Event>,
    pub on_amount_change: Callback<Event>,
    pub on_date_change: Callback<Event>,
    pub on_description_change: Callback<Event>,
    pub on_submit: Callback<()>,
}

#[function_component(ExpenseForm)]
pub fn expense_form(props: &ExpenseFormProps) -> Html {
    let onsubmit = {
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_submit.emit(());
        })
    };

    let selected = props.draft.category;

    html! {
        <section class="card add-expense">
            <h3>{"Add Expense"}</h3>
            <form class="expense-form" {onsubmit}>
                <div class="form-group">
                    <label for="category">{"Category"}</label>
                    <select
                        id="category"
                        name="category"
                        required={true}
                        onchange={props.on_category_change.clone()}
                    >
                        <option value="" selected={selected.is_none()}>{"Select a category"}</option>
                        {for Category::ALL.iter().map(|category| html! {
                            <option
                                value={category.as_str()}
                                selected={selected == Some(*category)}
                            >
                                {category.as_str()}
                            </option>
                        })}
                    </select>
                </div>

                <div class="form-group">
                    <label for="amount">{"Amount (₹)"}</label>
                    <input
                        id="amount"
                        type="number"
                        name="amount"
                        required={true}
                        min="0"
                        step="0.01"
                        value={props.draft.amount.to_string()}
                        onchange={props.on_amount_change.clone()}
                    />
                </div>

                <div class="form-group">
                    <label for="date">{"Date"}</label>
                    <input
                        id="date"
                        type="date"
                        name="date"
                        required={true}
                        value={props.draft.date.clone()}
                        onchange={props.on_date_change.clone()}
                    />
                </div>

                <div class="form-group">
                    <label for="description">{"Description (Optional)"}</label>
                    <input
                        id="description"
                        type="text"
                        name="description"
                        value={props.draft.description.clone()}
                        onchange={props.on_description_change.clone()}
                    />
                </div>

                <button type="submit" class="btn btn-primary" disabled={props.submitting}>
                    {if props.submitting { "Adding..." } else { "Add Expense" }}
                </button>
            </form>
        </section>
    }
}
