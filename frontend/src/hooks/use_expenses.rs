use std::cell::RefCell;
use std::rc::Rc;

use shared::Category;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::config::ClientConfig;
use crate::services::date_utils;
use crate::state::{parse_amount_input, BudgetAction, BudgetState};

pub struct UseExpensesResult {
    pub state: UseReducerHandle<BudgetState>,
    pub actions: UseExpensesActions,
}

#[derive(Clone)]
pub struct UseExpensesActions {
    pub submit: Callback<()>,
    pub on_salary_change: Callback<Event>,
    pub on_category_change: Callback<Event>,
    pub on_amount_change: Callback<Event>,
    pub on_date_change: Callback<Event>,
    pub on_description_change: Callback<Event>,
}

/// Dispatch only while the owning component is still mounted
fn dispatch_if_mounted(
    mounted: &Rc<RefCell<bool>>,
    state: &UseReducerHandle<BudgetState>,
    action: BudgetAction,
) {
    if *mounted.borrow() {
        state.dispatch(action);
    }
}

#[hook]
pub fn use_expenses(config: &ClientConfig) -> UseExpensesResult {
    let state = {
        let user_id = config.user_id.clone();
        use_reducer(move || {
            BudgetState::new(user_id, date_utils::current_month(), date_utils::today())
        })
    };
    let api_client = use_memo(config.api_base_url.clone(), |base_url| {
        ApiClient::with_base_url(base_url.clone())
    });
    let mounted = use_mut_ref(|| false);

    // Load once on mount
    {
        let state = state.clone();
        let api_client = api_client.clone();
        let mounted = mounted.clone();

        use_effect_with((), move |_| {
            *mounted.borrow_mut() = true;
            state.dispatch(BudgetAction::LoadStarted);

            let user_id = state.user_id.clone();
            let month = state.month.clone();
            let load_mounted = mounted.clone();
            spawn_local(async move {
                match api_client.list_expenses(&user_id, &month).await {
                    Ok(expenses) => {
                        gloo::console::log!(format!("Loaded {} expenses for {}", expenses.len(), month));
                        dispatch_if_mounted(&load_mounted, &state, BudgetAction::LoadSucceeded(expenses));
                    }
                    Err(e) => {
                        gloo::console::error!("Failed to fetch expenses:", e.to_string());
                        dispatch_if_mounted(&load_mounted, &state, BudgetAction::LoadFailed(e.to_string()));
                    }
                }
            });

            move || {
                *mounted.borrow_mut() = false;
            }
        });
    }

    // Submit the current draft exactly once; no retry
    let submit = {
        let state = state.clone();
        let api_client = api_client.clone();
        let mounted = mounted.clone();

        Callback::from(move |_: ()| {
            let Some(request) = state.draft.to_request(&state.user_id, &state.month) else {
                state.dispatch(BudgetAction::SubmitFailed(
                    "Select a category before adding an expense".to_string(),
                ));
                return;
            };

            state.dispatch(BudgetAction::SubmitStarted);

            let state = state.clone();
            let api_client = api_client.clone();
            let mounted = mounted.clone();
            spawn_local(async move {
                match api_client.create_expense(&request).await {
                    Ok(expense) => {
                        gloo::console::log!(format!("Stored expense {}", expense.id));
                        dispatch_if_mounted(
                            &mounted,
                            &state,
                            BudgetAction::SubmitSucceeded {
                                expense,
                                today: date_utils::today(),
                            },
                        );
                    }
                    Err(e) => {
                        gloo::console::error!("Failed to add expense:", e.to_string());
                        dispatch_if_mounted(&mounted, &state, BudgetAction::SubmitFailed(e.to_string()));
                    }
                }
            });
        })
    };

    // Form input handlers
    let on_salary_change = {
        let state = state.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            state.dispatch(BudgetAction::SalaryChanged(parse_amount_input(&input.value())));
        })
    };

    let on_category_change = {
        let state = state.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let category = select.value().parse::<Category>().ok();
            state.dispatch(BudgetAction::DraftCategoryChanged(category));
        })
    };

    let on_amount_change = {
        let state = state.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            state.dispatch(BudgetAction::DraftAmountChanged(parse_amount_input(&input.value())));
        })
    };

    let on_date_change = {
        let state = state.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            state.dispatch(BudgetAction::DraftDateChanged(input.value()));
        })
    };

    let on_description_change = {
        let state = state.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            state.dispatch(BudgetAction::DraftDescriptionChanged(input.value()));
        })
    };

    let actions = UseExpensesActions {
        submit,
        on_salary_change,
        on_category_change,
        on_amount_change,
        on_date_change,
        on_description_change,
    };

    UseExpensesResult { state, actions }
}
