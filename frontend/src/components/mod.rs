pub mod budget_summary;
pub mod category_breakdown;
pub mod category_pie_chart;
pub mod expense_form;
pub mod expense_table;
pub mod salary_bar_chart;
