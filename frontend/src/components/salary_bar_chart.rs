use plotters::prelude::*;
use plotters_canvas::CanvasBackend;
use web_sys::HtmlCanvasElement;
use yew::prelude::*;

use crate::services::date_utils::format_amount;

const CANVAS_WIDTH: u32 = 480;
const CANVAS_HEIGHT: u32 = 260;

const SALARY_COLOR: RGBColor = RGBColor(130, 202, 157);
const EXPENSES_COLOR: RGBColor = RGBColor(255, 128, 66);

/// Y axis bounds that always include zero, with headroom above the taller bar
pub fn value_range(salary: f64, total_expenses: f64) -> (f64, f64) {
    let low = 0.0_f64.min(salary).min(total_expenses);
    let high = 0.0_f64.max(salary).max(total_expenses);
    let span = (high - low).max(1.0);
    let padding = span / 10.0;

    let y_min = if low < 0.0 { low - padding } else { 0.0 };
    (y_min, high + padding)
}

fn bar_label(segment: &SegmentValue<u32>) -> &'static str {
    match segment {
        SegmentValue::CenterOf(0) => "Salary",
        SegmentValue::CenterOf(1) => "Expenses",
        _ => "",
    }
}

#[derive(Properties, PartialEq)]
pub struct SalaryBarChartProps {
    pub salary: f64,
    pub total_expenses: f64,
}

pub struct SalaryBarChart {
    canvas_ref: NodeRef,
}

impl Component for SalaryBarChart {
    type Message = ();
    type Properties = SalaryBarChartProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            canvas_ref: NodeRef::default(),
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, _first_render: bool) {
        self.draw_chart(ctx.props().salary, ctx.props().total_expenses);
    }

    fn view(&self, _ctx: &Context<Self>) -> Html {
        html! {
            <div class="chart-content">
                <canvas
                    ref={self.canvas_ref.clone()}
                    class="salary-bar-canvas"
                    width={CANVAS_WIDTH.to_string()}
                    height={CANVAS_HEIGHT.to_string()}
                ></canvas>
            </div>
        }
    }
}

impl SalaryBarChart {
    fn draw_chart(&self, salary: f64, total_expenses: f64) {
        let canvas = match self.canvas_ref.cast::<HtmlCanvasElement>() {
            Some(canvas) => canvas,
            None => return,
        };

        let backend = match CanvasBackend::with_canvas_object(canvas) {
            Some(backend) => backend,
            None => return,
        };

        let root = backend.into_drawing_area();
        if root.fill(&WHITE).is_err() {
            return;
        }

        let (y_min, y_max) = value_range(salary, total_expenses);
        let mut chart = match ChartBuilder::on(&root)
            .margin(15)
            .x_label_area_size(35)
            .y_label_area_size(80)
            .build_cartesian_2d((0u32..2u32).into_segmented(), y_min..y_max)
        {
            Ok(chart) => chart,
            Err(_) => return,
        };

        if chart
            .configure_mesh()
            .disable_x_mesh()
            .y_label_formatter(&|v| format_amount(*v))
            .x_label_formatter(&|segment| bar_label(segment).to_string())
            .label_style(("sans-serif", 12, &RGBColor(80, 80, 80)))
            .axis_style(&RGBColor(230, 230, 230))
            .bold_line_style(&RGBColor(245, 245, 245))
            .y_labels(6)
            .draw()
            .is_err()
        {
            return;
        }

        for (index, value, color) in [(0u32, salary, SALARY_COLOR), (1u32, total_expenses, EXPENSES_COLOR)] {
            if chart
                .draw_series(
                    Histogram::vertical(&chart)
                        .style(color.filled())
                        .margin(30)
                        .data(std::iter::once((index, value))),
                )
                .is_err()
            {
                return;
            }
        }

        let _ = root.present();
    }
}
