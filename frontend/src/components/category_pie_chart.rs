use std::f64::consts::{FRAC_PI_2, TAU};

use plotters::prelude::*;
use plotters_canvas::CanvasBackend;
use web_sys::HtmlCanvasElement;
use yew::prelude::*;

const CANVAS_WIDTH: u32 = 480;
const CANVAS_HEIGHT: u32 = 260;

const PALETTE: [RGBColor; 7] = [
    RGBColor(0, 136, 254),
    RGBColor(0, 196, 159),
    RGBColor(255, 187, 40),
    RGBColor(255, 128, 66),
    RGBColor(136, 132, 216),
    RGBColor(255, 99, 132),
    RGBColor(130, 202, 157),
];

/// One wedge of the category pie, angles in radians clockwise from 12 o'clock
#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub category: String,
    pub total: f64,
    pub share: f64,
    pub start: f64,
    pub end: f64,
}

/// Wedges for every category with a positive total, in the order given.
/// Zero and negative totals have no area and are left out.
pub fn pie_slices(totals: &[(String, f64)]) -> Vec<PieSlice> {
    let positive: f64 = totals
        .iter()
        .map(|(_, total)| *total)
        .filter(|total| *total > 0.0)
        .sum();
    if positive <= 0.0 {
        return Vec::new();
    }

    let mut start = -FRAC_PI_2;
    totals
        .iter()
        .filter(|(_, total)| *total > 0.0)
        .map(|(category, total)| {
            let share = total / positive;
            let end = start + share * TAU;
            let slice = PieSlice {
                category: category.clone(),
                total: *total,
                share,
                start,
                end,
            };
            start = end;
            slice
        })
        .collect()
}

/// Polygon outline of a wedge: the centre followed by points along the arc
fn wedge_points(center: (i32, i32), radius: f64, start: f64, end: f64) -> Vec<(i32, i32)> {
    let steps = (((end - start) / TAU) * 120.0).ceil().max(2.0) as usize;
    let mut points = Vec::with_capacity(steps + 2);
    points.push(center);
    for step in 0..=steps {
        let angle = start + (end - start) * step as f64 / steps as f64;
        points.push((
            center.0 + (radius * angle.cos()).round() as i32,
            center.1 + (radius * angle.sin()).round() as i32,
        ));
    }
    points
}

#[derive(Properties, PartialEq)]
pub struct CategoryPieChartProps {
    /// (category, total) in first-seen order
    pub totals: Vec<(String, f64)>,
}

pub struct CategoryPieChart {
    canvas_ref: NodeRef,
}

impl Component for CategoryPieChart {
    type Message = ();
    type Properties = CategoryPieChartProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            canvas_ref: NodeRef::default(),
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, _first_render: bool) {
        self.draw_chart(&pie_slices(&ctx.props().totals));
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        if pie_slices(&ctx.props().totals).is_empty() {
            return html! {};
        }

        html! {
            <div class="chart-content">
                <canvas
                    ref={self.canvas_ref.clone()}
                    class="category-pie-canvas"
                    width={CANVAS_WIDTH.to_string()}
                    height={CANVAS_HEIGHT.to_string()}
                ></canvas>
            </div>
        }
    }
}

impl CategoryPieChart {
    fn draw_chart(&self, slices: &[PieSlice]) {
        if slices.is_empty() {
            return;
        }

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

        let diameter = CANVAS_HEIGHT as i32;
        let center = (diameter / 2, diameter / 2);
        let radius = f64::from(CANVAS_HEIGHT) / 2.0 - 20.0;
        let legend_x = diameter + 10;

        for (index, slice) in slices.iter().enumerate() {
            let color = PALETTE[index % PALETTE.len()];

            let wedge = Polygon::new(
                wedge_points(center, radius, slice.start, slice.end),
                color.filled(),
            );
            if root.draw(&wedge).is_err() {
                return;
            }

            let legend_y = 20 + index as i32 * 24;
            let swatch = Rectangle::new(
                [(legend_x, legend_y), (legend_x + 14, legend_y + 14)],
                color.filled(),
            );
            let label = Text::new(
                format!("{} {:.1}%", slice.category, slice.share * 100.0),
                (legend_x + 22, legend_y),
                ("sans-serif", 14).into_font(),
            );
            if root.draw(&swatch).is_err() || root.draw(&label).is_err() {
                return;
            }
        }

        let _ = root.present();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn totals(entries: &[(&str, f64)]) -> Vec<(String, f64)> {
        entries
            .iter()
            .map(|(category, total)| (category.to_string(), *total))
            .collect()
    }

    #[test]
    fn test_slices_cover_the_circle_in_order() {
        let slices = pie_slices(&totals(&[("Food", 50.0), ("Housing", 150.0)]));

        assert_eq!(slices.len(), 2);
        assert_eq!(slices[0].category, "Food");
        assert_eq!(slices[0].share, 0.25);
        assert_eq!(slices[0].start, -FRAC_PI_2);
        assert_eq!(slices[0].end, slices[1].start);
        assert!((slices[1].end - (TAU - FRAC_PI_2)).abs() < 1e-9);
    }

    #[test]
    fn test_non_positive_totals_have_no_wedge() {
        let slices = pie_slices(&totals(&[("Food", 40.0), ("Refund", -10.0), ("Other", 0.0)]));

        assert_eq!(slices.len(), 1);
        assert_eq!(slices[0].share, 1.0);
    }

    #[test]
    fn test_empty_or_negative_list_has_no_slices() {
        assert!(pie_slices(&[]).is_empty());
        assert!(pie_slices(&totals(&[("Refund", -5.0)])).is_empty());
    }

    #[test]
    fn test_wedge_starts_at_center_and_reaches_radius() {
        let points = wedge_points((100, 100), 50.0, -FRAC_PI_2, 0.0);

        assert_eq!(points[0], (100, 100));
        assert_eq!(points[1], (100, 50));
        assert_eq!(points.last(), Some(&(150, 100)));
    }
}
