use std::f64::consts::{FRAC_PI_2, TAU};

use eframe::egui::{Color32, ScrollArea, Stroke, Ui};
use egui_plot::{
    Bar, BarChart, BoxElem, BoxPlot, BoxSpread, GridMark, Legend, Line, Plot, PlotPoint,
    PlotPoints, Points, Polygon, Text,
};

use crate::charts::{self, Charts};
use crate::color::ColorMap;
use crate::state::AppState;

const CHART_HEIGHT: f32 = 320.0;

// Histogram bars: semi-transparent blue with a black outline.
const HISTOGRAM_FILL: Color32 = Color32::from_rgba_premultiplied(0, 0, 178, 178);
const HISTOGRAM_OUTLINE: f32 = 1.5;

/// Widest arc drawn as one polygon; egui fills polygons as convex shapes.
const MAX_WEDGE_ARC: f64 = FRAC_PI_2;

// ---------------------------------------------------------------------------
// Dashboard (central panel)
// ---------------------------------------------------------------------------

/// Render the title and all five charts in the central panel.
pub fn dashboard(ui: &mut Ui, state: &AppState) {
    let dash = &state.dashboard;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading(&dash.title);
            if dash.visible_rows == 0 {
                ui.label("No records match the current filters.");
            }
            ui.add_space(8.0);

            ui.heading(charts::TREND_HEADER);
            trend_plot(ui, &dash.charts);

            ui.heading(charts::SCATTER_HEADER);
            scatter_plot(ui, &dash.charts);

            ui.heading(charts::BOX_HEADER);
            box_plot(ui, &dash.charts, &state.product_colors);

            ui.heading(charts::PIE_HEADER);
            pie_chart(ui, &dash.charts, &state.country_colors);

            ui.heading(charts::HISTOGRAM_HEADER);
            histogram(ui, &dash.charts);
        });
}

fn trend_plot(ui: &mut Ui, data: &Charts) {
    let points: Vec<[f64; 2]> = data
        .trend
        .iter()
        .map(|t| [t.month as f64, t.sales])
        .collect();

    Plot::new("trend_plot")
        .height(CHART_HEIGHT)
        .x_axis_label("Month Number")
        .y_axis_label("Sales")
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(PlotPoints::from(points.clone()))
                    .name("Sales")
                    .color(Color32::from_rgb(31, 119, 180))
                    .width(2.0),
            );
            plot_ui.points(
                Points::new(PlotPoints::from(points))
                    .color(Color32::from_rgb(31, 119, 180))
                    .radius(3.0),
            );
        });
}

fn scatter_plot(ui: &mut Ui, data: &Charts) {
    Plot::new("scatter_plot")
        .height(CHART_HEIGHT)
        .x_axis_label("Sales")
        .y_axis_label("Profit")
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.points(
                Points::new(PlotPoints::from(data.scatter.clone()))
                    .name("Profit vs. Sales")
                    .color(Color32::from_rgb(31, 119, 180))
                    .radius(2.5),
            );
        });
}

fn box_plot(ui: &mut Ui, data: &Charts, colors: &ColorMap) {
    let labels: Vec<String> = data.boxes.iter().map(|b| b.label.clone()).collect();
    Plot::new("box_plot")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("Product")
        .x_axis_formatter(move |mark: GridMark, _range| category_tick(&labels, mark.value))
        .y_axis_label("Sales")
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for (i, summary) in data.boxes.iter().enumerate() {
                let x = i as f64;
                let color = colors.color_for(&summary.label);
                let spread = BoxSpread::new(
                    summary.lower_whisker,
                    summary.q1,
                    summary.median,
                    summary.q3,
                    summary.upper_whisker,
                );
                let elem = BoxElem::new(x, spread)
                    .name(&summary.label)
                    .box_width(0.5)
                    .whisker_width(0.3);

                plot_ui.box_plot(BoxPlot::new(vec![elem]).name(&summary.label).color(color));

                if !summary.outliers.is_empty() {
                    let outliers: Vec<[f64; 2]> =
                        summary.outliers.iter().map(|&v| [x, v]).collect();
                    plot_ui.points(
                        Points::new(PlotPoints::from(outliers))
                            .name(&summary.label)
                            .color(color)
                            .radius(2.5),
                    );
                }
            }
        });
}

/// Axis text for a categorical plot with one category per integer x.
fn category_tick(labels: &[String], x: f64) -> String {
    let index = x.round();
    if (x - index).abs() > 1e-6 || index < 0.0 {
        return String::new();
    }
    labels.get(index as usize).cloned().unwrap_or_default()
}

fn pie_chart(ui: &mut Ui, data: &Charts, colors: &ColorMap) {
    Plot::new("pie_chart")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            // Counter-clockwise from twelve o'clock.
            let mut angle = FRAC_PI_2;
            for slice in &data.pie {
                let sweep = slice.fraction * TAU;
                let color = colors.color_for(&slice.label);

                for wedge in wedge_outlines(angle, sweep) {
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::from(wedge))
                            .name(&slice.label)
                            .fill_color(color)
                            .stroke(Stroke::new(1.0, Color32::WHITE)),
                    );
                }

                if slice.fraction >= 0.03 {
                    let mid = angle + sweep / 2.0;
                    plot_ui.text(Text::new(
                        PlotPoint::new(0.65 * mid.cos(), 0.65 * mid.sin()),
                        format!("{:.1}%", slice.fraction * 100.0),
                    ));
                }
                angle += sweep;
            }
        });
}

/// Outline of a unit-circle wedge, split into pieces no wider than
/// [`MAX_WEDGE_ARC`] so each piece is convex.
fn wedge_outlines(start: f64, sweep: f64) -> Vec<Vec<[f64; 2]>> {
    let pieces = (sweep / MAX_WEDGE_ARC).ceil().max(1.0) as usize;
    let piece_sweep = sweep / pieces as f64;
    let steps_per_piece = 16;

    (0..pieces)
        .map(|p| {
            let a0 = start + p as f64 * piece_sweep;
            let mut outline = vec![[0.0, 0.0]];
            outline.extend((0..=steps_per_piece).map(|s| {
                let a = a0 + piece_sweep * s as f64 / steps_per_piece as f64;
                [a.cos(), a.sin()]
            }));
            outline
        })
        .collect()
}

fn histogram(ui: &mut Ui, data: &Charts) {
    let bars: Vec<Bar> = data
        .histogram
        .iter()
        .map(|bin| {
            Bar::new(bin.center(), bin.density)
                .width(bin.width())
                .name(format!(
                    "{:.0} – {:.0}: {} rows ({:.1}%)",
                    bin.start, bin.end, bin.count, bin.percent
                ))
                .fill(HISTOGRAM_FILL)
                .stroke(Stroke::new(HISTOGRAM_OUTLINE, Color32::BLACK))
        })
        .collect();

    Plot::new("cost_histogram")
        .height(CHART_HEIGHT)
        .x_axis_label("COGS")
        .y_axis_label("probability density")
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("COGS"));
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_axis_shows_product_names() {
        let labels = vec!["Carretera".to_string(), "Paseo".to_string()];
        assert_eq!(category_tick(&labels, 0.0), "Carretera");
        assert_eq!(category_tick(&labels, 1.0000001), "Paseo");
        assert_eq!(category_tick(&labels, 0.5), "");
        assert_eq!(category_tick(&labels, 2.0), "");
        assert_eq!(category_tick(&labels, -1.0), "");
    }

    #[test]
    fn full_circle_is_split_into_convex_pieces() {
        let pieces = wedge_outlines(0.0, TAU);
        assert_eq!(pieces.len(), 4);
        assert!(pieces.iter().all(|p| p[0] == [0.0, 0.0] && p.len() == 18));
    }

    #[test]
    fn small_wedge_is_one_piece() {
        let pieces = wedge_outlines(0.0, 0.3);
        assert_eq!(pieces.len(), 1);
        let last = pieces[0].last().unwrap();
        assert!((last[0] - 0.3f64.cos()).abs() < 1e-12);
        assert!((last[1] - 0.3f64.sin()).abs() < 1e-12);
    }
}
