use std::f32::consts::{FRAC_PI_2, TAU};
use std::ops::RangeInclusive;

use eframe::egui::{
    self, Align2, Color32, FontId, Pos2, RichText, Sense, Shape, Stroke, Ui, Vec2, vec2,
};
use egui_plot::{Bar, BarChart, GridMark, Legend, Plot, PlotPoint, Text};

use crate::color::{self, DEPARTMENT_AVERAGE_BAR, EMPLOYEE_BAR, PIE_COLORS};
use crate::insights::{MetricBar, PeerMetric, PieSlice};

const PLOT_HEIGHT: f32 = 260.0;
const BAR_WIDTH: f64 = 0.6;

// ---------------------------------------------------------------------------
// Shared bar plot scaffolding
// ---------------------------------------------------------------------------

/// A non-interactive plot with one category per integer x position.
fn category_plot(id: &str, labels: Vec<String>, y_max: f64) -> Plot<'static> {
    let n = labels.len();
    let formatter = move |mark: GridMark, _range: &RangeInclusive<f64>| {
        let pos = mark.value.round();
        if (mark.value - pos).abs() > 1e-6 || pos < 0.0 {
            return String::new();
        }
        labels.get(pos as usize).cloned().unwrap_or_default()
    };

    Plot::new(id)
        .height(PLOT_HEIGHT)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show_x(false)
        .include_x(-0.6)
        .include_x(n as f64 - 0.4)
        .include_y(0.0)
        .include_y(y_max * 1.15)
        .x_axis_formatter(formatter)
}

fn title(ui: &mut Ui, text: String) {
    ui.label(RichText::new(text).strong().size(15.0));
}

/// Bars with their annotation printed just above each bar.
fn annotated_bars(
    ui: &mut Ui,
    id: &str,
    bars: &[MetricBar],
    colors: &[Color32],
    x_label: Option<&str>,
    y_label: &str,
) {
    let y_max = bars.iter().map(|b| b.value).fold(0.0, f64::max);
    let labels: Vec<String> = bars.iter().map(|b| b.label.clone()).collect();

    let mut plot = category_plot(id, labels, y_max).y_axis_label(y_label);
    if let Some(x_label) = x_label {
        plot = plot.x_axis_label(x_label);
    }

    plot.show(ui, |plot_ui| {
        let chart_bars: Vec<Bar> = bars
            .iter()
            .zip(colors.iter().copied().chain(std::iter::repeat(Color32::GRAY)))
            .enumerate()
            .map(|(i, (bar, color))| {
                Bar::new(i as f64, bar.value)
                    .name(&bar.label)
                    .fill(color)
                    .stroke(Stroke::new(1.0, color))
                    .width(BAR_WIDTH)
            })
            .collect();
        plot_ui.bar_chart(BarChart::new(chart_bars));

        let offset = y_max * 0.02;
        for (i, bar) in bars.iter().enumerate() {
            plot_ui.text(
                Text::new(
                    PlotPoint::new(i as f64, bar.value + offset),
                    RichText::new(&bar.annotation).strong(),
                )
                .anchor(Align2::CENTER_BOTTOM),
            );
        }
    });
}

// ---------------------------------------------------------------------------
// Charts
// ---------------------------------------------------------------------------

/// Raw metric values, one viridis-coloured bar each.
pub fn metrics_chart(ui: &mut Ui, employee_name: &str, bars: &[MetricBar]) {
    title(ui, format!("Performance Metrics: {employee_name}"));
    let colors = color::viridis(bars.len());
    annotated_bars(ui, "metrics_chart", bars, &colors, Some("Metrics"), "Value");
}

/// Salary and projects as a percentage of the table maxima.
pub fn salary_vs_projects_chart(ui: &mut Ui, employee_name: &str, bars: &[MetricBar]) {
    title(ui, format!("Salary vs. Projects Completed: {employee_name}"));
    let colors = color::coolwarm(bars.len());
    annotated_bars(
        ui,
        "salary_projects_chart",
        bars,
        &colors,
        None,
        "Percentage of Max Value",
    );
}

/// Employee bars with the department average overlaid on the same positions.
pub fn peer_chart(ui: &mut Ui, employee_name: &str, metrics: &[PeerMetric]) {
    title(ui, format!("Performance vs. Department Average: {employee_name}"));

    let y_max = metrics
        .iter()
        .map(|m| m.employee.max(m.department_average))
        .fold(0.0, f64::max);
    let labels: Vec<String> = metrics.iter().map(|m| m.label.clone()).collect();

    category_plot("peer_chart", labels, y_max)
        .legend(Legend::default())
        .show(ui, |plot_ui| {
            let employee_bars: Vec<Bar> = metrics
                .iter()
                .enumerate()
                .map(|(i, m)| Bar::new(i as f64, m.employee).name(&m.label).width(BAR_WIDTH))
                .collect();
            let average_bars: Vec<Bar> = metrics
                .iter()
                .enumerate()
                .map(|(i, m)| {
                    Bar::new(i as f64, m.department_average)
                        .name(&m.label)
                        .width(BAR_WIDTH)
                })
                .collect();

            plot_ui.bar_chart(
                BarChart::new(employee_bars)
                    .name("Employee")
                    .color(EMPLOYEE_BAR),
            );
            plot_ui.bar_chart(
                BarChart::new(average_bars)
                    .name("Department Average")
                    .color(DEPARTMENT_AVERAGE_BAR),
            );
        });
}

/// Pie of the percentage metrics, starting at 12 o'clock and running
/// counter-clockwise, with a legend on the right.
pub fn performance_pie(ui: &mut Ui, employee_name: &str, slices: &[PieSlice]) {
    title(ui, format!("Overall Performance: {employee_name}"));

    ui.horizontal(|ui: &mut Ui| {
        let size = 300.0;
        let (response, painter) = ui.allocate_painter(Vec2::splat(size), Sense::hover());
        let center = response.rect.center();
        let radius = size * 0.32;
        let text_color = ui.visuals().text_color();

        let total: f64 = slices.iter().map(|s| s.share).sum();
        if total <= 0.0 {
            painter.text(
                center,
                Align2::CENTER_CENTER,
                "No data",
                FontId::proportional(14.0),
                text_color,
            );
            return;
        }

        let mut angle = FRAC_PI_2;
        let mut boundaries = Vec::with_capacity(slices.len());
        for (slice, color) in slices.iter().zip(PIE_COLORS) {
            if slice.share <= 0.0 {
                continue;
            }
            let sweep = (slice.share / total) as f32 * TAU;
            fill_wedge(&painter, center, radius, angle, sweep, color);
            boundaries.push(angle);

            let mid = angle + sweep / 2.0;
            painter.text(
                polar(center, radius * 0.6, mid),
                Align2::CENTER_CENTER,
                format!("{:.1}%", slice.share),
                FontId::proportional(12.0),
                Color32::BLACK,
            );
            let anchor = if mid.cos() >= 0.0 {
                Align2::LEFT_CENTER
            } else {
                Align2::RIGHT_CENTER
            };
            painter.text(
                polar(center, radius * 1.1, mid),
                anchor,
                &slice.label,
                FontId::proportional(12.0),
                text_color,
            );
            angle += sweep;
        }

        // Only separate wedges when there is more than one.
        if boundaries.len() > 1 {
            for a in boundaries {
                painter.line_segment(
                    [center, polar(center, radius, a)],
                    Stroke::new(1.5, Color32::WHITE),
                );
            }
        }

        ui.vertical(|ui: &mut Ui| {
            ui.strong("Metrics");
            for (slice, color) in slices.iter().zip(PIE_COLORS) {
                ui.horizontal(|ui: &mut Ui| {
                    let (rect, _) = ui.allocate_exact_size(vec2(12.0, 12.0), Sense::hover());
                    ui.painter().rect_filled(rect, 2.0, color);
                    ui.label(&slice.label);
                });
            }
        });
    });
}

fn polar(center: Pos2, radius: f32, angle: f32) -> Pos2 {
    // Screen y grows downwards.
    center + vec2(angle.cos(), -angle.sin()) * radius
}

/// Fill a wedge as a fan of convex pieces no wider than a quarter turn.
fn fill_wedge(
    painter: &egui::Painter,
    center: Pos2,
    radius: f32,
    start: f32,
    sweep: f32,
    color: Color32,
) {
    if sweep <= 0.0 {
        return;
    }
    const ARC_SEGMENTS: usize = 24;
    let pieces = (sweep / FRAC_PI_2).ceil().max(1.0) as usize;
    let step = sweep / pieces as f32;

    for p in 0..pieces {
        let a0 = start + step * p as f32;
        let mut points: Vec<Pos2> = (0..=ARC_SEGMENTS)
            .map(|k| polar(center, radius, a0 + step * k as f32 / ARC_SEGMENTS as f32))
            .collect();
        points.push(center);
        // Counter-clockwise on screen → reverse for egui's clockwise winding.
        points.reverse();
        painter.add(Shape::convex_polygon(points, color, Stroke::NONE));
    }
}
