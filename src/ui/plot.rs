use std::ops::RangeInclusive;

use eframe::egui::{self, Color32, FontId, RichText, Sense, Stroke, Ui};
use eframe::egui::epaint::TextShape;
use egui_plot::{Bar, BarChart, GridMark, Line, Plot, PlotPoint, PlotPoints, PlotTransform};

use crate::charts::{Chart, ChartBody, ChartKind, Edge, Grid, Theme};
use crate::metrics::group_thousands;
use crate::ui::donut;

/// Plot height per chart, scaled from the figure sizes of the printed report.
fn height(kind: ChartKind) -> f32 {
    match kind {
        ChartKind::OccupationByGender => 420.0,
        ChartKind::TopOccupations => 340.0,
        _ => 300.0,
    }
}

// ---------------------------------------------------------------------------
// Chart block
// ---------------------------------------------------------------------------

/// Draw one chart model inside a frame coloured by its theme.
pub fn chart(ui: &mut Ui, chart: &Chart) {
    themed(ui, &chart.theme, |ui: &mut Ui| {
        if !chart.title.is_empty() {
            ui.vertical_centered(|ui: &mut Ui| {
                ui.label(RichText::new(&chart.title).size(18.0).color(chart.theme.text));
            });
        }
        match &chart.body {
            ChartBody::NoData => no_data(ui),
            ChartBody::Donut { .. } => donut::donut(ui, chart, height(chart.kind)),
            _ => cartesian(ui, chart),
        }
    });
}

/// Placeholder for an empty aggregate.
pub fn no_data(ui: &mut Ui) {
    ui.add_space(24.0);
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(RichText::new("No data to display").italics());
    });
    ui.add_space(24.0);
}

fn themed(ui: &mut Ui, theme: &Theme, add_contents: impl FnOnce(&mut Ui)) {
    egui::Frame::default()
        .fill(theme.background)
        .inner_margin(egui::Margin::same(8))
        .show(ui, |ui: &mut Ui| {
            let visuals = ui.visuals_mut();
            visuals.override_text_color = Some(theme.text);
            visuals.extreme_bg_color = theme.background;
            add_contents(ui);
        });
}

// ---------------------------------------------------------------------------
// Cartesian charts
// ---------------------------------------------------------------------------

fn categories(body: &ChartBody) -> Option<&[String]> {
    match body {
        ChartBody::GroupedBars { categories, .. }
        | ChartBody::Bars { categories, .. }
        | ChartBody::Line { categories, .. } => Some(categories.as_slice()),
        _ => None,
    }
}

fn cartesian(ui: &mut Ui, chart: &Chart) {
    let rotated = chart.x_label_rotation != 0.0;
    let categories = categories(&chart.body).map(<[String]>::to_vec);

    if let ChartBody::GroupedBars {
        series,
        legend_title,
        ..
    } = &chart.body
    {
        ui.horizontal(|ui: &mut Ui| {
            ui.strong(legend_title);
            for s in series {
                ui.label(RichText::new("■").color(s.color));
                ui.label(&s.name);
            }
        });
    }

    let mut plot = Plot::new(chart.kind.id())
        .height(height(chart.kind))
        .y_axis_label(chart.y_label.as_str())
        .allow_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show_grid(match chart.theme.grid {
            Grid::Off => [false, false],
            Grid::Horizontal => [false, true],
            Grid::Both => [true, true],
        })
        .y_axis_formatter(|mark: GridMark, _range: &RangeInclusive<f64>| {
            group_thousands(mark.value.round() as i64)
        });

    if !rotated {
        plot = plot.x_axis_label(chart.x_label.as_str());
    }
    if let Some(names) = categories.clone() {
        plot = plot.x_axis_formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
            if rotated {
                String::new()
            } else {
                category_at(&names, mark.value).unwrap_or_default()
            }
        });
    }

    let response = plot.show(ui, |plot_ui| match &chart.body {
        ChartBody::Histogram { bins, fill, edge } => {
            let bars = bins
                .iter()
                .map(|b| {
                    Bar::new((b.start + b.end) / 2.0, b.count as f64)
                        .width(b.end - b.start)
                        .fill(*fill)
                        .stroke(stroke(edge))
                        .name(format!("{:.0}–{:.0}", b.start, b.end))
                })
                .collect();
            plot_ui.bar_chart(BarChart::new(bars).color(*fill));
        }
        ChartBody::GroupedBars { series, .. } => {
            let k = series.len().max(1) as f64;
            let width = 0.8 / k;
            for (j, s) in series.iter().enumerate() {
                let bars = s
                    .values
                    .iter()
                    .enumerate()
                    .filter_map(|(i, v)| {
                        let x = i as f64 - 0.4 + (j as f64 + 0.5) * width;
                        v.map(|v| Bar::new(x, v).width(width).fill(s.color))
                    })
                    .collect();
                plot_ui.bar_chart(BarChart::new(bars).name(&s.name).color(s.color));
            }
        }
        ChartBody::Bars {
            categories,
            values,
            fills,
            edge,
        } => {
            let bars = values
                .iter()
                .zip(fills)
                .zip(categories)
                .enumerate()
                .map(|(i, ((v, fill), name))| {
                    let bar = Bar::new(i as f64, *v).width(0.6).fill(*fill).name(name);
                    match edge {
                        Some(edge) => bar.stroke(stroke(edge)),
                        None => bar,
                    }
                })
                .collect();
            plot_ui.bar_chart(BarChart::new(bars));
        }
        ChartBody::Line { points, color, .. } => {
            plot_ui.line(
                Line::new(PlotPoints::from(points.clone()))
                    .color(*color)
                    .width(1.5),
            );
        }
        ChartBody::Donut { .. } | ChartBody::NoData => {}
    });

    if rotated {
        if let Some(names) = &categories {
            rotated_labels(
                ui,
                &response.transform,
                names,
                chart.x_label_rotation,
                chart.theme.text,
            );
        }
        ui.vertical_centered(|ui: &mut Ui| {
            ui.label(&chart.x_label);
        });
    }
}

fn stroke(edge: &Edge) -> Stroke {
    Stroke::new(edge.width, edge.color)
}

/// Category name for an axis mark that lands on an integer position.
fn category_at(names: &[String], value: f64) -> Option<String> {
    let rounded = value.round();
    if (value - rounded).abs() > 1e-6 || rounded < 0.0 {
        return None;
    }
    names.get(rounded as usize).cloned()
}

/// Paint category names under the plot, rotated counter-clockwise by
/// `degrees` and right-aligned on their tick.
fn rotated_labels(
    ui: &mut Ui,
    transform: &PlotTransform,
    names: &[String],
    degrees: f32,
    color: Color32,
) {
    let font = FontId::proportional(12.0);
    let angle = -degrees.to_radians();
    let (sin, cos) = angle.sin_cos();

    let galleys: Vec<_> = names
        .iter()
        .map(|n| ui.painter().layout_no_wrap(n.clone(), font.clone(), color))
        .collect();
    let longest = galleys.iter().map(|g| g.size().x).fold(0.0, f32::max);
    let band = longest * sin.abs() + font.size * 2.0;

    let (rect, _) = ui.allocate_exact_size(egui::vec2(ui.available_width(), band), Sense::hover());
    let painter = ui.painter_at(rect);
    for (i, galley) in galleys.into_iter().enumerate() {
        let tick = transform.position_from_point(&PlotPoint::new(i as f64, 0.0));
        let end = egui::pos2(tick.x, rect.top() + 4.0);
        let start = end - egui::vec2(galley.size().x * cos, galley.size().x * sin);
        painter.add(TextShape::new(start, galley, color).with_angle(angle));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_labels_only_on_integer_marks() {
        let names = vec!["Western".to_string(), "Central".to_string()];
        assert_eq!(category_at(&names, 0.0).as_deref(), Some("Western"));
        assert_eq!(category_at(&names, 1.0000000001).as_deref(), Some("Central"));
        assert_eq!(category_at(&names, 0.5), None);
        assert_eq!(category_at(&names, -1.0), None);
        assert_eq!(category_at(&names, 2.0), None);
    }
}
