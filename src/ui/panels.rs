use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::filter::FILTER_COLUMNS;
use crate::data::model::CellValue;
use crate::metrics::Metrics;
use crate::state::AppState;

/// Selectors with more options than this start collapsed.
const OPEN_BELOW: usize = 8;

// ---------------------------------------------------------------------------
// Sidebar – one multi-select per filter column
// ---------------------------------------------------------------------------

/// What the user did to one selector this frame.
enum SelectorAction {
    None,
    SelectAll,
    SelectNone,
    Toggle(CellValue),
}

pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Please Filter Here:");
    ui.add_space(6.0);

    let Some(dataset) = &state.dataset else {
        ui.weak("Load a sales file to enable the filters.");
        return;
    };

    // Owned option lists, so `state` is free to change below.
    let options: Vec<(&str, Result<Vec<CellValue>, String>)> = FILTER_COLUMNS
        .iter()
        .map(|&col| {
            let values = dataset
                .unique_values(col)
                .map(<[CellValue]>::to_vec)
                .map_err(|e| e.to_string());
            (col, values)
        })
        .collect();

    let mut pending: Vec<(&str, SelectorAction)> = Vec::new();
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (column, values) in &options {
                ui.label(RichText::new(format!("Select the {column}:")).strong());
                match values {
                    Ok(values) => {
                        let action = selector(ui, state, column, values);
                        pending.push((*column, action));
                    }
                    Err(msg) => {
                        ui.colored_label(Color32::RED, msg);
                    }
                }
                ui.add_space(8.0);
            }
        });

    for (column, action) in pending {
        match action {
            SelectorAction::None => {}
            SelectorAction::SelectAll => state.select_all(column),
            SelectorAction::SelectNone => state.select_none(column),
            SelectorAction::Toggle(value) => state.toggle_filter_value(column, &value),
        }
    }
}

/// Checkbox list for one column. Reads the selection, reports the click.
fn selector(ui: &mut Ui, state: &AppState, column: &str, values: &[CellValue]) -> SelectorAction {
    let selected = state.filters.get(column);
    let n_selected = selected.map_or(0, |s| s.len());
    let mut action = SelectorAction::None;

    egui::CollapsingHeader::new(format!("{n_selected} of {} selected", values.len()))
        .id_salt(column)
        .default_open(values.len() <= OPEN_BELOW)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    action = SelectorAction::SelectAll;
                }
                if ui.small_button("None").clicked() {
                    action = SelectorAction::SelectNone;
                }
            });
            for value in values {
                let mut checked = selected.is_some_and(|s| s.contains(value));
                if ui.checkbox(&mut checked, value.to_string()).changed() {
                    action = SelectorAction::Toggle(value.clone());
                }
            }
        });
    action
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open sales file…").clicked() {
                ui.close_menu();
                open_file_dialog(state);
            }
            if ui.button("Reload").clicked() {
                ui.close_menu();
                let path = state.config.data_path.clone();
                state.load_path(&path);
            }
        });

        if let Some(ds) = &state.dataset {
            ui.separator();
            ui.label(format!(
                "{} of {} transactions match",
                state.visible_indices.len(),
                ds.len()
            ));
        }
        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.colored_label(Color32::RED, msg);
        }
    });
}

/// Ask for a CSV and load it in place of the current dataset.
pub fn open_file_dialog(state: &mut AppState) {
    let picked = rfd::FileDialog::new()
        .set_title("Open sales data")
        .add_filter("Sales CSV", &["csv", "txt"])
        .pick_file();

    match picked {
        Some(path) => state.load_path(&path),
        None => log::debug!("Open dialog dismissed"),
    }
}

// ---------------------------------------------------------------------------
// Metric cards
// ---------------------------------------------------------------------------

/// Total sales, average rating and average sale, side by side.
pub fn metric_cards(ui: &mut Ui, metrics: &Metrics) {
    if metrics.is_empty {
        ui.label(RichText::new("No rows match the current filters.").italics());
    }
    ui.columns(3, |cols: &mut [Ui]| {
        card(&mut cols[0], "Total Sales:", metrics.total_sales_label());
        card(&mut cols[1], "Average Rating:", metrics.rating_label());
        card(&mut cols[2], "Average Sales Per Transaction:", metrics.average_sale_label());
    });
}

fn card(ui: &mut Ui, title: &str, value: String) {
    ui.label(RichText::new(title).size(18.0).strong());
    ui.add(egui::Label::new(RichText::new(value).size(18.0)).wrap());
}
