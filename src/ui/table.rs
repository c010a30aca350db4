use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::View;

const ROW_HEIGHT: f32 = 18.0;

// ---------------------------------------------------------------------------
// Data table
// ---------------------------------------------------------------------------

/// Render every column of `view` with virtualised rows. The leading column
/// is the row's position in the loaded file.
pub fn data_table(ui: &mut Ui, id: &str, view: &View<'_>, max_height: f32) {
    let dataset = view.dataset();
    let n_cols = dataset.column_names.len();

    ui.label(format!("{} rows × {} columns", view.len(), n_cols));

    ui.push_id(id, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .vscroll(true)
            .min_scrolled_height(0.0)
            .max_scroll_height(max_height)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::auto().at_least(48.0))
            .columns(Column::auto().at_least(60.0).clip(true), n_cols)
            .header(ROW_HEIGHT + 2.0, |mut header| {
                header.col(|_ui: &mut Ui| {});
                for name in &dataset.column_names {
                    header.col(|ui: &mut Ui| {
                        ui.strong(name);
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, view.len(), |mut row| {
                    let rec_idx = view.rows()[row.index()];
                    let record = &dataset.records[rec_idx];
                    row.col(|ui: &mut Ui| {
                        ui.weak(rec_idx.to_string());
                    });
                    for col in 0..n_cols {
                        row.col(|ui: &mut Ui| {
                            ui.label(record.get(col).to_string());
                        });
                    }
                });
            });
    });
}
