use eframe::egui::{Color32, RichText, ScrollArea, Ui};

use crate::report;
use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// Central page
// ---------------------------------------------------------------------------

/// The report itself: tables, metric cards, the six charts and the
/// conclusion, top to bottom.
pub fn report_page(ui: &mut Ui, state: &AppState) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading(RichText::new(report::HEADING).size(30.0));
            ui.add_space(16.0);

            let Some(dataset) = &state.dataset else {
                ui.centered_and_justified(|ui: &mut Ui| {
                    ui.heading("Open a sales file to begin  (File → Open…)");
                });
                return;
            };
            let table_height = state.config.table_height;

            table::data_table(ui, "raw_table", &dataset.full_view(), table_height);
            ui.add_space(12.0);

            if let Some(msg) = &state.filter_error {
                ui.label(RichText::new(msg).color(Color32::RED));
            }
            if let Some(view) = state.filtered_view() {
                table::data_table(ui, "filtered_table", &view, table_height);
            }
            ui.add_space(12.0);

            match &state.metrics {
                Some(Ok(metrics)) => panels::metric_cards(ui, metrics),
                Some(Err(e)) => {
                    ui.label(RichText::new(e.to_string()).color(Color32::RED));
                }
                None => {}
            }
            ui.separator();

            for (kind, chart) in &state.charts {
                let section = report::section(*kind);
                ui.add_space(20.0);
                ui.heading(RichText::new(section.heading).size(24.0));
                for line in section.caption {
                    ui.label(*line);
                }
                ui.add_space(8.0);
                match chart {
                    Ok(chart) => plot::chart(ui, chart),
                    Err(e) => {
                        ui.label(RichText::new(e.to_string()).color(Color32::RED));
                    }
                }
            }

            ui.add_space(20.0);
            ui.heading(RichText::new(report::CONCLUSION_HEADING).size(24.0));
            for line in report::CONCLUSION {
                ui.label(line);
            }
        });
}
