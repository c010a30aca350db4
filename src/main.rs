use eframe::egui;
use sales_dashboard::app::DashboardApp;
use sales_dashboard::config::DashboardConfig;
use sales_dashboard::report;

fn main() -> eframe::Result {
    env_logger::init();

    let config = DashboardConfig::load();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(report::PAGE_TITLE)
            .with_inner_size(config.window_size)
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        report::PAGE_TITLE,
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::dark());
            Ok(Box::new(DashboardApp::new(config)))
        }),
    )
}
