use std::time::Duration;

use eframe::egui;

use crate::app::{AppConfig, TaxiMapApp};
use crate::ui::controls::render_control_panel;
use crate::ui::map_view::render_map_view;

/// Start the native UI shell.
pub fn run(config: AppConfig) -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1100.0, 760.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Taxi Map Demo",
        options,
        Box::new(move |_cc| Ok(Box::new(TaxiMapApp::new(config)))),
    )
}

impl eframe::App for TaxiMapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.map_tiles.drain_results(ctx);
        self.drain_route_results();
        self.advance_fleet();

        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            render_control_panel(ui, self);
        });
        egui::CentralPanel::default().show(ctx, |ui| {
            render_map_view(ui, self);
        });

        // Keep frames coming for the 1 Hz fleet tick and in-flight fetches.
        ctx.request_repaint_after(Duration::from_millis(100));
    }
}
