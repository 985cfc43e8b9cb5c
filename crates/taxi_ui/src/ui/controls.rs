//! Top panel: mode buttons and the trip readouts.

use eframe::egui::{self, Color32, RichText, Ui};

use taxi_core::ecs::PlacementMode;

use crate::app::TaxiMapApp;
use crate::ui::constants::{DROPOFF_POPUP_LABEL, PICKUP_POPUP_LABEL, ROUTE_COLOR};

pub fn render_control_panel(ui: &mut Ui, app: &mut TaxiMapApp) {
    ui.add_space(4.0);
    ui.horizontal(|ui| {
        if mode_button(ui, app.mode() == PlacementMode::Pickup, PICKUP_POPUP_LABEL).clicked() {
            app.set_mode(PlacementMode::Pickup);
        }
        if mode_button(ui, app.mode() == PlacementMode::Dropoff, DROPOFF_POPUP_LABEL).clicked() {
            app.set_mode(PlacementMode::Dropoff);
        }
        if !app.status_text.is_empty() {
            ui.separator();
            ui.label(app.status_text.as_str());
        }
    });
    ui.horizontal(|ui| {
        readout(ui, "Pickup", &app.pickup_text);
        readout(ui, "Dropoff", &app.dropoff_text);
        readout(ui, "Distance", &app.distance_text);
        readout(ui, "Duration", &app.duration_text);
    });
    ui.add_space(4.0);
}

/// The active mode renders as the primary (filled) button, the inactive one
/// as a secondary button.
fn mode_button(ui: &mut Ui, active: bool, label: &str) -> egui::Response {
    let text = if active {
        RichText::new(label).color(Color32::WHITE)
    } else {
        RichText::new(label)
    };
    let mut button = egui::Button::new(text);
    if active {
        button = button.fill(ROUTE_COLOR);
    }
    ui.add(button)
}

fn readout(ui: &mut Ui, caption: &str, value: &str) {
    ui.label(RichText::new(format!("{caption}:")).strong());
    ui.label(value);
    ui.add_space(12.0);
}
