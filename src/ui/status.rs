//! Status-Bar am unteren Bildschirmrand.

use super::surface::EguiSurface;
use crate::app::WidgetState;
use crate::surface::MapSurface;

/// Rendert die Status-Bar
pub fn render_status_bar(ctx: &egui::Context, state: &WidgetState<EguiSurface>) {
    egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            match state.map() {
                Some(map) => {
                    ui.label(format!("Marker: {}", map.markers.len()));
                    ui.separator();

                    let center = map.surface.center();
                    ui.label(format!(
                        "Zoom: {:.2} | Zentrum: ({:.5}, {:.5})",
                        map.surface.zoom_level(),
                        center.lat,
                        center.lng
                    ));
                    ui.separator();

                    let scroll = if map.surface.scroll_wheel_zoom() {
                        "an"
                    } else {
                        "aus"
                    };
                    ui.label(format!("Mausrad-Zoom: {}", scroll));
                }
                None => {
                    ui.label("Keine Karte");
                }
            }

            ui.separator();
            ui.label(format!("Signale: {}", state.signal_log.total()));
            if let Some(last) = state.signal_log.last() {
                ui.label(format!("zuletzt {:?} → {:?}", last.kind, last.result));
            }
            if state.signal_log.failures() > 0 {
                ui.label(
                    egui::RichText::new(format!("Fehler: {}", state.signal_log.failures()))
                        .color(egui::Color32::RED),
                );
            }

            if let Some(marker) = state.pending_reveal {
                ui.separator();
                ui.label(
                    egui::RichText::new(format!("Aufdecken von {} läuft", marker))
                        .color(egui::Color32::YELLOW),
                );
            }

            if !state.idle.is_empty() {
                ui.separator();
                ui.label(format!("Idle-Tasks: {}", state.idle.len()));
            }
        });
    });
}
