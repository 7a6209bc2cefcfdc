//! Seitenleiste mit Item-Liste und Widget-Steuerung.

use super::HostAction;
use crate::core::Item;
use std::sync::Arc;

/// Rendert die Item-Liste und gibt erzeugte Aktionen zurück.
pub fn render_item_panel(
    ctx: &egui::Context,
    items: &[Arc<Item>],
    mounted: bool,
    map_visible: bool,
) -> Vec<HostAction> {
    let mut actions = Vec::new();

    egui::SidePanel::left("item_panel")
        .resizable(true)
        .default_width(260.0)
        .show(ctx, |ui| {
            ui.heading("Widget");
            ui.horizontal(|ui| {
                if mounted {
                    if ui.button("Aushängen").clicked() {
                        actions.push(HostAction::Unmount);
                    }
                } else if ui.button("Einhängen").clicked() {
                    actions.push(HostAction::Mount);
                }

                let mut visible = map_visible;
                if ui.checkbox(&mut visible, "Sichtbar").changed() {
                    actions.push(HostAction::SetMapVisible(visible));
                }
            });

            if ui
                .button("Items neu laden")
                .on_hover_text("Gleiche Daten, neue Referenzen")
                .clicked()
            {
                actions.push(HostAction::ReloadItems);
            }

            ui.separator();
            ui.heading(format!("Items ({})", items.len()));

            egui::ScrollArea::vertical().show(ui, |ui| {
                for item in items {
                    let label = if item.featured {
                        format!("★ {}", display_title(item))
                    } else {
                        display_title(item).to_string()
                    };
                    let button = egui::Button::new(label).wrap_mode(egui::TextWrapMode::Truncate);
                    let response = ui
                        .add_enabled(mounted, button)
                        .on_hover_text(item.address_line());
                    if response.clicked() {
                        actions.push(HostAction::SelectItem(item.clone()));
                    }
                }
            });
        });

    actions
}

fn display_title(item: &Item) -> &str {
    if item.title.is_empty() {
        &item.id
    } else {
        &item.title
    }
}
