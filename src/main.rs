//! Cluster Map Demo.
//!
//! egui-Host für das Karten-Widget: lädt Props aus einer JSON-Datei
//! (erstes Argument) oder verwendet Beispiel-Items rund um Brüssel.

use cluster_map_widget::app::props::DEFAULT_COORDS;
use cluster_map_widget::ui::{self, EguiBackend, EguiSurface, HostAction, MapVisibility};
use cluster_map_widget::{Item, LatLng, WidgetController, WidgetOptions, WidgetProps, WidgetState};
use eframe::egui;
use std::sync::Arc;

/// Anzahl generierter Beispiel-Items
const SAMPLE_ITEM_COUNT: usize = 250;

fn main() -> Result<(), eframe::Error> {
    AppRunner::run()
}

struct AppRunner;

impl AppRunner {
    fn run() -> Result<(), eframe::Error> {
        // Logger initialisieren
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();

        log::info!("Cluster Map Demo v{} startet...", env!("CARGO_PKG_VERSION"));

        let props = Self::load_props();
        let options = WidgetOptions::load_or_create(&WidgetOptions::config_path());

        let native_options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([1280.0, 720.0])
                .with_title("Cluster Map Demo"),
            ..Default::default()
        };

        eframe::run_native(
            "Cluster Map Demo",
            native_options,
            Box::new(|cc| {
                egui_extras::install_image_loaders(&cc.egui_ctx);
                Ok(Box::new(DemoApp::new(props, options)))
            }),
        )
    }

    fn load_props() -> WidgetProps {
        let Some(path) = std::env::args().nth(1) else {
            return WidgetProps::new(DEFAULT_COORDS, 13, sample_items(SAMPLE_ITEM_COUNT));
        };
        match WidgetProps::load_from_json(std::path::Path::new(&path)) {
            Ok(props) => props,
            Err(e) => {
                log::error!(
                    "Props aus {} nicht lesbar, verwende Beispiel-Items: {:#}",
                    path,
                    e
                );
                WidgetProps::new(DEFAULT_COORDS, 13, sample_items(SAMPLE_ITEM_COUNT))
            }
        }
    }
}

/// Haupt-Anwendungsstruktur
struct DemoApp {
    state: WidgetState<EguiSurface>,
    controller: WidgetController<EguiBackend>,
    /// Props, wie der Host sie zuletzt angeboten hat
    props: WidgetProps,
    visibility: MapVisibility,
    /// Erster Frame: Widget muss noch gerendert werden
    needs_render: bool,
}

impl DemoApp {
    fn new(props: WidgetProps, options: WidgetOptions) -> Self {
        let controller = WidgetController::new(EguiBackend::new(options.cluster_radius_px));
        Self {
            state: WidgetState::with_options(options),
            controller,
            props,
            visibility: MapVisibility::default(),
            needs_render: true,
        }
    }

    fn show_tiles(&self) -> bool {
        self.props.tiles.is_some() || !self.props.mapbox.access_token.is_empty()
    }
}

impl eframe::App for DemoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.needs_render {
            self.needs_render = false;
            self.process_actions(vec![HostAction::Mount]);
        }

        let mut actions = Vec::new();
        ui::render_status_bar(ctx, &self.state);
        actions.extend(ui::render_item_panel(
            ctx,
            &self.props.items,
            self.state.is_mounted(),
            self.visibility.is_visible(),
        ));

        let response = self.render_central_panel(ctx);

        self.forward_surface_events();
        self.process_actions(actions);

        let (drawn, resized) = match response {
            Some(response) => (true, response.resized),
            None => (false, false),
        };
        if self.visibility.take_load(drawn, resized) {
            if let Err(e) = self.controller.on_load(&mut self.state) {
                log::error!("Load fehlgeschlagen: {:#}", e);
            }
        }

        // Thread ist frei: aufgeschobene Refreshes ausführen
        if let Err(e) = self.controller.run_idle(&mut self.state) {
            log::error!("Marker-Refresh fehlgeschlagen: {:#}", e);
        }

        self.maybe_request_repaint(ctx);
    }
}

impl DemoApp {
    /// Zeichnet Karte oder Platzhalter. `None`, wenn keine Karte gezeichnet wurde.
    fn render_central_panel(&mut self, ctx: &egui::Context) -> Option<ui::MapViewResponse> {
        let show_tiles = self.show_tiles();
        let map_visible = self.visibility.is_visible();
        let mut drawn = None;

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| match self.state.map_mut() {
                Some(map) if map_visible => {
                    drawn = Some(ui::render_map(ui, &mut map.surface, show_tiles));
                }
                _ => {
                    ui.centered_and_justified(|ui| {
                        ui.label("Karte nicht sichtbar");
                    });
                }
            });

        drawn
    }

    fn forward_surface_events(&mut self) {
        let events = self
            .state
            .map_mut()
            .map(|map| map.surface.take_events())
            .unwrap_or_default();
        for event in events {
            if let Err(e) = self.controller.handle_surface_event(&mut self.state, event) {
                log::error!("Karten-Event fehlgeschlagen: {:#}", e);
            }
        }
    }

    fn process_actions(&mut self, actions: Vec<HostAction>) {
        for action in actions {
            if let Err(e) = self.apply_action(action) {
                log::error!("Aktion fehlgeschlagen: {:#}", e);
            }
        }
    }

    fn apply_action(&mut self, action: HostAction) -> anyhow::Result<()> {
        match action {
            HostAction::SelectItem(item) => {
                let marker = self.controller.zoom_to_selected(&mut self.state, item)?;
                log::debug!("Item ausgewählt: {}", marker);
            }
            HostAction::ReloadItems => {
                self.props.items = self
                    .props
                    .items
                    .iter()
                    .map(|item| Arc::new(Item::clone(item)))
                    .collect();
                let outcome = self
                    .controller
                    .offer_props(&mut self.state, self.props.clone())?;
                log::info!("Items neu angeboten: {:?}", outcome);
            }
            HostAction::SetMapVisible(visible) => {
                self.visibility.set(visible);
            }
            HostAction::Mount => {
                let container = self.controller.on_render(&mut self.state, self.props.clone())?;
                log::info!("Widget eingehängt in `{}`", container.id);
            }
            HostAction::Unmount => {
                self.controller.on_unload(&mut self.state)?;
            }
        }
        Ok(())
    }

    fn maybe_request_repaint(&self, ctx: &egui::Context) {
        let animating = self
            .state
            .map()
            .is_some_and(|map| map.surface.is_animating());
        if animating || !self.state.idle.is_empty() {
            ctx.request_repaint();
        }
    }
}

/// Deterministische Beispiel-Items rund um das Standardzentrum.
fn sample_items(count: usize) -> Vec<Arc<Item>> {
    const STREETS: [&str; 5] = [
        "Rue Neuve",
        "Boulevard Anspach",
        "Avenue Louise",
        "Rue du Midi",
        "Chaussée de Wavre",
    ];

    let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
    let mut next = move || {
        // xorshift64
        seed ^= seed << 13;
        seed ^= seed >> 7;
        seed ^= seed << 17;
        (seed >> 11) as f64 / (1u64 << 53) as f64
    };

    (0..count)
        .map(|i| {
            let coord = LatLng::new(
                DEFAULT_COORDS.lat + (next() - 0.5) * 0.08,
                DEFAULT_COORDS.lng + (next() - 0.5) * 0.12,
            );
            let mut item = Item::new(format!("item-{i:04}"), coord, i % 17 == 0)
                .with_title(format!("Ort {}", i + 1));
            item.url = format!("https://example.org/items/{i}");
            item.address.street_name = STREETS[i % STREETS.len()].to_string();
            item.address.street_number = (i % 120 + 1).to_string();
            item.address.zip = "1000".to_string();
            item.address.city = "Bruxelles".to_string();
            Arc::new(item)
        })
        .collect()
}
