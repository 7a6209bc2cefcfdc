//! Props-Snapshot, den der Aufrufer pro Render-Zyklus liefert.

use crate::core::{Background, Item, LatLng, TileLayer};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Standard-Zentrum (Brüssel).
pub const DEFAULT_COORDS: LatLng = LatLng::new(50.850340, 4.351710);
/// Standard-Zoom.
pub const DEFAULT_ZOOM: u8 = 15;

/// Mapbox-Einstellungen.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapboxOptions {
    /// Access-Token für die Standard-Kacheln
    #[serde(default)]
    pub access_token: String,
    /// Hintergrund-Stil (None = Default aus den Widget-Optionen)
    #[serde(default)]
    pub background: Option<Background>,
}

/// Unveränderlicher Props-Snapshot eines Render-Zyklus.
///
/// Items werden als `Arc` geteilt: Gleichheit der Item-Liste ist
/// Referenzgleichheit je Index (siehe `reconciler::items_shallow_equal`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WidgetProps {
    /// Kartenzentrum
    pub coords: LatLng,
    /// Zoom-Stufe
    pub zoom: u8,
    /// Anzuzeigende Items (Reihenfolge = Marker-Reihenfolge)
    pub items: Vec<Arc<Item>>,
    pub mapbox: MapboxOptions,
    /// Eigenes Kachel-URL-Template
    pub tiles: Option<String>,
    /// Attribution für eigene Kacheln
    pub tiles_attribution: Option<String>,
}

impl Default for WidgetProps {
    fn default() -> Self {
        Self {
            coords: DEFAULT_COORDS,
            zoom: DEFAULT_ZOOM,
            items: Vec::new(),
            mapbox: MapboxOptions::default(),
            tiles: None,
            tiles_attribution: None,
        }
    }
}

impl WidgetProps {
    /// Props mit Zentrum, Zoom und Items, sonst Standardwerte.
    pub fn new(coords: LatLng, zoom: u8, items: Vec<Arc<Item>>) -> Self {
        Self {
            coords,
            zoom,
            items,
            ..Self::default()
        }
    }

    /// Effektiver Hintergrund.
    pub fn background(&self, fallback: Background) -> Background {
        self.mapbox.background.unwrap_or(fallback)
    }

    /// Kachel-Layer aus Mapbox-Einstellungen bzw. eigenen Kacheln.
    pub fn tile_layer(&self, fallback: Background) -> TileLayer {
        TileLayer::resolve(
            self.background(fallback),
            &self.mapbox.access_token,
            self.tiles.as_deref(),
            self.tiles_attribution.as_deref(),
        )
    }

    /// Lädt Props aus einer JSON-Datei.
    pub fn load_from_json(path: &std::path::Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let props: Self = serde_json::from_str(&content)?;
        log::info!("Props geladen aus {}: {} Items", path.display(), props.items.len());
        Ok(props)
    }
}
