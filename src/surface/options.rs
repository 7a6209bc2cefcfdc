use crate::core::{Background, LatLng, TileLayer};

/// Position eines Karten-Controls.
///
/// Neben den vier Ecken gibt es zwei vertikal zentrierte Plätze am linken
/// und rechten Rand (z.B. für die Maßstabsleiste).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlPosition {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    VerticalCenterLeft,
    VerticalCenterRight,
}

/// Optionen für [`super::RenderBackend::create_surface`].
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceOptions {
    /// Anfangszentrum
    pub center: LatLng,
    /// Anfangszoom
    pub zoom: u8,
    /// Standard-Zoom-Buttons anzeigen
    pub zoom_control: bool,
    /// Mausrad-Zoom von Anfang an aktiv
    pub scroll_wheel_zoom: bool,
    /// Kachel-Layer inkl. Attribution
    pub tile_layer: TileLayer,
    /// Maßstabsleiste (None = keine)
    pub scale_control: Option<ControlPosition>,
    /// "Zoom Home"-Control anzeigen
    pub zoom_home_control: bool,
}

impl SurfaceOptions {
    /// Optionen mit Zentrum und Zoom; Mapbox-Standardkacheln ohne Token,
    /// Zoom-Buttons und Mausrad-Zoom aus, Maßstab rechts mittig, "Zoom Home" an.
    pub fn at(center: LatLng, zoom: u8) -> Self {
        Self {
            center,
            zoom,
            zoom_control: false,
            scroll_wheel_zoom: false,
            tile_layer: TileLayer::resolve(Background::Light, "", None, None),
            scale_control: Some(ControlPosition::VerticalCenterRight),
            zoom_home_control: true,
        }
    }

    /// Ersetzt den Kachel-Layer (Builder).
    pub fn with_tile_layer(mut self, tile_layer: TileLayer) -> Self {
        self.tile_layer = tile_layer;
        self
    }
}
