//! Capability-Schnittstellen zu den externen Render-Kollaborateuren.
//!
//! Der Widget-Kern spricht Karte, Cluster-Layer und Marker-Fabrik nur über
//! diese Traits an. Eine konkrete Implementierung liefert der Host
//! (z.B. `ui::surface::EguiSurface` oder ein Test-Double).

mod error;
mod events;
pub mod headless;
mod options;

pub use error::SurfaceError;
pub use events::{SurfaceEvent, SurfaceEventKind};
pub use options::{ControlPosition, SurfaceOptions};

use crate::core::{LatLng, MarkerIcon, PopupContent, PopupOptions};
use glam::DVec2;

/// Opake Referenz auf einen gerenderten Marker. Wird von der Marker-Fabrik vergeben.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerHandle(pub u64);

impl std::fmt::Display for MarkerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "marker#{}", self.0)
    }
}

/// Container-Element, in das die Karte eingehängt wird.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    /// Element-ID
    pub id: String,
}

impl Container {
    /// Standard-ID des Karten-Containers.
    pub const MAP_ID: &'static str = "map";

    /// Erstellt den Karten-Container.
    pub fn map() -> Self {
        Self {
            id: Self::MAP_ID.to_string(),
        }
    }
}

/// Ergebnis von [`ClusterLayer::zoom_to_show_layer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealStatus {
    /// Marker ist sofort einzeln sichtbar
    Revealed,
    /// Aufklappen läuft noch; Abschluss kommt als [`SurfaceEvent::RevealComplete`]
    Pending,
}

/// Erzeugt Marker und hängt Popups an.
pub trait MarkerFactory {
    /// Legt einen Marker an der Koordinate an.
    fn create_marker(
        &mut self,
        coord: LatLng,
        icon: &MarkerIcon,
    ) -> Result<MarkerHandle, SurfaceError>;

    /// Bindet Popup-Inhalt an einen Marker.
    fn bind_popup(
        &mut self,
        marker: MarkerHandle,
        content: PopupContent,
        options: &PopupOptions,
    ) -> Result<(), SurfaceError>;
}

/// Cluster-Layer, der nahe Marker zu Gruppen zusammenfasst.
pub trait ClusterLayer {
    /// Registriert einen Marker im Cluster.
    fn add_layer(&mut self, marker: MarkerHandle) -> Result<(), SurfaceError>;

    /// Entfernt alle Marker aus dem Cluster und gibt sie frei.
    fn clear_layers(&mut self);

    /// Klappt umschließende Cluster auf, bis der Marker einzeln sichtbar ist.
    fn zoom_to_show_layer(&mut self, marker: MarkerHandle) -> Result<RevealStatus, SurfaceError>;

    /// Öffnet das Popup eines Markers.
    fn open_popup(&mut self, marker: MarkerHandle) -> Result<(), SurfaceError>;
}

/// Die Karten-Oberfläche (Viewport, Pan/Zoom, Kacheln).
pub trait MapSurface: MarkerFactory + ClusterLayer {
    /// Setzt Zentrum und Zoom.
    fn set_view(&mut self, center: LatLng, zoom: u8) -> Result<(), SurfaceError>;

    /// Berechnet die Viewport-Größe neu (nach Verstecken/Resize).
    fn invalidate_size(&mut self);

    /// Baut die Karte ab und gibt Render-Ressourcen und Event-Bindungen frei.
    fn remove(&mut self);

    /// Geo → Pixel beim aktuellen Zoom.
    fn project(&self, coord: LatLng) -> DVec2;

    /// Pixel → Geo beim aktuellen Zoom.
    fn unproject(&self, px: DVec2) -> LatLng;

    /// Verschiebt die Karte auf ein neues Zentrum, ohne Popups auszulösen.
    fn pan_to(&mut self, center: LatLng, animate: bool);

    /// Meldet die Events an, die der Host an das Widget weiterreichen soll.
    fn subscribe(&mut self, events: &[SurfaceEventKind]);

    /// Ob Mausrad-Zoom aktiv ist.
    fn scroll_wheel_zoom(&self) -> bool;

    /// Schaltet Mausrad-Zoom.
    fn set_scroll_wheel_zoom(&mut self, enabled: bool);
}

/// Render-Umgebung, die Karten erzeugen kann.
pub trait RenderBackend {
    /// Konkreter Surface-Typ
    type Surface: MapSurface;

    /// Ob eine interaktive Umgebung (Fenster/Canvas) existiert.
    fn has_window(&self) -> bool;

    /// Erzeugt eine Karte im Container.
    fn create_surface(
        &mut self,
        container: &Container,
        options: &SurfaceOptions,
    ) -> Result<Self::Surface, SurfaceError>;
}
