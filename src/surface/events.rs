use super::MarkerHandle;
use crate::core::LatLng;

/// Events, die eine Karte an das Widget meldet.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    /// Ein Popup wurde geöffnet
    PopupOpen {
        marker: MarkerHandle,
        /// Geo-Anker des Popups
        anchor: LatLng,
        /// Gerenderte Höhe des Popup-Containers in Pixeln
        height: f64,
    },
    /// Klick auf die Karte
    Click,
    /// Karte hat den Fokus erhalten
    Focus,
    /// "Zoom Home"-Control wurde betätigt
    ZoomHome,
    /// Aufklappen eines Clusters ist abgeschlossen
    RevealComplete { marker: MarkerHandle },
}

/// Abonnierbare Event-Arten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceEventKind {
    PopupOpen,
    Click,
    Focus,
    ZoomHome,
    RevealComplete,
}

impl SurfaceEvent {
    /// Art des Events (für Subscription-Filter).
    pub fn kind(&self) -> SurfaceEventKind {
        match self {
            Self::PopupOpen { .. } => SurfaceEventKind::PopupOpen,
            Self::Click => SurfaceEventKind::Click,
            Self::Focus => SurfaceEventKind::Focus,
            Self::ZoomHome => SurfaceEventKind::ZoomHome,
            Self::RevealComplete { .. } => SurfaceEventKind::RevealComplete,
        }
    }
}
