//! Signal-Enum des Widgets.

use crate::app::WidgetProps;
use crate::core::Item;
use crate::surface::SurfaceEvent;
use std::sync::Arc;

/// Signale an das Widget.
/// Alle Signale laufen über `WidgetController::dispatch`.
#[derive(Debug, Clone)]
pub enum LifecycleSignal {
    /// Rendern mit neuem Props-Snapshot (erstellt die Karte beim ersten Mal)
    Render(WidgetProps),
    /// Neue Props angeboten; rendert nur bei relevanter Änderung neu
    Update { next: WidgetProps },
    /// Widget wieder sichtbar (nach Verstecken/Resize)
    Load,
    /// Widget wird ausgehängt
    Unload,
    /// Marker eines Items aufdecken und Popup öffnen
    ZoomToSelected(Arc<Item>),
    /// Event der Karte
    Surface(SurfaceEvent),
    /// Thread ist frei: aufgeschobene Tasks ausführen
    Idle,
}

/// Art eines Signals (für das Signal-Log).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalKind {
    Render,
    Update,
    Load,
    Unload,
    ZoomToSelected,
    Surface,
    Idle,
}

impl LifecycleSignal {
    /// Art des Signals
    pub fn kind(&self) -> SignalKind {
        match self {
            Self::Render(_) => SignalKind::Render,
            Self::Update { .. } => SignalKind::Update,
            Self::Load => SignalKind::Load,
            Self::Unload => SignalKind::Unload,
            Self::ZoomToSelected(_) => SignalKind::ZoomToSelected,
            Self::Surface(_) => SignalKind::Surface,
            Self::Idle => SignalKind::Idle,
        }
    }
}
