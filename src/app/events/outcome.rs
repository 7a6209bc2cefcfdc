//! Ergebnisse von `WidgetController::dispatch`.

use crate::surface::{Container, MarkerHandle, RevealStatus};

/// Was ein `Render` bewirkt hat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Karte erstellt und Marker befüllt
    Created,
    /// Keine Render-Umgebung: nur Platzhalter-Container
    Placeholder,
    /// Karte existiert bereits: Marker-Refresh in die Idle-Queue gestellt
    RefreshScheduled,
}

/// Ergebnis von `WidgetController::dispatch`.
#[derive(Debug, Clone, PartialEq)]
pub enum SignalOutcome {
    /// Render durchgeführt
    Rendered {
        container: Container,
        mode: RenderMode,
    },
    /// Update ohne relevante Änderung: kein Re-Render, keine Marker-Arbeit
    Skipped,
    /// Marker gefunden und Aufdecken angestoßen
    Selected {
        marker: MarkerHandle,
        status: RevealStatus,
    },
    /// Aufgeschobene Tasks ausgeführt
    IdleRan { tasks: usize },
    /// Signal verarbeitet, kein weiteres Ergebnis
    Done,
}
