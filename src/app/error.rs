//! Fehlertyp der Widget-Operationen.

use crate::surface::SurfaceError;

/// Fehler, die das Widget an den Aufrufer meldet.
///
/// Fehlende Render-Umgebung ist kein Fehler, sondern ein eigener Modus
/// (`RenderMode::Placeholder`).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WidgetError {
    /// Das gewählte Item ist aktuell nicht als Marker gerendert
    #[error("kein Marker für Item `{id}`")]
    NotFound { id: String },

    /// Fehler eines Render-Kollaborateurs, unverändert durchgereicht
    #[error(transparent)]
    Surface(#[from] SurfaceError),
}
