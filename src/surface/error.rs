use super::MarkerHandle;

/// Fehler der Render-Kollaborateure. Werden vom Kern unverändert weitergereicht.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SurfaceError {
    /// Koordinate außerhalb des gültigen Bereichs oder nicht endlich
    #[error("ungültige Koordinate: ({lat}, {lng})")]
    InvalidCoordinate { lat: f64, lng: f64 },

    /// Handle ist der Karte nicht (mehr) bekannt
    #[error("unbekannter Marker: {0}")]
    UnknownMarker(MarkerHandle),

    /// Sonstiger Backend-Fehler (z.B. Karte konnte nicht erzeugt werden)
    #[error("Backend-Fehler: {0}")]
    Backend(String),
}
