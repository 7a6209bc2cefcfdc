//! Item-ID → Marker auflösen, aufdecken und Popup öffnen.

use super::marker_set::MarkerSet;
use super::WidgetError;
use crate::surface::{ClusterLayer, MarkerHandle, RevealStatus, SurfaceError};

/// Deckt den Marker eines Items auf und öffnet danach sein Popup.
///
/// Das Popup wird erst geöffnet, wenn das Aufdecken abgeschlossen ist. Meldet der
/// Cluster-Layer `Pending`, muss der Aufrufer [`complete_reveal`] beim
/// Abschluss-Event aufrufen. Unbekannte IDs liefern `NotFound` ohne
/// Kollaborateur-Aufrufe.
pub fn zoom_to_selected<C: ClusterLayer + ?Sized>(
    markers: &MarkerSet,
    cluster: &mut C,
    id: &str,
) -> Result<(MarkerHandle, RevealStatus), WidgetError> {
    let marker = markers
        .find(id)
        .map(|entry| entry.marker)
        .ok_or_else(|| WidgetError::NotFound { id: id.to_string() })?;

    let status = cluster.zoom_to_show_layer(marker)?;
    if status == RevealStatus::Revealed {
        cluster.open_popup(marker)?;
    }
    Ok((marker, status))
}

/// Öffnet das Popup nach abgeschlossenem Aufdecken.
///
/// Gehört der Marker nicht mehr zur Menge (Neuaufbau dazwischen), passiert nichts.
/// Gibt zurück, ob ein Popup geöffnet wurde.
pub fn complete_reveal<C: ClusterLayer + ?Sized>(
    markers: &MarkerSet,
    cluster: &mut C,
    marker: MarkerHandle,
) -> Result<bool, SurfaceError> {
    if !markers.contains_marker(marker) {
        log::debug!("Aufdecken von {} veraltet, Popup entfällt", marker);
        return Ok(false);
    }
    cluster.open_popup(marker)?;
    Ok(true)
}
