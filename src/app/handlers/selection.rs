//! Handler für "Zoom to selected".

use crate::app::events::SignalOutcome;
use crate::app::{selector, WidgetError, WidgetState};
use crate::core::Item;
use crate::surface::{MapSurface, RevealStatus};

/// Deckt den Marker eines Items auf und öffnet sein Popup.
///
/// Ohne Karte oder für nicht gerenderte Items: `NotFound`. Das ist nach einem
/// Neuaufbau ein erwartetes Ergebnis; das Widget bleibt benutzbar.
pub fn zoom_to_selected<S: MapSurface>(
    state: &mut WidgetState<S>,
    item: &Item,
) -> Result<SignalOutcome, WidgetError> {
    let Some(map) = state.map_mut() else {
        return Err(WidgetError::NotFound {
            id: item.id.clone(),
        });
    };

    let (marker, status) = selector::zoom_to_selected(&map.markers, &mut map.surface, &item.id)?;
    state.pending_reveal = match status {
        RevealStatus::Pending => Some(marker),
        RevealStatus::Revealed => None,
    };

    log::debug!("Item {} ausgewählt: {} ({:?})", item.id, marker, status);
    Ok(SignalOutcome::Selected { marker, status })
}
