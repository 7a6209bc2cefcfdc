//! Handler für Events der Karte: Popup zentrieren, Mausrad-Zoom, Zoom Home,
//! abgeschlossenes Aufdecken.

use super::lifecycle;
use crate::app::{selector, WidgetError, WidgetState};
use crate::core::LatLng;
use crate::surface::{MapSurface, MarkerHandle, SurfaceEvent};

/// Verarbeitet ein Karten-Event. Ohne Karte werden Events verworfen.
pub fn handle<S: MapSurface>(
    state: &mut WidgetState<S>,
    event: SurfaceEvent,
) -> Result<(), WidgetError> {
    if !state.is_mounted() {
        log::debug!("Karten-Event ohne Karte verworfen: {:?}", event.kind());
        return Ok(());
    }

    match event {
        SurfaceEvent::PopupOpen { anchor, height, .. } => {
            if let Some(map) = state.map_mut() {
                center_popup(&mut map.surface, anchor, height);
            }
        }
        SurfaceEvent::Click => toggle_scroll_zoom(state),
        SurfaceEvent::Focus => enable_scroll_zoom_once(state),
        SurfaceEvent::ZoomHome => {
            lifecycle::refresh(state)?;
        }
        SurfaceEvent::RevealComplete { marker } => reveal_complete(state, marker)?,
    }
    Ok(())
}

/// Verschiebt die Karte so, dass ein geöffnetes Popup vollständig sichtbar ist.
///
/// Der Anker wird um die halbe Popup-Höhe nach oben versetzt und zum neuen
/// Zentrum gemacht. `pan_to` öffnet keine Popups, löst also kein erneutes
/// `PopupOpen` aus.
pub fn center_popup<S: MapSurface + ?Sized>(surface: &mut S, anchor: LatLng, popup_height: f64) {
    let mut px = surface.project(anchor);
    px.y -= popup_height / 2.0;
    let target = surface.unproject(px);
    surface.pan_to(target, true);
}

/// Klick auf die Karte schaltet Mausrad-Zoom um.
fn toggle_scroll_zoom<S: MapSurface>(state: &mut WidgetState<S>) {
    if !state.options.click_toggles_scroll_zoom {
        return;
    }
    if let Some(map) = state.map_mut() {
        let enabled = map.surface.scroll_wheel_zoom();
        map.surface.set_scroll_wheel_zoom(!enabled);
    }
}

/// Erster Fokus aktiviert Mausrad-Zoom; weitere Fokus-Events bleiben wirkungslos.
fn enable_scroll_zoom_once<S: MapSurface>(state: &mut WidgetState<S>) {
    let enable = state.options.focus_enables_scroll_zoom;
    let Some(map) = state.map_mut() else {
        return;
    };
    if map.focus_handled {
        return;
    }
    map.focus_handled = true;
    if enable {
        map.surface.set_scroll_wheel_zoom(true);
    }
}

/// Öffnet das Popup eines ausstehenden Aufdeckens.
fn reveal_complete<S: MapSurface>(
    state: &mut WidgetState<S>,
    marker: MarkerHandle,
) -> Result<(), WidgetError> {
    if state.pending_reveal != Some(marker) {
        log::debug!("Aufdecken von {} nicht angefordert, ignoriert", marker);
        return Ok(());
    }
    state.pending_reveal = None;
    if let Some(map) = state.map_mut() {
        selector::complete_reveal(&map.markers, &mut map.surface, marker)?;
    }
    Ok(())
}
