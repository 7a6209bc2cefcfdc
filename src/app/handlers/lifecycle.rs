//! Handler für Render, Update, Load, Unload und den Idle-Refresh.

use crate::app::events::{RenderMode, SignalOutcome};
use crate::app::idle::DeferredTask;
use crate::app::state::{Lifecycle, MountedMap};
use crate::app::{reconciler, WidgetError, WidgetProps, WidgetState};
use crate::shared::WidgetOptions;
use crate::surface::{
    Container, ControlPosition, MapSurface, RenderBackend, SurfaceEventKind, SurfaceOptions,
};

/// Events, die jede neu erzeugte Karte an das Widget meldet.
pub const SUBSCRIBED_EVENTS: &[SurfaceEventKind] = &[
    SurfaceEventKind::PopupOpen,
    SurfaceEventKind::Click,
    SurfaceEventKind::Focus,
    SurfaceEventKind::ZoomHome,
    SurfaceEventKind::RevealComplete,
];

/// Rendert mit neuen Props.
///
/// Ohne Karte: Container anlegen und, falls eine Render-Umgebung existiert,
/// Karte erzeugen und Marker befüllen. Mit Karte: nur einen Marker-Refresh
/// in die Idle-Queue stellen.
pub fn render<B: RenderBackend>(
    backend: &mut B,
    state: &mut WidgetState<B::Surface>,
    props: WidgetProps,
) -> Result<SignalOutcome, WidgetError> {
    state.props = props;

    if state.is_mounted() {
        state.idle.post(DeferredTask::RefreshMarkers);
        let container = state.container.get_or_insert_with(Container::map).clone();
        return Ok(SignalOutcome::Rendered {
            container,
            mode: RenderMode::RefreshScheduled,
        });
    }

    let container = Container::map();
    state.container = Some(container.clone());

    if !backend.has_window() {
        log::debug!("Keine Render-Umgebung: nur Platzhalter-Container");
        return Ok(SignalOutcome::Rendered {
            container,
            mode: RenderMode::Placeholder,
        });
    }

    let options = surface_options(&state.props, &state.options);
    let mut surface = backend.create_surface(&container, &options)?;
    surface.subscribe(SUBSCRIBED_EVENTS);

    let mut map = MountedMap::new(surface, state.props.coords, state.props.zoom);
    let background = state.props.background(state.options.default_background);
    let populated = reconciler::rebuild(&mut map, &state.props.items, background, &state.options);
    state.lifecycle = Lifecycle::Mounted(map);
    let count = populated?;

    log::info!(
        "Karte erstellt in `{}` mit {} Markern (Zoom {})",
        container.id,
        count,
        state.props.zoom
    );
    Ok(SignalOutcome::Rendered {
        container,
        mode: RenderMode::Created,
    })
}

/// Rendert nur neu, wenn sich Koordinaten oder Item-Liste geändert haben.
pub fn update<B: RenderBackend>(
    backend: &mut B,
    state: &mut WidgetState<B::Surface>,
    next: WidgetProps,
) -> Result<SignalOutcome, WidgetError> {
    if !reconciler::should_update(&state.props, &next) {
        return Ok(SignalOutcome::Skipped);
    }
    render(backend, state, next)
}

/// Lässt die Karte ihre Viewport-Größe neu berechnen.
/// Ohne Karte ein No-op.
pub fn load<S: MapSurface>(state: &mut WidgetState<S>) {
    match state.map_mut() {
        Some(map) => map.surface.invalidate_size(),
        None => log::debug!("Load ohne Karte ignoriert"),
    }
}

/// Baut die Karte ab und setzt den Zustand zurück.
/// Erneutes Unload ohne Karte wird nur protokolliert.
pub fn unload<S: MapSurface>(state: &mut WidgetState<S>) {
    let Lifecycle::Mounted(map) = &mut state.lifecycle else {
        log::warn!("Unload ohne Karte ignoriert");
        return;
    };
    map.surface.remove();
    state.reset();
    log::info!("Karte abgebaut");
}

/// Baut die Marker aus den aktuellen Props neu auf und setzt den View.
///
/// Prüft beim Ausführen, ob die Karte noch existiert, und tut sonst nichts.
/// Gibt zurück, ob ein Refresh stattfand.
pub fn refresh<S: MapSurface>(state: &mut WidgetState<S>) -> Result<bool, WidgetError> {
    let background = state.props.background(state.options.default_background);
    let Lifecycle::Mounted(map) = &mut state.lifecycle else {
        log::debug!("Refresh ohne Karte verworfen");
        return Ok(false);
    };

    // Neuaufbau vergibt neue Handles, ein laufendes Aufdecken ist damit hinfällig
    state.pending_reveal = None;

    reconciler::rebuild(map, &state.props.items, background, &state.options)?;
    map.surface.set_view(state.props.coords, state.props.zoom)?;
    map.center = state.props.coords;
    map.zoom = state.props.zoom;
    Ok(true)
}

/// Führt alle bisher eingereihten Tasks aus.
pub fn run_idle<S: MapSurface>(state: &mut WidgetState<S>) -> Result<usize, WidgetError> {
    let tasks = state.idle.take_pending();
    let mut ran = 0;
    for task in tasks {
        match task {
            DeferredTask::RefreshMarkers => {
                if refresh(state)? {
                    ran += 1;
                }
            }
        }
    }
    Ok(ran)
}

/// Karten-Optionen aus Props und Widget-Optionen.
pub fn surface_options(props: &WidgetProps, options: &WidgetOptions) -> SurfaceOptions {
    let tile_layer = props
        .tile_layer(options.default_background)
        .with_zoom_range(options.tile_min_zoom, options.tile_max_zoom);

    SurfaceOptions {
        center: props.coords,
        zoom: props.zoom,
        zoom_control: false,
        scroll_wheel_zoom: false,
        tile_layer,
        scale_control: Some(ControlPosition::VerticalCenterRight),
        zoom_home_control: true,
    }
}
