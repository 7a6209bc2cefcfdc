use cluster_map_widget::app::{SignalKind, SignalRecord, SignalResult};
use cluster_map_widget::surface::headless::{HeadlessBackend, HeadlessSurface, SurfaceCall};
use cluster_map_widget::{
    Item, LatLng, LifecycleSignal, RenderMode, SignalOutcome, SurfaceError, SurfaceEventKind,
    WidgetController, WidgetError, WidgetProps, WidgetState,
};
use std::sync::Arc;

fn item(id: &str, lat: f64, lng: f64) -> Arc<Item> {
    Arc::new(Item::new(id, LatLng::new(lat, lng), false).with_title(id))
}

fn sample_props() -> WidgetProps {
    WidgetProps::new(
        LatLng::new(50.85, 4.35),
        14,
        vec![
            item("a", 50.850, 4.350),
            item("b", 50.851, 4.352),
            item("c", 50.849, 4.348),
        ],
    )
}

fn mounted() -> (WidgetController<HeadlessBackend>, WidgetState<HeadlessSurface>) {
    let mut controller = WidgetController::new(HeadlessBackend::new());
    let mut state = WidgetState::new();
    controller
        .on_render(&mut state, sample_props())
        .expect("Erstes Rendern sollte funktionieren");
    (controller, state)
}

#[test]
fn test_first_render_creates_map_with_markers_and_subscriptions() {
    let mut controller = WidgetController::new(HeadlessBackend::new());
    let mut state = WidgetState::new();

    let outcome = controller
        .dispatch(&mut state, LifecycleSignal::Render(sample_props()))
        .expect("Render sollte funktionieren");

    match outcome {
        SignalOutcome::Rendered { container, mode } => {
            assert_eq!(container.id, "map");
            assert_eq!(mode, RenderMode::Created);
        }
        other => panic!("Unerwartetes Ergebnis: {other:?}"),
    }

    assert!(state.is_mounted());
    assert_eq!(state.marker_count(), 3);
    let map = state.map().expect("Karte sollte existieren");
    assert_eq!(map.markers.ids(), vec!["a", "b", "c"]);
    assert_eq!(map.surface.cluster_len(), 3);
    assert_eq!(
        map.surface.subscriptions(),
        &[
            SurfaceEventKind::PopupOpen,
            SurfaceEventKind::Click,
            SurfaceEventKind::Focus,
            SurfaceEventKind::ZoomHome,
            SurfaceEventKind::RevealComplete,
        ]
    );
    assert_eq!(map.surface.zoom(), 14);
    assert_eq!(controller.backend().created_count(), 1);
}

#[test]
fn test_render_without_window_yields_placeholder_and_later_signals_are_no_ops() {
    let mut controller = WidgetController::new(HeadlessBackend::without_window());
    let mut state = WidgetState::new();

    let outcome = controller
        .dispatch(&mut state, LifecycleSignal::Render(sample_props()))
        .expect("Render ohne Fenster ist kein Fehler");

    assert!(matches!(
        outcome,
        SignalOutcome::Rendered {
            mode: RenderMode::Placeholder,
            ..
        }
    ));
    assert!(!state.is_mounted());
    assert!(state.container.is_some());

    controller
        .on_load(&mut state)
        .expect("Load ohne Karte sollte ein No-op sein");
    controller
        .on_unload(&mut state)
        .expect("Unload ohne Karte sollte ein No-op sein");
    assert_eq!(controller.backend().created_count(), 0);
}

#[test]
fn test_render_while_mounted_only_schedules_refresh() {
    let (mut controller, mut state) = mounted();

    let mut next = sample_props();
    next.items.push(item("d", 50.852, 4.353));
    next.coords = LatLng::new(50.86, 4.36);

    let outcome = controller
        .dispatch(&mut state, LifecycleSignal::Render(next))
        .expect("Render sollte funktionieren");
    assert!(matches!(
        outcome,
        SignalOutcome::Rendered {
            mode: RenderMode::RefreshScheduled,
            ..
        }
    ));

    // Noch kein Neuaufbau, nur eingereiht
    assert_eq!(state.marker_count(), 3);
    assert_eq!(state.idle.len(), 1);

    let ran = controller
        .run_idle(&mut state)
        .expect("Idle-Refresh sollte funktionieren");
    assert_eq!(ran, 1);
    assert_eq!(state.marker_count(), 4);

    let map = state.map().expect("Karte sollte existieren");
    assert_eq!(map.center, LatLng::new(50.86, 4.36));
    assert!(matches!(
        map.surface.calls().last(),
        Some(SurfaceCall::SetView { zoom: 14, .. })
    ));
    assert_eq!(controller.backend().created_count(), 1);
}

#[test]
fn test_update_with_same_item_references_is_skipped() {
    let (mut controller, mut state) = mounted();

    let mut next = state.props.clone();
    next.zoom = 3;
    next.tiles = Some("https://tiles.example/{z}/{x}/{y}.png".to_string());

    let outcome = controller
        .offer_props(&mut state, next)
        .expect("Update sollte funktionieren");

    assert_eq!(outcome, SignalOutcome::Skipped);
    assert!(state.idle.is_empty());
    assert_eq!(state.props.zoom, 14);
}

#[test]
fn test_update_with_fresh_item_references_rerenders() {
    let (mut controller, mut state) = mounted();

    let mut next = state.props.clone();
    next.items = next
        .items
        .iter()
        .map(|item| Arc::new(Item::clone(item)))
        .collect();
    assert!(WidgetController::<HeadlessBackend>::on_update(
        &state.props,
        &next
    ));

    let outcome = controller
        .offer_props(&mut state, next)
        .expect("Update sollte funktionieren");
    assert!(matches!(
        outcome,
        SignalOutcome::Rendered {
            mode: RenderMode::RefreshScheduled,
            ..
        }
    ));
    assert_eq!(controller.run_idle(&mut state).expect("Idle"), 1);
}

#[test]
fn test_update_with_changed_coords_rerenders() {
    let (mut controller, mut state) = mounted();

    let mut next = state.props.clone();
    next.coords = LatLng::new(48.2, 16.37);

    let outcome = controller
        .offer_props(&mut state, next)
        .expect("Update sollte funktionieren");
    assert_ne!(outcome, SignalOutcome::Skipped);
    assert_eq!(state.props.coords, LatLng::new(48.2, 16.37));
}

#[test]
fn test_load_invalidates_size_of_mounted_map() {
    let (mut controller, mut state) = mounted();

    controller.on_load(&mut state).expect("Load sollte funktionieren");

    let map = state.map().expect("Karte sollte existieren");
    assert_eq!(map.surface.calls().last(), Some(&SurfaceCall::InvalidateSize));
}

#[test]
fn test_unload_removes_map_and_resets_state() {
    let (mut controller, mut state) = mounted();

    controller.on_unload(&mut state).expect("Unload sollte funktionieren");

    assert!(!state.is_mounted());
    assert!(state.container.is_none());
    assert_eq!(state.marker_count(), 0);
    assert!(state.pending_reveal.is_none());

    // Zweites Unload bleibt folgenlos
    controller
        .on_unload(&mut state)
        .expect("Zweites Unload sollte ein No-op sein");
    assert!(!state.is_mounted());
}

#[test]
fn test_deferred_refresh_after_unload_does_nothing() {
    let (mut controller, mut state) = mounted();

    controller
        .dispatch(&mut state, LifecycleSignal::Render(sample_props()))
        .expect("Render sollte funktionieren");
    assert_eq!(state.idle.len(), 1);

    controller.on_unload(&mut state).expect("Unload sollte funktionieren");

    let ran = controller
        .run_idle(&mut state)
        .expect("Refresh ohne Karte darf nicht scheitern");
    assert_eq!(ran, 0);
    assert!(!state.is_mounted());
    assert!(state.idle.is_empty());
}

#[test]
fn test_render_after_unload_creates_new_map() {
    let (mut controller, mut state) = mounted();
    controller.on_unload(&mut state).expect("Unload sollte funktionieren");

    let outcome = controller
        .dispatch(&mut state, LifecycleSignal::Render(sample_props()))
        .expect("Erneutes Rendern sollte funktionieren");

    assert!(matches!(
        outcome,
        SignalOutcome::Rendered {
            mode: RenderMode::Created,
            ..
        }
    ));
    assert_eq!(controller.backend().created_count(), 2);
    assert_eq!(state.marker_count(), 3);
}

#[test]
fn test_failing_backend_propagates_surface_error() {
    let mut controller = WidgetController::new(HeadlessBackend::new().failing());
    let mut state = WidgetState::new();

    let result = controller.on_render(&mut state, sample_props());

    assert!(matches!(
        result,
        Err(WidgetError::Surface(SurfaceError::Backend(_)))
    ));
    assert!(!state.is_mounted());
}

#[test]
fn test_invalid_item_coordinate_leaves_empty_marker_set() {
    let mut controller = WidgetController::new(HeadlessBackend::new());
    let mut state = WidgetState::new();

    let mut props = sample_props();
    props.items.insert(1, item("broken", 95.0, 4.35));

    let result = controller.on_render(&mut state, props);

    assert!(matches!(
        result,
        Err(WidgetError::Surface(SurfaceError::InvalidCoordinate { .. }))
    ));
    // Karte existiert, aber ohne halbfertige Marker-Menge
    assert!(state.is_mounted());
    assert_eq!(state.marker_count(), 0);
    let map = state.map().expect("Karte sollte existieren");
    assert_eq!(map.surface.cluster_len(), 0);
}

#[test]
fn test_duplicate_item_ids_render_both_markers() {
    let mut controller = WidgetController::new(HeadlessBackend::new());
    let mut state = WidgetState::new();

    let props = WidgetProps::new(
        LatLng::new(50.85, 4.35),
        14,
        vec![item("same", 50.85, 4.35), item("same", 50.86, 4.36)],
    );
    controller
        .on_render(&mut state, props)
        .expect("Doppelte IDs sind kein Fehler");

    assert_eq!(state.marker_count(), 2);
}

#[test]
fn test_empty_item_list_renders_empty_map() {
    let mut controller = WidgetController::new(HeadlessBackend::new());
    let mut state = WidgetState::new();

    controller
        .on_render(&mut state, WidgetProps::default())
        .expect("Render ohne Items sollte funktionieren");

    assert!(state.is_mounted());
    assert_eq!(state.marker_count(), 0);
}

#[test]
fn test_signal_log_records_every_dispatched_signal() {
    let (mut controller, mut state) = mounted();
    controller.on_load(&mut state).expect("Load");
    controller.run_idle(&mut state).expect("Idle");
    controller.on_unload(&mut state).expect("Unload");

    assert_eq!(
        state.signal_log.kinds(),
        vec![
            SignalKind::Render,
            SignalKind::Load,
            SignalKind::Idle,
            SignalKind::Unload
        ]
    );
}

#[test]
fn test_signal_log_traces_create_schedule_and_idle_refresh() {
    let (mut controller, mut state) = mounted();
    controller
        .dispatch(&mut state, LifecycleSignal::Render(sample_props()))
        .expect("Render sollte funktionieren");
    controller.run_idle(&mut state).expect("Idle");

    assert_eq!(
        state.signal_log.render_modes(),
        vec![RenderMode::Created, RenderMode::RefreshScheduled]
    );
    assert_eq!(
        state.signal_log.last(),
        Some(&SignalRecord {
            kind: SignalKind::Idle,
            result: SignalResult::IdleRan(1),
        })
    );
    assert_eq!(state.signal_log.failures(), 0);
}

#[test]
fn test_signal_log_marks_failed_selection() {
    let (mut controller, mut state) = mounted();

    let result = controller.zoom_to_selected(&mut state, item("unbekannt", 50.0, 4.0));

    assert!(result.is_err());
    assert_eq!(state.signal_log.failures(), 1);
    assert_eq!(
        state.signal_log.last().map(|record| record.result),
        Some(SignalResult::Failed)
    );
}
