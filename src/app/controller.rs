//! Widget-Controller: zentrale Zustandsübergangsfunktion aller Lifecycle-Signale.

use super::events::{LifecycleSignal, SignalOutcome};
use super::{reconciler, WidgetError, WidgetProps, WidgetState};
use crate::core::Item;
use crate::surface::{Container, MarkerHandle, RenderBackend, SurfaceEvent};

/// Orchestriert Lifecycle-Signale auf den Widget-State.
///
/// Der Controller besitzt nur das Render-Backend; der Zustand einer
/// Widget-Instanz liegt in [`WidgetState`] und wird bei jedem Aufruf übergeben.
pub struct WidgetController<B> {
    backend: B,
}

impl<B: RenderBackend> WidgetController<B> {
    /// Erstellt einen Controller über einem Backend.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Verarbeitet ein Signal und hält es samt Ergebnis im Signal-Log fest.
    pub fn dispatch(
        &mut self,
        state: &mut WidgetState<B::Surface>,
        signal: LifecycleSignal,
    ) -> Result<SignalOutcome, WidgetError> {
        let kind = signal.kind();
        let result = self.route(state, signal);
        state.signal_log.record(kind, &result);
        result
    }

    /// Dispatcht an Feature-Handler in `handlers/`.
    fn route(
        &mut self,
        state: &mut WidgetState<B::Surface>,
        signal: LifecycleSignal,
    ) -> Result<SignalOutcome, WidgetError> {
        use super::handlers;

        match signal {
            LifecycleSignal::Render(props) => {
                handlers::lifecycle::render(&mut self.backend, state, props)
            }
            LifecycleSignal::Update { next } => {
                handlers::lifecycle::update(&mut self.backend, state, next)
            }
            LifecycleSignal::Load => {
                handlers::lifecycle::load(state);
                Ok(SignalOutcome::Done)
            }
            LifecycleSignal::Unload => {
                handlers::lifecycle::unload(state);
                Ok(SignalOutcome::Done)
            }
            LifecycleSignal::ZoomToSelected(item) => {
                handlers::selection::zoom_to_selected(state, &item)
            }
            LifecycleSignal::Surface(event) => {
                handlers::surface_events::handle(state, event)?;
                Ok(SignalOutcome::Done)
            }
            LifecycleSignal::Idle => {
                let tasks = handlers::lifecycle::run_idle(state)?;
                Ok(SignalOutcome::IdleRan { tasks })
            }
        }
    }

    /// Rendert und gibt den Container zurück.
    pub fn on_render(
        &mut self,
        state: &mut WidgetState<B::Surface>,
        props: WidgetProps,
    ) -> Result<Container, WidgetError> {
        match self.dispatch(state, LifecycleSignal::Render(props))? {
            SignalOutcome::Rendered { container, .. } => Ok(container),
            _ => Ok(state.container.clone().unwrap_or_else(Container::map)),
        }
    }

    /// Reine Entscheidung, ob neue Props ein erneutes Rendern erfordern.
    pub fn on_update(prev: &WidgetProps, next: &WidgetProps) -> bool {
        reconciler::should_update(prev, next)
    }

    /// Bietet neue Props an; rendert nur bei relevanter Änderung.
    pub fn offer_props(
        &mut self,
        state: &mut WidgetState<B::Surface>,
        next: WidgetProps,
    ) -> Result<SignalOutcome, WidgetError> {
        self.dispatch(state, LifecycleSignal::Update { next })
    }

    /// Widget wieder sichtbar: Viewport-Größe neu berechnen lassen.
    pub fn on_load(&mut self, state: &mut WidgetState<B::Surface>) -> Result<(), WidgetError> {
        self.dispatch(state, LifecycleSignal::Load).map(|_| ())
    }

    /// Karte abbauen und Zustand zurücksetzen.
    pub fn on_unload(&mut self, state: &mut WidgetState<B::Surface>) -> Result<(), WidgetError> {
        self.dispatch(state, LifecycleSignal::Unload).map(|_| ())
    }

    /// Marker eines Items aufdecken und Popup öffnen.
    pub fn zoom_to_selected(
        &mut self,
        state: &mut WidgetState<B::Surface>,
        item: std::sync::Arc<Item>,
    ) -> Result<MarkerHandle, WidgetError> {
        let id = item.id.clone();
        match self.dispatch(state, LifecycleSignal::ZoomToSelected(item))? {
            SignalOutcome::Selected { marker, .. } => Ok(marker),
            _ => Err(WidgetError::NotFound { id }),
        }
    }

    /// Reicht ein Karten-Event an das Widget weiter.
    pub fn handle_surface_event(
        &mut self,
        state: &mut WidgetState<B::Surface>,
        event: SurfaceEvent,
    ) -> Result<(), WidgetError> {
        self.dispatch(state, LifecycleSignal::Surface(event)).map(|_| ())
    }

    /// Thread ist frei: aufgeschobene Tasks ausführen. Gibt die Anzahl
    /// tatsächlich ausgeführter Refreshes zurück.
    pub fn run_idle(&mut self, state: &mut WidgetState<B::Surface>) -> Result<usize, WidgetError> {
        match self.dispatch(state, LifecycleSignal::Idle)? {
            SignalOutcome::IdleRan { tasks } => Ok(tasks),
            _ => Ok(0),
        }
    }
}
