//! In-Memory-Karte ohne Fenster.
//!
//! Implementiert alle Kollaborateur-Traits, protokolliert jeden Aufruf als
//! [`SurfaceCall`] und dient als Test-Double sowie für Benchmarks.
//! Clustering findet nicht statt: jeder registrierte Marker gilt als Cluster-Mitglied.

use super::{
    ClusterLayer, Container, MapSurface, MarkerFactory, MarkerHandle, RenderBackend,
    RevealStatus, SurfaceError, SurfaceEventKind, SurfaceOptions,
};
use crate::core::{geo, LatLng, MarkerIcon, PopupContent, PopupOptions};
use glam::DVec2;
use indexmap::IndexMap;

/// Protokollierter Kollaborateur-Aufruf.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    SetView { center: LatLng, zoom: u8 },
    InvalidateSize,
    Remove,
    PanTo { center: LatLng, animate: bool },
    Subscribe(Vec<SurfaceEventKind>),
    SetScrollWheelZoom(bool),
    CreateMarker(MarkerHandle),
    BindPopup(MarkerHandle),
    AddLayer(MarkerHandle),
    ClearLayers,
    ZoomToShowLayer(MarkerHandle),
    OpenPopup(MarkerHandle),
}

/// Wie `zoom_to_show_layer` antwortet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RevealMode {
    /// Sofort aufgedeckt
    #[default]
    Immediate,
    /// Aufdecken läuft asynchron; Abschluss muss der Aufrufer als Event liefern
    Deferred,
}

/// Ein Marker der Headless-Karte.
#[derive(Debug, Clone)]
pub struct HeadlessMarker {
    pub coord: LatLng,
    pub icon: MarkerIcon,
    pub popup: Option<PopupContent>,
    /// Im Cluster-Layer registriert
    pub clustered: bool,
}

/// Backend für [`HeadlessSurface`].
#[derive(Debug, Clone)]
pub struct HeadlessBackend {
    has_window: bool,
    reveal_mode: RevealMode,
    fail_creation: bool,
    created: usize,
}

impl HeadlessBackend {
    /// Backend mit (simulierter) Render-Umgebung.
    pub fn new() -> Self {
        Self {
            has_window: true,
            reveal_mode: RevealMode::Immediate,
            fail_creation: false,
            created: 0,
        }
    }

    /// Backend ohne Render-Umgebung (z.B. serverseitiges Prerendering).
    pub fn without_window() -> Self {
        Self {
            has_window: false,
            ..Self::new()
        }
    }

    /// Setzt das Reveal-Verhalten neu erzeugter Karten (Builder).
    pub fn with_reveal_mode(mut self, mode: RevealMode) -> Self {
        self.reveal_mode = mode;
        self
    }

    /// Lässt `create_surface` scheitern (Builder).
    pub fn failing(mut self) -> Self {
        self.fail_creation = true;
        self
    }

    /// Anzahl bisher erzeugter Karten.
    pub fn created_count(&self) -> usize {
        self.created
    }
}

impl Default for HeadlessBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderBackend for HeadlessBackend {
    type Surface = HeadlessSurface;

    fn has_window(&self) -> bool {
        self.has_window
    }

    fn create_surface(
        &mut self,
        container: &Container,
        options: &SurfaceOptions,
    ) -> Result<HeadlessSurface, SurfaceError> {
        if self.fail_creation {
            return Err(SurfaceError::Backend(format!(
                "Karte in `{}` konnte nicht erzeugt werden",
                container.id
            )));
        }
        if !options.center.is_valid() {
            return Err(SurfaceError::InvalidCoordinate {
                lat: options.center.lat,
                lng: options.center.lng,
            });
        }
        self.created += 1;
        let mut surface = HeadlessSurface::new(container.clone(), options.clone());
        surface.reveal_mode = self.reveal_mode;
        Ok(surface)
    }
}

/// In-Memory-Karte.
#[derive(Debug)]
pub struct HeadlessSurface {
    container: Container,
    options: SurfaceOptions,
    center: LatLng,
    zoom: u8,
    markers: IndexMap<MarkerHandle, HeadlessMarker>,
    next_handle: u64,
    calls: Vec<SurfaceCall>,
    subscriptions: Vec<SurfaceEventKind>,
    scroll_wheel_zoom: bool,
    open_popup: Option<MarkerHandle>,
    reveal_mode: RevealMode,
    removed: bool,
}

impl HeadlessSurface {
    /// Erzeugt eine Karte direkt, ohne Backend.
    pub fn new(container: Container, options: SurfaceOptions) -> Self {
        Self {
            container,
            center: options.center,
            zoom: options.zoom,
            scroll_wheel_zoom: options.scroll_wheel_zoom,
            options,
            markers: IndexMap::new(),
            next_handle: 1,
            calls: Vec::new(),
            subscriptions: Vec::new(),
            open_popup: None,
            reveal_mode: RevealMode::Immediate,
            removed: false,
        }
    }

    /// Alle bisherigen Aufrufe in Reihenfolge.
    pub fn calls(&self) -> &[SurfaceCall] {
        &self.calls
    }

    /// Anzahl der im Cluster registrierten Marker.
    pub fn cluster_len(&self) -> usize {
        self.markers.values().filter(|m| m.clustered).count()
    }

    /// Marker nach Handle.
    pub fn marker(&self, handle: MarkerHandle) -> Option<&HeadlessMarker> {
        self.markers.get(&handle)
    }

    pub fn center(&self) -> LatLng {
        self.center
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    pub fn container(&self) -> &Container {
        &self.container
    }

    /// Optionen, mit denen die Karte erzeugt wurde.
    pub fn options(&self) -> &SurfaceOptions {
        &self.options
    }

    pub fn subscriptions(&self) -> &[SurfaceEventKind] {
        &self.subscriptions
    }

    /// Aktuell geöffnetes Popup.
    pub fn open_popup_marker(&self) -> Option<MarkerHandle> {
        self.open_popup
    }

    /// Ob `remove` aufgerufen wurde.
    pub fn is_removed(&self) -> bool {
        self.removed
    }

    fn known(&self, marker: MarkerHandle) -> Result<&HeadlessMarker, SurfaceError> {
        self.markers
            .get(&marker)
            .ok_or(SurfaceError::UnknownMarker(marker))
    }
}

impl MarkerFactory for HeadlessSurface {
    fn create_marker(
        &mut self,
        coord: LatLng,
        icon: &MarkerIcon,
    ) -> Result<MarkerHandle, SurfaceError> {
        if !coord.is_valid() {
            return Err(SurfaceError::InvalidCoordinate {
                lat: coord.lat,
                lng: coord.lng,
            });
        }
        let handle = MarkerHandle(self.next_handle);
        self.next_handle += 1;
        self.markers.insert(
            handle,
            HeadlessMarker {
                coord,
                icon: *icon,
                popup: None,
                clustered: false,
            },
        );
        self.calls.push(SurfaceCall::CreateMarker(handle));
        Ok(handle)
    }

    fn bind_popup(
        &mut self,
        marker: MarkerHandle,
        content: PopupContent,
        _options: &PopupOptions,
    ) -> Result<(), SurfaceError> {
        let entry = self
            .markers
            .get_mut(&marker)
            .ok_or(SurfaceError::UnknownMarker(marker))?;
        entry.popup = Some(content);
        self.calls.push(SurfaceCall::BindPopup(marker));
        Ok(())
    }
}

impl ClusterLayer for HeadlessSurface {
    fn add_layer(&mut self, marker: MarkerHandle) -> Result<(), SurfaceError> {
        let entry = self
            .markers
            .get_mut(&marker)
            .ok_or(SurfaceError::UnknownMarker(marker))?;
        entry.clustered = true;
        self.calls.push(SurfaceCall::AddLayer(marker));
        Ok(())
    }

    fn clear_layers(&mut self) {
        self.markers.clear();
        self.open_popup = None;
        self.calls.push(SurfaceCall::ClearLayers);
    }

    fn zoom_to_show_layer(&mut self, marker: MarkerHandle) -> Result<RevealStatus, SurfaceError> {
        let coord = self.known(marker)?.coord;
        self.calls.push(SurfaceCall::ZoomToShowLayer(marker));
        self.center = coord;
        Ok(match self.reveal_mode {
            RevealMode::Immediate => RevealStatus::Revealed,
            RevealMode::Deferred => RevealStatus::Pending,
        })
    }

    fn open_popup(&mut self, marker: MarkerHandle) -> Result<(), SurfaceError> {
        self.known(marker)?;
        self.open_popup = Some(marker);
        self.calls.push(SurfaceCall::OpenPopup(marker));
        Ok(())
    }
}

impl MapSurface for HeadlessSurface {
    fn set_view(&mut self, center: LatLng, zoom: u8) -> Result<(), SurfaceError> {
        if !center.is_valid() {
            return Err(SurfaceError::InvalidCoordinate {
                lat: center.lat,
                lng: center.lng,
            });
        }
        self.center = center;
        self.zoom = zoom;
        self.calls.push(SurfaceCall::SetView { center, zoom });
        Ok(())
    }

    fn invalidate_size(&mut self) {
        self.calls.push(SurfaceCall::InvalidateSize);
    }

    fn remove(&mut self) {
        self.markers.clear();
        self.subscriptions.clear();
        self.open_popup = None;
        self.removed = true;
        self.calls.push(SurfaceCall::Remove);
    }

    fn project(&self, coord: LatLng) -> DVec2 {
        geo::project(coord, f64::from(self.zoom))
    }

    fn unproject(&self, px: DVec2) -> LatLng {
        geo::unproject(px, f64::from(self.zoom))
    }

    fn pan_to(&mut self, center: LatLng, animate: bool) {
        self.center = center;
        self.calls.push(SurfaceCall::PanTo { center, animate });
    }

    fn subscribe(&mut self, events: &[SurfaceEventKind]) {
        self.subscriptions.extend_from_slice(events);
        self.calls.push(SurfaceCall::Subscribe(events.to_vec()));
    }

    fn scroll_wheel_zoom(&self) -> bool {
        self.scroll_wheel_zoom
    }

    fn set_scroll_wheel_zoom(&mut self, enabled: bool) {
        self.scroll_wheel_zoom = enabled;
        self.calls.push(SurfaceCall::SetScrollWheelZoom(enabled));
    }
}
