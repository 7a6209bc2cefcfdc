//! egui-basierte Karte: implementiert alle Kollaborateur-Traits für den Demo-Host.
//!
//! Projektion ist Web-Mercator, Clustering ein Pixel-Raster beim aktuellen Zoom.
//! Events landen in einer Queue, die der Host pro Frame mit
//! [`EguiSurface::take_events`] abholt und an den Controller weiterreicht.

use crate::core::{geo, LatLng, MarkerIcon, PopupContent, PopupOptions};
use crate::shared::CLUSTER_RADIUS_PX;
use crate::surface::{
    ClusterLayer, Container, MapSurface, MarkerFactory, MarkerHandle, RenderBackend,
    RevealStatus, SurfaceError, SurfaceEvent, SurfaceEventKind, SurfaceOptions,
};
use glam::DVec2;
use indexmap::IndexMap;
use std::collections::HashSet;

/// Zoom-Geschwindigkeit der Reveal-Animation (Stufen pro Sekunde).
const REVEAL_ZOOM_SPEED: f64 = 6.0;
/// Höhe eines Popups ohne Titelbild.
const POPUP_TEXT_HEIGHT: f64 = 64.0;
/// Zusätzliche Höhe für das Titelbild.
const POPUP_COVER_HEIGHT: f64 = 110.0;

/// Backend für [`EguiSurface`]. Ein egui-Fenster ist immer vorhanden.
#[derive(Debug, Clone)]
pub struct EguiBackend {
    cluster_radius_px: f32,
}

impl EguiBackend {
    /// Erstellt ein Backend mit gegebenem Cluster-Radius.
    pub fn new(cluster_radius_px: f32) -> Self {
        Self { cluster_radius_px }
    }
}

impl Default for EguiBackend {
    fn default() -> Self {
        Self::new(CLUSTER_RADIUS_PX)
    }
}

impl RenderBackend for EguiBackend {
    type Surface = EguiSurface;

    fn has_window(&self) -> bool {
        true
    }

    fn create_surface(
        &mut self,
        container: &Container,
        options: &SurfaceOptions,
    ) -> Result<EguiSurface, SurfaceError> {
        if !options.center.is_valid() {
            return Err(SurfaceError::InvalidCoordinate {
                lat: options.center.lat,
                lng: options.center.lng,
            });
        }
        log::info!(
            "egui-Karte in `{}` erzeugt, Kacheln: {}",
            container.id,
            options.tile_layer.url_template
        );
        Ok(EguiSurface::new(options.clone(), self.cluster_radius_px))
    }
}

/// Ein Marker der egui-Karte.
#[derive(Debug, Clone)]
pub struct EguiMarker {
    pub coord: LatLng,
    pub icon: MarkerIcon,
    pub popup: Option<(PopupContent, PopupOptions)>,
    pub clustered: bool,
}

/// Gruppe von Markern, die beim aktuellen Zoom zusammenfallen.
#[derive(Debug, Clone)]
pub struct Cluster {
    /// Schwerpunkt in Welt-Pixeln beim aktuellen Zoom
    pub center_px: DVec2,
    pub members: Vec<MarkerHandle>,
}

impl Cluster {
    /// Ein einzelner, sichtbarer Marker
    pub fn is_single(&self) -> bool {
        self.members.len() == 1
    }
}

#[derive(Debug, Clone, Copy)]
struct RevealAnimation {
    marker: MarkerHandle,
    target_zoom: f64,
}

/// Karte mit Viewport, Markern, Clustern und Popup.
#[derive(Debug)]
pub struct EguiSurface {
    options: SurfaceOptions,
    center: LatLng,
    zoom: f64,
    /// Zuletzt übernommene Viewport-Größe (veraltet, bis `invalidate_size` läuft)
    size: egui::Vec2,
    /// Tatsächliche Größe laut letztem Frame
    observed_rect: egui::Rect,
    markers: IndexMap<MarkerHandle, EguiMarker>,
    next_handle: u64,
    subscriptions: HashSet<SurfaceEventKind>,
    events: Vec<SurfaceEvent>,
    scroll_wheel_zoom: bool,
    open_popup: Option<MarkerHandle>,
    reveal: Option<RevealAnimation>,
    cluster_radius_px: f64,
    removed: bool,
}

impl EguiSurface {
    /// Erzeugt eine Karte aus Optionen.
    pub fn new(options: SurfaceOptions, cluster_radius_px: f32) -> Self {
        Self {
            center: options.center,
            zoom: f64::from(options.zoom),
            scroll_wheel_zoom: options.scroll_wheel_zoom,
            options,
            size: egui::Vec2::ZERO,
            observed_rect: egui::Rect::NOTHING,
            markers: IndexMap::new(),
            next_handle: 1,
            subscriptions: HashSet::new(),
            events: Vec::new(),
            open_popup: None,
            reveal: None,
            cluster_radius_px: f64::from(cluster_radius_px.max(1.0)),
            removed: false,
        }
    }

    // ── Zugriff für Rendering ────────────────────────────────────

    pub fn options(&self) -> &SurfaceOptions {
        &self.options
    }

    pub fn center(&self) -> LatLng {
        self.center
    }

    /// Kontinuierlicher Zoom
    pub fn zoom_level(&self) -> f64 {
        self.zoom
    }

    /// Übernommene Viewport-Größe
    pub fn size(&self) -> egui::Vec2 {
        self.size
    }

    pub fn marker(&self, handle: MarkerHandle) -> Option<&EguiMarker> {
        self.markers.get(&handle)
    }

    pub fn open_popup_marker(&self) -> Option<MarkerHandle> {
        self.open_popup
    }

    pub fn is_removed(&self) -> bool {
        self.removed
    }

    /// Ob eine Reveal-Animation läuft (Host fordert dann Repaints an).
    pub fn is_animating(&self) -> bool {
        self.reveal.is_some()
    }

    /// Holt alle seit dem letzten Aufruf angefallenen Events ab.
    pub fn take_events(&mut self) -> Vec<SurfaceEvent> {
        std::mem::take(&mut self.events)
    }

    // ── Viewport ─────────────────────────────────────────────────

    /// Meldet die im aktuellen Frame belegte Fläche.
    /// Gibt `true` zurück, wenn sie von der übernommenen Größe abweicht.
    pub fn observe_viewport(&mut self, rect: egui::Rect) -> bool {
        self.observed_rect = rect;
        (rect.size() - self.size).length() > 0.5
    }

    /// Bildschirm-Mittelpunkt gemäß übernommener Größe.
    fn screen_center(&self) -> egui::Pos2 {
        self.observed_rect.min + self.size / 2.0
    }

    /// Geo → Bildschirm.
    pub fn geo_to_screen(&self, coord: LatLng) -> egui::Pos2 {
        self.world_to_screen(geo::project(coord, self.zoom))
    }

    /// Welt-Pixel (aktueller Zoom) → Bildschirm.
    pub fn world_to_screen(&self, px: DVec2) -> egui::Pos2 {
        let delta = px - geo::project(self.center, self.zoom);
        self.screen_center() + egui::vec2(delta.x as f32, delta.y as f32)
    }

    /// Bildschirm → Geo.
    pub fn screen_to_geo(&self, pos: egui::Pos2) -> LatLng {
        let offset = pos - self.screen_center();
        let px = geo::project(self.center, self.zoom)
            + DVec2::new(f64::from(offset.x), f64::from(offset.y));
        geo::unproject(px, self.zoom)
    }

    /// Verschiebt die Karte um ein Bildschirm-Delta (Drag).
    pub fn pan_by_pixels(&mut self, delta: egui::Vec2) {
        let px = geo::project(self.center, self.zoom)
            - DVec2::new(f64::from(delta.x), f64::from(delta.y));
        self.center = geo::unproject(px, self.zoom);
    }

    /// Zoomt um `delta` Stufen; der Punkt unter `focus` bleibt stehen.
    pub fn zoom_around(&mut self, delta: f64, focus: egui::Pos2) {
        let focus_geo = self.screen_to_geo(focus);
        let offset = focus - self.screen_center();
        self.zoom = self.clamp_zoom(self.zoom + delta);
        let px = geo::project(focus_geo, self.zoom)
            - DVec2::new(f64::from(offset.x), f64::from(offset.y));
        self.center = geo::unproject(px, self.zoom);
    }

    fn clamp_zoom(&self, zoom: f64) -> f64 {
        let layer = &self.options.tile_layer;
        zoom.clamp(f64::from(layer.min_zoom), f64::from(layer.max_zoom))
    }

    // ── Clustering ───────────────────────────────────────────────

    /// Cluster beim aktuellen Zoom.
    pub fn clusters(&self) -> Vec<Cluster> {
        self.clusters_at(self.zoom)
    }

    fn clusters_at(&self, zoom: f64) -> Vec<Cluster> {
        let mut cells: IndexMap<(i64, i64), Vec<(MarkerHandle, DVec2)>> = IndexMap::new();
        for (handle, marker) in self.markers.iter().filter(|(_, m)| m.clustered) {
            let px = geo::project(marker.coord, zoom);
            let cell = (
                (px.x / self.cluster_radius_px).floor() as i64,
                (px.y / self.cluster_radius_px).floor() as i64,
            );
            cells.entry(cell).or_default().push((*handle, px));
        }

        cells
            .into_values()
            .map(|members| {
                let sum = members.iter().fold(DVec2::ZERO, |acc, (_, px)| acc + *px);
                Cluster {
                    center_px: sum / members.len() as f64,
                    members: members.into_iter().map(|(handle, _)| handle).collect(),
                }
            })
            .collect()
    }

    /// Kleinster Zoom ≥ aktuellem Zoom, bei dem der Marker einzeln steht.
    fn reveal_zoom(&self, marker: MarkerHandle) -> f64 {
        let max_zoom = f64::from(self.options.tile_layer.max_zoom);
        let mut zoom = self.zoom;
        while zoom < max_zoom {
            let alone = self
                .clusters_at(zoom)
                .iter()
                .any(|c| c.is_single() && c.members[0] == marker);
            if alone {
                return zoom;
            }
            zoom = (zoom.floor() + 1.0).min(max_zoom);
        }
        max_zoom
    }

    /// Treibt die Reveal-Animation voran.
    pub fn tick(&mut self, dt: f64) {
        let Some(animation) = self.reveal else {
            return;
        };
        let step = REVEAL_ZOOM_SPEED * dt.max(0.0);
        let remaining = animation.target_zoom - self.zoom;
        if remaining.abs() <= step {
            self.zoom = animation.target_zoom;
            self.reveal = None;
            if self.markers.contains_key(&animation.marker) {
                self.emit(SurfaceEvent::RevealComplete {
                    marker: animation.marker,
                });
            }
        } else {
            self.zoom += step.copysign(remaining);
        }
    }

    // ── Interaktion ──────────────────────────────────────────────

    /// Klick auf einen Cluster: eine Stufe hineinzoomen, zentriert auf den Cluster.
    pub fn expand_cluster(&mut self, cluster: &Cluster) {
        self.center = geo::unproject(cluster.center_px, self.zoom);
        self.zoom = self.clamp_zoom(self.zoom.floor() + 1.0);
    }

    /// Schließt ein offenes Popup.
    pub fn close_popup(&mut self) {
        self.open_popup = None;
    }

    /// Leitet ein Host-Event (Klick, Fokus, Zoom Home) an die Subscription weiter.
    pub fn emit(&mut self, event: SurfaceEvent) {
        if self.subscriptions.contains(&event.kind()) {
            self.events.push(event);
        }
    }

    /// Geschätzte gerenderte Popup-Höhe.
    pub fn popup_height(content: &PopupContent) -> f64 {
        if content.cover_src.is_empty() {
            POPUP_TEXT_HEIGHT
        } else {
            POPUP_TEXT_HEIGHT + POPUP_COVER_HEIGHT
        }
    }

    fn invalid(coord: LatLng) -> SurfaceError {
        SurfaceError::InvalidCoordinate {
            lat: coord.lat,
            lng: coord.lng,
        }
    }
}

impl MarkerFactory for EguiSurface {
    fn create_marker(
        &mut self,
        coord: LatLng,
        icon: &MarkerIcon,
    ) -> Result<MarkerHandle, SurfaceError> {
        if !coord.is_valid() {
            return Err(Self::invalid(coord));
        }
        let handle = MarkerHandle(self.next_handle);
        self.next_handle += 1;
        self.markers.insert(
            handle,
            EguiMarker {
                coord,
                icon: *icon,
                popup: None,
                clustered: false,
            },
        );
        Ok(handle)
    }

    fn bind_popup(
        &mut self,
        marker: MarkerHandle,
        content: PopupContent,
        options: &PopupOptions,
    ) -> Result<(), SurfaceError> {
        let entry = self
            .markers
            .get_mut(&marker)
            .ok_or(SurfaceError::UnknownMarker(marker))?;
        entry.popup = Some((content, options.clone()));
        Ok(())
    }
}

impl ClusterLayer for EguiSurface {
    fn add_layer(&mut self, marker: MarkerHandle) -> Result<(), SurfaceError> {
        let entry = self
            .markers
            .get_mut(&marker)
            .ok_or(SurfaceError::UnknownMarker(marker))?;
        entry.clustered = true;
        Ok(())
    }

    fn clear_layers(&mut self) {
        self.markers.clear();
        self.open_popup = None;
        self.reveal = None;
    }

    fn zoom_to_show_layer(&mut self, marker: MarkerHandle) -> Result<RevealStatus, SurfaceError> {
        let coord = self
            .markers
            .get(&marker)
            .ok_or(SurfaceError::UnknownMarker(marker))?
            .coord;
        let target_zoom = self.reveal_zoom(marker);
        self.center = coord;

        if (target_zoom - self.zoom).abs() < f64::EPSILON {
            return Ok(RevealStatus::Revealed);
        }
        self.reveal = Some(RevealAnimation {
            marker,
            target_zoom,
        });
        Ok(RevealStatus::Pending)
    }

    fn open_popup(&mut self, marker: MarkerHandle) -> Result<(), SurfaceError> {
        let entry = self
            .markers
            .get(&marker)
            .ok_or(SurfaceError::UnknownMarker(marker))?;
        let height = entry
            .popup
            .as_ref()
            .map_or(POPUP_TEXT_HEIGHT, |(content, _)| Self::popup_height(content));
        let anchor = entry.coord;

        self.open_popup = Some(marker);
        self.emit(SurfaceEvent::PopupOpen {
            marker,
            anchor,
            height,
        });
        Ok(())
    }
}

impl MapSurface for EguiSurface {
    fn set_view(&mut self, center: LatLng, zoom: u8) -> Result<(), SurfaceError> {
        if !center.is_valid() {
            return Err(Self::invalid(center));
        }
        self.center = center;
        self.zoom = self.clamp_zoom(f64::from(zoom));
        self.reveal = None;
        Ok(())
    }

    fn invalidate_size(&mut self) {
        let size = self.observed_rect.size();
        if size.x.is_finite() && size.y.is_finite() && size.x > 0.0 && size.y > 0.0 {
            log::debug!("Viewport-Größe übernommen: {:?}", size);
            self.size = size;
        }
    }

    fn remove(&mut self) {
        self.markers.clear();
        self.subscriptions.clear();
        self.events.clear();
        self.open_popup = None;
        self.reveal = None;
        self.removed = true;
    }

    fn project(&self, coord: LatLng) -> DVec2 {
        geo::project(coord, self.zoom)
    }

    fn unproject(&self, px: DVec2) -> LatLng {
        geo::unproject(px, self.zoom)
    }

    fn pan_to(&mut self, center: LatLng, _animate: bool) {
        self.center = center;
    }

    fn subscribe(&mut self, events: &[SurfaceEventKind]) {
        self.subscriptions.extend(events.iter().copied());
    }

    fn scroll_wheel_zoom(&self) -> bool {
        self.scroll_wheel_zoom
    }

    fn set_scroll_wheel_zoom(&mut self, enabled: bool) {
        self.scroll_wheel_zoom = enabled;
    }
}
