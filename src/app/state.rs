//! Widget-Zustand: zentrale Datenhaltung einer Widget-Instanz.

use super::idle::IdleQueue;
use super::marker_set::MarkerSet;
use super::{SignalLog, WidgetProps};
use crate::core::LatLng;
use crate::shared::WidgetOptions;
use crate::surface::{Container, MarkerHandle};

/// Lebende Karte samt Marker-Menge und Viewport-Parametern.
/// Existiert nur im Zustand `Lifecycle::Mounted`.
#[derive(Debug)]
pub struct MountedMap<S> {
    /// Die Karte
    pub surface: S,
    /// Aktuelle Marker
    pub markers: MarkerSet,
    /// Zuletzt gesetztes Zentrum
    pub center: LatLng,
    /// Zuletzt gesetzter Zoom
    pub zoom: u8,
    /// Erster Fokus wurde bereits behandelt
    pub focus_handled: bool,
}

impl<S> MountedMap<S> {
    /// Frisch erzeugte Karte ohne Marker.
    pub fn new(surface: S, center: LatLng, zoom: u8) -> Self {
        Self {
            surface,
            markers: MarkerSet::new(),
            center,
            zoom,
            focus_handled: false,
        }
    }
}

/// Lifecycle-Zustand: ohne Karte oder mit Karte.
#[derive(Debug)]
pub enum Lifecycle<S> {
    Unmounted,
    Mounted(MountedMap<S>),
}

/// Zustand einer Widget-Instanz.
pub struct WidgetState<S> {
    /// Karte (nur im Zustand Mounted vorhanden)
    pub lifecycle: Lifecycle<S>,
    /// Container-Element (existiert ab dem ersten Render, auch ohne Karte)
    pub container: Option<Container>,
    /// Zuletzt akzeptierte Props
    pub props: WidgetProps,
    /// Marker, dessen Popup nach abgeschlossenem Aufdecken geöffnet wird
    pub pending_reveal: Option<MarkerHandle>,
    /// Aufgeschobene Tasks
    pub idle: IdleQueue,
    /// Verlauf der Signale mit Ergebnis
    pub signal_log: SignalLog,
    /// Darstellungs-Optionen
    pub options: WidgetOptions,
}

impl<S> WidgetState<S> {
    /// Erstellt einen neuen, leeren Zustand
    pub fn new() -> Self {
        Self::with_options(WidgetOptions::default())
    }

    /// Leerer Zustand mit eigenen Optionen
    pub fn with_options(options: WidgetOptions) -> Self {
        Self {
            lifecycle: Lifecycle::Unmounted,
            container: None,
            props: WidgetProps::default(),
            pending_reveal: None,
            idle: IdleQueue::new(),
            signal_log: SignalLog::new(),
            options,
        }
    }

    /// Ob eine Karte existiert.
    pub fn is_mounted(&self) -> bool {
        matches!(self.lifecycle, Lifecycle::Mounted(_))
    }

    /// Die Karte, falls vorhanden.
    pub fn map(&self) -> Option<&MountedMap<S>> {
        match &self.lifecycle {
            Lifecycle::Mounted(map) => Some(map),
            Lifecycle::Unmounted => None,
        }
    }

    /// Die Karte (mutierbar), falls vorhanden.
    pub fn map_mut(&mut self) -> Option<&mut MountedMap<S>> {
        match &mut self.lifecycle {
            Lifecycle::Mounted(map) => Some(map),
            Lifecycle::Unmounted => None,
        }
    }

    /// Anzahl der Marker (0 ohne Karte).
    pub fn marker_count(&self) -> usize {
        self.map().map_or(0, |map| map.markers.len())
    }

    /// Setzt auf den leeren Anfangszustand zurück.
    /// Optionen, Signal-Log und Idle-Queue bleiben erhalten.
    pub(crate) fn reset(&mut self) {
        self.lifecycle = Lifecycle::Unmounted;
        self.container = None;
        self.props.items.clear();
        self.pending_reveal = None;
    }
}

impl<S> Default for WidgetState<S> {
    fn default() -> Self {
        Self::new()
    }
}
