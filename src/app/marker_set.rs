//! Geordnete Menge der lebenden Marker (Item-ID → Marker-Handle).

use crate::core::{Item, MarkerEntry, MarkerIcon, PopupContent, PopupOptions};
use crate::surface::{ClusterLayer, MarkerFactory, MarkerHandle, SurfaceError};
use std::sync::Arc;

/// Alle aktuell gerenderten Marker in Item-Reihenfolge.
///
/// Die Einträge gehören dem Widget, die Render-Ressourcen hinter den
/// Handles der Karte.
#[derive(Debug, Default)]
pub struct MarkerSet {
    entries: Vec<MarkerEntry>,
}

impl MarkerSet {
    /// Erstellt eine leere Marker-Menge.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Legt Marker + Popup für ein Item an, registriert ihn im Cluster und hängt ihn an.
    pub fn add<S>(
        &mut self,
        surface: &mut S,
        item: Arc<Item>,
        icon: &MarkerIcon,
        popup: &PopupOptions,
    ) -> Result<&MarkerEntry, SurfaceError>
    where
        S: MarkerFactory + ClusterLayer + ?Sized,
    {
        let marker = surface.create_marker(item.coord(), icon)?;
        surface.bind_popup(marker, PopupContent::from_item(&item), popup)?;
        surface.add_layer(marker)?;

        let index = self.entries.len();
        self.entries.push(MarkerEntry { item, marker });
        Ok(&self.entries[index])
    }

    /// Entfernt alle Marker aus dem Cluster und leert die Menge.
    /// Auch auf einer leeren Menge zulässig.
    pub fn clear<C: ClusterLayer + ?Sized>(&mut self, cluster: &mut C) {
        cluster.clear_layers();
        self.entries.clear();
    }

    /// Lineare Suche nach Item-ID.
    pub fn find(&self, id: &str) -> Option<&MarkerEntry> {
        self.entries.iter().find(|entry| entry.item.id == id)
    }

    /// Ob der Handle zur aktuellen Menge gehört.
    pub fn contains_marker(&self, marker: MarkerHandle) -> bool {
        self.entries.iter().any(|entry| entry.marker == marker)
    }

    /// Anzahl der Marker.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Gibt `true` zurück, wenn keine Marker existieren.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iteriert in Item-Reihenfolge.
    pub fn iter(&self) -> impl Iterator<Item = &MarkerEntry> {
        self.entries.iter()
    }

    /// Item-IDs in Reihenfolge.
    pub fn ids(&self) -> Vec<&str> {
        self.entries.iter().map(MarkerEntry::id).collect()
    }
}
