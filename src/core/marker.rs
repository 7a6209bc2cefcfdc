//! Marker-Icons und Marker-Einträge.

use super::item::Item;
use super::tiles::Background;
use crate::surface::MarkerHandle;
use std::sync::Arc;

/// Icon-Variante eines Markers. Hängt ausschließlich am `featured`-Flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IconVariant {
    /// Normales Item
    #[default]
    Default,
    /// Hervorgehobenes Item (Stern)
    Featured,
}

impl IconVariant {
    /// Wählt die Variante für ein Item.
    pub fn for_item(item: &Item) -> Self {
        if item.featured {
            Self::Featured
        } else {
            Self::Default
        }
    }

    /// CSS-Klasse des Icons
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Default => "default-marker-icon",
            Self::Featured => "featured-marker-icon",
        }
    }

    /// Symbol-ID im Icon-Sprite
    pub fn symbol_id(self) -> &'static str {
        match self {
            Self::Default => "icon-marker",
            Self::Featured => "icon-marker-star",
        }
    }
}

/// Farbe des Icons, invers zum Karten-Hintergrund.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconTint {
    Dark,
    Light,
}

impl IconTint {
    /// Heller Hintergrund → dunkles Icon, sonst helles Icon.
    pub fn for_background(background: Background) -> Self {
        if background == Background::Light {
            Self::Dark
        } else {
            Self::Light
        }
    }
}

/// Vollständige Icon-Beschreibung für die Marker-Fabrik.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerIcon {
    pub variant: IconVariant,
    pub tint: IconTint,
    /// Icon-Größe in Pixeln
    pub size: [f32; 2],
    /// Ankerpunkt relativ zur oberen linken Ecke
    pub anchor: [f32; 2],
    /// Popup-Anker relativ zum Icon-Anker
    pub popup_anchor: [f32; 2],
}

/// Ein Item zusammen mit seinem lebenden Marker.
#[derive(Debug, Clone)]
pub struct MarkerEntry {
    pub item: Arc<Item>,
    pub marker: MarkerHandle,
}

impl MarkerEntry {
    /// ID des zugehörigen Items
    pub fn id(&self) -> &str {
        &self.item.id
    }
}
