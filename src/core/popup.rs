//! Popup-Inhalt und Popup-Optionen.

use super::item::Item;

/// Darzustellender Popup-Inhalt eines Markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupContent {
    /// Externer Link
    pub url: String,
    pub title: String,
    /// Bild-URL des Titelbilds
    pub cover_src: String,
    /// Formatierte Anschrift
    pub address_line: String,
}

impl PopupContent {
    /// Baut den Popup-Inhalt aus einem Item.
    pub fn from_item(item: &Item) -> Self {
        Self {
            url: item.url.clone(),
            title: item.title.clone(),
            cover_src: item.cover.src.clone(),
            address_line: item.address_line(),
        }
    }
}

/// Darstellungsoptionen des Popups.
#[derive(Debug, Clone, PartialEq)]
pub struct PopupOptions {
    /// Maximale Breite in Pixeln
    pub max_width: f32,
    /// CSS-Klasse
    pub class_name: String,
}

impl Default for PopupOptions {
    fn default() -> Self {
        Self {
            max_width: 240.0,
            class_name: "custom".to_string(),
        }
    }
}
