//! Repräsentiert einen geo-getaggten Eintrag, der als Marker angezeigt wird.
//! Items werden vom Aufrufer geliefert und vom Widget nie verändert.

use super::geo::LatLng;
use serde::{Deserialize, Serialize};

/// Ein vom Aufrufer geliefertes Item mit Position und Anzeige-Metadaten.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Eindeutige Item-ID
    #[serde(rename = "_id")]
    pub id: String,
    /// Anzeigetitel (Popup)
    #[serde(default)]
    pub title: String,
    /// Ziel-URL des Popups
    #[serde(default)]
    pub url: String,
    /// Titelbild
    #[serde(default)]
    pub cover: Cover,
    /// Hervorgehobenes Item (eigene Marker-Variante)
    #[serde(default)]
    pub featured: bool,
    /// Adresse inklusive Geo-Position
    pub address: Address,
}

/// Titelbild eines Items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cover {
    /// Bild-URL
    #[serde(default)]
    pub src: String,
}

/// Postanschrift eines Items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// Straßenname
    #[serde(default)]
    pub street_name: String,
    /// Hausnummer
    #[serde(default)]
    pub street_number: String,
    /// Postleitzahl
    #[serde(default)]
    pub zip: String,
    /// Ort
    #[serde(default)]
    pub city: String,
    /// Geo-Position des Markers
    pub location: LatLng,
}

impl Item {
    /// Erstellt ein Item mit leerer Anschrift an der gegebenen Position.
    pub fn new(id: impl Into<String>, location: LatLng, featured: bool) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            url: String::new(),
            cover: Cover::default(),
            featured,
            address: Address {
                street_name: String::new(),
                street_number: String::new(),
                zip: String::new(),
                city: String::new(),
                location,
            },
        }
    }

    /// Setzt den Titel (Builder).
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Position des Markers.
    pub fn coord(&self) -> LatLng {
        self.address.location
    }

    /// Einzeilige Adresse für das Popup: `Straße, Nr PLZ Ort`.
    pub fn address_line(&self) -> String {
        let a = &self.address;
        format!("{}, {} {} {}", a.street_name, a.street_number, a.zip, a.city)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_item_from_json() {
        let json = r#"{
            "_id": "5a1f",
            "title": "Atelier",
            "url": "https://example.org/atelier",
            "cover": { "src": "https://example.org/a.jpg" },
            "featured": true,
            "address": {
                "streetName": "Rue Haute",
                "streetNumber": "12",
                "zip": "1000",
                "city": "Bruxelles",
                "location": { "lat": 50.84, "lng": 4.35 }
            }
        }"#;

        let item: Item = serde_json::from_str(json).expect("Item sollte parsen");
        assert_eq!(item.id, "5a1f");
        assert!(item.featured);
        assert_eq!(item.coord(), LatLng::new(50.84, 4.35));
        assert_eq!(item.address_line(), "Rue Haute, 12 1000 Bruxelles");
    }

    #[test]
    fn test_featured_defaults_to_false() {
        let json = r#"{ "_id": "x", "address": { "location": [1.0, 2.0] } }"#;
        let item: Item = serde_json::from_str(json).expect("Minimal-Item sollte parsen");
        assert!(!item.featured);
        assert_eq!(item.coord(), LatLng::new(1.0, 2.0));
    }
}
