//! Kachel-Quelle und Attribution der Karte.

use serde::{Deserialize, Serialize};

/// Minimaler Zoom des Kachel-Layers.
pub const TILE_MIN_ZOOM: u8 = 0;
/// Maximaler Zoom des Kachel-Layers.
pub const TILE_MAX_ZOOM: u8 = 20;

const MAPBOX_FEEDBACK_URL: &str = "https://www.mapbox.com/map-feedback/";
const OSM_COPYRIGHT_URL: &str = "https://www.openstreetmap.org/copyright";

/// Mapbox-Stilvariante des Karten-Hintergrunds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Background {
    #[default]
    Light,
    Dark,
    Streets,
    Outdoors,
    Satellite,
}

impl Background {
    /// Name des Mapbox-Stils
    pub fn style_name(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::Streets => "streets",
            Self::Outdoors => "outdoors",
            Self::Satellite => "satellite",
        }
    }
}

/// Kachel-Layer: URL-Template mit `{z}`, `{x}`, `{y}` plus Attribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileLayer {
    pub url_template: String,
    pub attribution: String,
    pub min_zoom: u8,
    pub max_zoom: u8,
    /// Eigene Kacheln statt Mapbox
    pub custom: bool,
}

impl TileLayer {
    /// Löst Kachel-URL und Attribution auf.
    ///
    /// Ohne eigene Kacheln wird der Mapbox-Stil des Hintergrunds verwendet und
    /// die Attribution um den Mapbox-Feedback-Link ergänzt.
    pub fn resolve(
        background: Background,
        access_token: &str,
        tiles: Option<&str>,
        tiles_attribution: Option<&str>,
    ) -> Self {
        let custom = tiles.is_some();
        let url_template = match tiles {
            Some(url) => url.to_string(),
            None => Self::mapbox_url(background, access_token),
        };
        let base_attribution = match tiles_attribution {
            Some(text) => text.to_string(),
            None => format!("© <a href=\"{MAPBOX_FEEDBACK_URL}\">Mapbox</a>"),
        };

        let mut attribution = format!(
            "{base_attribution} © <a href=\"{OSM_COPYRIGHT_URL}\">OpenStreetMap</a>"
        );
        if !custom {
            attribution.push_str(&format!(
                " <strong><a href=\"{MAPBOX_FEEDBACK_URL}\" target=\"_blank\" \
                 rel=\"noopener noreferrer\">Improve this map</a></strong>"
            ));
        }

        Self {
            url_template,
            attribution,
            min_zoom: TILE_MIN_ZOOM,
            max_zoom: TILE_MAX_ZOOM,
            custom,
        }
    }

    /// Standard-Kachel-URL von Mapbox für einen Hintergrund.
    pub fn mapbox_url(background: Background, access_token: &str) -> String {
        format!(
            "https://api.mapbox.com/styles/v1/mapbox/{}-v9/tiles/256/{{z}}/{{x}}/{{y}}?access_token={}",
            background.style_name(),
            access_token
        )
    }

    /// Setzt den Zoom-Bereich (Builder).
    pub fn with_zoom_range(mut self, min_zoom: u8, max_zoom: u8) -> Self {
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom.max(min_zoom);
        self
    }

    /// Konkrete URL einer Kachel.
    pub fn tile_url(&self, z: u8, x: u32, y: u32) -> String {
        self.url_template
            .replace("{z}", &z.to_string())
            .replace("{x}", &x.to_string())
            .replace("{y}", &y.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tiles_use_mapbox_style_and_token() {
        let layer = TileLayer::resolve(Background::Dark, "tok", None, None);
        assert_eq!(
            layer.url_template,
            "https://api.mapbox.com/styles/v1/mapbox/dark-v9/tiles/256/{z}/{x}/{y}?access_token=tok"
        );
        assert!(!layer.custom);
        assert!(layer.attribution.contains("Improve this map"));
        assert!(layer.attribution.contains("OpenStreetMap"));
    }

    #[test]
    fn test_custom_tiles_drop_mapbox_feedback() {
        let layer = TileLayer::resolve(
            Background::Light,
            "",
            Some("https://tile.openstreetmap.org/{z}/{x}/{y}.png"),
            Some("Eigene Kacheln"),
        );
        assert!(layer.custom);
        assert!(layer.attribution.starts_with("Eigene Kacheln"));
        assert!(!layer.attribution.contains("Improve this map"));
        assert_eq!(layer.tile_url(3, 4, 5), "https://tile.openstreetmap.org/3/4/5.png");
    }

    #[test]
    fn test_zoom_range_defaults_and_override() {
        let layer = TileLayer::resolve(Background::Light, "", None, None);
        assert_eq!((layer.min_zoom, layer.max_zoom), (0, 20));

        let layer = layer.with_zoom_range(5, 3);
        assert_eq!((layer.min_zoom, layer.max_zoom), (5, 5));
    }

    #[test]
    fn test_background_deserializes_lowercase() {
        let bg: Background = serde_json::from_str("\"streets\"").expect("Stil sollte parsen");
        assert_eq!(bg, Background::Streets);
    }
}
