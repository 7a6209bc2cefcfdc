//! Geografische Koordinaten und Web-Mercator-Projektion.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Kachelgröße in Pixeln bei Zoom 0.
pub const TILE_SIZE: f64 = 256.0;
/// Maximaler Breitengrad der Web-Mercator-Projektion.
pub const MAX_LATITUDE: f64 = 85.051_128_779_806_6;

/// Geografische Koordinate (WGS84, Grad).
///
/// Deserialisiert sowohl aus `[lat, lng]` als auch aus `{ "lat": .., "lng": .. }`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "LatLngRepr")]
pub struct LatLng {
    /// Breitengrad
    pub lat: f64,
    /// Längengrad
    pub lng: f64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LatLngRepr {
    Pair([f64; 2]),
    Object { lat: f64, lng: f64 },
}

impl From<LatLngRepr> for LatLng {
    fn from(repr: LatLngRepr) -> Self {
        match repr {
            LatLngRepr::Pair([lat, lng]) => Self { lat, lng },
            LatLngRepr::Object { lat, lng } => Self { lat, lng },
        }
    }
}

impl LatLng {
    /// Erstellt eine neue Koordinate
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Prüft Endlichkeit und Wertebereich.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

impl From<[f64; 2]> for LatLng {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

/// Weltgröße in Pixeln bei gegebenem Zoom.
pub fn world_size(zoom: f64) -> f64 {
    TILE_SIZE * zoom.exp2()
}

/// Projiziert eine Koordinate auf absolute Pixel (Ursprung oben links).
pub fn project(coord: LatLng, zoom: f64) -> DVec2 {
    let size = world_size(zoom);
    let lat = coord.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
    let x = (coord.lng + 180.0) / 360.0 * size;
    let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / std::f64::consts::PI) / 2.0 * size;
    DVec2::new(x, y)
}

/// Umkehrung von [`project`].
pub fn unproject(px: DVec2, zoom: f64) -> LatLng {
    let size = world_size(zoom);
    let lng = px.x / size * 360.0 - 180.0;
    let n = std::f64::consts::PI * (1.0 - 2.0 * px.y / size);
    let lat = n.sinh().atan().to_degrees();
    LatLng::new(lat, lng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_project_origin_is_world_center() {
        let px = project(LatLng::new(0.0, 0.0), 0.0);
        assert_relative_eq!(px.x, 128.0, epsilon = 1e-9);
        assert_relative_eq!(px.y, 128.0, epsilon = 1e-9);
    }

    #[test]
    fn test_unproject_inverts_project() {
        let brussels = LatLng::new(50.850340, 4.351710);
        let px = project(brussels, 15.0);
        let back = unproject(px, 15.0);
        assert_relative_eq!(back.lat, brussels.lat, epsilon = 1e-9);
        assert_relative_eq!(back.lng, brussels.lng, epsilon = 1e-9);
    }

    #[test]
    fn test_zoom_doubles_pixel_distance() {
        let a = project(LatLng::new(10.0, 10.0), 3.0);
        let b = project(LatLng::new(10.0, 10.0), 4.0);
        assert_relative_eq!(b.x, a.x * 2.0, epsilon = 1e-9);
        assert_relative_eq!(b.y, a.y * 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_latitude_is_clamped() {
        let px = project(LatLng::new(90.0, 0.0), 0.0);
        assert!(px.y.is_finite());
        assert_relative_eq!(px.y, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_is_valid() {
        assert!(LatLng::new(50.0, 4.0).is_valid());
        assert!(!LatLng::new(91.0, 4.0).is_valid());
        assert!(!LatLng::new(f64::NAN, 4.0).is_valid());
        assert!(!LatLng::new(0.0, -181.0).is_valid());
    }

    #[test]
    fn test_deserialize_pair_and_object() {
        let pair: LatLng = serde_json::from_str("[50.5, 4.25]").expect("Paar sollte parsen");
        let object: LatLng =
            serde_json::from_str(r#"{"lat": 50.5, "lng": 4.25}"#).expect("Objekt sollte parsen");
        assert_eq!(pair, object);
    }
}
