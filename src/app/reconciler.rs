//! Abgleich von Item-Listen mit der Marker-Menge.
//!
//! Gleichheit ist flach: zwei Listen sind gleich, wenn sie gleich lang
//! sind und an jedem Index dasselbe `Arc` steht. Ein neu allokiertes Item mit
//! identischem Inhalt zählt als Änderung. Bei jeder Änderung wird die
//! Marker-Menge komplett neu aufgebaut, ohne inkrementellen Diff.

use super::state::MountedMap;
use super::WidgetProps;
use crate::core::{Background, IconVariant, Item};
use crate::shared::WidgetOptions;
use crate::surface::{ClusterLayer, MarkerFactory, SurfaceError};
use std::collections::HashSet;
use std::sync::Arc;

/// Flacher Vergleich zweier Item-Listen (Referenzgleichheit je Index).
pub fn items_shallow_equal(a: &[Arc<Item>], b: &[Arc<Item>]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| Arc::ptr_eq(x, y))
}

/// Ob neue Props ein erneutes Rendern erfordern.
///
/// `true` bei geändertem Breiten- oder Längengrad oder nicht flach gleicher
/// Item-Liste. Zoom- und Kachel-Änderungen allein lösen kein Rendern aus.
pub fn should_update(prev: &WidgetProps, next: &WidgetProps) -> bool {
    prev.coords.lat != next.coords.lat
        || prev.coords.lng != next.coords.lng
        || !items_shallow_equal(&prev.items, &next.items)
}

/// Icon-Variante eines Items.
pub fn icon_for(item: &Item) -> IconVariant {
    IconVariant::for_item(item)
}

/// Baut die Marker-Menge aus `items` komplett neu auf.
///
/// Schlägt ein Kollaborateur-Aufruf fehl, wird die Menge geleert und der
/// Fehler unverändert zurückgegeben. Gibt die Anzahl der Marker zurück.
pub fn rebuild<S>(
    map: &mut MountedMap<S>,
    items: &[Arc<Item>],
    background: Background,
    options: &WidgetOptions,
) -> Result<usize, SurfaceError>
where
    S: MarkerFactory + ClusterLayer,
{
    map.markers.clear(&mut map.surface);

    let default_icon = options.marker_icon(IconVariant::Default, background);
    let featured_icon = options.marker_icon(IconVariant::Featured, background);
    let popup = options.popup_options();

    let mut seen: HashSet<&str> = HashSet::with_capacity(items.len());
    for item in items {
        if !seen.insert(item.id.as_str()) {
            log::warn!("Doppelte Item-ID in Item-Liste: {}", item.id);
        }

        let icon = match icon_for(item) {
            IconVariant::Featured => &featured_icon,
            IconVariant::Default => &default_icon,
        };
        let added = map
            .markers
            .add(&mut map.surface, Arc::clone(item), icon, &popup)
            .map(|_| ());
        if let Err(e) = added {
            log::warn!("Marker für Item {} fehlgeschlagen: {}", item.id, e);
            map.markers.clear(&mut map.surface);
            return Err(e);
        }
    }

    log::debug!("Marker neu aufgebaut: {}", map.markers.len());
    Ok(map.markers.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LatLng;
    use crate::surface::headless::HeadlessSurface;
    use crate::surface::{Container, SurfaceOptions};

    fn item(id: &str, featured: bool) -> Arc<Item> {
        Arc::new(Item::new(id, LatLng::new(50.85, 4.35), featured))
    }

    fn mounted() -> MountedMap<HeadlessSurface> {
        let center = LatLng::new(50.85, 4.35);
        let surface = HeadlessSurface::new(Container::map(), SurfaceOptions::at(center, 15));
        MountedMap::new(surface, center, 15)
    }

    #[test]
    fn test_same_arcs_are_equal() {
        let a = vec![item("1", false), item("2", true)];
        let b = a.clone();
        assert!(items_shallow_equal(&a, &b));
    }

    #[test]
    fn test_fresh_identical_item_is_a_change() {
        let a = vec![item("1", false)];
        let b = vec![item("1", false)];
        assert_eq!(a[0], b[0]);
        assert!(!items_shallow_equal(&a, &b));
    }

    #[test]
    fn test_different_length_is_a_change() {
        let shared = item("1", false);
        let a = vec![Arc::clone(&shared)];
        let b = vec![Arc::clone(&shared), Arc::clone(&shared)];
        assert!(!items_shallow_equal(&a, &b));
        assert!(items_shallow_equal(&[], &[]));
    }

    #[test]
    fn test_should_update_on_coordinate_change_only() {
        let items = vec![item("1", false)];
        let prev = WidgetProps::new(LatLng::new(50.0, 4.0), 15, items.clone());

        let mut same = prev.clone();
        same.zoom = 3;
        assert!(!should_update(&prev, &same));

        let mut lat = prev.clone();
        lat.coords.lat = 51.0;
        assert!(should_update(&prev, &lat));

        let mut lng = prev.clone();
        lng.coords.lng = 5.0;
        assert!(should_update(&prev, &lng));
    }

    #[test]
    fn test_icon_follows_featured_flag() {
        assert_eq!(icon_for(&item("a", true)), IconVariant::Featured);
        assert_eq!(icon_for(&item("b", false)), IconVariant::Default);
    }

    #[test]
    fn test_rebuild_twice_keeps_membership() {
        let mut map = mounted();
        let items = vec![item("a", false), item("b", true), item("c", false)];
        let opts = WidgetOptions::default();

        let first = rebuild(&mut map, &items, Background::Light, &opts).expect("rebuild");
        let first_ids: Vec<String> = map.markers.ids().iter().map(|s| s.to_string()).collect();
        let second = rebuild(&mut map, &items, Background::Light, &opts).expect("rebuild");

        assert_eq!(first, 3);
        assert_eq!(second, 3);
        assert_eq!(map.markers.ids(), first_ids);
        assert_eq!(map.surface.cluster_len(), 3);
    }

    #[test]
    fn test_rebuild_assigns_featured_icon() {
        let mut map = mounted();
        let items = vec![item("a", false), item("b", true)];
        rebuild(&mut map, &items, Background::Light, &WidgetOptions::default()).expect("rebuild");

        let featured = map.markers.find("b").expect("b sollte existieren").marker;
        let plain = map.markers.find("a").expect("a sollte existieren").marker;
        let surface = &map.surface;
        assert_eq!(
            surface.marker(featured).map(|m| m.icon.variant),
            Some(IconVariant::Featured)
        );
        assert_eq!(surface.marker(plain).map(|m| m.icon.variant), Some(IconVariant::Default));
    }

    #[test]
    fn test_rebuild_failure_leaves_empty_set() {
        let mut map = mounted();
        let bad = Arc::new(Item::new("bad", LatLng::new(f64::NAN, 0.0), false));
        let items = vec![item("a", false), bad];

        let err = rebuild(&mut map, &items, Background::Light, &WidgetOptions::default())
            .expect_err("ungültige Koordinate sollte scheitern");

        assert!(matches!(err, SurfaceError::InvalidCoordinate { .. }));
        assert!(map.markers.is_empty());
        assert_eq!(map.surface.cluster_len(), 0);
    }
}
