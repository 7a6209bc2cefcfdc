//! Core-Domänentypen: Items, Koordinaten, Marker-Icons, Popups, Kacheln.

pub mod geo;
/// Vom Aufrufer gelieferte Items
pub mod item;
pub mod marker;
pub mod popup;
pub mod tiles;

pub use geo::LatLng;
pub use item::{Address, Cover, Item};
pub use marker::{IconTint, IconVariant, MarkerEntry, MarkerIcon};
pub use popup::{PopupContent, PopupOptions};
pub use tiles::{Background, TileLayer};
