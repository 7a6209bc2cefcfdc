//! UI-Komponenten des Demo-Hosts: egui-Karte, Item-Liste, Status-Bar.

pub mod item_panel;
pub mod map_view;
pub mod status;
/// Karten-Implementierung auf Basis von egui
pub mod surface;
pub mod visibility;

pub use item_panel::render_item_panel;
pub use map_view::{render_map, MapViewResponse};
pub use status::render_status_bar;
pub use surface::{EguiBackend, EguiSurface};
pub use visibility::MapVisibility;

use crate::core::Item;
use std::sync::Arc;

/// Aktionen, die UI-Komponenten an den Host melden.
#[derive(Debug, Clone)]
pub enum HostAction {
    /// Item aus der Liste gewählt
    SelectItem(Arc<Item>),
    /// Items mit frischen Referenzen neu anbieten
    ReloadItems,
    /// Karte ein-/ausblenden
    SetMapVisible(bool),
    /// Widget einhängen
    Mount,
    /// Widget aushängen
    Unmount,
}
