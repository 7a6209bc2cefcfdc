//! Geteilte Typen für layer-übergreifende Verträge.
//!
//! Enthält die Widget-Optionen, die zwischen `app` und `ui` geteilt werden.

pub mod options;

pub use options::WidgetOptions;
pub use options::{CLUSTER_RADIUS_PX, POPUP_MAX_WIDTH};
