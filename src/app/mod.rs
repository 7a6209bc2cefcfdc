//! Application-Layer: Controller, Lifecycle-State, Signale, Abgleich und Selektion.

pub mod controller;
mod error;
pub mod events;
pub mod handlers;
pub mod idle;
pub mod marker_set;
/// Props-Snapshot des Aufrufers
pub mod props;
pub mod reconciler;
pub mod selector;
pub mod signal_log;
/// Widget-Zustand
///
/// Dieses Modul verwaltet den Zustand einer Widget-Instanz (Karte, Marker, Props).
pub mod state;

pub use controller::WidgetController;
pub use error::WidgetError;
pub use events::{LifecycleSignal, RenderMode, SignalKind, SignalOutcome};
pub use idle::{DeferredTask, IdleQueue};
pub use marker_set::MarkerSet;
pub use props::{MapboxOptions, WidgetProps};
pub use signal_log::{SignalLog, SignalRecord, SignalResult};
pub use state::{Lifecycle, MountedMap, WidgetState};
