//! Cluster Map Widget Library.
//! Lifecycle-State-Machine und Marker-Abgleich eines einbettbaren Karten-Widgets,
//! als Library exportiert für Tests, Benchmarks und den Demo-Host.

pub mod app;
pub mod core;
pub mod shared;
pub mod surface;
pub mod ui;

pub use app::{
    LifecycleSignal, MarkerSet, RenderMode, SignalOutcome, WidgetController, WidgetError,
    WidgetProps, WidgetState,
};
pub use core::{Background, IconVariant, Item, LatLng, MarkerEntry, TileLayer};
pub use shared::WidgetOptions;
pub use surface::{
    ClusterLayer, Container, MapSurface, MarkerFactory, MarkerHandle, RenderBackend,
    RevealStatus, SurfaceError, SurfaceEvent, SurfaceEventKind,
};
