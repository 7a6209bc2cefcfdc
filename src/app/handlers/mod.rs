//! Feature-Handler, an die der Controller Signale dispatcht.

pub mod lifecycle;
pub mod selection;
pub mod surface_events;
