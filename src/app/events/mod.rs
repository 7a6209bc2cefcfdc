//! Lifecycle-Signale und deren Ergebnisse.

mod outcome;
mod signal;

pub use outcome::{RenderMode, SignalOutcome};
pub use signal::{LifecycleSignal, SignalKind};
