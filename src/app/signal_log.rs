//! Verlauf der dispatchten Signale mit ihrem Ergebnis.
//!
//! Jeder Eintrag hält Signal-Art und Ergebnis, damit sich z.B. die Folge
//! `Created → RefreshScheduled → IdleRan` einer Widget-Instanz nachvollziehen lässt.

use super::events::{RenderMode, SignalKind, SignalOutcome};
use super::WidgetError;
use std::collections::VecDeque;

/// Maximale Anzahl gehaltener Einträge; ältere fallen vorne heraus.
pub const SIGNAL_HISTORY_CAPACITY: usize = 256;

/// Verdichtetes Ergebnis eines Signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalResult {
    Rendered(RenderMode),
    Skipped,
    Selected,
    IdleRan(usize),
    Done,
    /// Signal mit Fehler beendet
    Failed,
}

impl SignalResult {
    fn from_outcome(result: &Result<SignalOutcome, WidgetError>) -> Self {
        match result {
            Ok(SignalOutcome::Rendered { mode, .. }) => Self::Rendered(*mode),
            Ok(SignalOutcome::Skipped) => Self::Skipped,
            Ok(SignalOutcome::Selected { .. }) => Self::Selected,
            Ok(SignalOutcome::IdleRan { tasks }) => Self::IdleRan(*tasks),
            Ok(SignalOutcome::Done) => Self::Done,
            Err(_) => Self::Failed,
        }
    }
}

/// Ein Eintrag im Signal-Verlauf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignalRecord {
    pub kind: SignalKind,
    pub result: SignalResult,
}

#[derive(Debug, Default)]
pub struct SignalLog {
    records: VecDeque<SignalRecord>,
    /// Gesamtzahl aller je aufgezeichneten Signale (auch verdrängter)
    total: u64,
}

impl SignalLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hält Signal und Ergebnis fest.
    pub fn record(&mut self, kind: SignalKind, result: &Result<SignalOutcome, WidgetError>) {
        if self.records.len() == SIGNAL_HISTORY_CAPACITY {
            self.records.pop_front();
        }
        self.records.push_back(SignalRecord {
            kind,
            result: SignalResult::from_outcome(result),
        });
        self.total += 1;
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn last(&self) -> Option<&SignalRecord> {
        self.records.back()
    }

    pub fn records(&self) -> impl Iterator<Item = &SignalRecord> {
        self.records.iter()
    }

    /// Nur die Signal-Arten, in Reihenfolge.
    pub fn kinds(&self) -> Vec<SignalKind> {
        self.records.iter().map(|r| r.kind).collect()
    }

    /// Render-Modi aller Render-/Update-Signale, die tatsächlich gerendert haben.
    pub fn render_modes(&self) -> Vec<RenderMode> {
        self.records
            .iter()
            .filter_map(|r| match r.result {
                SignalResult::Rendered(mode) => Some(mode),
                _ => None,
            })
            .collect()
    }

    /// Anzahl fehlgeschlagener Signale im gehaltenen Verlauf.
    pub fn failures(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.result == SignalResult::Failed)
            .count()
    }
}
