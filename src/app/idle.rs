//! Queue für Arbeit, die erst bei freiem Thread laufen soll.
//!
//! Der Host ruft `LifecycleSignal::Idle`, sobald nichts anderes ansteht
//! (egui: am Ende des Frames, Tests: explizit). Es gibt keinen Abbruch;
//! jeder Task prüft beim Ausführen selbst, ob die Karte noch existiert.

use std::collections::VecDeque;

/// Aufgeschobener Task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredTask {
    /// Marker aus den aktuellen Props neu aufbauen und View setzen
    RefreshMarkers,
}

/// FIFO-Queue aufgeschobener Tasks.
#[derive(Debug, Default)]
pub struct IdleQueue {
    tasks: VecDeque<DeferredTask>,
}

impl IdleQueue {
    /// Erstellt eine leere Queue.
    pub fn new() -> Self {
        Self {
            tasks: VecDeque::new(),
        }
    }

    /// Stellt einen Task ans Ende.
    pub fn post(&mut self, task: DeferredTask) {
        log::debug!("Deferred-Task eingereiht: {:?}", task);
        self.tasks.push_back(task);
    }

    /// Nimmt alle bisher eingereihten Tasks heraus.
    /// Tasks, die währenddessen neu gepostet werden, laufen erst beim nächsten Idle.
    pub fn take_pending(&mut self) -> Vec<DeferredTask> {
        self.tasks.drain(..).collect()
    }

    /// Anzahl wartender Tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Gibt `true` zurück, wenn nichts ansteht.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
