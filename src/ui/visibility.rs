//! Sichtbarkeit der Karte im Host.
//!
//! Wird die Karte nach dem Ausblenden wieder gezeigt, braucht das Widget ein
//! `Load`, auch wenn sich die Fenstergröße nicht geändert hat.

/// Sichtbarkeits-Zustand plus ausstehendes `Load`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapVisibility {
    visible: bool,
    load_pending: bool,
}

impl Default for MapVisibility {
    fn default() -> Self {
        Self {
            visible: true,
            load_pending: false,
        }
    }
}

impl MapVisibility {
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Setzt die Sichtbarkeit. Versteckt → sichtbar merkt ein `Load` vor.
    pub fn set(&mut self, visible: bool) {
        if visible && !self.visible {
            self.load_pending = true;
        }
        if !visible {
            self.load_pending = false;
        }
        self.visible = visible;
    }

    /// Nach dem Zeichnen eines Frames: ob jetzt `Load` dispatcht werden muss.
    ///
    /// `drawn` ist `false`, solange die Karte in diesem Frame nicht gezeichnet
    /// wurde; ein vorgemerktes `Load` wartet dann auf den nächsten Frame, damit
    /// die Surface den aktuellen Viewport kennt.
    pub fn take_load(&mut self, drawn: bool, resized: bool) -> bool {
        if !drawn {
            return false;
        }
        std::mem::take(&mut self.load_pending) || resized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_after_hide_requests_load_without_resize() {
        let mut visibility = MapVisibility::default();
        assert!(!visibility.take_load(true, false));

        visibility.set(false);
        assert!(!visibility.take_load(false, false));

        visibility.set(true);
        // Im selben Frame noch nicht gezeichnet
        assert!(!visibility.take_load(false, false));
        // Nächster Frame: gleiche Größe, trotzdem Load
        assert!(visibility.take_load(true, false));
        // Nur einmal
        assert!(!visibility.take_load(true, false));
    }

    #[test]
    fn test_resize_requests_load_while_visible() {
        let mut visibility = MapVisibility::default();
        assert!(visibility.take_load(true, true));
    }

    #[test]
    fn test_setting_same_visibility_requests_nothing() {
        let mut visibility = MapVisibility::default();
        visibility.set(true);
        assert!(!visibility.take_load(true, false));

        visibility.set(false);
        visibility.set(true);
        visibility.set(false);
        visibility.set(false);
        assert!(!visibility.take_load(true, false));
    }
}
