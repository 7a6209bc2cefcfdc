//! Zentrale Konfiguration für das Karten-Widget.
//!
//! `WidgetOptions` enthält alle zur Laufzeit änderbaren Darstellungswerte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use crate::core::tiles::{TILE_MAX_ZOOM, TILE_MIN_ZOOM};
use crate::core::{Background, IconTint, IconVariant, MarkerIcon, PopupOptions};
use serde::{Deserialize, Serialize};

// ── Marker-Icons ────────────────────────────────────────────────────

/// Icon-Größe in Pixeln.
pub const ICON_SIZE: [f32; 2] = [36.0, 36.0];
/// Icon-Anker (Spitze unten mittig).
pub const ICON_ANCHOR: [f32; 2] = [18.0, 36.0];
/// Popup-Anker relativ zum Icon-Anker.
pub const POPUP_ANCHOR: [f32; 2] = [0.0, -36.0];

// ── Popups ──────────────────────────────────────────────────────────

/// Maximale Popup-Breite in Pixeln.
pub const POPUP_MAX_WIDTH: f32 = 240.0;
/// CSS-Klasse der Popups.
pub const POPUP_CLASS_NAME: &str = "custom";

// ── Cluster ─────────────────────────────────────────────────────────

/// Cluster-Radius in Screen-Pixeln.
pub const CLUSTER_RADIUS_PX: f32 = 80.0;

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle zur Laufzeit änderbaren Widget-Optionen.
/// Wird als `cluster_map_widget.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetOptions {
    // ── Icons ───────────────────────────────────────────────────
    /// Icon-Größe in Pixeln
    pub icon_size: [f32; 2],
    /// Icon-Anker in Pixeln
    pub icon_anchor: [f32; 2],
    /// Popup-Anker relativ zum Icon-Anker
    pub popup_anchor: [f32; 2],

    // ── Popups ──────────────────────────────────────────────────
    /// Maximale Popup-Breite
    pub popup_max_width: f32,
    /// CSS-Klasse der Popups
    pub popup_class_name: String,

    // ── Kacheln ─────────────────────────────────────────────────
    /// Minimaler Kachel-Zoom
    pub tile_min_zoom: u8,
    /// Maximaler Kachel-Zoom
    pub tile_max_zoom: u8,
    /// Hintergrund, falls die Props keinen angeben
    #[serde(default)]
    pub default_background: Background,

    // ── Verhalten ───────────────────────────────────────────────
    /// Klick auf die Karte schaltet Mausrad-Zoom um
    #[serde(default = "default_true")]
    pub click_toggles_scroll_zoom: bool,
    /// Erster Fokus aktiviert Mausrad-Zoom
    #[serde(default = "default_true")]
    pub focus_enables_scroll_zoom: bool,
    /// Cluster-Radius in Screen-Pixeln (Demo-Surface)
    #[serde(default = "default_cluster_radius_px")]
    pub cluster_radius_px: f32,
}

impl Default for WidgetOptions {
    fn default() -> Self {
        Self {
            icon_size: ICON_SIZE,
            icon_anchor: ICON_ANCHOR,
            popup_anchor: POPUP_ANCHOR,

            popup_max_width: POPUP_MAX_WIDTH,
            popup_class_name: POPUP_CLASS_NAME.to_string(),

            tile_min_zoom: TILE_MIN_ZOOM,
            tile_max_zoom: TILE_MAX_ZOOM,
            default_background: Background::Light,

            click_toggles_scroll_zoom: true,
            focus_enables_scroll_zoom: true,
            cluster_radius_px: CLUSTER_RADIUS_PX,
        }
    }
}

/// Serde-Default für boolesche Verhaltens-Schalter.
fn default_true() -> bool {
    true
}

/// Serde-Default für `cluster_radius_px` (Abwärtskompatibilität).
fn default_cluster_radius_px() -> f32 {
    CLUSTER_RADIUS_PX
}

impl WidgetOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Schreibt die Optionen als kommentierte TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        use anyhow::Context;

        let body = toml::to_string_pretty(self).context("Optionen nicht serialisierbar")?;
        let content = format!("# Cluster Map Widget: Darstellungs-Optionen\n\n{body}");
        std::fs::write(path, content)
            .with_context(|| format!("Optionen-Datei {} nicht schreibbar", path.display()))?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Wie `load_from_file`; fehlt die Datei, werden die Standardwerte
    /// dort abgelegt, damit sie editiert werden können.
    pub fn load_or_create(path: &std::path::Path) -> Self {
        if path.exists() {
            return Self::load_from_file(path);
        }
        let defaults = Self::default();
        if let Err(e) = defaults.save_to_file(path) {
            log::warn!("Standard-Optionen nicht gespeichert: {:#}", e);
        }
        defaults
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("cluster_map_widget"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("cluster_map_widget.toml")
    }

    /// Baut das Icon für eine Variante auf dem gegebenen Hintergrund.
    pub fn marker_icon(&self, variant: IconVariant, background: Background) -> MarkerIcon {
        MarkerIcon {
            variant,
            tint: IconTint::for_background(background),
            size: self.icon_size,
            anchor: self.icon_anchor,
            popup_anchor: self.popup_anchor,
        }
    }

    /// Popup-Optionen für die Marker-Fabrik.
    pub fn popup_options(&self) -> PopupOptions {
        PopupOptions {
            max_width: self.popup_max_width,
            class_name: self.popup_class_name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toml_roundtrip_keeps_values() {
        let mut opts = WidgetOptions::default();
        opts.popup_max_width = 320.0;
        opts.default_background = Background::Dark;

        let text = toml::to_string_pretty(&opts).expect("Serialisierung sollte klappen");
        let parsed: WidgetOptions = toml::from_str(&text).expect("TOML sollte parsen");
        assert_eq!(parsed, opts);
    }

    #[test]
    fn test_missing_optional_fields_fall_back_to_defaults() {
        let text = r#"
            icon_size = [36.0, 36.0]
            icon_anchor = [18.0, 36.0]
            popup_anchor = [0.0, -36.0]
            popup_max_width = 240.0
            popup_class_name = "custom"
            tile_min_zoom = 0
            tile_max_zoom = 20
        "#;
        let parsed: WidgetOptions = toml::from_str(text).expect("TOML sollte parsen");
        assert_eq!(parsed, WidgetOptions::default());
    }

    #[test]
    fn test_load_from_missing_file_returns_defaults() {
        let opts = WidgetOptions::load_from_file(std::path::Path::new(
            "/nonexistent/cluster_map_widget.toml",
        ));
        assert_eq!(opts, WidgetOptions::default());
    }

    #[test]
    fn test_load_or_create_writes_defaults_then_reads_edits() {
        let path = std::env::temp_dir().join("test_cluster_map_widget_options.toml");
        let _ = std::fs::remove_file(&path);

        let created = WidgetOptions::load_or_create(&path);
        assert_eq!(created, WidgetOptions::default());
        assert!(path.exists(), "Standardwerte sollten geschrieben sein");

        let mut edited = created;
        edited.cluster_radius_px = 120.0;
        edited.click_toggles_scroll_zoom = false;
        edited.save_to_file(&path).expect("Speichern sollte klappen");

        let reloaded = WidgetOptions::load_or_create(&path);
        assert_eq!(reloaded, edited);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_marker_icon_uses_inverse_tint() {
        let opts = WidgetOptions::default();
        let icon = opts.marker_icon(IconVariant::Featured, Background::Light);
        assert_eq!(icon.variant, IconVariant::Featured);
        assert_eq!(icon.tint, IconTint::Dark);
        assert_eq!(icon.size, ICON_SIZE);
    }
}
