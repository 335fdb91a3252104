//! Zentrale Konfiguration für den Seamark-Filter.
//!
//! `FilterOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use serde::{Deserialize, Serialize};

// ── Kapazitäten ────────────────────────────────────────────────────

/// Maximale Anzahl Sektoren pro Leuchtfeuer-Node.
pub const MAX_SECTORS: usize = 32;
/// Maximale Anzahl Segmente pro Sektor (inkl. Tapering-Expansion).
pub const MAX_SEGMENTS: usize = 16;
/// Anzahl Teilsegmente, in die ein Tapering-Segment zerlegt wird.
pub const TAPER_SEGS: usize = 7;

// ── Bogen-Geometrie ─────────────────────────────────────────────────

/// Divisor für die Punktdichte auf Bögen (Sehnenlänge = Radius / Divisor).
pub const ARC_DIV: f64 = 10.0;
/// Maximale Sehnenlänge zwischen Bogenpunkten in Seemeilen (0 = unbegrenzt).
pub const ARC_MAX: f64 = 0.03;
/// Standard-Sektorradius in Seemeilen.
pub const SEC_RADIUS: f64 = 0.5;
/// Halber Öffnungswinkel für Richtfeuer in Grad.
pub const DIR_ARC: f64 = 2.0;

// ── Renderer-Hint ───────────────────────────────────────────────────

/// Teiler für Radiusangaben im Renderer-Hint-Format.
pub const RHINT_RADIUS_SCALE: f64 = 278.0;

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle zur Laufzeit änderbaren Filter-Optionen.
/// Kann optional als TOML-Datei neben der Binary abgelegt werden.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterOptions {
    /// Maximale Sehnenlänge der Bogenpunkte in Seemeilen (0 = unbegrenzt)
    pub arc_max: f64,
    /// Punktdichte-Divisor für Bögen
    pub arc_div: f64,
    /// Standard-Sektorradius in Seemeilen
    pub sec_radius: f64,
    /// Halber Öffnungswinkel für Richtfeuer in Grad
    pub dir_arc: f64,
    /// Knoten mit `seamark:light_character`-Tag erzeugen
    #[serde(default)]
    pub generate_light_character: bool,
    /// Sektorgeometrie erzeugen
    #[serde(default = "default_generate_sectors")]
    pub generate_sectors: bool,
    /// Vollkreis rendern wenn ein Sektor weder Start- noch Endwinkel hat
    #[serde(default)]
    pub untagged_circle: bool,
    /// Renderer-Hint parsen (`seamark:light:#` = `colour:start:end:radius`)
    #[serde(default)]
    pub parse_renderer_hint: bool,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            arc_max: ARC_MAX,
            arc_div: ARC_DIV,
            sec_radius: SEC_RADIUS,
            dir_arc: DIR_ARC,
            generate_light_character: false,
            generate_sectors: true,
            untagged_circle: false,
            parse_renderer_hint: false,
        }
    }
}

/// Serde-Default für `generate_sectors` (Sektoren sind standardmäßig an).
fn default_generate_sectors() -> bool {
    true
}

impl FilterOptions {
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

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Prüft die Parameter auf Plausibilität.
    ///
    /// Divisor, Standardradius und Richtfeuer-Winkel müssen positiv sein;
    /// `arc_max = 0` ist erlaubt und bedeutet "keine Obergrenze".
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.arc_div <= 0.0 {
            anyhow::bail!("arc_div muss positiv sein (ist {})", self.arc_div);
        }
        if self.sec_radius <= 0.0 {
            anyhow::bail!("sec_radius muss positiv sein (ist {})", self.sec_radius);
        }
        if self.dir_arc <= 0.0 {
            anyhow::bail!("dir_arc muss positiv sein (ist {})", self.dir_arc);
        }
        if self.arc_max < 0.0 {
            anyhow::bail!("arc_max darf nicht negativ sein (ist {})", self.arc_max);
        }
        Ok(())
    }
}
