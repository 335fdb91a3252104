//! Fehlertaxonomie der Sektor-Pipeline.
//!
//! Alle Varianten sind nicht-fatal: sie betreffen genau einen Tag bzw.
//! Sektor, der übersprungen wird, während der Rest des Nodes normal
//! verarbeitet wird.

use thiserror::Error;

/// Fehler bei Extraktion, Validierung oder Segment-Auflösung.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SectorError {
    /// Farb-Token nicht in der festen Palette.
    #[error("unbekannte Farbe '{0}'")]
    UnknownColour(String),

    /// Sektornummer außerhalb von 1..MAX_SECTORS.
    #[error("Sektornummer {0} außerhalb des gültigen Bereichs")]
    SectorNumberOutOfRange(i64),

    /// Orientierung ohne Richtfeuer-Kategorie oder umgekehrt.
    #[error("Sektor {0}: unvollständige Richtfeuer-Definition")]
    IncompleteDirectionalDefinition(usize),

    /// Start- und/oder Endwinkel fehlen und sind nicht herleitbar.
    #[error("Sektor {0}: Start-/Endwinkel fehlt")]
    MissingBearing(usize),

    /// Negativer Winkel in einem Segment, das nicht das letzte ist.
    #[error("Sektor {0}: negativer Winkel ist nur im letzten Segment erlaubt")]
    InvalidSegmentAngle(usize),

    /// Segmentliste würde die feste Kapazität überschreiten.
    #[error("Sektor {0}: Segment-Kapazität überschritten")]
    SegmentOverflow(usize),
}
