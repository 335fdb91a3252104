//! Datenmodell für Leuchtfeuer-Sektoren und ihre Segmente.

use crate::core::arc_style::ArcStyle;
use crate::core::colour::Colour;

/// Kategorie eines Sektors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Category {
    /// Gewöhnlicher Sektor mit Start- und Endpeilung.
    #[default]
    Plain,
    /// Richtfeuer: definiert durch eine einzelne Orientierungspeilung.
    Directional,
}

/// Bestandteile der Feuerkennung (`seamark:light_character`-Beschriftung).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LightCharacter {
    /// Roher Kennungstext (z.B. "Fl", "Oc").
    pub text: String,
    /// Gruppenanzahl, als "(n)" angehängt.
    pub group: Option<u32>,
    /// Wiederkehr in Sekunden, als " ns" angehängt.
    pub period: Option<u32>,
    /// Nenntragweite in Seemeilen, als " nM" angehängt.
    pub range: Option<u32>,
}

/// Ein zusammenhängender Teilbogen eines Sektors.
///
/// Vor der Auflösung sind `start`/`end` relativ bzw. unbelegt und
/// `span`/`radius` optional; nach [`resolve_segments`] sind alle Winkel
/// absolut und alle Felder belegt.
///
/// [`resolve_segments`]: crate::core::segments::resolve_segments
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Segment {
    /// Startpeilung in Grad (nach Auflösung absolut).
    pub start: f64,
    /// Endpeilung in Grad (nach Auflösung absolut).
    pub end: f64,
    /// Winkelweite in Grad. Negativ = vom Sektorende rückwärts gemessen,
    /// nur im letzten rohen Segment erlaubt.
    pub span: Option<f64>,
    /// Radius in Seemeilen; unbelegt erbt vom Vorgänger.
    pub radius: Option<f64>,
    /// Farbe; unbelegt erbt vom Vorgänger.
    pub colour: Option<Colour>,
    /// Darstellungsstil des Bogens.
    pub style: ArcStyle,
    /// Radiale Begrenzungslinie am Startpunkt zeichnen.
    pub start_radial: bool,
    /// Radiale Begrenzungslinie am Endpunkt zeichnen.
    pub end_radial: bool,
}

/// Ein peilungsdefinierter Leuchtsektor eines Punkt-Features.
#[derive(Debug, Clone, Default)]
pub struct Sector {
    /// Sektornummer: 0 = Default-Slot, 1..N = explizit nummeriert.
    pub nr: usize,
    /// True sobald irgendein Tag ein Feld dieses Sektors belegt hat.
    pub used: bool,
    /// Startpeilung in Grad.
    pub start: Option<f64>,
    /// Endpeilung in Grad.
    pub end: Option<f64>,
    /// Orientierungspeilung für Richtfeuer.
    pub dir: Option<f64>,
    /// Sektorkategorie.
    pub category: Category,
    /// Primär- und optionale Sekundärfarbe.
    pub colours: [Option<Colour>; 2],
    /// Kennungsbestandteile.
    pub character: LightCharacter,
    /// Sektorradius in Seemeilen (Fallback für Segmente ohne Radius).
    pub radius: Option<f64>,
    /// Winkelabstand zum vorhergehenden Nachbarsektor (Grad).
    pub sspace: Option<f64>,
    /// Winkelabstand zum nachfolgenden Nachbarsektor (Grad).
    pub espace: Option<f64>,
    /// Mittlere Peilung `(start + end) / 2`, Sortierschlüssel.
    pub mean: f64,
    /// Rohe Segmente aus dem `radius`-Tag.
    pub segments: Vec<Segment>,
}

impl Sector {
    /// Leerer Sektor mit Slot-Nummer.
    pub fn new(nr: usize) -> Self {
        Self {
            nr,
            ..Self::default()
        }
    }

    /// Markiert den Sektor als belegt und fixiert seine Nummer.
    pub fn mark_used(&mut self, nr: usize) {
        self.used = true;
        self.nr = nr;
    }

    /// True wenn der Sektor als Richtfeuer definiert ist.
    pub fn is_directional(&self) -> bool {
        self.category == Category::Directional
    }
}
