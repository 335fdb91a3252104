//! Darstellungsstile für Sektorbögen.

/// Stil, in dem der Bogen eines Segments gezeichnet wird.
///
/// `TaperUp`/`TaperDown` sind nur in rohen Segmenten gültig und werden bei
/// der Auflösung in sieben `Taper(1..=7)`-Teilsegmente zerlegt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArcStyle {
    /// Noch nicht festgelegt; erbt vom Vorgänger bzw. wird zu `Solid`.
    #[default]
    Undefined,
    /// Durchgezogener Bogen.
    Solid,
    /// Bogen wird nicht gezeichnet (Randpunkte trotzdem).
    Suppress,
    /// Gestrichelter Bogen.
    Dashed,
    /// Auslaufend von schwach nach stark.
    TaperUp,
    /// Auslaufend von stark nach schwach.
    TaperDown,
    /// Aufgelöste Tapering-Stufe 1..=7.
    Taper(u8),
}

impl ArcStyle {
    /// Tag-Wert des Stils.
    pub fn as_str(self) -> &'static str {
        match self {
            ArcStyle::Undefined => "undef",
            ArcStyle::Solid => "solid",
            ArcStyle::Suppress => "suppress",
            ArcStyle::Dashed => "dashed",
            ArcStyle::TaperUp => "taper_up",
            ArcStyle::TaperDown => "taper_down",
            ArcStyle::Taper(1) => "taper_1",
            ArcStyle::Taper(2) => "taper_2",
            ArcStyle::Taper(3) => "taper_3",
            ArcStyle::Taper(4) => "taper_4",
            ArcStyle::Taper(5) => "taper_5",
            ArcStyle::Taper(6) => "taper_6",
            ArcStyle::Taper(7) => "taper_7",
            ArcStyle::Taper(_) => "undef",
        }
    }

    /// Alle per Tag benennbaren Stile.
    const NAMED: [ArcStyle; 13] = [
        ArcStyle::Undefined,
        ArcStyle::Solid,
        ArcStyle::Suppress,
        ArcStyle::Dashed,
        ArcStyle::TaperUp,
        ArcStyle::TaperDown,
        ArcStyle::Taper(1),
        ArcStyle::Taper(2),
        ArcStyle::Taper(3),
        ArcStyle::Taper(4),
        ArcStyle::Taper(5),
        ArcStyle::Taper(6),
        ArcStyle::Taper(7),
    ];

    /// Präfix-Suche: der Wert muss mit dem Stilnamen beginnen.
    pub fn from_prefix(value: &str) -> Option<ArcStyle> {
        ArcStyle::NAMED
            .iter()
            .copied()
            .find(|s| value.starts_with(s.as_str()))
    }

    /// True für `TaperUp` und `TaperDown` (expansionsbedürftig).
    pub fn is_tapering(self) -> bool {
        matches!(self, ArcStyle::TaperUp | ArcStyle::TaperDown)
    }
}
