//! Feuerfarben nach der festen 8er-Palette der seamark-Tags.

/// Farbe eines Leuchtfeuers bzw. Sektors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Colour {
    White,
    Red,
    Green,
    Yellow,
    Orange,
    Blue,
    Violet,
    Amber,
}

impl Colour {
    /// Alle Farben in Palettenreihenfolge.
    pub const ALL: [Colour; 8] = [
        Colour::White,
        Colour::Red,
        Colour::Green,
        Colour::Yellow,
        Colour::Orange,
        Colour::Blue,
        Colour::Violet,
        Colour::Amber,
    ];

    /// Tag-Name der Farbe.
    pub fn name(self) -> &'static str {
        match self {
            Colour::White => "white",
            Colour::Red => "red",
            Colour::Green => "green",
            Colour::Yellow => "yellow",
            Colour::Orange => "orange",
            Colour::Blue => "blue",
            Colour::Violet => "violet",
            Colour::Amber => "amber",
        }
    }

    /// Kürzel für die Kennungs-Beschriftung (z.B. "Fl(3)W.").
    pub fn abbreviation(self) -> &'static str {
        match self {
            Colour::White => "W",
            Colour::Red => "R",
            Colour::Green => "G",
            Colour::Yellow => "Y",
            Colour::Orange => "Or",
            Colour::Blue => "Bu",
            Colour::Violet => "Vi",
            Colour::Amber => "Am",
        }
    }

    /// Exakte Suche in der Palette (für `seamark:light:colour`).
    pub fn from_exact(value: &str) -> Option<Colour> {
        Colour::ALL.iter().copied().find(|c| c.name() == value)
    }

    /// Präfix-Suche: der Wert muss mit dem Farbnamen beginnen
    /// (für nummerierte Sektor-Tags, die weitere Token anhängen).
    pub fn from_prefix(value: &str) -> Option<Colour> {
        Colour::ALL
            .iter()
            .copied()
            .find(|c| value.starts_with(c.name()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_lookup() {
        assert_eq!(Colour::from_exact("red"), Some(Colour::Red));
        assert_eq!(Colour::from_exact("amber"), Some(Colour::Amber));
        assert_eq!(Colour::from_exact("magenta"), None);
        // Exakt heisst exakt: kein Präfix-Match
        assert_eq!(Colour::from_exact("redish"), None);
    }

    #[test]
    fn test_prefix_lookup() {
        assert_eq!(Colour::from_prefix("green;red"), Some(Colour::Green));
        assert_eq!(Colour::from_prefix("Magenta"), None);
    }

    #[test]
    fn test_abbreviations() {
        assert_eq!(Colour::Orange.abbreviation(), "Or");
        assert_eq!(Colour::White.abbreviation(), "W");
    }
}
