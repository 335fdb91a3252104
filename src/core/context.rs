//! Laufkontext: Optionen und Id-Vergabe für einen Filterdurchlauf.

use crate::shared::FilterOptions;

/// Wird einmal pro Lauf erzeugt und durch alle Pipeline-Stufen gereicht.
///
/// Generierte Elemente bekommen fortlaufend fallende (negative) Ids,
/// damit sie nie mit echten OSM-Ids kollidieren.
#[derive(Debug)]
pub struct RunContext {
    /// Konfiguration des Laufs (während der Verarbeitung unveränderlich).
    pub options: FilterOptions,
    next_id: i64,
}

impl RunContext {
    /// Erzeugt einen Kontext mit Start-Id (Standard: -1).
    pub fn new(options: FilterOptions, start_id: i64) -> Self {
        Self {
            options,
            next_id: start_id,
        }
    }

    /// Vergibt die nächste Element-Id (monoton fallend, keine Wiederverwendung).
    pub fn next_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id -= 1;
        id
    }
}
