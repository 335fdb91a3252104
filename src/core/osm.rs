//! Datenmodell der erzeugten OSM-Elemente.
//!
//! Die Pipeline arbeitet auf diesen Strukturen; erst der XML-Writer
//! serialisiert sie in den Ausgabestrom.

/// Anker-Node eines Leuchtfeuers, wie aus dem Eingabedokument gelesen.
#[derive(Debug, Clone, PartialEq)]
pub struct LightNode {
    pub id: i64,
    pub lat: f64,
    pub lon: f64,
    /// Zeitstempel des Quell-Nodes, wird an alle erzeugten Elemente vererbt.
    pub timestamp: String,
}

/// Ein erzeugter Node (Bogenstützpunkt oder Radialen-Endpunkt).
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedNode {
    pub id: i64,
    pub lat: f64,
    pub lon: f64,
    pub timestamp: String,
    pub tags: Vec<(String, String)>,
}

/// Ein erzeugter Way (Bogen, Radiale oder Verbindungslinie).
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedWay {
    pub id: i64,
    pub timestamp: String,
    /// Referenzierte Node-Ids in Zeichenreihenfolge.
    pub refs: Vec<i64>,
    pub tags: Vec<(String, String)>,
}

/// Erzeugtes Element in Emissionsreihenfolge.
#[derive(Debug, Clone, PartialEq)]
pub enum OsmElement {
    Node(GeneratedNode),
    Way(GeneratedWay),
}
