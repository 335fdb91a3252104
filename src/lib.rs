//! Seamark-Filter Library.
//! Erzeugt aus `seamark:light:*`-Tags in OSM-Daten die sichtbare
//! Geometrie von Leuchtfeuer-Sektoren: Bögen, Radialen und die
//! zusammengesetzte Feuerkennung.

pub mod core;
pub mod shared;
pub mod xml;

pub use core::{
    extract_sectors, process_light_node, resolve_segments, validate_sectors, ArcStyle, Category,
    Colour, LightCharacter, LightNode, OsmElement, RunContext, Sector, SectorError, Segment,
};
pub use shared::FilterOptions;
pub use xml::{filter_document, write_elements};
