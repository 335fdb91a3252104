//! Kern der Sektor-Pipeline: Datenmodell, Extraktion, Validierung,
//! Segmentauflösung und Geometrie-Erzeugung.

pub mod arc_style;
pub mod colour;
pub mod context;
pub mod error;
pub mod extract;
pub mod geometry;
pub mod osm;
pub mod pipeline;
pub mod sector;
pub mod segments;
pub mod validate;

pub use arc_style::ArcStyle;
pub use colour::Colour;
pub use context::RunContext;
pub use error::SectorError;
pub use extract::extract_sectors;
pub use geometry::{emit_light_character, emit_sector};
pub use osm::{GeneratedNode, GeneratedWay, LightNode, OsmElement};
pub use pipeline::process_light_node;
pub use sector::{Category, LightCharacter, Sector, Segment};
pub use segments::resolve_segments;
pub use validate::validate_sectors;
