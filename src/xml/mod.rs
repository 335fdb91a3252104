//! OSM-XML Ein- und Ausgabe.
//!
//! Der Reader reicht das Eingabedokument unverändert durch und fügt
//! erzeugte Elemente nach dem jeweiligen Anker-Node ein; der Writer
//! serialisiert die erzeugten Elemente.

pub mod reader;
pub mod writer;

pub use reader::filter_document;
pub use writer::write_elements;
