//! Streaming-Filter über ein OSM-XML-Dokument.
//!
//! Das Eingabedokument wird unverändert durchgereicht; nach jedem
//! `</node>` eines Leuchtfeuers werden die erzeugten Elemente
//! eingefügt. Alles andere (Ways, Relationen, Kommentare, unbekannte
//! Tags) bleibt byteweise erhalten.

use anyhow::{Context, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::core::context::RunContext;
use crate::core::osm::LightNode;
use crate::core::pipeline::process_light_node;
use crate::xml::writer::write_elements;

/// Filtert ein komplettes OSM-Dokument und liefert die angereicherte
/// Ausgabe.
pub fn filter_document(xml: &str, ctx: &mut RunContext) -> Result<String> {
    let mut reader = Reader::from_str(xml);

    let mut output = String::with_capacity(xml.len());
    // Bis hierhin ist die Eingabe bereits in die Ausgabe kopiert
    let mut copied = 0usize;

    let mut current_node: Option<LightNode> = None;
    let mut node_tags: Vec<(String, String)> = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Eof) => break,
            Ok(Event::Start(ref e)) => {
                let name = e.name();
                let tag = reader.decoder().decode(name.as_ref())?;
                if tag == "node" {
                    current_node = read_node_attrs(e, &reader)?;
                    node_tags.clear();
                } else if tag == "tag" && current_node.is_some() {
                    if let Some(kv) = read_tag_attrs(e, &reader)? {
                        node_tags.push(kv);
                    }
                }
            }
            Ok(Event::Empty(ref e)) => {
                let name = e.name();
                let tag = reader.decoder().decode(name.as_ref())?;
                if tag == "tag" && current_node.is_some() {
                    if let Some(kv) = read_tag_attrs(e, &reader)? {
                        node_tags.push(kv);
                    }
                } else if tag == "node" {
                    // selbstschließender Node trägt keine Tags
                    current_node = None;
                }
            }
            Ok(Event::End(ref e)) => {
                if e.name().as_ref() == b"node" {
                    if let Some(anchor) = current_node.take() {
                        let generated = process_light_node(&anchor, &node_tags, ctx);
                        if !generated.is_empty() {
                            let pos = reader.buffer_position() as usize;
                            output.push_str(&xml[copied..pos]);
                            copied = pos;
                            output.push('\n');
                            output.push_str(&write_elements(&generated));
                        }
                    }
                }
            }
            Ok(_) => {}
            Err(err) => {
                return Err(err).context("Fehler beim Parsen des OSM-XML");
            }
        }
    }

    output.push_str(&xml[copied..]);
    Ok(output)
}

/// Liest id, lat, lon und timestamp eines `<node>`-Elements.
/// `None` wenn eines der Pflichtattribute fehlt.
fn read_node_attrs(e: &BytesStart, reader: &Reader<&[u8]>) -> Result<Option<LightNode>> {
    let mut id: Option<i64> = None;
    let mut lat: Option<f64> = None;
    let mut lon: Option<f64> = None;
    let mut timestamp = "0000-00-00T00:00:00Z".to_string();

    for attr in e.attributes().with_checks(false) {
        let attr = attr?;
        let key = reader.decoder().decode(attr.key.as_ref())?;
        match key.as_ref() {
            "id" => {
                let value = attr.unescape_value()?;
                id = Some(
                    value
                        .parse()
                        .with_context(|| format!("Ungültige Node-Id '{value}'"))?,
                );
            }
            "lat" => {
                let value = attr.unescape_value()?;
                lat = Some(
                    value
                        .parse()
                        .with_context(|| format!("Ungültige Breite '{value}'"))?,
                );
            }
            "lon" => {
                let value = attr.unescape_value()?;
                lon = Some(
                    value
                        .parse()
                        .with_context(|| format!("Ungültige Länge '{value}'"))?,
                );
            }
            "timestamp" => {
                timestamp = attr.unescape_value()?.into_owned();
            }
            _ => {}
        }
    }

    match (id, lat, lon) {
        (Some(id), Some(lat), Some(lon)) => Ok(Some(LightNode {
            id,
            lat,
            lon,
            timestamp,
        })),
        _ => Ok(None),
    }
}

/// Liest das k/v-Paar eines `<tag>`-Elements.
fn read_tag_attrs(e: &BytesStart, reader: &Reader<&[u8]>) -> Result<Option<(String, String)>> {
    let mut k: Option<String> = None;
    let mut v: Option<String> = None;

    for attr in e.attributes().with_checks(false) {
        let attr = attr?;
        let key = reader.decoder().decode(attr.key.as_ref())?;
        match key.as_ref() {
            "k" => k = Some(attr.unescape_value()?.into_owned()),
            "v" => v = Some(attr.unescape_value()?.into_owned()),
            _ => {}
        }
    }

    Ok(k.zip(v))
}
