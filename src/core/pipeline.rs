//! Verarbeitungskette für einen einzelnen Anker-Node:
//! Tags extrahieren, Sektoren validieren, Segmente auflösen,
//! Geometrie erzeugen.

use crate::core::context::RunContext;
use crate::core::extract::extract_sectors;
use crate::core::geometry::{emit_light_character, emit_sector};
use crate::core::osm::{LightNode, OsmElement};
use crate::core::segments::resolve_segments;
use crate::core::validate::validate_sectors;

/// Verarbeitet einen Node mit seinen Tags und liefert alle erzeugten
/// Elemente in Emissionsreihenfolge.
///
/// Nodes ohne `seamark:type`-Tag liefern eine leere Liste; sie werden
/// vom Aufrufer unverändert durchgereicht. Ein Fehler bei der
/// Segmentauflösung verwirft nur den betroffenen Sektor.
pub fn process_light_node(
    anchor: &LightNode,
    tags: &[(String, String)],
    ctx: &mut RunContext,
) -> Vec<OsmElement> {
    let Some(object) = tags
        .iter()
        .find(|(k, _)| k == "seamark:type")
        .map(|(_, v)| v.clone())
    else {
        return Vec::new();
    };

    let opts = ctx.options.clone();
    let (sectors, touched) = extract_sectors(tags, &opts);

    let mut out = Vec::new();

    // Kennung aus dem Default-Slot, unabhängig von der Sektor-Validierung
    if opts.generate_light_character {
        if let Some(first) = sectors.first() {
            if let Some(el) = emit_light_character(anchor, first, ctx) {
                out.push(el);
            }
        }
    }

    if touched == 0 {
        return out;
    }

    let valid = validate_sectors(sectors, anchor.id, &opts);
    if !opts.generate_sectors {
        return out;
    }

    for sector in &valid {
        match resolve_segments(sector, &opts) {
            Ok(segments) => out.extend(emit_sector(anchor, sector, &segments, &object, ctx)),
            Err(err) => log::warn!("Node {}: {}", anchor.id, err),
        }
    }

    out
}
