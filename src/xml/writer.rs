//! Serialisierung der erzeugten OSM-Elemente.

use crate::core::osm::OsmElement;

/// Schreibt die erzeugten Elemente als OSM-XML-Fragment, ein Element
/// pro Zeile bzw. Block, jeweils mit abschließendem Zeilenumbruch.
pub fn write_elements(elements: &[OsmElement]) -> String {
    let mut output = String::new();

    for element in elements {
        match element {
            OsmElement::Node(node) => {
                if node.tags.is_empty() {
                    output.push_str(&format!(
                        "<node id=\"{}\" version=\"1\" timestamp=\"{}\" lat=\"{:.7}\" lon=\"{:.7}\"/>\n",
                        node.id,
                        escape_xml(&node.timestamp),
                        node.lat,
                        node.lon
                    ));
                } else {
                    output.push_str(&format!(
                        "<node id=\"{}\" version=\"1\" timestamp=\"{}\" lat=\"{:.7}\" lon=\"{:.7}\">\n",
                        node.id,
                        escape_xml(&node.timestamp),
                        node.lat,
                        node.lon
                    ));
                    for (k, v) in &node.tags {
                        output.push_str(&format!(
                            "<tag k=\"{}\" v=\"{}\"/>\n",
                            escape_xml(k),
                            escape_xml(v)
                        ));
                    }
                    output.push_str("</node>\n");
                }
            }
            OsmElement::Way(way) => {
                output.push_str(&format!(
                    "<way id=\"{}\" version=\"1\" timestamp=\"{}\">\n",
                    way.id,
                    escape_xml(&way.timestamp)
                ));
                for r in &way.refs {
                    output.push_str(&format!("<nd ref=\"{r}\"/>\n"));
                }
                for (k, v) in &way.tags {
                    output.push_str(&format!(
                        "<tag k=\"{}\" v=\"{}\"/>\n",
                        escape_xml(k),
                        escape_xml(v)
                    ));
                }
                output.push_str("</way>\n");
            }
        }
    }

    output
}

fn escape_xml(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
