//! Geometrie-Erzeugung: projiziert aufgelöste Segmente in Nodes und
//! Ways um den Anker-Node eines Leuchtfeuers.
//!
//! Pro Segment entstehen Start- und Endpunkt, optional Radialen und
//! Verbindungslinien sowie der Bogen als Polygonzug. Peilungen werden
//! vorab aus der Kompassrose (0 = Nord, im Uhrzeigersinn) in
//! mathematische Winkel umgerechnet.

use std::f64::consts::{FRAC_PI_2, PI};

use glam::DVec2;

use crate::core::arc_style::ArcStyle;
use crate::core::colour::Colour;
use crate::core::context::RunContext;
use crate::core::osm::{GeneratedNode, GeneratedWay, LightNode, OsmElement};
use crate::core::sector::{Sector, Segment};

/// Radius-Verkleinerung pro Durchgang bei zweifarbigen Sektoren
/// (wechselfarbige Feuer), kumulativ in Seemeilen.
pub const ALT_RADIUS_OFFSETS: [f64; 4] = [0.003, 0.0035, 0.009, 0.005];

/// Kompasspeilung (Grad, 0 = Nord, im Uhrzeigersinn) in den
/// mathematischen Winkel (Bogenmass, 0 = Ost, gegen den Uhrzeigersinn).
fn math_angle(bearing: f64) -> f64 {
    PI - bearing.to_radians() + FRAC_PI_2
}

/// Punkt im Abstand `r` Grad unter dem Winkel `a` vom Anker, als
/// (lon, lat). Die Längendifferenz wird mit der Breite entzerrt.
fn project(anchor: &LightNode, r: f64, a: f64) -> DVec2 {
    DVec2::new(
        anchor.lon + r * a.cos() / anchor.lat.to_radians().cos(),
        anchor.lat + r * a.sin(),
    )
}

/// Erzeugt alle Elemente für einen Sektor mit aufgelösten Segmenten.
///
/// Bei zweifarbigen Sektoren folgen auf den Grunddurchgang vier weitere
/// Durchgänge mit schrittweise verkleinertem Radius in der
/// Sekundärfarbe; deren Segmente tragen keine Aussenradialen mehr.
pub fn emit_sector(
    anchor: &LightNode,
    sector: &Sector,
    segments: &[Segment],
    object: &str,
    ctx: &mut RunContext,
) -> Vec<OsmElement> {
    let mut out = Vec::new();

    emit_pass(anchor, sector, segments, object, 0, ctx, &mut out);

    if sector.colours[1].is_some() && !segments.is_empty() {
        let mut segs = segments.to_vec();
        if let Some(first) = segs.first_mut() {
            first.start_radial = false;
        }
        if let Some(last) = segs.last_mut() {
            last.end_radial = false;
        }

        for (j, offset) in ALT_RADIUS_OFFSETS.iter().enumerate() {
            for seg in &mut segs {
                seg.radius = seg.radius.map(|r| r - offset);
            }
            emit_pass(anchor, sector, &segs, object, j + 1, ctx, &mut out);
        }
    }

    out
}

/// Ein Emissionsdurchgang über alle Segmente.
fn emit_pass(
    anchor: &LightNode,
    sector: &Sector,
    segments: &[Segment],
    object: &str,
    alternation: usize,
    ctx: &mut RunContext,
    out: &mut Vec<OsmElement>,
) {
    let opts = ctx.options.clone();
    let mut prev_end_id = 0_i64;

    for (i, seg) in segments.iter().enumerate() {
        let r = seg.radius.unwrap_or(0.0);
        let s = math_angle(seg.start);
        let e = math_angle(seg.end);
        let full_circle = seg.start == 0.0 && seg.end == 360.0;

        let start_id = push_node(anchor, r / 60.0, s, ctx, out);
        if seg.start_radial && !full_circle {
            push_radial(anchor, sector, object, anchor.id, start_id, ctx, out);
        }

        // Radiensprung zum Vorgänger sichtbar machen, sofern keines der
        // beiden Segmente unterdrückt ist
        if i > 0
            && seg.radius != segments[i - 1].radius
            && seg.style != ArcStyle::Suppress
            && segments[i - 1].style != ArcStyle::Suppress
        {
            push_radial(anchor, sector, object, prev_end_id, start_id, ctx, out);
        }

        let end_id = push_node(anchor, r / 60.0, e, ctx, out);
        if seg.end_radial && !full_circle {
            push_radial(anchor, sector, object, anchor.id, end_id, ctx, out);
        }
        prev_end_id = end_id;

        if seg.style == ArcStyle::Suppress || r == 0.0 {
            continue;
        }

        // Sehnenlänge der Bogenstützpunkte: Radius durch arc_div,
        // optional auf arc_max gedeckelt, dann als Zentriwinkel
        let d = if opts.arc_max > 0.0 && r / opts.arc_div > opts.arc_max {
            opts.arc_max
        } else {
            r / opts.arc_div
        };
        let d = 2.0 * ((d / 60.0) / (2.0 * (r / 60.0))).asin();

        // der Bogen läuft im mathematischen Winkel immer abwärts
        let e = if e > s { e - 2.0 * PI } else { e };

        let mut arc_ids = Vec::new();
        let mut w = s - d;
        while w > e {
            arc_ids.push(push_node(anchor, r / 60.0, w, ctx, out));
            w -= d;
        }

        let mut refs = Vec::with_capacity(arc_ids.len() + 2);
        refs.push(start_id);
        refs.extend_from_slice(&arc_ids);
        refs.push(end_id);

        let colour_tag = if alternation > 0 {
            (
                format!("seamark:light_arc_al{alternation}"),
                sector.colours[1].unwrap_or(Colour::White).name().to_string(),
            )
        } else {
            (
                "seamark:light_arc".to_string(),
                sector.colours[0].unwrap_or(Colour::White).name().to_string(),
            )
        };

        out.push(OsmElement::Way(GeneratedWay {
            id: ctx.next_id(),
            timestamp: anchor.timestamp.clone(),
            refs,
            tags: vec![
                (
                    "seamark:light:sector_nr".to_string(),
                    sector.nr.to_string(),
                ),
                ("seamark:light:object".to_string(), object.to_string()),
                (
                    "seamark:arc_style".to_string(),
                    seg.style.as_str().to_string(),
                ),
                colour_tag,
            ],
        }));
    }
}

/// Projizierter Node ohne Tags; liefert die vergebene Id.
fn push_node(
    anchor: &LightNode,
    r: f64,
    a: f64,
    ctx: &mut RunContext,
    out: &mut Vec<OsmElement>,
) -> i64 {
    let p = project(anchor, r, a);
    let id = ctx.next_id();
    out.push(OsmElement::Node(GeneratedNode {
        id,
        lat: p.y,
        lon: p.x,
        timestamp: anchor.timestamp.clone(),
        tags: Vec::new(),
    }));
    id
}

/// Radiale bzw. Verbindungslinie zwischen zwei Nodes.
fn push_radial(
    anchor: &LightNode,
    sector: &Sector,
    object: &str,
    from: i64,
    to: i64,
    ctx: &mut RunContext,
    out: &mut Vec<OsmElement>,
) {
    out.push(OsmElement::Way(GeneratedWay {
        id: ctx.next_id(),
        timestamp: anchor.timestamp.clone(),
        refs: vec![from, to],
        tags: vec![
            ("seamark:light_radial".to_string(), sector.nr.to_string()),
            ("seamark:light:object".to_string(), object.to_string()),
        ],
    }));
}

/// Setzt die Beschriftung der Feuerkennung zusammen, z.B.
/// `Fl(3) W. 10s 18M`. Leer wenn keine Bestandteile getaggt sind.
pub fn light_character_label(sector: &Sector) -> String {
    let lc = &sector.character;
    let mut label = lc.text.clone();

    if let Some(group) = lc.group {
        label.push_str(&format!("({group})"));
    }
    if !lc.text.is_empty() {
        if lc.group.is_none() {
            label.push(' ');
        }
        label.push_str(sector.colours[0].unwrap_or(Colour::White).abbreviation());
        label.push('.');
    }
    if let Some(period) = lc.period {
        label.push_str(&format!(" {period}s"));
    }
    if let Some(range) = lc.range {
        label.push_str(&format!(" {range}M"));
    }

    label
}

/// Virtueller Node mit der zusammengesetzten Feuerkennung am Ort des
/// Ankers. `None` wenn die Beschriftung leer wäre.
pub fn emit_light_character(
    anchor: &LightNode,
    sector: &Sector,
    ctx: &mut RunContext,
) -> Option<OsmElement> {
    let label = light_character_label(sector);
    if label.is_empty() {
        return None;
    }

    Some(OsmElement::Node(GeneratedNode {
        id: ctx.next_id(),
        lat: anchor.lat,
        lon: anchor.lon,
        timestamp: anchor.timestamp.clone(),
        tags: vec![
            ("seamark:type".to_string(), "virtual".to_string()),
            ("seamark:light_character".to_string(), label),
        ],
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sector::LightCharacter;
    use crate::shared::FilterOptions;
    use approx::assert_relative_eq;

    fn anchor() -> LightNode {
        LightNode {
            id: 4711,
            lat: 54.0,
            lon: 10.0,
            timestamp: "2020-01-01T00:00:00Z".to_string(),
        }
    }

    fn ctx() -> RunContext {
        RunContext::new(FilterOptions::default(), -1)
    }

    fn segment(start: f64, end: f64, radius: f64) -> Segment {
        Segment {
            start,
            end,
            span: Some(end - start),
            radius: Some(radius),
            colour: Some(Colour::Red),
            style: ArcStyle::Solid,
            start_radial: true,
            end_radial: true,
        }
    }

    fn red_sector() -> Sector {
        let mut sec = Sector::new(1);
        sec.used = true;
        sec.colours[0] = Some(Colour::Red);
        sec
    }

    #[test]
    fn test_projection_bearing_zero_points_south() {
        let a = anchor();
        // Sektorpeilungen gelten von See aus gesehen: 0 Grad projiziert
        // den Randpunkt südlich des Ankers, nur die Breite ändert sich
        let p = project(&a, 0.1, math_angle(0.0));
        assert_relative_eq!(p.y, a.lat - 0.1, epsilon = 1e-9);
        assert_relative_eq!(p.x, a.lon, epsilon = 1e-9);
    }

    #[test]
    fn test_projection_bearing_90_stretches_longitude() {
        let a = anchor();
        // 90 Grad von See = westlich; die Längendifferenz wird mit der
        // Breite entzerrt
        let p = project(&a, 0.1, math_angle(90.0));
        assert_relative_eq!(p.y, a.lat, epsilon = 1e-9);
        assert_relative_eq!(
            p.x,
            a.lon - 0.1 / a.lat.to_radians().cos(),
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_single_segment_emits_arc_and_radials() {
        let mut c = ctx();
        let segs = vec![segment(10.0, 50.0, 5.0)];
        let out = emit_sector(&anchor(), &red_sector(), &segs, "light_major", &mut c);

        let ways: Vec<_> = out
            .iter()
            .filter_map(|e| match e {
                OsmElement::Way(w) => Some(w),
                _ => None,
            })
            .collect();
        // zwei Radialen plus der Bogen
        assert_eq!(ways.len(), 3);

        let radials: Vec<_> = ways
            .iter()
            .filter(|w| w.tags.iter().any(|(k, _)| k == "seamark:light_radial"))
            .collect();
        assert_eq!(radials.len(), 2);
        for r in &radials {
            assert_eq!(r.refs[0], 4711);
            assert_eq!(
                r.tags
                    .iter()
                    .find(|(k, _)| k == "seamark:light:object")
                    .map(|(_, v)| v.as_str()),
                Some("light_major")
            );
        }

        let arc = ways
            .iter()
            .find(|w| w.tags.iter().any(|(k, _)| k == "seamark:light_arc"))
            .unwrap();
        assert!(arc.refs.len() > 2);
        assert!(arc
            .tags
            .contains(&("seamark:light_arc".to_string(), "red".to_string())));
        assert!(arc
            .tags
            .contains(&("seamark:arc_style".to_string(), "solid".to_string())));
        assert!(arc
            .tags
            .contains(&("seamark:light:sector_nr".to_string(), "1".to_string())));

        // Bogen referenziert Start- und Endpunkt
        let node_ids: Vec<i64> = out
            .iter()
            .filter_map(|e| match e {
                OsmElement::Node(n) => Some(n.id),
                _ => None,
            })
            .collect();
        assert_eq!(arc.refs.first(), Some(&node_ids[0]));
        assert!(node_ids.contains(arc.refs.last().unwrap()));
    }

    #[test]
    fn test_full_circle_has_no_radials() {
        let mut c = ctx();
        let mut seg = segment(0.0, 360.0, 1.0);
        seg.start_radial = false;
        seg.end_radial = false;
        let out = emit_sector(&anchor(), &red_sector(), &[seg], "light_minor", &mut c);

        assert!(!out.iter().any(|e| matches!(
            e,
            OsmElement::Way(w) if w.tags.iter().any(|(k, _)| k == "seamark:light_radial")
        )));
    }

    #[test]
    fn test_suppressed_segment_has_no_arc() {
        let mut c = ctx();
        let mut seg = segment(10.0, 50.0, 5.0);
        seg.style = ArcStyle::Suppress;
        let out = emit_sector(&anchor(), &red_sector(), &[seg], "light", &mut c);

        assert!(!out.iter().any(|e| matches!(
            e,
            OsmElement::Way(w) if w.tags.iter().any(|(k, _)| k == "seamark:light:sector_nr")
        )));
        // Start- und Endpunkt samt Radialen bleiben erhalten
        assert_eq!(
            out.iter()
                .filter(|e| matches!(e, OsmElement::Node(_)))
                .count(),
            2
        );
    }

    #[test]
    fn test_zero_radius_has_no_arc() {
        let mut c = ctx();
        let seg = segment(10.0, 50.0, 0.0);
        let out = emit_sector(&anchor(), &red_sector(), &[seg], "light", &mut c);

        assert!(!out.iter().any(|e| matches!(
            e,
            OsmElement::Way(w) if w.tags.iter().any(|(k, _)| k == "seamark:light_arc")
        )));
    }

    #[test]
    fn test_radius_jump_gets_connector() {
        let mut c = ctx();
        let segs = vec![segment(10.0, 50.0, 5.0), segment(50.0, 90.0, 3.0)];
        let out = emit_sector(&anchor(), &red_sector(), &segs, "light", &mut c);

        // Verbindungslinie verläuft nicht vom Anker aus
        let connectors: Vec<_> = out
            .iter()
            .filter_map(|e| match e {
                OsmElement::Way(w)
                    if w.tags.iter().any(|(k, _)| k == "seamark:light_radial")
                        && w.refs[0] != 4711 =>
                {
                    Some(w)
                }
                _ => None,
            })
            .collect();
        assert_eq!(connectors.len(), 1);
    }

    #[test]
    fn test_alternating_colours_add_four_passes() {
        let mut c = ctx();
        let mut sec = red_sector();
        sec.colours[1] = Some(Colour::White);
        let segs = vec![segment(10.0, 50.0, 5.0)];
        let out = emit_sector(&anchor(), &sec, &segs, "light", &mut c);

        for al in 1..=4 {
            let key = format!("seamark:light_arc_al{al}");
            let arc = out
                .iter()
                .find_map(|e| match e {
                    OsmElement::Way(w) if w.tags.iter().any(|(k, _)| *k == key) => Some(w),
                    _ => None,
                })
                .unwrap_or_else(|| panic!("Bogen für Durchgang {al} fehlt"));
            assert!(arc
                .tags
                .iter()
                .any(|(k, v)| *k == key && v == "white"));
        }

        // Aussenradialen nur im Grunddurchgang
        let radial_count = out
            .iter()
            .filter(|e| matches!(
                e,
                OsmElement::Way(w) if w.tags.iter().any(|(k, _)| k == "seamark:light_radial")
            ))
            .count();
        assert_eq!(radial_count, 2);
    }

    #[test]
    fn test_light_character_label() {
        let mut sec = red_sector();
        sec.character = LightCharacter {
            text: "Fl".to_string(),
            group: Some(3),
            period: Some(10),
            range: Some(18),
        };
        assert_eq!(light_character_label(&sec), "Fl(3)R. 10s 18M");

        sec.character.group = None;
        assert_eq!(light_character_label(&sec), "Fl R. 10s 18M");

        sec.character.text.clear();
        // ohne Kennungstext kein Farbkürzel
        assert_eq!(light_character_label(&sec), " 10s 18M");
    }

    #[test]
    fn test_empty_character_emits_nothing() {
        let mut c = ctx();
        let sec = red_sector();
        assert!(emit_light_character(&anchor(), &sec, &mut c).is_none());
    }

    #[test]
    fn test_character_node_is_virtual() {
        let mut c = ctx();
        let mut sec = red_sector();
        sec.character.text = "Oc".to_string();
        let el = emit_light_character(&anchor(), &sec, &mut c).unwrap();

        let OsmElement::Node(node) = el else {
            panic!("Node erwartet");
        };
        assert_eq!(node.lat, 54.0);
        assert_eq!(node.lon, 10.0);
        assert!(node
            .tags
            .contains(&("seamark:type".to_string(), "virtual".to_string())));
        assert!(node
            .tags
            .contains(&("seamark:light_character".to_string(), "Oc R.".to_string())));
    }
}
