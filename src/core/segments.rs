//! Auflösung der rohen Segmente eines Sektors in eine lückenlose,
//! geordnete Segmentliste mit absoluten Winkeln.
//!
//! Drei Fälle:
//! - keine rohen Segmente, kein Richtfeuer: ein durchgehendes Solid-Segment
//! - Richtfeuer: zwei schmale Segmente, die sich an der Orientierung treffen
//! - explizite Segmente: sequentiell auflösen, Tapering expandieren,
//!   letztes Segment bis zum Sektorende schließen

use crate::core::arc_style::ArcStyle;
use crate::core::error::SectorError;
use crate::core::sector::{Sector, Segment};
use crate::shared::options::{MAX_SEGMENTS, TAPER_SEGS};
use crate::shared::FilterOptions;

/// Löst die rohen Segmente eines validierten Sektors auf.
///
/// Liefert eine neue Liste; der Sektor selbst bleibt unverändert.
/// Die Liste überdeckt `[start, end]` lückenlos und ohne Überlappung.
pub fn resolve_segments(sector: &Sector, opts: &FilterOptions) -> Result<Vec<Segment>, SectorError> {
    let (Some(sec_start), Some(sec_end)) = (sector.start, sector.end) else {
        return Err(SectorError::MissingBearing(sector.nr));
    };
    let range = sec_end - sec_start;

    let raw_count = sector.segments.len();
    let mut segs = sector.segments.clone();
    if segs.is_empty() {
        segs.push(Segment::default());
    }

    // Radius des ersten Segments belegen; explizit negative Werte
    // fallen auf den konfigurierten Standard zurück.
    let radius0 = match segs[0].radius {
        None => sector.radius.unwrap_or(opts.sec_radius),
        Some(r) if r < 0.0 => opts.sec_radius,
        Some(r) => r,
    };
    segs[0].radius = Some(radius0);

    // Ohne rohe Segmente und ohne Richtfeuer: ein Segment über den
    // ganzen Sektor.
    if raw_count == 0 && sector.dir.is_none() {
        let seg = &mut segs[0];
        seg.start = sec_start;
        seg.end = sec_end;
        seg.span = Some(range);
        seg.colour = sector.colours[0];
        seg.style = ArcStyle::Solid;
        if range < 360.0 {
            seg.start_radial = true;
            seg.end_radial = true;
        }
        return Ok(segs);
    }

    // Richtfeuer: zwei Segmente um die Orientierungspeilung, je begrenzt
    // durch den halben Nachbarabstand und den konfigurierten Halbwinkel.
    // Nur die Trennlinie an der Orientierung bekommt eine Radiale.
    if let Some(dir) = sector.dir {
        let before = half_angle(sector.sspace, opts.dir_arc);
        let after = half_angle(sector.espace, opts.dir_arc);

        let first = Segment {
            start: dir - before,
            end: dir,
            span: Some(before),
            radius: Some(radius0),
            colour: sector.colours[0],
            style: ArcStyle::Solid,
            start_radial: false,
            end_radial: true,
        };
        let second = Segment {
            start: dir,
            end: dir + after,
            span: Some(after),
            radius: Some(radius0),
            colour: sector.colours[0],
            style: ArcStyle::Solid,
            start_radial: false,
            end_radial: false,
        };
        return Ok(vec![first, second]);
    }

    resolve_explicit(&mut segs, sector, sec_start, sec_end, range)?;
    expand_tapering(&mut segs, sector.nr)?;

    // Abschluss: letztes Segment exakt bis zum Sektorende verlängern
    // (fängt Rundungsreste ab) und mit Endradiale markieren.
    if let Some(last) = segs.last_mut() {
        if last.end < sec_end {
            last.end = sec_end;
            last.span = Some(last.end - last.start);
        }
        last.end_radial = true;
    }

    Ok(segs)
}

/// Halber Öffnungswinkel auf einer Seite eines Richtfeuers: der kleinere
/// Wert aus konfiguriertem Halbwinkel und halbem Nachbarabstand.
/// Fehlender oder negativer Abstand gilt als unbeschränkt.
fn half_angle(space: Option<f64>, dir_arc: f64) -> f64 {
    match space {
        Some(s) if s >= 0.0 && s / 2.0 < dir_arc => s / 2.0,
        _ => dir_arc,
    }
}

/// Sequentielle Auflösung explizit definierter Segmente.
fn resolve_explicit(
    segs: &mut Vec<Segment>,
    sector: &Sector,
    sec_start: f64,
    sec_end: f64,
    range: f64,
) -> Result<(), SectorError> {
    // Segment 0: fehlende Weite = ganzer Sektor; negative Weite teilt es
    // in einen vorderen Solid-Teil und einen rückwärts gemessenen Rest.
    match segs[0].span {
        None => segs[0].span = Some(range),
        Some(a) if a < 0.0 => {
            if segs.len() > 1 {
                return Err(SectorError::InvalidSegmentAngle(sector.nr));
            }
            if segs.len() + 1 > MAX_SEGMENTS {
                return Err(SectorError::SegmentOverflow(sector.nr));
            }
            let a = a.max(-range);
            let tail = Segment {
                span: Some(a),
                style: segs[0].style,
                ..Segment::default()
            };
            segs[0].span = Some(a + range);
            segs[0].style = ArcStyle::Solid;
            segs.push(tail);
        }
        Some(_) => {}
    }

    if let Some(a) = segs[0].span {
        if a > range {
            segs[0].span = Some(range);
        }
    }
    segs[0].start = sec_start;
    segs[0].end = sec_start + segs[0].span.unwrap_or(range);
    segs[0].colour = sector.colours[0];
    segs[0].start_radial = true;
    if segs[0].style == ArcStyle::Undefined {
        segs[0].style = ArcStyle::Solid;
    }

    let n = segs.len();
    for i in 1..n {
        let prev = segs[i - 1].clone();

        if segs[i].radius.is_none() {
            segs[i].radius = prev.radius;
        }
        if segs[i].style == ArcStyle::Undefined {
            segs[i].style = prev.style;
        }
        segs[i].colour = prev.colour;

        match segs[i].span {
            None => {
                // Rest des Sektors
                segs[i].start = prev.end;
                segs[i].end = sec_end;
                segs[i].span = Some(sec_end - prev.end);
            }
            Some(a) if a < 0.0 => {
                // Rückwärts vom Sektorende; nur im letzten Segment erlaubt
                if n > i + 1 {
                    return Err(SectorError::InvalidSegmentAngle(sector.nr));
                }
                let a = a.max(-range);
                segs[i - 1].end = sec_end + a;
                segs[i - 1].span = Some(segs[i - 1].end - segs[i - 1].start);
                segs[i].start = sec_end + a;
                segs[i].end = sec_end;
                segs[i].span = Some(-a);
            }
            Some(a) => {
                // Überlauf über das Sektorende abschneiden
                let a = if a + prev.end > sec_end {
                    sec_end - prev.end
                } else {
                    a
                };
                segs[i].start = prev.end;
                segs[i].end = prev.end + a;
                segs[i].span = Some(a);
            }
        }
    }

    Ok(())
}

/// Zerlegt Tapering-Segmente in [`TAPER_SEGS`] gleich breite Teilsegmente
/// mit auf- bzw. absteigenden Zwischenstufen.
fn expand_tapering(segs: &mut Vec<Segment>, nr: usize) -> Result<(), SectorError> {
    let mut i = 0;
    while i < segs.len() {
        if !segs[i].style.is_tapering() {
            i += 1;
            continue;
        }
        if segs.len() + TAPER_SEGS - 1 > MAX_SEGMENTS {
            return Err(SectorError::SegmentOverflow(nr));
        }

        let up = segs[i].style == ArcStyle::TaperUp;
        let sub = segs[i].span.unwrap_or(segs[i].end - segs[i].start) / TAPER_SEGS as f64;

        segs[i].span = Some(sub);
        segs[i].end = segs[i].start + sub;
        segs[i].style = taper_step(up, 0);

        let mut inserts = Vec::with_capacity(TAPER_SEGS - 1);
        let mut last_end = segs[i].end;
        for j in 1..TAPER_SEGS {
            let mut part = segs[i].clone();
            part.start = last_end;
            part.end = last_end + sub;
            part.style = taper_step(up, j);
            part.start_radial = false;
            last_end = part.end;
            inserts.push(part);
        }
        segs.splice(i + 1..i + 1, inserts);

        i += TAPER_SEGS;
    }

    Ok(())
}

/// Stil der j-ten Tapering-Stufe: aufsteigend `taper_1..taper_7`,
/// absteigend gespiegelt.
fn taper_step(up: bool, j: usize) -> ArcStyle {
    if up {
        ArcStyle::Taper((1 + j) as u8)
    } else {
        ArcStyle::Taper((TAPER_SEGS - j) as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::colour::Colour;
    use approx::assert_relative_eq;

    fn plain_sector(start: f64, end: f64) -> Sector {
        let mut s = Sector::new(1);
        s.used = true;
        s.start = Some(start);
        s.end = Some(end);
        s.colours[0] = Some(Colour::Red);
        s
    }

    fn assert_contiguous(segs: &[Segment], start: f64, end: f64) {
        assert_eq!(segs.first().map(|s| s.start), Some(start));
        assert_eq!(segs.last().map(|s| s.end), Some(end));
        for pair in segs.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
    }

    #[test]
    fn test_untagged_sector_yields_single_solid_segment() {
        let sector = plain_sector(100.0, 200.0);
        let segs = resolve_segments(&sector, &FilterOptions::default()).unwrap();

        assert_eq!(segs.len(), 1);
        assert_eq!(segs[0].start, 100.0);
        assert_eq!(segs[0].end, 200.0);
        assert_eq!(segs[0].style, ArcStyle::Solid);
        assert!(segs[0].start_radial);
        assert!(segs[0].end_radial);
        assert_eq!(segs[0].radius, Some(crate::shared::options::SEC_RADIUS));
    }

    #[test]
    fn test_full_circle_has_no_radials() {
        let sector = plain_sector(0.0, 360.0);
        let segs = resolve_segments(&sector, &FilterOptions::default()).unwrap();

        assert_eq!(segs.len(), 1);
        assert!(!segs[0].start_radial);
        assert!(!segs[0].end_radial);
    }

    #[test]
    fn test_explicit_radius_is_kept() {
        let mut sector = plain_sector(10.0, 50.0);
        sector.segments.push(Segment {
            radius: Some(5.0),
            ..Segment::default()
        });
        let segs = resolve_segments(&sector, &FilterOptions::default()).unwrap();

        assert_eq!(segs.len(), 1);
        assert_eq!(segs[0].radius, Some(5.0));
        assert_eq!(segs[0].style, ArcStyle::Solid);
        assert_contiguous(&segs, 10.0, 50.0);
    }

    #[test]
    fn test_directional_light_two_segments() {
        let mut sector = plain_sector(45.0, 45.0);
        sector.dir = Some(45.0);
        let segs = resolve_segments(&sector, &FilterOptions::default()).unwrap();

        assert_eq!(segs.len(), 2);
        assert_eq!(segs[0].start, 43.0);
        assert_eq!(segs[0].end, 45.0);
        assert_eq!(segs[1].start, 45.0);
        assert_eq!(segs[1].end, 47.0);
        // Radiale nur an der Orientierung, nicht an den Aussenkanten
        assert!(!segs[0].start_radial);
        assert!(segs[0].end_radial);
        assert!(!segs[1].start_radial);
        assert!(!segs[1].end_radial);
    }

    #[test]
    fn test_directional_half_angle_bounded_by_neighbour() {
        let mut sector = plain_sector(45.0, 45.0);
        sector.dir = Some(45.0);
        sector.sspace = Some(2.0);
        sector.espace = Some(10.0);
        let segs = resolve_segments(&sector, &FilterOptions::default()).unwrap();

        // sspace/2 = 1.0 < dir_arc, espace/2 = 5.0 > dir_arc
        assert_eq!(segs[0].start, 44.0);
        assert_eq!(segs[1].end, 47.0);
    }

    #[test]
    fn test_segment_chain_with_defaults() {
        // radius = :10;:dashed;:solid -> 3 Segmente, Rest je aufgefüllt
        let mut sector = plain_sector(100.0, 200.0);
        sector.segments = vec![
            Segment {
                span: Some(10.0),
                ..Segment::default()
            },
            Segment {
                style: ArcStyle::Dashed,
                ..Segment::default()
            },
            Segment {
                style: ArcStyle::Solid,
                span: Some(20.0),
                ..Segment::default()
            },
        ];
        let segs = resolve_segments(&sector, &FilterOptions::default()).unwrap();

        assert_eq!(segs.len(), 3);
        assert_eq!(segs[0].end, 110.0);
        assert_eq!(segs[1].style, ArcStyle::Dashed);
        // Segment 1 ohne Weite verbraucht den Rest, Segment 2 wird auf 0
        // gekappt und vom Abschluss wieder ans Sektorende gelegt
        assert_contiguous(&segs, 100.0, 200.0);
        assert!(segs.last().map(|s| s.end_radial).unwrap_or(false));
    }

    #[test]
    fn test_negative_span_on_last_segment_splits() {
        // radius = :-10:dashed -> 100-190 solid, 190-200 dashed
        let mut sector = plain_sector(100.0, 200.0);
        sector.segments = vec![Segment {
            span: Some(-10.0),
            style: ArcStyle::Dashed,
            ..Segment::default()
        }];
        let segs = resolve_segments(&sector, &FilterOptions::default()).unwrap();

        assert_eq!(segs.len(), 2);
        assert_eq!(segs[0].style, ArcStyle::Solid);
        assert_eq!(segs[0].start, 100.0);
        assert_eq!(segs[0].end, 190.0);
        assert_eq!(segs[1].style, ArcStyle::Dashed);
        assert_eq!(segs[1].start, 190.0);
        assert_eq!(segs[1].end, 200.0);
        assert_contiguous(&segs, 100.0, 200.0);
    }

    #[test]
    fn test_negative_span_on_inner_segment_fails() {
        let mut sector = plain_sector(100.0, 200.0);
        sector.segments = vec![
            Segment {
                span: Some(10.0),
                ..Segment::default()
            },
            Segment {
                span: Some(-10.0),
                ..Segment::default()
            },
            Segment::default(),
        ];
        let err = resolve_segments(&sector, &FilterOptions::default()).unwrap_err();
        assert_eq!(err, SectorError::InvalidSegmentAngle(1));
    }

    #[test]
    fn test_negative_span_on_final_of_many() {
        let mut sector = plain_sector(100.0, 200.0);
        sector.segments = vec![
            Segment {
                span: Some(10.0),
                ..Segment::default()
            },
            Segment {
                span: Some(-10.0),
                style: ArcStyle::Dashed,
                ..Segment::default()
            },
        ];
        let segs = resolve_segments(&sector, &FilterOptions::default()).unwrap();

        // Genau ein zusätzliches aufgelöstes Stück: der Vorgänger wird
        // auf 190 verkürzt, der Rest läuft rückwärts bis 200
        assert_eq!(segs.len(), 2);
        assert_eq!(segs[0].end, 190.0);
        assert_eq!(segs[1].start, 190.0);
        assert_eq!(segs[1].end, 200.0);
        assert_eq!(segs[1].span, Some(10.0));
        // die Weite des verkürzten Vorgängers wird nachgezogen
        assert_eq!(segs[0].span, Some(90.0));
        assert_contiguous(&segs, 100.0, 200.0);
    }

    #[test]
    fn test_taper_up_expansion() {
        let mut sector = plain_sector(100.0, 170.0);
        sector.segments = vec![Segment {
            style: ArcStyle::TaperUp,
            ..Segment::default()
        }];
        let segs = resolve_segments(&sector, &FilterOptions::default()).unwrap();

        assert_eq!(segs.len(), 7);
        for (j, seg) in segs.iter().enumerate() {
            assert_eq!(seg.style, ArcStyle::Taper((j + 1) as u8));
        }
        let total: f64 = segs.iter().map(|s| s.end - s.start).sum();
        assert_relative_eq!(total, 70.0, epsilon = 1e-9);
        assert_contiguous(&segs, 100.0, 170.0);
        // Startradiale nur am ersten Teilsegment
        assert!(segs[0].start_radial);
        assert!(segs[1..].iter().all(|s| !s.start_radial));
    }

    #[test]
    fn test_taper_down_expansion_is_mirrored() {
        let mut sector = plain_sector(0.0, 70.0);
        sector.segments = vec![Segment {
            style: ArcStyle::TaperDown,
            ..Segment::default()
        }];
        let segs = resolve_segments(&sector, &FilterOptions::default()).unwrap();

        assert_eq!(segs.len(), 7);
        for (j, seg) in segs.iter().enumerate() {
            assert_eq!(seg.style, ArcStyle::Taper((7 - j) as u8));
        }
    }

    #[test]
    fn test_taper_expansion_overflow() {
        let mut sector = plain_sector(0.0, 120.0);
        // 12 rohe Segmente, eines davon Tapering: 12 + 6 > 16
        sector.segments = (0..12)
            .map(|i| Segment {
                span: Some(10.0),
                style: if i == 0 {
                    ArcStyle::TaperUp
                } else {
                    ArcStyle::Solid
                },
                ..Segment::default()
            })
            .collect();
        let err = resolve_segments(&sector, &FilterOptions::default()).unwrap_err();
        assert_eq!(err, SectorError::SegmentOverflow(1));
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let mut sector = plain_sector(100.0, 200.0);
        sector.segments = vec![
            Segment {
                span: Some(-30.0),
                style: ArcStyle::Dashed,
                ..Segment::default()
            },
        ];
        let first = resolve_segments(&sector, &FilterOptions::default()).unwrap();

        let mut resolved = sector.clone();
        resolved.segments = first.clone();
        let second = resolve_segments(&resolved, &FilterOptions::default()).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_resolution_is_idempotent_after_late_split() {
        let mut sector = plain_sector(100.0, 200.0);
        sector.segments = vec![
            Segment {
                span: Some(10.0),
                ..Segment::default()
            },
            Segment {
                span: Some(-10.0),
                style: ArcStyle::Dashed,
                ..Segment::default()
            },
        ];
        let first = resolve_segments(&sector, &FilterOptions::default()).unwrap();

        // jede Weite entspricht exakt der Winkeldifferenz
        for seg in &first {
            assert_eq!(seg.span, Some(seg.end - seg.start));
        }

        let mut resolved = sector.clone();
        resolved.segments = first.clone();
        let second = resolve_segments(&resolved, &FilterOptions::default()).unwrap();

        assert_eq!(first, second);
    }
}
