//! Extraktion der Sektor-Definitionen aus den Tags eines Nodes.
//!
//! Globale `seamark:light:*`-Tags belegen den Default-Sektor (Slot 0),
//! nummerierte Tags (`seamark:light:<n>:<suffix>`) die Slots 1..N.

use crate::core::arc_style::ArcStyle;
use crate::core::colour::Colour;
use crate::core::error::SectorError;
use crate::core::sector::{Category, Sector, Segment};
use crate::shared::options::{MAX_SECTORS, MAX_SEGMENTS, RHINT_RADIUS_SCALE};
use crate::shared::FilterOptions;

/// Gemeinsames Präfix aller Leuchtfeuer-Tags.
const LIGHT_PREFIX: &str = "seamark:light:";

/// Parst die Tag-Liste eines Nodes in Sektor-Slots.
///
/// Liefert die vollständige Slot-Liste (Index = Sektornummer) und die
/// Anzahl der belegten Sektoren. Fehlerhafte Tags werden geloggt und
/// übersprungen, ohne andere Sektoren zu beeinflussen.
pub fn extract_sectors(tags: &[(String, String)], opts: &FilterOptions) -> (Vec<Sector>, usize) {
    let mut sectors: Vec<Sector> = (0..MAX_SECTORS).map(Sector::new).collect();

    for (key, value) in tags {
        match key.as_str() {
            "seamark:light:radius" => {
                if let Some(r) = leading_f64(value) {
                    sectors[0].radius = Some(r);
                    sectors[0].mark_used(0);
                }
            }
            "seamark:light:orientation" => {
                if let Some(dir) = leading_f64(value) {
                    sectors[0].dir = Some(dir);
                    sectors[0].mark_used(0);
                }
            }
            "seamark:light:category" => {
                if value == "directional" {
                    sectors[0].category = Category::Directional;
                    sectors[0].mark_used(0);
                }
            }
            "seamark:light:colour" => match Colour::from_exact(value) {
                Some(col) => sectors[0].colours[0] = Some(col),
                None => log::warn!("{}", SectorError::UnknownColour(value.clone())),
            },
            "seamark:light:character" => {
                sectors[0].character.text = value.clone();
            }
            "seamark:light:period" => {
                sectors[0].character.period = leading_u32(value);
            }
            "seamark:light:range" => {
                sectors[0].character.range = leading_u32(value);
            }
            "seamark:light:group" => {
                sectors[0].character.group = leading_u32(value);
            }
            _ => {
                if let Some(rest) = key.strip_prefix(LIGHT_PREFIX) {
                    parse_numbered_tag(&mut sectors, rest, value, opts);
                }
            }
        }
    }

    let used = sectors.iter().filter(|s| s.used).count();
    (sectors, used)
}

/// Verarbeitet einen nummerierten Tag `<n>[:]<suffix>`.
fn parse_numbered_tag(sectors: &mut [Sector], rest: &str, value: &str, opts: &FilterOptions) {
    if !is_numeric(rest) {
        return;
    }

    let Some(k) = leading_i64(rest) else {
        return;
    };
    if k <= 0 || k as usize >= MAX_SECTORS {
        log::warn!("{}", SectorError::SectorNumberOutOfRange(k));
        return;
    }
    let k = k as usize;

    let digits = rest.chars().take_while(char::is_ascii_digit).count();
    let mut suffix = &rest[digits..];

    if suffix.is_empty() {
        // seamark:light:<n> = <colour>:<start>:<end>:<radius>
        if opts.parse_renderer_hint {
            parse_renderer_hint(&mut sectors[k], k, value);
        }
        return;
    }
    if let Some(stripped) = suffix.strip_prefix(':') {
        suffix = stripped;
    }

    let sec = &mut sectors[k];
    let touched = match suffix {
        "sector_start" => match leading_f64(value) {
            Some(v) => {
                sec.start = Some(v);
                true
            }
            None => false,
        },
        "sector_end" => match leading_f64(value) {
            Some(v) => {
                sec.end = Some(v);
                true
            }
            None => false,
        },
        "colour" => parse_sector_colours(sec, value),
        "radius" => parse_radius_groups(sec, k, value),
        "orientation" => match leading_f64(value) {
            Some(v) => {
                sec.dir = Some(v);
                true
            }
            None => false,
        },
        "category" => {
            if value == "directional" {
                sec.category = Category::Directional;
                true
            } else {
                false
            }
        }
        _ => false,
    };

    if touched {
        sec.mark_used(k);
    }
}

/// Ein oder zwei `;`-getrennte Farb-Token, per Präfix gegen die Palette.
///
/// Liefert true sobald die Primärfarbe belegt wurde; ein unbekanntes
/// zweites Token wird geloggt, lässt die Primärfarbe aber stehen.
fn parse_sector_colours(sec: &mut Sector, value: &str) -> bool {
    let mut parts = value.split(';');

    let first = parts.next().unwrap_or("");
    match Colour::from_prefix(first) {
        Some(col) => sec.colours[0] = Some(col),
        None => {
            log::warn!("{}", SectorError::UnknownColour(first.to_string()));
            return false;
        }
    }

    if let Some(second) = parts.next() {
        match Colour::from_prefix(second) {
            Some(col) => sec.colours[1] = Some(col),
            None => log::warn!("{}", SectorError::UnknownColour(second.to_string())),
        }
    }

    true
}

/// Erweiterte Radius-Liste: `;`-getrennte Gruppen, je Gruppe ein rohes
/// Segment `[radius][:span[:stil]]` bzw. `[radius][:stil[:span]]`.
/// Die Reihenfolge wird am Zahlentest des zweiten Tokens erkannt.
fn parse_radius_groups(sec: &mut Sector, nr: usize, value: &str) -> bool {
    if value.is_empty() {
        return false;
    }

    for group in value.split(';') {
        if sec.segments.len() >= MAX_SEGMENTS {
            log::warn!("{}", SectorError::SegmentOverflow(nr));
            sec.segments.clear();
            sec.used = false;
            return false;
        }

        let mut seg = Segment::default();
        let mut parts = group.splitn(3, ':');

        if let Some(radius_part) = parts.next() {
            if !radius_part.is_empty() {
                seg.radius = leading_f64(radius_part);
            }
        }

        if let Some(second) = parts.next() {
            if is_numeric(second) {
                seg.span = leading_f64(second);
                if let Some(third) = parts.next() {
                    seg.style = parse_style_or_suppress(third);
                }
            } else {
                seg.style = parse_style_or_suppress(second);
                if let Some(third) = parts.next() {
                    if is_numeric(third) {
                        seg.span = leading_f64(third);
                    }
                }
            }
        }

        sec.segments.push(seg);
    }

    true
}

/// Stil-Token per Präfix; unbekannte Token ergeben `Suppress`.
fn parse_style_or_suppress(token: &str) -> ArcStyle {
    match ArcStyle::from_prefix(token) {
        Some(style) => style,
        None => {
            log::warn!("unbekannter arc_type '{}'", token);
            ArcStyle::Suppress
        }
    }
}

/// Renderer-Hint: Kompaktwert `colour:start:end:radius`.
/// Der Radius ist skaliert und wird durch [`RHINT_RADIUS_SCALE`] geteilt.
fn parse_renderer_hint(sec: &mut Sector, k: usize, value: &str) {
    if let Some(col) = Colour::from_prefix(value) {
        sec.colours[0] = Some(col);
    }
    sec.mark_used(k);

    let mut parts = value.splitn(4, ':');
    let _colour_token = parts.next();

    if let Some(start) = parts.next().and_then(leading_f64) {
        sec.start = Some(start);
    } else {
        return;
    }
    if let Some(end) = parts.next().and_then(leading_f64) {
        sec.end = Some(end);
    } else {
        return;
    }
    if let Some(radius) = parts.next().and_then(leading_f64) {
        sec.radius = Some(radius / RHINT_RADIUS_SCALE);
    }
}

// ── Numerische Token-Helfer ─────────────────────────────────────────

/// Testet auf einen numerischen Präfix: `-?[0-9]*(\.[0-9]+)?` mit
/// mindestens einer Ziffer.
fn is_numeric(s: &str) -> bool {
    let body = s.strip_prefix('-').unwrap_or(s);
    let digits = body.chars().take_while(char::is_ascii_digit).count();
    let rest = &body[digits..];

    if rest.is_empty() {
        return digits > 0;
    }
    let Some(frac) = rest.strip_prefix('.') else {
        return digits > 0;
    };
    if frac.is_empty() {
        return digits > 0;
    }
    frac.chars().take_while(char::is_ascii_digit).count() > 0
}

/// Parst den maximalen numerischen Präfix als f64 (Rest wird ignoriert).
fn leading_f64(s: &str) -> Option<f64> {
    let neg = s.starts_with('-');
    let body = &s[usize::from(neg)..];

    let mut len = body.chars().take_while(char::is_ascii_digit).count();
    if body[len..].starts_with('.') {
        let frac = body[len + 1..]
            .chars()
            .take_while(char::is_ascii_digit)
            .count();
        if frac > 0 {
            len += 1 + frac;
        }
    }
    if len == 0 {
        return None;
    }

    s[..len + usize::from(neg)].parse::<f64>().ok()
}

/// Parst den führenden Ziffernlauf als i64.
fn leading_i64(s: &str) -> Option<i64> {
    let neg = s.starts_with('-');
    let body = &s[usize::from(neg)..];
    let len = body.chars().take_while(char::is_ascii_digit).count();
    if len == 0 {
        return None;
    }
    s[..len + usize::from(neg)].parse::<i64>().ok()
}

/// Parst den führenden Ziffernlauf als u32.
fn leading_u32(s: &str) -> Option<u32> {
    let len = s.chars().take_while(char::is_ascii_digit).count();
    if len == 0 {
        return None;
    }
    s[..len].parse::<u32>().ok()
}
