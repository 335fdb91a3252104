//! Validierung und Ordnung der extrahierten Sektoren.
//!
//! Entfernt inkonsistente Sektoren, korrigiert den 360-Grad-Umlauf,
//! sortiert nach mittlerer Peilung und berechnet die Nachbarabstände,
//! die später die Breite von Richtfeuer-Segmenten begrenzen.

use crate::core::error::SectorError;
use crate::core::sector::Sector;
use crate::shared::FilterOptions;

/// Prüft alle Slots, verwirft ungültige Sektoren und liefert die
/// verbleibenden kompakt, aufsteigend nach mittlerer Peilung sortiert
/// und mit belegten `sspace`/`espace`-Feldern.
pub fn validate_sectors(sectors: Vec<Sector>, node_id: i64, opts: &FilterOptions) -> Vec<Sector> {
    // Orientierung des Default-Sektors, zur Artefakt-Erkennung
    let default_dir = sectors.first().and_then(|s| s.dir);

    let mut valid: Vec<Sector> = Vec::new();

    for (slot, mut sec) in sectors.into_iter().enumerate() {
        if !sec.used {
            continue;
        }

        // Null-Grad-Sektor auf der Orientierung des Richtfeuers:
        // bekanntes Import-Artefakt, wird verworfen.
        if slot > 0
            && sec.start.is_some()
            && sec.start == sec.end
            && sec.start == default_dir
        {
            log::warn!(
                "veraltetes Feature: sector_start == sector_end == orientation (Sektor {}, Node {})",
                sec.nr,
                node_id
            );
            continue;
        }

        if sec.dir.is_some() != sec.is_directional() {
            log::warn!(
                "Node {}: {}",
                node_id,
                SectorError::IncompleteDirectionalDefinition(sec.nr)
            );
            continue;
        }

        match (sec.start, sec.end) {
            (None, None) => {
                if let Some(dir) = sec.dir {
                    sec.start = Some(dir);
                    sec.end = Some(dir);
                } else if opts.untagged_circle {
                    sec.start = Some(0.0);
                    sec.end = Some(360.0);
                } else {
                    log::warn!("Node {}: {}", node_id, SectorError::MissingBearing(sec.nr));
                    continue;
                }
            }
            (None, Some(_)) | (Some(_), None) => {
                log::warn!("Node {}: {}", node_id, SectorError::MissingBearing(sec.nr));
                continue;
            }
            (Some(_), Some(_)) => {}
        }

        // Umlauf-Korrektur: danach gilt immer start <= end
        if let (Some(start), Some(end)) = (sec.start, sec.end) {
            let end = if start > end { end + 360.0 } else { end };
            sec.end = Some(end);
            sec.mean = (start + end) / 2.0;
        }

        valid.push(sec);
    }

    valid.sort_by(|a, b| {
        a.mean
            .partial_cmp(&b.mean)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    compute_neighbour_spacing(&mut valid);

    valid
}

/// Winkelabstände zwischen benachbarten Sektoren; das Paar
/// letzter→erster wird um 360 Grad umgebrochen.
fn compute_neighbour_spacing(sectors: &mut [Sector]) {
    let n = sectors.len();
    if n == 0 {
        return;
    }

    let first_start = sectors[0].start.unwrap_or(0.0);
    let last_end = sectors[n - 1].end.unwrap_or(0.0);
    let wrap = first_start - last_end + 360.0;
    sectors[n - 1].espace = Some(wrap);
    sectors[0].sspace = Some(wrap);

    for i in 0..n.saturating_sub(1) {
        let gap = sectors[i + 1].start.unwrap_or(0.0) - sectors[i].end.unwrap_or(0.0);
        sectors[i].espace = Some(gap);
        sectors[i + 1].sspace = Some(gap);
    }
}
