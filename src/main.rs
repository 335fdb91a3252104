//! Seamark-Filter.
//!
//! Liest eine OSM-Datei (Datei oder stdin), erzeugt aus
//! `seamark:light:*`-Tags die Sektorgeometrie von Leuchtfeuern und
//! schreibt Eingabe plus erzeugte Elemente (Datei oder stdout).

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use seamark_filter::{filter_document, FilterOptions, RunContext};

/// Sektorgeometrie für Leuchtfeuer in OSM-Daten.
#[derive(Parser)]
#[command(name = "seamark-filter")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Eingabedatei (Standard: stdin)
    input: Option<PathBuf>,

    /// Ausgabedatei (Standard: stdout)
    output: Option<PathBuf>,

    /// Optionen-Datei (TOML); CLI-Flags überschreiben deren Werte
    #[arg(long)]
    config: Option<PathBuf>,

    /// Maximale Sehnenlänge der Bogenpunkte in Seemeilen (0 = unbegrenzt)
    #[arg(short = 'a', long)]
    arc_max: Option<f64>,

    /// Halber Öffnungswinkel für Richtfeuer in Grad
    #[arg(short = 'b', long)]
    dir_arc: Option<f64>,

    /// Punktdichte-Divisor für Bögen
    #[arg(short = 'd', long)]
    arc_div: Option<f64>,

    /// Standard-Sektorradius in Seemeilen
    #[arg(short = 'r', long)]
    sec_radius: Option<f64>,

    /// Knoten mit `seamark:light_character`-Tag erzeugen
    #[arg(short = 'c', long)]
    light_character: bool,

    /// Renderer-Hint parsen (`seamark:light:#` = `colour:start:end:radius`)
    #[arg(short = 'H', long)]
    renderer_hint: bool,

    /// Erste Id für erzeugte Elemente (fallend vergeben)
    #[arg(short = 'i', long, default_value_t = -1)]
    start_id: i64,

    /// Keine Sektorgeometrie erzeugen
    #[arg(short = 'S', long)]
    no_sectors: bool,

    /// Vollkreis rendern wenn ein Sektor weder Start- noch Endwinkel hat
    #[arg(short = 'U', long)]
    untagged_circle: bool,
}

fn main() -> Result<()> {
    // Logger initialisieren
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let cli = Cli::parse();

    let mut options = match &cli.config {
        Some(path) => FilterOptions::load_from_file(path),
        None => FilterOptions::default(),
    };

    if let Some(arc_max) = cli.arc_max {
        options.arc_max = arc_max;
    }
    if let Some(dir_arc) = cli.dir_arc {
        options.dir_arc = dir_arc;
    }
    if let Some(arc_div) = cli.arc_div {
        options.arc_div = arc_div;
    }
    if let Some(sec_radius) = cli.sec_radius {
        options.sec_radius = sec_radius;
    }
    if cli.light_character {
        options.generate_light_character = true;
    }
    if cli.renderer_hint {
        options.parse_renderer_hint = true;
    }
    if cli.no_sectors {
        options.generate_sectors = false;
    }
    if cli.untagged_circle {
        options.untagged_circle = true;
    }
    options.validate()?;

    let input = match &cli.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Eingabedatei nicht lesbar: {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("stdin nicht lesbar")?;
            buf
        }
    };

    let mut ctx = RunContext::new(options, cli.start_id);
    let output = filter_document(&input, &mut ctx)?;

    match &cli.output {
        Some(path) => std::fs::write(path, output)
            .with_context(|| format!("Ausgabedatei nicht schreibbar: {}", path.display()))?,
        None => {
            use std::io::Write;
            std::io::stdout()
                .write_all(output.as_bytes())
                .context("stdout nicht schreibbar")?;
        }
    }

    log::info!("Verarbeitung abgeschlossen");
    Ok(())
}
