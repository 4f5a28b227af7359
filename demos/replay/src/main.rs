//! replay: headless replay of a shark telemetry file.
//!
//! ```text
//! replay [tracks.csv|tracks.json] [config.json] [out_dir]
//! ```
//!
//! Without a tracks file the embedded Gulf of Mexico sample is used.  The
//! demo scrubs through every offset, then runs the frame loop unpaced and
//! records snapshots to CSV.  Set `RUST_LOG=debug` for per-record detail.

use std::fs::File;
use std::io::{BufReader, Cursor};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use log::info;

use mt_core::{EngineConfig, EntityId, EntityRng};
use mt_engine::{
    CsvFileSource, DataSource, DEFAULT_FLAVOR, EngineBuilder, FrameLoop, JsonFileSource,
    NameRegistry, NoopObserver, StaticSource, Unpaced, pick_flavor,
};
use mt_output::{CsvWriter, SnapshotRecorder};
use mt_samples::load_records_csv_reader;

// ── Constants ─────────────────────────────────────────────────────────────────

const REPLAY_FRAMES:   u64 = 600; // ten seconds at 60 Hz
const RECORD_INTERVAL: u64 = 60;  // one snapshot per simulated second

// Two tagged sharks off the Yucatán shelf; tag 3 reports only once.
const SAMPLE_CSV: &str = "\
ID,lat,lon,datetime,code,SST_asignado,Clorofila_asignada\n\
159826,23.41,-89.92,2023-06-01 00:00:00,obs,28.1,0.21\n\
159826,23.55,-90.10,2023-06-08 00:00:00,obs,28.4,0.19\n\
159826,23.70,-90.31,2023-06-15 00:00:00,pred,28.6,0.17\n\
159826,23.92,-90.40,2023-06-22 00:00:00,pred,28.9,0.18\n\
201144,22.80,-87.50,2023-06-01 00:00:00,obs,29.0,0.33\n\
201144,22.61,-87.22,2023-06-08 00:00:00,obs,29.2,0.36\n\
201144,22.40,-86.95,2023-06-15 00:00:00,pred,29.3,0.31\n\
3,24.10,-91.00,2023-06-01 00:00:00,obs,,\n\
";

// ── Inputs ────────────────────────────────────────────────────────────────────

fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let file = File::open(path).with_context(|| format!("opening config {}", path.display()))?;
    let config = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing config {}", path.display()))?;
    Ok(config)
}

fn open_source(path: Option<&Path>) -> Result<Box<dyn DataSource + Send>> {
    let Some(path) = path else {
        let records = load_records_csv_reader(Cursor::new(SAMPLE_CSV))?;
        return Ok(Box::new(StaticSource::new(records)));
    };
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    Ok(if is_json {
        Box::new(JsonFileSource::new(path))
    } else {
        Box::new(CsvFileSource::new(path))
    })
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let tracks  = args.first().map(PathBuf::from);
    let config  = load_config(args.get(1).map(Path::new))?;
    let out_dir = args.get(2).map_or_else(|| PathBuf::from("output/replay"), PathBuf::from);

    println!("=== replay: marine track engine ===");
    println!(
        "Offsets: {}..={}  |  speed: {}  |  arrival: {}  |  seed: {}",
        config.min_offset, config.max_offset, config.speed, config.arrival, config.seed
    );
    println!();

    // 1. Engine with its data source; the first refresh is the initial load.
    let source = open_source(tracks.as_deref())?;
    let mut engine = EngineBuilder::new(config.clone()).source(source).build()?;
    let report = engine
        .refresh(&mut NoopObserver)
        .transpose()?
        .context("engine has no data source")?;
    println!(
        "Loaded {} samples for {} sharks ({} records dropped)",
        report.kept,
        engine.timelines().len(),
        report.dropped()
    );

    // 2. Names and flavor text.
    let mut names = NameRegistry::new();
    for (i, timeline) in engine.timelines().iter().enumerate() {
        let name = ["Lola", "Bruce", "Marina"].get(i).copied().unwrap_or("unnamed");
        names.adopt(timeline.entity(), name)?;
    }
    for (entity, name) in names.iter() {
        let mut rng = EntityRng::new(config.seed, entity);
        let flavor = pick_flavor(DEFAULT_FLAVOR, &mut rng).unwrap_or("");
        println!("  {:<8} {:<10} {flavor}", entity.get(), name);
    }
    println!();

    // 3. Scrub through every offset.
    println!("{:<8} {:<10} {:>8} {:>10} {:>10}", "Offset", "Shark", "Sample", "Lat", "Lon");
    println!("{}", "-".repeat(50));
    for offset in config.min_offset..=config.max_offset {
        for sel in engine.set_offset(offset, &mut NoopObserver) {
            let pos = engine.position(sel.entity)?;
            println!(
                "{:<8} {:<10} {:>8} {:>10.4} {:>10.4}",
                offset,
                names.name(sel.entity).unwrap_or("?"),
                sel.index,
                pos.lat,
                pos.lon
            );
        }
    }
    println!();

    // 4. Run the frame loop from the newest offset, recording snapshots.
    std::fs::create_dir_all(&out_dir)?;
    let writer = CsvWriter::new(&out_dir)?;
    let mut recorder = SnapshotRecorder::new(writer, RECORD_INTERVAL);

    engine.handle().set_offset(0);
    let t0 = Instant::now();
    let end = FrameLoop::from_config(&config, Unpaced)
        .max_frames(REPLAY_FRAMES)
        .run(&mut engine, &mut recorder);
    info!("replay finished at {end} in {:.3} s", t0.elapsed().as_secs_f64());

    if let Some(e) = recorder.take_error() {
        eprintln!("output error: {e}");
    }

    // 5. Final positions.
    println!("Final positions after {REPLAY_FRAMES} frames (written to {})", out_dir.display());
    println!("{:<10} {:>10} {:>10}", "Shark", "Lat", "Lon");
    println!("{}", "-".repeat(32));
    for (entity, pos) in engine.snapshot().iter() {
        let label = names.name(entity).map_or_else(|| entity_label(entity), str::to_owned);
        println!("{:<10} {:>10.5} {:>10.5}", label, pos.lat, pos.lon);
    }

    Ok(())
}

fn entity_label(entity: EntityId) -> String {
    format!("#{}", entity.get())
}
