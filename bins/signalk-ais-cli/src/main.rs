use signalk_ais::{load_options, run_self_tests, AisConverter, Conversion};
use signalk_core::{Delta, FileConfigStorage, MemoryStore, SignalKStore};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_SELF_URN: &str = "vessels.urn:mrn:signalk:uuid:00000000-0000-0000-0000-000000000000";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr, stdout carries field-sets only
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,signalk_ais=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let self_urn = std::env::var("SIGNALK_SELF_URN").unwrap_or_else(|_| DEFAULT_SELF_URN.into());
    let converter = AisConverter::new();

    if std::env::args().skip(1).any(|arg| arg == "--self-test") {
        let passed = run_self_tests(&converter, &self_urn)?;
        tracing::info!("{}: {} self-test(s) passed", converter.title(), passed);
        return Ok(());
    }

    let config_dir = config_dir();
    let options = load_options(&FileConfigStorage::new(&config_dir))?;
    if !options.is_enabled(converter.option_key()) {
        tracing::warn!(
            "{} is disabled (option {} in {}), nothing to do",
            converter.title(),
            converter.option_key(),
            config_dir.display()
        );
        return Ok(());
    }

    tracing::info!("{} converting deltas from stdin", converter.title());

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Received Ctrl+C, shutting down...");
        }
        result = run(&converter, MemoryStore::new(&self_urn)) => {
            let stats = result?;
            tracing::info!(
                "Input closed: {} delta(s), {} field-set(s), {} rejected line(s)",
                stats.deltas,
                stats.field_sets,
                stats.rejected
            );
        }
    }

    Ok(())
}

#[derive(Debug, Default)]
struct Stats {
    deltas: u64,
    field_sets: u64,
    rejected: u64,
}

/// Read one delta per line, write one field-set per line.
async fn run(converter: &AisConverter, mut store: MemoryStore) -> anyhow::Result<Stats> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    let mut stats = Stats::default();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut delta: Delta = match serde_json::from_str(line) {
            Ok(delta) => delta,
            Err(e) => {
                tracing::warn!("Skipping malformed delta: {}", e);
                stats.rejected += 1;
                continue;
            }
        };
        stamp_updates(&mut delta);
        stats.deltas += 1;

        if let Some(sets) = converter.convert(&store, &delta) {
            for set in sets {
                let mut text = serde_json::to_string(&set)?;
                text.push('\n');
                stdout.write_all(text.as_bytes()).await?;
                stats.field_sets += 1;
            }
            stdout.flush().await?;
        }

        store.apply_delta(&delta);
    }

    Ok(stats)
}

/// Updates without a timestamp are stamped with the time they were read.
fn stamp_updates(delta: &mut Delta) {
    let now = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
    for update in delta.updates.iter_mut().filter(|u| u.timestamp.is_none()) {
        update.timestamp = Some(now.clone());
    }
}

fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("SIGNALK_CONFIG_DIR") {
        return PathBuf::from(dir);
    }
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
    PathBuf::from(home).join(".signalk").join("plugin-config-data")
}
