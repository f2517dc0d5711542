use anyhow::{bail, Context, Result};
use pixelcut_core::snapshot::ProjectSnapshot;
use pixelcut_core::store::EditorStore;
use pixelcut_core::types::Micros;
use pixelcut_playback::compositor::resolve_layers;

const USAGE: &str = "\
pixelcut -- headless project inspector

Usage:
  pixelcut inspect <project.pixelcut>
  pixelcut layers <project.pixelcut> <at_seconds>
  pixelcut plan <project.pixelcut> <start_seconds> <end_seconds>
";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.as_slice() {
        [cmd, path] if cmd == "inspect" => inspect(path),
        [cmd, path, at] if cmd == "layers" => layers(path, at),
        [cmd, path, start, end] if cmd == "plan" => plan(path, start, end),
        _ => {
            eprint!("{USAGE}");
            std::process::exit(2);
        }
    }
}

fn load_store(path: &str) -> Result<EditorStore> {
    let snapshot = ProjectSnapshot::load_from_file(path)
        .with_context(|| format!("failed to load {path}"))?;
    let mut store = EditorStore::new();
    store.restore(snapshot);
    Ok(store)
}

fn parse_seconds(raw: &str) -> Result<Micros> {
    let secs: f64 = raw
        .parse()
        .with_context(|| format!("not a number of seconds: {raw}"))?;
    Ok(Micros::from_secs(secs))
}

fn inspect(path: &str) -> Result<()> {
    let store = load_store(path)?;
    let timeline = store.timeline();

    println!("duration: {}", timeline.duration());
    println!("tracks:");
    for track in &timeline.tracks {
        let flags = format!(
            "{}{}",
            if track.locked { " [locked]" } else { "" },
            if track.visible { "" } else { " [hidden]" },
        );
        println!("  {} ({:?}){}", track.name, track.kind, flags);
        for clip in timeline.clips_on(track.id) {
            println!(
                "    {}  {} -> {}  offset {}  {}",
                clip.name,
                clip.start,
                clip.end(),
                clip.offset,
                clip.source_url,
            );
        }
    }
    Ok(())
}

fn layers(path: &str, at: &str) -> Result<()> {
    let store = load_store(path)?;
    let at = parse_seconds(at)?;
    let layers = resolve_layers(store.timeline(), at);
    if layers.is_empty() {
        println!("no active layers at {at}");
        return Ok(());
    }
    println!("{}", serde_json::to_string_pretty(&layers)?);
    Ok(())
}

fn plan(path: &str, start: &str, end: &str) -> Result<()> {
    let store = load_store(path)?;
    let start = parse_seconds(start)?;
    let end = parse_seconds(end)?;
    if end <= start {
        bail!("end must be after start");
    }

    let plan = pixelcut_export::plan::compile_range(store.timeline(), start, end)
        .context("could not compile export plan")?;
    tracing::info!(segments = plan.segments.len(), "compiled export plan");
    println!("{}", serde_json::to_string_pretty(&plan)?);
    Ok(())
}
