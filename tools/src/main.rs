//! migration-runner: generates the mock migration datasets and serves
//! filter/aggregate queries over them.
//!
//! Usage:
//!   migration-runner generate --seed 42 --data-dir ./data
//!   migration-runner serve --data-dir ./data --config dashboard.json

use anyhow::{bail, Context, Result};
use migration_core::{
    config::DashboardConfig,
    dataset::MigrationDataset,
    engine::GenerationEngine,
    service::{is_quit, QueryService},
    store::ArtifactStore,
};
use std::env;
use std::io::{self, BufRead, Write};

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let mode = args.get(1).map(String::as_str).unwrap_or("generate");
    let data_dir = string_arg(&args, "--data-dir").unwrap_or("./data");

    let mut config = match string_arg(&args, "--config") {
        Some(path) => DashboardConfig::load(path)?,
        None => DashboardConfig::default(),
    };
    config.generator.seed = parse_arg(&args, "--seed", config.generator.seed);

    match mode {
        "generate" => run_generate(&config, data_dir),
        "serve" => run_serve(&config, data_dir),
        other => bail!("unknown mode '{other}' (expected 'generate' or 'serve')"),
    }
}

fn run_generate(config: &DashboardConfig, data_dir: &str) -> Result<()> {
    println!("Interstate migration dashboard: migration-runner");
    println!("  seed:      {}", config.generator.seed);
    println!("  data_dir:  {data_dir}");
    println!();

    let store = ArtifactStore::create(data_dir)?;
    let engine = GenerationEngine::new(config.generator.clone());
    let (_, manifest) = engine.generate_into(&store)?;

    println!("=== GENERATION SUMMARY ===");
    println!("  generation:  {}", manifest.generation_id);
    println!("  generated:   {}", manifest.generated_at.to_rfc3339());
    for entry in &manifest.artifacts {
        println!(
            "  {:<16} {:>7} records  ({}.{})",
            entry.name,
            entry.items,
            entry.name,
            entry.encoding.extension()
        );
    }
    Ok(())
}

fn run_serve(config: &DashboardConfig, data_dir: &str) -> Result<()> {
    let store = ArtifactStore::new(data_dir);
    // Nothing is served until every artifact is in memory.
    let dataset = MigrationDataset::load(&store)
        .with_context(|| format!("cannot load data from {data_dir} (run `migration-runner generate` first)"))?;
    let service = QueryService::new(dataset, config.limits.clone());
    log::info!("ready: {:?}", service.dataset().counts());

    run_ipc_loop(&service)
}

fn run_ipc_loop(service: &QueryService) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let reply = service.handle_line(&buffer);
        writeln!(stdout, "{}", serde_json::to_string(&reply)?)?;
        stdout.flush()?;

        if is_quit(&buffer) {
            break;
        }
    }
    Ok(())
}

fn string_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
