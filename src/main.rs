//! sri-static command line entry point

use clap::Parser;
use sri_static::cache::DigestCache;
use sri_static::cli::Cli;
use sri_static::export::{create_exporter, get_output_writer};
use sri_static::processor::process_assets;
use sri_static::static_files::StaticFinder;
use sri_static::tags::SriTags;
use std::io::Write;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    // Parse command line arguments
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let assets = cli.assets.clone();

    // Convert to config
    let config = match cli.into_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    };

    // === Phase 1: Cache setup ===
    let cache = match config
        .cache_stores()
        .and_then(|stores| DigestCache::new(&stores, config.key_memo_capacity))
    {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    };
    tracing::info!(store = cache.store_alias(), "digest cache ready");

    if config.clear_cache {
        tracing::info!("clearing digest cache");
        if let Err(e) = cache.clear() {
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    }

    // === Phase 2: Hash assets ===
    let finder = StaticFinder::new(config.static_dirs.clone(), config.static_url.clone());
    let tags = SriTags::new(cache, Box::new(finder), config.algorithm, config.use_sri);

    let result = match process_assets(&assets, &tags, &config) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    };

    for report in &result.reports {
        if let Some(error) = &report.error {
            eprintln!("Error: {}: {}", report.name, error);
        }
    }

    // === Phase 3: Export results ===
    let exporter = create_exporter(config.output_format);
    let mut writer = match get_output_writer(&config.output_filename) {
        Ok(w) => w,
        Err(e) => {
            eprintln!("Error creating output: {}", e);
            return ExitCode::from(2);
        }
    };

    if let Err(e) = exporter.export(&result, &config, &mut *writer) {
        eprintln!("Error writing output: {}", e);
        return ExitCode::from(2);
    }

    if let Err(e) = writer.flush() {
        eprintln!("Error flushing output: {}", e);
        return ExitCode::from(2);
    }

    // === Phase 4: Exit code ===
    if result.failed() > 0 {
        ExitCode::from(2)
    } else {
        ExitCode::SUCCESS
    }
}
