mod cli;

use anyhow::{Context, Result, bail};
use clap::Parser;

use hasura_metadata_gen::{
    CheckSink, DirectorySink, DryRunSink, LEGACY_TABLES, TableCatalog, builtin_catalog,
    config::AppConfig, generate, load_tables_file, logging::init_tracing,
};

use cli::{Cli, RunMode, RunSettings};

fn main() {
    let cli = Cli::parse();
    let cfg = match AppConfig::from_env() {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("failed to load config: {err:?}");
            std::process::exit(2);
        }
    };
    if let Err(err) = init_tracing(&cfg.logging.rust_log) {
        eprintln!("{err:?}");
        std::process::exit(2);
    }

    if let Err(err) = run(cli.settings(&cfg)) {
        tracing::error!("metadata generation failed: {err:?}");
        std::process::exit(1);
    }
}

fn run(settings: RunSettings) -> Result<()> {
    let catalog = load_catalog(&settings)?;
    tracing::debug!(
        tables = catalog.len(),
        output_dir = %settings.output_dir.display(),
        mode = ?settings.mode,
        "catalog ready"
    );

    match settings.mode {
        RunMode::Write => {
            let mut sink = DirectorySink::new(&settings.output_dir);
            generate(&catalog, LEGACY_TABLES, &mut sink).with_context(|| {
                format!(
                    "failed to write metadata into {}",
                    settings.output_dir.display()
                )
            })?;
            tracing::debug!("metadata written to {}", sink.root().display());
        }
        RunMode::DryRun => {
            let mut sink = DryRunSink::new();
            generate(&catalog, LEGACY_TABLES, &mut sink)?;
            let bytes: usize = sink.planned().iter().map(|(_, size)| size).sum();
            tracing::info!(
                "dry run: {} files ({bytes} bytes) would be written to {}",
                sink.planned().len(),
                settings.output_dir.display()
            );
        }
        RunMode::Check => {
            let mut sink = CheckSink::new(&settings.output_dir);
            generate(&catalog, LEGACY_TABLES, &mut sink)?;
            if !sink.is_up_to_date() {
                bail!(
                    "{} metadata files in {} are out of date; rerun the generator",
                    sink.stale().len(),
                    settings.output_dir.display()
                );
            }
            tracing::info!("metadata in {} is up to date", settings.output_dir.display());
        }
    }

    Ok(())
}

fn load_catalog(settings: &RunSettings) -> Result<TableCatalog> {
    match settings.tables_file.as_deref() {
        Some(path) => load_tables_file(path)
            .with_context(|| format!("failed to load tables from {}", path.display())),
        None => builtin_catalog().context("built-in table catalog is invalid"),
    }
}
