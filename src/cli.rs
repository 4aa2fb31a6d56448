use std::path::PathBuf;

use clap::Parser;

use hasura_metadata_gen::config::AppConfig;

/// Generate Hasura table metadata files from the table catalog.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Directory to write into (overrides APP_GENERAL__OUTPUT_DIR)
    #[arg(long)]
    pub out_dir: Option<PathBuf>,
    /// JSON tables file to use instead of the built-in catalog
    #[arg(long)]
    pub tables: Option<PathBuf>,
    /// Render everything and report what would be written
    #[arg(long, conflicts_with = "check")]
    pub dry_run: bool,
    /// Fail if files in the output directory differ from the rendered output
    #[arg(long)]
    pub check: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Write,
    DryRun,
    Check,
}

/// Effective settings after applying flags over config.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub mode: RunMode,
    pub output_dir: PathBuf,
    pub tables_file: Option<PathBuf>,
}

impl Cli {
    pub fn settings(&self, cfg: &AppConfig) -> RunSettings {
        let mode = if self.dry_run {
            RunMode::DryRun
        } else if self.check {
            RunMode::Check
        } else {
            RunMode::Write
        };

        RunSettings {
            mode,
            output_dir: self
                .out_dir
                .clone()
                .unwrap_or_else(|| cfg.general.output_dir.clone()),
            tables_file: self
                .tables
                .clone()
                .or_else(|| cfg.general.tables_file.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::Parser;
    use hasura_metadata_gen::config::AppConfig;

    use super::{Cli, RunMode};

    #[test]
    fn no_arguments_writes_into_configured_directory() {
        let cli = Cli::try_parse_from(["generate_hasura_metadata"]).expect("no args should parse");
        let settings = cli.settings(&AppConfig::default());

        assert_eq!(settings.mode, RunMode::Write);
        assert_eq!(settings.output_dir, PathBuf::from("."));
        assert!(settings.tables_file.is_none());
    }

    #[test]
    fn flags_override_config() {
        let mut cfg = AppConfig::default();
        cfg.general.tables_file = Some(PathBuf::from("from-env.json"));

        let cli = Cli::try_parse_from([
            "generate_hasura_metadata",
            "--out-dir",
            "hasura/metadata/databases/default/tables",
            "--tables",
            "tables.json",
            "--check",
        ])
        .expect("flags should parse");
        let settings = cli.settings(&cfg);

        assert_eq!(settings.mode, RunMode::Check);
        assert_eq!(
            settings.output_dir,
            PathBuf::from("hasura/metadata/databases/default/tables")
        );
        assert_eq!(settings.tables_file, Some(PathBuf::from("tables.json")));
    }

    #[test]
    fn dry_run_and_check_conflict() {
        let result = Cli::try_parse_from(["generate_hasura_metadata", "--dry-run", "--check"]);
        assert!(result.is_err());
    }
}
