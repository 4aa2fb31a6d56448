use anyhow::{Result, bail};

use super::AppConfig;

pub fn validate(cfg: &AppConfig) -> Result<()> {
    let mut errors: Vec<String> = Vec::new();

    if cfg.general.output_dir.as_os_str().is_empty() {
        errors.push("general.output_dir must not be empty".to_string());
    }

    if let Some(tables_file) = cfg.general.tables_file.as_ref() {
        if tables_file.as_os_str().is_empty() {
            errors.push("general.tables_file must not be empty when set".to_string());
        }
    }

    if cfg.logging.rust_log.trim().is_empty() {
        errors.push("logging.rust_log must not be empty".to_string());
    }

    if errors.is_empty() {
        return Ok(());
    }

    bail!("invalid app config:\n- {}", errors.join("\n- "))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::validate;
    use crate::config::AppConfig;

    #[test]
    fn defaults_are_valid() {
        let cfg = AppConfig::default();

        assert_eq!(cfg.general.output_dir, PathBuf::from("."));
        assert!(cfg.general.tables_file.is_none());
        assert_eq!(cfg.logging.rust_log, "info");
        validate(&cfg).expect("default config should validate");
    }

    #[test]
    fn reports_every_problem_at_once() {
        let mut cfg = AppConfig::default();
        cfg.general.output_dir = PathBuf::new();
        cfg.general.tables_file = Some(PathBuf::new());
        cfg.logging.rust_log = "  ".to_string();

        let message = validate(&cfg)
            .expect_err("blank values should be rejected")
            .to_string();

        assert!(message.contains("general.output_dir must not be empty"));
        assert!(message.contains("general.tables_file must not be empty when set"));
        assert!(message.contains("logging.rust_log must not be empty"));
    }
}
