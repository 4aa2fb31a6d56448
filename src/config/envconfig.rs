use ::config as config_rs;
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

/// Configuration read from `APP_<SECTION>__<KEY>` variables, e.g.
/// `APP_GENERAL__OUTPUT_DIR`.
pub trait EnvConfig: Sized + DeserializeOwned {
    const PREFIX: &'static str = "APP";
    const SEPARATOR: &'static str = "__";

    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// Reads `.env` from the working directory (if any), then the process
    /// environment.
    fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_vars(None)
    }

    /// `vars` stands in for the process environment when given.
    fn from_vars(vars: Option<config_rs::Map<String, String>>) -> Result<Self> {
        let settings = config_rs::Config::builder()
            .add_source(
                config_rs::Environment::with_prefix(Self::PREFIX)
                    .prefix_separator("_")
                    .separator(Self::SEPARATOR)
                    .source(vars),
            )
            .build()
            .context("failed to read generator settings from environment")?;

        let cfg = settings
            .try_deserialize::<Self>()
            .context("generator settings do not match the expected keys")?;

        cfg.validate()?;
        Ok(cfg)
    }
}
