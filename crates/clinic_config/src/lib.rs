// --- File: crates/clinic_config/src/lib.rs ---
use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

pub mod models;

pub use models::*;

/// Prefix for environment overrides, e.g. `CLINIC__CLINIC__WORKDAY_START_HOUR=8`.
pub const ENV_PREFIX: &str = "CLINIC";
pub const ENV_SEPARATOR: &str = "__";

/// Loads the application configuration.
///
/// Sources, later ones winning:
/// 1. built-in defaults (see [`ClinicConfig::default`])
/// 2. `$CONFIG_DIR/default.*` (optional)
/// 3. `$CONFIG_DIR/$RUN_ENV.*` (optional, `RUN_ENV` defaults to `debug`)
/// 4. `CLINIC__*` environment variables
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    let config_dir =
        PathBuf::from(env::var("CONFIG_DIR").unwrap_or_else(|_| "config".to_string()));

    load_config_from(&config_dir, &run_env)
}

/// Same as [`load_config`] but with an explicit config directory and run environment.
pub fn load_config_from(config_dir: &Path, run_env: &str) -> Result<AppConfig, ConfigError> {
    let default_path = config_dir.join("default");
    let env_path = config_dir.join(run_env);

    debug!(
        "Loading config: default={} env={}",
        default_path.display(),
        env_path.display()
    );

    let builder = Config::builder()
        .add_source(File::with_name(&default_path.to_string_lossy()).required(false))
        .add_source(File::with_name(&env_path.to_string_lossy()).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator(ENV_SEPARATOR)
                .try_parsing(true),
        );

    builder.build()?.try_deserialize()
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Loads the `.env` file into the process environment, once.
///
/// `DOTENV_OVERRIDE` selects a different file. Returns the path that was used.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path = env::var("DOTENV_OVERRIDE").unwrap_or_else(|_| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}
