pub mod build_info;

use std::{
    env,
    path::{Path, PathBuf},
    sync::Once,
};

use dirs::home_dir;

const DEFAULT_DIR_NAME: &str = ".fleet_core";
const HOME_ENV: &str = "FLEET_CORE_HOME";
const DATA_DIR: &str = "data";
const CONFIG_FILE: &str = "config.json";
const DEFAULT_LOG_FILTER: &str = "fleet_core=info";

static TRACING_INIT: Once = Once::new();

/// Installs the global tracing subscriber. `RUST_LOG` replaces the
/// `fleet_core=info` default when set.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}

/// Returns the application directory, defaulting to `~/.fleet_core`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Default location of the vehicle and trip collections.
pub fn default_data_dir() -> PathBuf {
    app_data_dir().join(DATA_DIR)
}

/// Path of the persisted [`crate::config::Config`].
pub fn config_file() -> PathBuf {
    config_file_in(&app_data_dir())
}

pub fn config_file_in(base: &Path) -> PathBuf {
    base.join(CONFIG_FILE)
}
