//! `.breathometer.toml` configuration.

mod core;
mod insights;
mod loader;

pub use self::core::{BreathometerConfig, OutputConfig, SimulationConfig};
pub use insights::InsightsConfig;
pub use loader::{
    directory_ancestors, load_config, load_config_from, load_config_from_path,
    parse_and_validate_config, CONFIG_FILE_NAME,
};
