mod app_config;
mod config;
mod model;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env, ConfigError};
pub use model::{
    Coordinate, DisplayOptions, ImageSet, LeadingUser, LeadingUsers, Observation, ResultBundle,
    SearchDescriptor, UserRef, DEFAULT_COORDINATE, MAX_DISPLAY_AMOUNT, MAX_RADIUS_KM,
    PLACEHOLDER_ICON,
};
