pub mod loader;
pub mod schema;

pub use loader::{
    apply_env_overrides, load_config, load_config_from_str, resolve_config, resolve_config_with,
};
pub use schema::{Config, DriveBackend, DriveConfig};
