use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::config::schema::{Config, DriveBackend};
use crate::error::ConfigError;

const SCHEMA_JSON: &str = include_str!("../../schema/config-v1.json");

pub const CONFIG_PATH_ENV: &str = "INTAKE_CONFIG";
pub const BIND_ENV: &str = "INTAKE_BIND";
pub const ROOT_FOLDER_ENV: &str = "INTAKE_ROOT_FOLDER_ID";
pub const SCRATCH_DIR_ENV: &str = "INTAKE_SCRATCH_DIR";
pub const DRIVE_BACKEND_ENV: &str = "INTAKE_DRIVE_BACKEND";
pub const DRIVE_BIN_ENV: &str = "INTAKE_DRIVE_BIN";
pub const ACCOUNT_ENV: &str = "GOG_ACCOUNT";

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let content = read_config_file(path.as_ref())?;
    load_config_from_str(&content)
}

pub fn load_config_from_str(content: &str) -> Result<Config, ConfigError> {
    let config = parse_config(content)?;
    validate_config(&config)?;
    Ok(config)
}

/// Builds the effective config from the process environment: the file
/// named by `INTAKE_CONFIG` (or defaults), then env overrides, then
/// validation.
pub fn resolve_config() -> Result<Config, ConfigError> {
    resolve_config_with(|name| std::env::var(name).ok())
}

/// Same as [`resolve_config`] with an injectable variable lookup.
pub fn resolve_config_with<F>(env: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match env(CONFIG_PATH_ENV).filter(|p| !p.is_empty()) {
        Some(path) => {
            log::info!("Loading configuration from {}", path);
            parse_config(&read_config_file(Path::new(&path))?)?
        }
        None => {
            log::info!("No {} set, using built-in defaults", CONFIG_PATH_ENV);
            Config::default()
        }
    };

    apply_env_overrides(&mut config, &env)?;
    validate_config(&config)?;
    Ok(config)
}

/// Applies environment overrides. Empty values are treated as unset.
pub fn apply_env_overrides<F>(config: &mut Config, env: &F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |name: &str| env(name).filter(|v| !v.trim().is_empty());

    if let Some(bind) = get(BIND_ENV) {
        config.bind_address = bind;
    }
    if let Some(root) = get(ROOT_FOLDER_ENV) {
        config.root_folder_id = root.trim().to_string();
    }
    if let Some(dir) = get(SCRATCH_DIR_ENV) {
        config.scratch_directory = PathBuf::from(dir);
    }
    if let Some(backend) = get(DRIVE_BACKEND_ENV) {
        config.drive.backend =
            backend
                .trim()
                .parse::<DriveBackend>()
                .map_err(|_| ConfigError::InvalidEnv {
                    name: DRIVE_BACKEND_ENV.to_string(),
                    value: backend.clone(),
                })?;
    }
    if let Some(binary) = get(DRIVE_BIN_ENV) {
        config.drive.binary = binary;
    }
    if let Some(account) = get(ACCOUNT_ENV) {
        log::debug!("Using drive account from {}", ACCOUNT_ENV);
        config.drive.account = Some(account);
    }

    Ok(())
}

fn read_config_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })
}

fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let json_value: serde_json::Value = serde_json::from_str(content)?;

    validate_schema(&json_value)?;

    Ok(serde_json::from_value(json_value)?)
}

fn validate_schema(json_value: &serde_json::Value) -> Result<(), ConfigError> {
    let schema: serde_json::Value =
        serde_json::from_str(SCHEMA_JSON).map_err(|e| ConfigError::Validation {
            message: format!("Invalid embedded schema JSON: {}", e),
        })?;

    let validator = jsonschema::validator_for(&schema).map_err(|e| ConfigError::Validation {
        message: format!("Failed to compile JSON schema: {}", e),
    })?;

    let error_messages: Vec<String> = validator
        .iter_errors(json_value)
        .map(|e| e.to_string())
        .collect();
    if !error_messages.is_empty() {
        return Err(ConfigError::SchemaValidation {
            errors: error_messages.join("; "),
        });
    }

    Ok(())
}

fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.version != "1.0" {
        return Err(ConfigError::Validation {
            message: format!("Unsupported config version: {}", config.version),
        });
    }

    if config.root_folder_id.trim().is_empty() {
        return Err(ConfigError::Validation {
            message: format!(
                "root_folder_id is required (set it in the config file or {})",
                ROOT_FOLDER_ENV
            ),
        });
    }

    if config.bind_address.parse::<SocketAddr>().is_err() {
        return Err(ConfigError::Validation {
            message: format!("Invalid bind address: {}", config.bind_address),
        });
    }

    if config.category_path.iter().any(|s| s.trim().is_empty()) {
        return Err(ConfigError::Validation {
            message: "category_path segments must not be empty".to_string(),
        });
    }

    if config.max_file_bytes == 0 {
        return Err(ConfigError::Validation {
            message: "max_file_bytes must be greater than zero".to_string(),
        });
    }

    if config.drive.list_max == 0 {
        return Err(ConfigError::Validation {
            message: "drive.list_max must be greater than zero".to_string(),
        });
    }

    Ok(())
}
