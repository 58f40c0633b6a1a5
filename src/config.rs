use crate::error::{E2eError, Result};
use crate::types::config::E2eConfig;
use std::path::{Path, PathBuf};
use toml::map::Map;
use toml::Value;
use tracing::debug;

pub const DEFAULT_CONFIG_FILE: &str = "kn-e2e.toml";
pub const DEFAULT_LOCAL_FILE: &str = ".kn-e2e/local.toml";
pub const DEFAULT_GLOBAL_CONFIG_FILE: &str = ".config/kn-e2e/config.toml";

pub const ENV_BINARY: &str = "KN_E2E_BINARY";
pub const ENV_NAMESPACE: &str = "KN_E2E_NAMESPACE";
pub const ENV_IMAGE: &str = "KN_E2E_IMAGE";

/// Loads the merged configuration for `root`, then applies environment overrides.
pub fn load_config(root: &Path) -> Result<E2eConfig> {
    let global = std::env::var_os("HOME")
        .map(PathBuf::from)
        .map(|home| home.join(DEFAULT_GLOBAL_CONFIG_FILE));
    let mut cfg = load_config_with_global(root, global.as_deref())?;
    apply_env_overrides(&mut cfg, |key| std::env::var(key).ok());
    Ok(cfg)
}

pub(crate) fn load_config_with_global(root: &Path, global_path: Option<&Path>) -> Result<E2eConfig> {
    let mut merged = Value::Table(Map::new());
    if let Some(path) = global_path {
        merge_file_if_exists(&mut merged, path)?;
    }
    merge_file_if_exists(&mut merged, &root.join(DEFAULT_CONFIG_FILE))?;
    merge_file_if_exists(&mut merged, &root.join(DEFAULT_LOCAL_FILE))?;

    merged
        .try_into()
        .map_err(|e: toml::de::Error| E2eError::ConfigParse(e.to_string()))
}

pub(crate) fn apply_env_overrides<F>(cfg: &mut E2eConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
    if let Some(binary) = non_empty(ENV_BINARY) {
        cfg.client.binary = binary;
    }
    if let Some(prefix) = non_empty(ENV_NAMESPACE) {
        cfg.test.namespace_prefix = prefix;
    }
    if let Some(image) = non_empty(ENV_IMAGE) {
        cfg.test.image = image;
    }
}

fn merge_file_if_exists(merged: &mut Value, path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }
    debug!(path = %path.display(), "merging config file");
    let value = read_toml_value(path)?;
    merge_toml(merged, value);
    Ok(())
}

fn read_toml_value(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| E2eError::ConfigParse(format!("{}: {}", path.display(), e)))
}

fn merge_toml(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Table(base_table), Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                match base_table.get_mut(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => {
                        base_table.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => {
            *slot = value;
        }
    }
}
