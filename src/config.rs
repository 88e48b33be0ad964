use crate::error::{Result, StarcutError};
use crate::types::config::StarcutConfig;
use std::path::Path;
use toml::map::Map;
use toml::Value;

pub const DEFAULT_CONFIG_FILE: &str = "starcut.toml";
pub const DEFAULT_LOCAL_FILE: &str = ".starcut/local.toml";

/// Load the optional engine config from the data directory:
/// `starcut.toml` overlaid by `.starcut/local.toml`.
pub fn load_config(root: &Path) -> Result<Option<StarcutConfig>> {
    let base_path = root.join(DEFAULT_CONFIG_FILE);
    if !base_path.exists() {
        return Ok(None);
    }

    let mut merged = Value::Table(Map::new());
    merge_file_if_exists(&mut merged, &base_path)?;
    merge_file_if_exists(&mut merged, &root.join(DEFAULT_LOCAL_FILE))?;

    let cfg: StarcutConfig = merged
        .try_into()
        .map_err(|e: toml::de::Error| StarcutError::ConfigParse(e.to_string()))?;
    Ok(Some(cfg))
}

fn merge_file_if_exists(merged: &mut Value, path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }
    let content = std::fs::read_to_string(path)?;
    let value: Value = toml::from_str(&content)
        .map_err(|e| StarcutError::ConfigParse(format!("{}: {e}", path.display())))?;
    merge_toml(merged, value);
    Ok(())
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
