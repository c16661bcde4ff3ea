use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::Result;


/// Engine configuration handed to `EngineProvider::init`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridConfig {
    #[serde(default = "default_column")]
    pub column: u32,
    #[serde(default = "default_row")]
    pub row: u32,
    /// CSS length per row. Default: `2.5vw`.
    #[serde(default = "default_cell_height")]
    pub cell_height: String,
    #[serde(default = "default_row")]
    pub min_row: u32,
    #[serde(default)]
    pub disable_one_column_mode: bool,
    #[serde(default)]
    pub float: bool,
    #[serde(default = "default_margin")]
    pub margin: String,
    /// Resize handle corners. Default: `se` (bottom-right only).
    #[serde(default = "default_resize_handles")]
    pub resize_handles: String,
    /// Container the engine binds to.
    #[serde(default = "default_selector")]
    pub selector: String,
}

fn default_column() -> u32 {
    17
}

fn default_row() -> u32 {
    22
}

fn default_cell_height() -> String {
    "2.5vw".into()
}

fn default_margin() -> String {
    "1px".into()
}

fn default_resize_handles() -> String {
    "se".into()
}

fn default_selector() -> String {
    ".grid-stack".into()
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig {
            column: default_column(),
            row: default_row(),
            cell_height: default_cell_height(),
            min_row: default_row(),
            disable_one_column_mode: false,
            float: false,
            margin: default_margin(),
            resize_handles: default_resize_handles(),
            selector: default_selector(),
        }
    }
}


/// Defaults for newly added items and the minimum size enforced on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDefaults {
    #[serde(default = "default_min")]
    pub min_w: u32,
    #[serde(default = "default_min")]
    pub min_h: u32,
    #[serde(default = "default_min")]
    pub w: u32,
    #[serde(default = "default_min")]
    pub h: u32,
    #[serde(default = "default_content")]
    pub content: String,
}

fn default_min() -> u32 {
    3
}

fn default_content() -> String {
    "New Ad Space".into()
}

impl Default for ItemDefaults {
    fn default() -> Self {
        ItemDefaults {
            min_w: default_min(),
            min_h: default_min(),
            w: default_min(),
            h: default_min(),
            content: default_content(),
        }
    }
}


/// Everything a host may override through `settings.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSettings {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub item: ItemDefaults,
}

impl GridSettings {
    pub fn from_yaml(input: &str) -> Result<GridSettings> {
        if input.trim().is_empty() {
            return Ok(GridSettings::default());
        }
        Ok(serde_yaml::from_str(input)?)
    }

    /// Load settings from a file. Missing or invalid files fall back to defaults.
    pub fn load(path: &Path) -> GridSettings {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(_) => return GridSettings::default(),
        };
        match Self::from_yaml(&content) {
            Ok(settings) => {
                info!(path = %path.display(), "settings loaded");
                settings
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring invalid settings file");
                GridSettings::default()
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_fixed_grid() {
        let cfg = GridConfig::default();
        assert_eq!(cfg.column, 17);
        assert_eq!(cfg.row, 22);
        assert_eq!(cfg.min_row, 22);
        assert_eq!(cfg.cell_height, "2.5vw");
        assert_eq!(cfg.margin, "1px");
        assert_eq!(cfg.resize_handles, "se");
        assert!(!cfg.float);
        assert!(!cfg.disable_one_column_mode);
    }

    #[test]
    fn item_defaults() {
        let item = ItemDefaults::default();
        assert_eq!((item.w, item.h, item.min_w, item.min_h), (3, 3, 3, 3));
        assert_eq!(item.content, "New Ad Space");
    }

    #[test]
    fn empty_yaml_gives_defaults() {
        assert_eq!(GridSettings::from_yaml("").unwrap(), GridSettings::default());
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let settings = GridSettings::from_yaml("grid:\n  margin: 4px\nitem:\n  content: Slot\n").unwrap();
        assert_eq!(settings.grid.margin, "4px");
        assert_eq!(settings.grid.column, 17);
        assert_eq!(settings.item.content, "Slot");
        assert_eq!(settings.item.min_w, 3);
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        assert!(GridSettings::from_yaml("grid: [1, 2").is_err());
    }

    #[test]
    fn missing_file_gives_defaults() {
        let path = std::env::temp_dir().join(format!("adgrid-missing-{}.yaml", std::process::id()));
        assert_eq!(GridSettings::load(&path), GridSettings::default());
    }
}
