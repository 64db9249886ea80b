//! User configuration, loaded through confy

use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the inventory file and its backup
    pub data_directory: String,
    /// Inventory file name inside `data_directory`
    pub inventory_filename: String,
}

impl Config {
    /// Full path of the inventory file
    pub fn inventory_path(&self) -> PathBuf {
        PathBuf::from(&self.data_directory).join(&self.inventory_filename)
    }
}

impl Default for Config {
    fn default() -> Self {
        let data_directory = ProjectDirs::from("", "", "gms")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));

        Self {
            data_directory: data_directory.to_string_lossy().into_owned(),
            inventory_filename: "inventory.txt".to_string(),
        }
    }
}
