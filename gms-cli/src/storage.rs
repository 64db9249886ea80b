//! Record file storage adapter for Inventory
//!
//! One record per line in the comma-separated record format. Saving keeps a
//! copy of the previous file next to it with a `.bak` suffix.

use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use gms_core::{Inventory, Item};
use tracing::{debug, info, warn};

use crate::error::{CliError, Result};

/// Record file storage adapter
pub struct RecordStorage {
    path: PathBuf,
}

impl RecordStorage {
    /// Create a new storage adapter for the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the storage path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the inventory; a missing file is an empty inventory.
    ///
    /// Lines that fail to parse, and repeated SKUs, are skipped with a warning.
    pub fn load(&self) -> Result<Inventory> {
        let mut inventory = Inventory::new();

        if !self.path.exists() {
            debug!(path = %self.path.display(), "no inventory file yet");
            return Ok(inventory);
        }

        let file = fs::File::open(&self.path)
            .map_err(|e| CliError::io(format!("Failed to open {}", self.path.display()), e))?;
        let reader = BufReader::new(file);

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let outcome = Item::from_record(&line).and_then(|item| inventory.insert(item));
            if let Err(e) = outcome {
                warn!(line = index + 1, error = %e, "skipping invalid record");
            }
        }

        debug!(path = %self.path.display(), count = inventory.len(), "inventory loaded");
        Ok(inventory)
    }

    /// Save the inventory, backing up the previous file first
    pub fn save(&self, inventory: &Inventory) -> Result<()> {
        self.backup()?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)
            .map_err(|e| CliError::io(format!("Failed to write {}", self.path.display()), e))?;
        let mut out = BufWriter::new(file);

        for item in inventory {
            item.store(&mut out, true)?;
        }
        out.flush()?;

        info!(path = %self.path.display(), count = inventory.len(), "inventory saved");
        Ok(())
    }

    /// Copy the current file to the backup path
    pub fn backup(&self) -> Result<()> {
        if !self.path.exists() {
            return Ok(());
        }

        fs::copy(&self.path, self.backup_path())?;
        Ok(())
    }

    /// Load the inventory from the backup file
    pub fn recover(&self) -> Result<Inventory> {
        let backup_path = self.backup_path();

        if !backup_path.exists() {
            return Err(CliError::storage("Backup file not found"));
        }

        RecordStorage::new(backup_path).load()
    }

    /// Check if backup exists
    pub fn backup_exists(&self) -> bool {
        self.backup_path().exists()
    }

    fn backup_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(".bak");
        PathBuf::from(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn storage_in(dir: &TempDir) -> RecordStorage {
        RecordStorage::new(dir.path().join("inventory.txt"))
    }

    fn sample() -> Inventory {
        let mut inventory = Inventory::new();
        inventory
            .insert(Item::from_record("N,4321,rice,kg,1,100,2,10").unwrap())
            .unwrap();
        inventory
            .insert(Item::from_record("P,1234,water,liter,0,1.5,1,5,2018/03/28").unwrap())
            .unwrap();
        inventory
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let inventory = storage_in(&dir).load().unwrap();
        assert!(inventory.is_empty());
    }

    #[test]
    fn test_save_writes_one_record_per_line() {
        let dir = TempDir::new().unwrap();
        let storage = storage_in(&dir);

        storage.save(&sample()).unwrap();

        let contents = fs::read_to_string(storage.path()).unwrap();
        assert_eq!(
            contents,
            "N,4321,rice,kg,1,100,2,10\nP,1234,water,liter,0,1.5,1,5,2018/03/28\n"
        );

        let loaded = storage.load().unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.find("1234"), sample().find("1234"));
    }

    #[test]
    fn test_load_skips_invalid_lines() {
        let dir = TempDir::new().unwrap();
        let storage = storage_in(&dir);
        fs::write(
            storage.path(),
            "N,4321,rice,kg,1,100,2,10\n\nX,bad\nN,4321,dupe,kg,0,1,1,1\nP,1234,water,liter,0,abc,1,5,2018/03/28\n",
        )
        .unwrap();

        let inventory = storage.load().unwrap();
        assert_eq!(inventory.len(), 1);
        assert_eq!(inventory.find("4321").and_then(Item::name), Some("rice"));
    }

    #[test]
    fn test_backup_and_recover() {
        let dir = TempDir::new().unwrap();
        let storage = storage_in(&dir);
        assert!(!storage.backup_exists());
        assert!(storage.recover().is_err());

        storage.save(&sample()).unwrap();
        assert!(!storage.backup_exists());

        let mut changed = sample();
        changed.remove("4321").unwrap();
        storage.save(&changed).unwrap();
        assert!(storage.backup_exists());
        assert!(dir.path().join("inventory.txt.bak").exists());

        let recovered = storage.recover().unwrap();
        assert_eq!(recovered.len(), 2);
        assert!(recovered.find("4321").is_some());
    }
}
