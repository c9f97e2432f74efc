use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::Error;

pub const DEFAULT_FILE_COUNT: u32 = 3;
pub const DEFAULT_FILE_SIZE: u64 = 100 * 1024 * 1024;
pub const DEFAULT_NAME_PATTERN: &str = "file{i}.txt";
pub const DEFAULT_CHUNK_SIZE: usize = 1024 * 1024 * 2;
pub const MAX_CONCURRENCY: u8 = 64;

/// Placeholder in `name_pattern` replaced by the 1-based file index.
pub const INDEX_PLACEHOLDER: &str = "{i}";

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct GeneratorConfig {
    pub file_count: u32,
    pub file_size_bytes: u64,
    pub name_pattern: String,
    pub dir: PathBuf,
    pub chunk_size: usize,
    pub concurrency: u8,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            file_count: DEFAULT_FILE_COUNT,
            file_size_bytes: DEFAULT_FILE_SIZE,
            name_pattern: DEFAULT_NAME_PATTERN.to_string(),
            dir: PathBuf::from("."),
            chunk_size: DEFAULT_CHUNK_SIZE,
            concurrency: 1,
        }
    }
}

impl GeneratorConfig {
    pub fn validate(&self) -> Result<(), Error> {
        if self.chunk_size == 0 {
            return Err(Error::InvalidConfig("chunk_size cannot be 0".to_string()));
        }

        if self.concurrency == 0 || self.concurrency > MAX_CONCURRENCY {
            return Err(Error::InvalidConfig(format!(
                "concurrency should be in 1..={}, got {}",
                MAX_CONCURRENCY, self.concurrency
            )));
        }

        if self.file_count > 1 && !self.name_pattern.contains(INDEX_PLACEHOLDER) {
            return Err(Error::InvalidConfig(format!(
                "name_pattern {:?} has no {} placeholder, {} files would share one name",
                self.name_pattern, INDEX_PLACEHOLDER, self.file_count
            )));
        }

        // the longest expansion is the one with the most digits
        for index in [1, self.file_count.max(1)] {
            let name = self.file_name(index);
            if !valid_file_name(&name) {
                return Err(Error::InvalidConfig(format!(
                    "name_pattern {:?} expands to an invalid file name {:?}",
                    self.name_pattern, name
                )));
            }
        }

        Ok(())
    }

    pub fn file_name(&self, index: u32) -> String {
        self.name_pattern
            .replace(INDEX_PLACEHOLDER, &index.to_string())
    }

    pub fn file_path(&self, index: u32) -> PathBuf {
        self.dir.join(self.file_name(index))
    }
}

/// Returns true if `name` names a single entry, with no directory component.
pub fn valid_file_name(name: &str) -> bool {
    if name.is_empty() || name.trim() != name || name.len() > 96 {
        return false;
    }

    let p = Path::new(name);
    p.file_name() == Some(p.as_os_str())
}
