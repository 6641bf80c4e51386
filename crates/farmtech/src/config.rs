//! Storage location configuration.

use std::env;
use std::path::{Path, PathBuf};

/// Default name of the JSON document holding every culture.
pub const DEFAULT_JSON_FILE: &str = "farmtech_data.json";

/// Default name of the tabular export.
pub const DEFAULT_CSV_FILE: &str = "farmtech_cultures.csv";

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "FARMTECH_DATA_DIR";

/// Where cultures are persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// Directory holding both files.
    pub data_dir: PathBuf,
    /// File name of the JSON document.
    pub json_file: String,
    /// File name of the CSV export.
    pub csv_file: String,
}

impl StorageConfig {
    /// Use the default file names inside a directory.
    pub fn in_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            json_file: DEFAULT_JSON_FILE.to_string(),
            csv_file: DEFAULT_CSV_FILE.to_string(),
        }
    }

    /// Resolve the data directory.
    ///
    /// Order: the explicit directory, then `FARMTECH_DATA_DIR`, then the
    /// directory of the running executable, then the working directory.
    pub fn resolve(explicit: Option<PathBuf>) -> Self {
        let env_dir = env::var_os(DATA_DIR_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        let data_dir = explicit
            .or(env_dir)
            .or_else(executable_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        Self::in_dir(data_dir)
    }

    /// Override the JSON file name.
    pub fn with_json_file(mut self, name: impl Into<String>) -> Self {
        self.json_file = name.into();
        self
    }

    /// Override the CSV file name.
    pub fn with_csv_file(mut self, name: impl Into<String>) -> Self {
        self.csv_file = name.into();
        self
    }

    /// Full path of the JSON document.
    pub fn json_path(&self) -> PathBuf {
        self.data_dir.join(&self.json_file)
    }

    /// Full path of the CSV export.
    pub fn csv_path(&self) -> PathBuf {
        self.data_dir.join(&self.csv_file)
    }
}

fn executable_dir() -> Option<PathBuf> {
    env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .or_else(|| env::current_dir().ok())
}
