use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::errors::{AppError, AppResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    pub employer_name: String,
    /// Minutes the employee is expected to work per day.
    #[serde(default = "default_expected_work_minutes")]
    pub expected_work_minutes: i64,
    /// When true the daily sequence must include the break pair and the
    /// break duration is subtracted from worked time.
    #[serde(default = "default_lunch_control")]
    pub lunch_control: bool,
    /// Two same-kind punches closer than this are flagged as duplicates.
    #[serde(default = "default_duplicate_window")]
    pub duplicate_window_secs: i64,
    /// Key for the integrity tags. Generated at init; changing it invalidates
    /// every stored tag.
    #[serde(default)]
    pub integrity_key: String,
}

fn default_expected_work_minutes() -> i64 {
    480
}
fn default_lunch_control() -> bool {
    false
}
fn default_duplicate_window() -> i64 {
    60
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            employer_name: String::new(),
            expected_work_minutes: default_expected_work_minutes(),
            lunch_control: default_lunch_control(),
            duplicate_window_secs: default_duplicate_window(),
            integrity_key: String::new(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rponto")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".rponto")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rponto.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rponto.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            serde_yaml::from_str(&content)
                .map_err(|e| AppError::Config(format!("cannot parse {}: {}", path.display(), e)))
        } else {
            Ok(Self::default())
        }
    }

    /// Initialize configuration and database files
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> io::Result<Self> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // DB name: user provided or default
        let db_path = if let Some(name) = custom_db {
            let p = std::path::Path::new(&name);
            if p.is_absolute() {
                p.to_path_buf()
            } else {
                dir.join(p)
            }
        } else {
            Self::database_file()
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            integrity_key: fresh_integrity_key(),
            ..Config::default()
        };

        // Write config file
        if !is_test {
            let yaml = serde_yaml::to_string(&config)
                .map_err(|e| io::Error::other(format!("cannot serialize config: {}", e)))?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        Ok(config)
    }
}

/// Random-enough key for a fresh installation: the key only needs to be
/// unpredictable per install, and init is not a hot path.
fn fresh_integrity_key() -> String {
    let seed = format!(
        "{}-{}-{}",
        uuid::Uuid::new_v4(),
        std::process::id(),
        chrono::Local::now().to_rfc3339()
    );
    crate::core::integrity::tag_fields(&seed, &["install"])
}
