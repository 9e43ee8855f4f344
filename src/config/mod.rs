use crate::errors::{AppError, AppResult};
use crate::i18n::Locale;
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments_dir: Option<String>,
    #[serde(default)]
    pub locale: Locale,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt_font: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt_font_bold: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self::with_database(Self::database_file())
    }
}

impl Config {
    fn with_database(db_path: PathBuf) -> Self {
        Self {
            database: db_path.to_string_lossy().to_string(),
            attachments_dir: None,
            locale: Locale::default(),
            receipt_font: None,
            receipt_font_bold: None,
        }
    }

    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("officedesk")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".officedesk")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("officedesk.conf")
    }

    /// Return the default path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("company_data.db")
    }

    /// Database path with `~` expanded.
    pub fn database_path(&self) -> PathBuf {
        expand_tilde(&self.database)
    }

    /// Attachments live next to the database unless configured otherwise.
    pub fn attachments_path(&self) -> PathBuf {
        match &self.attachments_dir {
            Some(dir) => expand_tilde(dir),
            None => self
                .database_path()
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default()
                .join("attachments"),
        }
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).map_err(|e| AppError::ConfigLoad(path.clone(), e))?;
        serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn save(&self) -> AppResult<()> {
        let path = Self::config_file();
        let save_err = |e: io::Error| AppError::ConfigSave(path.clone(), e);

        fs::create_dir_all(Self::config_dir()).map_err(save_err)?;
        let yaml = serde_yaml::to_string(self).map_err(|e| AppError::Config(e.to_string()))?;
        let mut file = fs::File::create(&path).map_err(save_err)?;
        file.write_all(yaml.as_bytes()).map_err(save_err)?;
        Ok(())
    }

    /// Initialize configuration and database files.
    /// Returns the configuration that was written (or would have been, in test mode).
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<Self> {
        let dir = Self::config_dir();

        // DB name: user provided or default
        let db_path = match custom_db {
            Some(name) => {
                let p = expand_tilde(&name);
                if p.is_absolute() { p } else { dir.join(p) }
            }
            None => Self::database_file(),
        };

        let config = Self::with_database(db_path.clone());

        if !is_test {
            config.save()?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent).map_err(|e| AppError::Storage(parent.to_path_buf(), e))?;
        }

        // Create empty DB file if not exists
        if !db_path.exists() {
            fs::File::create(&db_path).map_err(|e| {
                AppError::from(io::Error::new(
                    e.kind(),
                    format!("Cannot create database {}: {}", db_path.display(), e),
                ))
            })?;
        }

        println!("✅ Database:    {:?}", db_path);

        Ok(config)
    }
}
