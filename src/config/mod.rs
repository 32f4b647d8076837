use crate::errors::{AppError, AppResult};
use crate::db::migrate::MigrationSeed;
use crate::models::job::DEFAULT_RATE;
use crate::models::settings::{PaySettings, default_multiplier, default_threshold};
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default = "default_rate")]
    pub default_rate: f64,
    #[serde(default = "default_threshold")]
    pub overtime_threshold_hours: f64,
    #[serde(default = "default_multiplier")]
    pub overtime_multiplier: f64,
    #[serde(default)]
    pub break_minutes: i64,
    #[serde(default)]
    pub rounding_minutes: i64,
}

fn default_currency() -> String {
    "€".to_string()
}
fn default_rate() -> f64 {
    DEFAULT_RATE
}

/// Keys accepted by `config --set`.
pub const SETTABLE_KEYS: &[&str] = &[
    "currency",
    "default_rate",
    "overtime_threshold_hours",
    "overtime_multiplier",
    "break_minutes",
    "rounding_minutes",
];

impl Default for Config {
    fn default() -> Self {
        let db_path = Self::database_file();
        Self {
            database: db_path.to_string_lossy().to_string(),
            currency: default_currency(),
            default_rate: default_rate(),
            overtime_threshold_hours: default_threshold(),
            overtime_multiplier: default_multiplier(),
            break_minutes: 0,
            rounding_minutes: 0,
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rpaylog")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".rpaylog")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rpaylog.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rpaylog.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path)?;
        let mut cfg: Config = serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;
        cfg.pay_settings()
            .validate()
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;
        cfg.database = expand_tilde(&cfg.database).to_string_lossy().to_string();
        Ok(cfg)
    }

    pub fn save(&self) -> AppResult<()> {
        fs::create_dir_all(Self::config_dir())?;
        let yaml = serde_yaml::to_string(self)?;
        let mut file = fs::File::create(Self::config_file())?;
        file.write_all(yaml.as_bytes())?;
        Ok(())
    }

    pub fn pay_settings(&self) -> PaySettings {
        PaySettings {
            overtime_threshold_hours: self.overtime_threshold_hours,
            overtime_multiplier: self.overtime_multiplier,
            break_minutes: self.break_minutes,
            rounding_minutes: self.rounding_minutes,
        }
    }

    pub fn migration_seed(&self) -> MigrationSeed {
        MigrationSeed {
            default_rate: self.default_rate,
        }
    }

    pub fn apply_pay_settings(&mut self, s: &PaySettings) {
        self.overtime_threshold_hours = s.overtime_threshold_hours;
        self.overtime_multiplier = s.overtime_multiplier;
        self.break_minutes = s.break_minutes;
        self.rounding_minutes = s.rounding_minutes;
    }

    /// Initialize configuration and database files.
    ///
    /// Settings already loaded in `base` are kept; only the database path
    /// is replaced.
    pub fn init_all(
        base: &Config,
        custom_name: Option<String>,
        is_test: bool,
    ) -> io::Result<PathBuf> {
        let dir = Self::config_dir();
        if !is_test {
            fs::create_dir_all(&dir)?;
        }

        // DB name: user provided or default
        let db_path = if let Some(name) = custom_name {
            let p = expand_tilde(&name);
            if p.is_absolute() { p } else { dir.join(p) }
        } else {
            Self::database_file()
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..base.clone()
        };

        // Write config file
        if !is_test {
            let yaml = serde_yaml::to_string(&config).map_err(io::Error::other)?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }

        Ok(db_path)
    }
}
