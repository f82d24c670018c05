use crate::errors::{AppError, AppResult};
use crate::utils::path::resolve_in;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// What to do when a Team submission carries no members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptyTeamPolicy {
    /// Accept the submission; nothing is written.
    #[default]
    Allow,
    /// Refuse the submission with a validation error.
    Reject,
}

/// How a Team-mode update resolves its target rows at commit time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateResolution {
    /// Update exactly the rows captured when the entry was chosen.
    #[default]
    Snapshot,
    /// Re-evaluate team/date/members against the current table.
    Reresolve,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_created_by")]
    pub created_by: String,
    #[serde(default)]
    pub empty_team_policy: EmptyTeamPolicy,
    #[serde(default)]
    pub team_update_resolution: UpdateResolution,
    #[serde(default = "default_session_ttl")]
    pub session_ttl_minutes: i64,
    #[serde(default = "default_start_time")]
    pub default_start_time: String,
    #[serde(default = "default_finish_time")]
    pub default_finish_time: String,
    #[serde(default = "default_separator_char")]
    pub separator_char: String,
}

fn default_created_by() -> String {
    // no authentication yet: every entry is attributed to the agent itself
    "jcr_agent".to_string()
}

/// One year.
pub const MAX_SESSION_TTL_MINUTES: i64 = 525_600;

fn default_session_ttl() -> i64 {
    240
}
fn default_start_time() -> String {
    "09:00".to_string()
}
fn default_finish_time() -> String {
    "18:00".to_string()
}
fn default_separator_char() -> String {
    "-".to_string()
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
            created_by: default_created_by(),
            empty_team_policy: EmptyTeamPolicy::default(),
            team_update_resolution: UpdateResolution::default(),
            session_ttl_minutes: default_session_ttl(),
            default_start_time: default_start_time(),
            default_finish_time: default_finish_time(),
            separator_char: default_separator_char(),
        }
    }

    /// Return the standard configuration directory (`~/.jcrtracker`)
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".jcrtracker")
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("jcrtracker.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("jcr.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no configuration file, using defaults");
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        let cfg: Config = serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values the workflow cannot run with.
    pub fn validate(&self) -> AppResult<()> {
        if !(1..=MAX_SESSION_TTL_MINUTES).contains(&self.session_ttl_minutes) {
            return Err(AppError::Config(format!(
                "session_ttl_minutes must be between 1 and {MAX_SESSION_TTL_MINUTES}, found {}",
                self.session_ttl_minutes
            )));
        }
        for (key, value) in [
            ("default_start_time", &self.default_start_time),
            ("default_finish_time", &self.default_finish_time),
        ] {
            if crate::utils::time::parse_time(value).is_none() {
                return Err(AppError::Config(format!(
                    "{key} must be HH:MM, found '{value}'"
                )));
            }
        }
        if self.created_by.trim().is_empty() {
            return Err(AppError::Config("created_by must not be empty".into()));
        }
        Ok(())
    }

    /// Initialize configuration and database files
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<Self> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // DB name: user provided or default
        let db_path = match custom_db {
            Some(name) => resolve_in(&dir, &name),
            None => Self::database_file(),
        };

        let config = Config::with_database(db_path.clone());

        // Write config file
        if !is_test {
            let yaml = serde_yaml::to_string(&config).map_err(|_| AppError::ConfigSave)?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }

        Ok(config)
    }
}
