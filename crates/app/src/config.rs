//! Process configuration: command-line flags with environment fallbacks.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use axum_extra::extract::cookie::Key;
use clap::Parser;
use thiserror::Error;
use tracing::warn;

/// Shortest accepted `--secret`; cookie keys are derived from it.
pub const MIN_SECRET_LEN: usize = 32;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid --db value: {raw}")]
    InvalidDbUrl { raw: String },
    #[error("--secret must be at least {MIN_SECRET_LEN} bytes, got {len}")]
    SecretTooShort { len: usize },
    #[error("failed to prepare database file: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Parser)]
#[command(name = "quest-server", about = "Math quests for school grades, served over HTTP")]
pub struct Config {
    /// SQLite database URL or file path.
    #[arg(long = "db", env = "QUEST_DB_URL", default_value = "sqlite://quests.sqlite3")]
    pub db_url: String,

    /// Address to listen on.
    #[arg(long, env = "QUEST_BIND", default_value = "127.0.0.1:5000")]
    pub bind: SocketAddr,

    /// Secret used to sign session cookies. A random one is used when unset.
    #[arg(long, env = "QUEST_SECRET_KEY", hide_env_values = true)]
    pub secret: Option<String>,
}

impl Config {
    /// Normalize the database URL and make sure the backing file exists.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for an unusable URL or when the file or its
    /// parent directory cannot be created.
    pub fn sqlite_url(&self) -> Result<String, ConfigError> {
        if self.db_url.trim().is_empty() {
            return Err(ConfigError::InvalidDbUrl {
                raw: self.db_url.clone(),
            });
        }
        let url = normalize_sqlite_url(&self.db_url);
        prepare_sqlite_file(&url)?;
        Ok(url)
    }

    /// Build the cookie signing key.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::SecretTooShort` for a configured secret under
    /// `MIN_SECRET_LEN` bytes.
    pub fn cookie_key(&self) -> Result<Key, ConfigError> {
        match &self.secret {
            Some(secret) if secret.len() < MIN_SECRET_LEN => {
                Err(ConfigError::SecretTooShort { len: secret.len() })
            }
            Some(secret) => Ok(Key::derive_from(secret.as_bytes())),
            None => {
                warn!("QUEST_SECRET_KEY not set, using a random key; sessions end on restart");
                Ok(Key::generate())
            }
        }
    }
}

fn is_in_memory(url: &str) -> bool {
    url == "sqlite::memory:" || url.contains("mode=memory")
}

/// Turn bare or `sqlite:` relative paths into absolute `sqlite://` URLs.
pub fn normalize_sqlite_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if is_in_memory(trimmed) || trimmed.starts_with("sqlite://") {
        return trimmed.to_owned();
    }

    let path = Path::new(trimmed.strip_prefix("sqlite:").unwrap_or(trimmed));
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), ConfigError> {
    if is_in_memory(db_url) {
        return Ok(());
    }

    let invalid = || ConfigError::InvalidDbUrl {
        raw: db_url.to_owned(),
    };
    let rest = db_url.strip_prefix("sqlite://").ok_or_else(invalid)?;
    let path = rest.split('?').next().unwrap_or(rest);
    if path.is_empty() {
        return Err(invalid());
    }

    let path = Path::new(path);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(args: &[&str]) -> Config {
        let mut argv = vec!["quest-server"];
        argv.extend_from_slice(args);
        Config::try_parse_from(argv).unwrap()
    }

    #[test]
    fn flags_override_defaults() {
        let cfg = config(&["--db", "sqlite::memory:", "--bind", "0.0.0.0:8080"]);
        assert_eq!(cfg.db_url, "sqlite::memory:");
        assert_eq!(cfg.bind, "0.0.0.0:8080".parse().unwrap());
    }

    #[test]
    fn relative_paths_become_absolute_urls() {
        let url = normalize_sqlite_url("data/quests.sqlite3");
        assert!(url.starts_with("sqlite:///"), "{url}");
        assert!(url.ends_with("data/quests.sqlite3"));

        let url = normalize_sqlite_url("sqlite:quests.sqlite3");
        assert!(url.starts_with("sqlite:///"), "{url}");

        assert_eq!(normalize_sqlite_url("sqlite::memory:"), "sqlite::memory:");
    }

    #[test]
    fn database_file_and_parent_are_created() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("nested").join("quests.sqlite3");
        let cfg = config(&["--db", file.to_str().unwrap()]);

        let url = cfg.sqlite_url().unwrap();
        assert!(url.starts_with("sqlite://"));
        assert!(file.exists());
    }

    #[test]
    fn short_secret_is_rejected() {
        let cfg = config(&["--secret", "too-short"]);
        assert!(matches!(
            cfg.cookie_key(),
            Err(ConfigError::SecretTooShort { len: 9 })
        ));

        let cfg = config(&["--secret", &"k".repeat(MIN_SECRET_LEN)]);
        assert!(cfg.cookie_key().is_ok());
    }
}
