//! Console configuration. An explicitly named file wins, then
//! `~/.config/stockdesk.toml`, then `./stockdesk.toml`; `STOCKDESK_*`
//! environment variables fill whatever is still unset.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConsoleConfig {
    /// Base URL of the remote service, e.g. `http://localhost:8080`.
    pub base_url: Option<String>,
    /// Directory holding `<dataset>.json` dumps for the file source.
    pub data_dir: Option<PathBuf>,
    /// `client` (bulk fetch + local evaluation) or `server`.
    pub mode: Option<String>,
    pub page_size: Option<usize>,
    /// Seconds a cached dataset snapshot stays fresh.
    pub stale_secs: Option<u64>,
    pub log_config: Option<PathBuf>,
}

impl ConsoleConfig {
    #[must_use]
    pub fn stale_after(&self) -> Duration {
        Duration::from_secs(self.stale_secs.unwrap_or(60))
    }

    fn merge_missing_from(&mut self, other: Self) {
        if self.base_url.is_none() {
            self.base_url = other.base_url;
        }
        if self.data_dir.is_none() {
            self.data_dir = other.data_dir;
        }
        if self.mode.is_none() {
            self.mode = other.mode;
        }
        if self.page_size.is_none() {
            self.page_size = other.page_size;
        }
        if self.stale_secs.is_none() {
            self.stale_secs = other.stale_secs;
        }
        if self.log_config.is_none() {
            self.log_config = other.log_config;
        }
    }
}

/// Load configuration, folding in every layer that exists.
#[must_use]
pub fn load(explicit: Option<PathBuf>) -> ConsoleConfig {
    let mut cfg = ConsoleConfig::default();

    let mut paths: Vec<PathBuf> = Vec::new();
    if let Some(p) = explicit {
        paths.push(p);
    }
    if let Ok(p) = std::env::var("STOCKDESK_CONFIG") {
        paths.push(PathBuf::from(p));
    }
    if let Some(dir) = dirs_next::config_dir() {
        paths.push(dir.join("stockdesk.toml"));
    }
    if let Ok(cur) = std::env::current_dir() {
        paths.push(cur.join("stockdesk.toml"));
    }
    for path in paths {
        if path.exists()
            && let Ok(body) = std::fs::read_to_string(&path)
        {
            match toml::from_str::<ConsoleConfig>(&body) {
                Ok(file_cfg) => cfg.merge_missing_from(file_cfg),
                Err(e) => log::warn!("config: skipping {}: {e}", path.display()),
            }
        }
    }

    if cfg.base_url.is_none()
        && let Ok(s) = std::env::var("STOCKDESK_BASE_URL")
    {
        cfg.base_url = Some(s);
    }
    if cfg.data_dir.is_none()
        && let Ok(s) = std::env::var("STOCKDESK_DATA_DIR")
    {
        cfg.data_dir = Some(PathBuf::from(s));
    }
    if cfg.mode.is_none()
        && let Ok(s) = std::env::var("STOCKDESK_MODE")
    {
        cfg.mode = Some(s);
    }
    cfg
}
