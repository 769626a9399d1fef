use color_eyre::{eyre::eyre, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

pub const DEFAULT_API_URL: &str = "https://official-joke-api.appspot.com/random_joke";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
  /// Endpoint returning a single random joke as JSON
  pub api_url: String,
  /// Path to the joke database (defaults to $XDG_DATA_HOME/jokebox/jokes.db)
  pub database: Option<PathBuf>,
  /// Initial state of the online/offline toggle
  pub start_online: bool,
  /// Fetch a few jokes into the store at startup when it holds fewer than three
  pub seed_on_start: bool,
  /// host:port used to probe connectivity (defaults to the API host)
  pub probe_addr: Option<String>,
  pub probe_interval_secs: u64,
  pub probe_timeout_ms: u64,
  pub request_timeout_secs: u64,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      api_url: DEFAULT_API_URL.to_string(),
      database: None,
      start_online: true,
      seed_on_start: true,
      probe_addr: None,
      probe_interval_secs: 5,
      probe_timeout_ms: 1500,
      request_timeout_secs: 10,
    }
  }
}

impl Config {
  /// Load configuration from file.
  ///
  /// Search order:
  /// 1. Explicit path if provided
  /// 2. ./jokebox.yaml (current directory)
  /// 3. $XDG_CONFIG_HOME/jokebox/config.yaml
  ///
  /// Without any config file the defaults apply.
  pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
    let path = if let Some(p) = explicit_path {
      if p.exists() {
        Some(p.to_path_buf())
      } else {
        return Err(eyre!("Config file not found: {}", p.display()));
      }
    } else {
      Self::find_config_file()
    };

    match path {
      Some(p) => Self::load_from_path(&p),
      None => Ok(Self::default()),
    }
  }

  fn find_config_file() -> Option<PathBuf> {
    // Check current directory
    let local = PathBuf::from("jokebox.yaml");
    if local.exists() {
      return Some(local);
    }

    // Check XDG config directory
    if let Some(config_dir) = dirs::config_dir() {
      let xdg_path = config_dir.join("jokebox").join("config.yaml");
      if xdg_path.exists() {
        return Some(xdg_path);
      }
    }

    None
  }

  fn load_from_path(path: &Path) -> Result<Self> {
    let contents = std::fs::read_to_string(path)
      .map_err(|e| eyre!("Failed to read config file {}: {}", path.display(), e))?;

    Self::parse(&contents).map_err(|e| eyre!("Failed to parse config file {}: {}", path.display(), e))
  }

  fn parse(contents: &str) -> Result<Self> {
    // An empty file deserializes to unit, not to an empty map
    if contents.trim().is_empty() {
      return Ok(Self::default());
    }
    let config: Config = serde_yaml::from_str(contents)?;
    Ok(config)
  }

  pub fn api_url(&self) -> Result<Url> {
    Url::parse(&self.api_url).map_err(|e| eyre!("Invalid api_url '{}': {}", self.api_url, e))
  }

  /// Address probed for connectivity: explicit `probe_addr`, else the API host and port
  pub fn probe_addr(&self) -> Result<String> {
    if let Some(addr) = &self.probe_addr {
      return Ok(addr.clone());
    }

    let url = self.api_url()?;
    let host = url
      .host_str()
      .ok_or_else(|| eyre!("api_url '{}' has no host", self.api_url))?;
    let port = url
      .port_or_known_default()
      .ok_or_else(|| eyre!("api_url '{}' has no port", self.api_url))?;

    Ok(format!("{}:{}", host, port))
  }

  pub fn database_path(&self) -> Result<PathBuf> {
    match &self.database {
      Some(p) => Ok(p.clone()),
      None => Ok(data_dir()?.join("jokes.db")),
    }
  }

  pub fn probe_interval(&self) -> Duration {
    Duration::from_secs(self.probe_interval_secs.max(1))
  }

  pub fn probe_timeout(&self) -> Duration {
    Duration::from_millis(self.probe_timeout_ms)
  }

  pub fn request_timeout(&self) -> Duration {
    Duration::from_secs(self.request_timeout_secs)
  }
}

/// Per-user data directory for the database and the log file
pub fn data_dir() -> Result<PathBuf> {
  let data_dir = dirs::data_dir()
    .or_else(|| dirs::home_dir().map(|p| p.join(".local/share")))
    .ok_or_else(|| eyre!("Could not determine data directory"))?;

  Ok(data_dir.join("jokebox"))
}
