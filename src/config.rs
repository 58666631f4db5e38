use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, bail};
use serde::Deserialize;

/// Environment variable naming the YAML configuration file.
pub const CONFIG_ENV: &str = "HEARTH_CONFIG";

/// File read when `HEARTH_CONFIG` is unset, if it exists.
pub const DEFAULT_CONFIG_PATH: &str = "hearth.yaml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub static_files: StaticFilesConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
    /// Connections handled at the same time
    pub max_workers: usize,
    /// Bound on each read from a client
    pub read_timeout_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8080".to_string(),
            max_workers: 10,
            read_timeout_ms: 5000,
        }
    }
}

impl ServerConfig {
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StaticFilesConfig {
    pub root: PathBuf,
    /// Served for `/`
    pub default_page: String,
    /// Page that echoes POSTed parameters
    pub params_page: String,
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("./www"),
            default_page: "index.html".to_string(),
            params_page: "params_info.html".to_string(),
        }
    }
}

impl Config {
    /// Loads the configuration the binary runs with.
    ///
    /// Reads the file named by `HEARTH_CONFIG`, else `hearth.yaml` when it
    /// exists, else the defaults. `LISTEN` overrides the listen address.
    pub fn load() -> anyhow::Result<Self> {
        let mut cfg = match std::env::var(CONFIG_ENV) {
            Ok(path) => Self::from_file(&path)?,
            Err(_) if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                Self::from_file(DEFAULT_CONFIG_PATH)?
            }
            Err(_) => Self::default(),
        };

        if let Ok(listen_addr) = std::env::var("LISTEN") {
            cfg.server.listen_addr = listen_addr;
        }

        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;

        Self::from_yaml_str(&content)
            .with_context(|| format!("loading config file {}", path.display()))
    }

    pub fn from_yaml_str(content: &str) -> anyhow::Result<Self> {
        let cfg: Config = serde_yaml::from_str(content).context("parsing YAML configuration")?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server.max_workers == 0 {
            bail!("server.max_workers must be at least 1");
        }
        if self.server.read_timeout_ms == 0 {
            bail!("server.read_timeout_ms must be at least 1");
        }
        if self.static_files.default_page.is_empty() {
            bail!("static_files.default_page must not be empty");
        }
        if self.static_files.params_page.is_empty() {
            bail!("static_files.params_page must not be empty");
        }
        Ok(())
    }
}
