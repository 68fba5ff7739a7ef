use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

use crate::errors::CuratorError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub sources: SourcesConfig,
    pub gateway: GatewayConfig,
    pub output: OutputConfig,
    pub icons: IconConfig,
    pub store: StoreConfig,
    pub probe: ProbeConfig,
    pub blacklist: BlacklistConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesConfig {
    /// File listing playlist locations to merge, one per line
    pub source_list: PathBuf,
    /// Locally validated playlist (output of the probe stage)
    pub working_playlist: PathBuf,
    /// Self-hosted multicast playlist, subject to gateway rewriting
    pub custom_multicast_url: String,
    /// Self-hosted HTTP playlist
    pub custom_http_url: String,
    pub fetch_timeout_secs: u64,
}

/// Gateway the private multicast relay URLs are rewritten to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub dir: PathBuf,
    /// Merged playlist produced by the merge stage
    pub total_playlist: PathBuf,
    /// Side artifact: the multicast source after gateway rewriting
    pub rewritten_multicast: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IconConfig {
    pub base_url: String,
    pub extension: String,
    pub max_name_chars: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Learned-alias mapping, persisted across runs
    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeConfig {
    pub timeout_secs: u64,
    pub concurrency: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlacklistConfig {
    /// Domain substrings; any URL containing one is flagged
    pub domains: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sources: SourcesConfig {
                source_list: PathBuf::from("m3u_sources/list.txt"),
                working_playlist: PathBuf::from("output/working.m3u"),
                custom_multicast_url: "https://raw.githubusercontent.com/sumingyd/Telecom-Shandong-IPTV-List/refs/heads/main/Telecom-Shandong-Multicast.m3u".to_string(),
                custom_http_url: "https://raw.githubusercontent.com/sumingyd/Telecom-Shandong-IPTV-List/refs/heads/main/Telecom-Shandong.m3u".to_string(),
                fetch_timeout_secs: 10,
            },
            gateway: GatewayConfig {
                host: "192.168.31.2".to_string(),
                port: 4022,
            },
            output: OutputConfig {
                dir: PathBuf::from("output"),
                total_playlist: PathBuf::from("output/total.m3u"),
                rewritten_multicast: PathBuf::from("custom_m3u/Telecom-Shandong-Multicast-local.m3u"),
            },
            icons: IconConfig {
                base_url: "https://raw.githubusercontent.com/fanmingming/live/main/tv/".to_string(),
                extension: ".png".to_string(),
                max_name_chars: 60,
            },
            store: StoreConfig {
                path: PathBuf::from("data/learned_aliases.json"),
            },
            probe: ProbeConfig {
                timeout_secs: 5,
                concurrency: 8,
            },
            blacklist: BlacklistConfig { domains: Vec::new() },
        }
    }
}

impl Config {
    /// Load configuration from the given file, writing the default
    /// configuration there first if the file does not exist yet.
    pub fn load<P: AsRef<Path>>(config_file: P) -> Result<Self> {
        let config_file = config_file.as_ref();

        if config_file.exists() {
            let contents = std::fs::read_to_string(config_file)?;
            let config: Config = toml::from_str(&contents)?;
            config.validate()?;
            Ok(config)
        } else {
            let default_config = Self::default();
            let contents = toml::to_string_pretty(&default_config)?;
            if let Some(parent) = config_file.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            std::fs::write(config_file, contents)?;
            Ok(default_config)
        }
    }

    fn validate(&self) -> Result<(), CuratorError> {
        if self.gateway.host.trim().is_empty() {
            return Err(CuratorError::configuration("gateway.host must not be empty"));
        }
        if Url::parse(&self.icons.base_url).is_err() {
            return Err(CuratorError::configuration(format!(
                "icons.base_url is not a valid URL: {}",
                self.icons.base_url
            )));
        }
        Ok(())
    }
}
