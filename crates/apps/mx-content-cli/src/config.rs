use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Env var naming a config file, consulted when `--config` is not given.
pub const CONFIG_ENV: &str = "MXC_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// Default `env_logger` filter when no `-v` flag is given.
    pub log_level: Option<String>,
    #[serde(default)]
    pub pretty: bool,
    #[serde(default)]
    pub encode: EncodeConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EncodeConfig {
    /// Also emit the stable keys when building content.
    #[serde(default)]
    pub promote_stable: bool,
    /// Asset attached to built content when `--asset` is not given.
    pub default_asset: Option<String>,
}

impl CliConfig {
    pub fn from_toml(input: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(input)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, std::io::Error> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
            .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidData, err))
    }

    /// Loads `explicit`, else the file named by [`CONFIG_ENV`], else defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, std::io::Error> {
        match resolve_path(explicit) {
            Some(path) => {
                log::debug!("loading config from {}", path.display());
                Self::from_path(path)
            }
            None => Ok(Self::default()),
        }
    }
}

fn resolve_path(explicit: Option<&Path>) -> Option<PathBuf> {
    explicit
        .map(Path::to_path_buf)
        .or_else(|| std::env::var_os(CONFIG_ENV).filter(|raw| !raw.is_empty()).map(PathBuf::from))
}
