//! Layered configuration for the kitab pipeline.
//!
//! Values are merged in this order, later layers winning:
//!
//! 1. built-in defaults,
//! 2. a configuration file (TOML, YAML or JSON, picked by extension),
//! 3. environment variables prefixed with `KITAB_`, with `__` separating
//!    nested keys (`KITAB_PAGE_RANGE__START=10`).

pub mod error;

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use kitab_extract::PageOptions;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{ErrorKind, Result};

pub const ENV_PREFIX: &str = "KITAB_";
const ENV_SEPARATOR: &str = "__";
const CONFIG_FILE_NAME: &str = "config.toml";

/// An inclusive range of printed page numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRange {
    pub start: u32,
    pub end: u32,
}
impl PageRange {
    pub fn contains(&self, page: u32) -> bool {
        (self.start..=self.end).contains(&page)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Only emit pages whose printed number falls in this range. Applied to
    /// each volume separately, since numbering restarts per volume.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_range: Option<PageRange>,
    /// Attach each layer's raw markup to every record.
    pub retain_raw_layers: bool,
    /// Tolerate invisible formatting characters (ZWNJ, ZWJ, LRM, RLM, ALM,
    /// BOM) between a reference's parentheses and its digits. Off unless
    /// asked for: such references have not been seen in real exports.
    pub lenient_reference_boundaries: bool,
}
impl Config {
    /// Loads and validates the configuration.
    ///
    /// With an explicit `path` the file must exist. Without one, the
    /// platform's default location is used when a file is present there.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) if !path.is_file() => exn::bail!(ErrorKind::NotFound(path.display().to_string())),
            Some(path) => Some(path.to_path_buf()),
            None => Self::default_path().filter(|path| path.is_file()),
        };
        match &file {
            Some(path) => tracing::debug!(path = %path.display(), "Loading configuration file"),
            None => tracing::debug!("No configuration file; using defaults and environment"),
        }
        let config: Self = Self::figment(file.as_deref())?.extract().or_raise(|| ErrorKind::Invalid)?;
        config.validate()?;
        Ok(config)
    }

    /// Builds the layered [`Figment`] without extracting it.
    pub fn figment(file: Option<&Path>) -> Result<Figment> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = file {
            let extension = path.extension().and_then(|e| e.to_str()).unwrap_or_default().to_ascii_lowercase();
            figment = match extension.as_str() {
                "toml" => figment.merge(Toml::file(path)),
                "yaml" | "yml" => figment.merge(Yaml::file(path)),
                "json" => figment.merge(Json::file(path)),
                _ => exn::bail!(ErrorKind::UnsupportedFormat(extension)),
            };
        }
        Ok(figment.merge(Env::prefixed(ENV_PREFIX).split(ENV_SEPARATOR)))
    }

    /// The default configuration file location, e.g. `~/.config/kitab/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "kitab").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(PageRange { start, end }) = self.page_range
            && start > end
        {
            exn::bail!(ErrorKind::InvalidRange { start, end });
        }
        Ok(())
    }

    /// The options relevant to parsing individual pages.
    pub fn page_options(&self) -> PageOptions {
        PageOptions {
            retain_raw_layers: self.retain_raw_layers,
            lenient_reference_boundaries: self.lenient_reference_boundaries,
        }
    }
}
