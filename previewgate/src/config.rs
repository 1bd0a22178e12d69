//! Configuration loading (SPEC_FULL §10.2): a TOML file, nested into the
//! tables named below, overridable by `PREVIEWGATE_`-prefixed environment
//! variables with `__` as the section separator.

use std::net::IpAddr;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{BootError, BootResult};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub name: String,
    pub ip: IpAddr,
    pub port: u16,
    pub timeout_in_seconds: u64,
    pub workers: Option<usize>,
    pub image_name: String,
    pub health_name: String,
    pub pdf_name: String,
    pub document_name: String,
    pub enable_document_preview: bool,
    pub enable_document_thumbnail: bool,
    pub docs_timeout_seconds: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: "preview".to_string(),
            ip: IpAddr::from([127, 0, 0, 1]),
            port: 8080,
            timeout_in_seconds: 30,
            workers: None,
            image_name: "image".to_string(),
            health_name: "health".to_string(),
            pdf_name: "pdf".to_string(),
            document_name: "document".to_string(),
            enable_document_preview: true,
            enable_document_thumbnail: true,
            docs_timeout_seconds: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub protocol: String,
    pub ip: IpAddr,
    pub port: u16,
    pub download_api: String,
    pub health_check: String,
    pub name: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            protocol: "http".to_string(),
            ip: IpAddr::from([127, 0, 0, 1]),
            port: 9000,
            download_api: "download".to_string(),
            health_check: "health".to_string(),
            name: "storage".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DocumentConversionConfig {
    pub protocol: String,
    pub ip: IpAddr,
    pub port: u16,
    pub service_endpoint: String,
    pub convert_api: String,
}

impl Default for DocumentConversionConfig {
    fn default() -> Self {
        Self {
            protocol: "http".to_string(),
            ip: IpAddr::from([127, 0, 0, 1]),
            port: 9100,
            service_endpoint: "docs".to_string(),
            convert_api: "convert".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `None` (or `-`) logs to stdout; any other path selects a rolling
    /// file appender (§10.3).
    pub path: Option<PathBuf>,
    pub format: String,
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            path: None,
            format: "compact".to_string(),
            level: "INFO".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ImageConstantsConfig {
    pub minimum_resolution: u32,
}

impl Default for ImageConstantsConfig {
    fn default() -> Self {
        Self {
            minimum_resolution: 50,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub service: ServiceConfig,
    pub storage: StorageConfig,
    pub document_conversion: DocumentConversionConfig,
    pub log: LogConfig,
    pub image_constants: ImageConstantsConfig,
}

impl Config {
    /// Loads `path` (if it exists) layered under defaults, then applies
    /// `PREVIEWGATE_`-prefixed environment overrides.
    pub fn load(path: &Path) -> BootResult<Self> {
        let built = config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .add_source(
                config::Environment::with_prefix("PREVIEWGATE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        Ok(built.try_deserialize()?)
    }

    /// Boot-time validation per §6 "Port constraints" and §10.2.
    pub fn validate(&self) -> BootResult<()> {
        if self.image_constants.minimum_resolution == 0 {
            return Err(BootError::InvalidMinimumResolution(
                self.image_constants.minimum_resolution,
            ));
        }
        if let Some(path) = &self.log.path {
            if !path.exists() {
                return Err(BootError::LogPathMissing(path.display().to_string()));
            }
        }
        Ok(())
    }
}
