//! CLI surface (§10.5), following the reference's "args merge into a
//! file-loaded config" convention: the file wins unless a flag is
//! explicitly passed.

use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;

#[derive(Parser, Debug)]
#[command(about, version)]
pub struct Args {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Overrides `service.port`.
    #[arg(long)]
    pub port: Option<u16>,

    /// Overrides `service.workers`.
    #[arg(long)]
    pub workers: Option<usize>,

    /// Overrides `log.level`.
    #[arg(long)]
    pub log_level: Option<String>,

    /// Overrides `log.format`.
    #[arg(long)]
    pub log_format: Option<String>,
}

impl Args {
    pub fn merge_into_config(&self, config: &mut Config) {
        if let Some(port) = self.port {
            config.service.port = port;
        }
        if let Some(workers) = self.workers {
            config.service.workers = Some(workers);
        }
        if let Some(level) = &self.log_level {
            config.log.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            config.log.format = format.clone();
        }
    }
}
