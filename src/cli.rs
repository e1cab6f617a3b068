use std::path::PathBuf;

use clap::Parser;

use crate::config::{Config, ConfigError};

#[derive(Debug, Parser)]
#[command(name = "plainhttp")]
#[command(about = "Tiny HTTP/1.1 server: echo, user-agent and file routes", long_about = None)]
pub struct Cli {
    /// Base directory for /files/ requests
    #[arg(long)]
    pub directory: Option<PathBuf>,

    /// YAML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Address to listen on, e.g. 127.0.0.1:4221
    #[arg(short, long)]
    pub listen: Option<String>,
}

impl Cli {
    /// Resolves the final configuration, flags taking precedence.
    pub fn into_config(self) -> Result<Config, ConfigError> {
        let mut cfg = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::load(),
        };

        if let Some(directory) = self.directory {
            cfg.files.directory = directory;
        }
        if let Some(listen) = self.listen {
            cfg.server.listen_addr = listen;
        }

        cfg.validate()?;
        Ok(cfg)
    }
}
