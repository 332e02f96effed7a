use std::path::PathBuf;

use crate::cli::Cli;
use crate::errors::{AppError, AppResult};
use crate::types::{ConnectMode, OutputMode};

#[derive(Clone, Debug)]
pub struct Config {
    pub namespace: String,
    pub mode: ConnectMode,
    pub output: OutputMode,
    pub service_account_dir: PathBuf,
}

impl TryFrom<Cli> for Config {
    type Error = AppError;

    fn try_from(cli: Cli) -> AppResult<Self> {
        let namespace = cli.namespace.trim().to_string();
        if namespace.is_empty() {
            return Err(AppError::Cli("namespace must not be empty".to_string()));
        }

        let output = if cli.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };

        Ok(Self {
            namespace,
            mode: cli.mode.into(),
            output,
            service_account_dir: cli.service_account_dir,
        })
    }
}
