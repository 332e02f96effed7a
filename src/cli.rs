use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::kube::incluster::SERVICE_ACCOUNT_DIR;
use crate::types::ConnectMode;

#[derive(Debug, Parser)]
#[command(
    name = "kube-connect",
    version,
    about = "Connect to a Kubernetes cluster from inside a pod or with credentials from the environment"
)]
pub struct Cli {
    /// Namespace to list resources in
    #[arg(short = 'n', long = "namespace", default_value = "default")]
    pub namespace: String,

    /// Which client to build: in-cluster (lists pods), external (lists
    /// service accounts, needs K8S_HOST and K8S_CONFIG) or both
    #[arg(long = "mode", value_enum, default_value_t = ModeArg::Both)]
    pub mode: ModeArg,

    /// Emit NDJSON resource summaries
    #[arg(long = "json", default_value_t = false)]
    pub json: bool,

    /// Service account mount used by the in-cluster client
    #[arg(long = "service-account-dir", default_value = SERVICE_ACCOUNT_DIR)]
    pub service_account_dir: PathBuf,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum ModeArg {
    InCluster,
    External,
    Both,
}

impl From<ModeArg> for ConnectMode {
    fn from(v: ModeArg) -> Self {
        match v {
            ModeArg::InCluster => ConnectMode::InCluster,
            ModeArg::External => ConnectMode::External,
            ModeArg::Both => ConnectMode::Both,
        }
    }
}
