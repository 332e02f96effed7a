//! Connection settings for code running inside a pod.
//!
//! The platform mounts the service account token, the cluster CA and the pod
//! namespace under one directory and exports the API server address through
//! `KUBERNETES_SERVICE_HOST` / `KUBERNETES_SERVICE_PORT`. Both the directory
//! and the environment are injected so the loading can run outside a pod.

use std::fs;
use std::path::{Path, PathBuf};

use kube::config::{KubeConfigOptions, Kubeconfig};
use serde_json::json;

use crate::env::{EnvSource, ProcessEnv};
use crate::errors::{AppError, AppResult};

pub const SERVICE_ACCOUNT_DIR: &str = "/var/run/secrets/kubernetes.io/serviceaccount";
pub const SERVICE_HOST_VAR: &str = "KUBERNETES_SERVICE_HOST";
pub const SERVICE_PORT_VAR: &str = "KUBERNETES_SERVICE_PORT";

/// Label used in logs and errors for the in-cluster connection.
pub const IN_CLUSTER_NAME: &str = "in-cluster";

const TOKEN_FILE: &str = "token";
const CA_FILE: &str = "ca.crt";
const NAMESPACE_FILE: &str = "namespace";
const DEFAULT_NAMESPACE: &str = "default";

/// Where the in-cluster connection settings are read from.
pub struct InClusterSource<'a> {
    env: &'a dyn EnvSource,
    mount: PathBuf,
}

impl InClusterSource<'static> {
    /// The process environment and the standard service account mount.
    pub fn from_process() -> Self {
        Self::new(&ProcessEnv, SERVICE_ACCOUNT_DIR)
    }
}

impl<'a> InClusterSource<'a> {
    pub fn new(env: &'a dyn EnvSource, mount: impl Into<PathBuf>) -> Self {
        Self {
            env,
            mount: mount.into(),
        }
    }

    /// Directory holding `token`, `ca.crt` and `namespace`.
    pub fn mount(&self) -> &Path {
        &self.mount
    }

    /// `https://host:port`, bracketing IPv6 literals.
    pub fn server_url(&self) -> AppResult<String> {
        let host = self.required_var(SERVICE_HOST_VAR)?;
        let port = self.required_var(SERVICE_PORT_VAR)?;

        if host.contains(':') && !host.starts_with('[') {
            Ok(format!("https://[{host}]:{port}"))
        } else {
            Ok(format!("https://{host}:{port}"))
        }
    }

    /// Namespace from the mount, falling back to `default`.
    pub fn namespace(&self) -> String {
        fs::read_to_string(self.mount.join(NAMESPACE_FILE))
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string())
    }

    /// Single-context kubeconfig pointing at the mounted CA and token files.
    /// The token is referenced, not copied, so `kube` picks up rotations.
    pub fn to_kubeconfig(&self) -> AppResult<Kubeconfig> {
        let server = self.server_url()?;
        let token = self.mounted_file(TOKEN_FILE)?;
        let ca = self.mounted_file(CA_FILE)?;
        let namespace = self.namespace();

        let doc = json!({
            "apiVersion": "v1",
            "kind": "Config",
            "clusters": [{
                "name": IN_CLUSTER_NAME,
                "cluster": {
                    "server": server,
                    "certificate-authority": ca.to_string_lossy(),
                },
            }],
            "users": [{
                "name": IN_CLUSTER_NAME,
                "user": { "tokenFile": token.to_string_lossy() },
            }],
            "contexts": [{
                "name": IN_CLUSTER_NAME,
                "context": {
                    "cluster": IN_CLUSTER_NAME,
                    "user": IN_CLUSTER_NAME,
                    "namespace": namespace,
                },
            }],
            "current-context": IN_CLUSTER_NAME,
        });

        serde_json::from_value(doc).map_err(|e| AppError::InClusterConfig(e.to_string()))
    }

    /// Resolve the kubeconfig into a `kube::Config`. Any failure here is an
    /// `InClusterConfig` error.
    pub async fn load(&self) -> AppResult<kube::Config> {
        let kubeconfig = self.to_kubeconfig()?;

        let config = kube::Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
            .await
            .map_err(|e| AppError::InClusterConfig(e.to_string()))?;

        tracing::debug!(
            server = %config.cluster_url,
            namespace = %config.default_namespace,
            "loaded in-cluster config"
        );
        Ok(config)
    }

    fn required_var(&self, key: &str) -> AppResult<String> {
        self.env.non_empty(key).ok_or_else(|| {
            AppError::InClusterConfig(format!(
                "{key} is not set; not running inside a kubernetes pod?"
            ))
        })
    }

    fn mounted_file(&self, name: &str) -> AppResult<PathBuf> {
        let path = self.mount.join(name);
        if path.is_file() {
            Ok(path)
        } else {
            Err(AppError::InClusterConfig(format!(
                "service account file {} not found",
                path.display()
            )))
        }
    }
}
