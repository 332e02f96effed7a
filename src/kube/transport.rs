use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use kube::config::{KubeConfigOptions, Kubeconfig};
use serde_json::json;

use crate::errors::{AppError, AppResult};

/// Host, TLS material and verification policy for one API server.
#[derive(Clone, PartialEq, Eq)]
pub struct TransportConfig {
    pub host: String,
    pub insecure_skip_verify: bool,
    /// Client certificate, PEM.
    pub certificate: Vec<u8>,
    /// Client private key, PEM.
    pub private_key: Vec<u8>,
    /// Certificate authority bundle, PEM.
    pub ca_certificate: Vec<u8>,
}

impl fmt::Debug for TransportConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportConfig")
            .field("host", &self.host)
            .field("insecure_skip_verify", &self.insecure_skip_verify)
            .field("certificate", &self.certificate.len())
            .field("private_key", &"<redacted>")
            .field("ca_certificate", &self.ca_certificate.len())
            .finish()
    }
}

impl TransportConfig {
    /// Single-context kubeconfig where cluster, user and context are all
    /// called `name`. Kubeconfig carries the PEM blocks base64 encoded.
    pub fn to_kubeconfig(&self, name: &str) -> Result<Kubeconfig, serde_json::Error> {
        let doc = json!({
            "apiVersion": "v1",
            "kind": "Config",
            "clusters": [{
                "name": name,
                "cluster": {
                    "server": self.host,
                    "insecure-skip-tls-verify": self.insecure_skip_verify,
                    "certificate-authority-data": STANDARD.encode(&self.ca_certificate),
                },
            }],
            "users": [{
                "name": name,
                "user": {
                    "client-certificate-data": STANDARD.encode(&self.certificate),
                    "client-key-data": STANDARD.encode(&self.private_key),
                },
            }],
            "contexts": [{
                "name": name,
                "context": { "cluster": name, "user": name },
            }],
            "current-context": name,
        });

        serde_json::from_value(doc)
    }

    pub async fn to_kube_config(&self, name: &str) -> AppResult<kube::Config> {
        let kubeconfig = self
            .to_kubeconfig(name)
            .map_err(|e| AppError::construction(name, e))?;

        kube::Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
            .await
            .map_err(|e| AppError::construction(name, e))
    }
}
