use std::fmt;

use serde::Deserialize;

use crate::cluster::decode::decode_base64;
use crate::env::EnvSource;
use crate::errors::{AppError, AppResult, CredentialField};
use crate::kube::transport::TransportConfig;

/// JSON document holding the TLS client configuration.
pub const CONFIG_VAR: &str = "K8S_CONFIG";
/// URL of the API server, e.g. `https://10.0.0.5:6443`.
pub const HOST_VAR: &str = "K8S_HOST";

/// Only one external cluster is supported, so it always gets this name.
pub const DEFAULT_CLUSTER_NAME: &str = "default";

/// Connection settings for one external cluster.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClusterConnectionConfig {
    pub name: String,
    pub host: String,
    pub tls: TlsClientConfig,
}

/// `tlsClientConfig` as it appears in `K8S_CONFIG`. The data fields hold
/// base64 PEM, and each is empty when missing from the document.
#[derive(Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct TlsClientConfig {
    pub insecure: bool,
    pub cert_data: String,
    pub key_data: String,
    pub ca_data: String,
}

impl fmt::Debug for TlsClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TlsClientConfig")
            .field("insecure", &self.insecure)
            .field("cert_data", &self.cert_data)
            .field("key_data", &format_args!("<{} chars>", self.key_data.len()))
            .field("ca_data", &self.ca_data)
            .finish()
    }
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ConfigDocument {
    tls_client_config: TlsClientConfig,
}

/// Decoded TLS material. `None` marks a field that was not supplied.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct TlsCredentials {
    pub insecure_skip_verify: bool,
    pub certificate: Option<Vec<u8>>,
    pub private_key: Option<Vec<u8>>,
    pub ca_certificate: Option<Vec<u8>>,
}

impl fmt::Debug for TlsCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TlsCredentials")
            .field("insecure_skip_verify", &self.insecure_skip_verify)
            .field("certificate", &self.certificate.as_ref().map(Vec::len))
            .field("private_key", &self.private_key.as_ref().map(Vec::len))
            .field("ca_certificate", &self.ca_certificate.as_ref().map(Vec::len))
            .finish()
    }
}

impl TlsClientConfig {
    fn field(&self, field: CredentialField) -> &str {
        match field {
            CredentialField::Certificate => &self.cert_data,
            CredentialField::PrivateKey => &self.key_data,
            CredentialField::CaCertificate => &self.ca_data,
        }
    }

    /// Lenient policy: every field is optional and an empty one decodes to `None`.
    pub fn decode(&self) -> AppResult<TlsCredentials> {
        let optional = |field: CredentialField| -> AppResult<Option<Vec<u8>>> {
            let bytes = decode_base64(self.field(field))?;
            Ok((!bytes.is_empty()).then_some(bytes))
        };

        Ok(TlsCredentials {
            insecure_skip_verify: self.insecure,
            certificate: optional(CredentialField::Certificate)?,
            private_key: optional(CredentialField::PrivateKey)?,
            ca_certificate: optional(CredentialField::CaCertificate)?,
        })
    }

    /// Required policy used for external clusters: all three fields must be
    /// present. Presence is checked for every field before anything is decoded.
    pub fn decode_required(&self, cluster: &str, host: &str) -> AppResult<TransportConfig> {
        const FIELDS: [CredentialField; 3] = [
            CredentialField::Certificate,
            CredentialField::PrivateKey,
            CredentialField::CaCertificate,
        ];

        if let Some(field) = FIELDS.into_iter().find(|f| self.field(*f).is_empty()) {
            return Err(AppError::MissingCredential {
                cluster: cluster.to_string(),
                field,
            });
        }

        let required = |field: CredentialField| {
            decode_base64(self.field(field)).map_err(|source| AppError::CredentialDecode {
                cluster: cluster.to_string(),
                field,
                source,
            })
        };

        Ok(TransportConfig {
            host: host.to_string(),
            insecure_skip_verify: self.insecure,
            certificate: required(CredentialField::Certificate)?,
            private_key: required(CredentialField::PrivateKey)?,
            ca_certificate: required(CredentialField::CaCertificate)?,
        })
    }
}

/// Read the external cluster settings from `K8S_CONFIG` and `K8S_HOST`.
pub fn load_external_config(env: &dyn EnvSource) -> AppResult<ClusterConnectionConfig> {
    let raw = env
        .non_empty(CONFIG_VAR)
        .ok_or(AppError::MissingConfig { var: CONFIG_VAR })?;

    let host = env
        .non_empty(HOST_VAR)
        .ok_or(AppError::MissingHost { var: HOST_VAR })?;

    let doc: ConfigDocument =
        serde_json::from_str(&raw).map_err(|source| AppError::ConfigParse {
            var: CONFIG_VAR,
            source,
        })?;

    tracing::debug!(
        host = %host,
        insecure = doc.tls_client_config.insecure,
        "loaded external cluster config"
    );

    Ok(ClusterConnectionConfig {
        name: DEFAULT_CLUSTER_NAME.to_string(),
        host,
        tls: doc.tls_client_config,
    })
}
