use std::error::Error as StdError;
use std::fmt;
use std::io;

use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// One of the three pieces of TLS material a cluster connection carries.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CredentialField {
    Certificate,
    PrivateKey,
    CaCertificate,
}

impl CredentialField {
    /// Key of the field inside `tlsClientConfig`.
    pub fn json_key(self) -> &'static str {
        match self {
            CredentialField::Certificate => "certData",
            CredentialField::PrivateKey => "keyData",
            CredentialField::CaCertificate => "caData",
        }
    }
}

impl fmt::Display for CredentialField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CredentialField::Certificate => "certificate",
            CredentialField::PrivateKey => "key",
            CredentialField::CaCertificate => "ca certificate",
        };
        write!(f, "{label} ({})", self.json_key())
    }
}

#[derive(Debug, Error)]
#[error("failed to decode base64 data: {0}")]
pub struct DecodeError(#[from] pub base64::DecodeError);

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Cli(String),

    #[error("{var} environment variable is not set")]
    MissingConfig { var: &'static str },

    #[error("{var} environment variable is not set")]
    MissingHost { var: &'static str },

    #[error("failed to parse {var} as JSON: {source}")]
    ConfigParse {
        var: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("no {field} data provided for cluster {cluster}")]
    MissingCredential {
        cluster: String,
        field: CredentialField,
    },

    #[error("failed to decode {field} data for cluster {cluster}: {source}")]
    CredentialDecode {
        cluster: String,
        field: CredentialField,
        #[source]
        source: DecodeError,
    },

    #[error("failed to create kubernetes client for cluster {cluster}: {source}")]
    ClientConstruction {
        cluster: String,
        #[source]
        source: BoxError,
    },

    #[error("failed to load in-cluster config: {0}")]
    InClusterConfig(String),

    #[error("failed to connect to kubernetes cluster {cluster}: {source}")]
    Connection {
        cluster: String,
        #[source]
        source: kube::Error,
    },

    #[error("kubernetes error: {0}")]
    Kube(#[from] kube::Error),

    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    pub(crate) fn construction(cluster: &str, source: impl Into<BoxError>) -> Self {
        AppError::ClientConstruction {
            cluster: cluster.to_string(),
            source: source.into(),
        }
    }
}
