use std::fmt::{self, Debug};

use k8s_openapi::apimachinery::pkg::version::Info;
use k8s_openapi::NamespaceResourceScope;
use kube::api::ListParams;
use kube::{Api, Client, Resource, ResourceExt};
use serde::de::DeserializeOwned;

use crate::cluster::config::ClusterConnectionConfig;
use crate::errors::{AppError, AppResult};
use crate::kube::incluster::{InClusterSource, IN_CLUSTER_NAME};
use crate::types::ResourceSummary;

/// A verified connection to one API server.
#[derive(Clone)]
pub struct ClusterClient {
    name: String,
    client: Client,
}

impl Debug for ClusterClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClusterClient")
            .field("name", &self.name)
            .field("default_namespace", &self.client.default_namespace())
            .finish()
    }
}

impl ClusterClient {
    /// `default` for the external cluster, `in-cluster` otherwise.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The underlying client, for calls this wrapper does not cover.
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Repeats the liveness query made at construction.
    pub async fn server_version(&self) -> AppResult<Info> {
        Ok(self.client.apiserver_version().await?)
    }

    /// List every `K` in `namespace`, in the order the API server returns them.
    pub async fn list<K>(&self, namespace: &str) -> AppResult<Vec<ResourceSummary>>
    where
        K: Resource<Scope = NamespaceResourceScope> + Clone + DeserializeOwned + Debug,
        <K as Resource>::DynamicType: Default,
    {
        let api: Api<K> = Api::namespaced(self.client.clone(), namespace);
        let list = api.list(&ListParams::default()).await?;
        let kind = K::kind(&Default::default()).to_string();

        tracing::debug!(
            cluster = %self.name,
            kind = %kind,
            namespace = %namespace,
            count = list.items.len(),
            "listed resources"
        );

        Ok(list
            .items
            .iter()
            .map(|obj| ResourceSummary {
                cluster: self.name.clone(),
                kind: kind.clone(),
                namespace: obj.namespace().unwrap_or_else(|| namespace.to_string()),
                name: obj.name_any(),
            })
            .collect())
    }
}

/// Client for a cluster reached from outside, authenticated with the client
/// certificate in `cfg`. All three credentials are required.
pub async fn create_external_client(cfg: &ClusterConnectionConfig) -> AppResult<ClusterClient> {
    let transport = cfg.tls.decode_required(&cfg.name, &cfg.host)?;
    let config = transport.to_kube_config(&cfg.name).await?;
    connect(&cfg.name, config).await
}

/// Client for the cluster this process runs in, authenticated with the
/// mounted service account.
pub async fn create_in_cluster_client(source: &InClusterSource<'_>) -> AppResult<ClusterClient> {
    let config = source.load().await?;
    connect(IN_CLUSTER_NAME, config).await
}

async fn connect(name: &str, config: kube::Config) -> AppResult<ClusterClient> {
    let client = Client::try_from(config).map_err(|e| AppError::construction(name, e))?;
    verify(name, client).await
}

/// Confirm the server answers before handing the client out.
pub(crate) async fn verify(name: &str, client: Client) -> AppResult<ClusterClient> {
    let version = client
        .apiserver_version()
        .await
        .map_err(|source| AppError::Connection {
            cluster: name.to_string(),
            source,
        })?;

    tracing::info!(
        cluster = %name,
        version = %version.git_version,
        "successfully connected to kubernetes cluster"
    );

    Ok(ClusterClient {
        name: name.to_string(),
        client,
    })
}
