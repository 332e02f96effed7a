pub mod cli;
pub mod cluster;
pub mod config;
pub mod env;
pub mod errors;
pub mod kube;
pub mod logging;
pub mod output;
pub mod types;

use std::fmt::Debug;

use k8s_openapi::api::core::v1::{Pod, ServiceAccount};
use k8s_openapi::NamespaceResourceScope;
use serde::de::DeserializeOwned;

use crate::cluster::config::load_external_config;
use crate::config::Config;
use crate::env::EnvSource;
use crate::errors::AppResult;
use crate::kube::client::{create_external_client, create_in_cluster_client, ClusterClient};
use crate::kube::incluster::InClusterSource;

pub async fn run(config: Config, env: &dyn EnvSource) -> AppResult<()> {
    // In-cluster first, then external, as in the original demo.
    if config.mode.in_cluster() {
        let source = InClusterSource::new(env, config.service_account_dir.clone());
        let client = create_in_cluster_client(&source).await?;

        print_listing::<Pod>(&client, &config, "In-Cluster Pod Name").await?;
    }

    if config.mode.external() {
        let cluster = load_external_config(env)?;
        let client = create_external_client(&cluster).await?;

        print_listing::<ServiceAccount>(&client, &config, "External Cluster Service Account Name")
            .await?;
    }

    Ok(())
}

async fn print_listing<K>(client: &ClusterClient, config: &Config, heading: &str) -> AppResult<()>
where
    K: ::kube::Resource<Scope = NamespaceResourceScope> + Clone + DeserializeOwned + Debug,
    <K as ::kube::Resource>::DynamicType: Default,
{
    let items = client.list::<K>(&config.namespace).await?;
    output::emit(config.output, heading, &items)?;
    Ok(())
}
