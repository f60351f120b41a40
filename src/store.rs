use crate::error::StoreError;
use async_trait::async_trait;
use k8s_openapi::api::core::v1::Service;
use kube::{
    api::PostParams,
    Api,
    ResourceExt as _,
};

#[cfg(test)]
use mockall::automock;

/// The two cluster operations an assignment needs.
///
/// Both are expected to be optimistic-concurrency aware: a Service returned by [`fetch`] carries
/// its `resourceVersion`, and [`replace_status`] must fail with [`StoreError::Conflict`] when that
/// version is no longer current.
///
/// [`fetch`]: ServiceStore::fetch
/// [`replace_status`]: ServiceStore::replace_status
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ServiceStore: Send + Sync {
    async fn fetch(&self, namespace: &str, name: &str) -> Result<Service, StoreError>;

    async fn replace_status(&self, service: &Service) -> Result<Service, StoreError>;
}

/// [`ServiceStore`] backed by the Kubernetes API server.
pub struct KubeServiceStore {
    client: kube::Client,
}

impl KubeServiceStore {
    pub fn new(client: kube::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ServiceStore for KubeServiceStore {
    #[instrument(level = "debug", skip(self))]
    async fn fetch(&self, namespace: &str, name: &str) -> Result<Service, StoreError> {
        let svc = Api::<Service>::namespaced(self.client.clone(), namespace)
            .get(name)
            .await
            .map_err(StoreError::from_kube)?;
        debug!(resource_version = ?svc.metadata.resource_version, "fetched service");
        Ok(svc)
    }

    #[instrument(level = "debug", skip_all, fields(name = %service.name_any()))]
    async fn replace_status(&self, service: &Service) -> Result<Service, StoreError> {
        if service.metadata.resource_version.is_none() {
            return Err(StoreError::MissingResourceVersion);
        }
        let ns = service.namespace().unwrap_or_else(|| self.client.default_namespace().to_string());
        let name = service.name_any();

        let body = serde_json::to_vec(service)?;
        let updated = Api::<Service>::namespaced(self.client.clone(), &ns)
            .replace_status(&name, &PostParams::default(), body)
            .await
            .map_err(StoreError::from_kube)?;
        debug!(resource_version = ?updated.metadata.resource_version, "replaced service status");
        Ok(updated)
    }
}
