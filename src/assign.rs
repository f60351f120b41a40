use crate::{
    address,
    error::{
        AssignError,
        StoreError,
    },
    services,
    store::ServiceStore,
};
use k8s_openapi::api::core::v1::Service;

/// A resolved assignment that has not been written yet.
#[derive(Debug, Clone)]
pub struct Plan {
    /// The fetched Service with its new `status.loadBalancer`. Metadata, including the
    /// `resourceVersion` the write is conditional on, is exactly what was read.
    pub service: Service,
    /// Addresses in the order they are published.
    pub addresses: Vec<String>,
}

/// Publishes load balancer addresses into a Service's status: one read, then one conditional write.
pub struct StatusAssigner<S> {
    store: S,
}

impl<S: ServiceStore> StatusAssigner<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Resolves the addresses for `namespace/name` and builds the updated Service without writing
    /// it.
    ///
    /// Explicit addresses take precedence over the Service's own `spec.loadBalancerIP`, which is
    /// only consulted when `explicit` is empty.
    #[instrument(level = "debug", skip(self))]
    pub async fn plan(&self, namespace: &str, name: &str, explicit: &[String]) -> Result<Plan, AssignError> {
        address::validate_all(explicit)?;

        let mut svc = self.store.fetch(namespace, name).await.map_err(|err| match err {
            StoreError::NotFound => AssignError::ResourceNotFound {
                namespace: namespace.to_string(),
                name: name.to_string(),
            },
            source => AssignError::Fetch {
                namespace: namespace.to_string(),
                name: name.to_string(),
                source,
            },
        })?;

        if !services::is_load_balancer(&svc) {
            return Err(AssignError::WrongResourceType {
                namespace: namespace.to_string(),
                name: name.to_string(),
                found: services::service_type(&svc).to_string(),
            });
        }

        let requested = services::requested_addresses(&svc);
        let addresses = match (explicit, requested) {
            ([], None) => {
                return Err(AssignError::NoAddressAvailable {
                    namespace: namespace.to_string(),
                    name: name.to_string(),
                })
            }
            ([], Some(requested)) => {
                debug!(%requested, "using spec.loadBalancerIP of service {namespace}/{name}");
                address::split_list(requested)?
            }
            (explicit, Some(requested)) => {
                warn!(
                    ?explicit,
                    %requested,
                    "explicit addresses override spec.loadBalancerIP of service {namespace}/{name}"
                );
                explicit.to_vec()
            }
            (explicit, None) => explicit.to_vec(),
        };

        if services::already_publishes(&svc, &addresses) {
            info!("service {namespace}/{name} already publishes {addresses:?}");
        }

        services::set_ingress(&mut svc, &addresses);

        Ok(Plan { service: svc, addresses })
    }

    /// Resolves and publishes the load balancer addresses of `namespace/name`.
    ///
    /// Returns the Service as stored after the write. Conflicting concurrent modifications surface
    /// as [`AssignError::UpdateConflict`] and are not retried.
    pub async fn assign(&self, namespace: &str, name: &str, explicit: &[String]) -> Result<Service, AssignError> {
        let Plan { service, addresses } = self.plan(namespace, name, explicit).await?;

        let updated = self.store.replace_status(&service).await.map_err(|err| match err {
            source @ StoreError::Conflict(_) => AssignError::UpdateConflict {
                namespace: namespace.to_string(),
                name: name.to_string(),
                source,
            },
            source => AssignError::Update {
                namespace: namespace.to_string(),
                name: name.to_string(),
                source,
            },
        })?;

        info!("assigned {addresses:?} to service {namespace}/{name}");
        Ok(updated)
    }
}
