use k8s_openapi::api::core::v1::{
    LoadBalancerIngress,
    LoadBalancerStatus,
    Service,
    ServiceStatus,
};

pub const LOAD_BALANCER: &str = "LoadBalancer";

/// Kubernetes treats a Service without `spec.type` as ClusterIP.
const DEFAULT_SERVICE_TYPE: &str = "ClusterIP";

pub fn service_type(svc: &Service) -> &str {
    svc.spec
        .as_ref()
        .and_then(|spec| spec.type_.as_deref())
        .unwrap_or(DEFAULT_SERVICE_TYPE)
}

pub fn is_load_balancer(svc: &Service) -> bool {
    service_type(svc) == LOAD_BALANCER
}

/// The comma-joined `spec.loadBalancerIP`, if set to anything.
pub fn requested_addresses(svc: &Service) -> Option<&str> {
    svc.spec
        .as_ref()
        .and_then(|spec| spec.load_balancer_ip.as_deref())
        .filter(|ips| !ips.is_empty())
}

pub fn load_balancer_status<S: AsRef<str>>(addresses: &[S]) -> LoadBalancerStatus {
    LoadBalancerStatus {
        ingress: Some(
            addresses
                .iter()
                .map(|ip| LoadBalancerIngress {
                    ip: Some(ip.as_ref().to_string()),
                    ..Default::default()
                })
                .collect(),
        ),
    }
}

/// Whether `status.loadBalancer` is already exactly what [`set_ingress`] would write. Entries
/// carrying a hostname or ports make it differ.
pub fn already_publishes<S: AsRef<str>>(svc: &Service, addresses: &[S]) -> bool {
    svc.status.as_ref().and_then(|status| status.load_balancer.as_ref()) == Some(&load_balancer_status(addresses))
}

/// Replaces `status.loadBalancer` wholesale, leaving spec, metadata and the other status fields
/// as they were fetched.
pub fn set_ingress<S: AsRef<str>>(svc: &mut Service, addresses: &[S]) {
    svc.status
        .get_or_insert_with(ServiceStatus::default)
        .load_balancer = Some(load_balancer_status(addresses));
}
