use thiserror::Error;

/// Failures of the cluster store behind [`crate::store::ServiceStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("service not found")]
    NotFound,
    #[error("service was modified concurrently")]
    Conflict(#[source] kube::Error),
    #[error(transparent)]
    Kube(#[from] kube::Error),
    #[error("unable to serialize service")]
    Serialization(#[from] serde_json::Error),
    #[error("service has no resourceVersion, refusing an unconditional status replace")]
    MissingResourceVersion,
}

impl StoreError {
    /// Classifies a kube error by the status code of the API response.
    pub fn from_kube(err: kube::Error) -> Self {
        let code = match &err {
            kube::Error::Api(response) => Some(response.code),
            _ => None,
        };
        match code {
            Some(404) => StoreError::NotFound,
            Some(409) => StoreError::Conflict(err),
            _ => StoreError::Kube(err),
        }
    }
}

/// Every way an assignment can abort. None of them leave a partially written status behind.
#[derive(Debug, Error)]
pub enum AssignError {
    #[error("invalid loadBalancerIP {0:?}")]
    InvalidAddress(String),

    #[error("service {namespace}/{name} not found")]
    ResourceNotFound { namespace: String, name: String },

    #[error("failed to get service {namespace}/{name}")]
    Fetch {
        namespace: String,
        name: String,
        #[source]
        source: StoreError,
    },

    #[error("service {namespace}/{name} is not type: LoadBalancer (found type: {found})")]
    WrongResourceType {
        namespace: String,
        name: String,
        found: String,
    },

    #[error("no address given and service {namespace}/{name} has no spec.loadBalancerIP")]
    NoAddressAvailable { namespace: String, name: String },

    #[error("conflict while updating status of service {namespace}/{name}")]
    UpdateConflict {
        namespace: String,
        name: String,
        #[source]
        source: StoreError,
    },

    #[error("failed to update status of service {namespace}/{name}")]
    Update {
        namespace: String,
        name: String,
        #[source]
        source: StoreError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use kube::core::ErrorResponse;

    fn api_error(code: u16, reason: &str) -> kube::Error {
        kube::Error::Api(ErrorResponse {
            status: "Failure".to_string(),
            message: format!("{reason} happened"),
            reason: reason.to_string(),
            code,
        })
    }

    #[test]
    fn not_found_is_classified() {
        assert!(matches!(StoreError::from_kube(api_error(404, "NotFound")), StoreError::NotFound));
    }

    #[test]
    fn conflict_is_classified() {
        assert!(matches!(StoreError::from_kube(api_error(409, "Conflict")), StoreError::Conflict(_)));
    }

    #[test]
    fn other_api_errors_stay_transport_errors() {
        assert!(matches!(StoreError::from_kube(api_error(403, "Forbidden")), StoreError::Kube(_)));
    }

    #[test]
    fn messages_name_the_target() {
        let err = AssignError::WrongResourceType {
            namespace: "default".to_string(),
            name: "web".to_string(),
            found: "ClusterIP".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "service default/web is not type: LoadBalancer (found type: ClusterIP)"
        );
        assert_eq!(
            AssignError::InvalidAddress("10.0.0.300".to_string()).to_string(),
            "invalid loadBalancerIP \"10.0.0.300\""
        );
    }
}
