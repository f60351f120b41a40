use eyre::{
    Context as _,
    Result,
};
use kube::Config;
use std::{
    fmt::Display,
    future::Future,
};

/// Builds a client from the pod's service account when running in a cluster, otherwise from the
/// local kubeconfig (`KUBECONFIG` or `~/.kube/config`).
///
/// `kube::Client::try_default` checks the kubeconfig first, which picks the wrong identity in a
/// pod that also has a kubeconfig mounted.
pub async fn client() -> Result<kube::Client> {
    let config = prefer_in_cluster(Config::incluster(), Config::infer()).await?;
    Ok(kube::Client::try_from(config)?)
}

async fn prefer_in_cluster<E, F, FE>(in_cluster: Result<Config, E>, kubeconfig: F) -> Result<Config>
where
    E: Display,
    F: Future<Output = Result<Config, FE>>,
    FE: std::error::Error + Send + Sync + 'static,
{
    match in_cluster {
        Ok(config) => {
            debug!(cluster_url = %config.cluster_url, "using in-cluster service account");
            Ok(config)
        }
        Err(err) => {
            debug!("not running in a cluster ({err}), falling back to kubeconfig");
            kubeconfig.await.context("Unable to load kubeconfig")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    fn config(url: &str) -> Config {
        Config::new(url.parse().unwrap())
    }

    #[tokio::test]
    async fn in_cluster_config_wins_over_kubeconfig() {
        let kubeconfig = async { Ok::<_, io::Error>(config("https://127.0.0.1:6443")) };

        let chosen = prefer_in_cluster(Ok::<_, String>(config("https://10.96.0.1:443")), kubeconfig)
            .await
            .unwrap();

        assert_eq!(chosen.cluster_url.host(), Some("10.96.0.1"));
    }

    #[tokio::test]
    async fn kubeconfig_is_used_outside_a_cluster() {
        let kubeconfig = async { Ok::<_, io::Error>(config("https://127.0.0.1:6443")) };

        let chosen = prefer_in_cluster(Err::<Config, _>("no service account token"), kubeconfig)
            .await
            .unwrap();

        assert_eq!(chosen.cluster_url.host(), Some("127.0.0.1"));
    }

    #[tokio::test]
    async fn both_sources_missing_is_an_error() {
        let kubeconfig = async { Err::<Config, _>(io::Error::new(io::ErrorKind::NotFound, "no kubeconfig")) };

        let err = prefer_in_cluster(Err::<Config, _>("no service account token"), kubeconfig)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Unable to load kubeconfig");
    }
}
