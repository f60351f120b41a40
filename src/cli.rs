use crate::{
    address,
    error::AssignError,
};
use clap::{
    builder::NonEmptyStringValueParser,
    Parser,
};
use std::time::Duration;

/// Build identification printed by `--version`. Release builds inject it through
/// `ASSIGN_LB_IP_BUILD_VERSION`; anything else reports the package version.
pub const VERSION: &str = match option_env!("ASSIGN_LB_IP_BUILD_VERSION") {
    Some(version) => version,
    None => env!("CARGO_PKG_VERSION"),
};

/// Assign external IPs to a LoadBalancer Service by writing its status directly.
///
/// Without --ip the addresses come from the Service's own spec.loadBalancerIP.
#[derive(Parser, Debug)]
#[command(version = VERSION, about)]
pub struct Args {
    #[clap(
        long = "svc",
        visible_alias = "service",
        env = "ASSIGN_LB_IP_SERVICE",
        help = "Service to update",
        value_parser = NonEmptyStringValueParser::new()
    )]
    pub service: String,

    #[clap(
        short,
        long,
        env = "ASSIGN_LB_IP_NAMESPACE",
        default_value = "default",
        help = "Namespace of the service",
        value_parser = NonEmptyStringValueParser::new()
    )]
    pub namespace: String,

    #[clap(
        long = "ip",
        env = "ASSIGN_LB_IP_ADDRESSES",
        help = "Comma-separated load balancer IPs. Defaults to the service's spec.loadBalancerIP"
    )]
    pub ip: Option<String>,

    #[clap(long, help = "Print the resulting status.loadBalancer instead of writing it")]
    pub dry_run: bool,

    #[clap(
        long,
        env = "ASSIGN_LB_IP_TIMEOUT",
        help = "Give up if the cluster has not answered within this time (e.g. 10s)",
        value_parser = humantime::parse_duration
    )]
    pub timeout: Option<Duration>,
}

impl Args {
    /// The `--ip` list, validated. Empty when the flag was not given or given empty.
    pub fn addresses(&self) -> Result<Vec<String>, AssignError> {
        address::split_list(self.ip.as_deref().unwrap_or_default())
    }
}
